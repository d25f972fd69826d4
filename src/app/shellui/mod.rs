//! Desktop user interface for the operation shell.
//!
//! A single fixed-size window: a target column on the left (title, icon tiles,
//! trigger button, console toggle) and the console panel on the right. All
//! state lives in [`crate::app::controller::ShellController`]; this module only
//! renders it and turns clicks into [`app::ShellAction`]s.
//!
//! - [`app::ShellApp`] - eframe application and frame loop
//! - [`target_grid`] - icon tiles with the active indicator
//! - [`log_console`] - scrolling console view of the operation log
//! - [`window_surface::ViewportSurface`] - native window geometry via viewport commands

pub mod app;
pub mod log_console;
pub mod target_grid;
pub mod window_surface;

pub use app::{ShellAction, ShellApp};
