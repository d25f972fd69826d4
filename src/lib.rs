//! Operation Shell - single-window launcher for an external operation pipeline
//!
//! The shell shows a fixed set of targets as icon tiles, an append-only
//! console, a collapsible console panel, and a trigger button that runs the
//! operation pipeline for the selected target.
//!
//! # Architecture Overview
//!
//! - **UI Layer** ([`app::shellui`]): egui/eframe rendering and input
//! - **Controller** ([`app::controller::ShellController`]): owns all UI-visible state
//! - **State components**: [`app::targets`], [`app::operation_log`], [`app::panel`], [`app::theme`]
//! - **Pipeline bridge** ([`app::pipeline`]): runs operations off the UI thread and
//!   marshals their outcomes back through a channel
//!
//! All UI-visible state is mutated on the UI thread only. Background work talks
//! to it exclusively through messages.

#![warn(clippy::all, rust_2018_idioms)]

// Include logging macros first
#[macro_use]
pub mod logging_macros;

pub mod app;
pub use app::ShellApp;
