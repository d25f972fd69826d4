//! Core application modules for the operation shell.
//!
//! # Module Organization
//!
//! ## State
//! - [`targets`] - fixed target set with a single active selection
//! - [`operation_log`] - append-only console log
//! - [`panel`] - console panel visibility and window geometry
//! - [`theme`] - theme token resolution over catppuccin flavors
//! - [`pipeline`] - bridge to the external operation pipeline
//! - [`controller`] - composition of the above
//!
//! ## Infrastructure
//! - [`config`] - TOML configuration
//! - [`assets`] - icon loading with placeholder fallback
//! - [`error`] - error taxonomy
//! - [`shellui`] - egui rendering of the controller state

pub mod assets;
pub mod config;
pub mod controller;
pub mod error;
pub mod operation_log;
pub mod panel;
pub mod pipeline;
pub mod shellui;
pub mod targets;
pub mod theme;

pub use shellui::app::ShellApp;
