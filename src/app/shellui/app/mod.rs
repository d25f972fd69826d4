//! Modular implementation of ShellApp
//!
//! - initialization: app creation and restoring preferences
//! - rendering: target column, console panel and trigger controls
//! - actions: applying user actions collected during rendering

use crate::app::assets::IconCache;
use crate::app::config::ShellConfig;
use crate::app::controller::ShellController;
use crate::app::targets::TargetId;
use crate::app::theme::ThemeChoice;
use eframe::egui;
use std::time::Duration;

mod actions;
mod initialization;
mod rendering;

/// Preferences persisted by eframe between runs
#[derive(Debug, serde::Deserialize, serde::Serialize, Clone, Copy, PartialEq, Default)]
#[serde(default)]
pub struct ShellPreferences {
    pub theme: ThemeChoice,
}

/// User actions collected while rendering and applied after the frame's layout
#[derive(Debug, Clone, PartialEq)]
pub enum ShellAction {
    Select(TargetId),
    Trigger,
    TogglePanel,
    SetTheme(ThemeChoice),
}

pub struct ShellApp {
    pub preferences: ShellPreferences,
    pub controller: ShellController,
    icons: IconCache,
    /// Theme must be (re)installed on the next frame
    theme_dirty: bool,
    pending_actions: Vec<ShellAction>,
}

impl Default for ShellApp {
    fn default() -> Self {
        Self::from_config(&ShellConfig::default(), None)
    }
}

impl eframe::App for ShellApp {
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        eframe::set_value(storage, eframe::APP_KEY, &self.preferences);
    }

    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if self.theme_dirty {
            self.controller.theme().apply(ctx, self.preferences.theme);
            self.theme_dirty = false;
        }

        // Outcomes from the worker land in the log before this frame draws it
        self.controller.pump();

        if ctx.input(|i| i.viewport().close_requested()) {
            self.controller.shutdown();
        }

        self.render(ctx);

        for action in std::mem::take(&mut self.pending_actions) {
            self.apply_action(ctx, action);
        }

        if self.controller.is_running() {
            ctx.request_repaint_after(Duration::from_millis(100));
        }
    }
}
