//! Applying user actions to the controller

use super::{ShellAction, ShellApp};
use crate::app::shellui::window_surface::ViewportSurface;
use eframe::egui;
use tracing::info;

impl ShellApp {
    /// Queue an action for the end of the current frame
    pub(super) fn push_action(&mut self, action: ShellAction) {
        self.pending_actions.push(action);
    }

    /// Apply one action. Rejections are already in the console log, so
    /// errors stop here.
    pub fn apply_action(&mut self, ctx: &egui::Context, action: ShellAction) {
        match action {
            ShellAction::Select(id) => {
                let _ = self.controller.select(&id);
            }
            ShellAction::Trigger => {
                if let Err(e) = self.controller.trigger() {
                    trace_debug!("Trigger rejected: {}", e);
                }
            }
            ShellAction::TogglePanel => {
                let state = self
                    .controller
                    .toggle_panel(&mut ViewportSurface::new(ctx));
                info!("Console panel now {:?}", state);
            }
            ShellAction::SetTheme(theme) => {
                if theme != self.preferences.theme {
                    info!("Theme changed to {}", theme);
                    self.preferences.theme = theme;
                    self.theme_dirty = true;
                }
            }
        }
    }
}
