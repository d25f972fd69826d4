//! App creation and preference restore

use super::{ShellApp, ShellPreferences};
use crate::app::assets::IconCache;
use crate::app::config::ShellConfig;
use crate::app::controller::ShellController;
use crate::app::shellui::window_surface::ViewportSurface;
use tracing::info;

impl ShellApp {
    /// Create the app from the eframe creation context
    pub fn new(cc: &eframe::CreationContext<'_>, config: &ShellConfig) -> Self {
        let preferences = cc
            .storage
            .and_then(|storage| eframe::get_value::<ShellPreferences>(storage, eframe::APP_KEY));

        let mut app = Self::from_config(config, preferences);
        app.controller.set_repaint_context(cc.egui_ctx.clone());
        app.controller.start(&mut ViewportSurface::new(&cc.egui_ctx));

        info!(
            "Shell UI created with theme {} ({} targets)",
            app.preferences.theme,
            app.controller.registry().len()
        );
        app
    }

    /// Build without a window; saved preferences win over the configured theme
    pub fn from_config(config: &ShellConfig, preferences: Option<ShellPreferences>) -> Self {
        let preferences = preferences.unwrap_or(ShellPreferences {
            theme: config.theme,
        });

        Self {
            preferences,
            controller: ShellController::from_config(config),
            icons: IconCache::new(config.asset_dir.clone()),
            theme_dirty: true,
            pending_actions: Vec::new(),
        }
    }
}
