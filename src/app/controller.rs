//! Shell controller
//!
//! Composes the target registry, console log, panel controller, operation
//! bridge and theme resolver. All mutators run on the UI thread; the only
//! background work is inside the bridge.

use super::config::ShellConfig;
use super::error::ShellError;
use super::operation_log::OperationLogSink;
use super::panel::{PanelVisibilityController, PanelVisibilityState, WindowSurface};
use super::pipeline::{
    OperationOutcome, OperationPipeline, OperationPipelineBridge, PlaceholderPipeline,
};
use super::targets::{TargetId, TargetRegistry};
use super::theme::{ThemeResolver, ThemeTokenOverride};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

pub struct ShellController {
    title: String,
    registry: TargetRegistry,
    log: OperationLogSink,
    panel: PanelVisibilityController,
    bridge: OperationPipelineBridge,
    theme: ThemeResolver,
}

impl ShellController {
    /// Build with the placeholder pipeline configured by `config`
    pub fn from_config(config: &ShellConfig) -> Self {
        let pipeline = PlaceholderPipeline::new(Duration::from_millis(config.placeholder_delay_ms));
        Self::with_pipeline(config, Arc::new(pipeline))
    }

    pub fn with_pipeline(config: &ShellConfig, pipeline: Arc<dyn OperationPipeline>) -> Self {
        let mut log = OperationLogSink::new();
        log.append(format!("Welcome to {}", config.window_title));

        let registry = match TargetRegistry::from_config(&config.targets) {
            Ok(registry) => registry,
            Err(e) => {
                warn!("Invalid target list, starting without targets: {}", e);
                log.append(format!("Target list ignored: {}", e));
                TargetRegistry::default()
            }
        };

        let overrides = ThemeTokenOverride::from_hex_map(&config.colors);

        info!(
            "Shell controller ready: {} targets, {} color overrides",
            registry.len(),
            overrides.len()
        );

        Self {
            title: config.window_title.clone(),
            registry,
            log,
            panel: PanelVisibilityController::new(config.nominal_size, config.collapsed_size),
            bridge: OperationPipelineBridge::new(pipeline),
            theme: ThemeResolver::new(overrides),
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn registry(&self) -> &TargetRegistry {
        &self.registry
    }

    pub fn log(&self) -> &OperationLogSink {
        &self.log
    }

    pub fn log_mut(&mut self) -> &mut OperationLogSink {
        &mut self.log
    }

    pub fn panel(&self) -> &PanelVisibilityController {
        &self.panel
    }

    pub fn theme(&self) -> &ThemeResolver {
        &self.theme
    }

    pub fn is_running(&self) -> bool {
        self.bridge.is_running()
    }

    pub fn set_repaint_context(&mut self, ctx: egui::Context) {
        self.bridge.set_repaint_context(ctx);
    }

    /// Apply startup geometry
    pub fn start(&self, surface: &mut dyn WindowSurface) {
        self.panel.apply_initial(surface);
    }

    /// Tile click handler
    pub fn select(&mut self, id: &TargetId) -> Result<(), ShellError> {
        self.registry.select(id).inspect_err(|e| {
            self.log.append(format!("Selection rejected: {}", e));
        })
    }

    /// Trigger button handler
    pub fn trigger(&mut self) -> Result<(), ShellError> {
        let active = self.registry.active_target().map(|entry| entry.id.clone());
        self.bridge.invoke(active.as_ref(), &mut self.log)
    }

    pub fn toggle_panel(&mut self, surface: &mut dyn WindowSurface) -> PanelVisibilityState {
        self.panel.toggle(surface)
    }

    /// Per-frame pump: moves finished work from the bridge into the log
    pub fn pump(&mut self) -> Option<OperationOutcome> {
        self.bridge.poll(&mut self.log)
    }

    /// Release the in-flight operation, if any, before the window closes
    pub fn shutdown(&mut self) {
        if self.bridge.is_running() {
            info!("Shutting down with an operation in flight");
            self.bridge.cancel();
        }
    }
}
