//! Native window geometry driven through egui viewport commands

use crate::app::panel::{WindowSize, WindowSurface};
use eframe::egui;

/// [`WindowSurface`] backed by the root viewport of an egui context
pub struct ViewportSurface<'a> {
    ctx: &'a egui::Context,
}

impl<'a> ViewportSurface<'a> {
    pub fn new(ctx: &'a egui::Context) -> Self {
        Self { ctx }
    }
}

impl WindowSurface for ViewportSurface<'_> {
    fn set_fixed_size(&mut self, fixed: bool) {
        self.ctx
            .send_viewport_cmd(egui::ViewportCommand::Resizable(!fixed));
    }

    fn resize(&mut self, size: WindowSize) {
        trace_debug!("Resizing window to {}x{}", size.width, size.height);
        self.ctx
            .send_viewport_cmd(egui::ViewportCommand::InnerSize(size.into()));
    }

    // The console panel is laid out from the controller state each frame, so
    // showing or hiding it only needs a fresh frame.
    fn show_panel(&mut self) {
        self.ctx.request_repaint();
    }

    fn hide_panel(&mut self) {
        self.ctx.request_repaint();
    }
}
