#![warn(clippy::all, rust_2018_idioms)]

use crate::app::operation_log::OperationLogSink;
use crate::app::theme::{ThemeChoice, ThemeResolver, ThemeToken};
use eframe::egui;

/// Frame fill and text color of the console
pub(crate) fn console_colors(
    theme: &ThemeResolver,
    variant: ThemeChoice,
) -> (egui::Color32, egui::Color32) {
    (
        theme.resolve(ThemeToken::Background, variant),
        theme.resolve(ThemeToken::Foreground, variant),
    )
}

/// Render the full console history, following the newest record after each append
pub fn show_log_console(
    ui: &mut egui::Ui,
    log: &mut OperationLogSink,
    theme: &ThemeResolver,
    variant: ThemeChoice,
) {
    let scroll_to_latest = log.take_scroll_request();
    let (fill, text_color) = console_colors(theme, variant);

    egui::Frame::new()
        .fill(fill)
        .corner_radius(egui::CornerRadius::same(8))
        .inner_margin(egui::Margin::same(8))
        .show(ui, |ui| {
            egui::ScrollArea::vertical()
                .id_salt("operation_log")
                .auto_shrink([false, false])
                .stick_to_bottom(true)
                .show(ui, |ui| {
                    for record in log.all() {
                        ui.label(
                            egui::RichText::new(&record.text)
                                .monospace()
                                .color(text_color),
                        );
                    }

                    if scroll_to_latest {
                        ui.scroll_to_cursor(Some(egui::Align::BOTTOM));
                    }
                });
        });
}
