//! Target icon tiles
//!
//! Each tile shows the target's icon with a small indicator underneath. The
//! indicator color is derived from `is_active` of every entry in the same pass,
//! so a finished selection is never drawn with zero or two active indicators.

use crate::app::assets::IconCache;
use crate::app::targets::{TargetId, TargetRegistry};
use crate::app::theme::{ThemeChoice, ThemeResolver, ThemeToken};
use eframe::egui;

pub const TILE_SIZE: f32 = 64.0;
const ICON_SIZE: f32 = 48.0;
const INDICATOR_SIZE: f32 = 8.0;
const COLUMNS: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct TileColors {
    pub fill: egui::Color32,
    pub hover_stroke: Option<egui::Color32>,
    pub indicator: egui::Color32,
}

pub(crate) fn tile_colors(
    theme: &ThemeResolver,
    variant: ThemeChoice,
    is_active: bool,
    hovered: bool,
) -> TileColors {
    let indicator = if is_active {
        ThemeToken::AccentActive
    } else {
        ThemeToken::AccentInactive
    };
    TileColors {
        fill: theme.resolve(ThemeToken::ControlSurface, variant),
        hover_stroke: hovered.then(|| theme.resolve(ThemeToken::AccentInactive, variant)),
        indicator: theme.resolve(indicator, variant),
    }
}

/// Draw all tiles; returns the id of a clicked tile
pub fn show_target_grid(
    ui: &mut egui::Ui,
    registry: &TargetRegistry,
    icons: &mut IconCache,
    theme: &ThemeResolver,
    variant: ThemeChoice,
) -> Option<TargetId> {
    let mut clicked = None;

    egui::Grid::new("target_grid")
        .num_columns(COLUMNS)
        .spacing([6.0, 6.0])
        .show(ui, |ui| {
            for (index, entry) in registry.list().iter().enumerate() {
                let icon = icons.resolve(ui.ctx(), &entry.icon_ref);

                let response = ui
                    .vertical_centered(|ui| {
                        let (rect, response) = ui.allocate_exact_size(
                            egui::vec2(TILE_SIZE, TILE_SIZE),
                            egui::Sense::click(),
                        );

                        let colors =
                            tile_colors(theme, variant, entry.is_active, response.hovered());
                        let painter = ui.painter();
                        painter.rect_filled(rect, egui::CornerRadius::same(12), colors.fill);
                        if let Some(stroke) = colors.hover_stroke {
                            painter.rect_stroke(
                                rect,
                                egui::CornerRadius::same(12),
                                egui::Stroke::new(1.0, stroke),
                                egui::StrokeKind::Inside,
                            );
                        }

                        let icon_rect = egui::Rect::from_center_size(
                            rect.center(),
                            egui::vec2(ICON_SIZE, ICON_SIZE),
                        );
                        painter.image(
                            icon.texture().id(),
                            icon_rect,
                            egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
                            egui::Color32::WHITE,
                        );

                        let (indicator_rect, _) = ui.allocate_exact_size(
                            egui::vec2(INDICATOR_SIZE, INDICATOR_SIZE),
                            egui::Sense::hover(),
                        );
                        ui.painter().rect_filled(
                            indicator_rect,
                            egui::CornerRadius::same(4),
                            colors.indicator,
                        );

                        response
                    })
                    .inner;

                let response = if icon.is_missing() {
                    response.on_hover_text(format!("{} (icon missing)", entry.label))
                } else {
                    response.on_hover_text(entry.label.as_str())
                };

                if response.clicked() {
                    clicked = Some(entry.id.clone());
                }

                if (index + 1) % COLUMNS == 0 {
                    ui.end_row();
                }
            }
        });

    clicked
}
