//! Target column and console panel rendering

use super::{ShellAction, ShellApp};
use crate::app::shellui::log_console::show_log_console;
use crate::app::shellui::target_grid::{show_target_grid, TILE_SIZE};
use crate::app::theme::{ThemeChoice, ThemeResolver, ThemeToken};
use eframe::egui;

/// Width of the left column; three tiles plus spacing and margins
pub const TARGET_COLUMN_WIDTH: f32 = 3.0 * TILE_SIZE + 42.0;

/// Trigger button fill and outline
pub(crate) fn trigger_colors(
    theme: &ThemeResolver,
    variant: ThemeChoice,
) -> (egui::Color32, egui::Color32) {
    (
        theme.resolve(ThemeToken::ControlSurface, variant),
        theme.resolve(ThemeToken::Foreground, variant),
    )
}

impl ShellApp {
    pub(super) fn render(&mut self, ctx: &egui::Context) {
        let mut actions = Vec::new();

        if self.controller.panel().is_expanded() {
            egui::SidePanel::left("target_column")
                .exact_width(TARGET_COLUMN_WIDTH)
                .resizable(false)
                .show_separator_line(false)
                .show(ctx, |ui| self.render_target_column(ui, &mut actions));

            egui::CentralPanel::default().show(ctx, |ui| {
                let variant = self.preferences.theme;
                let theme = self.controller.theme().clone();
                show_log_console(ui, self.controller.log_mut(), &theme, variant);
            });
        } else {
            egui::CentralPanel::default()
                .show(ctx, |ui| self.render_target_column(ui, &mut actions));
        }

        for action in actions {
            self.push_action(action);
        }
    }

    fn render_target_column(&mut self, ui: &mut egui::Ui, actions: &mut Vec<ShellAction>) {
        ui.add_space(4.0);
        ui.label(egui::RichText::new(self.controller.title()).strong().size(16.0));
        ui.add_space(16.0);

        if let Some(id) = show_target_grid(
            ui,
            self.controller.registry(),
            &mut self.icons,
            self.controller.theme(),
            self.preferences.theme,
        ) {
            actions.push(ShellAction::Select(id));
        }

        ui.add_space(16.0);

        let label = if self.controller.is_running() {
            "RUNNING…"
        } else {
            "INJECT"
        };
        let (fill, stroke) = trigger_colors(self.controller.theme(), self.preferences.theme);
        let trigger = egui::Button::new(egui::RichText::new(label).strong())
            .fill(fill)
            .stroke(egui::Stroke::new(1.0, stroke));
        if ui
            .add_sized([ui.available_width(), 36.0], trigger)
            .clicked()
        {
            actions.push(ShellAction::Trigger);
        }

        ui.with_layout(egui::Layout::bottom_up(egui::Align::Max), |ui| {
            ui.horizontal(|ui| {
                let tooltip = if self.controller.panel().is_expanded() {
                    "Hide console"
                } else {
                    "Show console"
                };
                let icon = self.icons.resolve(ui.ctx(), "Terminal.png");
                let toggle = egui::Button::image(
                    egui::Image::new(icon.texture()).fit_to_exact_size(egui::vec2(24.0, 24.0)),
                );
                if ui.add(toggle).on_hover_text(tooltip).clicked() {
                    actions.push(ShellAction::TogglePanel);
                }

                let mut theme = self.preferences.theme;
                egui::ComboBox::from_id_salt("theme_choice")
                    .selected_text(theme.to_string())
                    .width(90.0)
                    .show_ui(ui, |ui| {
                        for choice in ThemeChoice::ALL {
                            ui.selectable_value(&mut theme, choice, choice.to_string());
                        }
                    });
                if theme != self.preferences.theme {
                    actions.push(ShellAction::SetTheme(theme));
                }
            });
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::theme::ThemeTokenOverride;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_trigger_colors_come_from_resolver() {
        let theme = ThemeResolver::new(ThemeTokenOverride::from_pairs([(
            ThemeToken::Foreground,
            egui::Color32::WHITE,
        )]));

        let (fill, stroke) = trigger_colors(&theme, ThemeChoice::Frappe);
        assert_eq!(fill, catppuccin_egui::FRAPPE.surface0);
        assert_eq!(stroke, egui::Color32::WHITE);
    }
}
