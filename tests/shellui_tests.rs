#[cfg(test)]
mod tests {
    use opshell::app::config::ShellConfig;
    use opshell::app::panel::PanelVisibilityState;
    use opshell::app::shellui::app::{ShellAction, ShellApp, ShellPreferences};
    use opshell::app::targets::TargetId;
    use opshell::app::theme::ThemeChoice;

    #[test]
    fn test_shellapp_default() {
        let app = ShellApp::default();

        assert_eq!(app.preferences.theme, ThemeChoice::Mocha);
        assert_eq!(app.controller.registry().len(), 3);
        assert!(app.controller.registry().active_target().is_none());
        assert_eq!(app.controller.panel().state(), PanelVisibilityState::Expanded);
        assert!(!app.controller.is_running());
    }

    #[test]
    fn test_saved_preferences_win_over_config() {
        let config = ShellConfig {
            theme: ThemeChoice::Latte,
            ..ShellConfig::default()
        };

        let fresh = ShellApp::from_config(&config, None);
        assert_eq!(fresh.preferences.theme, ThemeChoice::Latte);

        let restored = ShellApp::from_config(
            &config,
            Some(ShellPreferences {
                theme: ThemeChoice::Frappe,
            }),
        );
        assert_eq!(restored.preferences.theme, ThemeChoice::Frappe);
    }

    #[test]
    fn test_preferences_serialization() {
        let prefs = ShellPreferences {
            theme: ThemeChoice::Macchiato,
        };
        let serialized = serde_json::to_string(&prefs).unwrap();
        let deserialized: ShellPreferences = serde_json::from_str(&serialized).unwrap();
        assert_eq!(deserialized, prefs);

        // Unknown or missing fields fall back to defaults
        let empty: ShellPreferences = serde_json::from_str("{}").unwrap();
        assert_eq!(empty, ShellPreferences::default());
    }

    #[test]
    fn test_actions_drive_controller() {
        let ctx = egui::Context::default();
        let mut app = ShellApp::default();

        app.apply_action(&ctx, ShellAction::Select(TargetId::new("secondary")));
        assert_eq!(
            app.controller.registry().active_target().map(|e| e.label.as_str()),
            Some("Secondary")
        );

        app.apply_action(&ctx, ShellAction::TogglePanel);
        assert_eq!(app.controller.panel().state(), PanelVisibilityState::Collapsed);
        app.apply_action(&ctx, ShellAction::TogglePanel);
        assert_eq!(app.controller.panel().state(), PanelVisibilityState::Expanded);

        app.apply_action(&ctx, ShellAction::SetTheme(ThemeChoice::Latte));
        assert_eq!(app.preferences.theme, ThemeChoice::Latte);
    }

    #[test]
    fn test_unknown_select_action_is_logged_not_fatal() {
        let ctx = egui::Context::default();
        let mut app = ShellApp::default();
        let before = app.controller.log().len();

        app.apply_action(&ctx, ShellAction::Select(TargetId::new("missing")));

        assert!(app.controller.registry().active_target().is_none());
        assert_eq!(app.controller.log().len(), before + 1);
    }

    #[test]
    fn test_trigger_action_without_selection() {
        let ctx = egui::Context::default();
        let mut app = ShellApp::default();
        let before = app.controller.log().len();

        app.apply_action(&ctx, ShellAction::Trigger);

        assert!(!app.controller.is_running());
        assert_eq!(app.controller.log().len(), before + 1);
        assert_eq!(
            app.controller.log().latest().unwrap().text,
            "Injection failed: no target selected"
        );
    }
}
