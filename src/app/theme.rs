//! Theme token resolution
//!
//! Rendering code never hard-codes colors. It asks the [`ThemeResolver`] for an
//! abstract [`ThemeToken`] under the current catppuccin flavor. Overrides win;
//! anything not overridden comes from the flavor's palette. Fonts, icons and
//! spacing are left exactly as the base theme sets them.

use egui::Color32;
use std::collections::BTreeMap;
use tracing::warn;

#[derive(Debug, serde::Deserialize, serde::Serialize, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThemeChoice {
    Latte,
    Frappe,
    Macchiato,
    #[default]
    Mocha,
}

impl ThemeChoice {
    pub const ALL: [ThemeChoice; 4] = [
        ThemeChoice::Latte,
        ThemeChoice::Frappe,
        ThemeChoice::Macchiato,
        ThemeChoice::Mocha,
    ];

    pub fn palette(self) -> catppuccin_egui::Theme {
        match self {
            ThemeChoice::Latte => catppuccin_egui::LATTE,
            ThemeChoice::Frappe => catppuccin_egui::FRAPPE,
            ThemeChoice::Macchiato => catppuccin_egui::MACCHIATO,
            ThemeChoice::Mocha => catppuccin_egui::MOCHA,
        }
    }
}

impl std::fmt::Display for ThemeChoice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ThemeChoice::Latte => write!(f, "Latte"),
            ThemeChoice::Frappe => write!(f, "Frappe"),
            ThemeChoice::Macchiato => write!(f, "Macchiato"),
            ThemeChoice::Mocha => write!(f, "Mocha"),
        }
    }
}

/// Abstract color roles used by the shell
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ThemeToken {
    Background,
    Foreground,
    ControlSurface,
    AccentActive,
    AccentInactive,
}

impl ThemeToken {
    pub const ALL: [ThemeToken; 5] = [
        ThemeToken::Background,
        ThemeToken::Foreground,
        ThemeToken::ControlSurface,
        ThemeToken::AccentActive,
        ThemeToken::AccentInactive,
    ];

    /// Look up a token by its configuration key
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|token| token.name().eq_ignore_ascii_case(name))
    }

    pub fn name(self) -> &'static str {
        match self {
            ThemeToken::Background => "Background",
            ThemeToken::Foreground => "Foreground",
            ThemeToken::ControlSurface => "ControlSurface",
            ThemeToken::AccentActive => "AccentActive",
            ThemeToken::AccentInactive => "AccentInactive",
        }
    }
}

/// Dark console look of the shell, written into the default configuration
pub const DEFAULT_COLOR_OVERRIDES: [(ThemeToken, &str); 5] = [
    (ThemeToken::Background, "#191919"),
    (ThemeToken::Foreground, "#ffffff"),
    (ThemeToken::ControlSurface, "#00000000"),
    (ThemeToken::AccentActive, "#00ff00"),
    (ThemeToken::AccentInactive, "#505050"),
];

/// Immutable token → color overrides
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ThemeTokenOverride {
    colors: BTreeMap<ThemeToken, Color32>,
}

impl ThemeTokenOverride {
    pub fn from_pairs(pairs: impl IntoIterator<Item = (ThemeToken, Color32)>) -> Self {
        Self {
            colors: pairs.into_iter().collect(),
        }
    }

    /// Parse `#rrggbb` / `#rrggbbaa` values keyed by token name; bad entries are skipped.
    pub fn from_hex_map(map: &BTreeMap<String, String>) -> Self {
        Self::from_pairs(map.iter().filter_map(|(name, hex)| {
            let Some(token) = ThemeToken::from_name(name) else {
                warn!("Ignoring color override for unknown token {:?}", name);
                return None;
            };
            match Color32::from_hex(hex) {
                Ok(color) => Some((token, color)),
                Err(e) => {
                    warn!("Ignoring color override {} = {:?}: {:?}", name, hex, e);
                    None
                }
            }
        }))
    }

    pub fn get(&self, token: ThemeToken) -> Option<Color32> {
        self.colors.get(&token).copied()
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }
}

#[derive(Debug, Clone, Default)]
pub struct ThemeResolver {
    overrides: ThemeTokenOverride,
}

impl ThemeResolver {
    pub fn new(overrides: ThemeTokenOverride) -> Self {
        Self { overrides }
    }

    pub fn resolve(&self, token: ThemeToken, variant: ThemeChoice) -> Color32 {
        self.overrides
            .get(token)
            .unwrap_or_else(|| Self::base_color(token, variant))
    }

    /// Palette color of `token` in the un-overridden flavor
    pub fn base_color(token: ThemeToken, variant: ThemeChoice) -> Color32 {
        let palette = variant.palette();
        match token {
            ThemeToken::Background => palette.base,
            ThemeToken::Foreground => palette.text,
            ThemeToken::ControlSurface => palette.surface0,
            ThemeToken::AccentActive => palette.green,
            ThemeToken::AccentInactive => palette.overlay0,
        }
    }

    /// Install the base flavor, then write resolved colors into the visuals
    pub fn apply(&self, ctx: &egui::Context, variant: ThemeChoice) {
        catppuccin_egui::set_theme(ctx, variant.palette());

        let background = self.resolve(ThemeToken::Background, variant);
        let foreground = self.resolve(ThemeToken::Foreground, variant);
        let control = self.resolve(ThemeToken::ControlSurface, variant);

        let mut style = (*ctx.style()).clone();
        let visuals = &mut style.visuals;
        visuals.panel_fill = background;
        visuals.window_fill = background;
        visuals.override_text_color = Some(foreground);
        visuals.widgets.inactive.bg_fill = control;
        visuals.widgets.inactive.weak_bg_fill = control;
        visuals.window_corner_radius = egui::CornerRadius::same(2);
        ctx.set_style(style);
    }
}
