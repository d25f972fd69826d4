//! Console Panel Visibility
//!
//! Toggles the console side panel and the native window geometry together.
//!
//! ## Fixed Geometry
//!
//! The window is fixed-size at all times except for the instant a toggle applies
//! a new size: the surface is made resizable, resized, and fixed again. Both
//! target sizes are stored when the controller is built and reapplied verbatim,
//! so a collapse/expand round trip lands on exactly the same geometry no matter
//! what the window size was in between.

use serde::{Deserialize, Serialize};
use tracing::debug;

/// Window size used when the console panel is shown
pub const NOMINAL_WINDOW_SIZE: WindowSize = WindowSize::new(800.0, 460.0);

/// Window size used when only the target column is shown
pub const COLLAPSED_WINDOW_SIZE: WindowSize = WindowSize::new(250.0, 460.0);

/// Inner window size in logical points
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WindowSize {
    pub width: f32,
    pub height: f32,
}

impl WindowSize {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Zero, negative and non-finite sizes are never applied to the window
    pub fn is_valid(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }
}

impl From<WindowSize> for egui::Vec2 {
    fn from(size: WindowSize) -> Self {
        egui::vec2(size.width, size.height)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PanelVisibilityState {
    #[default]
    Expanded,
    Collapsed,
}

impl PanelVisibilityState {
    pub fn toggled(self) -> Self {
        match self {
            PanelVisibilityState::Expanded => PanelVisibilityState::Collapsed,
            PanelVisibilityState::Collapsed => PanelVisibilityState::Expanded,
        }
    }
}

/// Platform primitives the panel controller drives
pub trait WindowSurface {
    fn set_fixed_size(&mut self, fixed: bool);
    fn resize(&mut self, size: WindowSize);
    fn show_panel(&mut self);
    fn hide_panel(&mut self);
}

#[derive(Debug, Clone)]
pub struct PanelVisibilityController {
    state: PanelVisibilityState,
    nominal_size: WindowSize,
    collapsed_size: WindowSize,
}

impl Default for PanelVisibilityController {
    fn default() -> Self {
        Self::new(NOMINAL_WINDOW_SIZE, COLLAPSED_WINDOW_SIZE)
    }
}

impl PanelVisibilityController {
    /// Invalid sizes fall back to the built-in constants.
    pub fn new(nominal_size: WindowSize, collapsed_size: WindowSize) -> Self {
        let nominal_size = if nominal_size.is_valid() {
            nominal_size
        } else {
            tracing::warn!("Ignoring invalid nominal window size {:?}", nominal_size);
            NOMINAL_WINDOW_SIZE
        };
        let collapsed_size = if collapsed_size.is_valid() {
            collapsed_size
        } else {
            tracing::warn!("Ignoring invalid collapsed window size {:?}", collapsed_size);
            COLLAPSED_WINDOW_SIZE
        };

        Self {
            state: PanelVisibilityState::Expanded,
            nominal_size,
            collapsed_size,
        }
    }

    pub fn state(&self) -> PanelVisibilityState {
        self.state
    }

    pub fn is_expanded(&self) -> bool {
        self.state == PanelVisibilityState::Expanded
    }

    /// Size stored for the current state
    pub fn current_size(&self) -> WindowSize {
        self.size_for(self.state)
    }

    pub fn size_for(&self, state: PanelVisibilityState) -> WindowSize {
        match state {
            PanelVisibilityState::Expanded => self.nominal_size,
            PanelVisibilityState::Collapsed => self.collapsed_size,
        }
    }

    /// Put the surface into the geometry of the current state
    pub fn apply_initial(&self, surface: &mut dyn WindowSurface) {
        match self.state {
            PanelVisibilityState::Expanded => surface.show_panel(),
            PanelVisibilityState::Collapsed => surface.hide_panel(),
        }
        self.apply_geometry(surface);
    }

    pub fn toggle(&mut self, surface: &mut dyn WindowSurface) -> PanelVisibilityState {
        self.state = self.state.toggled();
        debug!("Console panel toggled to {:?}", self.state);

        match self.state {
            PanelVisibilityState::Collapsed => surface.hide_panel(),
            PanelVisibilityState::Expanded => surface.show_panel(),
        }
        self.apply_geometry(surface);

        self.state
    }

    fn apply_geometry(&self, surface: &mut dyn WindowSurface) {
        surface.set_fixed_size(false);
        surface.resize(self.current_size());
        surface.set_fixed_size(true);
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::{WindowSize, WindowSurface};

    #[derive(Debug, Clone, PartialEq)]
    pub enum SurfaceCall {
        Fixed(bool),
        Resize(WindowSize),
        Show,
        Hide,
    }

    /// Surface that records every primitive it receives
    #[derive(Debug, Default)]
    pub struct RecordingSurface {
        pub calls: Vec<SurfaceCall>,
        pub size: Option<WindowSize>,
        pub fixed: bool,
        pub panel_visible: bool,
    }

    impl WindowSurface for RecordingSurface {
        fn set_fixed_size(&mut self, fixed: bool) {
            self.fixed = fixed;
            self.calls.push(SurfaceCall::Fixed(fixed));
        }

        fn resize(&mut self, size: WindowSize) {
            self.size = Some(size);
            self.calls.push(SurfaceCall::Resize(size));
        }

        fn show_panel(&mut self) {
            self.panel_visible = true;
            self.calls.push(SurfaceCall::Show);
        }

        fn hide_panel(&mut self) {
            self.panel_visible = false;
            self.calls.push(SurfaceCall::Hide);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::test_support::{RecordingSurface, SurfaceCall};
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_initial_state_expanded() {
        let controller = PanelVisibilityController::default();
        assert_eq!(controller.state(), PanelVisibilityState::Expanded);
        assert_eq!(controller.current_size(), NOMINAL_WINDOW_SIZE);
    }

    #[test]
    fn test_collapse_sequence() {
        let mut controller = PanelVisibilityController::default();
        let mut surface = RecordingSurface::default();

        let state = controller.toggle(&mut surface);

        assert_eq!(state, PanelVisibilityState::Collapsed);
        assert_eq!(
            surface.calls,
            vec![
                SurfaceCall::Hide,
                SurfaceCall::Fixed(false),
                SurfaceCall::Resize(COLLAPSED_WINDOW_SIZE),
                SurfaceCall::Fixed(true),
            ]
        );
        assert!(surface.fixed);
        assert!(!surface.panel_visible);
    }

    #[test]
    fn test_double_toggle_restores_state_and_geometry() {
        let mut controller = PanelVisibilityController::default();
        let mut surface = RecordingSurface::default();
        controller.apply_initial(&mut surface);
        let initial_size = surface.size;

        controller.toggle(&mut surface);
        // A stray manual resize in between must not leak into the restore
        surface.size = Some(WindowSize::new(1234.0, 567.0));
        controller.toggle(&mut surface);

        assert_eq!(controller.state(), PanelVisibilityState::Expanded);
        assert_eq!(surface.size, initial_size);
        assert!(surface.panel_visible);
        assert!(surface.fixed);
    }

    #[test]
    fn test_zero_size_never_applied() {
        let mut controller =
            PanelVisibilityController::new(WindowSize::new(0.0, 0.0), WindowSize::new(-1.0, 10.0));
        let mut surface = RecordingSurface::default();

        controller.toggle(&mut surface);
        controller.toggle(&mut surface);

        for call in &surface.calls {
            if let SurfaceCall::Resize(size) = call {
                assert!(size.is_valid());
            }
        }
        assert_eq!(controller.size_for(PanelVisibilityState::Collapsed), COLLAPSED_WINDOW_SIZE);
    }

    #[test]
    fn test_non_finite_size_never_applied() {
        let mut controller = PanelVisibilityController::new(
            WindowSize::new(f32::NAN, 460.0),
            WindowSize::new(f32::INFINITY, 460.0),
        );
        let mut surface = RecordingSurface::default();

        controller.toggle(&mut surface);
        controller.toggle(&mut surface);

        let applied: Vec<WindowSize> = surface
            .calls
            .iter()
            .filter_map(|call| match call {
                SurfaceCall::Resize(size) => Some(*size),
                _ => None,
            })
            .collect();
        assert_eq!(applied, vec![COLLAPSED_WINDOW_SIZE, NOMINAL_WINDOW_SIZE]);
    }

    #[test]
    fn test_infinite_size_from_config_falls_back() {
        let config: crate::app::config::ShellConfig =
            toml::from_str("[collapsed_size]\nwidth = inf\nheight = 460.0\n").unwrap();
        assert!(config.collapsed_size.width.is_infinite());

        let mut controller =
            PanelVisibilityController::new(config.nominal_size, config.collapsed_size);
        let mut surface = RecordingSurface::default();
        controller.toggle(&mut surface);

        assert_eq!(surface.size, Some(COLLAPSED_WINDOW_SIZE));
    }

    #[test]
    fn test_toggled_is_involution() {
        for state in [PanelVisibilityState::Expanded, PanelVisibilityState::Collapsed] {
            assert_eq!(state.toggled().toggled(), state);
        }
    }
}
