//! Camera and viewport control.
//!
//! The camera is a fixed pull-back from the origin followed by a screen-space
//! pan, a uniform zoom and two rotations. Pointer drags and wheel steps are
//! turned into updates of that state; the frame composer reads it once per
//! frame through [`CameraController::view_matrix`].

use calolite_core::{CaloError, Result};
use glam::{Mat4, Vec2, Vec3};

/// Pointer button held during a drag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    /// Rotates the scene.
    Left,
    /// Pans the scene.
    Middle,
    /// Not bound to any camera action.
    Right,
}

/// Fixed camera parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct CameraSettings {
    /// Distance the scene is pushed away from the eye.
    pub pull_back: f32,
    /// Pan distance per pixel of drag at zoom 1.0.
    pub pan_sensitivity: f32,
    /// Zoom change per full turn (360 units) of raw wheel delta.
    pub wheel_zoom_factor: f32,
    /// Smallest allowed zoom.
    pub min_zoom: f32,
    /// Largest allowed zoom.
    pub max_zoom: f32,
    /// Vertical field of view in degrees.
    pub fov_degrees: f32,
    /// Near clipping plane.
    pub near: f32,
    /// Far clipping plane.
    pub far: f32,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            pull_back: 15.0,
            pan_sensitivity: 0.03,
            wheel_zoom_factor: 0.1,
            min_zoom: 0.1,
            max_zoom: 10.0,
            fov_degrees: 45.0,
            near: 0.1,
            far: 100.0,
        }
    }
}

impl CameraSettings {
    /// Checks that every parameter is finite and the ranges are ordered:
    /// `0 < min_zoom <= max_zoom`, `0 < near < far`, `0 < fov_degrees < 180`.
    pub fn validate(&self) -> Result<()> {
        let values = [
            self.pull_back,
            self.pan_sensitivity,
            self.wheel_zoom_factor,
            self.min_zoom,
            self.max_zoom,
            self.fov_degrees,
            self.near,
            self.far,
        ];
        if values.iter().any(|v| !v.is_finite()) {
            return Err(CaloError::InvalidConfig(
                "camera settings must be finite".to_string(),
            ));
        }
        if !(self.min_zoom > 0.0 && self.min_zoom <= self.max_zoom) {
            return Err(CaloError::InvalidConfig(format!(
                "zoom range [{}, {}] is empty or not positive",
                self.min_zoom, self.max_zoom
            )));
        }
        if !(self.near > 0.0 && self.near < self.far) {
            return Err(CaloError::InvalidConfig(format!(
                "clip planes near {} / far {} are out of order",
                self.near, self.far
            )));
        }
        if !(self.fov_degrees > 0.0 && self.fov_degrees < 180.0) {
            return Err(CaloError::InvalidConfig(format!(
                "field of view {} is outside (0, 180) degrees",
                self.fov_degrees
            )));
        }
        Ok(())
    }

    /// Returns the perspective projection for a viewport aspect ratio.
    #[must_use]
    pub fn projection_matrix(&self, aspect_ratio: f32) -> Mat4 {
        Mat4::perspective_rh_gl(
            self.fov_degrees.to_radians(),
            aspect_ratio,
            self.near,
            self.far,
        )
    }
}

/// Interactive camera state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraState {
    /// Pitch accumulator in degrees (rotation about X).
    pub rotation_x: f32,
    /// Yaw accumulator in degrees (rotation about Y).
    pub rotation_y: f32,
    /// Uniform scale.
    pub zoom: f32,
    /// Horizontal pan offset.
    pub pan_x: f32,
    /// Vertical pan offset.
    pub pan_y: f32,
    /// Pull-back distance.
    pub pull_back: f32,
}

impl CameraState {
    /// The state a camera starts in and returns to on reset.
    #[must_use]
    pub fn initial(settings: &CameraSettings) -> Self {
        Self {
            rotation_x: 0.0,
            rotation_y: 0.0,
            zoom: 1.0,
            pan_x: 0.0,
            pan_y: 0.0,
            pull_back: settings.pull_back,
        }
    }

    /// Returns the model-view matrix.
    ///
    /// Applied to geometry in this order: rotate about Y, rotate about X,
    /// scale, pan, pull back. Panning therefore happens in pulled-back camera
    /// space and stays screen-aligned whatever the rotation.
    #[must_use]
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::from_translation(Vec3::new(0.0, 0.0, -self.pull_back))
            * Mat4::from_translation(Vec3::new(self.pan_x, self.pan_y, 0.0))
            * Mat4::from_scale(Vec3::splat(self.zoom))
            * Mat4::from_rotation_x(self.rotation_x.to_radians())
            * Mat4::from_rotation_y(self.rotation_y.to_radians())
    }
}

/// Translates pointer and wheel input into [`CameraState`] updates.
#[derive(Debug, Clone)]
pub struct CameraController {
    settings: CameraSettings,
    state: CameraState,
    anchor: Option<Vec2>,
}

impl CameraController {
    /// Creates a controller in the initial state.
    ///
    /// Fails if the settings do not pass [`CameraSettings::validate`].
    pub fn new(settings: CameraSettings) -> Result<Self> {
        settings.validate()?;
        Ok(Self::with_valid_settings(settings))
    }

    fn with_valid_settings(settings: CameraSettings) -> Self {
        let state = CameraState::initial(&settings);
        Self {
            settings,
            state,
            anchor: None,
        }
    }

    /// Returns the current state.
    #[must_use]
    pub fn state(&self) -> &CameraState {
        &self.state
    }

    /// Returns the fixed settings.
    #[must_use]
    pub fn settings(&self) -> &CameraSettings {
        &self.settings
    }

    /// Returns the last recorded pointer position.
    #[must_use]
    pub fn anchor(&self) -> Option<Vec2> {
        self.anchor
    }

    /// Records the pointer position a drag starts from.
    pub fn pointer_down(&mut self, position: Vec2) {
        self.anchor = Some(position);
    }

    /// Handles a pointer move at `position`.
    ///
    /// With a button held, the delta from the previous position drives a
    /// rotation or a pan. The position always becomes the new anchor. A move
    /// without a recorded anchor only records one.
    ///
    /// Returns whether the camera state changed.
    pub fn pointer_move(&mut self, position: Vec2, button: Option<PointerButton>) -> bool {
        let previous = self.anchor.replace(position);
        match (previous, button) {
            (Some(previous), Some(button)) => self.drag(position - previous, button),
            _ => false,
        }
    }

    /// Applies a drag delta in screen pixels.
    ///
    /// Left drags rotate 1:1 in degrees: horizontal motion is yaw, vertical
    /// motion is pitch. Middle drags pan by `pan_sensitivity / zoom` per pixel,
    /// with screen Y pointing down and view Y pointing up.
    ///
    /// Returns whether the camera state changed.
    pub fn drag(&mut self, delta: Vec2, button: PointerButton) -> bool {
        match button {
            PointerButton::Left => {
                self.state.rotation_x += delta.y;
                self.state.rotation_y += delta.x;
                true
            }
            PointerButton::Middle => {
                let sensitivity = self.settings.pan_sensitivity / self.state.zoom;
                self.state.pan_x += delta.x * sensitivity;
                self.state.pan_y -= delta.y * sensitivity;
                true
            }
            PointerButton::Right => false,
        }
    }

    /// Applies a raw wheel angle delta (120 per notch on most mice).
    ///
    /// Non-finite deltas are ignored.
    pub fn wheel(&mut self, delta: f32) {
        if !delta.is_finite() {
            log::warn!("ignoring non-finite wheel delta {delta}");
            return;
        }
        let step = delta / 360.0 * self.settings.wheel_zoom_factor;
        self.state.zoom =
            (self.state.zoom + step).clamp(self.settings.min_zoom, self.settings.max_zoom);
    }

    /// Restores the initial state and forgets the pointer anchor.
    pub fn reset(&mut self) {
        self.state = CameraState::initial(&self.settings);
        self.anchor = None;
    }

    /// Returns the model-view matrix for the current state.
    #[must_use]
    pub fn view_matrix(&self) -> Mat4 {
        self.state.view_matrix()
    }
}

impl Default for CameraController {
    fn default() -> Self {
        Self::with_valid_settings(CameraSettings::default())
    }
}
