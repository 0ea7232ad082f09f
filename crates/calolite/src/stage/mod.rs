//! The stage: one viewer instance and its UI call surface.
//!
//! A stage owns the registry of drawables, the scene, the camera and the
//! visibility state. UI callbacks mutate that state and set the redraw flag;
//! the host draws a frame whenever [`Stage::take_redraw_request`] says so.

mod input;

use std::collections::HashMap;
use std::sync::Arc;

use calolite_core::{
    CaloError, DetectorConfig, DrawableId, EventId, EventSource, FrameStats, GeometrySource,
    Registry, Result, Scene, Surface, TriState, Vec3, VisibilityCoordinator,
};
use calolite_render::{compose_frame, CameraController, CameraSettings};
use calolite_structures::{Axis, ChannelCloud, EventOverlay};

use crate::selection::EventSelection;

/// Name of the axis drawable.
pub const AXIS_NAME: &str = "axis";
/// Name of the event overlay drawable.
pub const OVERLAY_NAME: &str = "event";

/// A viewer instance.
pub struct Stage {
    config: Arc<DetectorConfig>,
    registry: Registry,
    scene: Scene,
    camera: CameraController,
    visibility: VisibilityCoordinator,
    axis: DrawableId,
    overlay: DrawableId,
    events: Box<dyn EventSource>,
    event_ids: Vec<EventId>,
    redraw_requested: bool,
}

impl Stage {
    /// Builds a stage with the default camera settings.
    ///
    /// Registers the axis, one point cloud per configured channel (in
    /// configuration order) and the event overlay, and shows them all. No
    /// event is selected.
    pub fn new(
        config: Arc<DetectorConfig>,
        geometry: &dyn GeometrySource,
        events: Box<dyn EventSource>,
    ) -> Result<Self> {
        Self::with_camera_settings(config, geometry, events, CameraSettings::default())
    }

    /// Builds a stage with custom camera settings.
    ///
    /// Fails if the configuration or the camera settings are invalid.
    pub fn with_camera_settings(
        config: Arc<DetectorConfig>,
        geometry: &dyn GeometrySource,
        events: Box<dyn EventSource>,
        camera: CameraSettings,
    ) -> Result<Self> {
        config.validate()?;
        let camera = CameraController::new(camera)?;

        let mut registry = Registry::new();
        let mut scene = Scene::new();

        let axis = registry.register(Box::new(Axis::new(AXIS_NAME)))?;
        scene.add(axis);

        let mut channels = HashMap::with_capacity(config.channels.len());
        for spec in &config.channels {
            let cells = finite_cells(&spec.name, geometry.cells(&spec.name)?);
            let id = registry.register(Box::new(ChannelCloud::from_spec(spec, cells)))?;
            scene.add(id);
            channels.insert(spec.name.clone(), id);
        }

        let overlay = EventOverlay::new(OVERLAY_NAME, config.cluster_palette.clone())?;
        let overlay = registry.register(Box::new(overlay))?;
        scene.add(overlay);

        let visibility = VisibilityCoordinator::new(Arc::clone(&config), axis, channels)?;

        let mut event_ids = events.event_ids();
        event_ids.sort_unstable();
        event_ids.dedup();

        log::info!(
            "stage ready: {} channel(s) in {} group(s), {} event(s)",
            config.channels.len(),
            config.groups.len(),
            event_ids.len()
        );

        Ok(Self {
            config,
            registry,
            scene,
            camera,
            visibility,
            axis,
            overlay,
            events,
            event_ids,
            redraw_requested: true,
        })
    }

    // ========================================================================
    // Toggles
    // ========================================================================

    /// Shows or hides the axis.
    pub fn on_axis_toggle(&mut self, visible: bool) {
        self.visibility.toggle_axis(&mut self.scene, visible);
        self.request_redraw();
    }

    /// Shows or hides one channel.
    ///
    /// Returns the new header value of the channel's group.
    pub fn on_channel_toggle(&mut self, channel: &str, visible: bool) -> Result<TriState> {
        let state = self
            .visibility
            .toggle_channel(&mut self.scene, channel, visible)?;
        self.request_redraw();
        Ok(state)
    }

    /// Shows or hides every channel of a group.
    pub fn on_group_toggle(&mut self, group: &str, visible: bool) -> Result<TriState> {
        let state = self
            .visibility
            .toggle_group(&mut self.scene, group, visible)?;
        self.request_redraw();
        Ok(state)
    }

    /// Handles a click on a group header.
    pub fn on_group_header_click(&mut self, group: &str) -> Result<TriState> {
        let state = self
            .visibility
            .click_group_header(&mut self.scene, group)?;
        self.request_redraw();
        Ok(state)
    }

    // ========================================================================
    // Events
    // ========================================================================

    /// Relays the event picker's selection to the overlay.
    ///
    /// An unknown event number is an error and leaves the current selection
    /// untouched.
    pub fn on_event_selected(&mut self, selection: EventSelection) -> Result<()> {
        let overlay = self
            .registry
            .get_as_mut::<EventOverlay>(self.overlay)
            .ok_or(CaloError::DrawableNotFound(self.overlay))?;

        match selection {
            EventSelection::None => {
                overlay.clear();
                log::info!("event selection cleared");
            }
            EventSelection::Event(id) => {
                if self.event_ids.binary_search(&id).is_err() {
                    return Err(CaloError::UnknownEvent(id));
                }
                overlay.select(self.events.as_ref(), id)?;
            }
        }
        self.request_redraw();
        Ok(())
    }

    /// Returns the selected event number.
    pub fn selected_event(&self) -> Option<EventId> {
        self.overlay().and_then(EventOverlay::selected_id)
    }

    /// Returns the event overlay.
    pub fn overlay(&self) -> Option<&EventOverlay> {
        self.registry.get_as::<EventOverlay>(self.overlay)
    }

    /// Returns every available event number, ascending.
    pub fn event_ids(&self) -> &[EventId] {
        &self.event_ids
    }

    // ========================================================================
    // Camera
    // ========================================================================

    /// Restores the initial camera.
    pub fn reset_camera(&mut self) {
        self.camera.reset();
        self.request_redraw();
    }

    /// Returns the camera controller.
    pub fn camera(&self) -> &CameraController {
        &self.camera
    }

    // ========================================================================
    // Queries
    // ========================================================================

    /// Returns the detector configuration.
    pub fn config(&self) -> &DetectorConfig {
        &self.config
    }

    /// Returns a group's header value, or `None` for an unknown group.
    pub fn group_state(&self, group: &str) -> Option<TriState> {
        self.visibility.group_state(group)
    }

    /// Returns every group's header value in configuration order.
    pub fn group_states(&self) -> Vec<(String, TriState)> {
        self.visibility.group_states()
    }

    /// Returns whether the axis is visible.
    pub fn is_axis_visible(&self) -> bool {
        self.visibility.is_axis_visible()
    }

    /// Returns a channel's visibility flag, or `None` for an unknown channel.
    pub fn is_channel_visible(&self, channel: &str) -> Option<bool> {
        self.visibility.is_channel_visible(channel)
    }

    /// Returns the scene.
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Returns the registry of drawables.
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Returns the handle of the axis drawable.
    pub fn axis_handle(&self) -> DrawableId {
        self.axis
    }

    /// Returns the handle of the event overlay drawable.
    pub fn overlay_handle(&self) -> DrawableId {
        self.overlay
    }

    /// Returns the handle of a channel's drawable.
    pub fn channel_handle(&self, channel: &str) -> Option<DrawableId> {
        self.visibility.channel_handle(channel)
    }

    // ========================================================================
    // Frames
    // ========================================================================

    /// Draws one frame into `surface`.
    pub fn render(&self, surface: &mut dyn Surface) -> FrameStats {
        compose_frame(&self.camera, &self.scene, &self.registry, surface)
    }

    /// Returns whether a redraw was requested since the last call, and
    /// clears the request.
    pub fn take_redraw_request(&mut self) -> bool {
        std::mem::take(&mut self.redraw_requested)
    }

    pub(crate) fn request_redraw(&mut self) {
        self.redraw_requested = true;
    }
}

fn finite_cells(channel: &str, cells: Vec<Vec3>) -> Vec<Vec3> {
    let total = cells.len();
    let finite: Vec<Vec3> = cells.into_iter().filter(|c| c.is_finite()).collect();
    if finite.len() < total {
        log::warn!(
            "channel {channel}: skipped {} cell(s) with non-finite coordinates",
            total - finite.len()
        );
    }
    finite
}
