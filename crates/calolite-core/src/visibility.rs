//! Visibility state and the toggle coordinator.
//!
//! The coordinator owns the visible/hidden flag of the axis and of every
//! detector channel and keeps scene membership in step with those flags.
//! Group header values are cached reflections of member flags: they are
//! recomputed after every member change and can never be set directly.
//!
//! There are two write paths for a channel. [`VisibilityCoordinator::toggle_channel`]
//! is the user path: it writes the flag, updates the scene and then reflects
//! the new header value. The internal direct write used by group fan-out
//! performs the same flag and scene update without reflecting, so a group
//! toggle reflects its header exactly once at the end.

use std::collections::HashMap;
use std::sync::Arc;

use crate::config::DetectorConfig;
use crate::error::{CaloError, Result};
use crate::group::{DetectorGroup, TriState};
use crate::registry::DrawableId;
use crate::scene::Scene;

/// Visibility flags plus the cached header value of every group.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VisibilityState {
    axis: bool,
    channels: HashMap<String, bool>,
    groups: HashMap<String, TriState>,
}

impl VisibilityState {
    /// Returns whether the axis is visible.
    #[must_use]
    pub fn axis(&self) -> bool {
        self.axis
    }

    /// Returns a channel's flag, or `None` for an unknown channel.
    pub fn channel(&self, name: &str) -> Option<bool> {
        self.channels.get(name).copied()
    }

    /// Returns a group's cached header value, or `None` for an unknown group.
    pub fn group(&self, name: &str) -> Option<TriState> {
        self.groups.get(name).copied()
    }
}

/// Drives scene membership from axis, channel and group toggles.
pub struct VisibilityCoordinator {
    config: Arc<DetectorConfig>,
    axis: DrawableId,
    channels: HashMap<String, DrawableId>,
    state: VisibilityState,
}

impl VisibilityCoordinator {
    /// Creates a coordinator with everything visible.
    ///
    /// `channels` must hold a handle for every channel of the configuration
    /// and nothing else.
    pub fn new(
        config: Arc<DetectorConfig>,
        axis: DrawableId,
        channels: HashMap<String, DrawableId>,
    ) -> Result<Self> {
        if let Some(missing) = config
            .channel_names()
            .find(|name| !channels.contains_key(*name))
        {
            return Err(CaloError::UnknownChannel(missing.to_string()));
        }
        if let Some(extra) = channels.keys().find(|name| config.group_of(name).is_none()) {
            return Err(CaloError::UnknownChannel(extra.clone()));
        }

        let state = VisibilityState {
            axis: true,
            channels: config
                .channel_names()
                .map(|name| (name.to_string(), true))
                .collect(),
            groups: config
                .groups
                .iter()
                .map(|g| (g.name().to_string(), TriState::Checked))
                .collect(),
        };

        Ok(Self {
            config,
            axis,
            channels,
            state,
        })
    }

    /// Shows or hides the axis. No group is involved.
    pub fn toggle_axis(&mut self, scene: &mut Scene, visible: bool) {
        self.state.axis = visible;
        scene.set_member(self.axis, visible);
    }

    /// Shows or hides one channel and reflects its group's new header value.
    ///
    /// Returns the group's header value after the change.
    pub fn toggle_channel(
        &mut self,
        scene: &mut Scene,
        channel: &str,
        visible: bool,
    ) -> Result<TriState> {
        let config = Arc::clone(&self.config);
        let group = config
            .group_of(channel)
            .ok_or_else(|| CaloError::UnknownChannel(channel.to_string()))?;
        self.write_channel(scene, channel, visible)?;
        Ok(self.reflect_group(group))
    }

    /// Shows or hides every member of a group.
    ///
    /// Returns the group's header value, which is checked or unchecked.
    pub fn toggle_group(&mut self, scene: &mut Scene, group: &str, visible: bool) -> Result<TriState> {
        let config = Arc::clone(&self.config);
        let group = config
            .group(group)
            .ok_or_else(|| CaloError::UnknownGroup(group.to_string()))?;

        for member in group.members() {
            self.write_channel(scene, member, visible)?;
        }
        Ok(self.reflect_group(group))
    }

    /// Applies a user click on a group header.
    ///
    /// The click moves the header along its cycle (partial goes to unchecked)
    /// and fans the resulting value out to every member.
    pub fn click_group_header(&mut self, scene: &mut Scene, group: &str) -> Result<TriState> {
        let current = self
            .state
            .group(group)
            .ok_or_else(|| CaloError::UnknownGroup(group.to_string()))?;
        let next = current.next_on_click();
        self.toggle_group(scene, group, next.is_checked())
    }

    /// Returns whether the axis is visible.
    #[must_use]
    pub fn is_axis_visible(&self) -> bool {
        self.state.axis
    }

    /// Returns a channel's flag, or `None` for an unknown channel.
    pub fn is_channel_visible(&self, channel: &str) -> Option<bool> {
        self.state.channel(channel)
    }

    /// Returns a group's header value, or `None` for an unknown group.
    pub fn group_state(&self, group: &str) -> Option<TriState> {
        self.state.group(group)
    }

    /// Returns every group's header value in configuration order.
    pub fn group_states(&self) -> Vec<(String, TriState)> {
        self.config
            .groups
            .iter()
            .map(|g| {
                let state = self.state.group(g.name()).unwrap_or_default();
                (g.name().to_string(), state)
            })
            .collect()
    }

    /// Returns the full visibility state.
    pub fn state(&self) -> &VisibilityState {
        &self.state
    }

    /// Returns the handle of a channel's drawable.
    pub fn channel_handle(&self, channel: &str) -> Option<DrawableId> {
        self.channels.get(channel).copied()
    }

    /// Direct write: flag and scene membership, no header reflection.
    fn write_channel(&mut self, scene: &mut Scene, channel: &str, visible: bool) -> Result<()> {
        let id = self
            .channels
            .get(channel)
            .copied()
            .ok_or_else(|| CaloError::UnknownChannel(channel.to_string()))?;
        self.state.channels.insert(channel.to_string(), visible);
        scene.set_member(id, visible);
        Ok(())
    }

    /// Recomputes and caches a group's header value from its members.
    fn reflect_group(&mut self, group: &DetectorGroup) -> TriState {
        let channels = &self.state.channels;
        let value = group.tri_state(|m| channels.get(m).copied().unwrap_or(false));
        let previous = self.state.groups.insert(group.name().to_string(), value);
        if previous != Some(value) {
            log::debug!("group '{}' header -> {}", group.name(), value.name());
        }
        value
    }
}
