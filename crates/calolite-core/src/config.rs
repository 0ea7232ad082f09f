//! Static detector configuration.
//!
//! The configuration names every calorimeter sampling layer ("channel"), its
//! display color and point size, the groups used for combined show/hide
//! control, and the palette used to color reconstructed clusters. It is loaded
//! once at startup, validated, and shared read-only afterwards.

use std::collections::HashSet;
use std::path::Path;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::error::{CaloError, Result};
use crate::group::DetectorGroup;

/// Display parameters for one detector channel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChannelSpec {
    /// Unique channel name (e.g. "EMB1").
    pub name: String,
    /// RGB color in [0, 1].
    pub color: Vec3,
    /// Point size in pixels.
    pub point_size: f32,
}

impl ChannelSpec {
    pub fn new(name: impl Into<String>, color: Vec3, point_size: f32) -> Self {
        Self {
            name: name.into(),
            color,
            point_size,
        }
    }
}

/// The complete detector configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectorConfig {
    /// Channels in sampling-index order.
    pub channels: Vec<ChannelSpec>,
    /// Groups in display order. Together they partition `channels`.
    pub groups: Vec<DetectorGroup>,
    /// Colors cycled through when drawing clusters.
    pub cluster_palette: Vec<Vec3>,
}

impl Default for DetectorConfig {
    /// The ATLAS calorimeter: 24 sampling layers in 7 groups.
    fn default() -> Self {
        const EM: f32 = 1.5;
        const TILE: f32 = 2.5;
        let ch = |name: &str, r: f32, g: f32, b: f32, size: f32| {
            ChannelSpec::new(name, Vec3::new(r, g, b), size)
        };

        let channels = vec![
            ch("PreSamplerB", 0.73, 0.0, 0.11, EM),
            ch("EMB1", 0.18, 0.58, 1.0, EM),
            ch("EMB2", 0.01, 0.44, 0.88, EM),
            ch("EMB3", 0.01, 0.34, 0.67, EM),
            ch("PreSamplerE", 0.73, 0.0, 0.11, EM),
            ch("EME1", 0.18, 0.58, 1.0, EM),
            ch("EME2", 0.01, 0.44, 0.88, EM),
            ch("EME3", 0.01, 0.34, 0.67, EM),
            ch("HEC0", 0.18, 0.72, 0.51, EM),
            ch("HEC1", 0.12, 0.70, 0.47, EM),
            ch("HEC2", 0.01, 0.67, 0.41, EM),
            ch("HEC3", 0.06, 0.45, 0.11, EM),
            ch("TileBar0", 0.83, 0.42, 0.03, TILE),
            ch("TileBar1", 0.89, 0.45, 0.07, TILE),
            ch("TileBar2", 1.0, 0.56, 0.0, TILE),
            ch("TileGap1", 0.9, 0.06, 0.88, TILE),
            ch("TileGap2", 0.61, 0.06, 0.9, TILE),
            ch("TileGap3", 0.73, 0.0, 0.11, TILE),
            ch("TileExt0", 0.49, 0.73, 0.0, TILE),
            ch("TileExt1", 1.0, 0.0, 0.73, TILE),
            ch("TileExt2", 0.31, 0.37, 0.0, TILE),
            ch("FCAL0", 0.42, 0.42, 0.42, EM),
            ch("FCAL1", 0.21, 0.21, 0.21, EM),
            ch("FCAL2", 0.0, 0.0, 0.0, EM),
        ];

        let groups = vec![
            DetectorGroup::new("EM Barrel", ["PreSamplerB", "EMB1", "EMB2", "EMB3"]),
            DetectorGroup::new("EM Endcap", ["PreSamplerE", "EME1", "EME2", "EME3"]),
            DetectorGroup::new("Hadronic Endcap", ["HEC0", "HEC1", "HEC2", "HEC3"]),
            DetectorGroup::new("Tile Barrel", ["TileBar0", "TileBar1", "TileBar2"]),
            DetectorGroup::new("Tile Gap", ["TileGap1", "TileGap2", "TileGap3"]),
            DetectorGroup::new("Tile Extension", ["TileExt0", "TileExt1", "TileExt2"]),
            DetectorGroup::new("Forward Calorimeter", ["FCAL0", "FCAL1", "FCAL2"]),
        ];

        let cluster_palette = vec![
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(1.0, 0.31, 0.0),
            Vec3::new(1.0, 0.48, 0.0),
            Vec3::new(0.36, 1.0, 0.0),
            Vec3::new(0.0, 1.0, 0.63),
            Vec3::new(0.0, 1.0, 0.94),
        ];

        Self {
            channels,
            groups,
            cluster_palette,
        }
    }
}

impl DetectorConfig {
    /// Parses and validates a configuration from JSON.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads and validates a configuration from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Serializes the configuration to pretty-printed JSON.
    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Checks that channel names are unique, that the groups partition the
    /// channels, and that the cluster palette is not empty.
    pub fn validate(&self) -> Result<()> {
        let mut names = HashSet::new();
        for channel in &self.channels {
            if !names.insert(channel.name.as_str()) {
                return Err(CaloError::InvalidConfig(format!(
                    "duplicate channel '{}'",
                    channel.name
                )));
            }
        }

        let mut group_names = HashSet::new();
        let mut grouped = HashSet::new();
        for group in &self.groups {
            if !group_names.insert(group.name()) {
                return Err(CaloError::InvalidConfig(format!(
                    "duplicate group '{}'",
                    group.name()
                )));
            }
            if group.is_empty() {
                return Err(CaloError::InvalidConfig(format!(
                    "group '{}' has no members",
                    group.name()
                )));
            }
            for member in group.members() {
                if !names.contains(member) {
                    return Err(CaloError::InvalidConfig(format!(
                        "group '{}' references unknown channel '{member}'",
                        group.name()
                    )));
                }
                if !grouped.insert(member) {
                    return Err(CaloError::InvalidConfig(format!(
                        "channel '{member}' belongs to more than one group"
                    )));
                }
            }
        }

        if let Some(orphan) = self
            .channels
            .iter()
            .find(|c| !grouped.contains(c.name.as_str()))
        {
            return Err(CaloError::InvalidConfig(format!(
                "channel '{}' is not in any group",
                orphan.name
            )));
        }

        if self.cluster_palette.is_empty() {
            return Err(CaloError::InvalidConfig(
                "cluster palette is empty".to_string(),
            ));
        }

        Ok(())
    }

    /// Looks up a channel by name.
    pub fn channel(&self, name: &str) -> Option<&ChannelSpec> {
        self.channels.iter().find(|c| c.name == name)
    }

    /// Looks up a group by name.
    pub fn group(&self, name: &str) -> Option<&DetectorGroup> {
        self.groups.iter().find(|g| g.name() == name)
    }

    /// Returns the group a channel belongs to.
    pub fn group_of(&self, channel: &str) -> Option<&DetectorGroup> {
        self.groups.iter().find(|g| g.contains(channel))
    }

    /// Returns the channel names in sampling-index order.
    pub fn channel_names(&self) -> impl Iterator<Item = &str> {
        self.channels.iter().map(|c| c.name.as_str())
    }
}
