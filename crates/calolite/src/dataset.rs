//! In-memory geometry and event data, with JSON loaders.
//!
//! Files store positions in millimetres. Everything handed to the stage is in
//! meters.

use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use calolite_core::{
    CaloError, DetectorConfig, EventId, EventSource, GeometrySource, Result, Vec2, Vec3,
};
use serde::Deserialize;

/// Length of a drawn truth trajectory, in meters.
pub const TRAJECTORY_LENGTH: f32 = 10.0;

const MM_PER_METER: f32 = 1000.0;

/// Endpoint of a straight trajectory of the given length leaving the origin
/// at pseudorapidity `eta` and azimuth `phi`.
pub fn trajectory_endpoint(eta: f32, phi: f32, length: f32) -> Vec3 {
    let r = length / eta.cosh();
    Vec3::new(r * phi.cos(), r * phi.sin(), r * eta.sinh())
}

fn mm_to_m(x: f32, y: f32, z: f32) -> Vec3 {
    Vec3::new(x, y, z) / MM_PER_METER
}

// ============================================================================
// Geometry
// ============================================================================

/// Cell positions per channel.
#[derive(Debug, Clone, Default)]
pub struct CellGeometry {
    cells: HashMap<String, Vec<Vec3>>,
}

#[derive(Deserialize)]
struct RawGeometry {
    cells: Vec<RawCell>,
}

#[derive(Deserialize)]
struct RawCell {
    sampling: usize,
    x: f32,
    y: f32,
    z: f32,
}

impl CellGeometry {
    /// Creates an empty geometry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the cells of a channel, in meters.
    pub fn insert(&mut self, channel: impl Into<String>, cells: Vec<Vec3>) {
        self.cells.insert(channel.into(), cells);
    }

    /// Returns the number of cells across all channels.
    pub fn total_cells(&self) -> usize {
        self.cells.values().map(Vec::len).sum()
    }

    /// Parses a geometry file.
    ///
    /// Each cell's `sampling` index is the position of its channel in the
    /// configuration. Cells with an index outside the table are skipped.
    pub fn from_json_str(json: &str, config: &DetectorConfig) -> Result<Self> {
        let raw: RawGeometry = serde_json::from_str(json)?;
        let names: Vec<&str> = config.channel_names().collect();
        let mut geometry = Self::new();
        let mut skipped = 0_usize;

        for cell in raw.cells {
            let Some(name) = names.get(cell.sampling) else {
                skipped += 1;
                continue;
            };
            geometry
                .cells
                .entry((*name).to_string())
                .or_default()
                .push(mm_to_m(cell.x, cell.y, cell.z));
        }

        if skipped > 0 {
            log::warn!(
                "skipped {skipped} cell(s) with a sampling index outside 0..{}",
                names.len()
            );
        }
        log::info!(
            "loaded {} cell(s) in {} channel(s)",
            geometry.total_cells(),
            geometry.cells.len()
        );
        Ok(geometry)
    }

    /// Loads a geometry file from disk.
    pub fn load(path: impl AsRef<Path>, config: &DetectorConfig) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json, config)
    }
}

impl GeometrySource for CellGeometry {
    /// Channels without any cells yield an empty list.
    fn cells(&self, channel: &str) -> Result<Vec<Vec3>> {
        Ok(self.cells.get(channel).cloned().unwrap_or_default())
    }
}

// ============================================================================
// Events
// ============================================================================

/// Geometry of one event, in meters.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EventRecord {
    /// Trajectory endpoint per truth particle.
    pub trajectories: Vec<Vec3>,
    /// `(eta, phi)` per truth particle.
    pub eta_phi: Vec<Vec2>,
    /// Cell positions per cluster.
    pub clusters: Vec<Vec<Vec3>>,
}

impl EventRecord {
    /// Builds a record from truth particle directions, computing trajectory
    /// endpoints at [`TRAJECTORY_LENGTH`].
    pub fn from_truth(eta_phi: Vec<Vec2>, clusters: Vec<Vec<Vec3>>) -> Self {
        let trajectories = eta_phi
            .iter()
            .map(|p| trajectory_endpoint(p.x, p.y, TRAJECTORY_LENGTH))
            .collect();
        Self {
            trajectories,
            eta_phi,
            clusters,
        }
    }
}

/// All events of a file, keyed by event number.
#[derive(Debug, Clone, Default)]
pub struct EventCatalog {
    events: BTreeMap<EventId, EventRecord>,
}

#[derive(Deserialize)]
struct RawEventFile {
    events: Vec<RawEvent>,
}

#[derive(Deserialize)]
struct RawEvent {
    event_number: EventId,
    #[serde(default)]
    truth_eta: Vec<f32>,
    #[serde(default)]
    truth_phi: Vec<f32>,
    #[serde(default)]
    cluster_cells: Vec<Vec<Vec<f32>>>,
}

impl RawEvent {
    fn into_record(self) -> EventRecord {
        let id = self.event_number;
        if self.truth_eta.len() != self.truth_phi.len() {
            log::warn!(
                "event {id}: {} eta value(s) but {} phi value(s), keeping the first {}",
                self.truth_eta.len(),
                self.truth_phi.len(),
                self.truth_eta.len().min(self.truth_phi.len())
            );
        }
        let eta_phi = self
            .truth_eta
            .into_iter()
            .zip(self.truth_phi)
            .map(|(eta, phi)| Vec2::new(eta, phi))
            .collect();

        let clusters = self
            .cluster_cells
            .into_iter()
            .enumerate()
            .map(|(cluster, cells)| parse_cluster(id, cluster, cells))
            .collect();

        EventRecord::from_truth(eta_phi, clusters)
    }
}

fn parse_cluster(event: EventId, cluster: usize, cells: Vec<Vec<f32>>) -> Vec<Vec3> {
    cells
        .into_iter()
        .enumerate()
        .filter_map(|(index, cell)| match cell[..] {
            [x, y, z] => Some(mm_to_m(x, y, z)),
            _ => {
                log::warn!(
                    "event {event}, cluster {cluster}: skipping cell {index} with {} coordinate(s)",
                    cell.len()
                );
                None
            }
        })
        .collect()
}

impl EventCatalog {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces an event.
    pub fn insert(&mut self, id: EventId, record: EventRecord) {
        self.events.insert(id, record);
    }

    /// Returns an event's record.
    pub fn get(&self, id: EventId) -> Option<&EventRecord> {
        self.events.get(&id)
    }

    /// Returns the number of events.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Returns true if there are no events.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Parses an event file. A repeated event number replaces the earlier one.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let raw: RawEventFile = serde_json::from_str(json)?;
        let mut catalog = Self::new();
        for event in raw.events {
            let id = event.event_number;
            if catalog.events.contains_key(&id) {
                log::warn!("event {id} appears more than once, keeping the last one");
            }
            catalog.insert(id, event.into_record());
        }
        log::info!("loaded {} event(s)", catalog.len());
        Ok(catalog)
    }

    /// Loads an event file from disk.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    fn record(&self, id: EventId) -> Result<&EventRecord> {
        self.events.get(&id).ok_or(CaloError::UnknownEvent(id))
    }
}

impl EventSource for EventCatalog {
    fn event_ids(&self) -> Vec<EventId> {
        self.events.keys().copied().collect()
    }

    fn trajectory_xyz(&self, event: EventId) -> Result<Vec<Vec3>> {
        Ok(self.record(event)?.trajectories.clone())
    }

    fn trajectory_eta_phi(&self, event: EventId) -> Result<Vec<Vec2>> {
        Ok(self.record(event)?.eta_phi.clone())
    }

    fn cluster_cells(&self, event: EventId) -> Result<Vec<Vec<Vec3>>> {
        Ok(self.record(event)?.clusters.clone())
    }
}
