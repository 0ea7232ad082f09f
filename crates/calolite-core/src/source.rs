//! Data collaborator traits.
//!
//! Geometry and event data are loaded up front by whoever constructs the
//! stage. The core only sees these two narrow interfaces.

use glam::{Vec2, Vec3};

use crate::error::Result;

/// Event number as stored in the event file.
pub type EventId = u64;

/// Provides detector cell positions per channel.
pub trait GeometrySource {
    /// Returns every cell position of a channel, in meters.
    fn cells(&self, channel: &str) -> Result<Vec<Vec3>>;
}

/// Provides per-event truth trajectories and cluster cells.
pub trait EventSource {
    /// Returns all event numbers, sorted ascending.
    fn event_ids(&self) -> Vec<EventId>;

    /// Returns the trajectory endpoint of each truth particle, in meters.
    fn trajectory_xyz(&self, event: EventId) -> Result<Vec<Vec3>>;

    /// Returns `(eta, phi)` of each truth particle, index-aligned with
    /// [`EventSource::trajectory_xyz`].
    fn trajectory_eta_phi(&self, event: EventId) -> Result<Vec<Vec2>>;

    /// Returns the cell positions of each reconstructed cluster, in meters.
    fn cluster_cells(&self, event: EventId) -> Result<Vec<Vec<Vec3>>>;
}
