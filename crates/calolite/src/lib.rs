//! calolite-rs: an interactive 3D event viewer for calorimeter data.
//!
//! The viewer shows the cells of a calorimeter as one point cloud per sampling
//! layer, an R/Z axis with meter labels, and for a selected event the truth
//! particle trajectories and the reconstructed clusters.
//!
//! # Quick Start
//!
//! ```no_run
//! use std::sync::Arc;
//! use calolite::*;
//!
//! fn main() -> Result<()> {
//!     let config = Arc::new(DetectorConfig::default());
//!     let geometry = CellGeometry::load("cells.json", &config)?;
//!     let events = EventCatalog::load("events.json")?;
//!
//!     let mut stage = Stage::new(config, &geometry, Box::new(events))?;
//!     stage.on_group_toggle("Tile Barrel", false)?;
//!     stage.on_event_selected(EventSelection::Event(12))?;
//!     stage.render_to_file("event12.png", 1280, 720)?;
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! - A [`Stage`] owns a [`Registry`] of drawables and the [`Scene`] deciding
//!   which of them are drawn, in which order.
//! - Axis, channel and group toggles go through the [`VisibilityCoordinator`],
//!   which keeps scene membership and tri-state group headers in sync.
//! - The event picker's [`EventSelection`] is relayed to the [`EventOverlay`].
//! - Pointer and wheel input drive the [`CameraController`].

// Documentation lints - internal functions don't need exhaustive panic/error docs
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]

mod headless;

pub mod dataset;
pub mod selection;
pub mod stage;

// Re-export core types
pub use calolite_core::{
    config::{ChannelSpec, DetectorConfig},
    drawable::{Drawable, Surface},
    error::{CaloError, Result},
    group::{DetectorGroup, TriState},
    registry::{DrawableId, Registry},
    scene::{FrameStats, Scene},
    source::{EventId, EventSource, GeometrySource},
    visibility::VisibilityCoordinator,
    Mat4, Vec2, Vec3, Vec4,
};

// Re-export render types
pub use calolite_render::{
    save_image, CameraController, CameraSettings, CameraState, DrawCommand, DrawList,
    PointerButton, Rasterizer,
};

// Re-export structures
pub use calolite_structures::{Axis, ChannelCloud, EventOverlay, Trajectory};

pub use dataset::{trajectory_endpoint, CellGeometry, EventCatalog, EventRecord, TRAJECTORY_LENGTH};
pub use selection::{EventSelection, ParseSelectionError};
pub use stage::Stage;
