//! Drawable implementations for calolite-rs.
//!
//! This crate provides the concrete things a stage draws:
//! - The R/Z axis markers with meter labels
//! - One point cloud per calorimeter channel
//! - The overlay of the selected event (trajectories and clusters)

// Graphics code intentionally uses casts for label positions
#![allow(clippy::cast_precision_loss)]
// Documentation lints - internal functions don't need exhaustive panic/error docs
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]

pub mod axis;
pub mod channel;
pub mod event_overlay;

pub use axis::Axis;
pub use channel::ChannelCloud;
pub use event_overlay::{EventOverlay, SelectedEvent, Trajectory};
