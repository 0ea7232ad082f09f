//! Core abstractions for calolite-rs.
//!
//! This crate provides the fundamental types used throughout calolite-rs:
//! - [`Drawable`] trait for entities that render themselves, and the [`Surface`] they draw into
//! - [`Registry`] owning drawables and [`Scene`] deciding which of them are drawn, in which order
//! - [`DetectorConfig`] and [`DetectorGroup`] describing the static detector layout
//! - [`VisibilityCoordinator`] driving scene membership from axis, channel and group toggles
//! - [`GeometrySource`] / [`EventSource`] data collaborator traits

// Documentation lints - internal functions don't need exhaustive panic/error docs
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]
// Accessors returning Self or plain values don't need must_use
#![allow(clippy::must_use_candidate)]

pub mod config;
pub mod drawable;
pub mod error;
pub mod group;
pub mod registry;
pub mod scene;
pub mod source;
pub mod visibility;

pub use config::{ChannelSpec, DetectorConfig};
pub use drawable::{Drawable, Surface};
pub use error::{CaloError, Result};
pub use group::{DetectorGroup, TriState};
pub use registry::{DrawableId, Registry};
pub use scene::{FrameStats, Scene};
pub use source::{EventId, EventSource, GeometrySource};
pub use visibility::{VisibilityCoordinator, VisibilityState};

// Re-export glam types for convenience
pub use glam::{Mat4, Vec2, Vec3, Vec4};
