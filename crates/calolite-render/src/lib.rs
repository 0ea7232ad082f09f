//! Rendering layer for calolite-rs.
//!
//! This crate turns interactive input and scene membership into frames:
//! - [`CameraController`]: rotation, pan and zoom driven by pointer and wheel deltas
//! - [`compose_frame`]: applies the camera transform and renders the scene in order
//! - [`DrawList`]: a recording surface
//! - [`Rasterizer`]: a CPU surface painting into an RGBA image
//! - [`save_image`]: writing frames to PNG/JPEG

// Graphics code intentionally uses casts for pixel coordinates and colors
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
// Documentation lints - internal functions don't need exhaustive panic/error docs
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]

pub mod camera;
pub mod draw_list;
pub mod frame;
pub mod raster;
pub mod snapshot;

pub use camera::{CameraController, CameraSettings, CameraState, PointerButton};
pub use draw_list::{DrawCommand, DrawList};
pub use frame::compose_frame;
pub use raster::{to_pixel, Rasterizer, DEFAULT_BACKGROUND};
pub use snapshot::{encode_png, save_image, SnapshotError};
