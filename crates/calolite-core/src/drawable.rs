//! Drawable trait and the surface it draws into.
//!
//! A [`Drawable`] is anything that can render itself into the current frame:
//! the axis markers, a detector channel's point cloud, or the event overlay.
//! These are siblings, not a hierarchy. The [`Surface`] trait is the opaque
//! set of primitives a drawable may use; the frame composer sets the view
//! transform before any drawable is asked to render.

use std::any::Any;

use glam::{Mat4, Vec3};

use crate::error::Result;

/// Target of a frame: receives the view transform and draw primitives.
///
/// Coordinates are world-space meters. The surface applies the view
/// transform last set with [`Surface::set_view`] and its own projection.
pub trait Surface {
    /// Sets the model-view transform for subsequent primitives.
    fn set_view(&mut self, view: Mat4);

    /// Draws a set of points with a shared color and pixel size.
    fn draw_points(&mut self, points: &[Vec3], color: Vec3, size: f32);

    /// Draws a single line segment.
    fn draw_line(&mut self, from: Vec3, to: Vec3, color: Vec3);

    /// Draws a cylinder of the given radius between two points.
    fn draw_cylinder(&mut self, from: Vec3, to: Vec3, radius: f32, color: Vec3);

    /// Draws a text label anchored at a world-space point.
    fn draw_label(&mut self, anchor: Vec3, text: &str, color: Vec3);
}

/// An entity that can render itself into a [`Surface`].
///
/// Drawables are registered in a [`Registry`](crate::registry::Registry); the
/// handle returned there is their identity.
pub trait Drawable: Any {
    /// Returns a reference to self as `Any` for downcasting.
    fn as_any(&self) -> &dyn Any;

    /// Returns a mutable reference to self as `Any` for downcasting.
    fn as_any_mut(&mut self) -> &mut dyn Any;

    /// Returns the name of this drawable.
    fn name(&self) -> &str;

    /// Returns the type name of this drawable (e.g., "`ChannelCloud`").
    fn type_name(&self) -> &'static str;

    /// Renders this drawable.
    ///
    /// An error aborts only this drawable; the rest of the frame continues.
    fn render(&self, surface: &mut dyn Surface) -> Result<()>;
}
