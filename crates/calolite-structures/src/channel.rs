//! Detector channel point cloud.

use std::any::Any;

use calolite_core::{ChannelSpec, Drawable, Result, Surface};
use glam::Vec3;

/// All cells of one calorimeter sampling layer, drawn as points.
#[derive(Debug, Clone)]
pub struct ChannelCloud {
    name: String,
    cells: Vec<Vec3>,
    color: Vec3,
    point_size: f32,
}

impl ChannelCloud {
    /// Creates a channel cloud.
    pub fn new(name: impl Into<String>, cells: Vec<Vec3>, color: Vec3, point_size: f32) -> Self {
        Self {
            name: name.into(),
            cells,
            color,
            point_size,
        }
    }

    /// Creates a channel cloud from its configuration entry.
    pub fn from_spec(spec: &ChannelSpec, cells: Vec<Vec3>) -> Self {
        Self::new(spec.name.clone(), cells, spec.color, spec.point_size)
    }

    /// Returns the cell positions.
    pub fn cells(&self) -> &[Vec3] {
        &self.cells
    }

    /// Returns the display color.
    pub fn color(&self) -> Vec3 {
        self.color
    }

    /// Returns the point size.
    pub fn point_size(&self) -> f32 {
        self.point_size
    }
}

impl Drawable for ChannelCloud {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn type_name(&self) -> &'static str {
        "ChannelCloud"
    }

    fn render(&self, surface: &mut dyn Surface) -> Result<()> {
        if self.cells.is_empty() {
            return Ok(());
        }
        surface.draw_points(&self.cells, self.color, self.point_size);
        Ok(())
    }
}
