//! Axis markers.

use std::any::Any;

use calolite_core::{Drawable, Result, Surface};
use glam::Vec3;

/// Transverse (R) axis along +X and beam (Z) axis along +Z, with a label at
/// every whole meter.
#[derive(Debug, Clone)]
pub struct Axis {
    name: String,
    r_length: f32,
    z_length: f32,
    radius: f32,
    r_color: Vec3,
    z_color: Vec3,
    label_color: Vec3,
}

impl Axis {
    /// Creates the default axis: 4 m transverse, 6.5 m along the beam.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            r_length: 4.0,
            z_length: 6.5,
            radius: 0.025,
            r_color: Vec3::new(1.0, 0.0, 0.0),
            z_color: Vec3::new(0.0, 0.0, 1.0),
            label_color: Vec3::ZERO,
        }
    }

    /// Sets both axis lengths in meters.
    #[must_use]
    pub fn with_lengths(mut self, r_length: f32, z_length: f32) -> Self {
        self.r_length = r_length.max(0.0);
        self.z_length = z_length.max(0.0);
        self
    }

    /// Returns the transverse axis length.
    pub fn r_length(&self) -> f32 {
        self.r_length
    }

    /// Returns the beam axis length.
    pub fn z_length(&self) -> f32 {
        self.z_length
    }

    fn draw_labels(&self, surface: &mut dyn Surface, direction: Vec3, length: f32) {
        let mut meter = 0_u32;
        while meter as f32 <= length {
            surface.draw_label(direction * meter as f32, &format!("{meter} m"), self.label_color);
            meter += 1;
        }
    }
}

impl Drawable for Axis {
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
        "Axis"
    }

    fn render(&self, surface: &mut dyn Surface) -> Result<()> {
        surface.draw_cylinder(Vec3::ZERO, Vec3::X * self.r_length, self.radius, self.r_color);
        surface.draw_cylinder(Vec3::ZERO, Vec3::Z * self.z_length, self.radius, self.z_color);
        self.draw_labels(surface, Vec3::X, self.r_length);
        self.draw_labels(surface, Vec3::Z, self.z_length);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use calolite_render::{DrawCommand, DrawList};

    #[test]
    fn test_axis_draws_two_cylinders_and_labels() {
        let axis = Axis::new("axis");
        let mut list = DrawList::new();
        axis.render(&mut list).unwrap();

        let cylinders = list
            .commands()
            .iter()
            .filter(|c| matches!(c, DrawCommand::Cylinder { .. }))
            .count();
        assert_eq!(cylinders, 2);

        // 0..=4 on the R axis, 0..=6 on the Z axis.
        let labels: Vec<&str> = list.labels().collect();
        assert_eq!(labels.len(), 5 + 7);
        assert_eq!(labels[0], "0 m");
        assert_eq!(labels[4], "4 m");
        assert_eq!(labels[11], "6 m");
    }

    #[test]
    fn test_custom_lengths() {
        let axis = Axis::new("axis").with_lengths(1.0, 2.0);
        let mut list = DrawList::new();
        axis.render(&mut list).unwrap();
        assert_eq!(list.labels().count(), 2 + 3);
        assert_eq!(axis.r_length(), 1.0);
        assert_eq!(axis.z_length(), 2.0);
    }
}
