//! A surface that records draw commands instead of rasterizing them.
//!
//! Useful for tests and for inspecting what a frame would draw.

use calolite_core::Surface;
use glam::{Mat4, Vec3};

/// One recorded primitive.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// The view transform changed.
    SetView(Mat4),
    /// A batch of points.
    Points {
        points: Vec<Vec3>,
        color: Vec3,
        size: f32,
    },
    /// A line segment.
    Line { from: Vec3, to: Vec3, color: Vec3 },
    /// A cylinder.
    Cylinder {
        from: Vec3,
        to: Vec3,
        radius: f32,
        color: Vec3,
    },
    /// A text label.
    Label {
        anchor: Vec3,
        text: String,
        color: Vec3,
    },
}

/// Records every primitive of a frame in draw order.
#[derive(Debug, Clone, Default)]
pub struct DrawList {
    commands: Vec<DrawCommand>,
}

impl DrawList {
    /// Creates an empty draw list.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the recorded commands.
    #[must_use]
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Forgets all recorded commands.
    pub fn clear(&mut self) {
        self.commands.clear();
    }

    /// Returns true if nothing was drawn. View changes do not count.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        !self
            .commands
            .iter()
            .any(|c| !matches!(c, DrawCommand::SetView(_)))
    }

    /// Number of line segments drawn.
    #[must_use]
    pub fn line_count(&self) -> usize {
        self.lines().count()
    }

    /// Iterates over line segments as `(from, to, color)`.
    pub fn lines(&self) -> impl Iterator<Item = (Vec3, Vec3, Vec3)> + '_ {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Line { from, to, color } => Some((*from, *to, *color)),
            _ => None,
        })
    }

    /// Iterates over point batches as `(points, color, size)`.
    pub fn point_batches(&self) -> impl Iterator<Item = (&[Vec3], Vec3, f32)> + '_ {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Points {
                points,
                color,
                size,
            } => Some((points.as_slice(), *color, *size)),
            _ => None,
        })
    }

    /// Iterates over label texts.
    pub fn labels(&self) -> impl Iterator<Item = &str> + '_ {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Label { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }

    /// Returns the last view transform set, if any.
    #[must_use]
    pub fn last_view(&self) -> Option<Mat4> {
        self.commands.iter().rev().find_map(|c| match c {
            DrawCommand::SetView(view) => Some(*view),
            _ => None,
        })
    }
}

impl Surface for DrawList {
    fn set_view(&mut self, view: Mat4) {
        self.commands.push(DrawCommand::SetView(view));
    }

    fn draw_points(&mut self, points: &[Vec3], color: Vec3, size: f32) {
        self.commands.push(DrawCommand::Points {
            points: points.to_vec(),
            color,
            size,
        });
    }

    fn draw_line(&mut self, from: Vec3, to: Vec3, color: Vec3) {
        self.commands.push(DrawCommand::Line { from, to, color });
    }

    fn draw_cylinder(&mut self, from: Vec3, to: Vec3, radius: f32, color: Vec3) {
        self.commands.push(DrawCommand::Cylinder {
            from,
            to,
            radius,
            color,
        });
    }

    fn draw_label(&mut self, anchor: Vec3, text: &str, color: Vec3) {
        self.commands.push(DrawCommand::Label {
            anchor,
            text: text.to_string(),
            color,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_records_in_order() {
        let mut list = DrawList::new();
        list.set_view(Mat4::IDENTITY);
        assert!(list.is_empty());
        list.draw_line(Vec3::ZERO, Vec3::X, Vec3::ZERO);
        list.draw_points(&[Vec3::Y], Vec3::ONE, 2.0);
        assert!(!list.is_empty());
        assert_eq!(list.commands().len(), 3);
        assert_eq!(list.line_count(), 1);
        assert_eq!(list.point_batches().count(), 1);
        assert_eq!(list.last_view(), Some(Mat4::IDENTITY));
    }
}
