//! CPU rasterizer surface.
//!
//! Projects primitives with the camera's perspective and paints them into an
//! RGBA image in draw order (later primitives paint over earlier ones, there
//! is no depth buffer). Points are square splats, lines are one pixel wide,
//! cylinders are lines as wide as their projected diameter and labels are
//! drawn as small anchor marks.

use calolite_core::Surface;
use glam::{Mat4, Vec2, Vec3, Vec4Swizzles};
use image::{Rgba, RgbaImage};

use crate::camera::CameraSettings;

/// Default background color of a frame.
pub const DEFAULT_BACKGROUND: Vec3 = Vec3::new(0.8, 0.8, 0.8);

/// Converts an RGB color in [0, 1] to an opaque pixel.
#[must_use]
pub fn to_pixel(color: Vec3) -> Rgba<u8> {
    let c = (color.clamp(Vec3::ZERO, Vec3::ONE) * 255.0).round();
    Rgba([c.x as u8, c.y as u8, c.z as u8, 255])
}

/// Software surface painting into an [`RgbaImage`].
pub struct Rasterizer {
    image: RgbaImage,
    background: Rgba<u8>,
    projection: Mat4,
    view: Mat4,
    near: f32,
}

impl Rasterizer {
    /// Creates a rasterizer of the given size, cleared to the default background.
    #[must_use]
    pub fn new(width: u32, height: u32, settings: &CameraSettings) -> Self {
        let width = width.max(1);
        let height = height.max(1);
        let aspect = width as f32 / height as f32;
        let background = to_pixel(DEFAULT_BACKGROUND);
        Self {
            image: RgbaImage::from_pixel(width, height, background),
            background,
            projection: settings.projection_matrix(aspect),
            view: Mat4::IDENTITY,
            near: settings.near,
        }
    }

    /// Sets the background color and clears to it.
    #[must_use]
    pub fn with_background(mut self, color: Vec3) -> Self {
        self.background = to_pixel(color);
        self.clear();
        self
    }

    /// Clears the image to the background color.
    pub fn clear(&mut self) {
        let background = self.background;
        for pixel in self.image.pixels_mut() {
            *pixel = background;
        }
    }

    /// Returns the image painted so far.
    #[must_use]
    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    /// Consumes the rasterizer and returns its image.
    #[must_use]
    pub fn into_image(self) -> RgbaImage {
        self.image
    }

    fn size(&self) -> Vec2 {
        Vec2::new(self.image.width() as f32, self.image.height() as f32)
    }

    /// World position to view space.
    fn to_view(&self, p: Vec3) -> Vec3 {
        self.view.transform_point3(p)
    }

    /// Whether a view-space point lies in front of the near plane.
    fn in_front(&self, v: Vec3) -> bool {
        v.z <= -self.near
    }

    /// View-space point (in front of the near plane) to pixel coordinates.
    fn to_screen(&self, v: Vec3) -> Vec2 {
        let clip = self.projection * v.extend(1.0);
        let ndc = clip.xy() / clip.w;
        let size = self.size();
        Vec2::new((ndc.x + 1.0) * 0.5 * size.x, (1.0 - ndc.y) * 0.5 * size.y)
    }

    /// Pixels per world unit at a view-space depth.
    fn pixel_scale(&self, depth: f32) -> f32 {
        self.projection.y_axis.y * self.size().y * 0.5 / depth.max(self.near)
    }

    /// Clips a view-space segment to the near plane.
    fn clip_near(&self, a: Vec3, b: Vec3) -> Option<(Vec3, Vec3)> {
        match (self.in_front(a), self.in_front(b)) {
            (true, true) => Some((a, b)),
            (false, false) => None,
            (front_a, _) => {
                let t = (-self.near - a.z) / (b.z - a.z);
                let cut = a.lerp(b, t);
                if front_a {
                    Some((a, cut))
                } else {
                    Some((cut, b))
                }
            }
        }
    }

    fn fill_square(&mut self, center: Vec2, size: f32, color: Rgba<u8>) {
        let half = (size.max(1.0) * 0.5).max(0.5);
        let (w, h) = (self.image.width() as f32, self.image.height() as f32);
        let x0 = (center.x - half).round().max(0.0);
        let x1 = (center.x + half).round().min(w);
        let y0 = (center.y - half).round().max(0.0);
        let y1 = (center.y + half).round().min(h);
        if x0 >= x1 || y0 >= y1 {
            return;
        }
        for y in y0 as u32..y1 as u32 {
            for x in x0 as u32..x1 as u32 {
                self.image.put_pixel(x, y, color);
            }
        }
    }

    /// Paints a screen-space segment with the given width.
    fn paint_segment(&mut self, a: Vec2, b: Vec2, width: f32, color: Rgba<u8>) {
        let margin = width.max(1.0);
        let Some((a, b)) = clip_to_rect(a, b, Vec2::splat(-margin), self.size() + margin) else {
            return;
        };
        let steps = (b - a).abs().max_element().ceil().max(1.0);
        for i in 0..=steps as u32 {
            let p = a.lerp(b, i as f32 / steps);
            self.fill_square(p, width, color);
        }
    }

    fn paint_world_segment(&mut self, from: Vec3, to: Vec3, radius: Option<f32>, color: Vec3) {
        let (a, b) = (self.to_view(from), self.to_view(to));
        let Some((a, b)) = self.clip_near(a, b) else {
            return;
        };
        let width = radius.map_or(1.0, |r| {
            let depth = -(a.z + b.z) * 0.5;
            (2.0 * r * self.pixel_scale(depth)).max(1.0)
        });
        let (sa, sb) = (self.to_screen(a), self.to_screen(b));
        self.paint_segment(sa, sb, width, to_pixel(color));
    }
}

impl Surface for Rasterizer {
    fn set_view(&mut self, view: Mat4) {
        self.view = view;
    }

    fn draw_points(&mut self, points: &[Vec3], color: Vec3, size: f32) {
        let color = to_pixel(color);
        for &p in points {
            let v = self.to_view(p);
            if self.in_front(v) {
                let s = self.to_screen(v);
                self.fill_square(s, size, color);
            }
        }
    }

    fn draw_line(&mut self, from: Vec3, to: Vec3, color: Vec3) {
        self.paint_world_segment(from, to, None, color);
    }

    fn draw_cylinder(&mut self, from: Vec3, to: Vec3, radius: f32, color: Vec3) {
        self.paint_world_segment(from, to, Some(radius), color);
    }

    fn draw_label(&mut self, anchor: Vec3, _text: &str, color: Vec3) {
        let v = self.to_view(anchor);
        if self.in_front(v) {
            let s = self.to_screen(v);
            self.fill_square(s, 3.0, to_pixel(color));
        }
    }
}

/// Liang-Barsky clipping of a 2D segment against an axis-aligned rectangle.
fn clip_to_rect(a: Vec2, b: Vec2, min: Vec2, max: Vec2) -> Option<(Vec2, Vec2)> {
    let d = b - a;
    let mut t0 = 0.0_f32;
    let mut t1 = 1.0_f32;
    for (p, q) in [
        (-d.x, a.x - min.x),
        (d.x, max.x - a.x),
        (-d.y, a.y - min.y),
        (d.y, max.y - a.y),
    ] {
        if p == 0.0 {
            if q < 0.0 {
                return None;
            }
        } else {
            let r = q / p;
            if p < 0.0 {
                t0 = t0.max(r);
            } else {
                t1 = t1.min(r);
            }
            if t0 > t1 {
                return None;
            }
        }
    }
    Some((a + d * t0, a + d * t1))
}
