//! Frame composition.

use calolite_core::{FrameStats, Registry, Scene, Surface};

use crate::camera::CameraController;

/// Composes one frame: applies the camera transform, then renders every
/// scene member in insertion order.
pub fn compose_frame(
    camera: &CameraController,
    scene: &Scene,
    registry: &Registry,
    surface: &mut dyn Surface,
) -> FrameStats {
    surface.set_view(camera.view_matrix());
    let stats = scene.render_all(registry, surface);
    log::trace!(
        "frame composed: {} rendered, {} failed",
        stats.rendered,
        stats.failed
    );
    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::camera::PointerButton;
    use crate::draw_list::{DrawCommand, DrawList};
    use calolite_core::{Drawable, Result};
    use glam::{Vec2, Vec3};
    use std::any::Any;

    struct Dot;

    impl Drawable for Dot {
        fn as_any(&self) -> &dyn Any {
            self
        }
        fn as_any_mut(&mut self) -> &mut dyn Any {
            self
        }
        fn name(&self) -> &str {
            "dot"
        }
        fn type_name(&self) -> &'static str {
            "Dot"
        }
        fn render(&self, surface: &mut dyn Surface) -> Result<()> {
            surface.draw_points(&[Vec3::ZERO], Vec3::ONE, 1.0);
            Ok(())
        }
    }

    #[test]
    fn test_view_is_set_before_drawables() {
        let mut registry = Registry::new();
        let mut scene = Scene::new();
        scene.add(registry.register(Box::new(Dot)).unwrap());

        let mut camera = CameraController::default();
        camera.drag(Vec2::new(10.0, 20.0), PointerButton::Left);

        let mut list = DrawList::new();
        let stats = compose_frame(&camera, &scene, &registry, &mut list);
        assert_eq!(stats.rendered, 1);
        assert_eq!(list.commands()[0], DrawCommand::SetView(camera.view_matrix()));
        assert!(matches!(list.commands()[1], DrawCommand::Points { .. }));
    }

    #[test]
    fn test_empty_scene_sets_view_only() {
        let registry = Registry::new();
        let scene = Scene::new();
        let mut list = DrawList::new();
        compose_frame(&CameraController::default(), &scene, &registry, &mut list);
        assert!(list.is_empty());
        assert!(list.last_view().is_some());
    }
}
