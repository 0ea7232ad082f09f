//! Pointer and wheel input.

use calolite_core::Vec2;
use calolite_render::PointerButton;

use super::Stage;

impl Stage {
    /// Records where a drag starts.
    pub fn on_pointer_down(&mut self, position: Vec2) {
        self.camera.pointer_down(position);
    }

    /// Handles pointer motion. `button` is the button held during the move.
    ///
    /// Left drags rotate, middle drags pan; other moves only track the
    /// pointer. Returns whether the camera changed.
    pub fn on_pointer_move(&mut self, position: Vec2, button: Option<PointerButton>) -> bool {
        let changed = self.camera.pointer_move(position, button);
        if changed {
            self.request_redraw();
        }
        changed
    }

    /// Zooms by a raw wheel angle delta. Non-finite deltas are ignored.
    pub fn on_wheel(&mut self, delta: f32) {
        self.camera.wheel(delta);
        if delta.is_finite() {
            self.request_redraw();
        }
    }
}
