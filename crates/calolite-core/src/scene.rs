//! Ordered scene membership.
//!
//! The [`Scene`] decides which registered drawables take part in a frame and
//! in which order they are drawn. Insertion order is draw order; there is no
//! depth sorting.

use crate::drawable::Surface;
use crate::registry::{DrawableId, Registry};

/// Outcome of one [`Scene::render_all`] pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    /// Drawables that rendered successfully.
    pub rendered: usize,
    /// Drawables that were skipped because they failed or were missing.
    pub failed: usize,
}

/// An order-preserving, duplicate-free set of drawable handles.
#[derive(Debug, Clone, Default)]
pub struct Scene {
    members: Vec<DrawableId>,
}

impl Scene {
    /// Creates a new empty scene.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a drawable if it is not already a member.
    ///
    /// Adding a member again keeps its original position.
    pub fn add(&mut self, id: DrawableId) {
        if !self.contains(id) {
            self.members.push(id);
        }
    }

    /// Removes a drawable if it is a member. Absent handles are ignored.
    pub fn remove(&mut self, id: DrawableId) {
        self.members.retain(|member| *member != id);
    }

    /// Adds or removes a drawable.
    pub fn set_member(&mut self, id: DrawableId, present: bool) {
        if present {
            self.add(id);
        } else {
            self.remove(id);
        }
    }

    /// Returns whether a drawable is a member.
    pub fn contains(&self, id: DrawableId) -> bool {
        self.members.contains(&id)
    }

    /// Returns the members in draw order.
    pub fn members(&self) -> &[DrawableId] {
        &self.members
    }

    /// Returns the number of members.
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Returns true if the scene has no members.
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Renders every member, in order, into the same surface.
    ///
    /// A drawable that fails, or a handle missing from the registry, is
    /// logged and skipped; it never aborts the frame.
    pub fn render_all(&self, registry: &Registry, surface: &mut dyn Surface) -> FrameStats {
        let mut stats = FrameStats::default();

        for &id in &self.members {
            let Some(drawable) = registry.get(id) else {
                log::warn!("scene member {id} is not registered, skipping");
                stats.failed += 1;
                continue;
            };

            match drawable.render(surface) {
                Ok(()) => stats.rendered += 1,
                Err(e) => {
                    log::warn!(
                        "failed to render {} '{}': {e}",
                        drawable.type_name(),
                        drawable.name()
                    );
                    stats.failed += 1;
                }
            }
        }

        stats
    }
}
