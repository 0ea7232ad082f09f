//! Registry owning every drawable, keyed by handle.

use std::collections::HashMap;
use std::fmt;

use crate::drawable::Drawable;
use crate::error::{CaloError, Result};

/// Identity of a registered drawable.
///
/// Handles are never reused within a registry, so two drawables with equal
/// contents still have distinct identities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DrawableId(u32);

impl fmt::Display for DrawableId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Registry for managing all drawables of a stage.
///
/// Registration gives ownership to the registry; scene membership refers to
/// drawables only by [`DrawableId`].
#[derive(Default)]
pub struct Registry {
    next_id: u32,
    drawables: HashMap<DrawableId, Box<dyn Drawable>>,
}

impl Registry {
    /// Creates a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a drawable and returns its handle.
    ///
    /// Returns an error if a drawable with the same type and name already exists.
    pub fn register(&mut self, drawable: Box<dyn Drawable>) -> Result<DrawableId> {
        if self.find(drawable.type_name(), drawable.name()).is_some() {
            return Err(CaloError::DrawableExists(format!(
                "{}:{}",
                drawable.type_name(),
                drawable.name()
            )));
        }

        let id = DrawableId(self.next_id);
        self.next_id += 1;
        self.drawables.insert(id, drawable);
        Ok(id)
    }

    /// Gets a reference to a drawable by handle.
    pub fn get(&self, id: DrawableId) -> Option<&dyn Drawable> {
        self.drawables.get(&id).map(|d| d.as_ref())
    }

    /// Gets a mutable reference to a drawable by handle.
    pub fn get_mut(&mut self, id: DrawableId) -> Option<&mut Box<dyn Drawable>> {
        self.drawables.get_mut(&id)
    }

    /// Gets a drawable downcast to its concrete type.
    pub fn get_as<T: Drawable>(&self, id: DrawableId) -> Option<&T> {
        self.get(id)?.as_any().downcast_ref::<T>()
    }

    /// Gets a mutable drawable downcast to its concrete type.
    pub fn get_as_mut<T: Drawable>(&mut self, id: DrawableId) -> Option<&mut T> {
        self.drawables
            .get_mut(&id)?
            .as_any_mut()
            .downcast_mut::<T>()
    }

    /// Finds a drawable handle by type and name.
    pub fn find(&self, type_name: &str, name: &str) -> Option<DrawableId> {
        self.drawables
            .iter()
            .find(|(_, d)| d.type_name() == type_name && d.name() == name)
            .map(|(id, _)| *id)
    }

    /// Checks if a handle is registered.
    pub fn contains(&self, id: DrawableId) -> bool {
        self.drawables.contains_key(&id)
    }

    /// Removes a drawable by handle.
    pub fn remove(&mut self, id: DrawableId) -> Option<Box<dyn Drawable>> {
        self.drawables.remove(&id)
    }

    /// Returns the number of registered drawables.
    pub fn len(&self) -> usize {
        self.drawables.len()
    }

    /// Returns true if the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.drawables.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::drawable::Surface;
    use std::any::Any;

    struct Marker(&'static str);

    impl Drawable for Marker {
        fn as_any(&self) -> &dyn Any {
            self
        }
        fn as_any_mut(&mut self) -> &mut dyn Any {
            self
        }
        fn name(&self) -> &str {
            self.0
        }
        fn type_name(&self) -> &'static str {
            "Marker"
        }
        fn render(&self, _surface: &mut dyn Surface) -> Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_register_assigns_distinct_ids() {
        let mut registry = Registry::new();
        let a = registry.register(Box::new(Marker("a"))).unwrap();
        let b = registry.register(Box::new(Marker("b"))).unwrap();
        assert_ne!(a, b);
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.get(a).unwrap().name(), "a");
    }

    #[test]
    fn test_register_duplicate_name_fails() {
        let mut registry = Registry::new();
        registry.register(Box::new(Marker("a"))).unwrap();
        let err = registry.register(Box::new(Marker("a"))).unwrap_err();
        assert!(matches!(err, CaloError::DrawableExists(_)));
    }

    #[test]
    fn test_downcast() {
        let mut registry = Registry::new();
        let id = registry.register(Box::new(Marker("a"))).unwrap();
        assert!(registry.get_as::<Marker>(id).is_some());
        registry.get_as_mut::<Marker>(id).unwrap().0 = "renamed";
        assert_eq!(registry.find("Marker", "renamed"), Some(id));
    }

    #[test]
    fn test_ids_not_reused_after_remove() {
        let mut registry = Registry::new();
        let a = registry.register(Box::new(Marker("a"))).unwrap();
        registry.remove(a);
        let b = registry.register(Box::new(Marker("a"))).unwrap();
        assert_ne!(a, b);
        assert!(!registry.contains(a));
    }
}
