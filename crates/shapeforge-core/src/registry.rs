//! Shape registry: the authoritative editor state.
//!
//! Holds the ordered shape list and the current selection. Every state change
//! synchronously notifies all subscribers, in subscription order, before the
//! mutating call returns.

use std::fmt;

use thiserror::Error;

use crate::shapes::{MetadataPatch, Shape, ShapeId};

/// Registry errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("Shape {0} already exists")]
    DuplicateId(ShapeId),
}

/// Result type for registry operations.
pub type RegistryResult<T> = Result<T, RegistryError>;

/// What a notification is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistryChange {
    Added(ShapeId),
    Updated(ShapeId),
    /// The shape was removed. If it was selected, the selection is already cleared.
    Removed(ShapeId),
    SelectionChanged {
        previous: Option<ShapeId>,
        current: Option<ShapeId>,
    },
}

/// Snapshot handed to subscribers.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RegistryState {
    shapes: Vec<Shape>,
    selected: Option<ShapeId>,
}

impl RegistryState {
    /// Shapes in insertion order.
    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    /// The selected shape id. Always refers to an existing shape.
    pub fn selected(&self) -> Option<ShapeId> {
        self.selected
    }

    pub fn get(&self, id: ShapeId) -> Option<&Shape> {
        self.shapes.iter().find(|shape| shape.id() == id)
    }

    pub fn selected_shape(&self) -> Option<&Shape> {
        self.selected.and_then(|id| self.get(id))
    }

    pub fn contains(&self, id: ShapeId) -> bool {
        self.get(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    fn position(&self, id: ShapeId) -> Option<usize> {
        self.shapes.iter().position(|shape| shape.id() == id)
    }
}

/// Handle returned by [`ShapeRegistry::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Box<dyn FnMut(&RegistryState, &RegistryChange)>;

/// The shape store.
#[derive(Default)]
pub struct ShapeRegistry {
    state: RegistryState,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_subscription: u64,
}

impl fmt::Debug for ShapeRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ShapeRegistry")
            .field("state", &self.state)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl ShapeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &RegistryState {
        &self.state
    }

    pub fn shapes(&self) -> &[Shape] {
        self.state.shapes()
    }

    pub fn selected(&self) -> Option<ShapeId> {
        self.state.selected()
    }

    pub fn get(&self, id: ShapeId) -> Option<&Shape> {
        self.state.get(id)
    }

    pub fn selected_shape(&self) -> Option<&Shape> {
        self.state.selected_shape()
    }

    pub fn contains(&self, id: ShapeId) -> bool {
        self.state.contains(id)
    }

    pub fn len(&self) -> usize {
        self.state.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.is_empty()
    }

    /// Append a shape. Fails if a shape with the same id exists.
    pub fn add_shape(&mut self, shape: Shape) -> RegistryResult<()> {
        let id = shape.id();
        if self.state.contains(id) {
            return Err(RegistryError::DuplicateId(id));
        }
        log::debug!("Adding {} {}", shape.kind().as_str(), id);
        self.state.shapes.push(shape);
        self.notify(RegistryChange::Added(id));
        Ok(())
    }

    /// Set the selection. Selecting an unknown id is ignored.
    /// Returns true if the selection changed.
    pub fn select_shape(&mut self, id: Option<ShapeId>) -> bool {
        if let Some(id) = id {
            if !self.state.contains(id) {
                log::debug!("Ignoring selection of unknown shape {}", id);
                return false;
            }
        }
        let previous = self.state.selected;
        if previous == id {
            return false;
        }
        self.state.selected = id;
        self.notify(RegistryChange::SelectionChanged { previous, current: id });
        true
    }

    /// Merge `patch` into a shape's metadata. Unknown ids and patches that
    /// change nothing are ignored. Returns true if the shape changed.
    pub fn update_shape(&mut self, id: ShapeId, patch: &MetadataPatch) -> bool {
        let Some(index) = self.state.position(id) else {
            log::debug!("Ignoring update of unknown shape {}", id);
            return false;
        };
        if !patch.apply(&mut self.state.shapes[index].metadata) {
            return false;
        }
        self.notify(RegistryChange::Updated(id));
        true
    }

    /// Remove a shape, clearing the selection if it pointed at it.
    pub fn remove_shape(&mut self, id: ShapeId) -> Option<Shape> {
        let index = self.state.position(id)?;
        let removed = self.state.shapes.remove(index);
        if self.state.selected == Some(id) {
            self.state.selected = None;
        }
        log::debug!("Removed {} {}", removed.kind().as_str(), id);
        self.notify(RegistryChange::Removed(id));
        Some(removed)
    }

    /// Register a listener called after every state change.
    pub fn subscribe(&mut self, listener: impl FnMut(&RegistryState, &RegistryChange) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Remove a listener. Returns false if it was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(other, _)| *other != id);
        self.listeners.len() != before
    }

    pub fn subscriber_count(&self) -> usize {
        self.listeners.len()
    }

    fn notify(&mut self, change: RegistryChange) {
        for (_, listener) in &mut self.listeners {
            listener(&self.state, &change);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::{Rgb, ShapeKind};
    use glam::Vec3;
    use std::cell::RefCell;
    use std::rc::Rc;
    use uuid::Uuid;

    fn recording(registry: &mut ShapeRegistry) -> Rc<RefCell<Vec<RegistryChange>>> {
        let log = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&log);
        registry.subscribe(move |_, change| sink.borrow_mut().push(*change));
        log
    }

    #[test]
    fn test_add_shape() {
        let mut registry = ShapeRegistry::new();
        let shape = Shape::new(ShapeKind::Box);
        let id = shape.id();

        registry.add_shape(shape).unwrap();

        assert_eq!(registry.len(), 1);
        assert!(registry.contains(id));
    }

    #[test]
    fn test_duplicate_id_rejected() {
        let mut registry = ShapeRegistry::new();
        let id = Uuid::new_v4();
        registry.add_shape(Shape::with_id(id, ShapeKind::Box)).unwrap();

        let result = registry.add_shape(Shape::with_id(id, ShapeKind::Sphere));

        assert_eq!(result, Err(RegistryError::DuplicateId(id)));
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.get(id).unwrap().kind(), ShapeKind::Box);
    }

    #[test]
    fn test_insertion_order() {
        let mut registry = ShapeRegistry::new();
        let kinds = [ShapeKind::Cylinder, ShapeKind::Box, ShapeKind::Sphere];
        for kind in kinds {
            registry.add_shape(Shape::new(kind)).unwrap();
        }
        let listed: Vec<_> = registry.shapes().iter().map(|s| s.kind()).collect();
        assert_eq!(listed, kinds);
    }

    #[test]
    fn test_select_unknown_is_noop() {
        let mut registry = ShapeRegistry::new();
        let log = recording(&mut registry);

        assert!(!registry.select_shape(Some(Uuid::new_v4())));
        assert_eq!(registry.selected(), None);
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn test_select_and_clear() {
        let mut registry = ShapeRegistry::new();
        let shape = Shape::new(ShapeKind::Sphere);
        let id = shape.id();
        registry.add_shape(shape).unwrap();

        assert!(registry.select_shape(Some(id)));
        assert_eq!(registry.selected(), Some(id));
        assert!(!registry.select_shape(Some(id)));

        assert!(registry.select_shape(None));
        assert_eq!(registry.selected(), None);
    }

    #[test]
    fn test_update_merges_fields() {
        let mut registry = ShapeRegistry::new();
        let shape = Shape::new(ShapeKind::Box);
        let id = shape.id();
        registry.add_shape(shape).unwrap();

        assert!(registry.update_shape(id, &MetadataPatch::position(Vec3::new(1.0, 2.0, 3.0))));
        assert!(registry.update_shape(id, &MetadataPatch::color(Rgb::new(0, 0, 255))));

        let metadata = registry.get(id).unwrap().metadata;
        assert_eq!(metadata.position, Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(metadata.color, Rgb::new(0, 0, 255));
        assert_eq!(metadata.scaling, Vec3::ONE);
    }

    #[test]
    fn test_update_unknown_is_noop() {
        let mut registry = ShapeRegistry::new();
        let log = recording(&mut registry);
        assert!(!registry.update_shape(Uuid::new_v4(), &MetadataPatch::color(Rgb::BLACK)));
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn test_remove_selected_clears_selection() {
        let mut registry = ShapeRegistry::new();
        let shape = Shape::new(ShapeKind::Cylinder);
        let id = shape.id();
        registry.add_shape(shape).unwrap();
        registry.select_shape(Some(id));

        let removed = registry.remove_shape(id);

        assert_eq!(removed.map(|s| s.id()), Some(id));
        assert_eq!(registry.selected(), None);
        assert!(registry.is_empty());
    }

    #[test]
    fn test_remove_other_keeps_selection() {
        let mut registry = ShapeRegistry::new();
        let kept = Shape::new(ShapeKind::Box);
        let gone = Shape::new(ShapeKind::Box);
        let (kept_id, gone_id) = (kept.id(), gone.id());
        registry.add_shape(kept).unwrap();
        registry.add_shape(gone).unwrap();
        registry.select_shape(Some(kept_id));

        registry.remove_shape(gone_id);

        assert_eq!(registry.selected(), Some(kept_id));
        assert!(registry.remove_shape(gone_id).is_none());
    }

    #[test]
    fn test_notifications_are_synchronous_and_ordered() {
        let mut registry = ShapeRegistry::new();
        let order = Rc::new(RefCell::new(Vec::new()));
        for tag in ["first", "second"] {
            let order = Rc::clone(&order);
            registry.subscribe(move |state, _| order.borrow_mut().push((tag, state.len())));
        }

        registry.add_shape(Shape::new(ShapeKind::Box)).unwrap();

        // Listeners already ran and saw the new state
        assert_eq!(*order.borrow(), vec![("first", 1), ("second", 1)]);
    }

    #[test]
    fn test_change_kinds() {
        let mut registry = ShapeRegistry::new();
        let log = recording(&mut registry);
        let shape = Shape::new(ShapeKind::Box);
        let id = shape.id();

        registry.add_shape(shape).unwrap();
        registry.select_shape(Some(id));
        registry.update_shape(id, &MetadataPatch::color(Rgb::BLACK));
        registry.remove_shape(id);

        assert_eq!(
            *log.borrow(),
            vec![
                RegistryChange::Added(id),
                RegistryChange::SelectionChanged { previous: None, current: Some(id) },
                RegistryChange::Updated(id),
                RegistryChange::Removed(id),
            ]
        );
    }

    #[test]
    fn test_unsubscribe() {
        let mut registry = ShapeRegistry::new();
        let count = Rc::new(RefCell::new(0));
        let sink = Rc::clone(&count);
        let subscription = registry.subscribe(move |_, _| *sink.borrow_mut() += 1);

        registry.add_shape(Shape::new(ShapeKind::Box)).unwrap();
        assert!(registry.unsubscribe(subscription));
        assert!(!registry.unsubscribe(subscription));
        registry.add_shape(Shape::new(ShapeKind::Box)).unwrap();

        assert_eq!(*count.borrow(), 1);
        assert_eq!(registry.subscriber_count(), 0);
    }
}
