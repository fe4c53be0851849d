//! Pointer selection and gizmo drag handling.

use std::cell::RefCell;

use kurbo::Point;

use crate::gizmo::{self, GizmoAxis, GizmoDrag};
use crate::registry::ShapeRegistry;
use crate::scene::InteractiveScene;
use crate::shapes::ShapeId;

/// Selection state as seen by the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectionState {
    #[default]
    Idle,
    Selected(ShapeId),
}

impl SelectionState {
    pub fn selected(self) -> Option<ShapeId> {
        match self {
            SelectionState::Idle => None,
            SelectionState::Selected(id) => Some(id),
        }
    }
}

impl From<Option<ShapeId>> for SelectionState {
    fn from(id: Option<ShapeId>) -> Self {
        id.map_or(SelectionState::Idle, SelectionState::Selected)
    }
}

/// Result of a pointer-down.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerOutcome {
    /// A gizmo handle was grabbed; a drag is in progress.
    GizmoGrabbed(GizmoAxis),
    /// An object was hit and is now selected.
    Selected(ShapeId),
    /// Empty space was hit; nothing is selected.
    Cleared,
}

/// Maps pointer events to selection changes and gizmo drags.
///
/// The registry stays authoritative: selection goes through
/// [`ShapeRegistry::select_shape`] and drags through
/// [`ShapeRegistry::update_shape`]. The scene is never borrowed across a
/// registry call, since registry subscribers may need it.
#[derive(Debug, Default)]
pub struct SelectionController {
    state: SelectionState,
    drag: Option<GizmoDrag>,
}

impl SelectionController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> SelectionState {
        self.state
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    pub fn pointer_down<S: InteractiveScene>(
        &mut self,
        screen: Point,
        registry: &mut ShapeRegistry,
        scene: &RefCell<S>,
    ) -> PointerOutcome {
        if let Some(axis) = self.try_grab(screen, registry, scene) {
            return PointerOutcome::GizmoGrabbed(axis);
        }

        let picked = scene.borrow().pick(screen);
        registry.select_shape(picked);
        // Selection may have been rejected; follow whatever the registry holds
        let selected = registry.selected();
        scene.borrow_mut().attach_gizmo(selected);
        self.state = selected.into();
        log::debug!("Pointer down at ({:.0}, {:.0}): {:?}", screen.x, screen.y, self.state);

        match selected {
            Some(id) => PointerOutcome::Selected(id),
            None => PointerOutcome::Cleared,
        }
    }

    /// Grab a handle of the attached gizmo if `screen` is on one.
    fn try_grab<S: InteractiveScene>(
        &mut self,
        screen: Point,
        registry: &ShapeRegistry,
        scene: &RefCell<S>,
    ) -> Option<GizmoAxis> {
        let SelectionState::Selected(target) = self.state else {
            return None;
        };
        let (mode, handles) = {
            let scene = scene.borrow();
            if scene.gizmo_target() != Some(target) {
                return None;
            }
            (scene.gizmo_mode(), scene.gizmo_handles())
        };
        let axis = gizmo::hit_test(&handles, screen)?;
        let handle = handles.iter().find(|handle| handle.axis == axis)?;
        let start = registry.get(target)?.metadata;
        let drag = GizmoDrag::begin(target, mode, handle, screen, start)?;

        self.drag = Some(drag);
        scene.borrow_mut().set_active_handle(Some(axis));
        log::debug!("Grabbed {:?} handle in {} mode", axis, mode.name());
        Some(axis)
    }

    /// Apply the current drag. Returns true if the shape changed.
    pub fn pointer_move(&mut self, screen: Point, registry: &mut ShapeRegistry) -> bool {
        let Some(drag) = self.drag else {
            return false;
        };
        registry.update_shape(drag.target, &drag.patch(screen))
    }

    /// End the current drag. Returns true if one was in progress.
    pub fn pointer_up<S: InteractiveScene>(&mut self, scene: &RefCell<S>) -> bool {
        if self.drag.take().is_none() {
            return false;
        }
        scene.borrow_mut().set_active_handle(None);
        true
    }

    /// Follow a selection change made outside the pointer flow, such as a removal.
    pub fn sync<S: InteractiveScene>(&mut self, selected: Option<ShapeId>, scene: &RefCell<S>) {
        let state = SelectionState::from(selected);
        if state == self.state {
            return;
        }
        if self.drag.is_some_and(|drag| Some(drag.target) != selected) {
            self.drag = None;
        }
        self.state = state;
        scene.borrow_mut().attach_gizmo(selected);
    }

    /// Forget the selection and any drag without touching the scene.
    pub fn reset(&mut self) {
        self.state = SelectionState::Idle;
        self.drag = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reconcile::reconcile;
    use crate::scene::{LiveScene, SceneBackend};
    use crate::shapes::{Shape, ShapeKind};
    use glam::Vec3;

    const CENTER: Point = Point::new(400.0, 300.0);

    fn setup(kinds: &[ShapeKind]) -> (ShapeRegistry, RefCell<LiveScene>, Vec<ShapeId>) {
        let mut registry = ShapeRegistry::new();
        let mut ids = Vec::new();
        for kind in kinds {
            let shape = Shape::new(*kind);
            ids.push(shape.id());
            registry.add_shape(shape).unwrap();
        }
        let mut scene = LiveScene::with_viewport(800.0, 600.0);
        reconcile(registry.shapes(), &mut scene);
        (registry, RefCell::new(scene), ids)
    }

    fn move_to(registry: &mut ShapeRegistry, scene: &RefCell<LiveScene>, id: ShapeId, position: Vec3) {
        registry.update_shape(id, &crate::shapes::MetadataPatch::position(position));
        reconcile(registry.shapes(), &mut *scene.borrow_mut());
    }

    #[test]
    fn test_click_object_selects_and_attaches() {
        let (mut registry, scene, ids) = setup(&[ShapeKind::Box]);
        let mut controller = SelectionController::new();

        let outcome = controller.pointer_down(CENTER, &mut registry, &scene);

        assert_eq!(outcome, PointerOutcome::Selected(ids[0]));
        assert_eq!(controller.state(), SelectionState::Selected(ids[0]));
        assert_eq!(registry.selected(), Some(ids[0]));
        assert_eq!(scene.borrow().gizmo_target(), Some(ids[0]));
    }

    #[test]
    fn test_click_empty_space_clears() {
        let (mut registry, scene, _) = setup(&[ShapeKind::Box]);
        let mut controller = SelectionController::new();
        controller.pointer_down(CENTER, &mut registry, &scene);

        let outcome = controller.pointer_down(Point::new(5.0, 5.0), &mut registry, &scene);

        assert_eq!(outcome, PointerOutcome::Cleared);
        assert_eq!(controller.state(), SelectionState::Idle);
        assert_eq!(registry.selected(), None);
        assert_eq!(scene.borrow().gizmo_target(), None);
    }

    #[test]
    fn test_switching_selection_moves_gizmo() {
        let (mut registry, scene, ids) = setup(&[ShapeKind::Box, ShapeKind::Sphere]);
        move_to(&mut registry, &scene, ids[1], Vec3::new(3.0, 0.0, 0.0));
        let mut controller = SelectionController::new();

        controller.pointer_down(CENTER, &mut registry, &scene);
        assert_eq!(scene.borrow().gizmo_target(), Some(ids[0]));

        let sphere = scene.borrow().camera.world_to_screen(Vec3::new(3.0, 0.0, 0.0)).unwrap();
        controller.pointer_down(sphere.position, &mut registry, &scene);

        assert_eq!(registry.selected(), Some(ids[1]));
        assert_eq!(scene.borrow().gizmo_target(), Some(ids[1]));
    }

    #[test]
    fn test_gizmo_drag_moves_shape() {
        let (mut registry, scene, ids) = setup(&[ShapeKind::Box]);
        let mut controller = SelectionController::new();
        controller.pointer_down(CENTER, &mut registry, &scene);

        let handle = scene
            .borrow()
            .gizmo_handles()
            .into_iter()
            .find(|handle| handle.axis == GizmoAxis::Y)
            .unwrap();
        // Grab the Y handle near its tip, where the box does not cover it
        let grab = handle.origin + (handle.tip - handle.origin) * 0.9;
        let outcome = controller.pointer_down(grab, &mut registry, &scene);
        assert_eq!(outcome, PointerOutcome::GizmoGrabbed(GizmoAxis::Y));
        assert!(controller.is_dragging());
        assert_eq!(scene.borrow().active_handle(), Some(GizmoAxis::Y));

        // Drag one full handle length up the screen
        let target = grab + (handle.tip - handle.origin);
        assert!(controller.pointer_move(target, &mut registry));
        let position = registry.get(ids[0]).unwrap().metadata.position;
        assert!((position.y - handle.world_length).abs() < 1e-3);
        assert!(position.x.abs() < 1e-6);

        assert!(controller.pointer_up(&scene));
        assert!(!controller.is_dragging());
        assert_eq!(scene.borrow().active_handle(), None);
        // Selection survives the drag
        assert_eq!(registry.selected(), Some(ids[0]));
    }

    #[test]
    fn test_move_without_drag_does_nothing() {
        let (mut registry, scene, _) = setup(&[ShapeKind::Box]);
        let mut controller = SelectionController::new();
        assert!(!controller.pointer_move(CENTER, &mut registry));
        assert!(!controller.pointer_up(&scene));
    }

    #[test]
    fn test_sync_after_removal() {
        let (mut registry, scene, ids) = setup(&[ShapeKind::Box]);
        let mut controller = SelectionController::new();
        controller.pointer_down(CENTER, &mut registry, &scene);

        registry.remove_shape(ids[0]);
        reconcile(registry.shapes(), &mut *scene.borrow_mut());
        controller.sync(registry.selected(), &scene);

        assert_eq!(controller.state(), SelectionState::Idle);
        assert_eq!(scene.borrow().gizmo_target(), None);
        assert!(!scene.borrow().contains(ids[0]));
    }
}
