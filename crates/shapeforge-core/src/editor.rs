//! Editor: wires the registry, the live scene and the selection controller.
//!
//! The registry is the source of truth. Mounting a scene subscribes a
//! reconciler to it, so every registry change is reflected in the scene
//! before the mutating call returns. The app only talks to [`Editor`].

use std::cell::{Ref, RefCell};
use std::rc::Rc;

use kurbo::Point;

use crate::export::{self, ExportResult};
use crate::gizmo::GizmoMode;
use crate::reconcile::{reconcile, ReconcileReport};
use crate::registry::{RegistryChange, RegistryResult, RegistryState, ShapeRegistry, SubscriptionId};
use crate::scene::{InteractiveScene, LiveScene};
use crate::selection::{PointerOutcome, SelectionController, SelectionState};
use crate::shapes::{MetadataPatch, Rgb, Shape, ShapeId, ShapeKind};

type Notices = Rc<RefCell<Vec<String>>>;

struct MountedScene {
    scene: Rc<RefCell<LiveScene>>,
    subscription: SubscriptionId,
}

/// The editor state and its commands.
#[derive(Default)]
pub struct Editor {
    registry: ShapeRegistry,
    mounted: Option<MountedScene>,
    selection: SelectionController,
    gizmo_mode: GizmoMode,
    notices: Notices,
}

impl Editor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a scene. Any previously mounted scene is unmounted first.
    pub fn mount(&mut self, mut scene: LiveScene) {
        if self.mounted.is_some() {
            self.unmount();
        }

        scene.set_gizmo_mode(self.gizmo_mode);
        let initial = reconcile(self.registry.shapes(), &mut scene);
        record_failures(&self.notices, &initial);
        scene.attach_gizmo(self.registry.selected());

        let scene = Rc::new(RefCell::new(scene));
        let listener_scene = Rc::clone(&scene);
        let notices = Rc::clone(&self.notices);
        let subscription = self.registry.subscribe(move |state, change| {
            reconcile_on_change(&listener_scene, &notices, state, change);
        });

        self.selection.sync(self.registry.selected(), &scene);
        self.mounted = Some(MountedScene { scene, subscription });
        log::info!("Mounted scene with {} shapes", self.registry.len());
    }

    /// Detach the scene, releasing every live object.
    /// Returns how many objects were released.
    pub fn unmount(&mut self) -> usize {
        let Some(mounted) = self.mounted.take() else {
            return 0;
        };
        self.registry.unsubscribe(mounted.subscription);
        self.selection.reset();
        let mut scene = mounted.scene.borrow_mut();
        scene.attach_gizmo(None);
        let released = scene.dispose_all();
        log::info!("Unmounted scene, released {} objects", released);
        released
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted.is_some()
    }

    /// Borrow the mounted scene for reading.
    ///
    /// Returns `None` when nothing is mounted or the scene is being updated.
    pub fn scene(&self) -> Option<Ref<'_, LiveScene>> {
        self.mounted.as_ref()?.scene.try_borrow().ok()
    }

    /// Run `f` on the mounted scene, for camera and viewport changes.
    pub fn with_scene_mut<R>(&self, f: impl FnOnce(&mut LiveScene) -> R) -> Option<R> {
        let mounted = self.mounted.as_ref()?;
        let mut scene = mounted.scene.try_borrow_mut().ok()?;
        Some(f(&mut scene))
    }

    pub fn registry(&self) -> &ShapeRegistry {
        &self.registry
    }

    /// Subscribe to registry changes, e.g. to request a redraw.
    pub fn subscribe(&mut self, listener: impl FnMut(&RegistryState, &RegistryChange) + 'static) -> SubscriptionId {
        self.registry.subscribe(listener)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.registry.unsubscribe(id)
    }

    /// Add a default shape of `kind`.
    pub fn add_shape(&mut self, kind: ShapeKind) -> RegistryResult<ShapeId> {
        let shape = Shape::new(kind);
        let id = shape.id();
        self.insert_shape(shape)?;
        Ok(id)
    }

    pub fn insert_shape(&mut self, shape: Shape) -> RegistryResult<()> {
        self.registry.add_shape(shape)
    }

    pub fn update_shape(&mut self, id: ShapeId, patch: &MetadataPatch) -> bool {
        self.registry.update_shape(id, patch)
    }

    /// Recolor the selected shape. Returns false with nothing selected.
    pub fn set_selected_color(&mut self, color: Rgb) -> bool {
        match self.registry.selected() {
            Some(id) => self.registry.update_shape(id, &MetadataPatch::color(color)),
            None => false,
        }
    }

    /// Select a shape from outside the pointer flow, e.g. the scene list.
    pub fn select_shape(&mut self, id: Option<ShapeId>) -> bool {
        let changed = self.registry.select_shape(id);
        self.sync_selection();
        changed
    }

    pub fn remove_shape(&mut self, id: ShapeId) -> Option<Shape> {
        let removed = self.registry.remove_shape(id)?;
        self.sync_selection();
        Some(removed)
    }

    pub fn remove_selected(&mut self) -> Option<Shape> {
        let id = self.registry.selected()?;
        self.remove_shape(id)
    }

    fn sync_selection(&mut self) {
        let selected = self.registry.selected();
        match &self.mounted {
            Some(mounted) => self.selection.sync(selected, &mounted.scene),
            None => self.selection.reset(),
        }
    }

    pub fn selection_state(&self) -> SelectionState {
        self.selection.state()
    }

    pub fn gizmo_mode(&self) -> GizmoMode {
        self.gizmo_mode
    }

    pub fn set_gizmo_mode(&mut self, mode: GizmoMode) {
        self.gizmo_mode = mode;
        self.with_scene_mut(|scene| scene.set_gizmo_mode(mode));
    }

    /// Route a pointer press. `None` when no scene is mounted.
    pub fn pointer_down(&mut self, screen: Point) -> Option<PointerOutcome> {
        let mounted = self.mounted.as_ref()?;
        Some(self.selection.pointer_down(screen, &mut self.registry, &mounted.scene))
    }

    /// Route a pointer move. Returns true if a gizmo drag changed a shape.
    pub fn pointer_move(&mut self, screen: Point) -> bool {
        self.selection.pointer_move(screen, &mut self.registry)
    }

    /// Route a pointer release. Returns true if it ended a gizmo drag.
    pub fn pointer_up(&mut self) -> bool {
        match &self.mounted {
            Some(mounted) => self.selection.pointer_up(&mounted.scene),
            None => false,
        }
    }

    pub fn is_dragging_gizmo(&self) -> bool {
        self.selection.is_dragging()
    }

    /// Resize the mounted scene's viewport.
    pub fn resize(&mut self, width: f64, height: f64) {
        self.with_scene_mut(|scene| scene.camera.set_viewport(width, height));
    }

    /// Export the mounted scene as GLB bytes.
    pub fn export_glb(&self) -> ExportResult<Vec<u8>> {
        export::export_glb(self.scene().as_deref())
    }

    /// Drain recoverable problems to show to the user.
    pub fn take_notices(&mut self) -> Vec<String> {
        std::mem::take(&mut *self.notices.borrow_mut())
    }
}

impl Drop for Editor {
    fn drop(&mut self) {
        self.unmount();
    }
}

fn reconcile_on_change(scene: &RefCell<LiveScene>, notices: &Notices, state: &RegistryState, change: &RegistryChange) {
    // Selection changes leave the object set and attributes untouched
    if matches!(change, RegistryChange::SelectionChanged { .. }) {
        return;
    }
    match scene.try_borrow_mut() {
        Ok(mut scene) => {
            let report = reconcile(state.shapes(), &mut *scene);
            record_failures(notices, &report);
        }
        Err(_) => log::error!("Scene busy, skipped reconciling {:?}", change),
    }
}

fn record_failures(notices: &Notices, report: &ReconcileReport) {
    if report.is_clean() {
        return;
    }
    let mut notices = notices.borrow_mut();
    for failure in &report.failures {
        notices.push(failure.to_string());
    }
}
