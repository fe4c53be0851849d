//! Live scene model and the traits the editor drives it through.
//!
//! [`SceneBackend`] is what the reconciler needs: enumerate, create, dispose
//! and update objects by shape id. [`InteractiveScene`] adds what the
//! selection controller needs: picking and gizmo attachment.

mod live;
mod pick;

pub use live::{HemisphericLight, LiveObject, LiveScene, Material};
pub use pick::intersect_primitive;

use kurbo::Point;
use thiserror::Error;

use crate::gizmo::{GizmoAxis, GizmoHandle, GizmoMode};
use crate::shapes::{Rgb, ShapeId, ShapeKind, Transform};

/// Errors reported by a scene backend.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SceneError {
    #[error("No live object for shape {0}")]
    UnknownObject(ShapeId),
    #[error("Live object already exists for shape {0}")]
    AlreadyExists(ShapeId),
    #[error("Backend cannot create a {kind} for shape {id}")]
    Unsupported { id: ShapeId, kind: ShapeKind },
}

/// Result type for scene operations.
pub type SceneResult<T> = Result<T, SceneError>;

/// Object lifecycle and attribute updates, keyed by shape id.
pub trait SceneBackend {
    /// Ids of all live objects.
    fn object_ids(&self) -> Vec<ShapeId>;

    fn contains(&self, id: ShapeId) -> bool;

    /// Create an object of the given kind at its default size with a fresh material.
    fn create_object(&mut self, id: ShapeId, kind: ShapeKind) -> SceneResult<()>;

    /// Dispose an object and release its resources. Returns false if it did not exist.
    fn dispose_object(&mut self, id: ShapeId) -> bool;

    fn set_color(&mut self, id: ShapeId, color: Rgb) -> SceneResult<()>;

    fn set_transform(&mut self, id: ShapeId, transform: &Transform) -> SceneResult<()>;
}

/// Pointer picking and gizmo attachment.
pub trait InteractiveScene: SceneBackend {
    /// The nearest object under a screen position.
    fn pick(&self, screen: Point) -> Option<ShapeId>;

    /// Attach the gizmo to one object, or detach with `None`.
    /// Attaching to an unknown object detaches and returns false.
    fn attach_gizmo(&mut self, target: Option<ShapeId>) -> bool;

    fn gizmo_target(&self) -> Option<ShapeId>;

    fn gizmo_mode(&self) -> GizmoMode;

    /// Screen-space handles of the attached gizmo, if any.
    fn gizmo_handles(&self) -> Vec<GizmoHandle>;

    /// Highlight the handle being dragged.
    fn set_active_handle(&mut self, axis: Option<GizmoAxis>);
}
