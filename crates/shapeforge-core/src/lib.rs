//! ShapeForge Core Library
//!
//! Platform-agnostic core of the ShapeForge 3D scene editor: shape
//! descriptors, the shape registry, scene reconciliation, selection and
//! gizmo handling, and GLB export.

pub mod camera;
pub mod editor;
pub mod export;
pub mod gizmo;
pub mod reconcile;
pub mod registry;
pub mod scene;
pub mod selection;
pub mod shapes;

pub use camera::{OrbitCamera, Ray, ScreenPoint};
pub use editor::Editor;
pub use export::{export_glb, save_glb, ExportError, ExportResult, EXPORT_FILE_NAME, GLB_MIME_TYPE};
pub use gizmo::{GizmoAxis, GizmoDrag, GizmoHandle, GizmoMode};
pub use reconcile::{reconcile, ReconcileFailure, ReconcileReport};
pub use registry::{RegistryChange, RegistryError, RegistryResult, RegistryState, ShapeRegistry, SubscriptionId};
pub use scene::{InteractiveScene, LiveObject, LiveScene, SceneBackend, SceneError, SceneResult};
pub use selection::{PointerOutcome, SelectionController, SelectionState};
pub use shapes::{MeshData, MetadataPatch, Rgb, Shape, ShapeId, ShapeKind, ShapeMetadata, Transform};
