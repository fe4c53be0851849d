//! Scene reconciliation: make a scene backend match a shape list.

use std::collections::HashSet;
use std::fmt;

use crate::scene::{SceneBackend, SceneError};
use crate::shapes::{Shape, ShapeId};

/// A shape the backend could not create or update.
#[derive(Debug, Clone, PartialEq)]
pub struct ReconcileFailure {
    pub id: ShapeId,
    pub error: SceneError,
}

impl fmt::Display for ReconcileFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.error)
    }
}

/// What a reconciliation pass did.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReconcileReport {
    pub created: usize,
    pub disposed: usize,
    /// Objects whose attributes were written.
    pub updated: usize,
    pub failures: Vec<ReconcileFailure>,
}

impl ReconcileReport {
    /// True if every shape has an up-to-date live object.
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Synchronize `backend` with `shapes`.
///
/// Objects without a shape are disposed first, then missing objects are
/// created, then every shape's color and transform is written unconditionally.
/// A shape the backend refuses to create is skipped and recorded in the report;
/// the pass carries on with the remaining shapes.
pub fn reconcile<B: SceneBackend + ?Sized>(shapes: &[Shape], backend: &mut B) -> ReconcileReport {
    let mut report = ReconcileReport::default();
    let wanted: HashSet<ShapeId> = shapes.iter().map(Shape::id).collect();

    for id in backend.object_ids() {
        if !wanted.contains(&id) && backend.dispose_object(id) {
            report.disposed += 1;
        }
    }

    for shape in shapes {
        let id = shape.id();
        if !backend.contains(id) {
            if let Err(error) = backend.create_object(id, shape.kind()) {
                log::warn!("Could not create {} {}: {}", shape.kind().as_str(), id, error);
                report.failures.push(ReconcileFailure { id, error });
                continue;
            }
            report.created += 1;
        }

        let written = backend
            .set_color(id, shape.metadata.color)
            .and_then(|()| backend.set_transform(id, &shape.metadata.transform()));
        match written {
            Ok(()) => report.updated += 1,
            Err(error) => report.failures.push(ReconcileFailure { id, error }),
        }
    }

    log::debug!(
        "Reconciled {} shapes: {} created, {} disposed, {} failed",
        shapes.len(),
        report.created,
        report.disposed,
        report.failures.len()
    );
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::{LiveScene, SceneResult};
    use crate::shapes::{MetadataPatch, Rgb, ShapeKind, Transform};
    use glam::Vec3;
    use std::collections::HashMap;

    /// Backend that cannot build cylinders.
    #[derive(Default)]
    struct NoCylinders {
        objects: HashMap<ShapeId, (Rgb, Transform)>,
    }

    impl SceneBackend for NoCylinders {
        fn object_ids(&self) -> Vec<ShapeId> {
            self.objects.keys().copied().collect()
        }

        fn contains(&self, id: ShapeId) -> bool {
            self.objects.contains_key(&id)
        }

        fn create_object(&mut self, id: ShapeId, kind: ShapeKind) -> SceneResult<()> {
            if kind == ShapeKind::Cylinder {
                return Err(SceneError::Unsupported { id, kind });
            }
            self.objects.insert(id, (Rgb::WHITE, Transform::default()));
            Ok(())
        }

        fn dispose_object(&mut self, id: ShapeId) -> bool {
            self.objects.remove(&id).is_some()
        }

        fn set_color(&mut self, id: ShapeId, color: Rgb) -> SceneResult<()> {
            let object = self.objects.get_mut(&id).ok_or(SceneError::UnknownObject(id))?;
            object.0 = color;
            Ok(())
        }

        fn set_transform(&mut self, id: ShapeId, transform: &Transform) -> SceneResult<()> {
            let object = self.objects.get_mut(&id).ok_or(SceneError::UnknownObject(id))?;
            object.1 = *transform;
            Ok(())
        }
    }

    fn ids_match(shapes: &[Shape], scene: &LiveScene) -> bool {
        let mut expected: Vec<_> = shapes.iter().map(Shape::id).collect();
        let mut live = scene.object_ids();
        expected.sort();
        live.sort();
        expected == live
    }

    #[test]
    fn test_creates_missing_objects() {
        let shapes = vec![Shape::new(ShapeKind::Box), Shape::new(ShapeKind::Sphere)];
        let mut scene = LiveScene::new();

        let report = reconcile(&shapes, &mut scene);

        assert_eq!(report.created, 2);
        assert_eq!(report.updated, 2);
        assert!(report.is_clean());
        assert!(ids_match(&shapes, &scene));
    }

    #[test]
    fn test_add_remove_sequence_keeps_ids_in_step() {
        let mut scene = LiveScene::new();
        let mut shapes = Vec::new();
        for kind in [ShapeKind::Box, ShapeKind::Cylinder, ShapeKind::Sphere, ShapeKind::Box] {
            shapes.push(Shape::new(kind));
            reconcile(&shapes, &mut scene);
            assert!(ids_match(&shapes, &scene));
        }

        shapes.remove(1);
        let report = reconcile(&shapes, &mut scene);
        assert_eq!(report.disposed, 1);
        assert_eq!(report.created, 0);
        assert!(ids_match(&shapes, &scene));

        shapes.clear();
        reconcile(&shapes, &mut scene);
        assert!(scene.is_empty());
    }

    #[test]
    fn test_default_box_at_origin() {
        let shapes = vec![Shape::new(ShapeKind::Box)];
        let mut scene = LiveScene::new();
        reconcile(&shapes, &mut scene);

        let object = scene.get(shapes[0].id()).unwrap();
        assert_eq!(object.transform.position, Vec3::ZERO);
        assert_eq!(object.transform.scaling, Vec3::ONE);
        assert_eq!(object.material.diffuse, Rgb::WHITE);
    }

    #[test]
    fn test_color_update_touches_only_material() {
        let mut shapes = vec![Shape::new(ShapeKind::Sphere)];
        let mut scene = LiveScene::new();
        reconcile(&shapes, &mut scene);
        let before = scene.get(shapes[0].id()).unwrap().clone();

        let red = Rgb::new(255, 0, 0);
        MetadataPatch::color(red).apply(&mut shapes[0].metadata);
        let report = reconcile(&shapes, &mut scene);

        let after = scene.get(shapes[0].id()).unwrap();
        assert_eq!(report.created, 0);
        assert_eq!(after.material.diffuse, red);
        assert_eq!(after.transform, before.transform);
        assert_eq!(after.kind, before.kind);
    }

    #[test]
    fn test_attributes_overwritten() {
        let mut shapes = vec![Shape::new(ShapeKind::Box)];
        let mut scene = LiveScene::new();
        reconcile(&shapes, &mut scene);

        // Drift in the live object is reset from the shape
        let id = shapes[0].id();
        scene.set_color(id, Rgb::BLACK).unwrap();
        MetadataPatch::position(Vec3::new(1.0, 2.0, 3.0)).apply(&mut shapes[0].metadata);
        reconcile(&shapes, &mut scene);

        let object = scene.get(id).unwrap();
        assert_eq!(object.material.diffuse, Rgb::WHITE);
        assert_eq!(object.transform.position, Vec3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn test_creation_failure_is_reported_and_skipped() {
        let shapes = vec![
            Shape::new(ShapeKind::Box),
            Shape::new(ShapeKind::Cylinder),
            Shape::new(ShapeKind::Sphere),
        ];
        let mut backend = NoCylinders::default();

        let report = reconcile(&shapes, &mut backend);

        assert_eq!(report.created, 2);
        assert_eq!(report.updated, 2);
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].id, shapes[1].id());
        assert!(matches!(report.failures[0].error, SceneError::Unsupported { .. }));
        assert!(!backend.contains(shapes[1].id()));
        assert!(backend.contains(shapes[2].id()));
    }

    #[test]
    fn test_empty_pass_is_clean() {
        let mut scene = LiveScene::new();
        let report = reconcile(&[], &mut scene);
        assert_eq!(report, ReconcileReport::default());
    }
}
