//! In-process live scene: objects, camera, light and gizmo attachment.

use std::collections::HashMap;
use std::sync::Arc;

use glam::{Mat4, Vec3};
use kurbo::Point;

use super::pick::intersect_primitive;
use super::{InteractiveScene, SceneBackend, SceneError, SceneResult};
use crate::camera::OrbitCamera;
use crate::gizmo::{GizmoAxis, GizmoHandle, GizmoMode, GIZMO_SCALE};
use crate::shapes::{MeshData, Rgb, ShapeId, ShapeKind, Transform};

/// Objects whose world matrix is closer to singular than this are not pickable.
const MIN_PICK_DETERMINANT: f32 = 1e-9;

/// Surface appearance of one object.
#[derive(Debug, Clone, PartialEq)]
pub struct Material {
    pub name: String,
    pub diffuse: Rgb,
}

impl Material {
    /// A fresh white material owned by the object `id`.
    pub fn for_object(id: ShapeId) -> Self {
        Self {
            name: format!("{id}-material"),
            diffuse: Rgb::WHITE,
        }
    }
}

/// Sky/ground light. Surfaces facing `direction` get the full diffuse color,
/// surfaces facing away fade towards `ground_color`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HemisphericLight {
    pub direction: Vec3,
    pub intensity: f32,
    pub ground_color: Rgb,
}

impl Default for HemisphericLight {
    fn default() -> Self {
        Self {
            direction: Vec3::Y,
            intensity: 1.0,
            ground_color: Rgb::BLACK,
        }
    }
}

impl HemisphericLight {
    /// Lit color (normalized sRGB) of a surface with world normal `normal`.
    pub fn shade(&self, normal: Vec3, diffuse: Rgb) -> [f32; 3] {
        let weight = 0.5 + 0.5 * normal.normalize_or_zero().dot(self.direction.normalize_or_zero());
        let sky = diffuse.to_srgb_f32();
        let ground = self.ground_color.to_srgb_f32();
        std::array::from_fn(|i| {
            let c = ground[i] + (sky[i] - ground[i]) * weight;
            (c * self.intensity).clamp(0.0, 1.0)
        })
    }
}

/// A live object created from a shape.
#[derive(Debug, Clone)]
pub struct LiveObject {
    pub id: ShapeId,
    pub kind: ShapeKind,
    pub mesh: Arc<MeshData>,
    pub material: Material,
    pub transform: Transform,
}

impl LiveObject {
    pub fn world_matrix(&self) -> Mat4 {
        self.transform.matrix()
    }
}

/// The scene the editor renders and exports.
#[derive(Debug, Default)]
pub struct LiveScene {
    objects: HashMap<ShapeId, LiveObject>,
    /// Creation order, used for stable drawing and export order.
    order: Vec<ShapeId>,
    /// One shared mesh per kind.
    meshes: HashMap<ShapeKind, Arc<MeshData>>,
    pub camera: OrbitCamera,
    pub light: HemisphericLight,
    gizmo_target: Option<ShapeId>,
    gizmo_mode: GizmoMode,
    active_handle: Option<GizmoAxis>,
}

impl LiveScene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a scene sized to the given viewport.
    pub fn with_viewport(width: f64, height: f64) -> Self {
        let mut scene = Self::new();
        scene.camera.set_viewport(width, height);
        scene
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn get(&self, id: ShapeId) -> Option<&LiveObject> {
        self.objects.get(&id)
    }

    /// Objects in creation order.
    pub fn objects(&self) -> impl Iterator<Item = &LiveObject> {
        self.order.iter().filter_map(|id| self.objects.get(id))
    }

    pub fn set_gizmo_mode(&mut self, mode: GizmoMode) {
        self.gizmo_mode = mode;
    }

    pub fn active_handle(&self) -> Option<GizmoAxis> {
        self.active_handle
    }

    /// Dispose every object and detach the gizmo. Returns how many objects were released.
    pub fn dispose_all(&mut self) -> usize {
        let released = self.order.len();
        self.objects.clear();
        self.order.clear();
        self.meshes.clear();
        self.gizmo_target = None;
        self.active_handle = None;
        released
    }

    fn object_mut(&mut self, id: ShapeId) -> SceneResult<&mut LiveObject> {
        self.objects.get_mut(&id).ok_or(SceneError::UnknownObject(id))
    }
}

impl SceneBackend for LiveScene {
    fn object_ids(&self) -> Vec<ShapeId> {
        self.order.clone()
    }

    fn contains(&self, id: ShapeId) -> bool {
        self.objects.contains_key(&id)
    }

    fn create_object(&mut self, id: ShapeId, kind: ShapeKind) -> SceneResult<()> {
        if self.objects.contains_key(&id) {
            return Err(SceneError::AlreadyExists(id));
        }
        let mesh = Arc::clone(
            self.meshes
                .entry(kind)
                .or_insert_with(|| Arc::new(MeshData::for_kind(kind))),
        );
        self.objects.insert(
            id,
            LiveObject {
                id,
                kind,
                mesh,
                material: Material::for_object(id),
                transform: Transform::default(),
            },
        );
        self.order.push(id);
        Ok(())
    }

    fn dispose_object(&mut self, id: ShapeId) -> bool {
        if self.objects.remove(&id).is_none() {
            return false;
        }
        self.order.retain(|&other| other != id);
        if self.gizmo_target == Some(id) {
            self.gizmo_target = None;
            self.active_handle = None;
        }
        true
    }

    fn set_color(&mut self, id: ShapeId, color: Rgb) -> SceneResult<()> {
        self.object_mut(id)?.material.diffuse = color;
        Ok(())
    }

    fn set_transform(&mut self, id: ShapeId, transform: &Transform) -> SceneResult<()> {
        self.object_mut(id)?.transform = *transform;
        Ok(())
    }
}

impl InteractiveScene for LiveScene {
    fn pick(&self, screen: Point) -> Option<ShapeId> {
        let ray = self.camera.screen_ray(screen);
        self.objects()
            .filter_map(|object| {
                // A zero scale axis flattens the object; it has no inverse to pick through
                let matrix = object.world_matrix();
                let determinant = matrix.determinant();
                if !determinant.is_finite() || determinant.abs() < MIN_PICK_DETERMINANT {
                    return None;
                }
                let local = ray.transformed(&matrix.inverse());
                intersect_primitive(object.kind, &local).map(|t| (object.id, t))
            })
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(id, _)| id)
    }

    fn attach_gizmo(&mut self, target: Option<ShapeId>) -> bool {
        self.active_handle = None;
        match target {
            Some(id) if self.objects.contains_key(&id) => {
                self.gizmo_target = Some(id);
                true
            }
            Some(_) => {
                self.gizmo_target = None;
                false
            }
            None => {
                self.gizmo_target = None;
                true
            }
        }
    }

    fn gizmo_target(&self) -> Option<ShapeId> {
        self.gizmo_target
    }

    fn gizmo_mode(&self) -> GizmoMode {
        self.gizmo_mode
    }

    fn gizmo_handles(&self) -> Vec<GizmoHandle> {
        let Some(object) = self.gizmo_target.and_then(|id| self.objects.get(&id)) else {
            return Vec::new();
        };
        let position = object.transform.position;
        let world_length = self.camera.eye().distance(position) * GIZMO_SCALE;
        let Some(origin) = self.camera.world_to_screen(position) else {
            return Vec::new();
        };
        GizmoAxis::ALL
            .into_iter()
            .filter_map(|axis| {
                let tip = self.camera.world_to_screen(position + axis.unit() * world_length)?;
                Some(GizmoHandle {
                    axis,
                    origin: origin.position,
                    tip: tip.position,
                    world_length,
                })
            })
            .collect()
    }

    fn set_active_handle(&mut self, axis: Option<GizmoAxis>) {
        self.active_handle = axis;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn scene_with_box() -> (LiveScene, ShapeId) {
        let mut scene = LiveScene::with_viewport(800.0, 600.0);
        let id = Uuid::new_v4();
        scene.create_object(id, ShapeKind::Box).unwrap();
        (scene, id)
    }

    #[test]
    fn test_create_object_defaults() {
        let (scene, id) = scene_with_box();
        let object = scene.get(id).unwrap();
        assert_eq!(object.transform, Transform::default());
        assert_eq!(object.material.diffuse, Rgb::WHITE);
        assert_eq!(object.material.name, format!("{id}-material"));
    }

    #[test]
    fn test_create_twice_fails() {
        let (mut scene, id) = scene_with_box();
        assert_eq!(scene.create_object(id, ShapeKind::Sphere), Err(SceneError::AlreadyExists(id)));
    }

    #[test]
    fn test_meshes_shared_per_kind() {
        let (mut scene, first) = scene_with_box();
        let second = Uuid::new_v4();
        scene.create_object(second, ShapeKind::Box).unwrap();
        assert!(Arc::ptr_eq(&scene.get(first).unwrap().mesh, &scene.get(second).unwrap().mesh));
    }

    #[test]
    fn test_update_unknown_object() {
        let mut scene = LiveScene::new();
        let id = Uuid::new_v4();
        assert_eq!(scene.set_color(id, Rgb::BLACK), Err(SceneError::UnknownObject(id)));
    }

    #[test]
    fn test_objects_in_creation_order() {
        let mut scene = LiveScene::new();
        let ids: Vec<_> = (0..4).map(|_| Uuid::new_v4()).collect();
        for id in &ids {
            scene.create_object(*id, ShapeKind::Sphere).unwrap();
        }
        scene.dispose_object(ids[1]);
        let order: Vec<_> = scene.objects().map(|o| o.id).collect();
        assert_eq!(order, vec![ids[0], ids[2], ids[3]]);
    }

    #[test]
    fn test_pick_center_and_empty_space() {
        let (scene, id) = scene_with_box();
        assert_eq!(scene.pick(Point::new(400.0, 300.0)), Some(id));
        assert_eq!(scene.pick(Point::new(5.0, 5.0)), None);
    }

    #[test]
    fn test_pick_skips_flattened_object() {
        let (mut scene, id) = scene_with_box();
        let flat = Transform {
            scaling: Vec3::new(1.0, 0.0, 1.0),
            ..Default::default()
        };
        scene.set_transform(id, &flat).unwrap();
        assert_eq!(scene.pick(Point::new(5.0, 5.0)), None);
        assert_eq!(scene.pick(Point::new(400.0, 300.0)), None);

        // A second, regular box behind it is still pickable
        let other = Uuid::new_v4();
        scene.create_object(other, ShapeKind::Box).unwrap();
        assert_eq!(scene.pick(Point::new(400.0, 300.0)), Some(other));
    }

    #[test]
    fn test_pick_respects_transform() {
        let (mut scene, id) = scene_with_box();
        let moved = Transform {
            position: Vec3::new(0.0, 0.0, 3.0),
            ..Default::default()
        };
        scene.set_transform(id, &moved).unwrap();
        assert_eq!(scene.pick(Point::new(400.0, 300.0)), None);
        let screen = scene.camera.world_to_screen(moved.position).unwrap();
        assert_eq!(scene.pick(screen.position), Some(id));
    }

    #[test]
    fn test_pick_nearest_of_overlapping() {
        let (mut scene, far) = scene_with_box();
        let near = Uuid::new_v4();
        scene.create_object(near, ShapeKind::Sphere).unwrap();
        // Move the sphere towards the camera, along the view line
        let toward_eye = scene.camera.eye().normalize() * 2.0;
        scene
            .set_transform(near, &Transform { position: toward_eye, ..Default::default() })
            .unwrap();
        assert_eq!(scene.pick(Point::new(400.0, 300.0)), Some(near));
        assert!(scene.contains(far));
    }

    #[test]
    fn test_gizmo_attachment_is_exclusive() {
        let (mut scene, first) = scene_with_box();
        let second = Uuid::new_v4();
        scene.create_object(second, ShapeKind::Cylinder).unwrap();

        assert!(scene.attach_gizmo(Some(first)));
        assert!(scene.attach_gizmo(Some(second)));
        assert_eq!(scene.gizmo_target(), Some(second));

        assert!(!scene.attach_gizmo(Some(Uuid::new_v4())));
        assert_eq!(scene.gizmo_target(), None);
    }

    #[test]
    fn test_dispose_detaches_gizmo() {
        let (mut scene, id) = scene_with_box();
        scene.attach_gizmo(Some(id));
        assert!(scene.dispose_object(id));
        assert_eq!(scene.gizmo_target(), None);
        assert!(!scene.dispose_object(id));
    }

    #[test]
    fn test_gizmo_handles() {
        let (mut scene, id) = scene_with_box();
        assert!(scene.gizmo_handles().is_empty());
        scene.attach_gizmo(Some(id));
        let handles = scene.gizmo_handles();
        assert_eq!(handles.len(), 3);
        for handle in &handles {
            assert!((handle.origin.x - 400.0).abs() < 1e-3);
            assert!((handle.world_length - 1.5).abs() < 1e-4);
        }
        // +Y points up the screen
        let y = handles.iter().find(|h| h.axis == GizmoAxis::Y).unwrap();
        assert!(y.tip.y < y.origin.y);
    }

    #[test]
    fn test_dispose_all() {
        let (mut scene, id) = scene_with_box();
        scene.attach_gizmo(Some(id));
        assert_eq!(scene.dispose_all(), 1);
        assert!(scene.is_empty());
        assert_eq!(scene.gizmo_target(), None);
    }

    #[test]
    fn test_hemispheric_shading() {
        let light = HemisphericLight::default();
        let up = light.shade(Vec3::Y, Rgb::new(255, 0, 0));
        assert!((up[0] - 1.0).abs() < 1e-6);
        let side = light.shade(Vec3::X, Rgb::new(255, 0, 0));
        assert!((side[0] - 0.5).abs() < 1e-6);
        let down = light.shade(Vec3::NEG_Y, Rgb::new(255, 0, 0));
        assert!(down[0].abs() < 1e-6);
    }
}
