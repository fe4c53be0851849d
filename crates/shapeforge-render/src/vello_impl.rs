//! Vello-based renderer implementation.
//!
//! The 3D scene is drawn as 2D vector geometry: every visible triangle is
//! projected through the camera, flat-shaded with the hemispheric light and
//! painted back to front.

use crate::renderer::{GridStyle, RenderContext, Renderer};
use glam::Vec3;
use kurbo::{Affine, BezPath, Circle, Point, Rect, Shape as KurboShape, Stroke};
use peniko::{Color, Fill};
use shapeforge_core::camera::{OrbitCamera, ScreenPoint};
use shapeforge_core::gizmo::{GizmoHandle, GizmoMode};
use shapeforge_core::scene::{InteractiveScene, LiveScene};
use shapeforge_core::shapes::ShapeId;
use vello::Scene;

/// Half extent of the ground grid in world units.
const GRID_EXTENT: i32 = 10;
const GRID_SPACING: f32 = 1.0;

/// A scene triangle projected to the screen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectedFace {
    pub id: ShapeId,
    pub points: [Point; 3],
    /// Mean view depth of the corners.
    pub depth: f32,
    /// Lit color, normalized sRGB.
    pub color: [f32; 3],
}

/// Project every front-facing triangle of `scene`, sorted back to front.
///
/// Triangles facing away from the eye are culled, and triangles with a corner
/// behind the near plane are dropped whole.
pub fn project_faces(scene: &LiveScene) -> Vec<ProjectedFace> {
    let camera = &scene.camera;
    let eye = camera.eye();
    let mut faces = Vec::new();

    for object in scene.objects() {
        let matrix = object.world_matrix();
        let diffuse = object.material.diffuse;
        for triangle in object.mesh.triangles() {
            let world = triangle.map(|p| matrix.transform_point3(p));
            let normal = (world[1] - world[0]).cross(world[2] - world[0]);
            if normal.dot(eye - world[0]) <= 0.0 {
                continue;
            }
            let Some(projected) = project_triangle(camera, &world) else {
                continue;
            };
            faces.push(ProjectedFace {
                id: object.id,
                points: projected.map(|p| p.position),
                depth: projected.iter().map(|p| p.depth).sum::<f32>() / 3.0,
                color: scene.light.shade(normal, diffuse),
            });
        }
    }

    faces.sort_by(|a, b| b.depth.total_cmp(&a.depth));
    faces
}

fn project_triangle(camera: &OrbitCamera, world: &[Vec3; 3]) -> Option<[ScreenPoint; 3]> {
    Some([
        camera.world_to_screen(world[0])?,
        camera.world_to_screen(world[1])?,
        camera.world_to_screen(world[2])?,
    ])
}

/// Vello-based renderer for the live scene.
pub struct VelloRenderer {
    /// The Vello scene being built.
    scene: Scene,
    /// Gizmo center and active handle color.
    selection_color: Color,
    /// Device pixel ratio, for constant-size strokes.
    scale_factor: f64,
}

impl Default for VelloRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl VelloRenderer {
    /// Create a new Vello renderer.
    pub fn new() -> Self {
        Self {
            scene: Scene::new(),
            selection_color: Color::from_rgba8(250, 204, 21, 255),
            scale_factor: 1.0,
        }
    }

    /// Get the built scene for rendering.
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Take ownership of the scene (resets internal scene).
    pub fn take_scene(&mut self) -> Scene {
        std::mem::take(&mut self.scene)
    }

    fn render_grid(&mut self, scene: &LiveScene, style: GridStyle) {
        let camera = &scene.camera;
        let extent = GRID_EXTENT as f32 * GRID_SPACING;
        let project = |x: f32, z: f32| camera.world_to_screen(Vec3::new(x, 0.0, z)).map(|p| p.position);

        match style {
            GridStyle::None => {}
            GridStyle::Lines => {
                let grid_color = Color::from_rgba8(150, 155, 165, 110);
                let axis_color = Color::from_rgba8(110, 115, 125, 200);
                let mut lines = BezPath::new();
                let mut axes = BezPath::new();
                for i in -GRID_EXTENT..=GRID_EXTENT {
                    let offset = i as f32 * GRID_SPACING;
                    let path = if i == 0 { &mut axes } else { &mut lines };
                    // Along Z, then along X
                    for (start, end) in [
                        (project(offset, -extent), project(offset, extent)),
                        (project(-extent, offset), project(extent, offset)),
                    ] {
                        if let (Some(start), Some(end)) = (start, end) {
                            path.move_to(start);
                            path.line_to(end);
                        }
                    }
                }
                let stroke = Stroke::new(self.scale_factor);
                self.scene.stroke(&stroke, Affine::IDENTITY, grid_color, None, &lines);
                self.scene.stroke(&stroke, Affine::IDENTITY, axis_color, None, &axes);
            }
            GridStyle::Dots => {
                let grid_color = Color::from_rgba8(120, 125, 135, 160);
                let dot_size = 1.5 * self.scale_factor;
                // Batch all dots into a single path
                let mut path = BezPath::new();
                for i in -GRID_EXTENT..=GRID_EXTENT {
                    for j in -GRID_EXTENT..=GRID_EXTENT {
                        let Some(p) = project(i as f32 * GRID_SPACING, j as f32 * GRID_SPACING) else {
                            continue;
                        };
                        let rect = Rect::new(p.x - dot_size, p.y - dot_size, p.x + dot_size, p.y + dot_size);
                        path.extend(rect.path_elements(0.1));
                    }
                }
                self.scene.fill(Fill::NonZero, Affine::IDENTITY, grid_color, None, &path);
            }
        }
    }

    fn render_faces(&mut self, faces: &[ProjectedFace]) {
        // A hairline of the face color hides antialiasing seams between neighbors
        let seam = Stroke::new(0.75);
        for face in faces {
            let [r, g, b] = face.color;
            let color = Color::new([r, g, b, 1.0]);
            let mut path = BezPath::new();
            path.move_to(face.points[0]);
            path.line_to(face.points[1]);
            path.line_to(face.points[2]);
            path.close_path();
            self.scene.fill(Fill::NonZero, Affine::IDENTITY, color, None, &path);
            self.scene.stroke(&seam, Affine::IDENTITY, color, None, &path);
        }
    }

    fn render_gizmo(&mut self, scene: &LiveScene) {
        let handles = scene.gizmo_handles();
        let Some(origin) = handles.first().map(|handle| handle.origin) else {
            return;
        };
        let mode = scene.gizmo_mode();
        let active = scene.active_handle();

        for handle in &handles {
            let is_active = active == Some(handle.axis);
            let color = if is_active {
                self.selection_color
            } else {
                Color::from(handle.axis.color())
            };
            let width = (if is_active { 4.0 } else { 2.5 }) * self.scale_factor;

            let mut shaft = BezPath::new();
            shaft.move_to(handle.origin);
            shaft.line_to(handle.tip);
            self.scene.stroke(&Stroke::new(width), Affine::IDENTITY, color, None, &shaft);
            self.render_handle_end(handle, mode, color, width);
        }

        let center = Circle::new(origin, 4.0 * self.scale_factor);
        self.scene.fill(Fill::NonZero, Affine::IDENTITY, Color::WHITE, None, &center);
        self.scene.stroke(
            &Stroke::new(1.5 * self.scale_factor),
            Affine::IDENTITY,
            self.selection_color,
            None,
            &center,
        );
    }

    /// Arrow for translate, ring for rotate, square for scale.
    fn render_handle_end(&mut self, handle: &GizmoHandle, mode: GizmoMode, color: Color, width: f64) {
        let size = 3.0 * width;
        let tip = handle.tip;
        match mode {
            GizmoMode::Translate => {
                let direction = tip - handle.origin;
                let length = direction.hypot();
                if length < f64::EPSILON {
                    return;
                }
                let along = direction / length;
                let across = kurbo::Vec2::new(-along.y, along.x);
                let mut arrow = BezPath::new();
                arrow.move_to(tip + along * size);
                arrow.line_to(tip + across * (size / 2.0));
                arrow.line_to(tip - across * (size / 2.0));
                arrow.close_path();
                self.scene.fill(Fill::NonZero, Affine::IDENTITY, color, None, &arrow);
            }
            GizmoMode::Rotate => {
                let ring = Circle::new(tip, size / 2.0);
                self.scene.stroke(&Stroke::new(width * 0.75), Affine::IDENTITY, color, None, &ring);
            }
            GizmoMode::Scale => {
                let half = size / 2.0;
                let square = Rect::new(tip.x - half, tip.y - half, tip.x + half, tip.y + half);
                self.scene.fill(Fill::NonZero, Affine::IDENTITY, color, None, &square);
            }
        }
    }
}

impl Renderer for VelloRenderer {
    fn build_scene(&mut self, ctx: &RenderContext) {
        // Clear the scene
        self.scene.reset();
        self.selection_color = ctx.selection_color;
        self.scale_factor = ctx.scale_factor;

        self.render_grid(ctx.scene, ctx.grid_style);

        let faces = project_faces(ctx.scene);
        self.render_faces(&faces);

        // The gizmo always draws on top
        self.render_gizmo(ctx.scene);
    }
}
