//! Orbit camera for the 3D viewport.

use glam::{Mat4, Vec3, Vec4};
use kurbo::{Point, Size, Vec2};
use serde::{Deserialize, Serialize};

/// Radians of orbit per pixel of pointer drag.
const ORBIT_SENSITIVITY: f32 = 0.01;
/// Keeps beta away from the poles where the up vector degenerates.
const BETA_EPSILON: f32 = 0.01;

/// A ray in world space. `direction` is not required to be normalized.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self { origin, direction }
    }

    /// Point at parameter `t`.
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }

    /// Transform into another space. Parameters along the ray are preserved.
    pub fn transformed(&self, matrix: &Mat4) -> Ray {
        Ray {
            origin: matrix.transform_point3(self.origin),
            direction: matrix.transform_vector3(self.direction),
        }
    }
}

/// A projected point: screen position plus view depth.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenPoint {
    pub position: Point,
    /// Distance along the view direction; larger is farther away.
    pub depth: f32,
}

/// Camera orbiting a target point.
///
/// `alpha` is the longitudinal angle around the Y axis, `beta` the latitude
/// measured from +Y, and `radius` the distance to the target.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrbitCamera {
    pub alpha: f32,
    pub beta: f32,
    pub radius: f32,
    pub target: Vec3,
    /// Vertical field of view in radians.
    pub fov_y: f32,
    pub near: f32,
    pub far: f32,
    pub min_radius: f32,
    pub max_radius: f32,
    /// Viewport size in physical pixels.
    viewport: Size,
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self {
            alpha: 0.0,
            beta: std::f32::consts::FRAC_PI_3,
            radius: 10.0,
            target: Vec3::ZERO,
            fov_y: 0.8,
            near: 0.1,
            far: 1000.0,
            min_radius: 1.0,
            max_radius: 100.0,
            viewport: Size::new(1280.0, 800.0),
        }
    }
}

impl OrbitCamera {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn viewport(&self) -> Size {
        self.viewport
    }

    /// Update the viewport after a resize. Zero-sized viewports are ignored.
    pub fn set_viewport(&mut self, width: f64, height: f64) {
        if width > 0.0 && height > 0.0 {
            self.viewport = Size::new(width, height);
        }
    }

    pub fn aspect(&self) -> f32 {
        (self.viewport.width / self.viewport.height) as f32
    }

    /// Camera position in world space.
    pub fn eye(&self) -> Vec3 {
        let (sin_a, cos_a) = self.alpha.sin_cos();
        let (sin_b, cos_b) = self.beta.sin_cos();
        self.target + Vec3::new(cos_a * sin_b, cos_b, sin_a * sin_b) * self.radius
    }

    pub fn view(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye(), self.target, Vec3::Y)
    }

    pub fn projection(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_y, self.aspect(), self.near, self.far)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection() * self.view()
    }

    /// Project a world point to screen pixels. `None` if it is behind the near plane.
    pub fn world_to_screen(&self, world: Vec3) -> Option<ScreenPoint> {
        let clip = self.view_projection() * Vec4::new(world.x, world.y, world.z, 1.0);
        if clip.w < self.near {
            return None;
        }
        let ndc_x = clip.x / clip.w;
        let ndc_y = clip.y / clip.w;
        Some(ScreenPoint {
            position: Point::new(
                (ndc_x as f64 + 1.0) * 0.5 * self.viewport.width,
                (1.0 - ndc_y as f64) * 0.5 * self.viewport.height,
            ),
            depth: clip.w,
        })
    }

    /// Ray from the eye through a screen pixel.
    pub fn screen_ray(&self, screen: Point) -> Ray {
        let ndc_x = (2.0 * screen.x / self.viewport.width - 1.0) as f32;
        let ndc_y = (1.0 - 2.0 * screen.y / self.viewport.height) as f32;
        let inverse = self.view_projection().inverse();
        let near = inverse.project_point3(Vec3::new(ndc_x, ndc_y, 0.0));
        let far = inverse.project_point3(Vec3::new(ndc_x, ndc_y, 1.0));
        Ray::new(near, (far - near).normalize())
    }

    /// Orbit by a pointer drag in pixels.
    pub fn orbit(&mut self, delta: Vec2) {
        self.alpha += delta.x as f32 * ORBIT_SENSITIVITY;
        self.beta = (self.beta - delta.y as f32 * ORBIT_SENSITIVITY)
            .clamp(BETA_EPSILON, std::f32::consts::PI - BETA_EPSILON);
    }

    /// Move closer (`factor < 1`) or farther (`factor > 1`).
    pub fn zoom(&mut self, factor: f32) {
        self.radius = (self.radius * factor).clamp(self.min_radius, self.max_radius);
    }

    /// Slide the target in the view plane by a pointer drag in pixels.
    pub fn pan(&mut self, delta: Vec2) {
        let forward = (self.target - self.eye()).normalize();
        let right = forward.cross(Vec3::Y).normalize();
        let up = right.cross(forward);
        // World units per pixel at the target distance
        let scale = 2.0 * self.radius * (self.fov_y / 2.0).tan() / self.viewport.height as f32;
        self.target += (-right * delta.x as f32 + up * delta.y as f32) * scale;
    }

    /// Reset orientation and distance, keeping the viewport.
    pub fn reset(&mut self) {
        *self = Self {
            viewport: self.viewport,
            ..Self::default()
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_camera() {
        let camera = OrbitCamera::new();
        assert_eq!(camera.alpha, 0.0);
        assert!((camera.beta - std::f32::consts::FRAC_PI_3).abs() < f32::EPSILON);
        assert_eq!(camera.radius, 10.0);
        assert_eq!(camera.target, Vec3::ZERO);
    }

    #[test]
    fn test_eye_position() {
        let camera = OrbitCamera::new();
        let eye = camera.eye();
        assert!((eye.length() - 10.0).abs() < 1e-4);
        // beta of 60 degrees from +Y puts the eye at half the radius in height
        assert!((eye.y - 5.0).abs() < 1e-4);
        assert!(eye.z.abs() < 1e-4);
    }

    #[test]
    fn test_target_projects_to_center() {
        let mut camera = OrbitCamera::new();
        camera.set_viewport(800.0, 600.0);
        let projected = camera.world_to_screen(Vec3::ZERO).unwrap();
        assert!((projected.position.x - 400.0).abs() < 1e-3);
        assert!((projected.position.y - 300.0).abs() < 1e-3);
        assert!((projected.depth - 10.0).abs() < 1e-3);
    }

    #[test]
    fn test_point_behind_camera_is_rejected() {
        let camera = OrbitCamera::new();
        let behind = camera.eye() * 2.0;
        assert!(camera.world_to_screen(behind).is_none());
    }

    #[test]
    fn test_center_ray_hits_target() {
        let mut camera = OrbitCamera::new();
        camera.set_viewport(800.0, 600.0);
        let ray = camera.screen_ray(Point::new(400.0, 300.0));
        let to_target = (camera.target - ray.origin).normalize();
        assert!(ray.direction.dot(to_target) > 0.9999);
    }

    #[test]
    fn test_ray_and_projection_agree() {
        let mut camera = OrbitCamera::new();
        camera.set_viewport(1024.0, 768.0);
        let world = Vec3::new(1.0, 0.5, -2.0);
        let screen = camera.world_to_screen(world).unwrap();
        let ray = camera.screen_ray(screen.position);
        let to_world = (world - ray.origin).normalize();
        assert!(ray.direction.dot(to_world) > 0.9999);
    }

    #[test]
    fn test_orbit_clamps_beta() {
        let mut camera = OrbitCamera::new();
        camera.orbit(Vec2::new(0.0, 10_000.0));
        assert!(camera.beta >= BETA_EPSILON);
        camera.orbit(Vec2::new(0.0, -10_000.0));
        assert!(camera.beta <= std::f32::consts::PI - BETA_EPSILON);
    }

    #[test]
    fn test_zoom_clamp() {
        let mut camera = OrbitCamera::new();
        camera.zoom(0.0001);
        assert_eq!(camera.radius, camera.min_radius);
        camera.zoom(1e6);
        assert_eq!(camera.radius, camera.max_radius);
    }

    #[test]
    fn test_pan_moves_target_in_view_plane() {
        let mut camera = OrbitCamera::new();
        let before = camera.eye() - camera.target;
        camera.pan(Vec2::new(100.0, 0.0));
        assert!(camera.target.length() > 0.0);
        let after = camera.eye() - camera.target;
        assert!(before.abs_diff_eq(after, 1e-4));
    }

    #[test]
    fn test_zero_viewport_ignored() {
        let mut camera = OrbitCamera::new();
        camera.set_viewport(0.0, 600.0);
        assert_eq!(camera.viewport(), Size::new(1280.0, 800.0));
    }
}
