//! Ray intersection against the unit primitives in object space.

use glam::Vec3;

use crate::camera::Ray;
use crate::shapes::{ShapeKind, BOX_SIZE, CYLINDER_DIAMETER, CYLINDER_HEIGHT, SPHERE_DIAMETER};

const PARALLEL_EPSILON: f32 = 1e-8;

/// Nearest non-negative ray parameter where `ray` (in object space) enters the
/// default-sized primitive of `kind`. Starting inside counts as a hit at the exit.
/// Rays with non-finite components never hit.
pub fn intersect_primitive(kind: ShapeKind, ray: &Ray) -> Option<f32> {
    if !ray.origin.is_finite() || !ray.direction.is_finite() {
        return None;
    }
    let t = match kind {
        ShapeKind::Box => intersect_box(ray, BOX_SIZE / 2.0),
        ShapeKind::Sphere => intersect_sphere(ray, SPHERE_DIAMETER / 2.0),
        ShapeKind::Cylinder => intersect_cylinder(ray, CYLINDER_DIAMETER / 2.0, CYLINDER_HEIGHT / 2.0),
    }?;
    t.is_finite().then_some(t)
}

fn intersect_box(ray: &Ray, half: f32) -> Option<f32> {
    let mut t_min = f32::NEG_INFINITY;
    let mut t_max = f32::INFINITY;
    for axis in 0..3 {
        let origin = ray.origin[axis];
        let direction = ray.direction[axis];
        if direction.abs() < PARALLEL_EPSILON {
            if origin < -half || origin > half {
                return None;
            }
            continue;
        }
        let t1 = (-half - origin) / direction;
        let t2 = (half - origin) / direction;
        t_min = t_min.max(t1.min(t2));
        t_max = t_max.min(t1.max(t2));
    }
    if t_max < t_min.max(0.0) {
        return None;
    }
    Some(if t_min >= 0.0 { t_min } else { t_max })
}

fn nearest_root(a: f32, b: f32, c: f32) -> [Option<f32>; 2] {
    let discriminant = b * b - 4.0 * a * c;
    if a.abs() < PARALLEL_EPSILON || discriminant < 0.0 {
        return [None, None];
    }
    let sqrt = discriminant.sqrt();
    [Some((-b - sqrt) / (2.0 * a)), Some((-b + sqrt) / (2.0 * a))]
}

fn intersect_sphere(ray: &Ray, radius: f32) -> Option<f32> {
    let a = ray.direction.length_squared();
    let b = 2.0 * ray.origin.dot(ray.direction);
    let c = ray.origin.length_squared() - radius * radius;
    nearest_root(a, b, c).into_iter().flatten().find(|t| *t >= 0.0)
}

fn intersect_cylinder(ray: &Ray, radius: f32, half_height: f32) -> Option<f32> {
    let o = ray.origin;
    let d = ray.direction;
    let mut best: Option<f32> = None;
    let mut consider = |t: f32| {
        if t >= 0.0 && best.is_none_or(|b| t < b) {
            best = Some(t);
        }
    };

    // Side wall
    let a = d.x * d.x + d.z * d.z;
    let b = 2.0 * (o.x * d.x + o.z * d.z);
    let c = o.x * o.x + o.z * o.z - radius * radius;
    for t in nearest_root(a, b, c).into_iter().flatten() {
        let y = o.y + d.y * t;
        if (-half_height..=half_height).contains(&y) {
            consider(t);
        }
    }

    // Caps
    if d.y.abs() >= PARALLEL_EPSILON {
        for cap_y in [-half_height, half_height] {
            let t = (cap_y - o.y) / d.y;
            let p: Vec3 = o + d * t;
            if p.x * p.x + p.z * p.z <= radius * radius {
                consider(t);
            }
        }
    }
    best
}
