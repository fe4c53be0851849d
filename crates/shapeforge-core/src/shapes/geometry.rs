//! Triangle meshes for the primitive kinds.
//!
//! Every primitive is centered on its local origin and fits the unit cube,
//! so the object transform alone decides where it lands and how big it is.
//! Triangles are wound counter-clockwise when seen from outside.

use glam::Vec3;

use super::ShapeKind;

/// Edge length of a new box.
pub const BOX_SIZE: f32 = 1.0;
/// Diameter of a new sphere.
pub const SPHERE_DIAMETER: f32 = 1.0;
/// Diameter of a new cylinder.
pub const CYLINDER_DIAMETER: f32 = 1.0;
/// Height of a new cylinder.
pub const CYLINDER_HEIGHT: f32 = 1.0;

const SPHERE_RINGS: u32 = 12;
const SPHERE_SEGMENTS: u32 = 24;
const CYLINDER_TESSELLATION: u32 = 24;

/// Indexed triangle mesh with per-vertex normals.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MeshData {
    pub positions: Vec<[f32; 3]>,
    pub normals: Vec<[f32; 3]>,
    pub indices: Vec<u32>,
}

impl MeshData {
    /// Build the default-sized mesh for a kind.
    pub fn for_kind(kind: ShapeKind) -> Self {
        match kind {
            ShapeKind::Box => Self::cuboid(BOX_SIZE),
            ShapeKind::Sphere => Self::uv_sphere(SPHERE_DIAMETER / 2.0, SPHERE_RINGS, SPHERE_SEGMENTS),
            ShapeKind::Cylinder => {
                Self::cylinder(CYLINDER_DIAMETER / 2.0, CYLINDER_HEIGHT, CYLINDER_TESSELLATION)
            }
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Iterate triangles as position triples.
    pub fn triangles(&self) -> impl Iterator<Item = [Vec3; 3]> + '_ {
        self.indices.chunks_exact(3).map(|tri| {
            [
                Vec3::from(self.positions[tri[0] as usize]),
                Vec3::from(self.positions[tri[1] as usize]),
                Vec3::from(self.positions[tri[2] as usize]),
            ]
        })
    }

    /// Component-wise minimum and maximum of all positions.
    pub fn bounds(&self) -> ([f32; 3], [f32; 3]) {
        let mut min = Vec3::splat(f32::INFINITY);
        let mut max = Vec3::splat(f32::NEG_INFINITY);
        for p in &self.positions {
            let p = Vec3::from(*p);
            min = min.min(p);
            max = max.max(p);
        }
        if self.positions.is_empty() {
            return ([0.0; 3], [0.0; 3]);
        }
        (min.to_array(), max.to_array())
    }

    fn push_vertex(&mut self, position: Vec3, normal: Vec3) -> u32 {
        let index = self.positions.len() as u32;
        self.positions.push(position.to_array());
        self.normals.push(normal.to_array());
        index
    }

    fn cuboid(size: f32) -> Self {
        let half = size / 2.0;
        // (face normal, one in-plane axis); the other axis is normal x u
        let faces = [
            (Vec3::X, Vec3::Y),
            (Vec3::NEG_X, Vec3::Y),
            (Vec3::Y, Vec3::Z),
            (Vec3::NEG_Y, Vec3::Z),
            (Vec3::Z, Vec3::X),
            (Vec3::NEG_Z, Vec3::X),
        ];

        let mut mesh = MeshData::default();
        for (normal, u) in faces {
            let v = normal.cross(u);
            let center = normal * half;
            let corners = [
                center - u * half - v * half,
                center + u * half - v * half,
                center + u * half + v * half,
                center - u * half + v * half,
            ];
            let base = mesh.positions.len() as u32;
            for corner in corners {
                mesh.push_vertex(corner, normal);
            }
            mesh.indices.extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
        }
        mesh
    }

    fn uv_sphere(radius: f32, rings: u32, segments: u32) -> Self {
        let mut mesh = MeshData::default();
        for ring in 0..=rings {
            let theta = ring as f32 * std::f32::consts::PI / rings as f32;
            for segment in 0..=segments {
                let phi = segment as f32 * std::f32::consts::TAU / segments as f32;
                let normal = Vec3::new(theta.sin() * phi.cos(), theta.cos(), theta.sin() * phi.sin());
                mesh.push_vertex(normal * radius, normal);
            }
        }

        let stride = segments + 1;
        for ring in 0..rings {
            for segment in 0..segments {
                let a = ring * stride + segment;
                let b = a + stride;
                mesh.indices.extend_from_slice(&[a, a + 1, b, a + 1, b + 1, b]);
            }
        }
        mesh
    }

    fn cylinder(radius: f32, height: f32, tessellation: u32) -> Self {
        let half = height / 2.0;
        let mut mesh = MeshData::default();

        // Side: bottom/top vertex pairs around the rim
        for i in 0..=tessellation {
            let phi = i as f32 * std::f32::consts::TAU / tessellation as f32;
            let normal = Vec3::new(phi.cos(), 0.0, phi.sin());
            let rim = normal * radius;
            mesh.push_vertex(rim - Vec3::Y * half, normal);
            mesh.push_vertex(rim + Vec3::Y * half, normal);
        }
        for i in 0..tessellation {
            let bottom = 2 * i;
            let top = bottom + 1;
            let next_bottom = bottom + 2;
            let next_top = bottom + 3;
            mesh.indices
                .extend_from_slice(&[bottom, top, next_bottom, next_bottom, top, next_top]);
        }

        // Caps get their own vertices so their normals stay flat
        for (y, normal) in [(half, Vec3::Y), (-half, Vec3::NEG_Y)] {
            let center = mesh.push_vertex(Vec3::new(0.0, y, 0.0), normal);
            let first = mesh.positions.len() as u32;
            for i in 0..=tessellation {
                let phi = i as f32 * std::f32::consts::TAU / tessellation as f32;
                mesh.push_vertex(Vec3::new(phi.cos() * radius, y, phi.sin() * radius), normal);
            }
            for i in 0..tessellation {
                let current = first + i;
                let next = current + 1;
                if normal.y > 0.0 {
                    mesh.indices.extend_from_slice(&[center, next, current]);
                } else {
                    mesh.indices.extend_from_slice(&[center, current, next]);
                }
            }
        }
        mesh
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Every non-degenerate triangle of a convex, origin-centered mesh faces away from the origin.
    fn assert_outward_winding(mesh: &MeshData) {
        for [a, b, c] in mesh.triangles() {
            let normal = (b - a).cross(c - a);
            if normal.length_squared() < 1e-12 {
                continue;
            }
            let centroid = (a + b + c) / 3.0;
            assert!(normal.dot(centroid) > 0.0, "inward triangle at {centroid:?}");
        }
    }

    #[test]
    fn test_box_mesh() {
        let mesh = MeshData::for_kind(ShapeKind::Box);
        assert_eq!(mesh.vertex_count(), 24);
        assert_eq!(mesh.triangle_count(), 12);
        assert_eq!(mesh.bounds(), ([-0.5; 3], [0.5; 3]));
        assert_outward_winding(&mesh);
    }

    #[test]
    fn test_sphere_mesh() {
        let mesh = MeshData::for_kind(ShapeKind::Sphere);
        for p in &mesh.positions {
            assert!((Vec3::from(*p).length() - 0.5).abs() < 1e-5);
        }
        let (min, max) = mesh.bounds();
        assert!((min[1] + 0.5).abs() < 1e-5);
        assert!((max[1] - 0.5).abs() < 1e-5);
        assert_outward_winding(&mesh);
    }

    #[test]
    fn test_cylinder_mesh() {
        let mesh = MeshData::for_kind(ShapeKind::Cylinder);
        let (min, max) = mesh.bounds();
        assert!((min[1] + 0.5).abs() < 1e-6);
        assert!((max[1] - 0.5).abs() < 1e-6);
        assert!((max[0] - 0.5).abs() < 1e-6);
        assert_outward_winding(&mesh);
    }

    #[test]
    fn test_normals_match_positions() {
        for kind in ShapeKind::ALL {
            let mesh = MeshData::for_kind(kind);
            assert_eq!(mesh.positions.len(), mesh.normals.len());
            assert!(mesh.indices.iter().all(|&i| (i as usize) < mesh.positions.len()));
        }
    }

    #[test]
    fn test_empty_bounds() {
        assert_eq!(MeshData::default().bounds(), ([0.0; 3], [0.0; 3]));
    }
}
