//! glTF 2.0 JSON document for a live scene.
//!
//! Objects of the same kind share one mesh, so their geometry is written to
//! the binary buffer once and every object's mesh points at the shared
//! accessors with its own material.

use std::collections::HashMap;

use serde::Serialize;

use crate::scene::LiveScene;
use crate::shapes::{MeshData, ShapeKind};

const GENERATOR: &str = "ShapeForge";
const COMPONENT_FLOAT: u32 = 5126;
const COMPONENT_UNSIGNED_INT: u32 = 5125;
const TARGET_ARRAY_BUFFER: u32 = 34962;
const TARGET_ELEMENT_ARRAY_BUFFER: u32 = 34963;
const MODE_TRIANGLES: u32 = 4;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct Document {
    asset: Asset,
    scene: usize,
    scenes: Vec<Scene>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    nodes: Vec<Node>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    meshes: Vec<Mesh>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    materials: Vec<Material>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    accessors: Vec<Accessor>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    buffer_views: Vec<BufferView>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    buffers: Vec<Buffer>,
}

#[derive(Debug, Serialize)]
struct Asset {
    version: &'static str,
    generator: &'static str,
}

#[derive(Debug, Serialize)]
struct Scene {
    nodes: Vec<usize>,
}

#[derive(Debug, Serialize)]
struct Node {
    name: String,
    mesh: usize,
    translation: [f32; 3],
    /// Quaternion as `[x, y, z, w]`.
    rotation: [f32; 4],
    scale: [f32; 3],
}

#[derive(Debug, Serialize)]
struct Mesh {
    name: String,
    primitives: Vec<Primitive>,
}

#[derive(Debug, Serialize)]
struct Primitive {
    attributes: Attributes,
    indices: usize,
    material: usize,
    mode: u32,
}

#[derive(Debug, Clone, Copy, Serialize)]
struct Attributes {
    #[serde(rename = "POSITION")]
    position: usize,
    #[serde(rename = "NORMAL")]
    normal: usize,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Material {
    name: String,
    pbr_metallic_roughness: PbrMetallicRoughness,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PbrMetallicRoughness {
    base_color_factor: [f32; 4],
    metallic_factor: f32,
    roughness_factor: f32,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Accessor {
    buffer_view: usize,
    component_type: u32,
    count: usize,
    #[serde(rename = "type")]
    kind: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    min: Option<[f32; 3]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max: Option<[f32; 3]>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct BufferView {
    buffer: usize,
    byte_offset: usize,
    byte_length: usize,
    target: u32,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Buffer {
    byte_length: usize,
}

/// Accessor indices of one kind's geometry.
#[derive(Debug, Clone, Copy)]
struct Geometry {
    attributes: Attributes,
    indices: usize,
}

#[derive(Debug)]
struct Builder {
    document: Document,
    bin: Vec<u8>,
    geometry: HashMap<ShapeKind, Geometry>,
}

impl Builder {
    fn new() -> Self {
        Self {
            document: Document {
                asset: Asset {
                    version: "2.0",
                    generator: GENERATOR,
                },
                scene: 0,
                scenes: vec![Scene { nodes: Vec::new() }],
                nodes: Vec::new(),
                meshes: Vec::new(),
                materials: Vec::new(),
                accessors: Vec::new(),
                buffer_views: Vec::new(),
                buffers: Vec::new(),
            },
            bin: Vec::new(),
            geometry: HashMap::new(),
        }
    }

    /// Append `bytes` as a new buffer view. Views start 4-byte aligned.
    fn push_view(&mut self, bytes: &[u8], target: u32) -> usize {
        self.bin.resize(self.bin.len().div_ceil(4) * 4, 0);
        self.document.buffer_views.push(BufferView {
            buffer: 0,
            byte_offset: self.bin.len(),
            byte_length: bytes.len(),
            target,
        });
        self.bin.extend_from_slice(bytes);
        self.document.buffer_views.len() - 1
    }

    fn push_accessor(&mut self, accessor: Accessor) -> usize {
        self.document.accessors.push(accessor);
        self.document.accessors.len() - 1
    }

    fn geometry(&mut self, kind: ShapeKind, mesh: &MeshData) -> Geometry {
        if let Some(geometry) = self.geometry.get(&kind) {
            return *geometry;
        }

        let (min, max) = mesh.bounds();
        let view = self.push_view(bytemuck::cast_slice(&mesh.positions), TARGET_ARRAY_BUFFER);
        let position = self.push_accessor(Accessor {
            buffer_view: view,
            component_type: COMPONENT_FLOAT,
            count: mesh.vertex_count(),
            kind: "VEC3",
            min: Some(min),
            max: Some(max),
        });
        let view = self.push_view(bytemuck::cast_slice(&mesh.normals), TARGET_ARRAY_BUFFER);
        let normal = self.push_accessor(Accessor {
            buffer_view: view,
            component_type: COMPONENT_FLOAT,
            count: mesh.normals.len(),
            kind: "VEC3",
            min: None,
            max: None,
        });
        let view = self.push_view(bytemuck::cast_slice(&mesh.indices), TARGET_ELEMENT_ARRAY_BUFFER);
        let indices = self.push_accessor(Accessor {
            buffer_view: view,
            component_type: COMPONENT_UNSIGNED_INT,
            count: mesh.indices.len(),
            kind: "SCALAR",
            min: None,
            max: None,
        });

        let geometry = Geometry {
            attributes: Attributes { position, normal },
            indices,
        };
        self.geometry.insert(kind, geometry);
        geometry
    }

    fn finish(mut self) -> (Document, Vec<u8>) {
        if !self.bin.is_empty() {
            self.bin.resize(self.bin.len().div_ceil(4) * 4, 0);
            self.document.buffers.push(Buffer {
                byte_length: self.bin.len(),
            });
        }
        (self.document, self.bin)
    }
}

/// Build the JSON document and binary buffer for every object in `scene`.
pub(super) fn build_document(scene: &LiveScene) -> (Document, Vec<u8>) {
    let mut builder = Builder::new();

    for object in scene.objects() {
        let geometry = builder.geometry(object.kind, &object.mesh);
        let diffuse = object.material.diffuse.to_linear();

        builder.document.materials.push(Material {
            name: object.material.name.clone(),
            pbr_metallic_roughness: PbrMetallicRoughness {
                base_color_factor: [diffuse[0], diffuse[1], diffuse[2], 1.0],
                metallic_factor: 0.0,
                roughness_factor: 1.0,
            },
        });
        let material = builder.document.materials.len() - 1;

        builder.document.meshes.push(Mesh {
            name: format!("{}-{}", object.kind.as_str(), object.id),
            primitives: vec![Primitive {
                attributes: geometry.attributes,
                indices: geometry.indices,
                material,
                mode: MODE_TRIANGLES,
            }],
        });
        let mesh = builder.document.meshes.len() - 1;

        let transform = &object.transform;
        builder.document.nodes.push(Node {
            name: object.id.to_string(),
            mesh,
            translation: transform.position.to_array(),
            rotation: transform.quaternion().to_array(),
            scale: transform.scaling.to_array(),
        });
        let node = builder.document.nodes.len() - 1;
        builder.document.scenes[0].nodes.push(node);
    }

    builder.finish()
}
