//! Shape descriptors for the scene editor.
//!
//! A [`Shape`] is the engine-independent record of one editable object: its
//! kind, its transform and its color. Live scene objects are derived from
//! these descriptors by the reconciler.

mod geometry;

pub use geometry::{MeshData, BOX_SIZE, CYLINDER_DIAMETER, CYLINDER_HEIGHT, SPHERE_DIAMETER};

use glam::{EulerRot, Mat4, Quat, Vec3};
use peniko::Color;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use uuid::Uuid;

/// Unique identifier for shapes.
pub type ShapeId = Uuid;

/// The closed set of primitive kinds the editor can create.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    Box,
    Sphere,
    Cylinder,
}

impl ShapeKind {
    /// All kinds, in sidebar order.
    pub const ALL: [ShapeKind; 3] = [ShapeKind::Box, ShapeKind::Sphere, ShapeKind::Cylinder];

    /// Lowercase identifier, as used in exported mesh names.
    pub fn as_str(self) -> &'static str {
        match self {
            ShapeKind::Box => "box",
            ShapeKind::Sphere => "sphere",
            ShapeKind::Cylinder => "cylinder",
        }
    }

    /// Human-facing name.
    pub fn display_name(self) -> &'static str {
        match self {
            ShapeKind::Box => "Cube",
            ShapeKind::Sphere => "Sphere",
            ShapeKind::Cylinder => "Cylinder",
        }
    }
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Errors from parsing a hex color.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorParseError {
    #[error("Color must start with '#': {0}")]
    MissingHash(String),
    #[error("Color must have 3 or 6 hex digits: {0}")]
    InvalidLength(String),
    #[error("Invalid hex digit in color: {0}")]
    InvalidDigit(String),
}

/// An opaque 8-bit sRGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Format as `#rrggbb`.
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Components normalized to `0.0..=1.0`, still sRGB encoded.
    pub fn to_srgb_f32(&self) -> [f32; 3] {
        [
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
        ]
    }

    /// Components converted to linear light.
    pub fn to_linear(&self) -> [f32; 3] {
        self.to_srgb_f32().map(srgb_to_linear)
    }
}

impl Default for Rgb {
    fn default() -> Self {
        Rgb::WHITE
    }
}

fn srgb_to_linear(c: f32) -> f32 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

impl FromStr for Rgb {
    type Err = ColorParseError;

    /// Parse `#rrggbb` or the short `#rgb` form.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let hex = s
            .strip_prefix('#')
            .ok_or_else(|| ColorParseError::MissingHash(s.to_string()))?;
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ColorParseError::InvalidDigit(s.to_string()));
        }
        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&hex[range], 16).map_err(|_| ColorParseError::InvalidDigit(s.to_string()))
        };
        match hex.len() {
            6 => Ok(Rgb::new(channel(0..2)?, channel(2..4)?, channel(4..6)?)),
            3 => {
                // #abc expands to #aabbcc
                let r = channel(0..1)?;
                let g = channel(1..2)?;
                let b = channel(2..3)?;
                Ok(Rgb::new(r * 17, g * 17, b * 17))
            }
            _ => Err(ColorParseError::InvalidLength(s.to_string())),
        }
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl From<Rgb> for Color {
    fn from(color: Rgb) -> Self {
        Color::from_rgba8(color.r, color.g, color.b, 255)
    }
}

impl From<Color> for Rgb {
    fn from(color: Color) -> Self {
        let rgba = color.to_rgba8();
        Rgb::new(rgba.r, rgba.g, rgba.b)
    }
}

/// Position, Euler rotation (radians) and per-axis scale.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Vec3,
    pub scaling: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scaling: Vec3::ONE,
        }
    }
}

impl Transform {
    /// Rotation as a quaternion. Yaw (Y) is applied last, roll (Z) first.
    pub fn quaternion(&self) -> Quat {
        Quat::from_euler(EulerRot::YXZ, self.rotation.y, self.rotation.x, self.rotation.z)
    }

    /// Object-to-world matrix.
    pub fn matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scaling, self.quaternion(), self.position)
    }
}

/// Editable attributes of a shape.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShapeMetadata {
    pub color: Rgb,
    pub position: Vec3,
    pub rotation: Vec3,
    pub scaling: Vec3,
}

impl ShapeMetadata {
    /// White, at the origin, unrotated, unit scale.
    pub fn new() -> Self {
        Self {
            color: Rgb::WHITE,
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scaling: Vec3::ONE,
        }
    }

    /// The transform part, without the color.
    pub fn transform(&self) -> Transform {
        Transform {
            position: self.position,
            rotation: self.rotation,
            scaling: self.scaling,
        }
    }
}

impl Default for ShapeMetadata {
    fn default() -> Self {
        Self::new()
    }
}

/// A partial metadata update. Only `Some` fields are merged.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MetadataPatch {
    pub color: Option<Rgb>,
    pub position: Option<Vec3>,
    pub rotation: Option<Vec3>,
    pub scaling: Option<Vec3>,
}

impl MetadataPatch {
    pub fn color(color: Rgb) -> Self {
        Self {
            color: Some(color),
            ..Default::default()
        }
    }

    pub fn position(position: Vec3) -> Self {
        Self {
            position: Some(position),
            ..Default::default()
        }
    }

    pub fn rotation(rotation: Vec3) -> Self {
        Self {
            rotation: Some(rotation),
            ..Default::default()
        }
    }

    pub fn scaling(scaling: Vec3) -> Self {
        Self {
            scaling: Some(scaling),
            ..Default::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.color.is_none() && self.position.is_none() && self.rotation.is_none() && self.scaling.is_none()
    }

    /// Merge into `metadata`. Returns true if any field actually changed.
    pub fn apply(&self, metadata: &mut ShapeMetadata) -> bool {
        let before = *metadata;
        if let Some(color) = self.color {
            metadata.color = color;
        }
        if let Some(position) = self.position {
            metadata.position = position;
        }
        if let Some(rotation) = self.rotation {
            metadata.rotation = rotation;
        }
        if let Some(scaling) = self.scaling {
            metadata.scaling = scaling;
        }
        before != *metadata
    }
}

/// One editable object. `id` and `kind` are fixed at construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shape {
    id: ShapeId,
    kind: ShapeKind,
    pub metadata: ShapeMetadata,
}

impl Shape {
    /// Create a shape with a fresh id and default metadata.
    pub fn new(kind: ShapeKind) -> Self {
        Self::with_id(Uuid::new_v4(), kind)
    }

    /// Create a shape with a caller-chosen id and default metadata.
    pub fn with_id(id: ShapeId, kind: ShapeKind) -> Self {
        Self {
            id,
            kind,
            metadata: ShapeMetadata::new(),
        }
    }

    pub fn id(&self) -> ShapeId {
        self.id
    }

    pub fn kind(&self) -> ShapeKind {
        self.kind
    }
}
