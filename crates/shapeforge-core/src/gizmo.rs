//! Manipulation gizmo: axis handles and drag math.
//!
//! A gizmo is three axis handles drawn from the attached object's position.
//! Handles are laid out in screen space so hit-testing and dragging work in
//! pixels; a drag is converted back to world units along the grabbed axis.

use glam::Vec3;
use kurbo::{Point, Vec2};
use serde::{Deserialize, Serialize};

use crate::shapes::{MetadataPatch, Rgb, ShapeId, ShapeMetadata};

/// Handle length as a fraction of the camera distance, so the gizmo keeps a
/// roughly constant size on screen.
pub const GIZMO_SCALE: f32 = 0.15;
/// Pointer distance (pixels) within which a handle counts as hit.
pub const HANDLE_HIT_RADIUS: f64 = 8.0;
/// Smallest scale factor a scale drag can produce.
pub const MIN_SCALE: f32 = 0.01;

/// What dragging a handle does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GizmoMode {
    #[default]
    Translate,
    Rotate,
    Scale,
}

impl GizmoMode {
    pub const ALL: [GizmoMode; 3] = [GizmoMode::Translate, GizmoMode::Rotate, GizmoMode::Scale];

    pub fn name(self) -> &'static str {
        match self {
            GizmoMode::Translate => "Move",
            GizmoMode::Rotate => "Rotate",
            GizmoMode::Scale => "Scale",
        }
    }
}

/// A world axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GizmoAxis {
    X,
    Y,
    Z,
}

impl GizmoAxis {
    pub const ALL: [GizmoAxis; 3] = [GizmoAxis::X, GizmoAxis::Y, GizmoAxis::Z];

    pub fn unit(self) -> Vec3 {
        match self {
            GizmoAxis::X => Vec3::X,
            GizmoAxis::Y => Vec3::Y,
            GizmoAxis::Z => Vec3::Z,
        }
    }

    pub fn index(self) -> usize {
        match self {
            GizmoAxis::X => 0,
            GizmoAxis::Y => 1,
            GizmoAxis::Z => 2,
        }
    }

    /// Conventional axis color: X red, Y green, Z blue.
    pub fn color(self) -> Rgb {
        match self {
            GizmoAxis::X => Rgb::new(230, 60, 60),
            GizmoAxis::Y => Rgb::new(60, 200, 80),
            GizmoAxis::Z => Rgb::new(60, 110, 240),
        }
    }
}

/// One axis handle projected to the screen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GizmoHandle {
    pub axis: GizmoAxis,
    /// Screen position of the gizmo origin.
    pub origin: Point,
    /// Screen position of the handle tip.
    pub tip: Point,
    /// Handle length in world units.
    pub world_length: f32,
}

impl GizmoHandle {
    /// Distance in pixels from `point` to the handle segment.
    pub fn distance_to(&self, point: Point) -> f64 {
        let segment = self.tip - self.origin;
        let length_sq = segment.hypot2();
        if length_sq < f64::EPSILON {
            return (point - self.origin).hypot();
        }
        let t = ((point - self.origin).dot(segment) / length_sq).clamp(0.0, 1.0);
        let closest = self.origin + segment * t;
        (point - closest).hypot()
    }
}

/// The nearest handle within [`HANDLE_HIT_RADIUS`] of `point`.
pub fn hit_test(handles: &[GizmoHandle], point: Point) -> Option<GizmoAxis> {
    handles
        .iter()
        .map(|handle| (handle.axis, handle.distance_to(point)))
        .filter(|(_, distance)| *distance <= HANDLE_HIT_RADIUS)
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(axis, _)| axis)
}

/// An in-progress handle drag.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GizmoDrag {
    pub target: ShapeId,
    pub axis: GizmoAxis,
    pub mode: GizmoMode,
    start_pointer: Point,
    start: ShapeMetadata,
    /// Unit screen direction of the handle.
    screen_direction: Vec2,
    pixels_per_unit: f64,
    world_length: f32,
}

impl GizmoDrag {
    /// Start dragging `handle`. Returns `None` when the handle points straight
    /// at the viewer and has no usable screen direction.
    pub fn begin(
        target: ShapeId,
        mode: GizmoMode,
        handle: &GizmoHandle,
        pointer: Point,
        start: ShapeMetadata,
    ) -> Option<Self> {
        let segment = handle.tip - handle.origin;
        let pixel_length = segment.hypot();
        if pixel_length < 1.0 || handle.world_length <= 0.0 {
            return None;
        }
        Some(Self {
            target,
            axis: handle.axis,
            mode,
            start_pointer: pointer,
            start,
            screen_direction: segment / pixel_length,
            pixels_per_unit: pixel_length / handle.world_length as f64,
            world_length: handle.world_length,
        })
    }

    /// Signed world distance the pointer has moved along the handle.
    fn travel(&self, pointer: Point) -> f32 {
        ((pointer - self.start_pointer).dot(self.screen_direction) / self.pixels_per_unit) as f32
    }

    /// The metadata update for the current pointer position, relative to the drag start.
    pub fn patch(&self, pointer: Point) -> MetadataPatch {
        let travel = self.travel(pointer);
        let axis = self.axis.unit();
        match self.mode {
            GizmoMode::Translate => MetadataPatch::position(self.start.position + axis * travel),
            GizmoMode::Rotate => {
                // One handle length of travel is a quarter turn
                let angle = travel / self.world_length * std::f32::consts::FRAC_PI_2;
                MetadataPatch::rotation(self.start.rotation + axis * angle)
            }
            GizmoMode::Scale => {
                let factor = 1.0 + travel / self.world_length;
                let mut scaling = self.start.scaling;
                let i = self.axis.index();
                scaling[i] = (scaling[i] * factor).max(MIN_SCALE);
                MetadataPatch::scaling(scaling)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn x_handle() -> GizmoHandle {
        GizmoHandle {
            axis: GizmoAxis::X,
            origin: Point::new(100.0, 100.0),
            tip: Point::new(200.0, 100.0),
            world_length: 2.0,
        }
    }

    #[test]
    fn test_distance_to_segment() {
        let handle = x_handle();
        assert!((handle.distance_to(Point::new(150.0, 105.0)) - 5.0).abs() < 1e-9);
        // Beyond the tip measures to the tip
        assert!((handle.distance_to(Point::new(203.0, 104.0)) - 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_hit_test_picks_nearest() {
        let y_handle = GizmoHandle {
            axis: GizmoAxis::Y,
            origin: Point::new(100.0, 100.0),
            tip: Point::new(100.0, 0.0),
            world_length: 2.0,
        };
        let handles = [x_handle(), y_handle];
        assert_eq!(hit_test(&handles, Point::new(160.0, 103.0)), Some(GizmoAxis::X));
        assert_eq!(hit_test(&handles, Point::new(102.0, 40.0)), Some(GizmoAxis::Y));
        assert_eq!(hit_test(&handles, Point::new(160.0, 160.0)), None);
    }

    #[test]
    fn test_translate_drag() {
        let drag = GizmoDrag::begin(
            Uuid::new_v4(),
            GizmoMode::Translate,
            &x_handle(),
            Point::new(150.0, 100.0),
            ShapeMetadata::new(),
        )
        .unwrap();
        // 50 px along a 100 px handle of length 2 is one world unit
        let patch = drag.patch(Point::new(200.0, 130.0));
        assert_eq!(patch.position, Some(Vec3::new(1.0, 0.0, 0.0)));
        assert!(patch.color.is_none());
    }

    #[test]
    fn test_rotate_drag_quarter_turn() {
        let drag = GizmoDrag::begin(
            Uuid::new_v4(),
            GizmoMode::Rotate,
            &x_handle(),
            Point::new(100.0, 100.0),
            ShapeMetadata::new(),
        )
        .unwrap();
        let rotation = drag.patch(Point::new(200.0, 100.0)).rotation.unwrap();
        assert!((rotation.x - std::f32::consts::FRAC_PI_2).abs() < 1e-6);
        assert_eq!(rotation.y, 0.0);
    }

    #[test]
    fn test_scale_drag_clamps() {
        let drag = GizmoDrag::begin(
            Uuid::new_v4(),
            GizmoMode::Scale,
            &x_handle(),
            Point::new(100.0, 100.0),
            ShapeMetadata::new(),
        )
        .unwrap();
        let grown = drag.patch(Point::new(200.0, 100.0)).scaling.unwrap();
        assert!((grown.x - 2.0).abs() < 1e-6);
        assert_eq!(grown.y, 1.0);
        let collapsed = drag.patch(Point::new(-500.0, 100.0)).scaling.unwrap();
        assert_eq!(collapsed.x, MIN_SCALE);
    }

    #[test]
    fn test_degenerate_handle_cannot_be_dragged() {
        let handle = GizmoHandle {
            axis: GizmoAxis::Z,
            origin: Point::new(100.0, 100.0),
            tip: Point::new(100.2, 100.0),
            world_length: 2.0,
        };
        let drag = GizmoDrag::begin(
            Uuid::new_v4(),
            GizmoMode::Translate,
            &handle,
            Point::new(100.0, 100.0),
            ShapeMetadata::new(),
        );
        assert!(drag.is_none());
    }
}
