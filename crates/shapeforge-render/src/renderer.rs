//! Renderer trait abstraction.

use kurbo::Size;
use peniko::Color;
use shapeforge_core::scene::LiveScene;
use thiserror::Error;

/// Renderer errors.
#[derive(Debug, Error)]
pub enum RendererError {
    #[error("Initialization failed: {0}")]
    InitFailed(String),
    #[error("Render failed: {0}")]
    RenderFailed(String),
    #[error("Surface error: {0}")]
    Surface(String),
}

/// Result type for renderer operations.
pub type RenderResult<T> = Result<T, RendererError>;

/// Ground grid display style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GridStyle {
    /// No ground grid.
    None,
    /// Full grid lines.
    #[default]
    Lines,
    /// Only dots at the intersections.
    Dots,
}

impl GridStyle {
    /// Cycle to the next grid style.
    pub fn next(self) -> Self {
        match self {
            GridStyle::None => GridStyle::Lines,
            GridStyle::Lines => GridStyle::Dots,
            GridStyle::Dots => GridStyle::None,
        }
    }

    /// Get display name for this grid style.
    pub fn name(self) -> &'static str {
        match self {
            GridStyle::None => "None",
            GridStyle::Lines => "Lines",
            GridStyle::Dots => "Dots",
        }
    }
}

/// Context for a single render frame.
pub struct RenderContext<'a> {
    /// The live scene to render.
    pub scene: &'a LiveScene,
    /// Viewport size in physical pixels.
    pub viewport_size: Size,
    /// Device pixel ratio (for HiDPI).
    pub scale_factor: f64,
    /// Background color.
    pub background_color: Color,
    /// Ground grid style.
    pub grid_style: GridStyle,
    /// Color of the gizmo center and the active handle.
    pub selection_color: Color,
}

impl<'a> RenderContext<'a> {
    /// Create a new render context.
    pub fn new(scene: &'a LiveScene, viewport_size: Size) -> Self {
        Self {
            scene,
            viewport_size,
            scale_factor: 1.0,
            background_color: Color::from_rgba8(236, 239, 244, 255),
            grid_style: GridStyle::Lines,
            selection_color: Color::from_rgba8(250, 204, 21, 255), // Amber
        }
    }

    /// Set the scale factor for HiDPI.
    pub fn with_scale_factor(mut self, scale_factor: f64) -> Self {
        self.scale_factor = scale_factor;
        self
    }

    /// Set the background color.
    pub fn with_background(mut self, color: Color) -> Self {
        self.background_color = color;
        self
    }

    /// Set the grid style.
    pub fn with_grid(mut self, style: GridStyle) -> Self {
        self.grid_style = style;
        self
    }
}

/// Trait for rendering backends.
///
/// Implementations can use Vello, wgpu directly, or other rendering engines.
pub trait Renderer: Send + Sync {
    /// Build the scene/command buffer for a frame.
    ///
    /// This method is called once per frame and should prepare all drawing commands.
    fn build_scene(&mut self, ctx: &RenderContext);

    /// Get the background color (for clearing).
    fn background_color(&self, ctx: &RenderContext) -> Color {
        ctx.background_color
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_style_cycles() {
        let mut style = GridStyle::default();
        assert_eq!(style, GridStyle::Lines);
        for _ in 0..3 {
            style = style.next();
        }
        assert_eq!(style, GridStyle::Lines);
        assert_eq!(GridStyle::None.next().name(), "Lines");
    }

    #[test]
    fn test_context_builders() {
        let scene = LiveScene::new();
        let ctx = RenderContext::new(&scene, Size::new(640.0, 480.0))
            .with_scale_factor(2.0)
            .with_grid(GridStyle::None)
            .with_background(Color::WHITE);
        assert_eq!(ctx.scale_factor, 2.0);
        assert_eq!(ctx.grid_style, GridStyle::None);
        assert_eq!(ctx.background_color.components, Color::WHITE.components);
    }

    #[test]
    fn test_error_messages_carry_cause() {
        let lost = RendererError::Surface("Surface lost".to_string());
        assert_eq!(lost.to_string(), "Surface error: Surface lost");
        let init: RenderResult<()> = Err(RendererError::InitFailed("no adapter".to_string()));
        assert!(matches!(init, Err(RendererError::InitFailed(ref m)) if m == "no adapter"));
    }
}
