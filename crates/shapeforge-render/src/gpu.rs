//! GPU plumbing around the vello renderer, with failures mapped to
//! [`RendererError`].

use vello::util::RenderSurface;
use vello::wgpu::{Device, Queue, SurfaceTexture, TextureView};
use vello::{RenderParams, RendererOptions, Scene};

use crate::renderer::{RenderResult, RendererError};

/// Create the vello GPU renderer for `device`.
pub fn create_gpu_renderer(device: &Device) -> RenderResult<vello::Renderer> {
    vello::Renderer::new(device, RendererOptions::default()).map_err(|e| RendererError::InitFailed(e.to_string()))
}

/// Get the next texture to present on `surface`.
pub fn acquire_frame(surface: &RenderSurface<'_>) -> RenderResult<SurfaceTexture> {
    surface
        .surface
        .get_current_texture()
        .map_err(|e| RendererError::Surface(e.to_string()))
}

/// Render `scene` into `view`.
pub fn render_to_view(
    renderer: &mut vello::Renderer,
    device: &Device,
    queue: &Queue,
    scene: &Scene,
    view: &TextureView,
    params: &RenderParams,
) -> RenderResult<()> {
    renderer
        .render_to_texture(device, queue, scene, view, params)
        .map_err(|e| RendererError::RenderFailed(e.to_string()))
}
