//! ShapeForge Render Library
//!
//! Renderer abstraction and implementations for ShapeForge.
//! The default implementation uses Vello for GPU-accelerated rendering.

mod renderer;

#[cfg(feature = "vello-renderer")]
mod gpu;
#[cfg(feature = "vello-renderer")]
mod vello_impl;

pub use renderer::{GridStyle, RenderContext, RenderResult, Renderer, RendererError};

#[cfg(feature = "vello-renderer")]
pub use gpu::{acquire_frame, create_gpu_renderer, render_to_view};
#[cfg(feature = "vello-renderer")]
pub use vello_impl::{project_faces, ProjectedFace, VelloRenderer};
