//! Binary glTF export of the live scene.

mod glb;
mod gltf;

pub use glb::write_glb;

use std::path::Path;

use thiserror::Error;

use crate::scene::LiveScene;

/// File name offered for downloads.
pub const EXPORT_FILE_NAME: &str = "scene.glb";
/// MIME type of the exported bytes.
pub const GLB_MIME_TYPE: &str = "model/gltf-binary";

/// Export errors.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("No scene is mounted")]
    NoScene,
    #[error("Failed to encode glTF JSON: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("Scene is too large for a GLB container ({0} bytes)")]
    TooLarge(usize),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for export operations.
pub type ExportResult<T> = Result<T, ExportError>;

/// Serialize `scene` to a GLB byte buffer.
///
/// Takes the scene explicitly; `None` means nothing is mounted.
pub fn export_glb(scene: Option<&LiveScene>) -> ExportResult<Vec<u8>> {
    let scene = scene.ok_or(ExportError::NoScene)?;
    let (document, bin) = gltf::build_document(scene);
    let json = serde_json::to_vec(&document)?;
    let bytes = write_glb(&json, &bin)?;
    log::info!("Exported {} objects to {} bytes of GLB", scene.len(), bytes.len());
    Ok(bytes)
}

/// Write exported bytes to disk.
pub fn save_glb(path: impl AsRef<Path>, bytes: &[u8]) -> ExportResult<()> {
    let path = path.as_ref();
    std::fs::write(path, bytes)?;
    log::info!("Saved {} bytes to {}", bytes.len(), path.display());
    Ok(())
}
