//! GLB container layout.
//!
//! ```text
//! header:  magic "glTF" | version 2 | total length       (3 x u32 LE)
//! chunk 0: length | "JSON" | json padded with spaces to 4 bytes
//! chunk 1: length | "BIN\0" | binary padded with zeros to 4 bytes (optional)
//! ```

use super::{ExportError, ExportResult};

const GLB_MAGIC: u32 = 0x4654_6C67;
const GLB_VERSION: u32 = 2;
const CHUNK_JSON: u32 = 0x4E4F_534A;
const CHUNK_BIN: u32 = 0x004E_4942;
const HEADER_LEN: usize = 12;
const CHUNK_HEADER_LEN: usize = 8;

fn padded(len: usize) -> usize {
    len.div_ceil(4) * 4
}

fn push_chunk(out: &mut Vec<u8>, kind: u32, data: &[u8], pad: u8) {
    let len = padded(data.len());
    out.extend_from_slice(&(len as u32).to_le_bytes());
    out.extend_from_slice(&kind.to_le_bytes());
    out.extend_from_slice(data);
    out.resize(out.len() + len - data.len(), pad);
}

/// Assemble a GLB file from a JSON document and its binary buffer.
/// An empty `bin` omits the binary chunk.
pub fn write_glb(json: &[u8], bin: &[u8]) -> ExportResult<Vec<u8>> {
    let mut total = HEADER_LEN + CHUNK_HEADER_LEN + padded(json.len());
    if !bin.is_empty() {
        total += CHUNK_HEADER_LEN + padded(bin.len());
    }
    let total_u32 = u32::try_from(total).map_err(|_| ExportError::TooLarge(total))?;

    let mut out = Vec::with_capacity(total);
    out.extend_from_slice(&GLB_MAGIC.to_le_bytes());
    out.extend_from_slice(&GLB_VERSION.to_le_bytes());
    out.extend_from_slice(&total_u32.to_le_bytes());
    push_chunk(&mut out, CHUNK_JSON, json, b' ');
    if !bin.is_empty() {
        push_chunk(&mut out, CHUNK_BIN, bin, 0);
    }
    debug_assert_eq!(out.len(), total);
    Ok(out)
}
