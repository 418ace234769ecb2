//! DRM auth token files.
//!
//! The game executable looks its token up in a shared directory under a
//! filename derived from the product id.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use fastlaunch_core::error::Result;
use std::fs;
use std::path::{Path, PathBuf};

/// `dir/<base64 of the UTF-8 product id>`.
pub fn drm_token_path(dir: &Path, product_id: &str) -> PathBuf {
    dir.join(STANDARD.encode(product_id.as_bytes()))
}

/// Writes `token` as the sole content of the product's token file,
/// replacing any earlier token. Returns the written path.
pub fn write_drm_token(dir: &Path, product_id: &str, token: &str) -> Result<PathBuf> {
    let path = drm_token_path(dir, product_id);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&path, token)?;
    Ok(path)
}
