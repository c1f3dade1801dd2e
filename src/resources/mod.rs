//! Loading of assets from the `assets/` directory next to the binary.
//!
//! Only decoding happens here. Uploading to the GPU is the render backend's
//! job and stays on the thread that owns the context.

use std::path::{Path, PathBuf};

use anyhow::Context as _;

pub mod texture;

/// Directory all asset names are resolved against.
pub fn asset_path(file_name: &str) -> PathBuf {
    Path::new("./").join("assets").join(file_name)
}

pub async fn load_binary(file_name: &str) -> anyhow::Result<Vec<u8>> {
    let path = asset_path(file_name);
    let data = std::fs::read(&path).with_context(|| format!("reading asset {}", path.display()))?;
    Ok(data)
}
