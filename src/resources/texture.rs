use anyhow::Context as _;
use image::{ImageFormat, load_from_memory_with_format};

use crate::resources::load_binary;

/// Decodes image file contents to RGBA8.
///
/// `format` is an optional file extension hint such as `"png"`; without it the
/// format is guessed from the data.
pub fn decode_rgba(bytes: &[u8], format: Option<&str>) -> anyhow::Result<image::RgbaImage> {
    let img = match format.and_then(ImageFormat::from_extension) {
        None => image::load_from_memory(bytes)?,
        Some(fmt) => load_from_memory_with_format(bytes, fmt)?,
    };
    Ok(img.to_rgba8())
}

/// Reads and decodes one texture image. Any failure is fatal for the object.
pub async fn load_image(file_name: &str) -> anyhow::Result<image::RgbaImage> {
    let data = load_binary(file_name).await?;
    let extension = std::path::Path::new(file_name)
        .extension()
        .and_then(|ext| ext.to_str());
    decode_rgba(&data, extension).with_context(|| format!("decoding texture {file_name}"))
}

/// Loads every image in `file_names`, keeping their order.
pub async fn load_images(file_names: &[&str]) -> anyhow::Result<Vec<image::RgbaImage>> {
    futures::future::try_join_all(file_names.iter().map(|name| load_image(name))).await
}
