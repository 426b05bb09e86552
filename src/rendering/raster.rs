/// Surface export: PNG encoding, data URLs and pixel digests

use base64::{engine::general_purpose::STANDARD, Engine as _};
use sha2::{Digest, Sha256};

use crate::error::{Error, Result};
use crate::rendering::canvas::Canvas;
use crate::rendering::Screenshot;

/// Encode the current surface contents as an RGBA8 PNG.
pub fn encode_png(canvas: &Canvas) -> Result<Screenshot> {
    canvas.with_pixels(|width, height, pixels| {
        let mut png_data = Vec::new();
        {
            let mut encoder = png::Encoder::new(&mut png_data, width, height);
            encoder.set_color(png::ColorType::Rgba);
            encoder.set_depth(png::BitDepth::Eight);
            let mut writer = encoder
                .write_header()
                .map_err(|e| Error::RenderError(format!("PNG header: {}", e)))?;
            writer
                .write_image_data(pixels)
                .map_err(|e| Error::RenderError(format!("PNG data: {}", e)))?;
            writer
                .finish()
                .map_err(|e| Error::RenderError(format!("PNG finish: {}", e)))?;
        }
        log::debug!("Encoded {}x{} canvas as {} PNG bytes", width, height, png_data.len());
        Ok(Screenshot { width, height, png_data })
    })
}

/// `data:image/png;base64,...` URL of the surface (`canvas.toDataURL()`).
pub fn to_data_url(canvas: &Canvas) -> Result<String> {
    let shot = encode_png(canvas)?;
    Ok(format!("data:image/png;base64,{}", STANDARD.encode(&shot.png_data)))
}

/// Hex SHA-256 of the raw surface pixels. Independent of PNG compression, so
/// it is stable across encoder versions.
pub fn pixel_digest(canvas: &Canvas) -> String {
    canvas.with_pixels(|width, height, pixels| {
        let mut hasher = Sha256::new();
        hasher.update(width.to_be_bytes());
        hasher.update(height.to_be_bytes());
        hasher.update(pixels);
        hex::encode(hasher.finalize())
    })
}
