//! Pixel blitter: copy a caller-supplied RGBA block onto a canvas.
//!
//! The blitter acquires its surface and 2D context once and keeps them for
//! its lifetime. Each `blit` allocates a fresh native `ImageData`, copies the
//! request bytes into it and puts it at the requested offset. Writes are
//! opaque (no alpha compositing) and clip to the surface bounds.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{Deserialize, Deserializer};

use crate::error::{rgba_len, Error, Result};
use crate::rendering::{Canvas, DrawingContext, Document};

/// A rectangular RGBA patch and the offset to write it at.
///
/// `data` is row-major RGBA and always holds exactly `width * height * 4`
/// bytes; both constructors and deserialization enforce this.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "RawBlitRequest")]
pub struct BlitRequest {
    width: u32,
    height: u32,
    x: i32,
    y: i32,
    data: Vec<u8>,
}

impl BlitRequest {
    pub fn new(width: u32, height: u32, x: i32, y: i32, data: Vec<u8>) -> Result<Self> {
        let expected = rgba_len(width, height)?;
        if data.len() != expected {
            return Err(Error::LengthMismatch { expected, actual: data.len() });
        }
        Ok(Self { width, height, x, y, data })
    }

    /// A `width x height` block filled with one colour.
    pub fn solid(width: u32, height: u32, x: i32, y: i32, rgba: [u8; 4]) -> Result<Self> {
        let len = rgba_len(width, height)?;
        let data = rgba.iter().copied().cycle().take(len).collect();
        Self::new(width, height, x, y, data)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn x(&self) -> i32 {
        self.x
    }

    pub fn y(&self) -> i32 {
        self.y
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Parse a JSON array of requests (or a single request object).
    pub fn parse_json(json: &str) -> Result<Vec<Self>> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum OneOrMany {
            Many(Vec<BlitRequest>),
            One(BlitRequest),
        }
        let parsed: OneOrMany = serde_json::from_str(json)
            .map_err(|e| Error::Other(format!("Invalid blit request JSON: {}", e)))?;
        Ok(match parsed {
            OneOrMany::Many(v) => v,
            OneOrMany::One(r) => vec![r],
        })
    }
}

#[derive(Deserialize)]
struct RawBlitRequest {
    width: u32,
    height: u32,
    x: i32,
    y: i32,
    #[serde(deserialize_with = "deserialize_pixels")]
    data: Vec<u8>,
}

impl TryFrom<RawBlitRequest> for BlitRequest {
    type Error = Error;

    fn try_from(raw: RawBlitRequest) -> Result<Self> {
        BlitRequest::new(raw.width, raw.height, raw.x, raw.y, raw.data)
    }
}

// Pixel data is either an array of byte values or a base64 string.
fn deserialize_pixels<'de, D>(deserializer: D) -> std::result::Result<Vec<u8>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum PixelData {
        Bytes(Vec<u8>),
        Base64(String),
    }

    match PixelData::deserialize(deserializer)? {
        PixelData::Bytes(bytes) => Ok(bytes),
        PixelData::Base64(s) => STANDARD.decode(s.trim()).map_err(serde::de::Error::custom),
    }
}

/// Writes pixel blocks onto one surface through its drawing context.
pub struct PixelBlitter {
    ctx: Box<dyn DrawingContext>,
}

impl PixelBlitter {
    /// Look up `element_id` in `document` and acquire its 2D context.
    pub fn attach(document: &Document, element_id: &str) -> Result<Self> {
        let canvas = document
            .get_element_by_id(element_id)
            .ok_or_else(|| Error::SurfaceNotFound(element_id.to_string()))?;
        let ctx = canvas.get_context("2d")?;
        log::debug!(
            "Attached blitter to '{}' ({}x{})",
            element_id,
            canvas.width(),
            canvas.height()
        );
        Ok(Self::with_context(Box::new(ctx)))
    }

    /// Use an already acquired context.
    pub fn with_context(ctx: Box<dyn DrawingContext>) -> Self {
        Self { ctx }
    }

    pub fn canvas(&self) -> &Canvas {
        self.ctx.canvas()
    }

    pub fn context(&self) -> &dyn DrawingContext {
        self.ctx.as_ref()
    }

    /// Copy `request.data` onto the surface with its top-left at `(x, y)`.
    ///
    /// Only pixels inside both the request rectangle and the surface change.
    /// An offset that places the block entirely off-surface is a no-op.
    pub fn blit(&self, request: &BlitRequest) -> Result<()> {
        let mut image = self.ctx.create_image_data(request.width, request.height)?;
        image.set(&request.data)?;
        match self.ctx.put_image_data(&image, request.x, request.y)? {
            Some(dirty) => {
                if dirty.width != request.width || dirty.height != request.height {
                    log::trace!(
                        "Blit {}x{} at ({}, {}) clipped to {:?}",
                        request.width,
                        request.height,
                        request.x,
                        request.y,
                        dirty
                    );
                }
                log::debug!(
                    "Blit {}x{} at ({}, {}) onto '{}'",
                    request.width,
                    request.height,
                    request.x,
                    request.y,
                    self.canvas().id()
                );
            }
            None => log::warn!(
                "Blit {}x{} at ({}, {}) lies outside '{}'; nothing drawn",
                request.width,
                request.height,
                request.x,
                request.y,
                self.canvas().id()
            ),
        }
        Ok(())
    }

    /// Same as [`blit`](Self::blit), named after the host-facing entry point.
    pub fn update_image_data(&self, request: &BlitRequest) -> Result<()> {
        self.blit(request)
    }

    /// Apply requests in order, stopping at the first failure.
    /// Returns how many were applied.
    pub fn blit_all<'a, I>(&self, requests: I) -> Result<usize>
    where
        I: IntoIterator<Item = &'a BlitRequest>,
    {
        let mut applied = 0;
        for request in requests {
            self.blit(request)?;
            applied += 1;
        }
        Ok(applied)
    }
}

impl std::fmt::Debug for PixelBlitter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PixelBlitter").field("canvas", &self.canvas().id()).finish()
    }
}
