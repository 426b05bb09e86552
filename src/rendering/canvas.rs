//! Canvas surfaces and the document that owns them.
//!
//! A `Canvas` is a cheap-to-clone handle onto a shared RGBA8 bitmap, the way a
//! DOM element handle refers to one node. The `Document` keeps canvases by
//! element id so a blitter can acquire its surface once at startup.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::error::{rgba_len, Error, Result};
use crate::rendering::context::CanvasRenderingContext2d;
use crate::rendering::image_data::ImageData;
use crate::CanvasConfig;

/// Axis-aligned rectangle in surface coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    pub fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self { x, y, width, height }
    }

    /// Overlap of two rectangles, `None` when they do not touch.
    pub fn intersect(&self, other: &Rect) -> Option<Rect> {
        let x0 = (self.x as i64).max(other.x as i64);
        let y0 = (self.y as i64).max(other.y as i64);
        let x1 = (self.x as i64 + self.width as i64).min(other.x as i64 + other.width as i64);
        let y1 = (self.y as i64 + self.height as i64).min(other.y as i64 + other.height as i64);
        if x0 < x1 && y0 < y1 {
            Some(Rect {
                x: x0 as i32,
                y: y0 as i32,
                width: (x1 - x0) as u32,
                height: (y1 - y0) as u32,
            })
        } else {
            None
        }
    }

    pub fn contains(&self, x: i32, y: i32) -> bool {
        let (x, y) = (x as i64, y as i64);
        x >= self.x as i64
            && y >= self.y as i64
            && x < self.x as i64 + self.width as i64
            && y < self.y as i64 + self.height as i64
    }
}

#[derive(Debug)]
struct Bitmap {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

/// Handle to a named drawing surface
#[derive(Debug, Clone)]
pub struct Canvas {
    id: Arc<str>,
    bitmap: Arc<Mutex<Bitmap>>,
}

impl Canvas {
    /// Create a surface filled with `background` (RGBA).
    pub fn new(id: &str, width: u32, height: u32, background: [u8; 4]) -> Result<Self> {
        let len = rgba_len(width, height)?;
        let mut pixels = Vec::new();
        pixels
            .try_reserve_exact(len)
            .map_err(|_| Error::InvalidDimensions { width, height })?;
        for _ in 0..len / 4 {
            pixels.extend_from_slice(&background);
        }
        Ok(Self {
            id: Arc::from(id),
            bitmap: Arc::new(Mutex::new(Bitmap { width, height, pixels })),
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn width(&self) -> u32 {
        self.lock().width
    }

    pub fn height(&self) -> u32 {
        self.lock().height
    }

    pub fn bounds(&self) -> Rect {
        let b = self.lock();
        Rect::new(0, 0, b.width, b.height)
    }

    /// Obtain a drawing context. Only `"2d"` is supported.
    pub fn get_context(&self, kind: &str) -> Result<CanvasRenderingContext2d> {
        match kind {
            "2d" => Ok(CanvasRenderingContext2d::new(self.clone())),
            other => Err(Error::ContextUnavailable(other.to_string())),
        }
    }

    /// RGBA of the pixel at `(x, y)`, `None` outside the surface.
    pub fn pixel(&self, x: i32, y: i32) -> Option<[u8; 4]> {
        let b = self.lock();
        if !Rect::new(0, 0, b.width, b.height).contains(x, y) {
            return None;
        }
        let i = (y as usize * b.width as usize + x as usize) * 4;
        let mut px = [0u8; 4];
        px.copy_from_slice(&b.pixels[i..i + 4]);
        Some(px)
    }

    /// Copy of the whole surface, row-major RGBA.
    pub fn pixels(&self) -> Vec<u8> {
        self.lock().pixels.clone()
    }

    /// Run `f` over the surface pixels without copying them.
    pub fn with_pixels<R>(&self, f: impl FnOnce(u32, u32, &[u8]) -> R) -> R {
        let b = self.lock();
        f(b.width, b.height, &b.pixels)
    }

    /// Whether two handles refer to the same surface.
    pub fn same_surface(&self, other: &Canvas) -> bool {
        Arc::ptr_eq(&self.bitmap, &other.bitmap)
    }

    /// Overwrite the region covered by `image` at `(dx, dy)`, clipped to the
    /// surface. Returns the rectangle actually written.
    pub(crate) fn write_region(&self, image: &ImageData, dx: i32, dy: i32) -> Option<Rect> {
        let mut b = self.lock();
        let surface = Rect::new(0, 0, b.width, b.height);
        let dirty = surface.intersect(&Rect::new(dx, dy, image.width(), image.height()))?;

        let stride = b.width as usize * 4;
        let src_x = (dirty.x as i64 - dx as i64) as usize;
        let src_y = (dirty.y as i64 - dy as i64) as usize;
        let run = dirty.width as usize * 4;
        for row in 0..dirty.height as usize {
            let src = &image.row((src_y + row) as u32)[src_x * 4..src_x * 4 + run];
            let dst = (dirty.y as usize + row) * stride + dirty.x as usize * 4;
            b.pixels[dst..dst + run].copy_from_slice(src);
        }
        Some(dirty)
    }

    /// Read a `sw x sh` block at `(sx, sy)`. Pixels outside the surface read
    /// as transparent black.
    pub(crate) fn read_region(&self, sx: i32, sy: i32, sw: u32, sh: u32) -> Result<ImageData> {
        let mut out = ImageData::new(sw, sh)?;
        let b = self.lock();
        let surface = Rect::new(0, 0, b.width, b.height);
        if let Some(hit) = surface.intersect(&Rect::new(sx, sy, sw, sh)) {
            let stride = b.width as usize * 4;
            let out_stride = sw as usize * 4;
            let dst_x = (hit.x as i64 - sx as i64) as usize;
            let dst_y = (hit.y as i64 - sy as i64) as usize;
            let run = hit.width as usize * 4;
            let data = out.data_mut();
            for row in 0..hit.height as usize {
                let src = (hit.y as usize + row) * stride + hit.x as usize * 4;
                let dst = (dst_y + row) * out_stride + dst_x * 4;
                data[dst..dst + run].copy_from_slice(&b.pixels[src..src + run]);
            }
        }
        Ok(out)
    }

    fn lock(&self) -> MutexGuard<'_, Bitmap> {
        // Pixels are plain bytes, so a poisoned lock is still usable.
        self.bitmap.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Host registry of named surfaces (`document.getElementById`)
#[derive(Debug, Default)]
pub struct Document {
    elements: HashMap<String, Canvas>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    /// Document containing the single canvas described by `config`.
    pub fn from_config(config: &CanvasConfig) -> Result<Self> {
        config.validate()?;
        let mut doc = Self::new();
        doc.create_canvas(&config.element_id, config.width, config.height, config.background)?;
        Ok(doc)
    }

    /// Create (or replace) the canvas registered under `id`.
    pub fn create_canvas(
        &mut self,
        id: &str,
        width: u32,
        height: u32,
        background: [u8; 4],
    ) -> Result<Canvas> {
        let canvas = Canvas::new(id, width, height, background)?;
        if self.elements.insert(id.to_string(), canvas.clone()).is_some() {
            log::debug!("Replaced canvas '{}'", id);
        }
        Ok(canvas)
    }

    pub fn get_element_by_id(&self, id: &str) -> Option<Canvas> {
        self.elements.get(id).cloned()
    }
}
