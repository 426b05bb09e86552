//! 2D drawing context over a canvas surface.
//!
//! `DrawingContext` is the seam between the blitter and whatever owns the
//! pixels. `CanvasRenderingContext2d` is the in-process implementation; tests
//! and embedders may supply their own.

use crate::error::Result;
use crate::rendering::canvas::{Canvas, Rect};
use crate::rendering::image_data::ImageData;

pub trait DrawingContext: Send + Sync {
    /// The surface this context draws to
    fn canvas(&self) -> &Canvas;

    /// Allocate a blank buffer in the surface's native format.
    fn create_image_data(&self, width: u32, height: u32) -> Result<ImageData> {
        ImageData::new(width, height)
    }

    /// Overwrite surface pixels with `image`, top-left at `(dx, dy)`.
    ///
    /// No compositing: alpha is copied, not blended. Parts of the image that
    /// fall outside the surface are dropped. Returns the rectangle written,
    /// `None` when nothing overlapped.
    fn put_image_data(&self, image: &ImageData, dx: i32, dy: i32) -> Result<Option<Rect>>;

    /// Read back a block of surface pixels.
    fn get_image_data(&self, sx: i32, sy: i32, sw: u32, sh: u32) -> Result<ImageData>;
}

/// In-process 2D context bound to one canvas
#[derive(Debug, Clone)]
pub struct CanvasRenderingContext2d {
    canvas: Canvas,
}

impl CanvasRenderingContext2d {
    pub(crate) fn new(canvas: Canvas) -> Self {
        Self { canvas }
    }
}

impl DrawingContext for CanvasRenderingContext2d {
    fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    fn put_image_data(&self, image: &ImageData, dx: i32, dy: i32) -> Result<Option<Rect>> {
        Ok(self.canvas.write_region(image, dx, dy))
    }

    fn get_image_data(&self, sx: i32, sy: i32, sw: u32, sh: u32) -> Result<ImageData> {
        self.canvas.read_region(sx, sy, sw, sh)
    }
}
