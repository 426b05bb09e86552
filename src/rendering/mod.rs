//! Rendering surfaces: canvases, their 2D contexts, image data and export

pub mod canvas;
pub mod context;
pub mod image_data;
pub mod raster;

pub use canvas::{Canvas, Document, Rect};
pub use context::{CanvasRenderingContext2d, DrawingContext};
pub use image_data::ImageData;

// Encoded capture of a canvas, as produced by `raster::encode_png`.

#[derive(Debug, Clone)]
pub struct Screenshot {
    pub width: u32,
    pub height: u32,
    pub png_data: Vec<u8>,
}

impl Screenshot {
    pub fn is_empty(&self) -> bool {
        self.png_data.is_empty()
    }
}
