/// Surface-native RGBA pixel buffer (the `ImageData` of a 2D context)

use crate::error::{rgba_len, Error, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageData {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl ImageData {
    /// Allocate a transparent black buffer of `width x height` pixels.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        let len = rgba_len(width, height)?;
        Ok(Self { width, height, data: vec![0; len] })
    }

    /// Wrap an owned RGBA buffer, failing if its length is not `width * height * 4`.
    pub fn from_vec(width: u32, height: u32, data: Vec<u8>) -> Result<Self> {
        let expected = rgba_len(width, height)?;
        if data.len() != expected {
            return Err(Error::LengthMismatch { expected, actual: data.len() });
        }
        Ok(Self { width, height, data })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Copy `src` into the buffer starting at byte 0.
    ///
    /// A shorter source leaves the tail untouched; a longer one is rejected
    /// without writing anything.
    pub fn set(&mut self, src: &[u8]) -> Result<()> {
        if src.len() > self.data.len() {
            return Err(Error::LengthMismatch { expected: self.data.len(), actual: src.len() });
        }
        self.data[..src.len()].copy_from_slice(src);
        Ok(())
    }

    /// RGBA of the pixel at `(x, y)` in buffer coordinates.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = (y as usize * self.width as usize + x as usize) * 4;
        let mut px = [0u8; 4];
        px.copy_from_slice(&self.data[i..i + 4]);
        Some(px)
    }

    /// One row of pixels as a byte slice.
    pub fn row(&self, y: u32) -> &[u8] {
        let stride = self.width as usize * 4;
        let start = y as usize * stride;
        &self.data[start..start + stride]
    }
}
