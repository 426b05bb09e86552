//! RFox Canvas
//!
//! A headless 2D canvas for Rust. Named surfaces live in a `Document`; a
//! `PixelBlitter` acquires one surface and its 2D context and writes raw RGBA
//! blocks onto it, the way `createImageData` + `putImageData` do in a page.
//!
//! # Features
//!
//! - **Checked pixel requests**: `BlitRequest` refuses buffers whose length is
//!   not `width * height * 4`
//! - **Opaque, clipped writes**: no alpha compositing, out-of-range offsets clip
//! - **Script host** (`script`, default): a Boa JS context exposing
//!   `updateImageData(i)` to scripts
//! - **Export**: PNG, `data:` URLs and SHA-256 pixel digests
//!
//! # Example
//!
//! ```
//! use rfcanvas::{BlitRequest, CanvasConfig};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = CanvasConfig { width: 32, height: 16, ..Default::default() };
//! let (_document, blitter) = rfcanvas::new_blitter(&config)?;
//!
//! let req = BlitRequest::new(2, 1, 5, 10, vec![255, 0, 0, 255, 0, 255, 0, 255])?;
//! blitter.blit(&req)?;
//! assert_eq!(blitter.canvas().pixel(5, 10), Some([255, 0, 0, 255]));
//! # Ok(())
//! # }
//! ```

use serde::Deserialize;
use std::path::Path;

pub mod error;
pub use error::{Error, Result};

pub mod blit;
pub use blit::{BlitRequest, PixelBlitter};

pub mod rendering;
pub use rendering::{Canvas, Document};

pub mod logger;

// Embedded JS host exposing `updateImageData`
#[cfg(feature = "script")]
pub mod script;

#[cfg(feature = "script")]
pub use script::{ScriptHost, ScriptResult};

/// Configuration for the canvas and the script host
///
/// The defaults mirror an unsized HTML `<canvas>`: 300x150, transparent black,
/// registered under the id `elm-canvas`.
///
/// # Examples
///
/// ```
/// let cfg = rfcanvas::CanvasConfig::default();
/// assert_eq!((cfg.width, cfg.height), (300, 150));
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CanvasConfig {
    /// Element id the canvas is registered under
    pub element_id: String,
    /// Surface width in pixels
    pub width: u32,
    /// Surface height in pixels
    pub height: u32,
    /// Initial RGBA fill
    pub background: [u8; 4],
    /// Whether the script host may evaluate JavaScript
    pub enable_javascript: bool,
    /// Maximum loop iterations before Boa throws an error (0 => disabled)
    pub script_loop_iteration_limit: u64,
    /// Maximum recursion depth before Boa throws (usize::MAX => disabled)
    pub script_recursion_limit: usize,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            element_id: "elm-canvas".to_string(),
            width: 300,
            height: 150,
            background: [0, 0, 0, 0],
            enable_javascript: true,
            script_loop_iteration_limit: 1000000,
            script_recursion_limit: 1024,
        }
    }
}

impl CanvasConfig {
    /// Load a JSON config file; missing fields take their defaults.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        let cfg: CanvasConfig = serde_json::from_str(&text)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<()> {
        if self.element_id.trim().is_empty() {
            return Err(Error::ConfigError("element_id must not be empty".into()));
        }
        if self.width == 0 || self.height == 0 {
            return Err(Error::ConfigError(format!(
                "canvas dimensions must be positive, got {}x{}",
                self.width, self.height
            )));
        }
        Ok(())
    }
}

/// Create a document holding the configured canvas and a blitter attached
/// to it.
pub fn new_blitter(config: &CanvasConfig) -> Result<(Document, PixelBlitter)> {
    let document = Document::from_config(config)?;
    let blitter = PixelBlitter::attach(&document, &config.element_id)?;
    Ok((document, blitter))
}
