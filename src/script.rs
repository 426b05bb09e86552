//! Script host: an embedded Boa context that exposes `updateImageData(i)`.
//!
//! Arguments are coerced the way `createImageData` and a `Uint8ClampedArray`
//! would: dimensions to unsigned integers, pixel values clamped to 0..=255.
//! Calls made by a script are queued inside the JS context and drained after
//! each evaluation, then applied to the blitter in the order they were issued.
//! Everything runs on the caller's thread.

use boa_engine::{Context, Source};

use crate::blit::{BlitRequest, PixelBlitter};
use crate::{CanvasConfig, Error, Result};

const PRELUDE: &str = r#"
var __rfcanvas_blits = [];
function updateImageData(i) {
    __rfcanvas_blits.push({
        width: i.width >>> 0,
        height: i.height >>> 0,
        x: i.x | 0,
        y: i.y | 0,
        data: Array.from(Uint8ClampedArray.from(i.data))
    });
}
"#;

const DRAIN: &str = "JSON.stringify(__rfcanvas_blits.splice(0))";

/// Result of JavaScript execution
///
/// `value` is the displayed result of the evaluation. `is_error` indicates
/// whether the script threw an exception.
#[derive(Debug, Clone, PartialEq)]
pub struct ScriptResult {
    /// Displayed result value
    pub value: String,
    /// Whether the script threw an error
    pub is_error: bool,
}

pub struct ScriptHost {
    ctx: Context,
    blitter: PixelBlitter,
    enable_javascript: bool,
}

impl ScriptHost {
    /// Build a JS context bound to `blitter`, applying the script limits from
    /// `config`. Scripts also see a `canvas` global with `id`, `width` and
    /// `height`.
    pub fn new(blitter: PixelBlitter, config: &CanvasConfig) -> Result<Self> {
        let mut ctx = Context::default();
        if config.script_loop_iteration_limit > 0 {
            ctx.runtime_limits_mut()
                .set_loop_iteration_limit(config.script_loop_iteration_limit);
        }
        if config.script_recursion_limit < usize::MAX {
            ctx.runtime_limits_mut()
                .set_recursion_limit(config.script_recursion_limit);
        }

        let canvas = blitter.canvas();
        let bounds = canvas.bounds();
        let globals = format!(
            "{}\nvar canvas = {{ id: {}, width: {}, height: {} }};",
            PRELUDE,
            serde_json::to_string(canvas.id())?,
            bounds.width,
            bounds.height
        );
        ctx.eval(Source::from_bytes(globals.as_bytes()))
            .map_err(|e| Error::ScriptError(format!("Failed to install host globals: {}", e)))?;

        Ok(Self { ctx, blitter, enable_javascript: config.enable_javascript })
    }

    pub fn blitter(&self) -> &PixelBlitter {
        &self.blitter
    }

    pub fn into_blitter(self) -> PixelBlitter {
        self.blitter
    }

    /// Evaluate `code`, then apply every `updateImageData` call it made.
    ///
    /// Calls issued before a throw are still applied. A thrown script is a
    /// `ScriptResult` with `is_error` set; a malformed `updateImageData`
    /// argument is an `Error::ScriptError` and stops at that call.
    pub fn eval(&mut self, code: &str) -> Result<ScriptResult> {
        if !self.enable_javascript {
            return Err(Error::ScriptError("JavaScript is disabled in config".into()));
        }

        let outcome = self.ctx.eval(Source::from_bytes(code.as_bytes()));
        let applied = self.flush_blits()?;
        log::debug!("Script issued {} blit(s)", applied);

        Ok(match outcome {
            Ok(val) => ScriptResult { value: format!("{}", val.display()), is_error: false },
            Err(e) => {
                log::warn!("Script thrown: {}", e);
                ScriptResult { value: format!("Script thrown: {}", e), is_error: true }
            }
        })
    }

    fn flush_blits(&mut self) -> Result<usize> {
        let queued = self
            .ctx
            .eval(Source::from_bytes(DRAIN.as_bytes()))
            .map_err(|e| Error::ScriptError(format!("Failed to read blit queue: {}", e)))?;
        let json = queued
            .as_string()
            .map(|s| s.to_std_string_escaped())
            .ok_or_else(|| Error::ScriptError("Blit queue is not serializable".into()))?;

        let raw: Vec<serde_json::Value> = serde_json::from_str(&json)
            .map_err(|e| Error::ScriptError(format!("Invalid blit queue: {}", e)))?;
        let mut applied = 0;
        for (n, value) in raw.into_iter().enumerate() {
            let request: BlitRequest = serde_json::from_value(value).map_err(|e| {
                Error::ScriptError(format!("Invalid updateImageData argument #{}: {}", n, e))
            })?;
            self.blitter.blit(&request)?;
            applied += 1;
        }
        Ok(applied)
    }
}

impl std::fmt::Debug for ScriptHost {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScriptHost")
            .field("blitter", &self.blitter)
            .field("enable_javascript", &self.enable_javascript)
            .finish()
    }
}
