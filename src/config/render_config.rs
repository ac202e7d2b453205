use std::path::Path;

use crate::foundation::core::{Canvas, Rgba8};
use crate::foundation::error::{TraceError, TraceResult};

/// Everything the renderer, marker drawer and animation driver read while drawing.
///
/// Owned by a [`crate::Session`] and passed by reference into the drawing functions; the only
/// mutations at runtime are the two view toggles (`full_view`, `rainbow`), which go through the
/// session so that a restart follows.
///
/// Deserializes with `#[serde(default)]`: a JSON file only needs the fields it overrides.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Surface size in pixels.
    pub canvas: Canvas,
    pub background_color: Rgba8,
    pub marker_color: Rgba8,
    /// Marker disc radius in pixels.
    pub marker_radius: f64,
    /// Stroke colour when `rainbow` is off.
    pub path_color: Rgba8,
    /// Stroke width in pixels.
    pub stroke_width: f64,
    /// Samples the cursor advances per tick. Must be non-zero.
    pub step: usize,
    /// Hue (degrees) of the first segment in every rendered range.
    pub hue_offset: f64,
    /// Hue added after each segment. Unbounded; colours wrap modulo 360.
    pub hue_increment: f64,
    /// Draw the whole path at once, no marker, no ticking.
    pub full_view: bool,
    /// Hue-cycled gradient stroke instead of `path_color`.
    pub rainbow: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            canvas: Canvas {
                width: 600,
                height: 600,
            },
            background_color: Rgba8::opaque(0xff, 0xf2, 0xd7),
            marker_color: Rgba8::BLACK,
            marker_radius: 5.0,
            path_color: Rgba8::opaque(0xff, 0xe0, 0xb5),
            stroke_width: 4.0,
            step: 1,
            hue_offset: 0.0,
            hue_increment: 0.04,
            full_view: false,
            rainbow: true,
        }
    }
}

impl RenderConfig {
    pub fn validate(&self) -> TraceResult<()> {
        self.canvas.validate()?;
        if self.step == 0 {
            return Err(TraceError::validation("step must be non-zero"));
        }
        if !self.marker_radius.is_finite() || self.marker_radius < 0.0 {
            return Err(TraceError::validation(
                "marker_radius must be finite and >= 0",
            ));
        }
        if !self.stroke_width.is_finite() || self.stroke_width < 0.0 {
            return Err(TraceError::validation(
                "stroke_width must be finite and >= 0",
            ));
        }
        if !self.hue_offset.is_finite() || !self.hue_increment.is_finite() {
            return Err(TraceError::validation(
                "hue_offset/hue_increment must be finite",
            ));
        }
        Ok(())
    }

    /// Parse and validate a JSON configuration.
    pub fn from_json_str(s: &str) -> TraceResult<Self> {
        let cfg: Self = serde_json::from_str(s)
            .map_err(|e| TraceError::serde(format!("invalid render config: {e}")))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Read, parse and validate a JSON configuration file.
    pub fn from_path(path: &Path) -> TraceResult<Self> {
        use anyhow::Context as _;

        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read render config '{}'", path.display()))?;
        Self::from_json_str(&text)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/config/render_config.rs"]
mod tests;
