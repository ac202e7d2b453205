use crate::foundation::error::{TraceError, TraceResult};

pub use kurbo::{Point, Rect};

/// Pixel dimensions of a drawing surface.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    pub width: u32,
    pub height: u32,
}

impl Canvas {
    /// Largest edge the CPU raster backend can address.
    pub const MAX_EDGE: u32 = u16::MAX as u32;

    pub fn new(width: u32, height: u32) -> TraceResult<Self> {
        let canvas = Self { width, height };
        canvas.validate()?;
        Ok(canvas)
    }

    pub fn validate(self) -> TraceResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(TraceError::validation(
                "canvas width/height must be non-zero",
            ));
        }
        if self.width > Self::MAX_EDGE || self.height > Self::MAX_EDGE {
            return Err(TraceError::validation(format!(
                "canvas {}x{} exceeds the maximum edge of {} pixels",
                self.width,
                self.height,
                Self::MAX_EDGE
            )));
        }
        Ok(())
    }

    pub fn rect(self) -> Rect {
        Rect::new(0.0, 0.0, f64::from(self.width), f64::from(self.height))
    }

    pub fn byte_len_rgba8(self) -> usize {
        self.width as usize * self.height as usize * 4
    }
}

/// Straight-alpha RGBA8 colour.
///
/// Serialized as `#RRGGBB` / `#RRGGBBAA`; see [`crate::foundation::color`] for every accepted
/// input form.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rgba8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba8 {
    pub const BLACK: Self = Self::opaque(0, 0, 0);
    pub const TRANSPARENT: Self = Self::new(0, 0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
