use crate::foundation::core::{Canvas, Point, Rect, Rgba8};
use crate::foundation::error::TraceResult;

/// A rendered frame as RGBA8 pixels.
#[derive(Clone, Debug)]
pub struct FrameRGBA {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// RGBA8 bytes, tightly packed, row-major.
    pub data: Vec<u8>,
    /// Whether the `data` is premultiplied alpha.
    pub premultiplied: bool,
}

/// Paint for one stroked segment.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SegmentPaint {
    /// One colour along the whole segment.
    Solid(Rgba8),
    /// Linear gradient from `start` at the first endpoint to `end` at the second.
    Linear {
        /// Colour at the segment's first endpoint.
        start: Rgba8,
        /// Colour at the segment's second endpoint.
        end: Rgba8,
    },
}

/// The drawing primitives the path renderer and marker drawer need.
///
/// Coordinates are surface pixels. Implementations draw nothing for non-finite geometry.
pub trait Surface {
    /// Pixel size of the surface.
    fn canvas(&self) -> Canvas;

    /// Reset the whole surface to transparent.
    fn clear(&mut self);

    fn fill_rect(&mut self, rect: Rect, color: Rgba8);

    /// Stroke the straight segment `from -> to` with butt caps.
    fn stroke_segment(&mut self, from: Point, to: Point, width: f64, paint: SegmentPaint);

    fn fill_disc(&mut self, center: Point, radius: f64, color: Rgba8);
}

/// Surfaces whose current contents can be read back as pixels.
pub trait Readback {
    fn readback_rgba8(&mut self) -> TraceResult<FrameRGBA>;
}
