use crate::foundation::core::{Canvas, Point};
use crate::path::model::PolarSample;

/// Polar to planar: `x = rho * cos(theta)`, `y = rho * sin(theta)`.
///
/// NaN and infinities propagate unchanged.
pub fn project(theta: f64, rho: f64) -> Point {
    let (sin, cos) = theta.sin_cos();
    Point::new(rho * cos, rho * sin)
}

/// Maps normalized points (roughly `[-1, 1]` on both axes) onto surface pixels, origin centred.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScreenMapping {
    half_width: f64,
    half_height: f64,
}

impl ScreenMapping {
    pub fn new(canvas: Canvas) -> Self {
        Self {
            half_width: f64::from(canvas.width) / 2.0,
            half_height: f64::from(canvas.height) / 2.0,
        }
    }

    /// `(x * W/2 + W/2, y * H/2 + H/2)`. The y axis is not flipped.
    pub fn to_surface(self, p: Point) -> Point {
        Point::new(
            p.x * self.half_width + self.half_width,
            p.y * self.half_height + self.half_height,
        )
    }

    pub fn sample_to_surface(self, sample: PolarSample) -> Point {
        self.to_surface(sample.to_point())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/path/project.rs"]
mod tests;
