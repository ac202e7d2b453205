use crate::config::render_config::RenderConfig;
use crate::foundation::core::Rgba8;
use crate::path::model::ThetaRhoPath;
use crate::path::project::ScreenMapping;
use crate::render::surface::{SegmentPaint, Surface};

/// Counters from one [`render_range`] call.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RenderStats {
    /// Segments stroked.
    pub segments: usize,
}

/// Clear the surface, fill the background, then stroke the polyline through samples
/// `start..=end`.
///
/// Clearing happens on every call, so whatever was drawn before is gone even when the range is
/// partial or empty. `end` is clamped to the last sample. In rainbow mode hue starts at
/// `config.hue_offset` on every call and grows by `config.hue_increment` per segment; each
/// segment is a gradient from its start hue to start hue plus one increment.
pub fn render_range<S: Surface + ?Sized>(
    surface: &mut S,
    path: &ThetaRhoPath,
    config: &RenderConfig,
    start: usize,
    end: usize,
) -> RenderStats {
    let canvas = surface.canvas();
    surface.clear();
    surface.fill_rect(canvas.rect(), config.background_color);

    let mut stats = RenderStats::default();
    let Some(last) = path.len().checked_sub(1) else {
        return stats;
    };
    let end = end.min(last);
    let mapping = ScreenMapping::new(canvas);

    let mut hue = config.hue_offset;
    for i in start.saturating_add(1)..=end {
        let (Some(a), Some(b)) = (path.get(i - 1), path.get(i)) else {
            break;
        };

        let paint = if config.rainbow {
            SegmentPaint::Linear {
                start: hue_color(hue),
                end: hue_color(hue + config.hue_increment),
            }
        } else {
            SegmentPaint::Solid(config.path_color)
        };

        surface.stroke_segment(
            mapping.sample_to_surface(a),
            mapping.sample_to_surface(b),
            config.stroke_width,
            paint,
        );
        stats.segments += 1;
        hue += config.hue_increment;
    }

    stats
}

/// Render every sample of `path` (full-view mode). No marker.
pub fn render_full<S: Surface + ?Sized>(
    surface: &mut S,
    path: &ThetaRhoPath,
    config: &RenderConfig,
) -> RenderStats {
    render_range(surface, path, config, 0, path.len().saturating_sub(1))
}

/// Draw the marker disc at sample `index`. Returns `false` (and draws nothing) when `index` is
/// past the end of the path.
pub fn draw_marker<S: Surface + ?Sized>(
    surface: &mut S,
    path: &ThetaRhoPath,
    config: &RenderConfig,
    index: usize,
) -> bool {
    let Some(sample) = path.get(index) else {
        return false;
    };
    let center = ScreenMapping::new(surface.canvas()).sample_to_surface(sample);
    surface.fill_disc(center, config.marker_radius, config.marker_color);
    true
}

fn hue_color(hue: f64) -> Rgba8 {
    Rgba8::hsl(hue, 1.0, 0.5)
}

#[cfg(test)]
#[path = "../../tests/unit/render/trace.rs"]
mod tests;
