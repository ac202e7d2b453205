use vello_cpu::kurbo::Shape as _;

use crate::{
    foundation::core::{Canvas, Point, Rect, Rgba8},
    foundation::error::{TraceError, TraceResult},
    render::surface::{FrameRGBA, Readback, Surface, SegmentPaint},
};

/// CPU raster surface backed by `vello_cpu`.
///
/// Draw calls are recorded into a render context and rasterized on [`Readback`]. [`Surface::clear`]
/// drops everything recorded so far.
pub struct CpuSurface {
    canvas: Canvas,
    width: u16,
    height: u16,
    ctx: vello_cpu::RenderContext,
    pixmap: vello_cpu::Pixmap,
}

impl CpuSurface {
    pub fn new(canvas: Canvas) -> TraceResult<Self> {
        canvas.validate()?;
        let width: u16 = canvas
            .width
            .try_into()
            .map_err(|_| TraceError::render("surface width exceeds u16"))?;
        let height: u16 = canvas
            .height
            .try_into()
            .map_err(|_| TraceError::render("surface height exceeds u16"))?;

        Ok(Self {
            canvas,
            width,
            height,
            ctx: vello_cpu::RenderContext::new(width, height),
            pixmap: vello_cpu::Pixmap::new(width, height),
        })
    }
}

impl Surface for CpuSurface {
    fn canvas(&self) -> Canvas {
        self.canvas
    }

    fn clear(&mut self) {
        self.ctx = vello_cpu::RenderContext::new(self.width, self.height);
    }

    fn fill_rect(&mut self, rect: Rect, color: Rgba8) {
        if !rect.is_finite() {
            return;
        }
        self.ctx.set_paint(color_to_cpu(color));
        self.ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
            rect.x0, rect.y0, rect.x1, rect.y1,
        ));
    }

    fn stroke_segment(&mut self, from: Point, to: Point, width: f64, paint: SegmentPaint) {
        if !(from.is_finite() && to.is_finite() && width.is_finite()) || width <= 0.0 {
            return;
        }
        let (p0, p1) = (point_to_cpu(from), point_to_cpu(to));

        match paint {
            SegmentPaint::Solid(c) => self.ctx.set_paint(color_to_cpu(c)),
            // A zero-length gradient has no direction; paint it with its start colour.
            SegmentPaint::Linear { start, .. } if p0 == p1 => {
                self.ctx.set_paint(color_to_cpu(start));
            }
            SegmentPaint::Linear { start, end } => {
                let gradient = vello_cpu::peniko::Gradient::new_linear(p0, p1)
                    .with_stops([color_to_cpu(start), color_to_cpu(end)]);
                self.ctx.set_paint(gradient);
            }
        }

        let mut line = vello_cpu::kurbo::BezPath::new();
        line.move_to(p0);
        line.line_to(p1);
        self.ctx.set_stroke(
            vello_cpu::kurbo::Stroke::new(width).with_caps(vello_cpu::kurbo::Cap::Butt),
        );
        self.ctx.stroke_path(&line);
    }

    fn fill_disc(&mut self, center: Point, radius: f64, color: Rgba8) {
        if !(center.is_finite() && radius.is_finite()) || radius <= 0.0 {
            return;
        }
        let disc = vello_cpu::kurbo::Circle::new(point_to_cpu(center), radius).to_path(0.1);
        self.ctx.set_paint(color_to_cpu(color));
        self.ctx.fill_path(&disc);
    }
}

impl Readback for CpuSurface {
    fn readback_rgba8(&mut self) -> TraceResult<FrameRGBA> {
        clear_pixmap(&mut self.pixmap, [0, 0, 0, 0]);
        self.ctx.flush();
        self.ctx.render_to_pixmap(&mut self.pixmap);

        Ok(FrameRGBA {
            width: self.canvas.width,
            height: self.canvas.height,
            data: self.pixmap.data_as_u8_slice().to_vec(),
            premultiplied: true,
        })
    }
}

fn clear_pixmap(pixmap: &mut vello_cpu::Pixmap, rgba: [u8; 4]) {
    let data = pixmap.data_as_u8_slice_mut();
    for px in data.chunks_exact_mut(4) {
        px.copy_from_slice(&rgba);
    }
}

fn color_to_cpu(c: Rgba8) -> vello_cpu::peniko::Color {
    vello_cpu::peniko::Color::from_rgba8(c.r, c.g, c.b, c.a)
}

fn point_to_cpu(p: Point) -> vello_cpu::kurbo::Point {
    vello_cpu::kurbo::Point::new(p.x, p.y)
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
