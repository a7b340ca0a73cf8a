use crate::{
    foundation::{
        color::ColorDef,
        core::{CanvasSize, Point, Rect},
        error::{MotionError, MotionResult},
    },
    render::backend::{FrameRGBA, mul_div255},
};

use kurbo::Shape as _;

/// Drawing surface handed to canvas components, in canvas pixels.
pub struct DrawContext<'a> {
    ctx: &'a mut vello_cpu::RenderContext,
    size: CanvasSize,
}

impl DrawContext<'_> {
    pub fn size(&self) -> CanvasSize {
        self.size
    }

    fn set_color(&mut self, color: ColorDef) {
        let [r, g, b, a] = color.to_rgba8_straight();
        self.ctx
            .set_paint(vello_cpu::peniko::Color::from_rgba8(r, g, b, a));
    }

    pub fn fill_rect(&mut self, rect: Rect, color: ColorDef) {
        if color.a <= 0.0 {
            return;
        }
        self.set_color(color);
        self.ctx.fill_rect(&rect_to_cpu(rect));
    }

    /// One-pixel outline drawn inside `rect`.
    pub fn stroke_rect_1px(&mut self, rect: Rect, color: ColorDef) {
        if color.a <= 0.0 || rect.width() <= 0.0 || rect.height() <= 0.0 {
            return;
        }
        self.set_color(color);
        let Rect { x0, y0, x1, y1 } = rect;
        for edge in [
            Rect::new(x0, y0, x1, y0 + 1.0),
            Rect::new(x0, y1 - 1.0, x1, y1),
            Rect::new(x0, y0, x0 + 1.0, y1),
            Rect::new(x1 - 1.0, y0, x1, y1),
        ] {
            self.ctx.fill_rect(&rect_to_cpu(edge));
        }
    }

    pub fn fill_circle(&mut self, center: Point, radius: f64, color: ColorDef) {
        if color.a <= 0.0 || !(radius > 0.0) {
            return;
        }
        self.set_color(color);
        let path = kurbo::Circle::new(center, radius).to_path(0.1);
        self.ctx.fill_path(&bezpath_to_cpu(&path));
    }
}

/// Component state that can be rasterized by [`CpuCanvas`].
pub trait CanvasPainter {
    fn canvas_size(&self) -> CanvasSize;

    fn paint(&self, dc: &mut DrawContext<'_>);

    /// Pixel pass after vector drawing, on premultiplied RGBA8.
    fn post_process(&self, _pixels: &mut [u8], _size: CanvasSize) {}
}

struct CpuSurface {
    width: u16,
    height: u16,
    pixmap: vello_cpu::Pixmap,
}

/// CPU rasterizer for canvas components; keeps its pixmap between frames of the same size.
#[derive(Default)]
pub struct CpuCanvas {
    surface: Option<CpuSurface>,
}

impl std::fmt::Debug for CpuCanvas {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CpuCanvas")
            .field(
                "surface",
                &self.surface.as_ref().map(|s| (s.width, s.height)),
            )
            .finish()
    }
}

impl CpuCanvas {
    pub fn new() -> Self {
        Self::default()
    }

    fn ensure_surface(&mut self, size: CanvasSize) -> MotionResult<&mut CpuSurface> {
        let width: u16 = size
            .width
            .try_into()
            .map_err(|_| MotionError::render("canvas width exceeds u16"))?;
        let height: u16 = size
            .height
            .try_into()
            .map_err(|_| MotionError::render("canvas height exceeds u16"))?;

        let stale = self
            .surface
            .as_ref()
            .is_none_or(|s| s.width != width || s.height != height);
        if stale {
            self.surface = Some(CpuSurface {
                width,
                height,
                pixmap: vello_cpu::Pixmap::new(width, height),
            });
        }
        self.surface
            .as_mut()
            .ok_or_else(|| MotionError::render("canvas surface missing"))
    }

    #[tracing::instrument(level = "trace", skip_all)]
    pub fn render(&mut self, painter: &dyn CanvasPainter) -> MotionResult<FrameRGBA> {
        let size = painter.canvas_size();
        if size.is_empty() {
            return Ok(FrameRGBA::empty(size));
        }
        let surface = self.ensure_surface(size)?;
        clear_pixmap(&mut surface.pixmap, [0, 0, 0, 0]);

        let mut ctx = vello_cpu::RenderContext::new(surface.width, surface.height);
        {
            let mut dc = DrawContext {
                ctx: &mut ctx,
                size,
            };
            painter.paint(&mut dc);
        }
        ctx.flush();
        ctx.render_to_pixmap(&mut surface.pixmap);

        painter.post_process(surface.pixmap.data_as_u8_slice_mut(), size);

        Ok(FrameRGBA {
            width: size.width,
            height: size.height,
            data: surface.pixmap.data_as_u8_slice().to_vec(),
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

/// Composite a radial gradient from transparent at the center to `edge` at half the diagonal.
pub fn apply_radial_vignette(pixels: &mut [u8], size: CanvasSize, edge: ColorDef) {
    if size.is_empty() || edge.a <= 0.0 {
        return;
    }
    let w = f64::from(size.width);
    let h = f64::from(size.height);
    let (cx, cy) = (w / 2.0, h / 2.0);
    let radius = (w * w + h * h).sqrt() / 2.0;
    let [er, eg, eb, ea] = edge.to_rgba8_straight().map(u16::from);

    for (i, px) in pixels.chunks_exact_mut(4).enumerate() {
        let x = (i % size.width as usize) as f64 + 0.5;
        let y = (i / size.width as usize) as f64 + 0.5;
        let t = ((x - cx).hypot(y - cy) / radius).clamp(0.0, 1.0);
        let a = (f64::from(ea) * t).round() as u16;
        if a == 0 {
            continue;
        }
        let inv = 255 - a;
        let src = [mul_div255(er, a), mul_div255(eg, a), mul_div255(eb, a), a];
        for (c, s) in px.iter_mut().zip(src) {
            *c = (s + mul_div255(u16::from(*c), inv)).min(255) as u8;
        }
    }
}

fn rect_to_cpu(r: Rect) -> vello_cpu::kurbo::Rect {
    vello_cpu::kurbo::Rect::new(r.x0, r.y0, r.x1, r.y1)
}

fn point_to_cpu(p: Point) -> vello_cpu::kurbo::Point {
    vello_cpu::kurbo::Point::new(p.x, p.y)
}

fn bezpath_to_cpu(path: &kurbo::BezPath) -> vello_cpu::kurbo::BezPath {
    use kurbo::PathEl;

    let mut out = vello_cpu::kurbo::BezPath::new();
    for &el in path.elements() {
        match el {
            PathEl::MoveTo(p) => out.move_to(point_to_cpu(p)),
            PathEl::LineTo(p) => out.line_to(point_to_cpu(p)),
            PathEl::QuadTo(p1, p2) => out.quad_to(point_to_cpu(p1), point_to_cpu(p2)),
            PathEl::CurveTo(p1, p2, p3) => {
                out.curve_to(point_to_cpu(p1), point_to_cpu(p2), point_to_cpu(p3));
            }
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
