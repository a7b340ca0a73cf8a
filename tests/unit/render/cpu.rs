use super::*;

struct Block {
    size: CanvasSize,
    rect: Rect,
    vignette: Option<ColorDef>,
}

impl CanvasPainter for Block {
    fn canvas_size(&self) -> CanvasSize {
        self.size
    }

    fn paint(&self, dc: &mut DrawContext<'_>) {
        dc.fill_rect(self.rect, ColorDef::WHITE);
    }

    fn post_process(&self, pixels: &mut [u8], size: CanvasSize) {
        if let Some(edge) = self.vignette {
            apply_radial_vignette(pixels, size, edge);
        }
    }
}

#[test]
fn fills_land_inside_their_rect() {
    let mut canvas = CpuCanvas::new();
    let frame = canvas
        .render(&Block {
            size: CanvasSize::new(16, 16),
            rect: Rect::new(4.0, 4.0, 12.0, 12.0),
            vignette: None,
        })
        .unwrap();
    assert_eq!(frame.data.len(), 16 * 16 * 4);
    assert!(frame.premultiplied);
    assert_eq!(frame.pixel(8, 8).unwrap()[3], 255);
    assert_eq!(frame.pixel(1, 1).unwrap()[3], 0);
}

#[test]
fn surfaces_are_cleared_between_frames() {
    let mut canvas = CpuCanvas::new();
    let size = CanvasSize::new(8, 8);
    canvas
        .render(&Block {
            size,
            rect: Rect::new(0.0, 0.0, 8.0, 8.0),
            vignette: None,
        })
        .unwrap();
    let frame = canvas
        .render(&Block {
            size,
            rect: Rect::new(0.0, 0.0, 2.0, 2.0),
            vignette: None,
        })
        .unwrap();
    assert_eq!(frame.pixel(6, 6).unwrap()[3], 0);
}

#[test]
fn zero_sized_canvas_yields_an_empty_frame() {
    let mut canvas = CpuCanvas::new();
    let frame = canvas
        .render(&Block {
            size: CanvasSize::new(0, 32),
            rect: Rect::new(0.0, 0.0, 1.0, 1.0),
            vignette: None,
        })
        .unwrap();
    assert!(frame.is_empty());
    assert_eq!(frame.height, 32);
}

#[test]
fn vignette_darkens_edges_not_center() {
    let size = CanvasSize::new(20, 20);
    let mut pixels = vec![0u8; 20 * 20 * 4];
    apply_radial_vignette(&mut pixels, size, ColorDef::rgba(0.0, 0.0, 0.0, 1.0));
    let alpha = |x: usize, y: usize| pixels[(y * 20 + x) * 4 + 3];
    assert!(alpha(10, 10) < 20);
    assert!(alpha(0, 0) > 200);
    assert!(alpha(0, 10) > alpha(5, 10));
}

#[test]
fn oversized_canvas_is_a_render_error() {
    let mut canvas = CpuCanvas::new();
    let err = canvas
        .render(&Block {
            size: CanvasSize::new(70_000, 1),
            rect: Rect::ZERO,
            vignette: None,
        })
        .unwrap_err();
    assert!(matches!(err, MotionError::Render(_)));
}
