pub use kurbo::{Point, Rect, Vec2};

/// Host time in milliseconds, measured from stage creation.
pub type Millis = f64;

/// Repaint cadence of the per-frame callback (60 Hz).
pub const FRAME_INTERVAL_MS: Millis = 1000.0 / 60.0;

/// Integer pixel size of a canvas surface.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CanvasSize {
    pub width: u32,
    pub height: u32,
}

impl CanvasSize {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Size of the container's bounding box, truncated to whole pixels.
    pub fn from_rect(rect: Rect) -> Self {
        fn px(v: f64) -> u32 {
            if v.is_finite() && v > 0.0 {
                v.floor().min(f64::from(u32::MAX)) as u32
            } else {
                0
            }
        }
        Self {
            width: px(rect.width()),
            height: px(rect.height()),
        }
    }

    pub fn area(self) -> f64 {
        f64::from(self.width) * f64::from(self.height)
    }

    pub fn is_empty(self) -> bool {
        self.width == 0 || self.height == 0
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
