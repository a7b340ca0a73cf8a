//! Intersection-based visibility detection.

use crate::foundation::core::Rect;

/// Scrollable window onto the page.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
    #[serde(default)]
    pub scroll_y: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            scroll_y: 0.0,
        }
    }

    /// Visible page region.
    pub fn rect(self) -> Rect {
        Rect::new(
            0.0,
            self.scroll_y,
            self.width.max(0.0),
            self.scroll_y + self.height.max(0.0),
        )
    }
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct VisibilityOptions {
    /// Visible fraction of the target needed to count as "in view".
    #[serde(default = "default_threshold")]
    pub threshold: f64,
    /// Pixels shaved off the bottom of the viewport before intersecting.
    #[serde(default = "default_bottom_inset")]
    pub bottom_inset_px: f64,
}

fn default_threshold() -> f64 {
    0.2
}

fn default_bottom_inset() -> f64 {
    100.0
}

impl Default for VisibilityOptions {
    fn default() -> Self {
        Self {
            threshold: default_threshold(),
            bottom_inset_px: default_bottom_inset(),
        }
    }
}

/// Observation root: the viewport with its bottom edge pulled up by the inset.
pub fn observation_root(viewport: Viewport, options: VisibilityOptions) -> Rect {
    let r = viewport.rect();
    let bottom = (r.y1 - options.bottom_inset_px).max(r.y0);
    Rect::new(r.x0, r.y0, r.x1, bottom)
}

/// Fraction of `target`'s area inside `root`.
///
/// Zero-area targets count as fully visible when they touch the root.
pub fn intersection_ratio(target: Rect, root: Rect) -> f64 {
    let target = target.abs();
    let inter = target.intersect(root);
    let inside = inter.width() >= 0.0
        && inter.height() >= 0.0
        && target.x0 <= root.x1
        && target.x1 >= root.x0
        && target.y0 <= root.y1
        && target.y1 >= root.y0;
    if !inside {
        return 0.0;
    }
    let area = target.area();
    if area <= 0.0 {
        return 1.0;
    }
    (inter.area() / area).clamp(0.0, 1.0)
}

/// Whether `target` counts as visible under `options`.
pub fn is_visible(target: Rect, viewport: Viewport, options: VisibilityOptions) -> bool {
    let ratio = intersection_ratio(target, observation_root(viewport, options));
    ratio > 0.0 && ratio >= options.threshold
}

#[cfg(test)]
#[path = "../../tests/unit/runtime/visibility.rs"]
mod tests;
