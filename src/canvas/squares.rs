//! Scrolling grid background with pointer-driven hover patterns and a vignette.

use std::collections::BTreeSet;

use crate::{
    canvas::pattern::{Cell, HoverPattern},
    foundation::{
        color::ColorDef,
        core::{CanvasSize, Millis, Point, Rect},
    },
    render::cpu::{CanvasPainter, DrawContext, apply_radial_vignette},
    runtime::{
        component::{Component, Cx, HostEvent, Snapshot},
        scheduler::{EventKind, ListenerHandle, TaskHandle},
    },
};

/// Slowest scroll speed, so the grid never looks frozen.
pub const MIN_GRID_SPEED: f64 = 0.1;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GridDirection {
    Up,
    Down,
    Left,
    #[default]
    Right,
    Diagonal,
}

impl GridDirection {
    /// Per-frame change of the grid offset at `speed` pixels per frame.
    pub fn delta(self, speed: f64) -> (f64, f64) {
        match self {
            Self::Right => (-speed, 0.0),
            Self::Left => (speed, 0.0),
            Self::Up => (0.0, speed),
            Self::Down => (0.0, -speed),
            Self::Diagonal => (-speed, -speed),
        }
    }
}

pub fn effective_speed(speed: f64) -> f64 {
    if speed.is_nan() {
        MIN_GRID_SPEED
    } else {
        speed.max(MIN_GRID_SPEED)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize)]
pub struct GridOffset {
    pub x: f64,
    pub y: f64,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct SquaresConfig {
    pub direction: GridDirection,
    /// Pixels per frame.
    pub speed: f64,
    pub cell_size: f64,
    pub border_color: ColorDef,
    pub hover_fill: ColorDef,
    pub hover_pattern: HoverPattern,
    /// Edge color of the radial vignette; `None` disables it.
    pub vignette: Option<ColorDef>,
}

impl Default for SquaresConfig {
    fn default() -> Self {
        Self {
            direction: GridDirection::Right,
            speed: 1.0,
            cell_size: 40.0,
            border_color: ColorDef::rgba(0.2, 0.2, 0.2, 1.0),
            hover_fill: ColorDef::rgba(0.133, 0.133, 0.133, 1.0),
            hover_pattern: HoverPattern::Single,
            vignette: Some(ColorDef::rgba(0.024, 0.0, 0.063, 1.0)),
        }
    }
}

/// Grid scroll and hover state, independent of scheduling and drawing.
#[derive(Clone, Debug)]
pub struct GridSim {
    size: CanvasSize,
    cell: f64,
    direction: GridDirection,
    speed: f64,
    pattern: HoverPattern,
    offset: GridOffset,
    hovered: Option<Cell>,
    highlighted: BTreeSet<Cell>,
    steps: u64,
}

impl GridSim {
    pub fn new(config: &SquaresConfig, size: CanvasSize) -> Self {
        let cell = if config.cell_size.is_finite() && config.cell_size >= 1.0 {
            config.cell_size
        } else {
            1.0
        };
        Self {
            size,
            cell,
            direction: config.direction,
            speed: effective_speed(config.speed),
            pattern: config.hover_pattern,
            offset: GridOffset::default(),
            hovered: None,
            highlighted: BTreeSet::new(),
            steps: 0,
        }
    }

    pub fn size(&self) -> CanvasSize {
        self.size
    }

    pub fn resize(&mut self, size: CanvasSize) {
        self.size = size;
    }

    pub fn cell_size(&self) -> f64 {
        self.cell
    }

    pub fn offset(&self) -> GridOffset {
        self.offset
    }

    pub fn hovered(&self) -> Option<Cell> {
        self.hovered
    }

    pub fn highlighted(&self) -> &BTreeSet<Cell> {
        &self.highlighted
    }

    pub fn steps(&self) -> u64 {
        self.steps
    }

    /// Scroll one frame, wrapping offsets into `[0, cell)`.
    pub fn step(&mut self) {
        let (dx, dy) = self.direction.delta(self.speed);
        self.offset.x = (self.offset.x + dx).rem_euclid(self.cell);
        self.offset.y = (self.offset.y + dy).rem_euclid(self.cell);
        self.steps += 1;
    }

    /// Grid cell under a canvas-space point, including the scroll offset.
    pub fn cell_at(&self, p: Point) -> Cell {
        (
            ((p.x + self.offset.x) / self.cell).floor() as i64,
            ((p.y + self.offset.y) / self.cell).floor() as i64,
        )
    }

    /// Recompute the highlight when the pointer moves into a different cell.
    pub fn pointer_moved(&mut self, p: Point) -> bool {
        let cell = self.cell_at(p);
        if self.hovered == Some(cell) {
            return false;
        }
        self.hovered = Some(cell);
        self.highlighted = self.pattern.cells(cell).collect();
        true
    }

    pub fn pointer_left(&mut self) {
        self.hovered = None;
        self.highlighted.clear();
    }

    /// Columns and rows needed to cover the canvas at the current offset.
    pub fn visible_cells(&self) -> (i64, i64) {
        if self.size.is_empty() {
            return (0, 0);
        }
        let cols = ((f64::from(self.size.width) + self.offset.x) / self.cell).ceil() as i64;
        let rows = ((f64::from(self.size.height) + self.offset.y) / self.cell).ceil() as i64;
        (cols, rows)
    }

    /// Canvas-space rectangle of a cell.
    pub fn cell_rect(&self, (c, r): Cell) -> Rect {
        let x = c as f64 * self.cell - self.offset.x;
        let y = r as f64 * self.cell - self.offset.y;
        Rect::new(x, y, x + self.cell, y + self.cell)
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct SquaresSnapshot {
    pub width: u32,
    pub height: u32,
    pub cell_size: f64,
    pub offset: GridOffset,
    pub hovered: Option<Cell>,
    pub highlighted: Vec<Cell>,
    pub columns: i64,
    pub rows: i64,
    pub frames: u64,
}

/// Continuously scrolling grid that highlights cells around the pointer.
#[derive(Debug)]
pub struct SquaresField {
    config: SquaresConfig,
    sim: Option<GridSim>,
    frame: Option<TaskHandle>,
    listeners: Vec<ListenerHandle>,
}

impl SquaresField {
    pub fn new(config: SquaresConfig) -> Self {
        Self {
            config,
            sim: None,
            frame: None,
            listeners: Vec::new(),
        }
    }

    pub fn config(&self) -> &SquaresConfig {
        &self.config
    }

    pub fn sim(&self) -> Option<&GridSim> {
        self.sim.as_ref()
    }
}

impl Component for SquaresField {
    fn name(&self) -> &'static str {
        "squares"
    }

    fn mount(&mut self, cx: &mut Cx<'_>) {
        self.sim = Some(GridSim::new(&self.config, cx.container_size()));
        for event in [
            EventKind::Resize,
            EventKind::PointerMove,
            EventKind::PointerLeave,
        ] {
            self.listeners.push(cx.listen(event));
        }
        self.frame = Some(cx.request_frame());
    }

    fn unmount(&mut self, cx: &mut Cx<'_>) {
        cx.cancel(&mut self.frame);
        cx.unlisten_all(&mut self.listeners);
        tracing::debug!(id = cx.id().0, "squares field torn down");
    }

    fn on_task(&mut self, task: TaskHandle, cx: &mut Cx<'_>) {
        if self.frame != Some(task) {
            return;
        }
        if let Some(sim) = self.sim.as_mut() {
            sim.step();
            tracing::trace!(offset = ?sim.offset(), "squares frame");
        }
        self.frame = Some(cx.request_frame());
    }

    fn on_event(&mut self, event: &HostEvent, cx: &mut Cx<'_>) {
        let Some(sim) = self.sim.as_mut() else {
            return;
        };
        match *event {
            HostEvent::Resize { .. } => sim.resize(cx.container_size()),
            HostEvent::PointerMove(p) => {
                if sim.pointer_moved(p) {
                    tracing::trace!(cell = ?sim.hovered(), "hover cell changed");
                }
            }
            HostEvent::PointerLeave => sim.pointer_left(),
            HostEvent::PointerEnter | HostEvent::Click => {}
        }
    }

    fn snapshot(&self, _now: Millis) -> Snapshot {
        let snap = match &self.sim {
            Some(sim) => {
                let (columns, rows) = sim.visible_cells();
                SquaresSnapshot {
                    width: sim.size().width,
                    height: sim.size().height,
                    cell_size: sim.cell_size(),
                    offset: sim.offset(),
                    hovered: sim.hovered(),
                    highlighted: sim.highlighted().iter().copied().collect(),
                    columns,
                    rows,
                    frames: sim.steps(),
                }
            }
            None => SquaresSnapshot {
                width: 0,
                height: 0,
                cell_size: self.config.cell_size,
                offset: GridOffset::default(),
                hovered: None,
                highlighted: Vec::new(),
                columns: 0,
                rows: 0,
                frames: 0,
            },
        };
        Snapshot::Squares(snap)
    }

    fn painter(&self) -> Option<&dyn CanvasPainter> {
        Some(self)
    }
}

impl CanvasPainter for SquaresField {
    fn canvas_size(&self) -> CanvasSize {
        self.sim.as_ref().map_or_else(CanvasSize::default, GridSim::size)
    }

    fn paint(&self, dc: &mut DrawContext<'_>) {
        let Some(sim) = &self.sim else {
            return;
        };
        let (cols, rows) = sim.visible_cells();
        for r in 0..rows {
            for c in 0..cols {
                let rect = sim.cell_rect((c, r));
                if sim.highlighted().contains(&(c, r)) {
                    dc.fill_rect(rect, self.config.hover_fill);
                }
                dc.stroke_rect_1px(rect, self.config.border_color);
            }
        }
    }

    fn post_process(&self, pixels: &mut [u8], size: CanvasSize) {
        if let Some(edge) = self.config.vignette {
            apply_radial_vignette(pixels, size, edge);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/canvas/squares.rs"]
mod tests;
