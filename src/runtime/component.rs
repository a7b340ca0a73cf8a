//! The component trait and the context handed to it on every callback.

use crate::{
    canvas::{particles::ParticleSnapshot, squares::SquaresSnapshot},
    foundation::core::{CanvasSize, Millis, Point, Rect},
    foundation::error::{MotionError, MotionResult},
    render::cpu::CanvasPainter,
    runtime::scheduler::{
        ComponentId, EventKind, ListenerHandle, ObserverHandle, Scheduler, TaskHandle,
    },
    runtime::visibility::{Viewport, VisibilityOptions},
    text::{scramble::ScrambleSnapshot, stagger::StaggerSnapshot},
};

/// Host events delivered to listening components.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum HostEvent {
    /// Window resized; components re-measure their container.
    Resize { width: f64, height: f64 },
    PointerEnter,
    /// Pointer position relative to the component's top-left corner.
    PointerMove(Point),
    PointerLeave,
    Click,
}

impl HostEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            Self::Resize { .. } => EventKind::Resize,
            Self::PointerEnter => EventKind::PointerEnter,
            Self::PointerMove(_) => EventKind::PointerMove,
            Self::PointerLeave => EventKind::PointerLeave,
            Self::Click => EventKind::Click,
        }
    }
}

/// Per-call context handed to a component: its identity, the clock and its slice of the
/// scheduler.
pub struct Cx<'a> {
    id: ComponentId,
    now: Millis,
    bounds: Rect,
    viewport: Viewport,
    sched: &'a mut Scheduler,
}

impl<'a> Cx<'a> {
    pub fn new(
        id: ComponentId,
        bounds: Rect,
        viewport: Viewport,
        sched: &'a mut Scheduler,
    ) -> Self {
        Self {
            id,
            now: sched.now(),
            bounds,
            viewport,
            sched,
        }
    }

    pub fn id(&self) -> ComponentId {
        self.id
    }

    pub fn now(&self) -> Millis {
        self.now
    }

    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    /// Size of the container's bounding box.
    pub fn container_size(&self) -> CanvasSize {
        CanvasSize::from_rect(self.bounds)
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn request_frame(&mut self) -> TaskHandle {
        self.sched.request_frame(self.id)
    }

    pub fn set_interval(&mut self, period: Millis) -> TaskHandle {
        self.sched.set_interval(self.id, period)
    }

    pub fn set_timeout(&mut self, delay: Millis) -> TaskHandle {
        self.sched.set_timeout(self.id, delay)
    }

    pub fn defer(&mut self) -> TaskHandle {
        self.sched.defer(self.id)
    }

    /// Cancel and clear a stored handle.
    pub fn cancel(&mut self, slot: &mut Option<TaskHandle>) {
        if let Some(h) = slot.take() {
            self.sched.cancel(h);
        }
    }

    pub fn cancel_task(&mut self, handle: TaskHandle) -> bool {
        self.sched.cancel(handle)
    }

    pub fn cancel_all(&mut self, handles: &mut Vec<TaskHandle>) {
        for h in handles.drain(..) {
            self.sched.cancel(h);
        }
    }

    pub fn listen(&mut self, event: EventKind) -> ListenerHandle {
        self.sched.listen(self.id, event)
    }

    pub fn unlisten_all(&mut self, handles: &mut Vec<ListenerHandle>) {
        for h in handles.drain(..) {
            self.sched.unlisten(h);
        }
    }

    pub fn observe(&mut self, options: VisibilityOptions) -> ObserverHandle {
        self.sched.observe(self.id, options)
    }

    pub fn unobserve(&mut self, slot: &mut Option<ObserverHandle>) {
        if let Some(h) = slot.take() {
            self.sched.unobserve(h);
        }
    }
}

/// Serializable render output of a component at one instant.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Snapshot {
    Stagger(StaggerSnapshot),
    Scramble(ScrambleSnapshot),
    Particles(ParticleSnapshot),
    Squares(SquaresSnapshot),
}

/// An animation primitive mounted on a [`crate::Stage`].
///
/// Components own all of their scheduled work and must release it in [`Component::unmount`].
pub trait Component {
    fn name(&self) -> &'static str;

    /// Register triggers, listeners and loops.
    fn mount(&mut self, cx: &mut Cx<'_>);

    /// Cancel every outstanding task, listener and observer.
    fn unmount(&mut self, cx: &mut Cx<'_>);

    fn on_task(&mut self, task: TaskHandle, cx: &mut Cx<'_>);

    fn on_event(&mut self, _event: &HostEvent, _cx: &mut Cx<'_>) {}

    fn on_visibility(&mut self, _visible: bool, _cx: &mut Cx<'_>) {}

    /// Arm the animation as if its trigger had fired. Still honors `once`.
    fn trigger(&mut self, _cx: &mut Cx<'_>) {}

    /// Replace the source text, resetting in-flight state.
    fn set_text(&mut self, _text: &str, _cx: &mut Cx<'_>) -> MotionResult<()> {
        Err(MotionError::animation(format!(
            "{} has no text to replace",
            self.name()
        )))
    }

    fn snapshot(&self, now: Millis) -> Snapshot;

    /// Canvas components expose a painter for the CPU backend.
    fn painter(&self) -> Option<&dyn CanvasPainter> {
        None
    }
}
