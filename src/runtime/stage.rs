//! Host page stand-in that owns the clock, the viewport and the mounted components.

use crate::{
    foundation::core::{Millis, Point, Rect},
    foundation::error::{MotionError, MotionResult},
    render::backend::FrameRGBA,
    render::cpu::CpuCanvas,
    runtime::component::{Component, Cx, HostEvent, Snapshot},
    runtime::scheduler::{ComponentId, EventKind, Scheduler, SchedulerStats},
    runtime::visibility::{Viewport, is_visible},
};

struct Mounted {
    bounds: Rect,
    component: Box<dyn Component>,
}

/// The host page: owns the clock, the viewport and every mounted component.
///
/// All time is virtual; nothing happens until [`Stage::advance_to`] pumps the scheduler.
pub struct Stage {
    sched: Scheduler,
    viewport: Viewport,
    slots: Vec<Option<Mounted>>,
    canvas: CpuCanvas,
}

impl std::fmt::Debug for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Stage")
            .field("now", &self.sched.now())
            .field("viewport", &self.viewport)
            .field("mounted", &self.mounted().len())
            .finish()
    }
}

impl Stage {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            sched: Scheduler::new(),
            viewport,
            slots: Vec::new(),
            canvas: CpuCanvas::new(),
        }
    }

    pub fn now(&self) -> Millis {
        self.sched.now()
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn scheduler(&self) -> &Scheduler {
        &self.sched
    }

    pub fn stats(&self) -> SchedulerStats {
        self.sched.stats()
    }

    /// Ids of mounted components in mount order.
    pub fn mounted(&self) -> Vec<ComponentId> {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, s)| s.is_some())
            .map(|(i, _)| ComponentId(i as u32))
            .collect()
    }

    pub fn bounds(&self, id: ComponentId) -> Option<Rect> {
        self.slot(id).map(|m| m.bounds)
    }

    fn slot(&self, id: ComponentId) -> Option<&Mounted> {
        self.slots.get(id.0 as usize).and_then(Option::as_ref)
    }

    fn with_component<R>(
        &mut self,
        id: ComponentId,
        f: impl FnOnce(&mut dyn Component, &mut Cx<'_>) -> R,
    ) -> MotionResult<R> {
        let Some(Some(m)) = self.slots.get_mut(id.0 as usize) else {
            return Err(MotionError::animation(format!(
                "component {} is not mounted",
                id.0
            )));
        };
        let mut cx = Cx::new(id, m.bounds, self.viewport, &mut self.sched);
        Ok(f(m.component.as_mut(), &mut cx))
    }

    #[tracing::instrument(skip(self, component), fields(component = component.name()))]
    pub fn mount(&mut self, bounds: Rect, component: impl Component + 'static) -> ComponentId {
        self.mount_boxed(bounds, Box::new(component))
    }

    pub fn mount_boxed(&mut self, bounds: Rect, component: Box<dyn Component>) -> ComponentId {
        let id = ComponentId(self.slots.len() as u32);
        self.slots.push(Some(Mounted { bounds, component }));
        let _ = self.with_component(id, |c, cx| c.mount(cx));
        tracing::debug!(id = id.0, "mounted");
        id
    }

    /// Tear a component down. Anything it failed to release is reclaimed and logged.
    #[tracing::instrument(skip(self))]
    pub fn unmount(&mut self, id: ComponentId) -> MotionResult<()> {
        self.with_component(id, |c, cx| c.unmount(cx))?;
        let leaked = self.sched.release_owner(id);
        if leaked > 0 {
            tracing::warn!(id = id.0, leaked, "component left registrations behind");
        }
        self.slots[id.0 as usize] = None;
        Ok(())
    }

    /// Move a component's container; canvases pick the new size up on the next resize event.
    pub fn set_bounds(&mut self, id: ComponentId, bounds: Rect) -> MotionResult<()> {
        match self.slots.get_mut(id.0 as usize) {
            Some(Some(m)) => {
                m.bounds = bounds;
                Ok(())
            }
            _ => Err(MotionError::animation(format!(
                "component {} is not mounted",
                id.0
            ))),
        }
    }

    /// Pump every task due up to `t`, delivering observer changes first.
    #[tracing::instrument(level = "trace", skip(self))]
    pub fn advance_to(&mut self, t: Millis) {
        self.deliver_visibility();
        while let Some(due) = self.sched.pop_due(t) {
            let _ = self.with_component(due.owner, |c, cx| c.on_task(due.task, cx));
        }
        self.sched.set_now(t);
    }

    pub fn advance_by(&mut self, dt: Millis) {
        let t = self.now() + dt.max(0.0);
        self.advance_to(t);
    }

    /// Step through frame boundaries until `t`, pumping once per frame.
    pub fn run_frames_until(&mut self, t: Millis) {
        let frame = crate::foundation::core::FRAME_INTERVAL_MS;
        while self.now() + frame < t {
            self.advance_by(frame);
        }
        self.advance_to(t);
    }

    fn deliver_visibility(&mut self) {
        let mut changes: Vec<(u64, ComponentId, bool)> = Vec::new();
        let viewport = self.viewport;
        let slots = &self.slots;
        for (oid, obs) in self.sched.observers_mut() {
            let Some(Some(m)) = slots.get(obs.owner.0 as usize) else {
                continue;
            };
            let visible = is_visible(m.bounds, viewport, obs.options);
            if obs.last_visible != Some(visible) {
                let first = obs.last_visible.is_none();
                obs.last_visible = Some(visible);
                // The initial "not visible" report carries no transition.
                if !(first && !visible) {
                    changes.push((oid, obs.owner, visible));
                }
            }
        }
        for (oid, owner, visible) in changes {
            if !self.sched.observer_is_live(oid) {
                continue;
            }
            let _ = self.with_component(owner, |c, cx| c.on_visibility(visible, cx));
        }
    }

    pub fn scroll_to(&mut self, scroll_y: f64) {
        self.viewport.scroll_y = scroll_y;
    }

    /// Resize the window and notify resize listeners.
    pub fn resize_viewport(&mut self, width: f64, height: f64) {
        self.viewport.width = width;
        self.viewport.height = height;
        tracing::debug!(width, height, "viewport resized");
        for id in self.sched.listeners_for(EventKind::Resize) {
            let ev = HostEvent::Resize { width, height };
            let _ = self.with_component(id, |c, cx| c.on_event(&ev, cx));
        }
    }

    /// Deliver a pointer or click event. Returns `false` when the component is not listening.
    pub fn dispatch(&mut self, id: ComponentId, event: HostEvent) -> MotionResult<bool> {
        if !self.sched.listens(id, event.kind()) {
            if self.slot(id).is_none() {
                return Err(MotionError::animation(format!(
                    "component {} is not mounted",
                    id.0
                )));
            }
            return Ok(false);
        }
        self.with_component(id, |c, cx| c.on_event(&event, cx))?;
        Ok(true)
    }

    pub fn pointer_enter(&mut self, id: ComponentId) -> MotionResult<bool> {
        self.dispatch(id, HostEvent::PointerEnter)
    }

    /// `at` is relative to the component's top-left corner.
    pub fn pointer_move(&mut self, id: ComponentId, at: Point) -> MotionResult<bool> {
        self.dispatch(id, HostEvent::PointerMove(at))
    }

    pub fn pointer_leave(&mut self, id: ComponentId) -> MotionResult<bool> {
        self.dispatch(id, HostEvent::PointerLeave)
    }

    pub fn click(&mut self, id: ComponentId) -> MotionResult<bool> {
        self.dispatch(id, HostEvent::Click)
    }

    /// Arm a component directly, bypassing its configured trigger.
    pub fn trigger(&mut self, id: ComponentId) -> MotionResult<()> {
        self.with_component(id, |c, cx| c.trigger(cx))
    }

    pub fn set_text(&mut self, id: ComponentId, text: &str) -> MotionResult<()> {
        self.with_component(id, |c, cx| c.set_text(text, cx))?
    }

    pub fn snapshot(&self, id: ComponentId) -> MotionResult<Snapshot> {
        let m = self.slot(id).ok_or_else(|| {
            MotionError::animation(format!("component {} is not mounted", id.0))
        })?;
        Ok(m.component.snapshot(self.now()))
    }

    /// Rasterize a canvas component's current state.
    pub fn render(&mut self, id: ComponentId) -> MotionResult<FrameRGBA> {
        let Some(Some(m)) = self.slots.get(id.0 as usize) else {
            return Err(MotionError::animation(format!(
                "component {} is not mounted",
                id.0
            )));
        };
        let painter = m.component.painter().ok_or_else(|| {
            MotionError::render(format!("{} does not draw to a canvas", m.component.name()))
        })?;
        self.canvas.render(painter)
    }
}

impl Drop for Stage {
    fn drop(&mut self) {
        for id in self.mounted() {
            let _ = self.unmount(id);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/runtime/stage.rs"]
mod tests;
