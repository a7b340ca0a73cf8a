//! Trigger detection: turns loads, visibility changes and pointer input into run signals.

use crate::runtime::{
    component::{Cx, HostEvent},
    scheduler::{EventKind, ListenerHandle, ObserverHandle, TaskHandle},
    visibility::VisibilityOptions,
};

/// Event that arms an animation run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnimationTrigger {
    /// Next scheduling tick after mount.
    Load,
    /// Target crosses the visibility threshold.
    #[default]
    Visible,
    Hover,
    Click,
}

/// Lifecycle of one animation run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RunPhase {
    #[default]
    Idle,
    /// Triggered; waiting out the start delay.
    Armed,
    Running,
    Completed,
}

/// What the owning component should do in response to an input.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TriggerSignal {
    None,
    Arm,
    /// Return to the pre-animation state (only when `once` is false).
    Disarm,
}

/// Turns loads, intersections and pointer events into arm/disarm signals.
///
/// Owns the deferred load task, the visibility observer and the pointer listeners it
/// registers; [`TriggerDetector::unmount`] releases all of them.
#[derive(Debug)]
pub struct TriggerDetector {
    trigger: AnimationTrigger,
    once: bool,
    visibility: VisibilityOptions,
    completed_once: bool,
    in_view: bool,
    pending: Option<TaskHandle>,
    observer: Option<ObserverHandle>,
    listeners: Vec<ListenerHandle>,
}

impl TriggerDetector {
    pub fn new(trigger: AnimationTrigger, once: bool) -> Self {
        Self {
            trigger,
            once,
            visibility: VisibilityOptions::default(),
            completed_once: false,
            in_view: false,
            pending: None,
            observer: None,
            listeners: Vec::new(),
        }
    }

    pub fn with_visibility(mut self, visibility: VisibilityOptions) -> Self {
        self.visibility = visibility;
        self
    }

    pub fn trigger(&self) -> AnimationTrigger {
        self.trigger
    }

    pub fn once(&self) -> bool {
        self.once
    }

    /// `once` runs that completed can never be re-armed.
    pub fn is_locked(&self) -> bool {
        self.once && self.completed_once
    }

    pub fn in_view(&self) -> bool {
        self.in_view
    }

    pub fn mount(&mut self, cx: &mut Cx<'_>) {
        match self.trigger {
            AnimationTrigger::Load => self.pending = Some(cx.defer()),
            AnimationTrigger::Visible => self.observer = Some(cx.observe(self.visibility)),
            AnimationTrigger::Hover => {
                self.listeners.push(cx.listen(EventKind::PointerEnter));
                self.listeners.push(cx.listen(EventKind::PointerLeave));
            }
            AnimationTrigger::Click => self.listeners.push(cx.listen(EventKind::Click)),
        }
    }

    pub fn unmount(&mut self, cx: &mut Cx<'_>) {
        cx.cancel(&mut self.pending);
        cx.unobserve(&mut self.observer);
        cx.unlisten_all(&mut self.listeners);
    }

    pub fn owns(&self, task: TaskHandle) -> bool {
        self.pending == Some(task)
    }

    pub fn on_task(&mut self, task: TaskHandle) -> TriggerSignal {
        if self.pending != Some(task) {
            return TriggerSignal::None;
        }
        self.pending = None;
        self.gate_arm()
    }

    pub fn on_visibility(&mut self, visible: bool) -> TriggerSignal {
        if self.trigger != AnimationTrigger::Visible {
            return TriggerSignal::None;
        }
        self.in_view = visible;
        if visible {
            self.gate_arm()
        } else if self.once {
            TriggerSignal::None
        } else {
            TriggerSignal::Disarm
        }
    }

    pub fn on_event(&mut self, event: &HostEvent) -> TriggerSignal {
        match (self.trigger, event) {
            (AnimationTrigger::Hover, HostEvent::PointerEnter)
            | (AnimationTrigger::Click, HostEvent::Click) => self.gate_arm(),
            (AnimationTrigger::Hover, HostEvent::PointerLeave) if !self.once => {
                TriggerSignal::Disarm
            }
            _ => TriggerSignal::None,
        }
    }

    /// Arm request from outside the trigger model.
    pub fn external(&mut self) -> TriggerSignal {
        self.gate_arm()
    }

    pub fn mark_completed(&mut self) {
        self.completed_once = true;
    }

    /// Forget completion after an input change; re-arms on the next tick when the trigger
    /// condition still holds.
    pub fn reset(&mut self, cx: &mut Cx<'_>) {
        self.completed_once = false;
        cx.cancel(&mut self.pending);
        let rearm = match self.trigger {
            AnimationTrigger::Load => true,
            AnimationTrigger::Visible => self.in_view,
            AnimationTrigger::Hover | AnimationTrigger::Click => false,
        };
        if rearm {
            self.pending = Some(cx.defer());
        }
    }

    fn gate_arm(&self) -> TriggerSignal {
        if self.is_locked() {
            tracing::trace!(trigger = ?self.trigger, "arm ignored: once-run already completed");
            TriggerSignal::None
        } else {
            TriggerSignal::Arm
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/runtime/trigger.rs"]
mod tests;
