//! Deterministic, single-threaded virtual-time scheduler.
//!
//! Stands in for the browser's animation-frame queue, timers, event listeners and
//! intersection observers. Every registration returns a handle owned by exactly one
//! component; nothing is ever delivered for a cancelled handle.

use std::cmp::Reverse;
use std::collections::{BTreeMap, BinaryHeap};

use crate::foundation::core::Millis;
use crate::runtime::visibility::VisibilityOptions;

/// Arena slot of a mounted component.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct ComponentId(pub u32);

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TaskId(u64);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TaskKind {
    /// One-shot, due at the next frame boundary.
    Frame,
    /// Repeats every period until cancelled.
    Interval,
    /// One-shot after a delay.
    Timeout,
    /// One-shot, due now but never delivered synchronously.
    Deferred,
}

/// Handle to a scheduled callback.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TaskHandle {
    id: TaskId,
    kind: TaskKind,
}

impl TaskHandle {
    pub fn id(self) -> TaskId {
        self.id
    }

    pub fn kind(self) -> TaskKind {
        self.kind
    }
}

/// Host events a component can listen for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum EventKind {
    Resize,
    PointerEnter,
    PointerMove,
    PointerLeave,
    Click,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ListenerHandle {
    id: u64,
    event: EventKind,
}

impl ListenerHandle {
    pub fn event(self) -> EventKind {
        self.event
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ObserverHandle {
    id: u64,
}

/// A task that came due, ready for dispatch to its owner.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Due {
    pub owner: ComponentId,
    pub task: TaskHandle,
    pub at: Millis,
}

/// Cumulative registration counters, for leak accounting.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub struct SchedulerStats {
    pub tasks_registered: u64,
    pub tasks_cancelled: u64,
    pub tasks_fired: u64,
    pub listeners_attached: u64,
    pub listeners_detached: u64,
    pub observers_attached: u64,
    pub observers_detached: u64,
}

#[derive(Clone, Copy, Debug)]
struct TaskEntry {
    owner: ComponentId,
    kind: TaskKind,
    due_us: u64,
    period_us: u64,
    seq: u64,
}

#[derive(Clone, Copy, Debug)]
struct ListenerEntry {
    owner: ComponentId,
    event: EventKind,
}

#[derive(Clone, Copy, Debug)]
pub(crate) struct ObserverEntry {
    pub(crate) owner: ComponentId,
    pub(crate) options: VisibilityOptions,
    /// Last delivered state; `None` until the first evaluation.
    pub(crate) last_visible: Option<bool>,
}

// FRAME_INTERVAL_MS in whole microseconds.
const FRAME_US: u64 = 16_667;

fn to_us(ms: Millis) -> u64 {
    if ms.is_finite() && ms > 0.0 {
        (ms * 1000.0).round() as u64
    } else {
        0
    }
}

fn to_ms(us: u64) -> Millis {
    us as f64 / 1000.0
}

#[derive(Debug, Default)]
pub struct Scheduler {
    now_us: u64,
    next_id: u64,
    next_seq: u64,
    tasks: BTreeMap<TaskId, TaskEntry>,
    // Ordering rule: earliest due first, then registration order.
    ready: BinaryHeap<Reverse<(u64, u64, TaskId)>>,
    listeners: BTreeMap<u64, ListenerEntry>,
    observers: BTreeMap<u64, ObserverEntry>,
    stats: SchedulerStats,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now(&self) -> Millis {
        to_ms(self.now_us)
    }

    /// Move the clock forward; time never runs backwards.
    pub fn set_now(&mut self, now: Millis) {
        self.now_us = self.now_us.max(to_us(now));
    }

    pub fn stats(&self) -> SchedulerStats {
        self.stats
    }

    fn alloc_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }

    fn push(
        &mut self,
        owner: ComponentId,
        kind: TaskKind,
        due_us: u64,
        period_us: u64,
    ) -> TaskHandle {
        let id = TaskId(self.alloc_id());
        self.next_seq += 1;
        let seq = self.next_seq;
        self.tasks.insert(
            id,
            TaskEntry {
                owner,
                kind,
                due_us,
                period_us,
                seq,
            },
        );
        self.ready.push(Reverse((due_us, seq, id)));
        self.stats.tasks_registered += 1;
        TaskHandle { id, kind }
    }

    /// Schedule a one-shot callback for the next 60 Hz frame boundary.
    pub fn request_frame(&mut self, owner: ComponentId) -> TaskHandle {
        let due = (self.now_us / FRAME_US + 1) * FRAME_US;
        self.push(owner, TaskKind::Frame, due, 0)
    }

    /// Schedule a repeating callback; periods are clamped to at least one microsecond.
    pub fn set_interval(&mut self, owner: ComponentId, period: Millis) -> TaskHandle {
        let period_us = to_us(period).max(1);
        let due = self.now_us + period_us;
        self.push(owner, TaskKind::Interval, due, period_us)
    }

    pub fn set_timeout(&mut self, owner: ComponentId, delay: Millis) -> TaskHandle {
        let due = self.now_us + to_us(delay);
        self.push(owner, TaskKind::Timeout, due, 0)
    }

    /// Schedule a callback for the next pump at the current time.
    pub fn defer(&mut self, owner: ComponentId) -> TaskHandle {
        self.push(owner, TaskKind::Deferred, self.now_us, 0)
    }

    /// Cancel a task. Returns `false` if it had already fired or was cancelled.
    pub fn cancel(&mut self, handle: TaskHandle) -> bool {
        let removed = self.tasks.remove(&handle.id).is_some();
        if removed {
            self.stats.tasks_cancelled += 1;
            self.compact_if_sparse();
        }
        removed
    }

    /// Drop cancelled entries from the queue once they outnumber the live ones.
    fn compact_if_sparse(&mut self) {
        if self.ready.len() <= 2 * self.tasks.len() {
            return;
        }
        let tasks = &self.tasks;
        self.ready
            .retain(|&Reverse((_, seq, id))| tasks.get(&id).is_some_and(|t| t.seq == seq));
    }

    pub fn is_pending(&self, handle: TaskHandle) -> bool {
        self.tasks.contains_key(&handle.id)
    }

    /// Pop the next live task due at or before `until`, advancing the clock to its due time.
    pub fn pop_due(&mut self, until: Millis) -> Option<Due> {
        let until_us = to_us(until);
        loop {
            let &Reverse((due_us, seq, id)) = self.ready.peek()?;
            let live = self.tasks.get(&id).is_some_and(|t| t.seq == seq);
            if !live {
                self.ready.pop();
                continue;
            }
            if due_us > until_us {
                return None;
            }
            self.ready.pop();
            self.now_us = self.now_us.max(due_us);

            let entry = self.tasks[&id];
            if entry.kind == TaskKind::Interval {
                self.next_seq += 1;
                let next = TaskEntry {
                    due_us: due_us + entry.period_us,
                    seq: self.next_seq,
                    ..entry
                };
                self.tasks.insert(id, next);
                self.ready.push(Reverse((next.due_us, next.seq, id)));
            } else {
                self.tasks.remove(&id);
            }
            self.stats.tasks_fired += 1;
            return Some(Due {
                owner: entry.owner,
                task: TaskHandle {
                    id,
                    kind: entry.kind,
                },
                at: to_ms(due_us),
            });
        }
    }

    pub fn listen(&mut self, owner: ComponentId, event: EventKind) -> ListenerHandle {
        let id = self.alloc_id();
        self.listeners.insert(id, ListenerEntry { owner, event });
        self.stats.listeners_attached += 1;
        ListenerHandle { id, event }
    }

    pub fn unlisten(&mut self, handle: ListenerHandle) -> bool {
        let removed = self.listeners.remove(&handle.id).is_some();
        if removed {
            self.stats.listeners_detached += 1;
        }
        removed
    }

    pub fn listens(&self, owner: ComponentId, event: EventKind) -> bool {
        self.listeners
            .values()
            .any(|l| l.owner == owner && l.event == event)
    }

    /// Owners listening for `event`, in registration order, without duplicates.
    pub fn listeners_for(&self, event: EventKind) -> Vec<ComponentId> {
        let mut out: Vec<ComponentId> = Vec::new();
        for l in self.listeners.values().filter(|l| l.event == event) {
            if !out.contains(&l.owner) {
                out.push(l.owner);
            }
        }
        out
    }

    pub fn observe(&mut self, owner: ComponentId, options: VisibilityOptions) -> ObserverHandle {
        let id = self.alloc_id();
        self.observers.insert(
            id,
            ObserverEntry {
                owner,
                options,
                last_visible: None,
            },
        );
        self.stats.observers_attached += 1;
        ObserverHandle { id }
    }

    pub fn unobserve(&mut self, handle: ObserverHandle) -> bool {
        let removed = self.observers.remove(&handle.id).is_some();
        if removed {
            self.stats.observers_detached += 1;
        }
        removed
    }

    pub(crate) fn observers_mut(&mut self) -> impl Iterator<Item = (u64, &mut ObserverEntry)> {
        self.observers.iter_mut().map(|(id, o)| (*id, o))
    }

    pub(crate) fn observer_is_live(&self, id: u64) -> bool {
        self.observers.contains_key(&id)
    }

    pub fn pending_frames(&self) -> usize {
        self.tasks
            .values()
            .filter(|t| t.kind == TaskKind::Frame)
            .count()
    }

    pub fn pending_timers(&self) -> usize {
        self.tasks
            .values()
            .filter(|t| t.kind != TaskKind::Frame)
            .count()
    }

    pub fn attached_listeners(&self) -> usize {
        self.listeners.len()
    }

    pub fn live_observers(&self) -> usize {
        self.observers.len()
    }

    /// Tasks, listeners and observers still registered for `owner`.
    pub fn owned_by(&self, owner: ComponentId) -> usize {
        self.tasks.values().filter(|t| t.owner == owner).count()
            + self.listeners.values().filter(|l| l.owner == owner).count()
            + self.observers.values().filter(|o| o.owner == owner).count()
    }

    /// Drop everything `owner` still holds. Returns how many registrations were released.
    pub(crate) fn release_owner(&mut self, owner: ComponentId) -> usize {
        let tasks: Vec<TaskId> = self
            .tasks
            .iter()
            .filter(|(_, t)| t.owner == owner)
            .map(|(id, _)| *id)
            .collect();
        let listeners: Vec<u64> = self
            .listeners
            .iter()
            .filter(|(_, l)| l.owner == owner)
            .map(|(id, _)| *id)
            .collect();
        let observers: Vec<u64> = self
            .observers
            .iter()
            .filter(|(_, o)| o.owner == owner)
            .map(|(id, _)| *id)
            .collect();

        let n = tasks.len() + listeners.len() + observers.len();
        for id in tasks {
            self.tasks.remove(&id);
            self.stats.tasks_cancelled += 1;
        }
        for id in listeners {
            self.listeners.remove(&id);
            self.stats.listeners_detached += 1;
        }
        for id in observers {
            self.observers.remove(&id);
            self.stats.observers_detached += 1;
        }
        self.compact_if_sparse();
        n
    }
}

#[cfg(test)]
#[path = "../../tests/unit/runtime/scheduler.rs"]
mod tests;
