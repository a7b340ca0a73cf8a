use super::*;
use crate::foundation::core::Rect;
use crate::runtime::scheduler::{ComponentId, Scheduler};
use crate::runtime::visibility::Viewport;

const ID: ComponentId = ComponentId(3);

fn cx(sched: &mut Scheduler) -> Cx<'_> {
    Cx::new(
        ID,
        Rect::new(0.0, 0.0, 100.0, 20.0),
        Viewport::new(800.0, 600.0),
        sched,
    )
}

#[test]
fn load_arms_on_the_deferred_tick_not_synchronously() {
    let mut sched = Scheduler::new();
    let mut t = TriggerDetector::new(AnimationTrigger::Load, true);
    t.mount(&mut cx(&mut sched));
    assert_eq!(sched.pending_timers(), 1);

    let due = sched.pop_due(0.0).unwrap();
    assert!(t.owns(due.task));
    assert_eq!(t.on_task(due.task), TriggerSignal::Arm);
    assert_eq!(t.on_task(due.task), TriggerSignal::None);
}

#[test]
fn visible_registers_an_observer_and_disarms_when_repeatable() {
    let mut sched = Scheduler::new();
    let mut t = TriggerDetector::new(AnimationTrigger::Visible, false);
    t.mount(&mut cx(&mut sched));
    assert_eq!(sched.live_observers(), 1);
    assert_eq!(t.on_visibility(true), TriggerSignal::Arm);
    assert!(t.in_view());
    assert_eq!(t.on_visibility(false), TriggerSignal::Disarm);

    t.unmount(&mut cx(&mut sched));
    assert_eq!(sched.live_observers(), 0);
}

#[test]
fn once_locks_after_completion() {
    let mut t = TriggerDetector::new(AnimationTrigger::Visible, true);
    assert_eq!(t.on_visibility(true), TriggerSignal::Arm);
    t.mark_completed();
    assert!(t.is_locked());
    assert_eq!(t.on_visibility(false), TriggerSignal::None);
    assert_eq!(t.on_visibility(true), TriggerSignal::None);
    assert_eq!(t.external(), TriggerSignal::None);
}

#[test]
fn hover_and_click_listen_for_pointer_events() {
    let mut sched = Scheduler::new();
    let mut hover = TriggerDetector::new(AnimationTrigger::Hover, false);
    hover.mount(&mut cx(&mut sched));
    assert_eq!(sched.attached_listeners(), 2);
    assert_eq!(hover.on_event(&HostEvent::PointerEnter), TriggerSignal::Arm);
    assert_eq!(hover.on_event(&HostEvent::PointerLeave), TriggerSignal::Disarm);
    assert_eq!(hover.on_event(&HostEvent::Click), TriggerSignal::None);

    let mut click = TriggerDetector::new(AnimationTrigger::Click, true);
    click.mount(&mut cx(&mut sched));
    assert_eq!(sched.attached_listeners(), 3);
    assert_eq!(click.on_event(&HostEvent::Click), TriggerSignal::Arm);

    hover.unmount(&mut cx(&mut sched));
    click.unmount(&mut cx(&mut sched));
    assert_eq!(sched.attached_listeners(), 0);
}

#[test]
fn reset_unlocks_and_rearms_load_triggers() {
    let mut sched = Scheduler::new();
    let mut t = TriggerDetector::new(AnimationTrigger::Load, true);
    t.mark_completed();
    t.reset(&mut cx(&mut sched));
    assert!(!t.is_locked());
    let due = sched.pop_due(0.0).unwrap();
    assert_eq!(t.on_task(due.task), TriggerSignal::Arm);
}

#[test]
fn reset_of_hidden_visible_trigger_waits_for_intersection() {
    let mut sched = Scheduler::new();
    let mut t = TriggerDetector::new(AnimationTrigger::Visible, true);
    t.reset(&mut cx(&mut sched));
    assert_eq!(sched.pending_timers(), 0);
}
