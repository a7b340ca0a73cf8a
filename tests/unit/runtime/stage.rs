use super::*;
use crate::{
    canvas::particles::{ParticleConfig, ParticleField, ParticleSnapshot},
    foundation::rng::Rng64,
    runtime::{scheduler::TaskHandle, trigger::RunPhase},
    text::{
        scramble::{ScrambleConfig, ScrambleEngine},
        stagger::{StaggerConfig, StaggerReveal},
    },
};

/// Registers a loop, a listener and an observer, then forgets all of them on unmount.
struct Leaky;

impl Component for Leaky {
    fn name(&self) -> &'static str {
        "leaky"
    }

    fn mount(&mut self, cx: &mut Cx<'_>) {
        cx.request_frame();
        cx.listen(EventKind::Resize);
        cx.observe(Default::default());
    }

    fn unmount(&mut self, _cx: &mut Cx<'_>) {}

    fn on_task(&mut self, _task: TaskHandle, cx: &mut Cx<'_>) {
        cx.request_frame();
    }

    fn snapshot(&self, _now: Millis) -> Snapshot {
        Snapshot::Particles(ParticleSnapshot {
            width: 0,
            height: 0,
            target: 0,
            live: 0,
            frames: 0,
            particles: Vec::new(),
        })
    }
}

fn stage() -> Stage {
    Stage::new(Viewport::new(800.0, 600.0))
}

fn full() -> Rect {
    Rect::new(0.0, 0.0, 400.0, 300.0)
}

#[test]
fn unmount_reclaims_what_a_component_forgot() {
    let mut stage = stage();
    let id = stage.mount(full(), Leaky);
    stage.advance_to(100.0);
    assert_eq!(stage.scheduler().owned_by(id), 3);

    stage.unmount(id).unwrap();
    assert_eq!(stage.scheduler().owned_by(id), 0);
    assert!(stage.mounted().is_empty());

    let before = stage.stats().tasks_fired;
    stage.advance_to(1000.0);
    assert_eq!(stage.stats().tasks_fired, before);
}

#[test]
fn well_behaved_components_release_everything_themselves() {
    let mut stage = stage();
    let id = stage.mount(full(), ParticleField::new(ParticleConfig::default(), Rng64::new(1)));
    stage.advance_to(50.0);
    assert_eq!(stage.scheduler().pending_frames(), 1);
    assert_eq!(stage.scheduler().attached_listeners(), 1);

    stage.unmount(id).unwrap();
    assert_eq!(stage.scheduler().pending_frames(), 0);
    assert_eq!(stage.scheduler().attached_listeners(), 0);
    let stats = stage.stats();
    assert_eq!(stats.listeners_attached, stats.listeners_detached);
}

#[test]
fn unmounted_ids_are_errors_not_panics() {
    let mut stage = stage();
    let id = stage.mount(full(), Leaky);
    stage.unmount(id).unwrap();

    assert!(stage.unmount(id).is_err());
    assert!(stage.snapshot(id).is_err());
    assert!(stage.click(id).is_err());
    assert!(stage.render(id).is_err());
    assert!(stage.dispatch(ComponentId(99), HostEvent::PointerLeave).is_err());
}

#[test]
fn dispatch_reports_whether_anyone_listened() {
    let mut stage = stage();
    let scramble = stage.mount(
        full(),
        ScrambleEngine::new(
            ScrambleConfig {
                text: "HELLO".into(),
                ..ScrambleConfig::default()
            },
            Rng64::new(2),
        ),
    );
    assert!(stage.pointer_enter(scramble).unwrap());
    assert!(!stage.click(scramble).unwrap());
    assert!(stage.render(scramble).is_err());
}

#[test]
fn clock_only_moves_forward() {
    let mut stage = stage();
    stage.advance_by(40.0);
    stage.advance_by(-10.0);
    assert_eq!(stage.now(), 40.0);
    stage.advance_to(10.0);
    assert_eq!(stage.now(), 40.0);
}

#[test]
fn run_frames_until_matches_a_single_jump() {
    let config = ParticleConfig::default();
    let mut stepped = stage();
    let a = stepped.mount(full(), ParticleField::new(config.clone(), Rng64::new(5)));
    stepped.run_frames_until(400.0);

    let mut jumped = stage();
    let b = jumped.mount(full(), ParticleField::new(config, Rng64::new(5)));
    jumped.advance_to(400.0);

    assert_eq!(stepped.now(), jumped.now());
    assert_eq!(stepped.snapshot(a).unwrap(), jumped.snapshot(b).unwrap());
}

#[test]
fn scrolling_into_view_arms_on_the_next_advance() {
    let mut stage = stage();
    let id = stage.mount(
        Rect::new(0.0, 2000.0, 400.0, 2040.0),
        StaggerReveal::new(
            StaggerConfig {
                text: "below".into(),
                ..StaggerConfig::default()
            },
            Rng64::new(3),
        ),
    );
    let phase = |stage: &Stage| match stage.snapshot(id).unwrap() {
        Snapshot::Stagger(s) => s.phase,
        other => panic!("unexpected {other:?}"),
    };

    stage.advance_to(100.0);
    assert_eq!(phase(&stage), RunPhase::Idle);

    stage.scroll_to(1700.0);
    assert_eq!(phase(&stage), RunPhase::Idle);
    stage.advance_to(200.0);
    assert_ne!(phase(&stage), RunPhase::Idle);
}

#[test]
fn dropping_the_stage_unmounts_everything() {
    let mut stage = stage();
    stage.mount(full(), ParticleField::new(ParticleConfig::default(), Rng64::new(1)));
    stage.mount(full(), Leaky);
    stage.advance_to(50.0);
    drop(stage);
}
