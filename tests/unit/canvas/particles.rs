use super::*;
use crate::foundation::core::Rect;
use crate::runtime::stage::Stage;
use crate::runtime::visibility::Viewport;

fn sim(width: u32, height: u32) -> ParticleSim {
    ParticleSim::new(
        &ParticleConfig::default(),
        CanvasSize::new(width, height),
        0.0,
        Rng64::new(11),
    )
}

#[test]
fn presets_and_overrides_resolve() {
    assert_eq!(resolve_density(PresetOr::Preset(DensityPreset::High)), 0.0002);
    assert_eq!(resolve_density(PresetOr::Value(0.5)), 0.5);
    assert_eq!(resolve_drift(PresetOr::Preset(SpeedPreset::Slow)), 0.1);
    assert_eq!(resolve_size(PresetOr::Preset(SizePreset::Large)), 2.5);
}

#[test]
fn target_is_floor_of_area_times_density() {
    assert_eq!(target_count(CanvasSize::new(1000, 500), 0.0001), 50);
    assert_eq!(target_count(CanvasSize::new(333, 333), 0.0001), 11);
    assert_eq!(target_count(CanvasSize::new(0, 500), 0.0001), 0);
    assert_eq!(target_count(CanvasSize::new(100, 100), f64::NAN), 0);
}

#[test]
fn population_matches_the_target_after_every_step() {
    let mut s = sim(400, 300);
    for frame in 0..200 {
        s.step(f64::from(frame) * 16.0);
        assert_eq!(s.particles().len(), s.target());
    }
    s.resize(CanvasSize::new(800, 600));
    s.step(3300.0);
    assert_eq!(s.particles().len(), 48);
    s.resize(CanvasSize::new(200, 150));
    s.step(3316.0);
    assert_eq!(s.particles().len(), 3);
    s.resize(CanvasSize::new(0, 0));
    s.step(3332.0);
    assert!(s.particles().is_empty());
}

#[test]
fn entrance_fade_is_shared_by_all_particles() {
    let mut s = sim(500, 500);
    s.step(250.0);
    assert!(s.particles().iter().all(|p| (p.opacity - 0.25).abs() < 1e-9));
    s.step(1500.0);
    assert!(s.particles().iter().all(|p| p.opacity < 1.0));
}

#[test]
fn expired_particles_are_replaced() {
    let mut s = sim(500, 500);
    s.step(0.0);
    let first: Vec<Millis> = s.particles().iter().map(|p| p.birth_ms).collect();
    assert!(first.iter().all(|&b| b == 0.0));
    s.step(9000.0);
    assert!(s.particles().iter().all(|p| p.birth_ms == 9000.0));
    assert_eq!(s.particles().len(), s.target());
}

#[test]
fn particles_stay_inside_the_canvas() {
    let config = ParticleConfig {
        speed: PresetOr::Value(40.0),
        density: PresetOr::Value(0.01),
        ..ParticleConfig::default()
    };
    let mut s = ParticleSim::new(&config, CanvasSize::new(100, 100), 0.0, Rng64::new(5));
    for frame in 0..50 {
        s.step(f64::from(frame) * 16.0);
        for p in s.particles() {
            assert!((0.0..=100.0).contains(&p.x) && (0.0..=100.0).contains(&p.y));
        }
    }
}

#[test]
fn field_loop_runs_and_tears_down_cleanly() {
    let mut stage = Stage::new(Viewport::new(800.0, 600.0));
    let id = stage.mount(
        Rect::new(0.0, 0.0, 400.0, 300.0),
        ParticleField::new(ParticleConfig::default(), Rng64::new(2)),
    );
    assert_eq!(stage.scheduler().pending_frames(), 1);
    assert_eq!(stage.scheduler().attached_listeners(), 1);

    // Thirty 60 Hz frame boundaries fall inside the first 501 ms.
    stage.advance_to(501.0);
    let Snapshot::Particles(s) = stage.snapshot(id).unwrap() else {
        panic!("expected particle snapshot");
    };
    assert_eq!(s.live, 12);
    assert_eq!(s.frames, 30);

    stage.unmount(id).unwrap();
    assert_eq!(stage.scheduler().pending_frames(), 0);
    assert_eq!(stage.scheduler().attached_listeners(), 0);
}

#[test]
fn resize_remeasures_the_container() {
    let mut stage = Stage::new(Viewport::new(800.0, 600.0));
    let id = stage.mount(
        Rect::new(0.0, 0.0, 400.0, 300.0),
        ParticleField::new(ParticleConfig::default(), Rng64::new(2)),
    );
    stage.set_bounds(id, Rect::new(0.0, 0.0, 800.0, 600.0)).unwrap();
    stage.resize_viewport(1024.0, 768.0);
    stage.advance_by(20.0);
    let Snapshot::Particles(s) = stage.snapshot(id).unwrap() else {
        panic!("expected particle snapshot");
    };
    assert_eq!((s.width, s.height), (800, 600));
    assert_eq!(s.live, 48);
}

#[test]
fn render_draws_visible_particles() {
    let mut stage = Stage::new(Viewport::new(800.0, 600.0));
    let config = ParticleConfig {
        density: PresetOr::Value(0.01),
        size: PresetOr::Value(3.0),
        glow: true,
        ..ParticleConfig::default()
    };
    let id = stage.mount(Rect::new(0.0, 0.0, 64.0, 64.0), ParticleField::new(config, Rng64::new(3)));
    stage.advance_to(1200.0);
    let frame = stage.render(id).unwrap();
    assert_eq!((frame.width, frame.height), (64, 64));
    assert!(frame.data.chunks_exact(4).any(|px| px[3] > 0));
}
