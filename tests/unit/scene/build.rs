use crate::{
    runtime::component::Snapshot,
    scene::model::Scene,
};

const PAGE: &str = r#"{
  "viewport": { "width": 400, "height": 300 },
  "seed": 9,
  "components": [
    { "kind": "particles", "bounds": { "x": 0, "y": 0, "width": 400, "height": 300 } },
    { "kind": "particles", "bounds": { "x": 0, "y": 0, "width": 400, "height": 300 } },
    { "kind": "stagger", "bounds": { "x": 0, "y": 2000, "width": 300, "height": 40 },
      "text": "below the fold" }
  ]
}"#;

#[test]
fn components_mount_in_declaration_order() {
    let scene = Scene::from_json_str(PAGE).unwrap();
    let stage = scene.build().unwrap();
    let ids: Vec<u32> = stage.mounted().iter().map(|id| id.0).collect();
    assert_eq!(ids, [0, 1, 2]);
}

#[test]
fn each_component_gets_its_own_stream_and_builds_repeat() {
    let scene = Scene::from_json_str(PAGE).unwrap();
    let particles = |seed_override: Option<u64>| {
        let mut scene = scene.clone();
        if let Some(seed) = seed_override {
            scene.seed = seed;
        }
        let mut stage = scene.build().unwrap();
        stage.advance_to(100.0);
        let ids = stage.mounted();
        let grab = |i: usize| match stage.snapshot(ids[i]).unwrap() {
            Snapshot::Particles(p) => p.particles,
            other => panic!("unexpected {other:?}"),
        };
        (grab(0), grab(1))
    };

    let (a0, a1) = particles(None);
    let (b0, _) = particles(None);
    let (c0, _) = particles(Some(10));
    assert_eq!(a0.len(), 12);
    assert_eq!(a0, b0);
    assert_ne!(a0, a1);
    assert_ne!(a0, c0);
}

#[test]
fn invalid_scene_does_not_build() {
    let mut scene = Scene::from_json_str(PAGE).unwrap();
    scene.viewport.width = -1.0;
    assert!(scene.build().is_err());
}
