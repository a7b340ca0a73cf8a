use super::*;

fn table() -> SpeedTable {
    SpeedTable {
        slow: StaggerTiming::new(900.0, 60.0, 120.0),
        medium: StaggerTiming::new(650.0, 40.0, 80.0),
        fast: StaggerTiming::new(450.0, 25.0, 50.0),
        baseline: StaggerTiming::new(650.0, 40.0, 80.0),
        floor: StaggerTiming::new(100.0, 5.0, 0.0),
    }
}

#[test]
fn presets_come_straight_from_the_table() {
    let t = table();
    assert_eq!(resolve_speed(SpeedSpec::Preset(SpeedPreset::Fast), &t), t.fast);
    assert_eq!(resolve_speed(SpeedSpec::default(), &t), t.medium);
}

#[test]
fn multiplier_divides_baseline() {
    let r = resolve_speed(SpeedSpec::Value(2.0), &table());
    assert_eq!(r.duration_ms, 325.0);
    assert_eq!(r.stagger_ms, 20.0);
    assert_eq!(r.word_delay_ms, 40.0);
}

#[test]
fn huge_multiplier_hits_floor() {
    let r = resolve_speed(SpeedSpec::Value(1000.0), &table());
    assert_eq!(r.duration_ms, 100.0);
    assert_eq!(r.stagger_ms, 5.0);
}

#[test]
fn degenerate_multipliers_never_divide_by_zero() {
    for m in [0.0, -4.0, f64::NAN, f64::INFINITY] {
        let r = resolve_speed(SpeedSpec::Value(m), &table());
        assert!(r.duration_ms.is_finite() && r.duration_ms > 0.0, "m={m}");
        assert!(r.stagger_ms.is_finite() && r.stagger_ms > 0.0, "m={m}");
    }
}

#[test]
fn deserializes_string_or_number() {
    let a: SpeedSpec = serde_json::from_str("\"slow\"").unwrap();
    let b: SpeedSpec = serde_json::from_str("1.5").unwrap();
    assert_eq!(a, SpeedSpec::Preset(SpeedPreset::Slow));
    assert_eq!(b, SpeedSpec::Value(1.5));
    let d: PresetOr<DensityPreset> = serde_json::from_str("\"high\"").unwrap();
    assert_eq!(d.resolve_with(|_| 3.0), 3.0);
}
