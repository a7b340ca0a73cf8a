use super::*;

const ALL: [Ease; 8] = [
    Ease::Linear,
    Ease::InQuad,
    Ease::OutQuad,
    Ease::InOutQuad,
    Ease::InCubic,
    Ease::OutCubic,
    Ease::InOutCubic,
    Ease::REVEAL,
];

#[test]
fn endpoints_are_stable() {
    for ease in ALL {
        assert_eq!(ease.apply(0.0), 0.0);
        assert_eq!(ease.apply(1.0), 1.0);
    }
}

#[test]
fn monotonic_spot_check() {
    for ease in ALL {
        let a = ease.apply(0.25);
        let b = ease.apply(0.5);
        let c = ease.apply(0.75);
        assert!(a < b, "{ease:?}");
        assert!(b < c, "{ease:?}");
    }
}

#[test]
fn reveal_curve_is_ease_out() {
    // Front-loaded: most of the motion happens in the first half.
    assert!(Ease::REVEAL.apply(0.5) > 0.85);
    assert!(Ease::REVEAL.apply(0.1) > 0.1);
}

#[test]
fn linear_bezier_matches_identity() {
    let e = Ease::CubicBezier {
        x1: 0.0,
        y1: 0.0,
        x2: 1.0,
        y2: 1.0,
    };
    for i in 0..=10 {
        let t = f64::from(i) / 10.0;
        assert!((e.apply(t) - t).abs() < 1e-5);
    }
}

#[test]
fn out_of_range_and_nan_inputs_clamp() {
    assert_eq!(Ease::REVEAL.apply(-3.0), 0.0);
    assert_eq!(Ease::REVEAL.apply(7.0), 1.0);
    assert_eq!(Ease::OutCubic.apply(f64::NAN), 0.0);
}
