use super::*;

fn vp(scroll_y: f64) -> Viewport {
    Viewport {
        width: 800.0,
        height: 600.0,
        scroll_y,
    }
}

#[test]
fn root_is_inset_from_the_bottom() {
    let root = observation_root(vp(0.0), VisibilityOptions::default());
    assert_eq!(root, Rect::new(0.0, 0.0, 800.0, 500.0));
    let scrolled = observation_root(vp(250.0), VisibilityOptions::default());
    assert_eq!(scrolled, Rect::new(0.0, 250.0, 800.0, 750.0));
}

#[test]
fn ratio_measures_overlap_fraction() {
    let root = Rect::new(0.0, 0.0, 100.0, 100.0);
    assert_eq!(intersection_ratio(Rect::new(0.0, 50.0, 100.0, 150.0), root), 0.5);
    assert_eq!(intersection_ratio(Rect::new(0.0, 200.0, 100.0, 300.0), root), 0.0);
    assert_eq!(intersection_ratio(Rect::new(10.0, 10.0, 20.0, 20.0), root), 1.0);
}

#[test]
fn zero_area_targets_are_visible_when_touching() {
    let root = Rect::new(0.0, 0.0, 100.0, 100.0);
    assert_eq!(intersection_ratio(Rect::new(10.0, 10.0, 10.0, 10.0), root), 1.0);
    assert_eq!(intersection_ratio(Rect::new(10.0, 300.0, 10.0, 300.0), root), 0.0);
}

#[test]
fn threshold_applies_to_the_inset_root() {
    let opts = VisibilityOptions::default();
    // 100px tall element starting at y=480: 20px inside the inset root, 20%.
    let target = Rect::new(0.0, 480.0, 100.0, 580.0);
    assert!(is_visible(target, vp(0.0), opts));
    // At y=490 only 10% is inside the inset root, even though 100% is on screen.
    let lower = Rect::new(0.0, 490.0, 100.0, 590.0);
    assert!(!is_visible(lower, vp(0.0), opts));
    assert!(is_visible(lower, vp(100.0), opts));
}

#[test]
fn options_deserialize_with_defaults() {
    let o: VisibilityOptions = serde_json::from_str("{}").unwrap();
    assert_eq!(o, VisibilityOptions::default());
    let v: Viewport = serde_json::from_str("{\"width\":10,\"height\":5}").unwrap();
    assert_eq!(v.scroll_y, 0.0);
}
