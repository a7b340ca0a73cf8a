use super::*;

#[test]
fn hex_and_css_forms_agree() {
    let hex = ColorDef::parse("#ff8000").unwrap();
    let css = ColorDef::parse("rgb(255, 128, 0)").unwrap();
    assert_eq!(hex.to_rgba8_straight(), css.to_rgba8_straight());
    assert_eq!(hex.to_rgba8_straight(), [255, 128, 0, 255]);
}

#[test]
fn rgba_string_keeps_alpha() {
    let c = ColorDef::parse("rgba(255,255,255,0.5)").unwrap();
    assert_eq!(c.a, 0.5);
    assert_eq!(c.to_rgba8_straight()[3], 128);
}

#[test]
fn alpha_substitution_replaces_only_alpha() {
    let c = ColorDef::parse("#20c05080").unwrap().with_alpha(0.25);
    let [r, g, b, a] = c.to_rgba8_straight();
    assert_eq!([r, g, b], [0x20, 0xc0, 0x50]);
    assert_eq!(a, 64);
}

#[test]
fn deserializes_all_representations() {
    let a: ColorDef = serde_json::from_str("\"#000000\"").unwrap();
    let b: ColorDef = serde_json::from_str("{\"r\":0,\"g\":0,\"b\":0}").unwrap();
    let c: ColorDef = serde_json::from_str("[0,0,0,1]").unwrap();
    assert_eq!(a, b);
    assert_eq!(b, c);
    assert!(serde_json::from_str::<ColorDef>("[0,0]").is_err());
    assert!(serde_json::from_str::<ColorDef>("\"#abc\"").is_err());
}

#[test]
fn straight_conversion_clamps_and_zeroes_nan() {
    let c = ColorDef::rgba(1.0, 0.5, -0.2, f64::NAN).to_rgba8_straight();
    assert_eq!(c, [255, 128, 0, 0]);
}
