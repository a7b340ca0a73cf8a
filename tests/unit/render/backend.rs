use super::*;

#[test]
fn premultiplied_red_over_black() {
    let frame = FrameRGBA {
        width: 1,
        height: 1,
        data: vec![128, 0, 0, 128],
        premultiplied: true,
    };
    assert_eq!(frame.flatten_over([0, 0, 0, 255]).unwrap(), [128, 0, 0, 255]);
}

#[test]
fn straight_alpha_is_weighted_before_compositing() {
    let frame = FrameRGBA {
        width: 1,
        height: 1,
        data: vec![255, 255, 255, 0],
        premultiplied: false,
    };
    assert_eq!(frame.flatten_over([10, 20, 30, 255]).unwrap(), [10, 20, 30, 255]);
}

#[test]
fn pixel_lookup_is_bounds_checked() {
    let frame = FrameRGBA {
        width: 2,
        height: 1,
        data: vec![1, 2, 3, 4, 5, 6, 7, 8],
        premultiplied: true,
    };
    assert_eq!(frame.pixel(1, 0), Some([5, 6, 7, 8]));
    assert_eq!(frame.pixel(2, 0), None);
    assert!(FrameRGBA::empty(CanvasSize::new(0, 10)).is_empty());
}

#[test]
fn mismatched_buffers_are_rejected() {
    let mut dst = [0u8; 4];
    assert!(flatten_to_opaque_rgba8(&mut dst, &[0u8; 8], true, [0, 0, 0, 255]).is_err());
}
