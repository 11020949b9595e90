use super::*;

#[test]
fn fps_rejects_zero_parts() {
    assert!(Fps::new(0, 1).is_err());
    assert!(Fps::new(60, 0).is_err());
    let fps = Fps::new(60, 1).unwrap();
    assert_eq!(fps.frames_to_secs(120), 2.0);
}

#[test]
fn canvas_center_is_half_extent() {
    let c = Canvas {
        width: 3840,
        height: 2160,
    };
    assert_eq!(c.center(), Point::new(1920.0, 1080.0));
    assert_eq!(c.rgba_len(), 3840 * 2160 * 4);
}

#[test]
fn frame_index_orders_numerically() {
    let mut v = vec![FrameIndex(10), FrameIndex(2), FrameIndex(1)];
    v.sort();
    assert_eq!(v, vec![FrameIndex(1), FrameIndex(2), FrameIndex(10)]);
    assert_eq!(FrameIndex(42).to_string(), "42");
}
