use super::*;
use crate::encode::sink::InMemorySink;
use crate::foundation::core::FrameIndex;

fn tiny_scene() -> SceneConfig {
    SceneConfig {
        draw_labels: false,
        ..SceneConfig::scaled(0.1)
    }
}

#[test]
fn generates_one_frame_per_step_in_order() {
    let mut generator = FrameGenerator::new(tiny_scene()).unwrap();
    let range = SweepRange::new(-60.0, 60.0, 10.0).unwrap();
    let mut sink = InMemorySink::new();

    let n = generator
        .generate(&range, Fps::default(), &mut sink)
        .unwrap();
    assert_eq!(n, 13);
    assert!(sink.is_finished());

    let cfg = sink.config().unwrap();
    assert_eq!((cfg.width, cfg.height), (192, 108));
    assert_eq!(cfg.fps, Fps::default());

    let indices: Vec<u64> = sink.frames().iter().map(|(i, _)| i.0).collect();
    assert_eq!(indices, (0..13).collect::<Vec<_>>());
}

#[test]
fn frame_k_matches_render_at_x_of_k() {
    let range = SweepRange::new(-30.0, 30.0, 15.0).unwrap();
    let mut generator = FrameGenerator::new(tiny_scene()).unwrap();
    let mut sink = InMemorySink::new();
    generator
        .generate(&range, Fps::default(), &mut sink)
        .unwrap();

    let (idx, frame) = &sink.frames()[3];
    assert_eq!(*idx, FrameIndex(3));
    let single = generator.render_at(range.x_at(FrameIndex(3))).unwrap();
    assert_eq!(frame.data, single.data);
}

#[test]
fn invalid_range_renders_nothing() {
    let mut generator = FrameGenerator::new(tiny_scene()).unwrap();
    let mut sink = InMemorySink::new();
    let bad = SweepRange {
        initial_x: 0.0,
        final_x: 10.0,
        step: 0.0,
    };
    assert!(generator.generate(&bad, Fps::default(), &mut sink).is_err());
    assert!(sink.config().is_none());
}
