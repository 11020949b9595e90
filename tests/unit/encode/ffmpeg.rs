use super::*;

fn gray_frame(width: u32, height: u32) -> FrameRGBA {
    FrameRGBA {
        width,
        height,
        data: [90, 90, 90, 255].repeat((width * height) as usize),
        premultiplied: true,
    }
}

fn temp_mp4(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!(
        "circle_sweep_{name}_{}_{}.mp4",
        std::process::id(),
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos()
    ))
}

const SMALL: SinkConfig = SinkConfig {
    width: 16,
    height: 16,
    fps: Fps { num: 60, den: 1 },
};

#[test]
fn begin_rejects_odd_dimensions_before_spawning() {
    let mut sink = FfmpegSink::new(FfmpegSinkOpts::new(
        std::env::temp_dir().join("circle_sweep_never_written.mp4"),
    ));
    let err = sink
        .begin(SinkConfig {
            width: 11,
            height: 10,
            fps: Fps::default(),
        })
        .unwrap_err();
    assert!(err.to_string().contains("even"));
    assert!(!sink.is_running());
}

#[test]
fn push_before_begin_is_an_error() {
    let mut sink = FfmpegSink::new(FfmpegSinkOpts::new("unused.mp4"));
    assert!(sink.push_frame(FrameIndex(0), &gray_frame(2, 2)).is_err());
    assert!(sink.end().is_err());
}

#[test]
fn abort_reaps_the_ffmpeg_process() {
    if !is_ffmpeg_on_path() {
        eprintln!("skipping: ffmpeg not on PATH");
        return;
    }
    let out = temp_mp4("abort");
    let mut sink = FfmpegSink::new(FfmpegSinkOpts::new(&out));
    sink.begin(SMALL).unwrap();
    sink.push_frame(FrameIndex(0), &gray_frame(16, 16)).unwrap();

    let mut encoder = sink.encoder.take().unwrap();
    encoder.abort();
    assert!(encoder.stdin.is_none());
    assert!(encoder.child.try_wait().unwrap().is_some());

    std::fs::remove_file(&out).ok();
}

#[test]
fn dropping_mid_stream_releases_the_encoder() {
    if !is_ffmpeg_on_path() {
        eprintln!("skipping: ffmpeg not on PATH");
        return;
    }
    let out = temp_mp4("drop");
    {
        let mut sink = FfmpegSink::new(FfmpegSinkOpts::new(&out));
        sink.begin(SMALL).unwrap();
        sink.push_frame(FrameIndex(0), &gray_frame(16, 16)).unwrap();
        assert!(sink.is_running());
    }

    // The path is free for a complete encode afterwards.
    let mut sink = FfmpegSink::new(FfmpegSinkOpts::new(&out));
    sink.begin(SMALL).unwrap();
    for i in 0..3 {
        sink.push_frame(FrameIndex(i), &gray_frame(16, 16)).unwrap();
    }
    sink.end().unwrap();
    assert!(!sink.is_running());
    assert!(std::fs::metadata(&out).unwrap().len() > 0);

    std::fs::remove_file(&out).ok();
}

#[test]
fn out_of_order_frames_are_rejected() {
    if !is_ffmpeg_on_path() {
        eprintln!("skipping: ffmpeg not on PATH");
        return;
    }
    let out = temp_mp4("order");
    let mut sink = FfmpegSink::new(FfmpegSinkOpts::new(&out));
    sink.begin(SMALL).unwrap();
    sink.push_frame(FrameIndex(4), &gray_frame(16, 16)).unwrap();
    assert!(sink.push_frame(FrameIndex(4), &gray_frame(16, 16)).is_err());
    assert!(sink.push_frame(FrameIndex(2), &gray_frame(16, 16)).is_err());
    drop(sink);
    std::fs::remove_file(&out).ok();
}
