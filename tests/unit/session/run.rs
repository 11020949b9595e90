use super::*;
use crate::encode::sink::InMemorySink;
use crate::scene::config::SceneConfig;
use crate::session::config::SweepRange;

fn temp_dir(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!(
        "circle_sweep_{name}_{}_{}",
        std::process::id(),
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos()
    ))
}

fn small_config(root: &std::path::Path) -> SweepConfig {
    SweepConfig {
        range: SweepRange::new(-40.0, 40.0, 20.0).unwrap(),
        frames_dir: root.join("frames"),
        output: root.join("video.mp4"),
        progress_every: 0,
        scene: SceneConfig {
            draw_labels: false,
            ..SceneConfig::scaled(0.1)
        },
        ..SweepConfig::default()
    }
}

#[test]
fn clean_outputs_tolerates_missing_paths() {
    let root = temp_dir("clean_missing");
    let cfg = small_config(&root);
    assert_eq!(clean_outputs(&cfg).unwrap(), (0, false));
}

#[test]
fn clean_outputs_removes_video_and_prefixed_frames() {
    let root = temp_dir("clean_existing");
    let cfg = small_config(&root);
    std::fs::create_dir_all(&cfg.frames_dir).unwrap();
    std::fs::write(&cfg.output, b"old video").unwrap();
    std::fs::write(cfg.frames_dir.join("frame3.jpg"), b"x").unwrap();
    std::fs::write(cfg.frames_dir.join("other.jpg"), b"x").unwrap();

    assert_eq!(clean_outputs(&cfg).unwrap(), (1, true));
    assert!(!cfg.output.exists());
    assert!(cfg.frames_dir.join("other.jpg").exists());

    std::fs::remove_dir_all(&root).ok();
}

#[test]
fn repeated_runs_are_identical_and_drop_stale_frames() {
    let root = temp_dir("run_twice");
    let cfg = small_config(&root);

    let mut first = InMemorySink::new();
    let report = run_with_sink(&cfg, &mut first).unwrap();
    assert_eq!(report.frames_generated, 5);
    assert_eq!(report.frames_encoded, 5);
    assert_eq!(report.stale_frames_removed, 0);

    // A leftover from some longer earlier run must not reach the second video.
    std::fs::write(cfg.frames_dir.join("frame99.jpg"), b"stale").unwrap();

    let mut second = InMemorySink::new();
    let report = run_with_sink(&cfg, &mut second).unwrap();
    assert_eq!(report.stale_frames_removed, 6);
    assert_eq!(report.frames_encoded, 5);
    assert!(!cfg.frames_dir.join("frame99.jpg").exists());

    assert_eq!(first.frames().len(), second.frames().len());
    for ((ia, a), (ib, b)) in first.frames().iter().zip(second.frames()) {
        assert_eq!(ia, ib);
        assert_eq!(a.data, b.data);
    }

    std::fs::remove_dir_all(&root).ok();
}

#[test]
fn invalid_config_touches_nothing() {
    let root = temp_dir("run_invalid");
    let mut cfg = small_config(&root);
    std::fs::create_dir_all(&cfg.frames_dir).unwrap();
    std::fs::write(cfg.frames_dir.join("frame0.jpg"), b"x").unwrap();
    cfg.range.step = 0.0;

    let mut sink = InMemorySink::new();
    assert!(run_with_sink(&cfg, &mut sink).is_err());
    assert!(cfg.frames_dir.join("frame0.jpg").exists());

    std::fs::remove_dir_all(&root).ok();
}
