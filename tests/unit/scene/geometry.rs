use super::*;

const EPS: f64 = 1e-9;

fn cfg() -> SceneConfig {
    SceneConfig::default()
}

#[test]
fn circle_passes_through_both_points() {
    let cfg = cfg();
    for x in [-6000.0, -1234.5, -10.0, 0.0, 0.5, 300.0, 6000.0] {
        let g = SceneGeometry::at(&cfg, x);
        let expected = (x * x + (cfg.points_gap_px() / 2.0).powi(2)).sqrt();
        assert!((g.radius - expected).abs() < EPS, "x={x}");
        assert!((g.circle_center.distance(g.top_point) - g.radius).abs() < 1e-6);
        assert!((g.circle_center.distance(g.bottom_point) - g.radius).abs() < 1e-6);
    }
}

#[test]
fn zero_displacement_sits_on_the_bisector() {
    let cfg = cfg();
    let g = SceneGeometry::at(&cfg, 0.0);
    assert_eq!(g.circle_center, g.frame_center);
    assert_eq!(g.circle_center.y, g.mid_y());
    assert!((g.radius - cfg.points_gap_px() / 2.0).abs() < EPS);
}

#[test]
fn points_are_symmetric_about_frame_center() {
    let cfg = cfg();
    let g = SceneGeometry::at(&cfg, 250.0);
    assert_eq!(g.frame_center, Point::new(1920.0, 1080.0));
    assert_eq!(g.top_point, Point::new(1920.0, 780.0));
    assert_eq!(g.bottom_point, Point::new(1920.0, 1380.0));
    assert_eq!(g.circle_center, Point::new(2170.0, 1080.0));
    assert_eq!(g.leg_start(), Point::new(1920.0, 1080.0));
    assert_eq!(g.horizontal_offset(), 250.0);
}

#[test]
fn stated_values_scale_from_the_gap() {
    let cfg = cfg();
    let gap = cfg.points_gap_px();
    assert!((stated_value(&cfg, gap) - cfg.stated_gap_size).abs() < EPS);
    assert!((stated_value(&cfg, gap / 2.0) - cfg.stated_gap_size / 2.0).abs() < EPS);

    let small = SceneConfig::scaled(1.0);
    assert!(
        (stated_value(&small, small.points_gap_px() / 2.0) - small.stated_gap_size / 2.0).abs()
            < EPS
    );
}

#[test]
fn label_texts_format_one_decimal() {
    let cfg = cfg();
    let g = SceneGeometry::at(&cfg, -300.0);
    let t = LabelTexts::for_geometry(&cfg, &g);
    assert_eq!(t.gap, "2");
    assert_eq!(t.horizontal, "1.0");
    // sqrt(300^2 + 300^2) px => sqrt(2) stated.
    assert_eq!(t.radius, "1.4");

    let t0 = LabelTexts::for_geometry(&cfg, &SceneGeometry::at(&cfg, 0.0));
    assert_eq!(t0.horizontal, "0.0");
    assert_eq!(t0.radius, "1.0");
}

#[test]
fn radius_hook_at_zero_uses_full_rise() {
    let cfg = cfg();
    let g = SceneGeometry::at(&cfg, 0.0);
    let hook = radius_hook(&cfg, &g);
    assert_eq!(hook.x, g.top_point.x);
    assert!(hook.dy.is_finite());
    assert_eq!(hook.dy, g.top_point.y - g.circle_center.y);
}

#[test]
fn radius_hook_follows_hypotenuse_height() {
    let cfg = cfg();
    // Within the clamp, the hook is halfway along the leg so the hypotenuse is at half height.
    let g = SceneGeometry::at(&cfg, 400.0);
    let hook = radius_hook(&cfg, &g);
    assert!((hook.x - (g.top_point.x + 200.0)).abs() < EPS);
    assert!((hook.dy - (-150.0)).abs() < EPS);

    // Past the clamp, the hook stays 600 px from the column and the height shrinks.
    let g = SceneGeometry::at(&cfg, -3000.0);
    let hook = radius_hook(&cfg, &g);
    assert!((hook.x - (g.top_point.x - 600.0)).abs() < EPS);
    let expected = (g.top_point.y - g.circle_center.y) * (2400.0 / 3000.0);
    assert!((hook.dy - expected).abs() < EPS);
}

#[test]
fn follow_offset_is_clamped_both_ways() {
    let cfg = cfg();
    let max = cfg.label_max_offset_px();
    assert_eq!(follow_offset(&cfg, &SceneGeometry::at(&cfg, 6000.0)), max);
    assert_eq!(follow_offset(&cfg, &SceneGeometry::at(&cfg, -6000.0)), -max);
    assert_eq!(follow_offset(&cfg, &SceneGeometry::at(&cfg, 100.0)), 50.0);

    let mut wide = cfg.clone();
    wide.label_max_offset = 1000.0;
    assert_eq!(follow_offset(&wide, &SceneGeometry::at(&wide, 6000.0)), 2000.0);
}

#[test]
fn gap_label_flips_to_the_far_side() {
    let cfg = cfg();
    let size = Size::new(40.0, 100.0);
    let pad = cfg.gap_label_pad_px();

    let right = SceneGeometry::at(&cfg, 500.0);
    let p = LabelPlacement::compute(&cfg, &right, size, size, size);
    assert!((p.gap.x - (right.top_point.x - 20.0 - 20.0 - pad)).abs() < EPS);
    assert!(p.gap.x + size.width < right.top_point.x);
    assert!((p.gap.y - (right.mid_y() - 50.0)).abs() < EPS);

    let left = SceneGeometry::at(&cfg, -500.0);
    let p = LabelPlacement::compute(&cfg, &left, size, size, size);
    assert!((p.gap.x - (left.top_point.x + pad)).abs() < EPS);

    // At x = 0 the sign of +0.0 puts the label on the right.
    let center = SceneGeometry::at(&cfg, 0.0);
    let p = LabelPlacement::compute(&cfg, &center, size, size, size);
    assert!(p.gap.x > center.top_point.x);
}

#[test]
fn horizontal_and_radius_labels_track_their_lines() {
    let cfg = cfg();
    let size = Size::new(200.0, 120.0);
    let g = SceneGeometry::at(&cfg, 400.0);
    let p = LabelPlacement::compute(&cfg, &g, size, size, size);

    assert!((p.horizontal.x - (g.top_point.x - 100.0 + 200.0)).abs() < EPS);
    assert!((p.horizontal.y - (g.mid_y() + cfg.below_label_pad_px())).abs() < EPS);

    let hook = radius_hook(&cfg, &g);
    assert!((p.radius.x - (hook.x - 100.0)).abs() < EPS);
    assert!(
        (p.radius.y - (g.mid_y() + hook.dy - 120.0 - cfg.above_label_pad_px())).abs() < EPS
    );
    // Radius label is above the hypotenuse at the hook.
    assert!(p.radius.y + size.height < g.mid_y() + hook.dy);
}

#[test]
fn placement_is_finite_at_zero() {
    let cfg = cfg();
    let g = SceneGeometry::at(&cfg, 0.0);
    let s = Size::new(10.0, 10.0);
    let p = LabelPlacement::compute(&cfg, &g, s, s, s);
    for pt in [p.gap, p.horizontal, p.radius] {
        assert!(pt.x.is_finite() && pt.y.is_finite());
    }
}
