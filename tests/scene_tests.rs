use approx::assert_relative_eq;
use glam::DVec3;
use trajectory_movie::body::Body;
use trajectory_movie::loader::Snapshot;
use trajectory_movie::scene::{segment_opacity, FrameScene, RenderBounds};
use trajectory_movie::window::TrajectoryWindow;

fn snapshot(index: usize, positions: &[[f64; 3]]) -> Snapshot {
    Snapshot::new(index, positions.iter().copied().map(Body::new).collect())
}

#[test]
fn test_bounds_double_max_norm() {
    let last = snapshot(9, &[[1.0, 0.0, 0.0], [0.0, 3.0, -4.0], [-2.0, 2.0, 1.0]]);
    let bounds = RenderBounds::from_snapshot(&last);

    assert_eq!(bounds.max_range(), 2.0 * 5.0);
    assert_eq!(bounds.axis_limit(), 5.0);
    assert_eq!(bounds.axis_range(), -5.0..5.0);
}

#[test]
fn test_bounds_use_norm_not_components() {
    let last = snapshot(0, &[[1.0, 1.0, 1.0]]);
    let bounds = RenderBounds::from_snapshot(&last);

    assert_relative_eq!(bounds.max_range(), 2.0 * 3.0_f64.sqrt());
}

#[test]
fn test_degenerate_bounds_fall_back_to_unit_axis() {
    let bounds = RenderBounds::from_snapshot(&snapshot(0, &[[0.0, 0.0, 0.0]]));
    assert_eq!(bounds.max_range(), 0.0);
    assert_eq!(bounds.axis_range(), -1.0..1.0);

    let bounds = RenderBounds::from_snapshot(&snapshot(0, &[]));
    assert_eq!(bounds.max_range(), 0.0);
    assert_eq!(bounds.axis_limit(), 1.0);
}

#[test]
fn test_segment_opacity_ramp() {
    let tail_length = 10;
    assert_eq!(segment_opacity(0, tail_length), 0.0);
    assert_eq!(segment_opacity(tail_length - 2, tail_length), 1.0);
    assert_relative_eq!(segment_opacity(4, tail_length), 0.5);

    for t in 1..tail_length - 1 {
        assert_relative_eq!(
            segment_opacity(t, tail_length) - segment_opacity(t - 1, tail_length),
            1.0 / 8.0
        );
    }
}

#[test]
fn test_two_point_tail_is_opaque() {
    let opacity = segment_opacity(0, 2);
    assert!(opacity.is_finite());
    assert_eq!(opacity, 1.0);
}

#[test]
fn test_scene_capture() {
    let tail_length = 4;
    let mut window =
        TrajectoryWindow::new(&snapshot(0, &[[0.0; 3], [1.0, 1.0, 1.0]]), tail_length).unwrap();
    for i in 0..3 {
        let t = i as f64;
        window
            .advance(&snapshot(i, &[[t, 0.0, 0.0], [1.0, 1.0, 1.0 + t]]))
            .unwrap();
    }

    let bounds = RenderBounds::from_snapshot(&snapshot(2, &[[2.0, 0.0, 0.0], [1.0, 1.0, 3.0]]));
    let scene = FrameScene::capture(2, &window, bounds);

    assert_eq!(scene.index, 2);
    assert_eq!(scene.bounds, bounds);
    assert_eq!(scene.trails.len(), 2);

    let trail = &scene.trails[0];
    assert_eq!(trail.points.len(), tail_length);
    assert_eq!(trail.head(), Some(DVec3::new(2.0, 0.0, 0.0)));

    let segments: Vec<_> = trail.segments().collect();
    assert_eq!(segments.len(), tail_length - 1);
    assert_eq!(segments[0].opacity, 0.0);
    assert_eq!(segments[tail_length - 2].opacity, 1.0);
    assert_eq!(segments[2].from, DVec3::new(1.0, 0.0, 0.0));
    assert_eq!(segments[2].to, DVec3::new(2.0, 0.0, 0.0));

    assert_eq!(scene.trails[1].head(), Some(DVec3::new(1.0, 1.0, 3.0)));
}
