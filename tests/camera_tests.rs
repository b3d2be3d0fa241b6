use approx::assert_relative_eq;
use trajectory_movie::camera::{
    ViewAngle, DEFAULT_AZIMUTH_DEGREES, DEFAULT_ELEVATION_DEGREES, DEFAULT_SCALE,
};

#[test]
fn test_default_view() {
    let view = ViewAngle::default();
    assert_eq!(view.elevation_degrees(), 30.0);
    assert_eq!(view.azimuth_degrees(), -60.0);
    assert_eq!(view.scale(), 0.9);

    assert_eq!(view.elevation_degrees(), DEFAULT_ELEVATION_DEGREES);
    assert_eq!(view.azimuth_degrees(), DEFAULT_AZIMUTH_DEGREES);
    assert_eq!(view.scale(), DEFAULT_SCALE);
}

#[test]
fn test_angles_in_radians() {
    let view = ViewAngle::new(45.0, 90.0);
    assert_relative_eq!(view.pitch(), std::f64::consts::FRAC_PI_4);
    assert_relative_eq!(view.yaw(), std::f64::consts::FRAC_PI_2);
}

#[test]
fn test_elevation_limits() {
    let view = ViewAngle::new(120.0, 0.0);
    assert_eq!(view.elevation_degrees(), 89.0);

    let view = ViewAngle::new(-400.0, 0.0);
    assert_eq!(view.elevation_degrees(), -89.0);

    assert!(view.pitch().is_finite());
}

#[test]
fn test_minimum_scale() {
    let view = ViewAngle::default().with_scale(-3.0);
    assert_eq!(view.scale(), 0.1);

    let view = ViewAngle::default().with_scale(1.5);
    assert_eq!(view.scale(), 1.5);
}
