//! Fixed viewpoint for the 3D trajectory chart.
//!
//! Elevation and azimuth are stored in degrees and handed to the plotters
//! projection as pitch and yaw in radians. Elevation is clamped short of the
//! poles so the projection never collapses onto a single axis.

pub const DEFAULT_ELEVATION_DEGREES: f64 = 30.0;
pub const DEFAULT_AZIMUTH_DEGREES: f64 = -60.0;
pub const DEFAULT_SCALE: f64 = 0.9;
const MIN_ELEVATION_DEGREES: f64 = -89.0;
const MAX_ELEVATION_DEGREES: f64 = 89.0;
const MIN_SCALE: f64 = 0.1;

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ViewAngle {
    elevation: f64,
    azimuth: f64,
    scale: f64,
}

impl ViewAngle {
    pub fn new(elevation_degrees: f64, azimuth_degrees: f64) -> Self {
        Self {
            elevation: elevation_degrees.clamp(MIN_ELEVATION_DEGREES, MAX_ELEVATION_DEGREES),
            azimuth: azimuth_degrees,
            scale: DEFAULT_SCALE,
        }
    }

    pub fn with_scale(mut self, scale: f64) -> Self {
        self.scale = scale.max(MIN_SCALE);
        self
    }

    pub fn elevation_degrees(&self) -> f64 {
        self.elevation
    }

    pub fn azimuth_degrees(&self) -> f64 {
        self.azimuth
    }

    pub fn pitch(&self) -> f64 {
        self.elevation.to_radians()
    }

    pub fn yaw(&self) -> f64 {
        self.azimuth.to_radians()
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }
}

impl Default for ViewAngle {
    fn default() -> Self {
        Self::new(DEFAULT_ELEVATION_DEGREES, DEFAULT_AZIMUTH_DEGREES)
    }
}
