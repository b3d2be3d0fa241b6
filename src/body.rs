//! Point body as read from a simulation snapshot.
//!
//! Only the position is kept; velocities, masses and anything else the
//! simulation stored are ignored by the renderer.

use glam::DVec3;

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Body {
    pub position: DVec3,
}

impl Body {
    pub fn new(position: [f64; 3]) -> Self {
        Self {
            position: DVec3::from_array(position),
        }
    }

    /// Euclidean distance from the origin.
    pub fn radius(&self) -> f64 {
        self.position.length()
    }

    pub fn is_finite(&self) -> bool {
        self.position.is_finite()
    }
}
