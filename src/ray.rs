//! Ray representation for 3D ray tracing.
//!
//! A ray is defined as r(t) = origin + t * direction, a semi-infinite line
//! used for intersection testing.

use glam::DVec3;

/// Ray in 3D space defined by origin and direction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    /// Starting point of the ray in world coordinates.
    ///
    /// The camera center (or a lens sample) for primary rays, a surface
    /// point for scattered rays.
    pub origin: DVec3,

    /// Direction vector of the ray. Not required to be normalized.
    pub direction: DVec3,
}

impl Ray {
    /// Create a new ray with origin and direction.
    pub fn new(origin: DVec3, direction: DVec3) -> Self {
        Self { origin, direction }
    }

    /// Returns r(t) = origin + t * direction.
    pub fn at(&self, t: f64) -> DVec3 {
        self.origin + t * self.direction
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ray_at() {
        let ray = Ray::new(DVec3::new(1.0, 2.0, 3.0), DVec3::new(0.0, 0.0, -2.0));

        assert_eq!(ray.at(0.0), DVec3::new(1.0, 2.0, 3.0));
        assert_eq!(ray.at(1.0), DVec3::new(1.0, 2.0, 1.0));
        assert_eq!(ray.at(-0.5), DVec3::new(1.0, 2.0, 4.0));
    }
}
