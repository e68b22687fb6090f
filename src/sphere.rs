//! Sphere primitive for ray tracing.
//!
//! Ray-sphere intersection using the half-b form of the quadratic formula.

use std::sync::Arc;

use glam::DVec3;
use log::warn;

use crate::hittable::{HitRecord, Hittable};
use crate::interval::Interval;
use crate::material::Material;
use crate::ray::Ray;

/// Sphere primitive defined by center, radius, and material.
#[derive(Debug, Clone)]
pub struct Sphere {
    /// Center point of the sphere in world coordinates.
    pub center: DVec3,

    /// Radius of the sphere, never negative.
    pub radius: f64,

    /// Material, possibly shared with other primitives.
    pub material: Arc<Material>,
}

impl Sphere {
    /// Create a new sphere.
    ///
    /// Negative radius values are clamped to 0.0, which never reports a hit.
    pub fn new(center: DVec3, radius: f64, material: Arc<Material>) -> Self {
        if radius <= 0.0 {
            warn!("Sphere at {} has non-positive radius {}, it will be invisible", center, radius);
        }
        Self {
            center,
            radius: radius.max(0.0),
            material,
        }
    }
}

impl Hittable for Sphere {
    fn hit(&self, r: &Ray, ray_t: Interval) -> Option<HitRecord<'_>> {
        if self.radius <= 0.0 {
            return None;
        }

        // Vector from ray origin to sphere center
        let oc = self.center - r.origin;

        let a = r.direction.length_squared();
        let h = r.direction.dot(oc);
        let c = oc.length_squared() - self.radius * self.radius;

        let discriminant = h * h - a * c;
        if discriminant < 0.0 {
            return None;
        }

        let sqrtd = discriminant.sqrt();

        // Find the nearest root that lies in the acceptable range
        let mut root = (h - sqrtd) / a;
        if !ray_t.surrounds(root) {
            root = (h + sqrtd) / a;
            if !ray_t.surrounds(root) {
                return None;
            }
        }

        let outward_normal = (r.at(root) - self.center) / self.radius;
        Some(HitRecord::new(r, root, outward_normal, &self.material))
    }
}
