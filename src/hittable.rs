//! Ray-object intersection system.
//!
//! Defines the Hittable trait for geometric primitives, the HitRecord it
//! produces, and HittableList for composing a scene.

use glam::DVec3;

use crate::interval::Interval;
use crate::material::Material;
use crate::ray::Ray;

/// Ray-object intersection information.
///
/// Borrows the material of the primitive that was hit; lives no longer than
/// the scene it came from.
#[derive(Debug, Clone, Copy)]
pub struct HitRecord<'a> {
    /// Point where the ray intersects the object
    pub p: DVec3,
    /// Unit surface normal, always facing against the incident ray
    pub normal: DVec3,
    /// Ray parameter of the intersection point
    pub t: f64,
    /// True if ray hits the front face, false if hits the back face
    pub front_face: bool,
    /// Material of the object at the hit point
    pub material: &'a Material,
}

impl<'a> HitRecord<'a> {
    /// Build a record from the geometric outward normal, orienting it
    /// against the ray.
    pub fn new(r: &Ray, t: f64, outward_normal: DVec3, material: &'a Material) -> Self {
        let mut rec = Self {
            p: r.at(t),
            normal: outward_normal,
            t,
            front_face: true,
            material,
        };
        rec.set_face_normal(r, outward_normal);
        rec
    }

    /// Set surface normal and determine front/back face.
    ///
    /// `outward_normal` must have unit length.
    pub fn set_face_normal(&mut self, r: &Ray, outward_normal: DVec3) {
        self.front_face = r.direction.dot(outward_normal) < 0.0;
        self.normal = if self.front_face {
            outward_normal
        } else {
            -outward_normal
        };
    }
}

/// Trait for objects that can be intersected by rays.
pub trait Hittable {
    /// Nearest intersection with `t` strictly inside `ray_t`, if any.
    fn hit(&self, r: &Ray, ray_t: Interval) -> Option<HitRecord<'_>>;
}

/// Collection of objects forming a scene.
///
/// Uses linear search for intersection testing.
#[derive(Default)]
pub struct HittableList {
    /// Boxed hittable objects
    pub objects: Vec<Box<dyn Hittable>>,
}

impl HittableList {
    /// Create a new empty scene.
    pub fn new() -> Self {
        Self {
            objects: Vec::new(),
        }
    }

    /// Create a new list with a single hittable object
    pub fn with_object(object: Box<dyn Hittable>) -> Self {
        let mut list = Self::new();
        list.add(object);
        list
    }

    /// Add an object to the scene.
    pub fn add(&mut self, object: Box<dyn Hittable>) {
        self.objects.push(object);
    }

    /// Remove every object.
    pub fn clear(&mut self) {
        self.objects.clear();
    }

    /// Number of objects in the scene.
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// True if the scene has no objects.
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}

impl Hittable for HittableList {
    fn hit(&self, r: &Ray, ray_t: Interval) -> Option<HitRecord<'_>> {
        let mut closest: Option<HitRecord<'_>> = None;
        let mut closest_so_far = ray_t.max;

        // Each hit narrows the range so farther objects cannot replace it
        for object in &self.objects {
            if let Some(rec) = object.hit(r, Interval::new(ray_t.min, closest_so_far)) {
                closest_so_far = rec.t;
                closest = Some(rec);
            }
        }

        closest
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::sphere::Sphere;

    fn gray() -> Arc<Material> {
        Arc::new(Material::lambertian(DVec3::splat(0.5)))
    }

    #[test]
    fn test_list_returns_closest_hit_regardless_of_order() {
        let mat = gray();
        let mut world = HittableList::new();
        // Farther sphere added first
        world.add(Box::new(Sphere::new(DVec3::new(0.0, 0.0, -5.0), 1.0, mat.clone())));
        world.add(Box::new(Sphere::new(DVec3::new(0.0, 0.0, -2.0), 0.5, mat)));

        let r = Ray::new(DVec3::ZERO, DVec3::new(0.0, 0.0, -1.0));
        let rec = world.hit(&r, Interval::new(0.001, f64::INFINITY)).unwrap();
        assert!((rec.t - 1.5).abs() < 1e-12);
    }

    #[test]
    fn test_list_respects_range() {
        let mut world = HittableList::with_object(Box::new(Sphere::new(
            DVec3::new(0.0, 0.0, -2.0),
            0.5,
            gray(),
        )));
        let r = Ray::new(DVec3::ZERO, DVec3::new(0.0, 0.0, -1.0));
        assert!(world.hit(&r, Interval::new(0.001, 1.0)).is_none());

        world.clear();
        assert!(world.is_empty());
        assert!(world.hit(&r, Interval::UNIVERSE).is_none());
    }

    #[test]
    fn test_shared_material_is_not_duplicated() {
        let mat = gray();
        let mut world = HittableList::new();
        for z in 1..4 {
            world.add(Box::new(Sphere::new(
                DVec3::new(0.0, 0.0, -(z as f64) * 3.0),
                1.0,
                Arc::clone(&mat),
            )));
        }
        assert_eq!(world.len(), 3);
        assert_eq!(Arc::strong_count(&mat), 4);

        let r = Ray::new(DVec3::ZERO, DVec3::new(0.0, 0.0, -1.0));
        let rec = world.hit(&r, Interval::new(0.001, f64::INFINITY)).unwrap();
        assert!(std::ptr::eq(rec.material, mat.as_ref()));
    }

    #[test]
    fn test_face_normal_opposes_ray() {
        let mat = Material::lambertian(DVec3::ONE);
        let r = Ray::new(DVec3::ZERO, DVec3::new(0.0, 0.0, -1.0));
        let front = HitRecord::new(&r, 1.0, DVec3::new(0.0, 0.0, 1.0), &mat);
        assert!(front.front_face);
        assert_eq!(front.normal, DVec3::new(0.0, 0.0, 1.0));

        let back = HitRecord::new(&r, 1.0, DVec3::new(0.0, 0.0, -1.0), &mat);
        assert!(!back.front_face);
        assert_eq!(back.normal, DVec3::new(0.0, 0.0, 1.0));
        assert_eq!(back.p, DVec3::new(0.0, 0.0, -1.0));
    }
}
