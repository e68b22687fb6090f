//! Preset scenes, each paired with the camera that frames it.

use std::sync::Arc;

use glam::DVec3;
use log::debug;
use rand::Rng;

use crate::camera::Camera;
use crate::hittable::HittableList;
use crate::material::{Color, Material};
use crate::random;
use crate::sphere::Sphere;

/// A world plus the camera that frames it.
pub struct Scene {
    /// Objects to render
    pub world: HittableList,
    /// Recommended camera for this world
    pub camera: Camera,
}

/// One gray diffuse sphere in front of a 2x2 pixel camera at the origin.
pub fn single_sphere() -> Scene {
    let material = Arc::new(Material::lambertian(Color::new(0.5, 0.5, 0.5)));
    let world = HittableList::with_object(Box::new(Sphere::new(
        DVec3::new(0.0, 0.0, -1.0),
        0.5,
        material,
    )));

    let mut camera = Camera::new();
    camera.aspect_ratio = 1.0;
    camera.image_width = 2;
    camera.samples_per_pixel = 1;
    camera.max_depth = 1;

    Scene { world, camera }
}

/// Ground plane and three spheres showing diffuse, hollow glass and fuzzy
/// metal side by side.
pub fn three_spheres() -> Scene {
    let material_ground = Arc::new(Material::lambertian(Color::new(0.8, 0.8, 0.0)));
    let material_center = Arc::new(Material::lambertian(Color::new(0.1, 0.2, 0.5)));
    let material_left = Arc::new(Material::dielectric(1.5));
    let material_bubble = Arc::new(Material::dielectric(1.0 / 1.5));
    let material_right = Arc::new(Material::metal(Color::new(0.8, 0.6, 0.2), 1.0));

    let mut world = HittableList::new();
    world.add(Box::new(Sphere::new(DVec3::new(0.0, -100.5, -1.0), 100.0, material_ground)));
    world.add(Box::new(Sphere::new(DVec3::new(0.0, 0.0, -1.2), 0.5, material_center)));
    world.add(Box::new(Sphere::new(DVec3::new(-1.0, 0.0, -1.0), 0.5, material_left)));
    // Air bubble inside the glass sphere
    world.add(Box::new(Sphere::new(DVec3::new(-1.0, 0.0, -1.0), 0.4, material_bubble)));
    world.add(Box::new(Sphere::new(DVec3::new(1.0, 0.0, -1.0), 0.5, material_right)));

    let mut camera = Camera::new();
    camera.aspect_ratio = 16.0 / 9.0;
    camera.image_width = 400;
    camera.samples_per_pixel = 100;
    camera.max_depth = 50;
    camera.vfov = 20.0;
    camera.lookfrom = DVec3::new(-2.0, 2.0, 1.0);
    camera.lookat = DVec3::new(0.0, 0.0, -1.0);
    camera.vup = DVec3::Y;
    camera.defocus_angle = 10.0;
    camera.focus_dist = 3.4;

    Scene { world, camera }
}

/// Large ground sphere, a 22x22 grid of small random spheres and three
/// feature spheres.
pub fn book_cover<R: Rng>(rng: &mut R) -> Scene {
    let mut world = HittableList::new();

    let ground_material = Arc::new(Material::lambertian(Color::new(0.5, 0.5, 0.5)));
    world.add(Box::new(Sphere::new(DVec3::new(0.0, -1000.0, 0.0), 1000.0, ground_material)));

    // Every glass sphere shares one material
    let glass = Arc::new(Material::dielectric(1.5));

    for a in -11..11 {
        for b in -11..11 {
            let choose_mat = random::random_f64(rng);
            let center = DVec3::new(
                a as f64 + 0.9 * random::random_f64(rng),
                0.2,
                b as f64 + 0.9 * random::random_f64(rng),
            );

            // Keep clear of the metal feature sphere
            if (center - DVec3::new(4.0, 0.2, 0.0)).length() <= 0.9 {
                continue;
            }

            let sphere_material = if choose_mat < 0.8 {
                let albedo = random::random_color(rng) * random::random_color(rng);
                Arc::new(Material::lambertian(albedo))
            } else if choose_mat < 0.95 {
                let albedo = random::random_color_range(rng, 0.5, 1.0);
                let fuzz = random::random_f64_range(rng, 0.0, 0.5);
                Arc::new(Material::metal(albedo, fuzz))
            } else {
                Arc::clone(&glass)
            };

            world.add(Box::new(Sphere::new(center, 0.2, sphere_material)));
        }
    }

    world.add(Box::new(Sphere::new(DVec3::new(0.0, 1.0, 0.0), 1.0, glass)));

    let material2 = Arc::new(Material::lambertian(Color::new(0.4, 0.2, 0.1)));
    world.add(Box::new(Sphere::new(DVec3::new(-4.0, 1.0, 0.0), 1.0, material2)));

    let material3 = Arc::new(Material::metal(Color::new(0.7, 0.6, 0.5), 0.0));
    world.add(Box::new(Sphere::new(DVec3::new(4.0, 1.0, 0.0), 1.0, material3)));

    debug!("Book cover scene built with {} spheres", world.len());

    let mut camera = Camera::new();
    camera.aspect_ratio = 16.0 / 9.0;
    camera.image_width = 1200;
    camera.samples_per_pixel = 500;
    camera.max_depth = 50;
    camera.vfov = 20.0;
    camera.lookfrom = DVec3::new(13.0, 2.0, 3.0);
    camera.lookat = DVec3::ZERO;
    camera.vup = DVec3::Y;
    camera.defocus_angle = 0.6;
    camera.focus_dist = 10.0;

    Scene { world, camera }
}
