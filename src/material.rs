//! Material system for ray tracing.
//!
//! Implements three material types: Lambertian (diffuse), Metal (specular),
//! and Dielectric (transparent). Materials are shared between primitives
//! through `Arc<Material>`.

use glam::DVec3;
use rand::Rng;

use crate::hittable::HitRecord;
use crate::random;
use crate::ray::Ray;

/// RGB color with linear components, nominally in [0, 1].
pub type Color = DVec3;

/// Material types for ray tracing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Material {
    /// Lambertian diffuse material for matte surfaces.
    Lambertian {
        /// Surface color/reflectance.
        albedo: Color,
    },

    /// Metallic material with specular reflection.
    Metal {
        /// Metal color.
        albedo: Color,
        /// Surface roughness (0.0 = mirror, 1.0 = rough).
        fuzz: f64,
    },

    /// Dielectric (transparent) material with refraction.
    Dielectric {
        /// Index of refraction relative to the enclosing medium.
        refraction_index: f64,
    },
}

/// Outcome of a ray that leaves a surface instead of being absorbed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScatterRecord {
    /// Per-channel fraction of the scattered light that survives.
    pub attenuation: Color,
    /// Ray leaving the surface.
    pub scattered: Ray,
}

impl Material {
    /// Diffuse material.
    pub fn lambertian(albedo: Color) -> Self {
        Material::Lambertian { albedo }
    }

    /// Metal material, `fuzz` clamped into [0, 1].
    pub fn metal(albedo: Color, fuzz: f64) -> Self {
        Material::Metal {
            albedo,
            fuzz: fuzz.clamp(0.0, 1.0),
        }
    }

    /// Glass-like material. Non-positive indices are raised to a tiny
    /// positive value.
    pub fn dielectric(refraction_index: f64) -> Self {
        Material::Dielectric {
            refraction_index: refraction_index.max(f64::EPSILON),
        }
    }

    /// Compute ray scattering for this material.
    ///
    /// Returns `None` when the ray is absorbed. Dielectrics emit a unit-length
    /// direction, so an index-matched one keeps the incoming direction but
    /// not its length.
    pub fn scatter<R: Rng>(&self, r_in: &Ray, rec: &HitRecord, rng: &mut R) -> Option<ScatterRecord> {
        match *self {
            Material::Lambertian { albedo } => scatter_lambertian(albedo, rec, rng),
            Material::Metal { albedo, fuzz } => scatter_metal(albedo, fuzz, r_in, rec, rng),
            Material::Dielectric { refraction_index } => {
                scatter_dielectric(refraction_index, r_in, rec, rng)
            }
        }
    }
}

/// Lambertian diffuse scattering with cosine-weighted distribution.
fn scatter_lambertian<R: Rng>(albedo: Color, rec: &HitRecord, rng: &mut R) -> Option<ScatterRecord> {
    let mut scatter_direction = rec.normal + random::random_unit_vector(rng);

    // Catch degenerate scatter direction
    if random::near_zero(scatter_direction) {
        scatter_direction = rec.normal;
    }

    Some(ScatterRecord {
        attenuation: albedo,
        scattered: Ray::new(rec.p, scatter_direction),
    })
}

/// Metallic reflection with optional surface roughness.
fn scatter_metal<R: Rng>(
    albedo: Color,
    fuzz: f64,
    r_in: &Ray,
    rec: &HitRecord,
    rng: &mut R,
) -> Option<ScatterRecord> {
    let reflected = reflect(r_in.direction, rec.normal).normalize();
    let direction = reflected + fuzz * random::random_unit_vector(rng);

    // Fuzz pushed the ray below the surface: absorbed
    if direction.dot(rec.normal) <= 0.0 {
        return None;
    }

    Some(ScatterRecord {
        attenuation: albedo,
        scattered: Ray::new(rec.p, direction),
    })
}

/// Dielectric scattering choosing between reflection and refraction.
fn scatter_dielectric<R: Rng>(
    refraction_index: f64,
    r_in: &Ray,
    rec: &HitRecord,
    rng: &mut R,
) -> Option<ScatterRecord> {
    let ri = if rec.front_face {
        1.0 / refraction_index
    } else {
        refraction_index
    };

    let unit_direction = r_in.direction.normalize();
    let cos_theta = (-unit_direction).dot(rec.normal).min(1.0);
    let sin_theta = (1.0 - cos_theta * cos_theta).sqrt();

    let cannot_refract = ri * sin_theta > 1.0;

    let direction = if cannot_refract || reflectance(cos_theta, ri) > random::random_f64(rng) {
        reflect(unit_direction, rec.normal)
    } else {
        refract(unit_direction, rec.normal, ri)
    };

    Some(ScatterRecord {
        attenuation: Color::ONE,
        scattered: Ray::new(rec.p, direction),
    })
}

/// Reflect `v` about the unit normal `n`.
pub fn reflect(v: DVec3, n: DVec3) -> DVec3 {
    v - 2.0 * v.dot(n) * n
}

/// Refract the unit vector `uv` through a surface with unit normal `n`
/// using Snell's law.
pub fn refract(uv: DVec3, n: DVec3, etai_over_etat: f64) -> DVec3 {
    let cos_theta = (-uv).dot(n).min(1.0);
    let r_out_perp = etai_over_etat * (uv + cos_theta * n);
    let r_out_parallel = -(1.0 - r_out_perp.length_squared()).abs().sqrt() * n;
    r_out_perp + r_out_parallel
}

/// Fresnel reflectance using Schlick's approximation.
///
/// An index-matched boundary (ratio 1) reflects nothing.
pub fn reflectance(cosine: f64, refraction_index: f64) -> f64 {
    if refraction_index == 1.0 {
        return 0.0;
    }
    let r0 = (1.0 - refraction_index) / (1.0 + refraction_index);
    let r0 = r0 * r0;
    r0 + (1.0 - r0) * (1.0 - cosine).powi(5)
}
