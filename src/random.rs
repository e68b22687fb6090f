//! Random sampling for ray tracing.
//!
//! Every sampler takes the generator explicitly so a render can be replayed
//! from a seed. The renderer itself drives a ChaCha20 PRNG.

use std::f64::consts::PI;

use glam::DVec3;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;

/// Build the renderer's generator, seeded when `seed` is given and from the
/// operating system otherwise.
pub fn seeded_rng(seed: Option<u64>) -> ChaCha20Rng {
    match seed {
        Some(seed) => ChaCha20Rng::seed_from_u64(seed),
        None => ChaCha20Rng::from_os_rng(),
    }
}

/// ChaCha stream used for scene layout, apart from stream 0 used for
/// sampling.
const SCENE_STREAM: u64 = 1;

/// Generator for building random scenes. With the same seed as the sampler
/// it still yields an unrelated sequence.
pub fn scene_rng(seed: Option<u64>) -> ChaCha20Rng {
    let mut rng = seeded_rng(seed);
    rng.set_stream(SCENE_STREAM);
    rng
}

/// Generate a random f64 in [0.0, 1.0)
pub fn random_f64<R: Rng>(rng: &mut R) -> f64 {
    rng.random()
}

/// Generate a random f64 in [min, max)
pub fn random_f64_range<R: Rng>(rng: &mut R, min: f64, max: f64) -> f64 {
    min + (max - min) * random_f64(rng)
}

/// Generate random unit vector uniformly distributed on unit sphere.
pub fn random_unit_vector<R: Rng>(rng: &mut R) -> DVec3 {
    // Uniform azimuth and uniform cos(polar) give a uniform sphere
    let theta = 2.0 * PI * rng.random::<f64>();
    let cos_phi = 2.0 * rng.random::<f64>() - 1.0;
    let sin_phi = (1.0 - cos_phi * cos_phi).sqrt();

    DVec3::new(sin_phi * theta.cos(), sin_phi * theta.sin(), cos_phi)
}

/// Generate random point inside unit disk (z = 0) using rejection sampling.
pub fn random_in_unit_disk<R: Rng>(rng: &mut R) -> DVec3 {
    loop {
        let p = DVec3::new(
            random_f64_range(rng, -1.0, 1.0),
            random_f64_range(rng, -1.0, 1.0),
            0.0,
        );
        if p.length_squared() < 1.0 {
            return p;
        }
    }
}

/// Generate random RGB color with components in [0.0, 1.0).
pub fn random_color<R: Rng>(rng: &mut R) -> DVec3 {
    DVec3::new(random_f64(rng), random_f64(rng), random_f64(rng))
}

/// Generate random RGB color with components in [min, max).
pub fn random_color_range<R: Rng>(rng: &mut R, min: f64, max: f64) -> DVec3 {
    DVec3::new(
        random_f64_range(rng, min, max),
        random_f64_range(rng, min, max),
        random_f64_range(rng, min, max),
    )
}

/// True if every component of `v` is close to zero.
pub fn near_zero(v: DVec3) -> bool {
    const S: f64 = 1e-8;
    v.abs().max_element() < S
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_vector_has_unit_length() {
        let mut rng = seeded_rng(Some(7));
        for _ in 0..1000 {
            let v = random_unit_vector(&mut rng);
            assert!((v.length() - 1.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_disk_samples_stay_inside_disk() {
        let mut rng = seeded_rng(Some(11));
        for _ in 0..1000 {
            let p = random_in_unit_disk(&mut rng);
            assert!(p.length_squared() < 1.0);
            assert_eq!(p.z, 0.0);
        }
    }

    #[test]
    fn test_range_bounds() {
        let mut rng = seeded_rng(Some(3));
        for _ in 0..1000 {
            let x = random_f64_range(&mut rng, -2.0, 5.0);
            assert!((-2.0..5.0).contains(&x));
        }
    }

    #[test]
    fn test_same_seed_same_stream() {
        let mut a = seeded_rng(Some(42));
        let mut b = seeded_rng(Some(42));
        for _ in 0..16 {
            assert_eq!(random_f64(&mut a), random_f64(&mut b));
        }
    }

    #[test]
    fn test_scene_and_sampler_streams_differ_for_one_seed() {
        let mut sampler = seeded_rng(Some(42));
        let mut scene = scene_rng(Some(42));
        let a: Vec<f64> = (0..8).map(|_| random_f64(&mut sampler)).collect();
        let b: Vec<f64> = (0..8).map(|_| random_f64(&mut scene)).collect();
        assert_ne!(a, b);

        let mut again = scene_rng(Some(42));
        let c: Vec<f64> = (0..8).map(|_| random_f64(&mut again)).collect();
        assert_eq!(b, c);
    }

    #[test]
    fn test_near_zero() {
        assert!(near_zero(DVec3::new(1e-9, -1e-9, 0.0)));
        assert!(!near_zero(DVec3::new(0.0, 0.0, 1e-3)));
    }
}
