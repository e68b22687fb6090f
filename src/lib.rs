//! Prism path tracer
//!
//! Renders spheres with diffuse, metal and glass materials by recursive
//! Monte Carlo path tracing. Writes plain-text PPM or PNG images.

#![warn(missing_docs)]
#![warn(rustdoc::broken_intra_doc_links)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod camera;
pub mod color;
pub mod error;
pub mod hittable;
pub mod interval;
pub mod material;
pub mod output;
pub mod random;
pub mod ray;
pub mod scenes;
pub mod sphere;

pub use camera::{Camera, CameraState};
pub use error::{RenderError, RenderResult};
pub use hittable::{HitRecord, Hittable, HittableList};
pub use interval::Interval;
pub use material::{Color, Material, ScatterRecord};
pub use ray::Ray;
pub use sphere::Sphere;
