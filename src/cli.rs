use clap::{Parser, ValueEnum};
use glam::DVec3;
use log::LevelFilter;

use prism::camera::Camera;

/// Custom enum for log levels that can be used with clap's ValueEnum
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convert our custom LogLevel enum to log crate's LevelFilter
impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

/// Built-in scenes selectable from the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SceneChoice {
    /// Diffuse, glass and metal spheres on a ground plane
    ThreeSpheres,
    /// Hundreds of random small spheres around three large ones
    BookCover,
    /// One diffuse sphere, 2x2 pixels
    SingleSphere,
}

/// Parse `x,y,z` into a vector.
pub fn parse_vec3(s: &str) -> Result<DVec3, String> {
    let parts: Vec<&str> = s.split(',').map(str::trim).collect();
    if parts.len() != 3 {
        return Err(format!("expected x,y,z but got '{}'", s));
    }
    let mut xyz = [0.0; 3];
    for (slot, part) in xyz.iter_mut().zip(&parts) {
        *slot = part
            .parse::<f64>()
            .map_err(|e| format!("invalid component '{}': {}", part, e))?;
    }
    Ok(DVec3::from_array(xyz))
}

/// Command line arguments structure using clap derive macros
#[derive(Debug, Parser)]
#[command(name = "prism")]
#[command(about = "A recursive path tracer writing PPM or PNG images")]
pub struct Args {
    /// Set the logging level (defaults to "info")
    #[arg(long, value_enum, default_value = "info")]
    pub debug_level: LogLevel,

    /// Scene to render
    #[arg(long, value_enum, default_value = "three-spheres")]
    pub scene: SceneChoice,

    /// Output file path (.ppm streams plain-text PPM, .png saves 8-bit PNG, - writes PPM to stdout)
    #[arg(short, long, default_value = "image.ppm")]
    pub output: String,

    /// Image width in pixels
    #[arg(long)]
    pub width: Option<u32>,

    /// Image width divided by height
    #[arg(long)]
    pub aspect_ratio: Option<f64>,

    /// Number of samples per pixel
    #[arg(long, short = 's')]
    pub samples_per_pixel: Option<u32>,

    /// Maximum number of bounces per ray
    #[arg(long)]
    pub max_depth: Option<u32>,

    /// Vertical field of view in degrees
    #[arg(long)]
    pub vfov: Option<f64>,

    /// Camera position as x,y,z
    #[arg(long, value_parser = parse_vec3, allow_hyphen_values = true)]
    pub lookfrom: Option<DVec3>,

    /// Point the camera looks at as x,y,z
    #[arg(long, value_parser = parse_vec3, allow_hyphen_values = true)]
    pub lookat: Option<DVec3>,

    /// Camera-relative up direction as x,y,z
    #[arg(long, value_parser = parse_vec3, allow_hyphen_values = true)]
    pub vup: Option<DVec3>,

    /// Defocus cone angle in degrees (0 disables depth of field)
    #[arg(long)]
    pub defocus_angle: Option<f64>,

    /// Distance to the plane of perfect focus
    #[arg(long)]
    pub focus_dist: Option<f64>,

    /// Seed for scene generation and sampling, for reproducible images
    #[arg(long)]
    pub seed: Option<u64>,

    /// Hide the scanline progress bar
    #[arg(long)]
    pub no_progress: bool,
}

impl Args {
    /// Overlay every option given on the command line onto `camera`.
    pub fn apply_to(&self, camera: &mut Camera) {
        if let Some(width) = self.width {
            camera.image_width = width;
        }
        if let Some(aspect_ratio) = self.aspect_ratio {
            camera.aspect_ratio = aspect_ratio;
        }
        if let Some(spp) = self.samples_per_pixel {
            camera.samples_per_pixel = spp;
        }
        if let Some(max_depth) = self.max_depth {
            camera.max_depth = max_depth;
        }
        if let Some(vfov) = self.vfov {
            camera.vfov = vfov;
        }
        if let Some(lookfrom) = self.lookfrom {
            camera.lookfrom = lookfrom;
        }
        if let Some(lookat) = self.lookat {
            camera.lookat = lookat;
        }
        if let Some(vup) = self.vup {
            camera.vup = vup;
        }
        if let Some(angle) = self.defocus_angle {
            camera.defocus_angle = angle;
        }
        if let Some(dist) = self.focus_dist {
            camera.focus_dist = dist;
        }
        if self.seed.is_some() {
            camera.seed = self.seed;
        }
        camera.show_progress = !self.no_progress;
    }
}
