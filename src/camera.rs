//! Camera for ray generation and scene rendering

use glam::DVec3;
use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, info, warn};
use rand::Rng;

use crate::error::RenderResult;
use crate::hittable::Hittable;
use crate::interval::Interval;
use crate::material::Color;
use crate::output::ImageSink;
use crate::random;
use crate::ray::Ray;

/// Lower bound of the accepted hit range for every traced ray. Keeps a
/// scattered ray from re-hitting the surface it just left.
const SHADOW_ACNE_EPSILON: f64 = 0.001;

/// Lifecycle of a camera.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CameraState {
    /// Configuration may still change; derived values are not computed.
    Uninitialised,
    /// Viewport and lens geometry have been derived.
    Initialised,
    /// A render is in progress.
    Rendering,
    /// The last render ran to completion. A render whose sink failed
    /// leaves the camera `Initialised` instead.
    Done,
}

/// Camera for ray generation and scene rendering.
///
/// A thin-lens camera with defocus blur and anti-aliasing via multi-sampling.
/// Public fields are the render configuration and must be set before
/// [`Camera::initialise`] (or [`Camera::render`]) runs.
#[derive(Debug, Clone)]
pub struct Camera {
    /// Ratio of image width over height
    pub aspect_ratio: f64,
    /// Rendered image width in pixel count
    pub image_width: u32,
    /// Number of random samples for each pixel (for anti-aliasing)
    pub samples_per_pixel: u32,
    /// Maximum number of ray bounces (recursion depth limit)
    pub max_depth: u32,
    /// Vertical field of view in degrees
    pub vfov: f64,
    /// Point camera is looking from (camera position)
    pub lookfrom: DVec3,
    /// Point camera is looking at (look target)
    pub lookat: DVec3,
    /// Camera-relative "up" direction vector
    pub vup: DVec3,
    /// Variation angle of rays through each pixel, in degrees
    pub defocus_angle: f64,
    /// Distance from camera lookfrom point to plane of perfect focus
    pub focus_dist: f64,
    /// Seed for the sampling generator; `None` seeds from the OS
    pub seed: Option<u64>,
    /// Draw a scanline progress bar on stderr while rendering
    pub show_progress: bool,

    /// Rendered image height, derived from width and aspect ratio
    image_height: u32,
    /// Camera position in world space (same as lookfrom)
    center: DVec3,
    /// World position of the top-left pixel (pixel 0,0)
    pixel00_loc: DVec3,
    /// Offset vector from pixel to pixel horizontally (right direction)
    pixel_delta_u: DVec3,
    /// Offset vector from pixel to pixel vertically (down direction)
    pixel_delta_v: DVec3,
    /// Color scale factor for a sum of pixel samples (1.0 / samples_per_pixel)
    pixel_samples_scale: f64,
    /// Camera frame basis vector pointing right
    u: DVec3,
    /// Camera frame basis vector pointing up
    v: DVec3,
    /// Camera frame basis vector pointing opposite view direction
    w: DVec3,
    /// Defocus disk horizontal radius vector
    defocus_disk_u: DVec3,
    /// Defocus disk vertical radius vector
    defocus_disk_v: DVec3,
    state: CameraState,
}

impl Default for Camera {
    /// 100x100 image, 10 samples per pixel, 10 bounces, 90° FOV, no defocus blur.
    fn default() -> Self {
        Self {
            aspect_ratio: 1.0,
            image_width: 100,
            samples_per_pixel: 10,
            max_depth: 10,
            vfov: 90.0,
            lookfrom: DVec3::ZERO,
            lookat: DVec3::new(0.0, 0.0, -1.0),
            vup: DVec3::Y,
            defocus_angle: 0.0,
            focus_dist: 10.0,
            seed: None,
            show_progress: true,
            image_height: 100,
            center: DVec3::ZERO,
            pixel00_loc: DVec3::ZERO,
            pixel_delta_u: DVec3::ZERO,
            pixel_delta_v: DVec3::ZERO,
            pixel_samples_scale: 0.1,
            u: DVec3::ZERO,
            v: DVec3::ZERO,
            w: DVec3::ZERO,
            defocus_disk_u: DVec3::ZERO,
            defocus_disk_v: DVec3::ZERO,
            state: CameraState::Uninitialised,
        }
    }
}

impl Camera {
    /// Creates a new camera with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Where the camera is in its lifecycle.
    pub fn state(&self) -> CameraState {
        self.state
    }

    /// Rendered image height. Meaningful once initialised.
    pub fn image_height(&self) -> u32 {
        self.image_height
    }

    /// Camera center. Meaningful once initialised.
    pub fn center(&self) -> DVec3 {
        self.center
    }

    /// Weight applied to each sample of a pixel.
    pub fn pixel_samples_scale(&self) -> f64 {
        self.pixel_samples_scale
    }

    /// Renders the scene into `sink`, drawing samples from a generator built
    /// from [`Camera::seed`].
    pub fn render<S: ImageSink + ?Sized>(&mut self, world: &dyn Hittable, sink: &mut S) -> RenderResult<()> {
        let mut rng = random::seeded_rng(self.seed);
        self.render_with_rng(world, sink, &mut rng)
    }

    /// Renders the scene into `sink` using the caller's generator.
    ///
    /// Pixels are produced row by row, top to bottom and left to right, and
    /// handed to the sink as soon as they are computed. If the sink fails the
    /// render stops and the camera returns to [`CameraState::Initialised`].
    pub fn render_with_rng<S, R>(&mut self, world: &dyn Hittable, sink: &mut S, rng: &mut R) -> RenderResult<()>
    where
        S: ImageSink + ?Sized,
        R: Rng,
    {
        self.initialise();
        self.state = CameraState::Rendering;

        info!(
            "Rendering {}x{} at {} samples per pixel, max depth {}",
            self.image_width, self.image_height, self.samples_per_pixel, self.max_depth
        );
        let generation_start = std::time::Instant::now();
        let pb = self.progress_bar();

        match self.render_rows(world, sink, rng, &pb) {
            Ok(()) => {
                pb.finish_with_message("Done.");
                info!("Image generated in {:.2?}", generation_start.elapsed());
                self.state = CameraState::Done;
                Ok(())
            }
            Err(e) => {
                pb.abandon_with_message("Aborted.");
                // Geometry is still valid, so the camera can render again
                self.state = CameraState::Initialised;
                Err(e)
            }
        }
    }

    fn render_rows<S, R>(&self, world: &dyn Hittable, sink: &mut S, rng: &mut R, pb: &ProgressBar) -> RenderResult<()>
    where
        S: ImageSink + ?Sized,
        R: Rng,
    {
        sink.begin(self.image_width, self.image_height)?;
        for j in 0..self.image_height {
            pb.set_message(format!("Scanlines remaining: {}", self.image_height - j));
            for i in 0..self.image_width {
                let mut pixel_color = Color::ZERO;
                for _sample in 0..self.samples_per_pixel {
                    let r = self.get_ray(i, j, rng);
                    pixel_color += self.ray_color(&r, self.max_depth, world, rng);
                }
                sink.write_pixel(self.pixel_samples_scale * pixel_color)?;
            }
            pb.inc(1);
        }
        sink.finish()
    }

    fn progress_bar(&self) -> ProgressBar {
        if !self.show_progress {
            return ProgressBar::hidden();
        }
        let pb = ProgressBar::new(self.image_height as u64);
        let style = ProgressStyle::default_bar()
            .template("{msg:<26} {bar:40} ETA: {eta}")
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        pb.set_style(style);
        pb
    }

    /// Derive viewport, basis and lens geometry from the configuration.
    ///
    /// Does nothing once the camera has been initialised. Degenerate values
    /// are clamped instead of rejected.
    pub fn initialise(&mut self) {
        if self.state != CameraState::Uninitialised {
            return;
        }

        if self.image_width < 1 {
            warn!("image_width must be at least 1, using 1");
            self.image_width = 1;
        }
        if self.samples_per_pixel < 1 {
            warn!("samples_per_pixel must be at least 1, using 1");
            self.samples_per_pixel = 1;
        }
        if self.aspect_ratio.is_nan() || self.aspect_ratio <= 0.0 {
            warn!("aspect_ratio {} is not positive, using 1.0", self.aspect_ratio);
            self.aspect_ratio = 1.0;
        }

        // Image height is at least one pixel
        self.image_height = ((self.image_width as f64 / self.aspect_ratio) as u32).max(1);

        self.pixel_samples_scale = 1.0 / self.samples_per_pixel as f64;

        self.center = self.lookfrom;

        // Determine viewport dimensions
        let theta = self.vfov.to_radians();
        let h = (theta / 2.0).tan();
        let viewport_height = 2.0 * h * self.focus_dist;
        let viewport_width = viewport_height * (self.image_width as f64 / self.image_height as f64);

        // Orthonormal camera frame
        self.w = (self.lookfrom - self.lookat).normalize_or_zero();
        if self.w == DVec3::ZERO {
            warn!("lookfrom and lookat are both {}, looking down -z", self.lookfrom);
            self.w = DVec3::Z;
        }
        self.u = self.vup.cross(self.w).normalize_or_zero();
        if self.u == DVec3::ZERO {
            warn!("vup {} is parallel to the view direction, picking another up vector", self.vup);
            self.u = self.w.any_orthonormal_vector();
        }
        self.v = self.w.cross(self.u);

        // Vectors across the horizontal and down the vertical viewport edges
        let viewport_u = viewport_width * self.u;
        let viewport_v = viewport_height * -self.v;

        self.pixel_delta_u = viewport_u / self.image_width as f64;
        self.pixel_delta_v = viewport_v / self.image_height as f64;

        let viewport_upper_left = self.center - (self.focus_dist * self.w) - viewport_u / 2.0 - viewport_v / 2.0;
        self.pixel00_loc = viewport_upper_left + 0.5 * (self.pixel_delta_u + self.pixel_delta_v);

        let defocus_radius = self.focus_dist * (self.defocus_angle / 2.0).to_radians().tan();
        self.defocus_disk_u = self.u * defocus_radius;
        self.defocus_disk_v = self.v * defocus_radius;

        debug!(
            "Camera frame u={} v={} w={}, viewport {:.3}x{:.3}, defocus radius {:.4}",
            self.u, self.v, self.w, viewport_width, viewport_height, defocus_radius
        );

        self.state = CameraState::Initialised;
    }

    /// Generate a ray through pixel (i, j) with random sampling.
    ///
    /// Jitters within the pixel for anti-aliasing and, when `defocus_angle`
    /// is positive, starts the ray on the defocus disk for depth of field.
    pub fn get_ray<R: Rng>(&self, i: u32, j: u32, rng: &mut R) -> Ray {
        let offset = sample_square(rng);
        let pixel_sample = self.pixel00_loc
            + ((i as f64 + offset.x) * self.pixel_delta_u)
            + ((j as f64 + offset.y) * self.pixel_delta_v);

        let ray_origin = if self.defocus_angle <= 0.0 {
            self.center
        } else {
            self.defocus_disk_sample(rng)
        };
        let ray_direction = pixel_sample - ray_origin;

        Ray::new(ray_origin, ray_direction)
    }

    /// Sample random point on the defocus disk.
    fn defocus_disk_sample<R: Rng>(&self, rng: &mut R) -> DVec3 {
        let p = random::random_in_unit_disk(rng);
        self.center + (p.x * self.defocus_disk_u) + (p.y * self.defocus_disk_v)
    }

    /// Estimate the light arriving along `r`.
    ///
    /// Follows up to `depth` bounces through the scene. Returns black once
    /// the bounce budget is spent or the ray is absorbed, and the sky
    /// gradient when nothing is hit.
    pub fn ray_color<R: Rng>(&self, r: &Ray, depth: u32, world: &dyn Hittable, rng: &mut R) -> Color {
        if depth == 0 {
            return Color::ZERO;
        }

        match world.hit(r, Interval::new(SHADOW_ACNE_EPSILON, f64::INFINITY)) {
            Some(rec) => match rec.material.scatter(r, &rec, rng) {
                Some(s) => s.attenuation * self.ray_color(&s.scattered, depth - 1, world, rng),
                None => Color::ZERO,
            },
            None => background(r),
        }
    }
}

/// Random offset within the [-0.5, 0.5] square, in pixel units.
fn sample_square<R: Rng>(rng: &mut R) -> DVec3 {
    DVec3::new(random::random_f64(rng) - 0.5, random::random_f64(rng) - 0.5, 0.0)
}

/// Sky gradient seen by rays that escape the scene.
///
/// Blends white (straight down) into light blue (straight up).
pub fn background(r: &Ray) -> Color {
    let unit_direction = r.direction.normalize();
    let a = 0.5 * (unit_direction.y + 1.0);
    (1.0 - a) * Color::ONE + a * Color::new(0.5, 0.7, 1.0)
}
