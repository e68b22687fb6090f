use std::sync::Arc;

use glam::DVec3;
use prism::output::{ImageSink, PngSink, PpmSink};
use prism::random::seeded_rng;
use prism::scenes;
use prism::{Camera, CameraState, HittableList, Material, Sphere};

/// Render `world` through `camera` into an in-memory PPM.
fn render_ppm(camera: &mut Camera, world: &HittableList) -> String {
    let mut sink = PpmSink::new(Vec::new());
    camera.render(world, &mut sink).unwrap();
    String::from_utf8(sink.into_inner()).unwrap()
}

fn pixels(ppm: &str) -> Vec<[u32; 3]> {
    ppm.lines()
        .skip(3)
        .map(|line| {
            let v: Vec<u32> = line.split(' ').map(|c| c.parse().unwrap()).collect();
            [v[0], v[1], v[2]]
        })
        .collect()
}

#[test]
fn single_sphere_renders_four_pixels() {
    let mut scene = scenes::single_sphere();
    scene.camera.seed = Some(1);
    scene.camera.show_progress = false;

    let ppm = render_ppm(&mut scene.camera, &scene.world);
    let header: Vec<&str> = ppm.lines().take(3).collect();
    assert_eq!(header, ["P3", "2 2", "255"]);

    let pixels = pixels(&ppm);
    assert_eq!(pixels.len(), 4);
    for [r, g, b] in pixels {
        // One bounce: a hit gathers no light, a miss sees the sky
        assert!([r, g, b] == [0, 0, 0] || b == 255, "unexpected pixel {} {} {}", r, g, b);
    }
    assert_eq!(scene.camera.state(), CameraState::Done);
}

#[test]
fn sphere_is_shaded_and_corners_see_sky() {
    let mut scene = scenes::single_sphere();
    scene.camera.image_width = 21;
    scene.camera.max_depth = 2;
    scene.camera.seed = Some(2);
    scene.camera.show_progress = false;

    let ppm = render_ppm(&mut scene.camera, &scene.world);
    let pixels = pixels(&ppm);
    assert_eq!(pixels.len(), 21 * 21);

    // Half the light of the sky after one diffuse bounce
    let center = pixels[10 * 21 + 10];
    for c in center {
        assert!((127..=182).contains(&c), "center pixel {:?}", center);
    }

    for corner in [pixels[0], pixels[20], pixels[20 * 21], pixels[21 * 21 - 1]] {
        assert_eq!(corner[2], 255, "corner pixel {:?}", corner);
    }
}

#[test]
fn same_seed_renders_identical_images() {
    let scene = scenes::three_spheres();
    let mut camera = scene.camera.clone();
    camera.image_width = 24;
    camera.samples_per_pixel = 4;
    camera.max_depth = 8;
    camera.seed = Some(99);
    camera.show_progress = false;
    let mut again = camera.clone();

    assert_eq!(render_ppm(&mut camera, &scene.world), render_ppm(&mut again, &scene.world));
}

#[test]
fn explicit_generator_drives_sampling() {
    let world = HittableList::with_object(Box::new(Sphere::new(
        DVec3::new(0.0, 0.0, -1.0),
        0.5,
        Arc::new(Material::metal(DVec3::new(0.9, 0.9, 0.9), 0.3)),
    )));
    let mut camera = Camera::new();
    camera.image_width = 8;
    camera.samples_per_pixel = 2;
    camera.show_progress = false;

    let mut a = PpmSink::new(Vec::new());
    let mut b = PpmSink::new(Vec::new());
    camera.render_with_rng(&world, &mut a, &mut seeded_rng(Some(5))).unwrap();
    camera.render_with_rng(&world, &mut b, &mut seeded_rng(Some(5))).unwrap();
    assert_eq!(a.into_inner(), b.into_inner());
}

#[test]
fn png_sink_saves_rendered_image() {
    let path = std::env::temp_dir().join(format!("prism-render-{}.png", std::process::id()));
    let mut scene = scenes::single_sphere();
    scene.camera.image_width = 6;
    scene.camera.aspect_ratio = 2.0;
    scene.camera.seed = Some(3);
    scene.camera.show_progress = false;

    let mut sink = PngSink::new(&path);
    scene.camera.render(&scene.world, &mut sink).unwrap();
    assert_eq!(sink.image().dimensions(), (6, 3));

    let saved = image::open(&path).unwrap().to_rgb8();
    assert_eq!(saved.dimensions(), (6, 3));
    assert_eq!(&saved, sink.image());
    std::fs::remove_file(&path).unwrap();
}

#[test]
fn sink_sees_begin_pixels_finish_in_order() {
    #[derive(Default)]
    struct Recorder {
        events: Vec<String>,
    }

    impl ImageSink for Recorder {
        fn begin(&mut self, width: u32, height: u32) -> prism::RenderResult<()> {
            self.events.push(format!("begin {}x{}", width, height));
            Ok(())
        }

        fn write_pixel(&mut self, _pixel_color: DVec3) -> prism::RenderResult<()> {
            self.events.push("pixel".to_string());
            Ok(())
        }

        fn finish(&mut self) -> prism::RenderResult<()> {
            self.events.push("finish".to_string());
            Ok(())
        }
    }

    let mut scene = scenes::single_sphere();
    scene.camera.show_progress = false;
    let mut recorder = Recorder::default();
    scene.camera.render(&scene.world, &mut recorder).unwrap();

    assert_eq!(recorder.events.first().map(String::as_str), Some("begin 2x2"));
    assert_eq!(recorder.events.last().map(String::as_str), Some("finish"));
    assert_eq!(recorder.events.len(), 6);
}
