use anyhow::Context;
use clap::Parser;
use log::info;

mod cli;
mod logger;

use cli::{Args, SceneChoice};
use logger::init_logger;
use prism::output::sink_for_path;
use prism::random::scene_rng;
use prism::scenes::{self, Scene};

/// Build the requested preset. Random scenes draw from their own stream of
/// the CLI seed so layout and sampling stay independent.
fn create_scene(choice: SceneChoice, seed: Option<u64>) -> Scene {
    match choice {
        SceneChoice::ThreeSpheres => scenes::three_spheres(),
        SceneChoice::BookCover => scenes::book_cover(&mut scene_rng(seed)),
        SceneChoice::SingleSphere => scenes::single_sphere(),
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    init_logger(args.debug_level.into());

    info!("Prism - Git Version {} ({})", env!("GIT_HASH"), env!("GIT_DATE"));

    let Scene { world, mut camera } = create_scene(args.scene, args.seed);
    args.apply_to(&mut camera);
    info!("Scene {:?} with {} objects", args.scene, world.len());

    let mut sink = sink_for_path(&args.output)
        .with_context(|| format!("cannot write output to '{}'", args.output))?;

    camera
        .render(&world, sink.as_mut())
        .with_context(|| format!("rendering to '{}' failed", args.output))?;

    Ok(())
}
