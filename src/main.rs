// Copyright 2020 TwoCookingMice

use pavlova::core::settings::{RenderSettings, USAGE};
use pavlova::error::Result;
use pavlova::integrators::path::PathIntegrator;
use pavlova::io::exr_utils;
use pavlova::renderers::simple::{Renderer, SimpleRenderer};
use pavlova::scenes::cornell_box::{cornell_box, cornell_box_camera};

use std::env;

fn run(args: &[String]) -> Result<()> {
    let settings = RenderSettings::from_args(args)?;
    log::info!("Render settings: {:?}", settings);

    let scene = cornell_box();
    scene.log_summary();
    let camera = cornell_box_camera(settings.width, settings.height);

    let integrator = Box::new(PathIntegrator::with_settings(settings.path_settings()));
    let renderer = SimpleRenderer::new(integrator, settings.seed);
    let image = renderer.render(&scene, &camera);
    exr_utils::write_exr_to_file(&image, &settings.output_path)?;
    Ok(())
}

fn main() {
    if env::var("RUST_LOG").is_err() {
        env::set_var("RUST_LOG", "info");
    }
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let program = args.first().map(|s| s.as_str()).unwrap_or("pavlova");
    if let Err(e) = run(&args[1.min(args.len())..]) {
        log::error!("{}", e);
        eprintln!("Usage: {} {}", program, USAGE);
        std::process::exit(1);
    }
}
