// Copyright @yucwang 2021

use crate::core::computation_node::{generate_node_id, ComputationNode};
use crate::core::integrator::Integrator;
use crate::core::rng::LcgRng;
use crate::core::scene::Scene;
use crate::core::sensor::Sensor;
use crate::math::bitmap::Bitmap;
use crate::math::constants::{Float, Vector2f, Vector3f};
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::mpsc;
use std::thread;

pub use super::renderer::Renderer;

struct RenderedBlock {
    x0: usize,
    y0: usize,
    x1: usize,
    y1: usize,
    pixels: Vec<Vector3f>,
    dropped: usize,
}

/// Block-parallel renderer averaging `samples_per_pixel` integrator
/// estimates per pixel.
pub struct SimpleRenderer {
    id: String,
    integrator: Box<dyn Integrator>,
    seed: u64,
    block_size: usize,
}

impl ComputationNode for SimpleRenderer {
    fn id(&self) -> &str {
        &self.id
    }

    fn to_string(&self) -> String {
        format!("SimpleRenderer: spp = {}, seed = {}, block_size = {}",
                self.integrator.samples_per_pixel(), self.seed, self.block_size)
    }
}

impl SimpleRenderer {
    pub fn new(integrator: Box<dyn Integrator>, seed: u64) -> Self {
        Self {
            id: generate_node_id("SimpleRenderer"),
            integrator,
            seed,
            block_size: 32,
        }
    }

    pub fn with_block_size(mut self, block_size: usize) -> Self {
        self.block_size = block_size.max(1);
        self
    }

    fn render_block(&self, scene: &Scene, sensor: &dyn Sensor,
                    x0: usize, y0: usize, x1: usize, y1: usize, spp: u32) -> RenderedBlock {
        let mut pixels = vec![Vector3f::zeros(); (x1 - x0) * (y1 - y0)];
        let mut dropped = 0usize;

        for y in y0..y1 {
            for x in x0..x1 {
                let pixel = Vector2f::new(x as Float, y as Float);
                let mut rng = LcgRng::for_pixel(self.seed, x, y);
                let mut color = Vector3f::zeros();
                let mut kept = 0u32;
                for _sample in 0..spp {
                    let rgb = self.integrator.trace_ray_forward(scene, sensor, pixel, &mut rng);
                    // A single NaN or inf would poison the pixel.
                    if !rgb.is_finite() {
                        dropped += 1;
                        continue;
                    }
                    color += rgb.to_vec();
                    kept += 1;
                }
                if kept > 0 {
                    pixels[(x - x0) + (x1 - x0) * (y - y0)] = color / (kept as Float);
                }
            }
        }

        RenderedBlock { x0, y0, x1, y1, pixels, dropped }
    }
}

impl Renderer for SimpleRenderer {
    fn render(&self, scene: &Scene, sensor: &dyn Sensor) -> Bitmap {
        let (width, height) = sensor.resolution();
        if width == 0 || height == 0 {
            return Bitmap::new(0, 0);
        }
        let spp = match self.integrator.samples_per_pixel() {
            0 => 1,
            v => v,
        };

        let block_size = self.block_size;
        let blocks_x = (width + block_size - 1) / block_size;
        let blocks_y = (height + block_size - 1) / block_size;
        let total_blocks = blocks_x * blocks_y;

        log::info!("Rendering {}x{} at {} spp in {} blocks.", width, height, spp, total_blocks);
        log::debug!("{}", ComputationNode::to_string(self));
        log::debug!("{}", sensor.describe());

        let progress = ProgressBar::new(total_blocks as u64);
        progress.set_style(
            ProgressStyle::with_template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} blocks")
                .unwrap_or_else(|_| ProgressStyle::default_bar()),
        );

        let next_block = AtomicUsize::new(0);
        let thread_count = thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1)
            .min(total_blocks);
        let (tx, rx) = mpsc::channel::<RenderedBlock>();
        let mut bitmap = Bitmap::new(width, height);
        let mut dropped = 0usize;

        thread::scope(|scope| {
            for _ in 0..thread_count {
                let next_block = &next_block;
                let tx = tx.clone();
                scope.spawn(move || {
                    loop {
                        let block_index = next_block.fetch_add(1, Ordering::Relaxed);
                        if block_index >= total_blocks {
                            break;
                        }

                        let x0 = (block_index % blocks_x) * block_size;
                        let y0 = (block_index / blocks_x) * block_size;
                        let x1 = (x0 + block_size).min(width);
                        let y1 = (y0 + block_size).min(height);
                        let block = self.render_block(scene, sensor, x0, y0, x1, y1, spp);
                        if tx.send(block).is_err() {
                            break;
                        }
                    }
                });
            }

            drop(tx);
            for block in rx.iter() {
                let block_width = block.x1 - block.x0;
                for y in block.y0..block.y1 {
                    for x in block.x0..block.x1 {
                        bitmap[(x, y)] = block.pixels[(x - block.x0) + block_width * (y - block.y0)];
                    }
                }
                dropped += block.dropped;
                progress.inc(1);
            }
        });
        progress.finish_and_clear();

        if dropped > 0 {
            log::warn!("Dropped {} non-finite radiance samples.", dropped);
        }
        log::info!("Render finished, mean pixel value = {:?}.", bitmap.mean().as_slice());
        bitmap
    }
}
