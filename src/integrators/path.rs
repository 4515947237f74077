// Copyright @yucwang 2026

use crate::core::bsdf::SurfaceBSDF;
use crate::core::emitter::Emitter;
use crate::core::integrator::Integrator;
use crate::core::interaction::SurfaceIntersection;
use crate::core::sampler::Sampler;
use crate::core::scene::Scene;
use crate::core::sensor::Sensor;
use crate::math::constants::{Float, Vector2f, Vector3f};
use crate::math::ray::Ray3f;
use crate::math::spectrum::RGBSpectrum;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PathSettings {
    /// Hard limit on the number of surface bounces of one path.
    pub max_depth: u32,
    pub samples_per_pixel: u32,
    /// Bounce index from which Russian roulette may end a path. `None`
    /// disables roulette.
    pub russian_roulette_depth: Option<u32>,
    /// Continue through specular bounces without direct lighting and count
    /// the emission found right after them.
    pub track_specular: bool,
}

impl Default for PathSettings {
    fn default() -> Self {
        Self {
            max_depth: 8,
            samples_per_pixel: 16,
            russian_roulette_depth: Some(0),
            track_specular: true,
        }
    }
}

pub struct PathIntegrator {
    settings: PathSettings,
}

impl PathIntegrator {
    pub fn new(max_depth: u32, samples_per_pixel: u32) -> Self {
        Self::with_settings(PathSettings { max_depth, samples_per_pixel, ..PathSettings::default() })
    }

    pub fn with_settings(settings: PathSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &PathSettings {
        &self.settings
    }

    /// Unbiased estimate of the radiance arriving at the origin of `ray`.
    ///
    /// Direct lighting at each non-specular vertex combines one light
    /// sample and one BSDF sample with the power heuristic. The BSDF sample
    /// is also the continuation of the path, so its hit is reused by the
    /// next bounce.
    pub fn li(&self, ray: &Ray3f, scene: &Scene, sampler: &mut dyn Sampler) -> RGBSpectrum {
        let mut radiance = RGBSpectrum::default();
        let mut beta = RGBSpectrum::ones();
        let mut ray = *ray;
        let mut pending_hit: Option<Option<SurfaceIntersection>> = None;
        let mut specular_bounce = false;
        let mut bounce = 0u32;

        while bounce < self.settings.max_depth {
            let hit = match pending_hit.take() {
                Some(hit) => hit,
                None => scene.ray_intersection(&ray),
            };
            let mut isect = match hit {
                Some(isect) => isect,
                None => break,
            };
            let wo = -ray.dir();

            // Emitters end the path. Their emission was already weighted in
            // by the previous vertex unless nothing could have sampled it.
            if isect.is_emitter() {
                if bounce == 0 || (self.settings.track_specular && specular_bounce) {
                    radiance += beta * isect.emitted_radiance(&wo);
                }
                break;
            }

            isect.materialize_reflectance();
            let bsdf = match isect.bsdf() {
                Some(bsdf) => bsdf,
                None => break,
            };

            let mut continuation = None;
            if self.settings.track_specular {
                let sample = bsdf.sample(&wo, &sampler.next_2d());
                if sample.is_specular() {
                    if !sample.is_valid() {
                        break;
                    }
                    beta *= sample.value * (bsdf.abs_cos(&sample.wi) / sample.pdf);
                    specular_bounce = true;
                    ray = isect.spawn_ray(&sample.wi);
                    bounce += 1;
                    continue;
                }
                continuation = Some(sample);
            }
            specular_bounce = false;

            let n_lights = scene.emitters().len();
            if n_lights == 0 {
                return RGBSpectrum::default();
            }
            let select_pdf = 1.0 / n_lights as Float;
            let light_idx = ((sampler.next_1d() * n_lights as Float) as usize).min(n_lights - 1);
            let u_light = sampler.next_2d();
            let mut direct = match scene.emitter(light_idx) {
                Some(light) => estimate_light_sample(scene,
                                                     &isect,
                                                     bsdf,
                                                     &wo,
                                                     light_idx,
                                                     light.as_ref(),
                                                     select_pdf,
                                                     &u_light),
                None => RGBSpectrum::default(),
            };

            let sample = match continuation {
                Some(sample) => sample,
                None => bsdf.sample(&wo, &sampler.next_2d()),
            };
            if !sample.is_valid() {
                radiance += beta * direct;
                break;
            }

            let cos_i = bsdf.abs_cos(&sample.wi);
            let next_ray = isect.spawn_ray(&sample.wi);
            let next_hit = scene.ray_intersection(&next_ray);
            if let Some(light_hit) = next_hit.as_ref() {
                if let Some(light) = light_hit.emitter() {
                    let le = light_hit.emitted_radiance(&(-sample.wi));
                    if !le.is_black() {
                        // A delta direction cannot be produced by light sampling.
                        let weight = if sample.is_specular() {
                            1.0
                        } else {
                            let light_pdf = light.pdf_incident(&isect, &sample.wi);
                            power_heuristic(1, sample.pdf, 1, light_pdf)
                        };
                        direct += sample.value * le * (cos_i * weight / sample.pdf);
                    }
                }
            }

            radiance += beta * direct;
            beta *= sample.value * (cos_i / sample.pdf);
            ray = next_ray;
            pending_hit = Some(next_hit);

            if let Some(rr_depth) = self.settings.russian_roulette_depth {
                if bounce >= rr_depth {
                    let max_channel = beta.max_value();
                    let zeta = sampler.next_1d();
                    if max_channel < 1.0 - zeta {
                        break;
                    }
                    // Survival probability; positive since 1 - zeta > 0.
                    beta = beta / max_channel.min(1.0);
                }
            }

            bounce += 1;
        }

        radiance
    }
}

/// Light-sampling half of the MIS direct lighting estimate for one
/// uniformly chosen emitter.
fn estimate_light_sample(scene: &Scene,
                         isect: &SurfaceIntersection,
                         bsdf: &SurfaceBSDF,
                         wo: &Vector3f,
                         light_idx: usize,
                         light: &dyn Emitter,
                         select_pdf: Float,
                         u: &Vector2f) -> RGBSpectrum {
    let record = light.sample_incident(isect, u);
    if !record.is_valid() {
        return RGBSpectrum::default();
    }

    // Occluded, or reaches a different emitter.
    let shadow_ray = isect.spawn_ray(&record.wi);
    match scene.ray_intersection(&shadow_ray) {
        Some(hit) if hit.emitter_index() == Some(light_idx) => {}
        _ => return RGBSpectrum::default(),
    }

    let f = bsdf.evaluate(wo, &record.wi);
    let bsdf_pdf = bsdf.pdf(wo, &record.wi);
    if f.is_black() || bsdf_pdf <= 0.0 {
        return RGBSpectrum::default();
    }

    let weight = power_heuristic(1, record.pdf, 1, bsdf_pdf);
    f * record.radiance * (bsdf.abs_cos(&record.wi) * weight / (record.pdf * select_pdf))
}

/// Power heuristic with exponent 2 for `nf` samples of pdf `f_pdf` against
/// `ng` samples of pdf `g_pdf`.
pub fn power_heuristic(nf: u32, f_pdf: Float, ng: u32, g_pdf: Float) -> Float {
    let f = nf as Float * f_pdf;
    let g = ng as Float * g_pdf;
    let denom = f * f + g * g;
    if denom <= 0.0 {
        0.0
    } else {
        f * f / denom
    }
}

impl Integrator for PathIntegrator {
    fn trace_ray_forward(&self, scene: &Scene, sensor: &dyn Sensor, pixel: Vector2f, sampler: &mut dyn Sampler) -> RGBSpectrum {
        let (width, height) = sensor.resolution();
        if width == 0 || height == 0 {
            return RGBSpectrum::default();
        }

        let jitter = sampler.next_2d();
        let u = Vector2f::new((pixel.x + jitter.x) / (width as Float),
                              (pixel.y + jitter.y) / (height as Float));
        let ray = sensor.sample_ray(&u);
        self.li(&ray, scene, sampler)
    }

    fn samples_per_pixel(&self) -> u32 {
        self.settings.samples_per_pixel
    }
}
