// Copyright @yucwang 2023

use crate::core::bsdf::{SurfaceBSDF, BSDF};
use crate::core::emitter::Emitter;
use crate::math::constants::{ EPSILON, Float, SHADOW_EPSILON, Vector3f };
use crate::math::ray::Ray3f;
use crate::math::spectrum::RGBSpectrum;
use std::sync::Arc;

/// Nearest-hit record produced by a scene query. Owned by the integrator
/// for the duration of one bounce.
#[derive(Clone)]
pub struct SurfaceIntersection {
    p: Vector3f,
    geo_normal: Vector3f,
    sh_normal:  Vector3f,
    t: Float,
    object_index: Option<usize>,
    material: Option<Arc<dyn BSDF>>,
    emitter: Option<(usize, Arc<dyn Emitter>)>,
    bsdf: Option<SurfaceBSDF>,
}

/// A point drawn on a shape surface. `pdf` is in area measure unless the
/// producer states otherwise.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceSampleRecord {
    pub p: Vector3f,
    pub normal: Vector3f,
    pub pdf: Float,
}

impl SurfaceIntersection {
    pub fn new(new_p: Vector3f,
               new_geo_normal: Vector3f,
               new_sh_normal: Vector3f,
               new_t: Float) -> Self {
        Self { p: new_p, geo_normal: new_geo_normal, sh_normal: new_sh_normal,
               t: new_t, object_index: None, material: None,
               emitter: None, bsdf: None }
    }

    pub fn t(&self) -> Float {
        self.t
    }

    pub fn p(&self) -> Vector3f {
        self.p
    }

    pub fn geo_normal(&self) -> Vector3f {
        self.geo_normal
    }

    pub fn sh_normal(&self) -> Vector3f {
        self.sh_normal
    }

    pub fn object_index(&self) -> Option<usize> {
        self.object_index
    }

    pub fn with_object_index(mut self, object_index: Option<usize>) -> Self {
        self.object_index = object_index;
        self
    }

    pub fn material(&self) -> Option<&dyn BSDF> {
        self.material.as_deref()
    }

    pub fn with_material(mut self, material: Option<Arc<dyn BSDF>>) -> Self {
        self.material = material;
        self.bsdf = None;
        self
    }

    pub fn with_emitter(mut self, index: usize, emitter: Arc<dyn Emitter>) -> Self {
        self.emitter = Some((index, emitter));
        self
    }

    pub fn is_emitter(&self) -> bool {
        self.emitter.is_some()
    }

    /// Index of the emitter bound to the hit object in `Scene::emitters`.
    pub fn emitter_index(&self) -> Option<usize> {
        self.emitter.as_ref().map(|(idx, _)| *idx)
    }

    pub fn emitter(&self) -> Option<&dyn Emitter> {
        self.emitter.as_ref().map(|(_, e)| e.as_ref())
    }

    /// Radiance leaving the hit point toward `w`. Black unless the hit
    /// object is an emitter.
    pub fn emitted_radiance(&self, w: &Vector3f) -> RGBSpectrum {
        match &self.emitter {
            Some((_, emitter)) => emitter.eval(&self.geo_normal, w),
            None => RGBSpectrum::default(),
        }
    }

    /// Bind the hit object's material to this point. Reflectance queries
    /// return `None` until this has been called.
    pub fn materialize_reflectance(&mut self) {
        self.bsdf = self.material
            .as_ref()
            .map(|m| SurfaceBSDF::new(m.clone(), self.sh_normal));
    }

    pub fn bsdf(&self) -> Option<&SurfaceBSDF> {
        self.bsdf.as_ref()
    }

    /// Ray leaving the hit point along `d`, with its origin pushed off the
    /// surface on the side `d` points to.
    pub fn spawn_ray(&self, d: &Vector3f) -> Ray3f {
        let offset = if d.dot(&self.geo_normal) >= 0.0 {
            self.geo_normal * SHADOW_EPSILON
        } else {
            -self.geo_normal * SHADOW_EPSILON
        };
        Ray3f::new(self.p + offset, *d, Some(EPSILON * 0.1), None)
    }
}

impl SurfaceSampleRecord {
    pub fn new(p: Vector3f, normal: Vector3f, pdf: Float) -> Self {
        Self { p, normal, pdf }
    }

    pub fn invalid() -> Self {
        Self { p: Vector3f::zeros(), normal: Vector3f::zeros(), pdf: 0.0 }
    }
}
