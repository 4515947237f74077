// Copyright @yucwang 2026

use crate::core::computation_node::ComputationNode;
use crate::core::interaction::SurfaceIntersection;
use crate::math::constants::{Float, Vector2f, Vector3f};
use crate::math::spectrum::RGBSpectrum;

/// Incident direction drawn toward an emitter from a reference point.
/// `pdf` is with respect to solid angle at the reference point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EmitterSampleRecord {
    pub wi: Vector3f,
    pub radiance: RGBSpectrum,
    pub pdf: Float,
}

impl Default for EmitterSampleRecord {
    fn default() -> Self {
        Self {
            wi: Vector3f::zeros(),
            radiance: RGBSpectrum::default(),
            pdf: 0.0,
        }
    }
}

impl EmitterSampleRecord {
    pub fn is_valid(&self) -> bool {
        self.pdf > 0.0 && !self.radiance.is_black()
    }
}

pub trait Emitter: ComputationNode + Send + Sync {
    /// Radiance leaving a point with geometric normal `normal` toward `w`.
    fn eval(&self, normal: &Vector3f, w: &Vector3f) -> RGBSpectrum;

    fn sample_incident(&self, reference: &SurfaceIntersection, u: &Vector2f) -> EmitterSampleRecord;

    /// Solid-angle density with which `sample_incident` would pick `wi`.
    fn pdf_incident(&self, reference: &SurfaceIntersection, wi: &Vector3f) -> Float;

    /// Total emitted power, used for scene summaries.
    fn power(&self) -> RGBSpectrum;
}
