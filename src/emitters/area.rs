// Copyright @yucwang 2026

use crate::core::computation_node::{generate_node_id, ComputationNode};
use crate::core::emitter::{Emitter, EmitterSampleRecord};
use crate::core::interaction::SurfaceIntersection;
use crate::core::shape::Shape;
use crate::math::constants::{Float, PI, Vector2f, Vector3f};
use crate::math::spectrum::RGBSpectrum;
use std::sync::Arc;

/// Diffuse emitter covering a shape. Emits on the side the geometric
/// normal points to unless two-sided.
pub struct AreaEmitter {
    id: String,
    shape: Arc<dyn Shape>,
    radiance: RGBSpectrum,
    two_sided: bool,
}

impl AreaEmitter {
    pub fn from_shape(shape: Arc<dyn Shape>, radiance: RGBSpectrum, two_sided: bool) -> Self {
        Self { id: generate_node_id("AreaEmitter"), shape, radiance, two_sided }
    }
}

impl ComputationNode for AreaEmitter {
    fn id(&self) -> &str {
        &self.id
    }

    fn to_string(&self) -> String {
        format!("AreaEmitter: radiance = [{}, {}, {}], two_sided = {}, shape = {}",
                self.radiance[0], self.radiance[1], self.radiance[2],
                self.two_sided, self.shape.id())
    }
}

impl Emitter for AreaEmitter {
    fn eval(&self, normal: &Vector3f, w: &Vector3f) -> RGBSpectrum {
        if self.two_sided || normal.dot(w) > 0.0 {
            self.radiance
        } else {
            RGBSpectrum::default()
        }
    }

    fn sample_incident(&self, reference: &SurfaceIntersection, u: &Vector2f) -> EmitterSampleRecord {
        let sample = self.shape.sample_from(&reference.p(), u);
        if sample.pdf <= 0.0 {
            return EmitterSampleRecord::default();
        }

        let to_light = sample.p - reference.p();
        let dist = to_light.norm();
        if dist <= 0.0 {
            return EmitterSampleRecord::default();
        }
        let wi = to_light / dist;

        EmitterSampleRecord {
            wi,
            radiance: self.eval(&sample.normal, &(-wi)),
            pdf: sample.pdf,
        }
    }

    fn pdf_incident(&self, reference: &SurfaceIntersection, wi: &Vector3f) -> Float {
        self.shape.pdf_from(&reference.p(), wi)
    }

    fn power(&self) -> RGBSpectrum {
        let sides = if self.two_sided { 2.0 } else { 1.0 };
        self.radiance * (sides * PI * self.shape.surface_area())
    }
}
