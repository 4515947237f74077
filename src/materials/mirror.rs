// Copyright @yucwang 2026

use crate::core::bsdf::{BSDFFlag, BSDFSampleRecord, BSDFValue, BSDF, cos_theta};
use crate::core::computation_node::{generate_node_id, ComputationNode};
use crate::materials::fresnel::reflect;
use crate::math::constants::{Float, Vector2f, Vector3f};
use crate::math::spectrum::RGBSpectrum;

/// Perfect specular reflector. Only reachable through `sample`; `eval` and
/// `pdf` are zero for every direction pair.
pub struct SpecularMirrorBSDF {
    id: String,
    reflectance: RGBSpectrum,
}

impl SpecularMirrorBSDF {
    pub fn new(reflectance: RGBSpectrum) -> Self {
        Self { id: generate_node_id("SpecularMirrorBSDF"), reflectance }
    }
}

impl ComputationNode for SpecularMirrorBSDF {
    fn id(&self) -> &str {
        &self.id
    }

    fn to_string(&self) -> String {
        format!("SpecularMirrorBSDF: reflectance = [{}, {}, {}]",
                self.reflectance[0], self.reflectance[1], self.reflectance[2])
    }
}

impl BSDF for SpecularMirrorBSDF {
    fn eval(&self, _wo: &Vector3f, _wi: &Vector3f) -> BSDFValue {
        BSDFValue::default()
    }

    fn pdf(&self, _wo: &Vector3f, _wi: &Vector3f) -> Float {
        0.0
    }

    fn sample(&self, wo: &Vector3f, _u: &Vector2f) -> BSDFSampleRecord {
        let wi = reflect(wo, &Vector3f::z());
        let cos_i = cos_theta(&wi).abs();
        if cos_i <= 0.0 {
            return BSDFSampleRecord::default();
        }
        BSDFSampleRecord::new(wi, self.reflectance / cos_i, 1.0, self.flags())
    }

    fn flags(&self) -> BSDFFlag {
        BSDFFlag::SPECULAR | BSDFFlag::REFLECTION
    }
}
