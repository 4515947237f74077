// Copyright @yucwang 2023

use crate::core::bsdf::{BSDFFlag, BSDFSampleRecord, BSDFValue, BSDF, cos_theta, same_hemisphere};
use crate::core::computation_node::{generate_node_id, ComputationNode};
use crate::math::constants::{ Float, INV_PI, Vector2f, Vector3f };
use crate::math::spectrum::RGBSpectrum;
use crate::math::warp::{ sample_cosine_hemisphere, sample_cosine_hemisphere_pdf };

pub struct LambertianDiffuseBSDF {
    id: String,
    color: RGBSpectrum
}

impl ComputationNode for LambertianDiffuseBSDF {
    fn id(&self) -> &str {
        &self.id
    }

    fn to_string(&self) -> String {
        format!("LambertianDiffuseBSDF: albedo = [{}, {}, {}]",
                self.color[0], self.color[1], self.color[2])
    }
}

impl BSDF for LambertianDiffuseBSDF {
    fn eval(&self, wo: &Vector3f, wi: &Vector3f) -> BSDFValue {
        if !same_hemisphere(wo, wi) {
            return BSDFValue::default();
        }
        self.color * INV_PI
    }

    fn pdf(&self, wo: &Vector3f, wi: &Vector3f) -> Float {
        if !same_hemisphere(wo, wi) {
            return 0.0;
        }
        sample_cosine_hemisphere_pdf(cos_theta(wi).abs())
    }

    fn sample(&self, wo: &Vector3f, u: &Vector2f) -> BSDFSampleRecord {
        let mut wi = sample_cosine_hemisphere(u);
        if wo.z < 0.0 {
            wi.z *= -1.0;
        }

        let pdf = self.pdf(wo, &wi);
        if pdf <= 0.0 {
            return BSDFSampleRecord::default();
        }

        BSDFSampleRecord::new(wi, self.eval(wo, &wi), pdf, self.flags())
    }

    fn flags(&self) -> BSDFFlag {
        BSDFFlag::DIFFUSE | BSDFFlag::REFLECTION
    }
}

impl LambertianDiffuseBSDF {
    pub fn new(rgb: RGBSpectrum) -> Self {
        Self {
            id: generate_node_id("LambertianDiffuseBSDF"),
            color: rgb,
        }
    }

    pub fn albedo(&self) -> RGBSpectrum {
        self.color
    }
}
