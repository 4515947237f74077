// Copyright @yucwang 2026

use crate::core::bsdf::{BSDFFlag, BSDFSampleRecord, BSDFValue, BSDF, cos_theta};
use crate::core::computation_node::{generate_node_id, ComputationNode};
use crate::materials::fresnel::{fresnel_dielectric, reflect, refract};
use crate::math::constants::{Float, Vector2f, Vector3f};
use crate::math::spectrum::RGBSpectrum;

/// Smooth glass-like interface. Reflection and refraction are both
/// specular and chosen with probability given by the Fresnel term.
pub struct SmoothDielectricBSDF {
    id: String,
    int_ior: Float,
    ext_ior: Float,
    specular_reflectance: RGBSpectrum,
    specular_transmittance: RGBSpectrum,
}

impl SmoothDielectricBSDF {
    pub fn new(int_ior: Float, ext_ior: Float) -> Self {
        Self {
            id: generate_node_id("SmoothDielectricBSDF"),
            int_ior,
            ext_ior,
            specular_reflectance: RGBSpectrum::ones(),
            specular_transmittance: RGBSpectrum::ones(),
        }
    }

    pub fn with_tint(mut self, reflectance: RGBSpectrum, transmittance: RGBSpectrum) -> Self {
        self.specular_reflectance = reflectance;
        self.specular_transmittance = transmittance;
        self
    }
}

impl ComputationNode for SmoothDielectricBSDF {
    fn id(&self) -> &str {
        &self.id
    }

    fn to_string(&self) -> String {
        format!("SmoothDielectricBSDF: int_ior = {}, ext_ior = {}", self.int_ior, self.ext_ior)
    }
}

impl BSDF for SmoothDielectricBSDF {
    fn eval(&self, _wo: &Vector3f, _wi: &Vector3f) -> BSDFValue {
        BSDFValue::default()
    }

    fn pdf(&self, _wo: &Vector3f, _wi: &Vector3f) -> Float {
        0.0
    }

    fn sample(&self, wo: &Vector3f, u: &Vector2f) -> BSDFSampleRecord {
        let cos_o = cos_theta(wo);
        if cos_o == 0.0 {
            return BSDFSampleRecord::default();
        }
        let f = fresnel_dielectric(cos_o, self.ext_ior, self.int_ior);

        if u.x < f {
            let wi = reflect(wo, &Vector3f::z());
            let value = self.specular_reflectance * (f / cos_o.abs());
            return BSDFSampleRecord::new(wi, value, f, BSDFFlag::SPECULAR | BSDFFlag::REFLECTION);
        }

        let entering = cos_o > 0.0;
        let (eta_i, eta_t) = if entering {
            (self.ext_ior, self.int_ior)
        } else {
            (self.int_ior, self.ext_ior)
        };
        let n = if entering { Vector3f::z() } else { -Vector3f::z() };
        let wi = match refract(wo, &n, eta_i / eta_t) {
            Some(wi) => wi.normalize(),
            None => return BSDFSampleRecord::default(),
        };
        let cos_i = cos_theta(&wi).abs();
        if cos_i <= 0.0 {
            return BSDFSampleRecord::default();
        }

        // Radiance is scaled by the squared relative index across the interface.
        let eta2 = (eta_i * eta_i) / (eta_t * eta_t);
        let value = self.specular_transmittance * ((1.0 - f) * eta2 / cos_i);
        BSDFSampleRecord::new(wi, value, 1.0 - f, BSDFFlag::SPECULAR | BSDFFlag::TRANSMISSION)
    }

    fn flags(&self) -> BSDFFlag {
        BSDFFlag::SPECULAR | BSDFFlag::REFLECTION | BSDFFlag::TRANSMISSION
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_dielectric_reflection_branch() {
        let glass = SmoothDielectricBSDF::new(1.5, 1.0);
        let wo = Vector3f::new(0.0, 0.0, 1.0);
        let record = glass.sample(&wo, &Vector2f::new(0.01, 0.5));
        assert!(record.is_specular());
        assert!(record.flags.contains(BSDFFlag::REFLECTION));
        assert_relative_eq!(record.pdf, 0.04, epsilon = 1e-5);
        let weight = record.value * (cos_theta(&record.wi).abs() / record.pdf);
        assert_relative_eq!(weight[0], 1.0, epsilon = 1e-4);
    }

    #[test]
    fn test_dielectric_transmission_branch() {
        let glass = SmoothDielectricBSDF::new(1.5, 1.0);
        let wo = Vector3f::new(0.6, 0.0, 0.8);
        let record = glass.sample(&wo, &Vector2f::new(0.99, 0.5));
        assert!(record.flags.contains(BSDFFlag::TRANSMISSION));
        assert!(record.wi.z < 0.0);
        let weight = record.value * (cos_theta(&record.wi).abs() / record.pdf);
        assert_relative_eq!(weight[0], 1.0 / (1.5 * 1.5), epsilon = 1e-4);
    }

    #[test]
    fn test_dielectric_total_internal_reflection() {
        let glass = SmoothDielectricBSDF::new(1.5, 1.0);
        // Inside the glass, grazing: always reflects.
        let wo = Vector3f::new(0.99, 0.0, -0.141).normalize();
        let record = glass.sample(&wo, &Vector2f::new(0.99, 0.5));
        assert!(record.flags.contains(BSDFFlag::REFLECTION));
        assert!(record.wi.z < 0.0);
        assert_relative_eq!(record.pdf, 1.0, epsilon = 1e-6);
    }

    #[test]
    fn test_dielectric_tint_scales_transmission() {
        let glass = SmoothDielectricBSDF::new(1.5, 1.0)
            .with_tint(RGBSpectrum::ones(), RGBSpectrum::new(1.0, 0.5, 0.0));
        let wo = Vector3f::new(0.0, 0.0, 1.0);
        let record = glass.sample(&wo, &Vector2f::new(0.99, 0.5));
        let weight = record.value * (cos_theta(&record.wi).abs() / record.pdf);
        assert_relative_eq!(weight[1], 0.5 / (1.5 * 1.5), epsilon = 1e-4);
        assert_eq!(weight[2], 0.0);
    }
}
