// Copyright @yucwang 2023

use crate::core::computation_node::ComputationNode;
use crate::core::tangent_frame::{build_tangent_frame, local_to_world, world_to_local};
use crate::math::constants::{ Float, Vector2f, Vector3f };
use crate::math::spectrum::RGBSpectrum;
use std::sync::Arc;

// Definitions of types used in BSDF sampling and eval
// processes
pub type BSDFValue = RGBSpectrum;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BSDFFlag(u8);

impl BSDFFlag {
    pub const NONE: Self = Self(0);
    pub const REFLECTION: Self = Self(1 << 0);
    pub const TRANSMISSION: Self = Self(1 << 1);
    pub const DIFFUSE: Self = Self(1 << 2);
    pub const SPECULAR: Self = Self(1 << 3);

    pub fn contains(self, other: Self) -> bool {
        (self.0 & other.0) != 0
    }

    pub fn is_specular(self) -> bool {
        self.contains(Self::SPECULAR)
    }
}

impl std::ops::BitOr for BSDFFlag {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self::Output {
        Self(self.0 | rhs.0)
    }
}

impl std::ops::BitOrAssign for BSDFFlag {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

/// Outcome of importance sampling a BSDF. `value` is the BSDF itself, not
/// yet multiplied by the cosine or divided by the pdf.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BSDFSampleRecord {
    pub wi: Vector3f,
    pub value: BSDFValue,
    pub pdf: Float,
    pub flags: BSDFFlag,
}

impl Default for BSDFSampleRecord {
    fn default() -> Self {
        Self {
            wi: Vector3f::zeros(),
            value: BSDFValue::default(),
            pdf: 0.0,
            flags: BSDFFlag::NONE,
        }
    }
}

impl BSDFSampleRecord {
    pub fn new(wi: Vector3f, value: BSDFValue, pdf: Float, flags: BSDFFlag) -> Self {
        Self { wi, value, pdf, flags }
    }

    /// A sample that can carry energy along the path.
    pub fn is_valid(&self) -> bool {
        !self.value.is_black() && self.pdf > 0.0
    }

    pub fn is_specular(&self) -> bool {
        self.flags.is_specular()
    }
}

/// Reflectance model expressed in the local shading frame, where the
/// surface normal is +z. Both `wo` and `wi` point away from the surface.
pub trait BSDF: ComputationNode + Send + Sync {
    fn eval(&self, wo: &Vector3f, wi: &Vector3f) -> BSDFValue;
    fn pdf(&self, wo: &Vector3f, wi: &Vector3f) -> Float;
    fn sample(&self, wo: &Vector3f, u: &Vector2f) -> BSDFSampleRecord;
    fn flags(&self) -> BSDFFlag;
}

pub fn cos_theta(w: &Vector3f) -> Float {
    w.z
}

pub fn same_hemisphere(a: &Vector3f, b: &Vector3f) -> bool {
    a.z * b.z > 0.0
}

/// A material bound to one surface point. Converts world-space directions
/// into the shading frame before querying the material.
#[derive(Clone)]
pub struct SurfaceBSDF {
    material: Arc<dyn BSDF>,
    sh_normal: Vector3f,
    tangent: Vector3f,
    bitangent: Vector3f,
}

impl SurfaceBSDF {
    pub fn new(material: Arc<dyn BSDF>, sh_normal: Vector3f) -> Self {
        let (tangent, bitangent) = build_tangent_frame(&sh_normal);
        Self { material, sh_normal, tangent, bitangent }
    }

    pub fn shading_normal(&self) -> Vector3f {
        self.sh_normal
    }

    pub fn flags(&self) -> BSDFFlag {
        self.material.flags()
    }

    pub fn to_local(&self, v: &Vector3f) -> Vector3f {
        world_to_local(v, &self.tangent, &self.bitangent, &self.sh_normal)
    }

    pub fn to_world(&self, v: &Vector3f) -> Vector3f {
        local_to_world(v, &self.tangent, &self.bitangent, &self.sh_normal)
    }

    pub fn evaluate(&self, wo: &Vector3f, wi: &Vector3f) -> BSDFValue {
        self.material.eval(&self.to_local(wo), &self.to_local(wi))
    }

    pub fn pdf(&self, wo: &Vector3f, wi: &Vector3f) -> Float {
        self.material.pdf(&self.to_local(wo), &self.to_local(wi))
    }

    pub fn sample(&self, wo: &Vector3f, u: &Vector2f) -> BSDFSampleRecord {
        let wo_local = self.to_local(wo);
        if wo_local.z == 0.0 {
            return BSDFSampleRecord::default();
        }
        let mut record = self.material.sample(&wo_local, u);
        record.wi = self.to_world(&record.wi);
        record
    }

    /// |cos| between a world-space direction and the shading normal.
    pub fn abs_cos(&self, w: &Vector3f) -> Float {
        w.dot(&self.sh_normal).abs()
    }
}
