// Copyright @yucwang 2023

use crate::core::interaction::{ SurfaceIntersection, SurfaceSampleRecord };
use crate::math::constants::{ Float, Vector2f, Vector3f };
use crate::math::ray::Ray3f;

pub trait Shape: crate::core::computation_node::ComputationNode + Send + Sync {
    fn ray_intersection(&self, ray: &Ray3f) -> Option<SurfaceIntersection>;

    fn ray_intersection_t(&self, ray: &Ray3f) -> bool {
        self.ray_intersection(ray).is_some()
    }

    /// Uniform point on the surface, pdf in area measure.
    fn sample(&self, u: &Vector2f) -> SurfaceSampleRecord;

    fn surface_area(&self) -> Float;

    /// Point on the surface as seen from `reference`, pdf converted to
    /// solid angle at `reference`.
    fn sample_from(&self, reference: &Vector3f, u: &Vector2f) -> SurfaceSampleRecord {
        to_solid_angle(self.sample(u), reference)
    }

    /// Solid-angle density of `sample_from` producing direction `wi`.
    fn pdf_from(&self, reference: &Vector3f, wi: &Vector3f) -> Float {
        let ray = Ray3f::new(*reference, *wi, Some(0.0), None);
        match self.ray_intersection(&ray) {
            Some(hit) => solid_angle_pdf(&hit, &ray, self.surface_area()),
            None => 0.0,
        }
    }
}

/// Convert an area-measure surface sample into solid angle at `reference`.
pub fn to_solid_angle(mut record: SurfaceSampleRecord, reference: &Vector3f) -> SurfaceSampleRecord {
    if record.pdf <= 0.0 {
        return SurfaceSampleRecord::invalid();
    }

    let to_surface = record.p - reference;
    let dist2 = to_surface.norm_squared();
    if dist2 <= 0.0 {
        return SurfaceSampleRecord::invalid();
    }
    let wi = to_surface / dist2.sqrt();
    let cos_surface = record.normal.dot(&(-wi)).abs();
    if cos_surface <= 0.0 {
        return SurfaceSampleRecord::invalid();
    }

    record.pdf *= dist2 / cos_surface;
    record
}

/// Solid-angle density of a uniform area sample landing on `hit`.
pub fn solid_angle_pdf(hit: &SurfaceIntersection, ray: &Ray3f, area: Float) -> Float {
    let cos_surface = hit.geo_normal().dot(&(-ray.dir())).abs();
    if cos_surface <= 0.0 || area <= 0.0 {
        return 0.0;
    }

    hit.t() * hit.t() / (cos_surface * area)
}
