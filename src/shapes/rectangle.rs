// Copyright @yucwang 2026

use crate::core::computation_node::{generate_node_id, ComputationNode};
use crate::core::interaction::{SurfaceIntersection, SurfaceSampleRecord};
use crate::core::shape::Shape;
use crate::math::constants::{Float, Vector2f, Vector3f};
use crate::math::ray::Ray3f;

/// Parallelogram spanned by `dp_du` and `dp_dv` from `corner`. The normal
/// is `dp_du x dp_dv`.
pub struct Rectangle {
    id: String,
    corner: Vector3f,
    dp_du: Vector3f,
    dp_dv: Vector3f,
    normal: Vector3f,
    area: Float,
    inv_area: Float,
}

impl Rectangle {
    pub fn new(corner: Vector3f, dp_du: Vector3f, dp_dv: Vector3f) -> Self {
        let cross = dp_du.cross(&dp_dv);
        let area = cross.norm();
        let inv_area = if area > 0.0 { 1.0 / area } else { 0.0 };
        let normal = if area > 0.0 { cross / area } else { Vector3f::new(0.0, 0.0, 1.0) };

        Self { id: generate_node_id("Rectangle"), corner, dp_du, dp_dv, normal, area, inv_area }
    }

    /// Rectangle centered at `center` with half extents `half_u`, `half_v`.
    pub fn from_center(center: Vector3f, half_u: Vector3f, half_v: Vector3f) -> Self {
        Self::new(center - half_u - half_v, half_u * 2.0, half_v * 2.0)
    }

    pub fn normal(&self) -> Vector3f {
        self.normal
    }

    fn intersect_local(&self, ray: &Ray3f) -> Option<Float> {
        if self.area <= 0.0 {
            return None;
        }

        let denom = self.normal.dot(&ray.dir());
        if denom.abs() < 1e-8 {
            return None;
        }

        let t = self.normal.dot(&(self.corner - ray.origin())) / denom;
        if !ray.test_segment(t) {
            return None;
        }

        let local = ray.at(t) - self.corner;
        let w = self.dp_du.cross(&self.dp_dv);
        let inv_w2 = 1.0 / w.norm_squared();
        let alpha = local.cross(&self.dp_dv).dot(&w) * inv_w2;
        let beta = self.dp_du.cross(&local).dot(&w) * inv_w2;
        if alpha < 0.0 || alpha > 1.0 || beta < 0.0 || beta > 1.0 {
            return None;
        }

        Some(t)
    }
}

impl ComputationNode for Rectangle {
    fn id(&self) -> &str {
        &self.id
    }

    fn to_string(&self) -> String {
        format!("Rectangle: corner = [{}, {}, {}], normal = [{}, {}, {}], area = {}",
                self.corner.x, self.corner.y, self.corner.z,
                self.normal.x, self.normal.y, self.normal.z, self.area)
    }
}

impl Shape for Rectangle {
    fn ray_intersection(&self, ray: &Ray3f) -> Option<SurfaceIntersection> {
        let t = self.intersect_local(ray)?;
        Some(SurfaceIntersection::new(ray.at(t), self.normal, self.normal, t))
    }

    fn ray_intersection_t(&self, ray: &Ray3f) -> bool {
        self.intersect_local(ray).is_some()
    }

    fn sample(&self, u: &Vector2f) -> SurfaceSampleRecord {
        let p = self.corner + self.dp_du * u.x + self.dp_dv * u.y;
        SurfaceSampleRecord::new(p, self.normal, self.inv_area)
    }

    fn surface_area(&self) -> Float {
        self.area
    }
}
