// Copyright @yucwang 2026

use crate::core::computation_node::{generate_node_id, ComputationNode};
use crate::core::interaction::{SurfaceIntersection, SurfaceSampleRecord};
use crate::core::shape::{to_solid_angle, Shape};
use crate::core::tangent_frame::align_to_axis;
use crate::math::constants::{Float, PI, Vector2f, Vector3f};
use crate::math::ray::Ray3f;
use crate::math::warp::{sample_uniform_cone, sample_uniform_cone_pdf, sample_uniform_sphere, sample_uniform_sphere_pdf};

pub struct Sphere {
    id: String,
    center: Vector3f,
    radius: Float,
}

impl Sphere {
    /// Negative radii are clamped to zero.
    pub fn new(center: Vector3f, radius: Float) -> Self {
        Self { id: generate_node_id("Sphere"), center, radius: radius.max(0.0) }
    }

    pub fn center(&self) -> Vector3f {
        self.center
    }

    pub fn radius(&self) -> Float {
        self.radius
    }

    fn contains(&self, p: &Vector3f) -> bool {
        (p - self.center).norm_squared() <= self.radius * self.radius
    }

    // Cosine of the half-angle of the cone the sphere subtends from `p`,
    // with `p` outside the sphere.
    fn cos_theta_max(&self, p: &Vector3f) -> Float {
        let dist2 = (self.center - p).norm_squared();
        let sin2 = self.radius * self.radius / dist2;
        (1.0 - sin2).max(0.0).sqrt()
    }

    fn make_intersection(&self, p: Vector3f, t: Float) -> SurfaceIntersection {
        let n = if self.radius > 0.0 {
            (p - self.center) / self.radius
        } else {
            Vector3f::new(0.0, 0.0, 1.0)
        };
        SurfaceIntersection::new(p, n, n, t)
    }
}

impl ComputationNode for Sphere {
    fn id(&self) -> &str {
        &self.id
    }

    fn to_string(&self) -> String {
        format!("Sphere: center = [{}, {}, {}], radius = {}",
                self.center.x, self.center.y, self.center.z, self.radius)
    }
}

impl Shape for Sphere {
    fn ray_intersection(&self, ray: &Ray3f) -> Option<SurfaceIntersection> {
        let oc = self.center - ray.origin();
        let h = ray.dir().dot(&oc);
        let c = oc.norm_squared() - self.radius * self.radius;
        let discriminant = h * h - c;
        if discriminant < 0.0 {
            return None;
        }

        let sqrtd = discriminant.sqrt();
        let mut root = h - sqrtd;
        if !ray.test_segment(root) {
            root = h + sqrtd;
            if !ray.test_segment(root) {
                return None;
            }
        }

        Some(self.make_intersection(ray.at(root), root))
    }

    fn sample(&self, u: &Vector2f) -> SurfaceSampleRecord {
        if self.surface_area() <= 0.0 {
            return SurfaceSampleRecord::invalid();
        }
        let n = sample_uniform_sphere(u);
        SurfaceSampleRecord::new(self.center + n * self.radius, n, sample_uniform_sphere_pdf() / (self.radius * self.radius))
    }

    fn surface_area(&self) -> Float {
        4.0 * PI * self.radius * self.radius
    }

    fn sample_from(&self, reference: &Vector3f, u: &Vector2f) -> SurfaceSampleRecord {
        if self.contains(reference) {
            return to_solid_angle(self.sample(u), reference);
        }

        let to_center = self.center - reference;
        let axis = to_center.normalize();
        let cos_theta_max = self.cos_theta_max(reference);
        let pdf = sample_uniform_cone_pdf(cos_theta_max);
        if pdf <= 0.0 {
            return SurfaceSampleRecord::invalid();
        }
        let wi = align_to_axis(&sample_uniform_cone(u, cos_theta_max), &axis);

        let ray = Ray3f::new(*reference, wi, Some(0.0), None);
        let p = match self.ray_intersection(&ray) {
            Some(hit) => hit.p(),
            None => {
                // Grazing direction missed by round-off: take the closest
                // point of the ray and project it on the surface.
                let closest = ray.at(wi.dot(&to_center));
                self.center + (closest - self.center).normalize() * self.radius
            }
        };
        let normal = (p - self.center) / self.radius;
        SurfaceSampleRecord::new(p, normal, pdf)
    }

    fn pdf_from(&self, reference: &Vector3f, wi: &Vector3f) -> Float {
        if self.contains(reference) {
            let ray = Ray3f::new(*reference, *wi, Some(0.0), None);
            return match self.ray_intersection(&ray) {
                Some(hit) => crate::core::shape::solid_angle_pdf(&hit, &ray, self.surface_area()),
                None => 0.0,
            };
        }

        let axis = (self.center - reference).normalize();
        let cos_theta_max = self.cos_theta_max(reference);
        // Tolerance absorbs round-off for directions on the silhouette.
        if wi.normalize().dot(&axis) < cos_theta_max - 1e-6 {
            return 0.0;
        }
        sample_uniform_cone_pdf(cos_theta_max)
    }
}
