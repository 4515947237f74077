// Copyright @yucwang 2026

use crate::core::bsdf::BSDF;
use crate::core::emitter::Emitter;
use crate::core::interaction::SurfaceIntersection;
use crate::core::shape::Shape;
use crate::emitters::area::AreaEmitter;
use crate::math::ray::Ray3f;
use crate::math::spectrum::RGBSpectrum;
use std::sync::Arc;

pub struct SceneObject {
    pub shape: Arc<dyn Shape>,
    pub material: Option<Arc<dyn BSDF>>,
    pub emitter: Option<usize>,
    pub name: Option<String>,
}

impl SceneObject {
    pub fn new(shape: Arc<dyn Shape>, material: Arc<dyn BSDF>) -> Self {
        Self { shape, material: Some(material), emitter: None, name: None }
    }

    /// An object that absorbs everything it is hit by.
    pub fn absorber(shape: Arc<dyn Shape>) -> Self {
        Self { shape, material: None, emitter: None, name: None }
    }

    pub fn with_name(mut self, name: &str) -> Self {
        self.name = Some(name.to_string());
        self
    }

    pub fn shape(&self) -> &Arc<dyn Shape> {
        &self.shape
    }

    pub fn label(&self) -> String {
        match &self.name {
            Some(name) => name.clone(),
            None => self.shape.id().to_string(),
        }
    }
}

/// Immutable during rendering; shared read-only between render threads.
pub struct Scene {
    objects: Vec<SceneObject>,
    emitters: Vec<Arc<dyn Emitter>>,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene {
    pub fn new() -> Self {
        Self {
            objects: Vec::new(),
            emitters: Vec::new(),
        }
    }

    /// Add a non-emissive object. Returns its index.
    pub fn add_object(&mut self, mut object: SceneObject) -> usize {
        object.emitter = None;
        self.objects.push(object);
        self.objects.len() - 1
    }

    /// Add an object whose surface is a diffuse area light. Emitters are
    /// shaded as black bodies unless `material` is given.
    pub fn add_emissive_object(&mut self,
                               shape: Arc<dyn Shape>,
                               material: Option<Arc<dyn BSDF>>,
                               radiance: RGBSpectrum,
                               two_sided: bool) -> usize {
        let emitter: Arc<dyn Emitter> = Arc::new(AreaEmitter::from_shape(shape.clone(), radiance, two_sided));
        self.emitters.push(emitter);
        self.objects.push(SceneObject {
            shape,
            material,
            emitter: Some(self.emitters.len() - 1),
            name: None,
        });
        self.objects.len() - 1
    }

    pub fn objects(&self) -> &Vec<SceneObject> {
        &self.objects
    }

    pub fn object_mut(&mut self, idx: usize) -> Option<&mut SceneObject> {
        self.objects.get_mut(idx)
    }

    pub fn emitters(&self) -> &Vec<Arc<dyn Emitter>> {
        &self.emitters
    }

    pub fn emitter(&self, idx: usize) -> Option<&Arc<dyn Emitter>> {
        self.emitters.get(idx)
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Nearest hit along `ray`, decorated with the hit object's material
    /// and emitter.
    pub fn ray_intersection(&self, ray: &Ray3f) -> Option<SurfaceIntersection> {
        let mut query = *ray;
        let mut nearest: Option<(usize, SurfaceIntersection)> = None;
        for (idx, object) in self.objects.iter().enumerate() {
            if let Some(hit) = object.shape.ray_intersection(&query) {
                if query.update(hit.t()) {
                    nearest = Some((idx, hit));
                }
            }
        }

        let (idx, hit) = nearest?;
        let object = &self.objects[idx];
        let mut result = hit
            .with_object_index(Some(idx))
            .with_material(object.material.clone());
        if let Some(emitter_idx) = object.emitter {
            result = result.with_emitter(emitter_idx, self.emitters[emitter_idx].clone());
        }
        Some(result)
    }

    pub fn ray_intersection_t(&self, ray: &Ray3f) -> bool {
        self.objects.iter().any(|object| object.shape.ray_intersection_t(ray))
    }

    pub fn log_summary(&self) {
        log::info!("Scene: {} objects, {} emitters.", self.objects.len(), self.emitters.len());
        for object in &self.objects {
            log::debug!("  {} -> {}", object.label(), object.shape.to_string());
        }
        for emitter in &self.emitters {
            let power = emitter.power();
            log::debug!("  {} (power = [{}, {}, {}])", emitter.to_string(), power[0], power[1], power[2]);
        }
        if self.emitters.is_empty() {
            log::warn!("Scene has no emitters, every estimate will be black.");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::computation_node::ComputationNode;
    use crate::core::interaction::SurfaceSampleRecord;
    use crate::materials::lambertian_diffuse::LambertianDiffuseBSDF;
    use crate::math::constants::{Float, Vector2f, Vector3f};
    use crate::shapes::sphere::Sphere;

    struct TestShape {
        t: Float,
    }

    impl TestShape {
        fn new(t: Float) -> Self {
            Self { t }
        }
    }

    impl ComputationNode for TestShape {
        fn id(&self) -> &str {
            "test_shape"
        }

        fn to_string(&self) -> String {
            format!("TestShape: t = {}", self.t)
        }
    }

    impl Shape for TestShape {
        fn ray_intersection(&self, ray: &Ray3f) -> Option<SurfaceIntersection> {
            if self.t < ray.min_t || self.t > ray.max_t {
                return None;
            }

            let p = ray.at(self.t);
            let n = Vector3f::new(0.0, 0.0, -1.0);
            Some(SurfaceIntersection::new(p, n, n, self.t))
        }

        fn sample(&self, _u: &Vector2f) -> SurfaceSampleRecord {
            SurfaceSampleRecord::new(Vector3f::zeros(), Vector3f::new(0.0, 0.0, -1.0), 1.0)
        }

        fn surface_area(&self) -> Float {
            1.0
        }
    }

    fn gray() -> Arc<dyn BSDF> {
        Arc::new(LambertianDiffuseBSDF::new(RGBSpectrum::splat(0.5)))
    }

    #[test]
    fn test_scene_ray_intersection_closest_hit() {
        let mut scene = Scene::new();
        scene.add_object(SceneObject::new(Arc::new(TestShape::new(5.0)), gray()));
        scene.add_object(SceneObject::new(Arc::new(TestShape::new(2.0)), gray()));
        scene.add_object(SceneObject::new(Arc::new(TestShape::new(10.0)), gray()));

        let ray = Ray3f::new(Vector3f::zeros(), Vector3f::new(0.0, 0.0, 1.0), None, None);
        let hit = scene.ray_intersection(&ray).expect("expected intersection");

        assert_eq!(hit.t(), 2.0);
        assert_eq!(hit.object_index(), Some(1));
        assert!(hit.material().is_some());
        assert!(!hit.is_emitter());
        assert!(scene.ray_intersection_t(&ray));
    }

    #[test]
    fn test_scene_miss() {
        let scene = Scene::new();
        let ray = Ray3f::new(Vector3f::zeros(), Vector3f::new(0.0, 0.0, 1.0), None, None);
        assert!(scene.ray_intersection(&ray).is_none());
        assert!(!scene.ray_intersection_t(&ray));
    }

    #[test]
    fn test_scene_emissive_object_binding() {
        let mut scene = Scene::new();
        scene.add_object(SceneObject::new(Arc::new(TestShape::new(8.0)), gray()));
        let light_idx = scene.add_emissive_object(
            Arc::new(Sphere::new(Vector3f::new(0.0, 0.0, 4.0), 1.0)),
            None,
            RGBSpectrum::splat(2.0),
            false,
        );
        assert_eq!(light_idx, 1);
        assert_eq!(scene.emitters().len(), 1);

        let ray = Ray3f::new(Vector3f::zeros(), Vector3f::new(0.0, 0.0, 1.0), None, None);
        let hit = scene.ray_intersection(&ray).expect("expected intersection");
        assert_eq!(hit.object_index(), Some(1));
        assert_eq!(hit.emitter_index(), Some(0));
        assert!(hit.material().is_none());
        assert_eq!(hit.emitted_radiance(&Vector3f::new(0.0, 0.0, -1.0)), RGBSpectrum::splat(2.0));
    }
}
