// Copyright @yucwang 2026

use crate::core::bsdf::BSDF;
use crate::core::scene::{Scene, SceneObject};
use crate::materials::dielectric::SmoothDielectricBSDF;
use crate::materials::lambertian_diffuse::LambertianDiffuseBSDF;
use crate::materials::mirror::SpecularMirrorBSDF;
use crate::math::constants::{Float, PI, Vector3f};
use crate::math::spectrum::RGBSpectrum;
use crate::sensors::perspective::PerspectiveCamera;
use crate::shapes::rectangle::Rectangle;
use crate::shapes::sphere::Sphere;
use std::sync::Arc;

fn diffuse(r: Float, g: Float, b: Float) -> Arc<dyn BSDF> {
    Arc::new(LambertianDiffuseBSDF::new(RGBSpectrum::new(r, g, b)))
}

fn wall(center: Vector3f, half_u: Vector3f, half_v: Vector3f) -> Arc<Rectangle> {
    Arc::new(Rectangle::from_center(center, half_u, half_v))
}

/// Open-front Cornell box spanning [-1, 1]^3 with a square ceiling light,
/// a mirror sphere and a glass sphere.
pub fn cornell_box() -> Scene {
    let mut scene = Scene::new();
    let white = diffuse(0.73, 0.73, 0.73);

    scene.add_object(SceneObject::new(wall(Vector3f::new(0.0, -1.0, 0.0),
                                           Vector3f::new(0.0, 0.0, 1.0),
                                           Vector3f::new(1.0, 0.0, 0.0)),
                                      white.clone()).with_name("floor"));
    scene.add_object(SceneObject::new(wall(Vector3f::new(0.0, 1.0, 0.0),
                                           Vector3f::new(1.0, 0.0, 0.0),
                                           Vector3f::new(0.0, 0.0, 1.0)),
                                      white.clone()).with_name("ceiling"));
    scene.add_object(SceneObject::new(wall(Vector3f::new(0.0, 0.0, -1.0),
                                           Vector3f::new(1.0, 0.0, 0.0),
                                           Vector3f::new(0.0, 1.0, 0.0)),
                                      white).with_name("back wall"));
    scene.add_object(SceneObject::new(wall(Vector3f::new(-1.0, 0.0, 0.0),
                                           Vector3f::new(0.0, 1.0, 0.0),
                                           Vector3f::new(0.0, 0.0, 1.0)),
                                      diffuse(0.63, 0.065, 0.05)).with_name("left wall"));
    scene.add_object(SceneObject::new(wall(Vector3f::new(1.0, 0.0, 0.0),
                                           Vector3f::new(0.0, 0.0, 1.0),
                                           Vector3f::new(0.0, 1.0, 0.0)),
                                      diffuse(0.14, 0.45, 0.091)).with_name("right wall"));

    let mirror: Arc<dyn BSDF> = Arc::new(SpecularMirrorBSDF::new(RGBSpectrum::splat(0.9)));
    scene.add_object(SceneObject::new(Arc::new(Sphere::new(Vector3f::new(-0.45, -0.6, -0.3), 0.4)), mirror)
                     .with_name("mirror sphere"));
    let glass: Arc<dyn BSDF> = Arc::new(SmoothDielectricBSDF::new(1.5, 1.0));
    scene.add_object(SceneObject::new(Arc::new(Sphere::new(Vector3f::new(0.45, -0.6, 0.3), 0.4)), glass)
                     .with_name("glass sphere"));

    // Slightly below the ceiling, facing down.
    let light = scene.add_emissive_object(wall(Vector3f::new(0.0, 0.98, 0.0),
                                               Vector3f::new(0.3, 0.0, 0.0),
                                               Vector3f::new(0.0, 0.0, 0.3)),
                                          None,
                                          RGBSpectrum::new(17.0, 12.0, 4.0),
                                          false);
    if let Some(object) = scene.object_mut(light) {
        object.name = Some(String::from("ceiling light"));
    }

    scene
}

pub fn cornell_box_camera(width: usize, height: usize) -> PerspectiveCamera {
    PerspectiveCamera::new(Vector3f::new(0.0, 0.0, 3.5),
                           Vector3f::new(0.0, 0.0, 0.0),
                           Vector3f::new(0.0, 1.0, 0.0),
                           40.0 * PI / 180.0,
                           width,
                           height)
}
