pub mod dielectric;
pub mod fresnel;
pub mod lambertian_diffuse;
pub mod mirror;
