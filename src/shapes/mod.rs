pub mod rectangle;
pub mod sphere;
