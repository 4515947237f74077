// Copyright @yucwang 2026

use crate::math::constants::{Float, Vector2f};

/// Source of uniform variates for one path. An instance is owned by a
/// single render thread at a time.
pub trait Sampler {
    /// Uniform value in [0, 1).
    fn next_1d(&mut self) -> Float;

    /// Uniform point in [0, 1)^2.
    fn next_2d(&mut self) -> Vector2f {
        let x = self.next_1d();
        let y = self.next_1d();
        Vector2f::new(x, y)
    }
}
