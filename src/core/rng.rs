// Copyright @yucwang 2026

use crate::core::sampler::Sampler;
use crate::math::constants::Float;

pub struct LcgRng {
    state: u64,
}

impl LcgRng {
    pub fn new(seed: u64) -> Self {
        let mut rng = Self { state: seed };
        // Decorrelate nearby seeds.
        rng.next_u32();
        rng
    }

    /// Seed for pixel (x, y) of a render started with `seed`.
    pub fn for_pixel(seed: u64, x: usize, y: usize) -> Self {
        let seed = ((seed & 0xFFFF_FFFF) << 32)
            | (((y as u64) & 0xFFFF) << 16)
            | ((x as u64) & 0xFFFF);
        Self::new(seed)
    }

    pub fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
        (self.state >> 32) as u32
    }

    pub fn next_f32(&mut self) -> Float {
        // 24 random mantissa bits, so 1.0 is never produced.
        ((self.next_u32() >> 8) as Float) * (1.0 / (1u32 << 24) as Float)
    }
}

impl Sampler for LcgRng {
    fn next_1d(&mut self) -> Float {
        self.next_f32()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lcg_range() {
        let mut rng = LcgRng::new(7);
        for _ in 0..10000 {
            let v = rng.next_1d();
            assert!(v >= 0.0 && v < 1.0);
        }
    }

    #[test]
    fn test_lcg_deterministic_per_seed() {
        let mut a = LcgRng::for_pixel(3, 10, 20);
        let mut b = LcgRng::for_pixel(3, 10, 20);
        let mut c = LcgRng::for_pixel(3, 11, 20);
        let va: Vec<u32> = (0..8).map(|_| a.next_u32()).collect();
        let vb: Vec<u32> = (0..8).map(|_| b.next_u32()).collect();
        let vc: Vec<u32> = (0..8).map(|_| c.next_u32()).collect();
        assert_eq!(va, vb);
        assert_ne!(va, vc);
    }

    #[test]
    fn test_lcg_mean() {
        let mut rng = LcgRng::new(42);
        let n = 20000;
        let mean: Float = (0..n).map(|_| rng.next_1d()).sum::<Float>() / n as Float;
        assert!((mean - 0.5).abs() < 0.01);
    }
}
