// Copyright @yucwang 2026

use crate::math::constants::{Point2, Real};

/// Linear congruential generator for uniform numbers in [0, 1).
#[derive(Debug, Clone)]
pub struct LcgRng {
    state: u64,
}

impl LcgRng {
    pub fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    pub fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_mul(6364136223846793005).wrapping_add(1);
        (self.state >> 32) as u32
    }

    /// 24 random mantissa bits, so the value is exactly representable in both
    /// precisions and never reaches 1.
    pub fn next_float<T: Real>(&mut self) -> T {
        T::cast((self.next_u32() >> 8) as f64 / 16777216.0)
    }

    pub fn next_point2<T: Real>(&mut self) -> Point2<T> {
        let x = self.next_float();
        let y = self.next_float();
        Point2::new(x, y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_range_and_determinism() {
        let mut a = LcgRng::new(42);
        let mut b = LcgRng::new(42);
        for _ in 0..10000 {
            let x: f32 = a.next_float();
            assert!(x >= 0.0 && x < 1.0);
            assert_eq!(x as f64, b.next_float::<f64>());
        }
    }

    #[test]
    fn test_mean_is_one_half() {
        let mut rng = LcgRng::new(1);
        let n = 100000;
        let mean: f64 = (0..n).map(|_| rng.next_float::<f64>()).sum::<f64>() / n as f64;
        assert!((mean - 0.5).abs() < 0.01);
    }
}
