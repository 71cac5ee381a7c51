//! Scalar random draws shared by the generator family.
//!
//! Parameters are validated by each generator's constructor, so these helpers
//! take plain `f64`s and never fail. A zero spread returns the location
//! exactly.
use rand::RngCore;
use rand_distr::{Distribution, StandardNormal};

/// One draw from `Normal(0, 1)`.
pub(crate) fn standard_normal(rng: &mut dyn RngCore) -> f64 {
    StandardNormal.sample(rng)
}

/// One draw from `Normal(mean, std)`; `std` must be finite and ≥ 0.
pub(crate) fn normal(mean: f64, std: f64, rng: &mut dyn RngCore) -> f64 {
    mean + std * standard_normal(rng)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn normal_with_zero_spread_is_exact() {
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        assert_eq!(normal(-2.0, 0.0, &mut rng), -2.0);
    }

    #[test]
    fn normal_is_affine_in_the_standard_draw() {
        let z = standard_normal(&mut ChaCha8Rng::seed_from_u64(9));
        let x = normal(1.0, 3.0, &mut ChaCha8Rng::seed_from_u64(9));
        assert_eq!(x, 1.0 + 3.0 * z);
    }
}
