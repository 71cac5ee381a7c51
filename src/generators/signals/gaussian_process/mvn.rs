//! Multivariate normal draws from a dense covariance matrix.
//!
//! Purpose
//! -------
//! Turn `n` independent standard-normal draws `z` into one sample
//! `x = μ·1 + A z` with `A Aᵀ = C`.
//!
//! Key behaviors
//! -------------
//! - Copy the `ndarray` covariance into a `nalgebra::DMatrix` and try a
//!   Cholesky factorization first (`A = L`).
//! - When Cholesky fails (PSD but numerically singular), fall back to the
//!   symmetric eigendecomposition `C = Q Λ Qᵀ` and use `A = Q Λ^{1/2}`,
//!   clamping eigenvalues inside the tolerance band to zero.
//! - Eigenvalues below `-PSD_TOL · max(1, λ_max)` mean the matrix is not PSD
//!   and are reported as `SynthError::NotPositiveSemiDefinite`.
//!
//! Invariants & assumptions
//! ------------------------
//! - `cov` is square and symmetric. Asymmetry is not repaired here.
//! - Exactly `n` standard-normal draws are consumed on every path, before any
//!   factorization, so the stream position does not depend on which path ran.
use crate::{
    errors::{SynthError, SynthResult},
    generators::draws,
};
use nalgebra::{DMatrix, DVector};
use ndarray::{Array1, Array2};
use rand::RngCore;

/// Relative tolerance below zero admitted for eigenvalues of a PSD matrix.
pub const PSD_TOL: f64 = 1e-8;

/// Draw one sample from `Normal(mean·1, cov)`.
///
/// Errors
/// ------
/// - `SynthError::NotPositiveSemiDefinite` if the smallest eigenvalue is
///   below the tolerance band.
pub fn sample_mvn(
    mean: f64, cov: &Array2<f64>, rng: &mut dyn RngCore,
) -> SynthResult<Array1<f64>> {
    let n = cov.nrows();
    if n == 0 {
        return Ok(Array1::zeros(0));
    }
    let z = DVector::from_iterator(n, (0..n).map(|_| draws::standard_normal(&mut *rng)));

    let mut cov_nalg = DMatrix::<f64>::zeros(n, n);
    fill_dmatrix(cov, &mut cov_nalg);

    let correlated = match cov_nalg.clone().cholesky() {
        Some(chol) => chol.l() * z,
        None => eigen_factor(cov_nalg)? * z,
    };
    Ok(Array1::from_iter(correlated.iter().map(|x| mean + x)))
}

/// Copy a square `ndarray` matrix into a preallocated `DMatrix`.
fn fill_dmatrix(cov: &Array2<f64>, cov_nalg: &mut DMatrix<f64>) {
    let n = cov.ncols();
    for j in 0..n {
        for i in 0..n {
            cov_nalg[(i, j)] = cov[[i, j]];
        }
    }
}

/// `Q Λ^{1/2}` from the symmetric eigendecomposition of `cov_nalg`.
fn eigen_factor(cov_nalg: DMatrix<f64>) -> SynthResult<DMatrix<f64>> {
    let eigen = cov_nalg.symmetric_eigen();
    let lambda_max = eigen.eigenvalues.iter().copied().fold(0.0_f64, f64::max);
    // NaN propagates; `f64::min` would skip it.
    let min_eigenvalue = eigen.eigenvalues.iter().copied().fold(f64::INFINITY, |acc, l| {
        if acc.is_nan() || l.is_nan() { f64::NAN } else { acc.min(l) }
    });
    let tol = PSD_TOL * lambda_max.max(1.0);
    if !min_eigenvalue.is_finite() || min_eigenvalue < -tol {
        return Err(SynthError::NotPositiveSemiDefinite { min_eigenvalue });
    }
    let mut factor = eigen.eigenvectors;
    for (k, &lambda) in eigen.eigenvalues.iter().enumerate() {
        let scale = lambda.max(0.0).sqrt();
        factor.column_mut(k).scale_mut(scale);
    }
    Ok(factor)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::array;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - The Cholesky path on a diagonal covariance (exact scaling of z).
    // - The eigen fallback on a rank-deficient covariance.
    // - Rejection of an indefinite matrix.
    // -------------------------------------------------------------------------

    #[test]
    // Purpose
    // -------
    // A diagonal covariance scales each standard-normal draw by its std.
    //
    // Given
    // -----
    // - C = diag(4, 9), mean 1, and a replayed RNG.
    //
    // Expect
    // ------
    // - x = [1 + 2 z0, 1 + 3 z1].
    fn diagonal_covariance_scales_draws() {
        // Arrange
        let cov = array![[4.0, 0.0], [0.0, 9.0]];
        let mut rng = ChaCha8Rng::seed_from_u64(21);
        let mut replay = rng.clone();

        // Act
        let x = sample_mvn(1.0, &cov, &mut rng).expect("PSD covariance");

        // Assert
        let z0 = draws::standard_normal(&mut replay);
        let z1 = draws::standard_normal(&mut replay);
        assert_relative_eq!(x[0], 1.0 + 2.0 * z0, epsilon = 1e-12);
        assert_relative_eq!(x[1], 1.0 + 3.0 * z1, epsilon = 1e-12);
    }

    #[test]
    // Purpose
    // -------
    // A rank-one covariance (all ones) produces identical coordinates through
    // the eigen fallback.
    fn singular_covariance_uses_eigen_fallback() {
        let cov = Array2::from_elem((3, 3), 1.0);
        let mut rng = ChaCha8Rng::seed_from_u64(4);
        let x = sample_mvn(0.0, &cov, &mut rng).expect("PSD but singular");
        assert_relative_eq!(x[0], x[1], epsilon = 1e-6);
        assert_relative_eq!(x[1], x[2], epsilon = 1e-6);
    }

    #[test]
    fn indefinite_covariance_is_rejected() {
        let cov = array![[1.0, 2.0], [2.0, 1.0]];
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let err = sample_mvn(0.0, &cov, &mut rng).expect_err("eigenvalues 3 and -1");
        assert!(matches!(err, SynthError::NotPositiveSemiDefinite { min_eigenvalue }
            if (min_eigenvalue + 1.0).abs() < 1e-9));
    }
}
