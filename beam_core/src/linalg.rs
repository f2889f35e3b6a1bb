//! # Dense Linear Solver
//!
//! Gaussian elimination with partial pivoting for the small dense systems
//! produced by the reaction and stiffness solvers. System sizes here are
//! tiny (2 unknowns for an isostatic beam, 2 DOFs per mesh node for the
//! stiffness method), so an O(n³) direct solve is the right tool; what
//! matters is the pivoting and the singularity check, which is how an
//! unstable structure first shows up numerically.
//!
//! ## Example
//!
//! ```rust
//! use beam_core::linalg::solve_linear;
//!
//! // 2x + y = 5, x + 3y = 10
//! let a = vec![vec![2.0, 1.0], vec![1.0, 3.0]];
//! let b = vec![5.0, 10.0];
//! let x = solve_linear(&a, &b).unwrap();
//! assert!((x[0] - 1.0).abs() < 1e-12);
//! assert!((x[1] - 3.0).abs() < 1e-12);
//! ```

use crate::errors::{BeamError, BeamResult};

/// Pivot magnitudes below this are treated as singular.
///
/// In the structural context a singular system almost always means an
/// unstable or under-constrained configuration (e.g. two rollers and
/// nothing resisting rotation), so the error message says so.
pub const PIVOT_TOLERANCE: f64 = 1e-12;

/// Solve the dense system `A · x = b` by Gaussian elimination with
/// partial pivoting.
///
/// Operates on private copies; the caller's matrix and vector are never
/// modified. Rows are normalized by their pivot during elimination, then
/// the solution is recovered by back-substitution.
///
/// # Errors
///
/// Returns [`BeamError::SingularSystem`] when the best available pivot in
/// some column falls below [`PIVOT_TOLERANCE`].
pub fn solve_linear(a: &[Vec<f64>], b: &[f64]) -> BeamResult<Vec<f64>> {
    let n = a.len();
    let mut m: Vec<Vec<f64>> = a.iter().map(|row| row.clone()).collect();
    let mut x: Vec<f64> = b.to_vec();

    for k in 0..n {
        // Partial pivoting: bring the largest remaining entry in column k
        // to the diagonal.
        let mut i_max = k;
        for i in (k + 1)..n {
            if m[i][k].abs() > m[i_max][k].abs() {
                i_max = i;
            }
        }

        let pivot_mag = m[i_max][k].abs();
        if pivot_mag < PIVOT_TOLERANCE {
            return Err(BeamError::singular_system(
                "Gaussian elimination",
                format!(
                    "pivot magnitude {:.3e} below {:.0e} at column {}; structure may be unstable",
                    pivot_mag, PIVOT_TOLERANCE, k
                ),
            ));
        }

        if i_max != k {
            m.swap(k, i_max);
            x.swap(k, i_max);
        }

        let pivot = m[k][k];
        for j in k..n {
            m[k][j] /= pivot;
        }
        x[k] /= pivot;

        for i in (k + 1)..n {
            let factor = m[i][k];
            for j in k..n {
                m[i][j] -= factor * m[k][j];
            }
            x[i] -= factor * x[k];
        }
    }

    // Back-substitution. Diagonals are 1.0 after normalization; the final
    // division keeps this correct even if that ever changes.
    for k in (0..n).rev() {
        let mut s = x[k];
        for j in (k + 1)..n {
            s -= m[k][j] * x[j];
        }
        x[k] = s / m[k][k];
    }

    Ok(x)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f64, b: f64, tol: f64) -> bool {
        (a - b).abs() < tol
    }

    #[test]
    fn test_solve_1x1() {
        let x = solve_linear(&[vec![4.0]], &[8.0]).unwrap();
        assert!(approx_eq(x[0], 2.0, 1e-12));
    }

    #[test]
    fn test_solve_2x2() {
        // 2x + y = 5, x + 3y = 10 -> x = 1, y = 3
        let a = vec![vec![2.0, 1.0], vec![1.0, 3.0]];
        let b = vec![5.0, 10.0];
        let x = solve_linear(&a, &b).unwrap();
        assert!(approx_eq(x[0], 1.0, 1e-12));
        assert!(approx_eq(x[1], 3.0, 1e-12));
    }

    #[test]
    fn test_solve_3x3_requires_pivoting() {
        // Leading zero forces a row swap on the first column.
        let a = vec![
            vec![0.0, 2.0, 1.0],
            vec![1.0, -2.0, -3.0],
            vec![-1.0, 1.0, 2.0],
        ];
        let b = vec![-8.0, 0.0, 3.0];
        let x = solve_linear(&a, &b).unwrap();
        // Verify by substitution rather than trusting a hand solution.
        for (row, &rhs) in a.iter().zip(b.iter()) {
            let lhs: f64 = row.iter().zip(x.iter()).map(|(c, v)| c * v).sum();
            assert!(approx_eq(lhs, rhs, 1e-10), "row residual {} vs {}", lhs, rhs);
        }
    }

    #[test]
    fn test_singular_matrix_detected() {
        // Second row is a multiple of the first.
        let a = vec![vec![1.0, 2.0], vec![2.0, 4.0]];
        let b = vec![3.0, 6.0];
        let err = solve_linear(&a, &b).unwrap_err();
        assert_eq!(err.error_code(), "SINGULAR_SYSTEM");
    }

    #[test]
    fn test_zero_matrix_detected() {
        let a = vec![vec![0.0, 0.0], vec![0.0, 0.0]];
        let b = vec![1.0, 1.0];
        assert!(solve_linear(&a, &b).is_err());
    }

    #[test]
    fn test_inputs_not_modified() {
        let a = vec![vec![3.0, 1.0], vec![1.0, 2.0]];
        let b = vec![9.0, 8.0];
        let a_before = a.clone();
        let b_before = b.clone();
        solve_linear(&a, &b).unwrap();
        assert_eq!(a, a_before);
        assert_eq!(b, b_before);
    }

    #[test]
    fn test_ill_conditioned_but_solvable() {
        // Scales differ wildly; partial pivoting keeps this stable.
        let a = vec![vec![1e-6, 1.0], vec![1.0, 1.0]];
        let b = vec![1.0, 2.0];
        let x = solve_linear(&a, &b).unwrap();
        let r0 = 1e-6 * x[0] + x[1];
        let r1 = x[0] + x[1];
        assert!(approx_eq(r0, 1.0, 1e-9));
        assert!(approx_eq(r1, 2.0, 1e-9));
    }
}
