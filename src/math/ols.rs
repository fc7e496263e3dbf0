//! Ordinary least squares via the normal equations.
//!
//! We solve
//!
//! ```text
//! minimize ‖X β − y‖²   ⇔   (XᵗX) β = Xᵗy
//! ```
//!
//! Implementation choices:
//! - Columns of `X` are scaled to unit Euclidean norm first. CVD regressors span
//!   roughly ten orders of magnitude (`1` up to `(T − 100)·T³`), and the scaling
//!   keeps the Gram matrix well-conditioned without changing the solution.
//! - The scaled Gram matrix is factored with Cholesky instead of being inverted.
//! - Singularity is declared when the factorization fails or a pivot of the
//!   unit-diagonal Gram matrix drops below [`MIN_PIVOT`].

use nalgebra::{DMatrix, DVector};

/// Smallest accepted Cholesky pivot (`L_jj²`) of the unit-diagonal Gram matrix.
///
/// A pivot is `1 − R²` of column `j` regressed on the previous columns, so this
/// bounds how collinear the regressors may be.
pub const MIN_PIVOT: f64 = 1e-12;

/// Solve a least squares problem through the normal equations.
///
/// Returns `None` if the normal matrix is singular (rank-deficient design,
/// fewer rows than columns, a zero column) or the shapes do not match.
pub fn solve_normal_equations(x: &DMatrix<f64>, y: &DVector<f64>) -> Option<DVector<f64>> {
    if x.ncols() == 0 || x.nrows() < x.ncols() || x.nrows() != y.len() {
        return None;
    }

    let scales = column_norms(x)?;
    let mut xs = x.clone();
    for (j, &s) in scales.iter().enumerate() {
        for v in xs.column_mut(j).iter_mut() {
            *v /= s;
        }
    }

    let xt = xs.transpose();
    let gram = &xt * &xs;
    let rhs = &xt * y;

    let chol = gram.cholesky()?;
    if chol.l().diagonal().iter().any(|&d| !(d * d >= MIN_PIVOT)) {
        return None;
    }

    let beta_scaled = chol.solve(&rhs);
    Some(beta_scaled.component_div(&scales))
}

/// Euclidean norm of each column; `None` if any column is zero or not finite.
fn column_norms(x: &DMatrix<f64>) -> Option<DVector<f64>> {
    let norms: Vec<f64> = (0..x.ncols()).map(|j| x.column(j).norm()).collect();
    if norms.iter().all(|n| n.is_finite() && *n > 0.0) {
        Some(DVector::from_vec(norms))
    } else {
        None
    }
}
