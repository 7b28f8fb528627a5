//! Kullback-Leibler divergence and its one-sided binary inversion.
//!
//! ## Mathematical Foundation
//!
//! For categorical distributions Q and P over the same outcomes:
//!
//! ```text
//! KL(Q ‖ P) = Σ_i q_i ln(q_i / p_i)
//! ```
//!
//! with the standard convention that a `q_i = 0` term contributes
//! nothing. For a Bernoulli parameter, `KL(q ‖ x)` is strictly convex
//! in `x` with its minimum (zero) at `x = q`, so on either side of `q`
//! it is strictly monotone. Inverting it there yields the tightest
//! one-sided confidence limits on the true parameter given an empirical
//! mean `q` and a divergence budget: the largest `x > q` (supremum
//! limit) or smallest `x < q` (infimum limit) still within budget.
//!
//! The search domain is clamped [`BOUNDARY_EPS`] away from 0 and 1,
//! where the divergence has log singularities. When the budget is not
//! binding inside the clamped domain the boundary itself is the answer
//! and no root finding runs.

use crate::solve::{SolveError, brent_root};

/// Offset from the 0/1 divergence singularities bounding every search
/// domain.
pub const BOUNDARY_EPS: f64 = 1e-9;

/// KL divergence between categorical distributions `q` and `p` of equal
/// cardinality. Entries of `q` equal to zero contribute nothing.
pub fn kl(q: &[f64], p: &[f64]) -> f64 {
    debug_assert_eq!(q.len(), p.len());
    q.iter()
        .zip(p.iter())
        .map(|(&qi, &pi)| if qi > 0.0 { qi * (qi / pi).ln() } else { 0.0 })
        .sum()
}

/// KL divergence between Bernoulli distributions with success
/// probabilities `q` and `p`.
pub fn kl_binary(q: f64, p: f64) -> f64 {
    kl(&[q, 1.0 - q], &[p, 1.0 - p])
}

/// KL divergence between three-outcome distributions
/// `Q = (q1, q2, 1-q1-q2)` and `P = (p1, p2, 1-p1-p2)`.
pub fn kl_trinomial(q1: f64, q2: f64, p1: f64, p2: f64) -> f64 {
    kl(&[q1, q2, 1.0 - q1 - q2], &[p1, p2, 1.0 - p1 - p2])
}

/// Largest `x > q` with `kl_binary(q, x) <= budget`.
///
/// Returns the clamped upper boundary `1 - BOUNDARY_EPS` when the
/// budget is not binding there; otherwise the unique root of
/// `kl_binary(q, x) - budget` in `(q, 1 - BOUNDARY_EPS)`.
pub fn solve_kl_sup(q: f64, budget: f64) -> Result<f64, SolveError> {
    let hi = 1.0 - BOUNDARY_EPS;
    let excess = |x: f64| kl_binary(q, x) - budget;
    if excess(hi) <= 0.0 {
        Ok(hi)
    } else {
        brent_root(excess, q, hi)
    }
}

/// Smallest `x < q` with `kl_binary(q, x) <= budget`.
///
/// Mirror image of [`solve_kl_sup`]: clamps at `BOUNDARY_EPS`, roots
/// over `(BOUNDARY_EPS, q)` otherwise.
pub fn solve_kl_inf(q: f64, budget: f64) -> Result<f64, SolveError> {
    let lo = BOUNDARY_EPS;
    let excess = |x: f64| kl_binary(q, x) - budget;
    if excess(lo) <= 0.0 {
        Ok(lo)
    } else {
        brent_root(excess, lo, q)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kl_of_identical_distributions_is_zero() {
        assert!(kl(&[0.3, 0.7], &[0.3, 0.7]).abs() < 1e-15);
        assert!(kl_trinomial(0.2, 0.3, 0.2, 0.3).abs() < 1e-15);
    }

    #[test]
    fn kl_zero_mass_terms_are_ignored() {
        // q1 = 0 contributes nothing even against p1 = 0.
        let d = kl(&[0.0, 1.0], &[0.0, 1.0]);
        assert!(d.abs() < 1e-15, "got {d}");
        let d = kl_trinomial(0.0, 0.4, 0.2, 0.4);
        assert!(d.abs() < 1e-15, "got {d}");
    }

    #[test]
    fn kl_binary_is_nonnegative_and_asymmetric() {
        let forward = kl_binary(0.2, 0.4);
        let backward = kl_binary(0.4, 0.2);
        assert!(forward > 0.0);
        assert!(backward > 0.0);
        assert!((forward - backward).abs() > 1e-3, "KL is not symmetric");
    }

    #[test]
    fn sup_solution_sits_on_the_budget() {
        for &(q, budget) in &[(0.1, 0.05), (0.3, 0.01), (0.45, 0.2), (0.01, 0.5)] {
            let x = solve_kl_sup(q, budget).unwrap();
            assert!(x > q, "sup limit must exceed q: q={q}, x={x}");
            if x < 1.0 - BOUNDARY_EPS {
                let residual = kl_binary(q, x) - budget;
                assert!(
                    residual.abs() < 1e-9,
                    "q={q} budget={budget}: residual {residual}"
                );
            }
        }
    }

    #[test]
    fn inf_solution_sits_on_the_budget() {
        for &(q, budget) in &[(0.1, 0.05), (0.3, 0.01), (0.45, 0.2)] {
            let x = solve_kl_inf(q, budget).unwrap();
            assert!(x < q, "inf limit must undercut q: q={q}, x={x}");
            if x > BOUNDARY_EPS {
                let residual = kl_binary(q, x) - budget;
                assert!(
                    residual.abs() < 1e-9,
                    "q={q} budget={budget}: residual {residual}"
                );
            }
        }
    }

    #[test]
    fn oversized_budget_clamps_to_domain_boundary() {
        // kl_binary(0.4, 1 - eps) ≈ 0.6 * ln(0.6 / eps) ≈ 12.2, so a
        // budget of 20 can never bind inside the domain.
        let x = solve_kl_sup(0.4, 20.0).unwrap();
        assert_eq!(x, 1.0 - BOUNDARY_EPS);
        let x = solve_kl_inf(0.4, 20.0).unwrap();
        assert_eq!(x, BOUNDARY_EPS);
    }

    #[test]
    fn tiny_budget_stays_near_the_empirical_value() {
        let x = solve_kl_sup(0.25, 1e-8).unwrap();
        assert!(x - 0.25 < 1e-3, "near-zero budget drifted to {x}");
    }
}
