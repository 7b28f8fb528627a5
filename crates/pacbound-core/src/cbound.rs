//! The C-Bound and its KL-constrained maximization.
//!
//! ## Mathematical Foundation
//!
//! The C-Bound converts a (Gibbs risk, expected disagreement) pair of a
//! weighted voter set into a bound on the majority vote's risk:
//!
//! ```text
//! C(r, d) = 1 - (1 - 2r)^2 / (1 - 2d)
//! ```
//!
//! The joint optimizer works in the equivalent (joint error `e`,
//! disagreement `d`) parametrization, `r = e + d/2`, and asks: over
//! every true pair the empirical pair `(ê, d̂)` could plausibly have
//! come from — a trinomial-KL ball of a given radius — how bad can the
//! C-Bound get? That worst case is the published risk bound.
//!
//! The feasible region couples a curved KL boundary with three linear
//! or concave constraints (Gibbs risk below one half, non-negative
//! margin variance, an optional cap on the joint error), and the
//! objective is not jointly concave, so the search runs in two levels:
//! an outer scan over `e` and, for each `e`, an inner bounded
//! minimization over the disagreement slice that remains feasible. Both
//! levels exploit unimodality along their axis.

use crate::divergence::{BOUNDARY_EPS, kl_trinomial};
use crate::solve::{SolveError, brent_root, minimize_bounded};

/// The C-Bound: majority-vote risk bound from Gibbs risk and expected
/// disagreement. Callers keep `disagreement` strictly below one half.
pub fn c_bound(gibbs_risk: f64, disagreement: f64) -> f64 {
    1.0 - (1.0 - 2.0 * gibbs_risk).powi(2) / (1.0 - 2.0 * disagreement)
}

/// Result of [`maximize_c_bound_under_constraints`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ConstrainedMax {
    /// Worst feasible C-Bound value, in `[0, 1]`.
    Bounded(f64),
    /// The KL budget is already exceeded where the Gibbs-risk
    /// constraint becomes tight; no feasible point beats chance.
    Infeasible,
}

impl ConstrainedMax {
    /// The bound value, with the infeasible case collapsing to the
    /// trivial `1.0`.
    pub fn value(self) -> f64 {
        match self {
            ConstrainedMax::Bounded(v) => v,
            ConstrainedMax::Infeasible => 1.0,
        }
    }
}

/// Signed slack of the KL constraint at a candidate `(e, d)`: negative
/// inside the budget, positive outside.
fn kl_budget_excess(
    joint_error: f64,
    disagreement: f64,
    empirical_joint_error: f64,
    empirical_disagreement: f64,
    budget: f64,
) -> f64 {
    kl_trinomial(
        empirical_joint_error,
        empirical_disagreement,
        joint_error,
        disagreement,
    ) - budget
}

/// For a fixed joint error `e`, the disagreement minimizing the
/// trinomial divergence from the empirical pair: the line through
/// `(ê, d̂)` and `(1, 0)`.
fn disagreement_minimizing_kl(
    joint_error: f64,
    empirical_joint_error: f64,
    empirical_disagreement: f64,
) -> f64 {
    (joint_error - 1.0) * empirical_disagreement / (empirical_joint_error - 1.0)
}

/// Maximize the C-Bound over the trinomial-KL-constrained region.
///
/// Solves
///
/// ```text
/// max  C(e + d/2, d)
/// s.t. KL(ê, d̂ ‖ e, d) <= budget
///      2e + d < 1
///      d <= 2 (sqrt(e) - e)
///      e <= sup_joint_error
/// ```
///
/// for empirical disagreement `d̂` and empirical joint error `ê`.
/// `sup_joint_error` is `0.5` when no external cap applies.
///
/// Root-finding here presumes the sign changes that the feasibility
/// short-circuit guarantees for validated inputs; a bracket without one
/// surfaces as a [`SolveError`] rather than a silently wrong bound.
pub fn maximize_c_bound_under_constraints(
    empirical_disagreement: f64,
    empirical_joint_error: f64,
    budget: f64,
    sup_joint_error: f64,
) -> Result<ConstrainedMax, SolveError> {
    let d_hat = empirical_disagreement;
    let e_hat = empirical_joint_error;

    // If the KL ball still holds where 2e + d = 1 becomes tight, the
    // worst case is a Gibbs risk of one half and the bound is trivial.
    if d_hat > 0.0 && kl_budget_excess((1.0 - d_hat) / 2.0, d_hat, e_hat, d_hat, budget) < 0.0 {
        return Ok(ConstrainedMax::Infeasible);
    }

    // Largest joint error inside the budget, following for each e the
    // KL-minimizing disagreement so the constraint binds last.
    let e_max = brent_root(
        |e| {
            kl_budget_excess(
                e,
                disagreement_minimizing_kl(e, e_hat, d_hat),
                e_hat,
                d_hat,
                budget,
            )
        },
        e_hat,
        0.5,
    )?;
    let e_max = e_max.min(sup_joint_error);

    // Inner level: worst C-Bound on the feasible disagreement slice at
    // a fixed e. Returns the negated optimum for the outer minimizer.
    let worst_on_slice = |e: f64| -> Result<f64, SolveError> {
        let d_line = disagreement_minimizing_kl(e, e_hat, d_hat);

        let d_min = if d_hat > 0.0 {
            // Budget crossing between the lower singularity and the
            // KL-minimizing disagreement.
            brent_root(
                |d| kl_budget_excess(e, d, e_hat, d_hat, budget),
                BOUNDARY_EPS,
                d_line,
            )?
        } else {
            0.0
        };

        let d_var = 2.0 * (e.sqrt() - e);
        let d_max = if kl_budget_excess(e, d_var, e_hat, d_hat, budget) > 0.0 {
            // KL boundary binds before the margin-variance boundary.
            brent_root(
                |d| kl_budget_excess(e, d, e_hat, d_hat, budget),
                d_line,
                d_var,
            )?
        } else {
            d_var
        };

        // When the variance boundary undercuts the KL-minimizing
        // disagreement both searches converge on the same crossing;
        // keep the slice well-ordered against epsilon-level drift.
        let d_max = d_max.max(d_min);

        let best = minimize_bounded(|d| Ok(-c_bound(e + d / 2.0, d)), d_min, d_max)?;
        Ok(best.value)
    };

    let outer = minimize_bounded(worst_on_slice, e_hat, e_max)?;
    Ok(ConstrainedMax::Bounded((-outer.value).clamp(0.0, 1.0)))
}
