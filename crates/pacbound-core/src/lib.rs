//! # PAC-Bayesian Majority-Vote Risk Bounds
//!
//! Statistical upper bounds on the risk of a weighted-majority-vote
//! classifier, computed from empirical measurements: the Gibbs risk of
//! a randomly drawn voter, the expected disagreement between two
//! voters, the sample size, the prior-posterior divergence over the
//! voter set, and a confidence parameter.
//!
//! ## Mathematical Foundation
//!
//! A PAC-Bayesian bound confines the true value of a Bernoulli-like
//! parameter to a KL-divergence ball around its empirical estimate:
//! with probability at least `1 - δ`,
//!
//! ```text
//! KL(empirical ‖ true) <= (complexity + ln(xi(m)/δ)) / m
//! ```
//!
//! Inverting that inequality (per parameter, or jointly over the
//! (disagreement, joint error) pair) and pushing the worst admissible
//! value through the C-Bound yields the published bounds in
//! [`bounds`].
//!
//! ## Layout
//!
//! - [`divergence`] — KL divergence and its one-sided binary inversion
//! - [`special`] — log-gamma and the `xi(m)` complexity term
//! - [`solve`] — Brent root finding and bounded scalar minimization
//! - [`cbound`] — the C-Bound and its KL-constrained maximization
//! - [`bounds`] — input validation and the published bound formulas
//!
//! Everything is a pure function of its inputs: no global state, no
//! I/O, no locking. Batch callers may evaluate independent bounds in
//! parallel with zero coordination.

pub mod bounds;
pub mod cbound;
pub mod divergence;
pub mod solve;
pub mod special;

pub use bounds::{
    BoundParams, InputError, RiskBound, TRIVIAL_BOUND, Vacuity, pac_bound_one,
    pac_bound_one_prime, pac_bound_two, pac_bound_zero,
};
pub use cbound::{ConstrainedMax, c_bound, maximize_c_bound_under_constraints};
pub use divergence::{kl, kl_binary, kl_trinomial, solve_kl_inf, solve_kl_sup};
pub use solve::{ScalarMinimum, SolveError, brent_root, minimize_bounded};
pub use special::{ln_gamma, xi};
