//! Published PAC-Bayesian bounds on the majority-vote (Bayes) risk.
//!
//! Each bound is a thin formula over the engine: validate the empirical
//! inputs, compute the complexity-inflated divergence budget, then
//! either invert the binary KL (bounds zero and one) or run the
//! constrained joint optimization (bound two). Invalid inputs and an
//! infeasible optimization region are non-fatal: they yield the
//! recognizable trivial bound `1.0` together with a structured reason
//! in [`RiskBound::vacuity`]. Solver non-convergence is a defect in an
//! upstream domain computation and propagates as
//! [`SolveError`](crate::solve::SolveError).

use serde::Serialize;
use thiserror::Error;

use crate::cbound::{ConstrainedMax, c_bound, maximize_c_bound_under_constraints};
use crate::divergence::{solve_kl_inf, solve_kl_sup};
use crate::solve::SolveError;
use crate::special::xi;

/// Default number of labeled training examples.
pub const DEFAULT_M: u64 = 1_000;
/// Default number of unlabeled training examples.
pub const DEFAULT_M_PRIME: u64 = 100_000;
/// Default divergence between the prior and posterior over voters.
pub const DEFAULT_KLQP: f64 = 5.0;
/// Default confidence parameter.
pub const DEFAULT_DELTA: f64 = 0.05;

/// The trivial bound: no information beyond chance.
pub const TRIVIAL_BOUND: f64 = 1.0;

/// Empirical measurements and confidence settings feeding a bound.
///
/// Parameters are named and ordered; bounds that do not use a field
/// ignore it. `disagreement` is optional because the simplest bound
/// does not measure it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BoundParams {
    /// Empirical Gibbs risk on the training set, in `[0, 0.5)`.
    pub gibbs_risk: f64,
    /// Empirical expected disagreement on the training set, in
    /// `[0, 0.5)` and at most `2 * risk * (1 - risk)`.
    pub disagreement: Option<f64>,
    /// Number of labeled training examples.
    pub m: u64,
    /// Number of unlabeled training examples (semi-supervised bound).
    pub m_prime: u64,
    /// KL divergence between the prior and posterior over voters.
    pub kl_qp: f64,
    /// Confidence parameter, in `(0, 0.5)`.
    pub delta: f64,
}

impl BoundParams {
    /// Parameters for a given empirical Gibbs risk, everything else at
    /// its default.
    pub fn new(gibbs_risk: f64) -> Self {
        Self {
            gibbs_risk,
            disagreement: None,
            m: DEFAULT_M,
            m_prime: DEFAULT_M_PRIME,
            kl_qp: DEFAULT_KLQP,
            delta: DEFAULT_DELTA,
        }
    }
}

/// A violated validation rule. The `Display` text names the failed
/// condition and the offending value.
#[derive(Debug, Clone, Copy, PartialEq, Error, Serialize)]
#[serde(tag = "rule")]
pub enum InputError {
    #[error("empirical_gibbs_risk must lie in [0.0, 0.5), got {value}")]
    GibbsRiskRange { value: f64 },
    #[error("empirical_disagreement must lie in [0.0, 0.5), got {value}")]
    DisagreementRange { value: f64 },
    #[error(
        "invalid variance: empirical_disagreement {disagreement} exceeds 2*risk*(1-risk) = {limit}"
    )]
    DisagreementVariance { disagreement: f64, limit: f64 },
    #[error("this bound requires an empirical_disagreement")]
    DisagreementMissing,
    #[error("m must be strictly positive")]
    SampleSizeZero,
    #[error("m_prime must be strictly positive")]
    UnlabeledSampleSizeZero,
    #[error("KLQP must be non-negative, got {value}")]
    DivergenceNegative { value: f64 },
    #[error("delta must lie in (0.0, 0.5), got {value}")]
    DeltaRange { value: f64 },
}

/// Why a computation fell back to the trivial bound.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind")]
pub enum Vacuity {
    /// A validation rule failed; no numeric work was performed.
    InvalidInput { reason: InputError },
    /// The KL-constrained feasible region forces the worst case.
    InfeasibleRegion,
}

/// A guaranteed upper limit on the true Bayes risk.
///
/// `value` is always in `[0, 1]`; it is exactly [`TRIVIAL_BOUND`]
/// whenever `vacuity` is set, so numeric consumers can keep treating
/// `1.0` as the no-information sentinel while richer callers inspect
/// the reason.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RiskBound {
    pub value: f64,
    pub vacuity: Option<Vacuity>,
}

impl RiskBound {
    fn informative(value: f64) -> Self {
        Self {
            value,
            vacuity: None,
        }
    }

    fn vacuous(reason: Vacuity) -> Self {
        Self {
            value: TRIVIAL_BOUND,
            vacuity: Some(reason),
        }
    }

    pub fn is_vacuous(&self) -> bool {
        self.vacuity.is_some()
    }
}

/// Check every applicable validation rule, reporting the first
/// violation. `needs_m_prime` is set by the semi-supervised bound.
fn validate(params: &BoundParams, needs_m_prime: bool) -> Result<(), InputError> {
    if params.gibbs_risk < 0.0 || params.gibbs_risk >= 0.5 {
        return Err(InputError::GibbsRiskRange {
            value: params.gibbs_risk,
        });
    }
    if let Some(d) = params.disagreement {
        if d < 0.0 || d >= 0.5 {
            return Err(InputError::DisagreementRange { value: d });
        }
        let limit = 2.0 * params.gibbs_risk * (1.0 - params.gibbs_risk);
        if d > limit {
            return Err(InputError::DisagreementVariance {
                disagreement: d,
                limit,
            });
        }
    }
    if params.m == 0 {
        return Err(InputError::SampleSizeZero);
    }
    if needs_m_prime && params.m_prime == 0 {
        return Err(InputError::UnlabeledSampleSizeZero);
    }
    if params.kl_qp < 0.0 {
        return Err(InputError::DivergenceNegative {
            value: params.kl_qp,
        });
    }
    if params.delta <= 0.0 || params.delta >= 0.5 {
        return Err(InputError::DeltaRange {
            value: params.delta,
        });
    }
    Ok(())
}

/// Disagreement extraction for the bounds that require it, folded into
/// the vacuous-input channel when absent.
fn require_disagreement(params: &BoundParams) -> Result<f64, Vacuity> {
    params.disagreement.ok_or(Vacuity::InvalidInput {
        reason: InputError::DisagreementMissing,
    })
}

/// Bound zero: twice an upper confidence limit on the Gibbs risk.
///
/// The simplest published bound. Inflates the confidence term by
/// `xi(m)`, inverts the binary KL upward from the empirical Gibbs risk
/// and doubles the result (clipped at one half, where the factor-two
/// argument saturates). Ignores `disagreement` beyond validating it
/// when present.
pub fn pac_bound_zero(params: &BoundParams) -> Result<RiskBound, SolveError> {
    if let Err(reason) = validate(params, false) {
        return Ok(RiskBound::vacuous(Vacuity::InvalidInput { reason }));
    }

    let m = params.m as f64;
    let rhs = (params.kl_qp + (xi(params.m) / params.delta).ln()) / m;
    let sup_risk = solve_kl_sup(params.gibbs_risk, rhs)?.min(0.5);

    Ok(RiskBound::informative(2.0 * sup_risk))
}

/// Bound one: the C-Bound over separate confidence limits.
///
/// Upper-bounds the Gibbs risk and lower-bounds the expected
/// disagreement, each by a binary KL inversion at its own inflated
/// budget, then evaluates the C-Bound at that worst pair.
pub fn pac_bound_one(params: &BoundParams) -> Result<RiskBound, SolveError> {
    let disagreement = match require_disagreement(params) {
        Ok(d) => d,
        Err(v) => return Ok(RiskBound::vacuous(v)),
    };
    if let Err(reason) = validate(params, false) {
        return Ok(RiskBound::vacuous(Vacuity::InvalidInput { reason }));
    }

    let m = params.m as f64;
    let xi_m = xi(params.m);

    let rhs = (params.kl_qp + (2.0 * xi_m / params.delta).ln()) / m;
    let sup_risk = solve_kl_sup(params.gibbs_risk, rhs)?.min(0.5);

    let rhs = (2.0 * params.kl_qp + (2.0 * xi_m / params.delta).ln()) / m;
    let inf_disagreement = solve_kl_inf(disagreement, rhs)?;

    Ok(RiskBound::informative(c_bound(sup_risk, inf_disagreement)))
}

/// Bound one prime: the semi-supervised variant of bound one.
///
/// The Gibbs-risk limit uses the `m` labeled examples; the
/// disagreement limit uses the `m_prime` unlabeled examples, which are
/// typically far more plentiful and tighten the C-Bound's denominator.
pub fn pac_bound_one_prime(params: &BoundParams) -> Result<RiskBound, SolveError> {
    let disagreement = match require_disagreement(params) {
        Ok(d) => d,
        Err(v) => return Ok(RiskBound::vacuous(v)),
    };
    if let Err(reason) = validate(params, true) {
        return Ok(RiskBound::vacuous(Vacuity::InvalidInput { reason }));
    }

    let m = params.m as f64;
    let rhs = (params.kl_qp + (2.0 * xi(params.m) / params.delta).ln()) / m;
    let sup_risk = solve_kl_sup(params.gibbs_risk, rhs)?.min(0.5);

    let m_prime = params.m_prime as f64;
    let rhs = (2.0 * params.kl_qp + (2.0 * xi(params.m_prime) / params.delta).ln()) / m_prime;
    let inf_disagreement = solve_kl_inf(disagreement, rhs)?;

    Ok(RiskBound::informative(c_bound(sup_risk, inf_disagreement)))
}

/// Bound two: the C-Bound maximized over a joint confidence region.
///
/// Bounds the disagreement and the joint error *simultaneously*: the
/// true pair lives in a trinomial-KL ball around the empirical pair,
/// and the bound is the worst C-Bound value over that ball intersected
/// with the feasibility constraints. Tighter than bound one when the
/// two estimates are strongly coupled.
pub fn pac_bound_two(params: &BoundParams) -> Result<RiskBound, SolveError> {
    let disagreement = match require_disagreement(params) {
        Ok(d) => d,
        Err(v) => return Ok(RiskBound::vacuous(v)),
    };
    if let Err(reason) = validate(params, false) {
        return Ok(RiskBound::vacuous(Vacuity::InvalidInput { reason }));
    }

    let joint_error = params.gibbs_risk - disagreement / 2.0;
    let m = params.m as f64;
    let rhs = (2.0 * params.kl_qp + ((xi(params.m) + m) / params.delta).ln()) / m;

    match maximize_c_bound_under_constraints(disagreement, joint_error, rhs, 0.5)? {
        ConstrainedMax::Infeasible => Ok(RiskBound::vacuous(Vacuity::InfeasibleRegion)),
        ConstrainedMax::Bounded(value) => Ok(RiskBound::informative(value)),
    }
}
