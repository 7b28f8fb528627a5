//! Scalar root finding and bounded minimization.
//!
//! Two classic kernels back every bound computation in this crate:
//!
//! - [`brent_root`] — Brent-Dekker bracketed root finding. Combines
//!   bisection with secant / inverse-quadratic steps, keeping the
//!   bisection guarantee while converging superlinearly on smooth
//!   functions. Requires a sign change across the bracket.
//! - [`minimize_bounded`] — Brent bounded scalar minimization (golden
//!   section plus successive parabolic interpolation). Assumes a
//!   unimodal objective over the closed interval; needs no derivative
//!   and no bracketing triple.
//!
//! Both run to a fixed tolerance under an iteration cap. Hitting the
//! cap, or handing in a bracket without a sign change, indicates a
//! defect in the caller's domain computation, so both conditions
//! surface as [`SolveError`] instead of a silently wrong value.

use thiserror::Error;

/// Absolute x-tolerance for root finding.
const ROOT_XTOL: f64 = 2e-12;

/// Iteration cap for root finding.
const ROOT_MAX_ITERS: u32 = 100;

/// Absolute x-tolerance for bounded minimization.
const MIN_XATOL: f64 = 1e-5;

/// Objective-evaluation cap for bounded minimization.
const MIN_MAX_EVALS: u32 = 500;

/// Golden-section fraction, (3 - sqrt(5)) / 2.
const GOLDEN_MEAN: f64 = 0.381_966_011_250_105_1;

/// Failure of a scalar solver to converge, or a precondition the
/// caller's bracket computation was supposed to establish.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum SolveError {
    #[error("no sign change across bracket [{lo}, {hi}]")]
    NoSignChange { lo: f64, hi: f64 },
    #[error("interval [{lo}, {hi}] is inverted")]
    InvertedInterval { lo: f64, hi: f64 },
    #[error("no convergence within {evals} evaluations")]
    IterationsExhausted { evals: u32 },
}

/// Minimizer location and objective value returned by [`minimize_bounded`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScalarMinimum {
    pub x: f64,
    pub value: f64,
}

/// Find a root of `f` inside `[lo, hi]` via the Brent-Dekker method.
///
/// `f(lo)` and `f(hi)` must differ in sign (an exact zero at either
/// endpoint is accepted). Converges to roughly `ROOT_XTOL` absolute
/// accuracy plus a few ulps of the root's magnitude.
pub fn brent_root<F>(f: F, lo: f64, hi: f64) -> Result<f64, SolveError>
where
    F: Fn(f64) -> f64,
{
    let mut a = lo;
    let mut b = hi;
    let mut fa = f(a);
    let mut fb = f(b);

    if fa == 0.0 {
        return Ok(a);
    }
    if fb == 0.0 {
        return Ok(b);
    }
    if (fa > 0.0) == (fb > 0.0) {
        return Err(SolveError::NoSignChange { lo, hi });
    }

    let mut c = a;
    let mut fc = fa;
    let mut d = b - a;
    let mut e = d;

    for _ in 0..ROOT_MAX_ITERS {
        if (fb > 0.0) == (fc > 0.0) {
            // Re-bracket: c must stay on the other side of the root.
            c = a;
            fc = fa;
            d = b - a;
            e = d;
        }
        if fc.abs() < fb.abs() {
            a = b;
            b = c;
            c = a;
            fa = fb;
            fb = fc;
            fc = fa;
        }

        let tol1 = 2.0 * f64::EPSILON * b.abs() + 0.5 * ROOT_XTOL;
        let xm = 0.5 * (c - b);
        if xm.abs() <= tol1 || fb == 0.0 {
            return Ok(b);
        }

        if e.abs() >= tol1 && fa.abs() > fb.abs() {
            // Secant (a == c) or inverse quadratic interpolation.
            let s = fb / fa;
            let mut p;
            let mut q;
            if a == c {
                p = 2.0 * xm * s;
                q = 1.0 - s;
            } else {
                let t = fa / fc;
                let r = fb / fc;
                p = s * (2.0 * xm * t * (t - r) - (b - a) * (r - 1.0));
                q = (t - 1.0) * (r - 1.0) * (s - 1.0);
            }
            if p > 0.0 {
                q = -q;
            }
            p = p.abs();
            let accept_interp = 2.0 * p < (3.0 * xm * q - (tol1 * q).abs()).min((e * q).abs());
            if accept_interp {
                e = d;
                d = p / q;
            } else {
                d = xm;
                e = d;
            }
        } else {
            // Interpolation is shrinking too slowly; bisect.
            d = xm;
            e = d;
        }

        a = b;
        fa = fb;
        if d.abs() > tol1 {
            b += d;
        } else {
            b += tol1.copysign(xm);
        }
        fb = f(b);
    }

    Err(SolveError::IterationsExhausted {
        evals: ROOT_MAX_ITERS,
    })
}

/// Minimize `f` over the closed interval `[lo, hi]` via Brent's method.
///
/// The objective is fallible so that outer searches whose evaluation
/// itself performs root finding can propagate a [`SolveError`] from the
/// inner level. A degenerate interval (`lo == hi`) short-circuits to a
/// single evaluation.
pub fn minimize_bounded<F>(mut f: F, lo: f64, hi: f64) -> Result<ScalarMinimum, SolveError>
where
    F: FnMut(f64) -> Result<f64, SolveError>,
{
    if lo > hi {
        return Err(SolveError::InvertedInterval { lo, hi });
    }

    let sqrt_eps = f64::EPSILON.sqrt();
    let mut a = lo;
    let mut b = hi;

    // xf: best point so far; nfc, fulc: second and third best.
    let mut xf = a + GOLDEN_MEAN * (b - a);
    let mut nfc = xf;
    let mut fulc = xf;
    let mut fx = f(xf)?;
    let mut fnfc = fx;
    let mut ffulc = fx;
    let mut evals: u32 = 1;

    // rat: last step taken; span: step before that (drives the
    // "interpolation must shrink" acceptance test).
    let mut rat = 0.0_f64;
    let mut span = 0.0_f64;

    let mut xm = 0.5 * (a + b);
    let mut tol1 = sqrt_eps * xf.abs() + MIN_XATOL / 3.0;
    let mut tol2 = 2.0 * tol1;

    while (xf - xm).abs() > tol2 - 0.5 * (b - a) {
        let mut golden = true;

        if span.abs() > tol1 {
            // Fit a parabola through (xf, nfc, fulc).
            let r = (xf - nfc) * (fx - ffulc);
            let mut q = (xf - fulc) * (fx - fnfc);
            let mut p = (xf - fulc) * q - (xf - nfc) * r;
            q = 2.0 * (q - r);
            if q > 0.0 {
                p = -p;
            }
            q = q.abs();
            let prev_span = span;
            span = rat;
            if p.abs() < (0.5 * q * prev_span).abs() && p > q * (a - xf) && p < q * (b - xf) {
                golden = false;
                rat = p / q;
                let x = xf + rat;
                // Keep trial points a tolerance away from the bounds.
                if (x - a) < tol2 || (b - x) < tol2 {
                    rat = tol1.copysign(xm - xf);
                }
            }
        }

        if golden {
            span = if xf >= xm { a - xf } else { b - xf };
            rat = GOLDEN_MEAN * span;
        }

        let step = if rat == 0.0 {
            tol1
        } else {
            rat.abs().max(tol1).copysign(rat)
        };
        let x = xf + step;
        let fu = f(x)?;
        evals += 1;

        if fu <= fx {
            if x >= xf {
                a = xf;
            } else {
                b = xf;
            }
            fulc = nfc;
            ffulc = fnfc;
            nfc = xf;
            fnfc = fx;
            xf = x;
            fx = fu;
        } else {
            if x < xf {
                a = x;
            } else {
                b = x;
            }
            if fu <= fnfc || nfc == xf {
                fulc = nfc;
                ffulc = fnfc;
                nfc = x;
                fnfc = fu;
            } else if fu <= ffulc || fulc == xf || fulc == nfc {
                fulc = x;
                ffulc = fu;
            }
        }

        xm = 0.5 * (a + b);
        tol1 = sqrt_eps * xf.abs() + MIN_XATOL / 3.0;
        tol2 = 2.0 * tol1;

        if evals >= MIN_MAX_EVALS {
            return Err(SolveError::IterationsExhausted { evals });
        }
    }

    Ok(ScalarMinimum { x: xf, value: fx })
}
