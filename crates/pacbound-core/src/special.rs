//! Special mathematical functions.
//!
//! The Lanczos evaluation runs entirely in log space: the complexity
//! term needs `ln Γ(m + 1)` for sample sizes in the millions, far past
//! where Γ itself overflows an `f64`.

const SQRT_2PI: f64 = 2.506_628_274_631_000_7;
const LANCZOS_G: f64 = 7.0;
const LANCZOS_COEFFS: [f64; 9] = [
    0.999_999_999_999_809_9,
    676.520_368_121_885_1,
    -1_259.139_216_722_402_8,
    771.323_428_777_653_1,
    -176.615_029_162_140_6,
    12.507_343_278_686_905,
    -0.138_571_095_265_720_12,
    9.984_369_578_019_572e-6,
    1.505_632_735_149_311_6e-7,
];

/// Natural log of the gamma function for positive `x`.
#[inline]
pub fn ln_gamma(x: f64) -> f64 {
    if x < 0.5 {
        // Reflection formula: ln Γ(x) = ln(π / sin(πx)) - ln Γ(1 - x)
        let s = (std::f64::consts::PI * x).sin();
        return (std::f64::consts::PI / s.abs()).ln() - ln_gamma(1.0 - x);
    }

    let z = x - 1.0;
    let mut acc = LANCZOS_COEFFS[0];
    for (i, coeff) in LANCZOS_COEFFS.iter().enumerate().skip(1) {
        acc += coeff / (z + i as f64);
    }
    let t = z + LANCZOS_G + 0.5;
    SQRT_2PI.ln() + (z + 0.5) * t.ln() - t + acc.ln()
}

/// Complexity term `xi(m)` inflating the confidence part of a bound for
/// the union over the `m + 1` empirical risk values reachable with `m`
/// samples:
///
/// ```text
/// xi(m) = 2 + Σ_{k=1}^{m-1} C(m,k) (k/m)^k (1 - k/m)^(m-k)
/// ```
///
/// Each summand is assembled in log space (log-gamma binomial
/// coefficient plus the two power terms) and exponentiated last, so the
/// sum stays finite for `m` well past 10^6. Grows like `sqrt(m)`.
pub fn xi(m: u64) -> f64 {
    let mf = m as f64;
    let ln_m_factorial = ln_gamma(mf + 1.0);
    let mut sum = 0.0;
    for k in 1..m {
        let kf = k as f64;
        let frac = kf / mf;
        let ln_term = ln_m_factorial - ln_gamma(kf + 1.0) - ln_gamma(mf - kf + 1.0)
            + kf * frac.ln()
            + (mf - kf) * (1.0 - frac).ln();
        sum += ln_term.exp();
    }
    2.0 + sum
}
