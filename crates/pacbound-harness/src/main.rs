//! CLI entrypoint for the PAC-Bayesian majority-vote bound calculator.
//!
//! One subcommand per published bound. Positional arguments follow the
//! order `gibbs_risk [disagreement] [m] [m_prime] [KLQP] [delta]` with
//! the usual defaults; every resolved parameter is echoed before the
//! bound so a run is self-describing.

use clap::{Parser, Subcommand};
use serde::Serialize;

use pacbound_core::bounds::{DEFAULT_DELTA, DEFAULT_KLQP, DEFAULT_M, DEFAULT_M_PRIME};
use pacbound_core::{
    BoundParams, RiskBound, Vacuity, pac_bound_one, pac_bound_one_prime, pac_bound_two,
    pac_bound_zero,
};

/// Risk-bound calculator for weighted majority-vote classifiers.
#[derive(Debug, Parser)]
#[command(name = "pacbound")]
#[command(about = "PAC-Bayesian upper bounds on the Bayes risk of a majority vote")]
struct Cli {
    /// Output format: `plain` or `json`.
    #[arg(long, global = true, default_value = "plain")]
    format: String,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Bound the Bayes risk by doubling an upper confidence limit on the
    /// Gibbs risk.
    ///
    /// The confidence limit is the largest risk within the KL-divergence
    /// budget (KLQP + ln(xi(m)/delta)) / m of the empirical Gibbs risk.
    Zero {
        /// Gibbs risk on the training set, in [0.0, 0.5).
        #[arg(value_name = "EMPIRICAL_GIBBS_RISK")]
        gibbs_risk: f64,
        /// Number of training examples.
        #[arg(value_name = "M", default_value_t = DEFAULT_M)]
        m: u64,
        /// KL divergence between prior and posterior over voters.
        #[arg(value_name = "KLQP", default_value_t = DEFAULT_KLQP)]
        kl_qp: f64,
        /// Confidence parameter, in (0.0, 0.5).
        #[arg(value_name = "DELTA", default_value_t = DEFAULT_DELTA)]
        delta: f64,
    },
    /// Bound the Bayes risk with the C-Bound over an upper confidence
    /// limit on the Gibbs risk and a lower one on the disagreement.
    One {
        /// Gibbs risk on the training set, in [0.0, 0.5).
        #[arg(value_name = "EMPIRICAL_GIBBS_RISK")]
        gibbs_risk: f64,
        /// Expected disagreement on the training set, in [0.0, 0.5).
        #[arg(value_name = "EMPIRICAL_DISAGREEMENT")]
        disagreement: f64,
        /// Number of training examples.
        #[arg(value_name = "M", default_value_t = DEFAULT_M)]
        m: u64,
        /// KL divergence between prior and posterior over voters.
        #[arg(value_name = "KLQP", default_value_t = DEFAULT_KLQP)]
        kl_qp: f64,
        /// Confidence parameter, in (0.0, 0.5).
        #[arg(value_name = "DELTA", default_value_t = DEFAULT_DELTA)]
        delta: f64,
    },
    /// Semi-supervised variant of `one`: the disagreement limit uses
    /// m_prime unlabeled examples instead of the m labeled ones.
    OnePrime {
        /// Gibbs risk on the labeled training set, in [0.0, 0.5).
        #[arg(value_name = "EMPIRICAL_GIBBS_RISK")]
        gibbs_risk: f64,
        /// Expected disagreement on the unlabeled set, in [0.0, 0.5).
        #[arg(value_name = "EMPIRICAL_DISAGREEMENT")]
        disagreement: f64,
        /// Number of labeled training examples.
        #[arg(value_name = "M", default_value_t = DEFAULT_M)]
        m: u64,
        /// Number of unlabeled training examples.
        #[arg(value_name = "M_PRIME", default_value_t = DEFAULT_M_PRIME)]
        m_prime: u64,
        /// KL divergence between prior and posterior over voters.
        #[arg(value_name = "KLQP", default_value_t = DEFAULT_KLQP)]
        kl_qp: f64,
        /// Confidence parameter, in (0.0, 0.5).
        #[arg(value_name = "DELTA", default_value_t = DEFAULT_DELTA)]
        delta: f64,
    },
    /// Bound the Bayes risk with the C-Bound maximized over a joint
    /// confidence region on the disagreement and the joint error.
    Two {
        /// Gibbs risk on the training set, in [0.0, 0.5).
        #[arg(value_name = "EMPIRICAL_GIBBS_RISK")]
        gibbs_risk: f64,
        /// Expected disagreement on the training set, in [0.0, 0.5).
        #[arg(value_name = "EMPIRICAL_DISAGREEMENT")]
        disagreement: f64,
        /// Number of training examples.
        #[arg(value_name = "M", default_value_t = DEFAULT_M)]
        m: u64,
        /// KL divergence between prior and posterior over voters.
        #[arg(value_name = "KLQP", default_value_t = DEFAULT_KLQP)]
        kl_qp: f64,
        /// Confidence parameter, in (0.0, 0.5).
        #[arg(value_name = "DELTA", default_value_t = DEFAULT_DELTA)]
        delta: f64,
    },
}

#[derive(Debug, Serialize)]
struct BoundReport<'a> {
    bound: &'a str,
    params: &'a BoundParams,
    #[serde(flatten)]
    result: RiskBound,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Command::Zero {
            gibbs_risk,
            m,
            kl_qp,
            delta,
        } => {
            let mut params = BoundParams::new(gibbs_risk);
            params.m = m;
            params.kl_qp = kl_qp;
            params.delta = delta;

            let echo = [
                ("empirical_gibbs_risk", gibbs_risk.to_string()),
                ("m", m.to_string()),
                ("KLQP", kl_qp.to_string()),
                ("delta", delta.to_string()),
            ];
            let bound = pac_bound_zero(&params)?;
            emit("zero", &params, &echo, bound, &cli.format)
        }
        Command::One {
            gibbs_risk,
            disagreement,
            m,
            kl_qp,
            delta,
        } => {
            let mut params = BoundParams::new(gibbs_risk);
            params.disagreement = Some(disagreement);
            params.m = m;
            params.kl_qp = kl_qp;
            params.delta = delta;

            let echo = [
                ("empirical_gibbs_risk", gibbs_risk.to_string()),
                ("empirical_disagreement", disagreement.to_string()),
                ("m", m.to_string()),
                ("KLQP", kl_qp.to_string()),
                ("delta", delta.to_string()),
            ];
            let bound = pac_bound_one(&params)?;
            emit("one", &params, &echo, bound, &cli.format)
        }
        Command::OnePrime {
            gibbs_risk,
            disagreement,
            m,
            m_prime,
            kl_qp,
            delta,
        } => {
            let mut params = BoundParams::new(gibbs_risk);
            params.disagreement = Some(disagreement);
            params.m = m;
            params.m_prime = m_prime;
            params.kl_qp = kl_qp;
            params.delta = delta;

            let echo = [
                ("empirical_gibbs_risk", gibbs_risk.to_string()),
                ("empirical_disagreement", disagreement.to_string()),
                ("m", m.to_string()),
                ("m_prime", m_prime.to_string()),
                ("KLQP", kl_qp.to_string()),
                ("delta", delta.to_string()),
            ];
            let bound = pac_bound_one_prime(&params)?;
            emit("one-prime", &params, &echo, bound, &cli.format)
        }
        Command::Two {
            gibbs_risk,
            disagreement,
            m,
            kl_qp,
            delta,
        } => {
            let mut params = BoundParams::new(gibbs_risk);
            params.disagreement = Some(disagreement);
            params.m = m;
            params.kl_qp = kl_qp;
            params.delta = delta;

            let echo = [
                ("empirical_gibbs_risk", gibbs_risk.to_string()),
                ("empirical_disagreement", disagreement.to_string()),
                ("m", m.to_string()),
                ("KLQP", kl_qp.to_string()),
                ("delta", delta.to_string()),
            ];
            let bound = pac_bound_two(&params)?;
            emit("two", &params, &echo, bound, &cli.format)
        }
    }
}

fn emit(
    name: &str,
    params: &BoundParams,
    echo: &[(&str, String)],
    bound: RiskBound,
    format: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    match format {
        "plain" => {
            for (key, value) in echo {
                println!("{key} = {value}");
            }
            if let Some(vacuity) = bound.vacuity {
                match vacuity {
                    Vacuity::InvalidInput { reason } => eprintln!("INVALID INPUT: {reason}"),
                    Vacuity::InfeasibleRegion => {
                        eprintln!("infeasible joint confidence region: the trivial bound holds");
                    }
                }
            }
            println!("bayes risk bound = {:.6}", bound.value);
            Ok(())
        }
        "json" => {
            let report = BoundReport {
                bound: name,
                params,
                result: bound,
            };
            println!("{}", serde_json::to_string_pretty(&report)?);
            Ok(())
        }
        other => Err(format!("Unsupported format '{other}', expected plain|json").into()),
    }
}
