//! End-to-end scenarios over the published bounds: reference inputs,
//! cross-bound consistency, degenerate and infeasible regions, and the
//! invalid-input sentinel. Deterministic, no fixtures.

use pacbound_core::{
    BoundParams, TRIVIAL_BOUND, Vacuity, kl_binary, pac_bound_one, pac_bound_one_prime,
    pac_bound_two, pac_bound_zero, solve_kl_inf, solve_kl_sup,
};

fn params(risk: f64, disagreement: Option<f64>) -> BoundParams {
    let mut p = BoundParams::new(risk);
    p.disagreement = disagreement;
    p
}

#[test]
fn bound_zero_reference_scenario() {
    // risk = 0.3, m = 1000, KLQP = 5.0, delta = 0.05
    let b = pac_bound_zero(&params(0.3, None)).unwrap();
    assert!(!b.is_vacuous());
    assert!(
        b.value > 0.6 && b.value < 1.0,
        "expected a bound strictly between 2*risk and 1.0, got {}",
        b.value
    );
}

#[test]
fn every_bound_stays_in_unit_interval() {
    let scenarios = [
        (0.1, 0.1),
        (0.2, 0.25),
        (0.3, 0.3),
        (0.45, 0.49),
        (0.01, 0.0),
    ];
    for (risk, d) in scenarios {
        let p = params(risk, Some(d));
        for b in [
            pac_bound_zero(&p).unwrap(),
            pac_bound_one(&p).unwrap(),
            pac_bound_one_prime(&p).unwrap(),
            pac_bound_two(&p).unwrap(),
        ] {
            assert!(
                (0.0..=1.0).contains(&b.value),
                "risk={risk} d={d}: bound {} outside [0,1]",
                b.value
            );
        }
    }
}

#[test]
fn one_prime_with_matching_sample_sizes_reduces_to_one() {
    let mut p = params(0.25, Some(0.3));
    p.m_prime = p.m;
    let one = pac_bound_one(&p).unwrap();
    let one_prime = pac_bound_one_prime(&p).unwrap();
    assert!(
        (one.value - one_prime.value).abs() < 1e-15,
        "m' = m must collapse the semi-supervised bound onto bound one: {} vs {}",
        one.value,
        one_prime.value
    );
}

#[test]
fn unlabeled_data_tightens_the_semi_supervised_bound() {
    let mut few = params(0.3, Some(0.3));
    few.m_prime = few.m;
    let mut many = params(0.3, Some(0.3));
    many.m_prime = 100_000;

    let loose = pac_bound_one_prime(&few).unwrap().value;
    let tight = pac_bound_one_prime(&many).unwrap().value;
    assert!(
        tight < loose,
        "100k unlabeled examples should tighten the bound: {tight} vs {loose}"
    );
}

#[test]
fn joint_bound_beats_separate_limits_on_the_reference_scenario() {
    let p = params(0.3, Some(0.3));
    let one = pac_bound_one(&p).unwrap().value;
    let two = pac_bound_two(&p).unwrap().value;
    assert!(
        two < one,
        "jointly bounding disagreement and joint error should win here: two={two} one={one}"
    );
}

#[test]
fn zero_disagreement_flows_through_the_joint_optimizer() {
    // d̂ = 0 takes the degenerate inner bracket (d_min = 0, no lower
    // root-find) and must still return a usable bound.
    let b = pac_bound_two(&params(0.3, Some(0.0))).unwrap();
    assert!(!b.is_vacuous());
    assert!(
        b.value > 0.0 && b.value <= TRIVIAL_BOUND,
        "degenerate disagreement produced {}",
        b.value
    );
}

#[test]
fn small_sample_with_huge_divergence_is_infeasible() {
    // m = 10 with KLQP = 20 blows the budget past the Gibbs-risk
    // boundary point: the feasible region collapses.
    let mut p = params(0.3, Some(0.3));
    p.m = 10;
    p.kl_qp = 20.0;
    let b = pac_bound_two(&p).unwrap();
    assert_eq!(b.value, TRIVIAL_BOUND);
    assert_eq!(b.vacuity, Some(Vacuity::InfeasibleRegion));
}

#[test]
fn invalid_inputs_return_exactly_the_trivial_bound() {
    let cases: Vec<BoundParams> = vec![
        params(0.6, None),
        params(-0.1, None),
        params(0.3, Some(0.55)),
        params(0.3, Some(-0.01)),
        {
            let mut p = params(0.3, None);
            p.delta = 0.9;
            p
        },
        {
            let mut p = params(0.3, None);
            p.kl_qp = -2.0;
            p
        },
        {
            let mut p = params(0.3, None);
            p.m = 0;
            p
        },
    ];
    for p in cases {
        let b = pac_bound_zero(&p).unwrap();
        assert_eq!(b.value, TRIVIAL_BOUND, "params {p:?} must be vacuous");
        assert!(b.is_vacuous());
    }
}

#[test]
fn inverter_round_trips_the_budget_across_a_grid() {
    for &q in &[0.05, 0.15, 0.25, 0.35, 0.45] {
        for &budget in &[1e-4, 1e-3, 1e-2, 0.1] {
            let sup = solve_kl_sup(q, budget).unwrap();
            assert!(sup > q);
            assert!(
                (kl_binary(q, sup) - budget).abs() < 1e-8,
                "sup inversion drifted: q={q} budget={budget}"
            );

            let inf = solve_kl_inf(q, budget).unwrap();
            assert!(inf < q);
            if inf > 1e-9 {
                assert!(
                    (kl_binary(q, inf) - budget).abs() < 1e-8,
                    "inf inversion drifted: q={q} budget={budget}"
                );
            }
        }
    }
}

#[test]
fn bound_calls_are_independent_across_threads() {
    // Pure functions of their inputs: a batch may fan out with zero
    // coordination and must agree with the sequential answers.
    let sequential: Vec<f64> = (1..8)
        .map(|i| {
            pac_bound_two(&params(0.05 * i as f64, Some(0.04 * i as f64)))
                .unwrap()
                .value
        })
        .collect();

    let parallel: Vec<f64> = std::thread::scope(|scope| {
        let handles: Vec<_> = (1..8)
            .map(|i| {
                scope.spawn(move || {
                    pac_bound_two(&params(0.05 * i as f64, Some(0.04 * i as f64)))
                        .unwrap()
                        .value
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    assert_eq!(sequential, parallel);
}
