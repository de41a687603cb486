//! Worked scenarios for FDR r-values.

use rv_core::{
    fdr_rvalue, root_tolerance, RValueMethod, RValueSolver, SolverSettings, StudyData,
    TuningParams,
};

fn approx_eq(a: f64, b: f64, tol: f64) -> bool {
    if a.is_nan() || b.is_nan() {
        return false;
    }
    (a - b).abs() <= tol
}

// ============================================================================
// Three-feature study
// ============================================================================

#[test]
fn three_features_large_primary_study() {
    let r = fdr_rvalue(
        &[0.001, 0.01, 0.2],
        &[0.001, 0.02, 0.5],
        1000,
        TuningParams::default(),
    )
    .unwrap();
    assert_eq!(r.len(), 3);
    assert!(r[0] <= r[1] && r[1] <= r[2]);
    assert!(approx_eq(r[2], 1.0, 1e-12));
}

#[test]
fn three_features_small_primary_study() {
    let r = fdr_rvalue(
        &[0.001, 0.01, 0.2],
        &[0.001, 0.02, 0.5],
        10,
        TuningParams::default(),
    )
    .unwrap();
    // Feature 0 is small, on the scale of its own p-values.
    assert!(r[0] < 0.01, "r[0] = {}", r[0]);
    assert!(r[0] <= r[1] && r[1] <= r[2]);
    assert_eq!(r[2], 1.0);
}

#[test]
fn single_weak_feature_is_one() {
    let r = fdr_rvalue(&[0.5], &[0.5], 1, TuningParams::default()).unwrap();
    assert_eq!(r, vec![1.0]);
}

#[test]
fn null_follow_up_hits_boundary() {
    let p1 = vec![0.2, 0.4, 0.3, 0.6];
    let p2 = vec![1.0; 4];
    let study = StudyData::new(p1, p2, 50).unwrap();
    let sol = RValueSolver::new(&study, TuningParams::default(), SolverSettings::default())
        .solve()
        .unwrap();
    for f in &sol.features {
        assert_eq!(f.rvalue, 1.0);
        assert_eq!(f.method, RValueMethod::Boundary);
    }
}

#[test]
fn zero_p_values_give_zero_r_value() {
    // Both scores vanish, so e(x) = 0 and the fixed point is 0.
    let r = fdr_rvalue(&[0.0, 0.3], &[0.0, 0.9], 2, TuningParams::default()).unwrap();
    assert_eq!(r[0], 0.0);
    assert_eq!(r[1], 1.0);
}

// ============================================================================
// Tolerance
// ============================================================================

#[test]
fn tiny_p_value_tightens_every_search() {
    let loose = StudyData::new(vec![0.001, 0.01, 0.2], vec![0.001, 0.02, 0.5], 10).unwrap();
    let tight = StudyData::new(vec![0.001, 0.01, 0.2], vec![1e-8, 0.02, 0.5], 10).unwrap();
    let params = TuningParams::default();
    let settings = SolverSettings::default();

    let loose_solver = RValueSolver::new(&loose, params, settings);
    let tight_solver = RValueSolver::new(&tight, params, settings);
    assert_eq!(loose_solver.tolerance(), 1e-4);
    assert_eq!(tight_solver.tolerance(), 1e-8);

    let sol = tight_solver.solve().unwrap();
    assert_eq!(sol.tolerance, 1e-8);
    // Feature 1 did not change, but it is solved at the tighter tolerance.
    assert!(approx_eq(sol.features[1].rvalue, 0.06, 1e-10));
}

#[test]
fn tolerance_helper_matches_solver() {
    let study = StudyData::new(vec![0.3, 0.05], vec![0.002, 0.7], 20).unwrap();
    let solver = RValueSolver::new(&study, TuningParams::default(), SolverSettings::default());
    assert_eq!(
        solver.tolerance(),
        root_tolerance(study.p1(), study.p2(), 1e-4)
    );
}

// ============================================================================
// Discontinuous residual
// ============================================================================

#[test]
fn rank_jump_is_not_mistaken_for_convergence() {
    // g(x, 0) drops from about +0.003 to -0.198 near x = 0.598 where the ranks
    // change; a secant step across that jump must not end the search early.
    let study = StudyData::new(
        vec![
            0.22799644832691035,
            0.08497108445096604,
            0.13033703034306526,
            0.7919634475768877,
            0.008005107383407593,
            0.36032575454896437,
        ],
        vec![
            0.0014662703708851878,
            0.0003247691063713912,
            0.10014172081991347,
            0.029891543538455093,
            0.2597465007687442,
            0.05517339971449301,
        ],
        6,
    )
    .unwrap();
    let solver = RValueSolver::new(&study, TuningParams::default(), SolverSettings::default());
    let tol = solver.tolerance();
    let f = solver.solve_feature(0, tol).unwrap();
    assert!(matches!(
        f.method,
        RValueMethod::RootSearch { converged: true, .. }
    ));
    assert!(approx_eq(f.rvalue, 0.598062, 1e-4), "r = {}", f.rvalue);

    let g = |x: f64| solver.statistic().residual(x, 0);
    let w = tol * f.rvalue;
    assert!(g(f.rvalue - w) > 0.0);
    assert!(g(f.rvalue + w) < 0.0);
}

// ============================================================================
// Tuning
// ============================================================================

#[test]
fn fixed_point_holds_at_solution() {
    let study = StudyData::new(
        vec![0.0001, 0.0004, 0.002, 0.03],
        vec![0.001, 0.003, 0.01, 0.4],
        40,
    )
    .unwrap();
    let solver = RValueSolver::new(&study, TuningParams::default(), SolverSettings::default());
    let sol = solver.solve().unwrap();
    for f in &sol.features {
        if let RValueMethod::RootSearch { converged: true, .. } = f.method {
            let e = solver.statistic().evaluate(f.rvalue)[f.index];
            assert!(
                approx_eq(e, f.rvalue, 1e-6),
                "feature {}: e({}) = {}",
                f.index,
                f.rvalue,
                e
            );
        }
    }
}

#[test]
fn custom_tuning_is_respected() {
    let p1 = [0.001, 0.01, 0.2];
    let p2 = [0.001, 0.02, 0.5];
    let default = fdr_rvalue(&p1, &p2, 10, TuningParams::default()).unwrap();
    let custom = fdr_rvalue(&p1, &p2, 10, TuningParams::new(0.5, 0.0).unwrap()).unwrap();
    // l00 = 0 removes the null-null discount on the primary weight.
    assert_ne!(default, custom);
    for v in custom {
        assert!((0.0..=1.0).contains(&v));
    }
}
