use super::*;
use crate::error::SolveError;
use crate::villages::{draw_villages, ReplayToken, VillageCfg};
use nalgebra::Vector2;
use proptest::prelude::*;

const TOL: f64 = 1e-4;

fn p(x: f64, y: f64) -> Point2 {
    Vector2::new(x, y)
}

/// Exact minimum enclosing circle by incremental boundary fixing (Welzl, iterative).
fn exact_mec(pts: &[Point2]) -> (Point2, f64) {
    let eps = 1e-12;
    let mut c = pts[0];
    let mut r = 0.0;
    for i in 1..pts.len() {
        if (pts[i] - c).norm() <= r + eps {
            continue;
        }
        c = pts[i];
        r = 0.0;
        for j in 0..i {
            if (pts[j] - c).norm() <= r + eps {
                continue;
            }
            c = (pts[i] + pts[j]) * 0.5;
            r = (pts[i] - c).norm();
            for k in 0..j {
                if (pts[k] - c).norm() <= r + eps {
                    continue;
                }
                (c, r) = circle_through(pts[i], pts[j], pts[k]);
            }
        }
    }
    (c, r)
}

fn circle_through(a: Point2, b: Point2, c: Point2) -> (Point2, f64) {
    let d = 2.0 * (a.x * (b.y - c.y) + b.x * (c.y - a.y) + c.x * (a.y - b.y));
    if d.abs() < 1e-14 {
        // Collinear: the widest pair spans the circle.
        let pairs = [(a, b), (a, c), (b, c)];
        let (u, v) = pairs
            .into_iter()
            .max_by(|l, r| (l.0 - l.1).norm().partial_cmp(&(r.0 - r.1).norm()).unwrap())
            .unwrap();
        let m = (u + v) * 0.5;
        return (m, (u - m).norm());
    }
    let (a2, b2, c2) = (a.norm_squared(), b.norm_squared(), c.norm_squared());
    let ux = (a2 * (b.y - c.y) + b2 * (c.y - a.y) + c2 * (a.y - b.y)) / d;
    let uy = (a2 * (c.x - b.x) + b2 * (a.x - c.x) + c2 * (b.x - a.x)) / d;
    let center = p(ux, uy);
    (center, (a - center).norm())
}

#[test]
fn single_point_has_zero_radius() {
    let s = solve(&[p(3.5, -1.25)], &SolveCfg::default()).unwrap();
    assert!(s.radius < TOL);
    assert!((s.location - p(3.5, -1.25)).norm() < TOL);
    assert_eq!(s.active, vec![0]);
    assert!(s.satisfies_invariants(TOL));
}

#[test]
fn coincident_points_collapse() {
    let pts = vec![p(1.0, 2.0); 4];
    let s = solve(&pts, &SolveCfg::default()).unwrap();
    assert!(s.radius < TOL);
    assert!((s.location - p(1.0, 2.0)).norm() < TOL);
    assert_eq!(s.active, vec![0, 1, 2, 3]);
}

#[test]
fn square_center_with_all_corners_active() {
    let pts = [p(0.0, 0.0), p(2.0, 0.0), p(2.0, 2.0), p(0.0, 2.0)];
    let s = solve(&pts, &SolveCfg::default()).unwrap();
    assert!((s.location - p(1.0, 1.0)).norm() < TOL);
    assert!((s.radius - std::f64::consts::SQRT_2).abs() < TOL);
    assert_eq!(s.active, vec![0, 1, 2, 3]);
    assert!(s.satisfies_invariants(TOL));
}

#[test]
fn large_and_offset_squares_keep_all_corners_active() {
    for (side, offset) in [(2e4, 0.0), (2e3, 1e6), (2.0, 1e5)] {
        let pts = [
            p(offset, offset),
            p(offset + side, offset),
            p(offset + side, offset + side),
            p(offset, offset + side),
        ];
        let s = solve(&pts, &SolveCfg::default()).unwrap();
        assert_eq!(s.active, vec![0, 1, 2, 3], "side {side} offset {offset}");
        assert!(s.satisfies_invariants(TOL), "side {side} offset {offset}");
        assert_eq!(s.radius, s.max_distance());
        let half_diag = side * std::f64::consts::FRAC_1_SQRT_2;
        assert!((s.radius - half_diag).abs() <= TOL * half_diag.max(1.0));
    }
}

#[test]
fn radius_is_the_largest_recomputed_distance() {
    let pts = draw_villages(VillageCfg::default(), ReplayToken::new(11));
    let s = solve(&pts, &SolveCfg::default()).unwrap();
    assert_eq!(s.radius, s.max_distance());
    assert!((s.bound - s.radius).abs() < TOL);
    let far = s
        .distances
        .iter()
        .position(|&d| d == s.radius)
        .unwrap();
    assert!(s.active.contains(&far));
}

#[test]
fn two_points_use_midpoint() {
    // Two-point circles leave the objective flat across the diameter, so the
    // center is only pinned to about the square root of the gap tolerance.
    let s = solve(&[p(-1.0, 3.0), p(5.0, -5.0)], &SolveCfg::default()).unwrap();
    assert!((s.location - p(2.0, -1.0)).norm() < 1e-3);
    assert!((s.radius - 5.0).abs() < TOL);
    assert_eq!(s.active, vec![0, 1]);
}

#[test]
fn obtuse_triangle_is_spanned_by_longest_edge() {
    let s = solve(&[p(0.0, 0.0), p(4.0, 0.0), p(1.0, 1.0)], &SolveCfg::default()).unwrap();
    assert!((s.location - p(2.0, 0.0)).norm() < 1e-3);
    assert!((s.radius - 2.0).abs() < TOL);
    assert_eq!(s.active, vec![0, 1]);
}

#[test]
fn interior_points_do_not_move_the_center() {
    let pts = [
        p(0.0, 0.0),
        p(2.0, 0.0),
        p(2.0, 2.0),
        p(0.0, 2.0),
        p(1.0, 1.0),
        p(0.5, 1.5),
    ];
    let s = solve(&pts, &SolveCfg::default()).unwrap();
    assert!((s.location - p(1.0, 1.0)).norm() < TOL);
    assert_eq!(s.active, vec![0, 1, 2, 3]);
    assert!(s.distances[4] < TOL);
}

#[test]
fn seeded_villages_match_exact_circle() {
    let pts = draw_villages(VillageCfg::default(), ReplayToken::new(42));
    let s = solve(&pts, &SolveCfg::default()).unwrap();
    assert!(s.satisfies_invariants(TOL));
    assert!(s.active.len() >= 2);
    assert_eq!(s.distances.len(), pts.len());
    let (c, r) = exact_mec(&pts);
    assert!((s.radius - r).abs() < TOL, "radius {} vs exact {}", s.radius, r);
    assert!((s.location - c).norm() < 1e-3);

    let st = s.stats();
    assert!((st.max - s.max_distance()).abs() < 1e-12);
    assert!(st.min <= st.median && st.median <= st.max);
    assert!(st.min <= st.mean && st.mean <= st.max);
}

#[test]
fn farther_point_never_shrinks_radius() {
    let mut pts = draw_villages(VillageCfg::default(), ReplayToken::new(3));
    let before = solve(&pts, &SolveCfg::default()).unwrap();
    pts.push(before.location + p(0.6, 0.8) * (before.radius * 1.5));
    let after = solve(&pts, &SolveCfg::default()).unwrap();
    assert!(after.radius >= before.radius - 1e-6);
    assert!(after.active.contains(&(pts.len() - 1)));
}

#[test]
fn malformed_input_is_rejected() {
    let cfg = SolveCfg::default();
    assert_eq!(solve(&[], &cfg).unwrap_err(), SolveError::EmptyProblem);
    assert_eq!(
        solve(&[p(0.0, 0.0), p(f64::NAN, 1.0)], &cfg).unwrap_err(),
        SolveError::NonFinitePoint { index: 1 }
    );
    assert_eq!(
        solve(&[p(f64::INFINITY, 0.0)], &cfg).unwrap_err(),
        SolveError::NonFinitePoint { index: 0 }
    );
}

#[test]
fn iteration_cap_surfaces_solver_status() {
    let pts = draw_villages(VillageCfg::default(), ReplayToken::new(42));
    let cfg = SolveCfg {
        max_iter: 1,
        accept_reduced_accuracy: false,
        ..SolveCfg::default()
    };
    match solve(&pts, &cfg) {
        Err(SolveError::SolveFailed { status }) => {
            assert_ne!(status, clarabel::solver::SolverStatus::Solved)
        }
        other => panic!("expected a failed solve, got {other:?}"),
    }
}

#[test]
fn formulation_layout() {
    let f = Formulation::new(&[p(1.0, 2.0), p(-3.0, 4.0)]);
    assert_eq!(f.num_constraints(), 2);
    assert_eq!((f.A.m, f.A.n), (6, 3));
    assert_eq!(f.A.colptr, vec![0, 2, 4, 6]);
    assert_eq!(f.A.rowval, vec![1, 4, 2, 5, 0, 3]);
    assert_eq!(f.b, vec![0.0, -1.0, -2.0, 0.0, 3.0, -4.0]);
    assert_eq!(f.q, vec![0.0, 0.0, 1.0]);
    assert_eq!(f.P.nnz(), 0);
}

#[test]
fn stats_of_known_distances() {
    let st = DistanceStats::from_distances(&[1.0, 3.0, 2.0, 4.0]);
    assert_eq!(st.min, 1.0);
    assert_eq!(st.max, 4.0);
    assert_eq!(st.mean, 2.5);
    assert_eq!(st.median, 2.5);
    assert!((st.std_dev - 1.25f64.sqrt()).abs() < 1e-12);
    assert!(DistanceStats::from_distances(&[]).mean.is_nan());
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn solver_agrees_with_exact_circle(
        coords in proptest::collection::vec((-10.0f64..10.0, -10.0f64..10.0), 1..12)
    ) {
        let pts: Vec<Point2> = coords.iter().map(|&(x, y)| p(x, y)).collect();
        let s = solve(&pts, &SolveCfg::default()).unwrap();
        let (_, r) = exact_mec(&pts);
        prop_assert!((s.radius - r).abs() < TOL, "radius {} vs exact {}", s.radius, r);
        prop_assert!(s.satisfies_invariants(TOL));
    }
}
