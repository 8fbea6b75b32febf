#![allow(non_snake_case)]
//! Clarabel standard-form formulation and the solve entry point.
//!
//! Clarabel solves `min ½ zᵀPz + qᵀz  s.t.  Az + s = b, s ∈ K`. With
//! `z = (x, y, t)` the slack block of point `i` must read `(t, x - pᵢₓ, y - pᵢᵧ)`,
//! so rows `3i..3i+3` of `A` are `-e_t, -e_x, -e_y` and `b` holds `(0, -pᵢₓ, -pᵢᵧ)`.

use clarabel::algebra::CscMatrix;
use clarabel::solver::{
    DefaultSettingsBuilder, DefaultSolver, IPSolver, SecondOrderConeT, SolverStatus,
    SupportedConeT,
};
use tracing::{debug, warn};

use super::types::{FacilitySolution, Point2, SolveCfg};
use crate::error::SolveError;

const X: usize = 0;
const Y: usize = 1;
const T: usize = 2;

/// Cone-program data for one facility problem.
pub struct Formulation {
    pub P: CscMatrix<f64>,
    pub q: Vec<f64>,
    pub A: CscMatrix<f64>,
    pub b: Vec<f64>,
    pub cones: Vec<SupportedConeT<f64>>,
}

impl Formulation {
    /// Pre: `points` is non-empty with finite coordinates (see `solve`).
    pub fn new(points: &[Point2]) -> Self {
        let n = points.len();
        // Column j of A has a single -1 per point block, at block offset `row_of[j]`.
        let row_of = [1usize, 2, 0];
        let mut colptr = Vec::with_capacity(4);
        let mut rowval = Vec::with_capacity(3 * n);
        colptr.push(0);
        for offset in row_of {
            rowval.extend((0..n).map(|i| 3 * i + offset));
            colptr.push(rowval.len());
        }
        let nzval = vec![-1.0; 3 * n];
        let A = CscMatrix::new(3 * n, 3, colptr, rowval, nzval);

        let b = points.iter().flat_map(|p| [0.0, -p.x, -p.y]).collect();
        let mut q = vec![0.0; 3];
        q[T] = 1.0;

        Self {
            P: CscMatrix::spalloc((3, 3), 0),
            q,
            A,
            b,
            cones: (0..n).map(|_| SecondOrderConeT(3)).collect(),
        }
    }

    pub fn num_constraints(&self) -> usize {
        self.cones.len()
    }
}

/// Solve the minimax location problem for `points`.
///
/// Errors:
/// - `EmptyProblem` / `NonFinitePoint` for malformed input (checked before any solver work).
/// - `SolveFailed` when Clarabel stops without an (accepted) optimum.
pub fn solve(points: &[Point2], cfg: &SolveCfg) -> Result<FacilitySolution, SolveError> {
    if points.is_empty() {
        return Err(SolveError::EmptyProblem);
    }
    if let Some(index) = points.iter().position(|p| !(p.x.is_finite() && p.y.is_finite())) {
        return Err(SolveError::NonFinitePoint { index });
    }

    let f = Formulation::new(points);
    debug!(points = points.len(), soc_blocks = f.num_constraints(), "facility socp");

    let settings = DefaultSettingsBuilder::default()
        .verbose(false)
        .max_iter(cfg.max_iter)
        .tol_gap_abs(cfg.tol_gap_abs)
        .tol_gap_rel(cfg.tol_gap_rel)
        .tol_feas(cfg.tol_feas)
        .build()
        .map_err(|e| SolveError::Settings(e.to_string()))?;

    let mut solver = DefaultSolver::new(&f.P, &f.q, &f.A, &f.b, &f.cones, settings);
    solver.solve();
    let sol = &solver.solution;
    debug!(
        status = %sol.status,
        iterations = sol.iterations,
        obj = sol.obj_val,
        "clarabel finished"
    );

    match sol.status {
        SolverStatus::Solved => {}
        SolverStatus::AlmostSolved if cfg.accept_reduced_accuracy => {
            warn!(iterations = sol.iterations, "accepting reduced-accuracy optimum");
        }
        status => return Err(SolveError::SolveFailed { status }),
    }

    let location = Point2::new(sol.x[X], sol.x[Y]);
    let distances: Vec<f64> = points.iter().map(|p| (location - p).norm()).collect();
    // Exact objective at the returned location; the solver's `t` only agrees up to its gap.
    let radius = distances.iter().copied().fold(0.0, f64::max);
    let active = active_set(&distances, radius, cfg.active_band(radius));

    Ok(FacilitySolution {
        location,
        radius,
        bound: sol.x[T],
        distances,
        active,
        status: sol.status,
        iterations: sol.iterations,
    })
}

/// Indices within `band` of `radius`. Non-empty because `radius` is the largest distance.
fn active_set(distances: &[f64], radius: f64, band: f64) -> Vec<usize> {
    distances
        .iter()
        .enumerate()
        .filter(|(_, d)| radius - **d <= band)
        .map(|(i, _)| i)
        .collect()
}
