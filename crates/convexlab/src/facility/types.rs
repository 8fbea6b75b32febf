//! Inputs, settings and results of the facility-location solve.

use clarabel::solver::SolverStatus;
use nalgebra::Vector2;
#[cfg(feature = "serde")]
use serde::Serialize;

/// Village or facility coordinates.
pub type Point2 = Vector2<f64>;

/// Solver settings and post-processing tolerances.
#[derive(Clone, Copy, Debug)]
pub struct SolveCfg {
    /// Treat Clarabel's reduced-accuracy optimum (`AlmostSolved`) as a solution.
    pub accept_reduced_accuracy: bool,
    /// Relative distance band marking a point as active: `t* - dᵢ <= active_tol * max(1, t*)`.
    pub active_tol: f64,
    pub max_iter: u32,
    pub tol_gap_abs: f64,
    pub tol_gap_rel: f64,
    pub tol_feas: f64,
}

impl SolveCfg {
    /// Absolute active band for an optimum of radius `radius`.
    #[inline]
    pub fn active_band(&self, radius: f64) -> f64 {
        self.active_tol * radius.max(1.0)
    }
}

impl Default for SolveCfg {
    fn default() -> Self {
        Self {
            accept_reduced_accuracy: true,
            active_tol: 1e-4,
            max_iter: 200,
            tol_gap_abs: 1e-8,
            tol_gap_rel: 1e-8,
            tol_feas: 1e-8,
        }
    }
}

/// Optimal facility location.
///
/// Invariants:
/// - `distances[i]` is the distance from `location` to input point `i`.
/// - `radius` is exactly `max(distances)`; `bound` is the solver's `t`, equal up to its gap.
/// - `active` is non-empty and sorted ascending.
#[derive(Clone, Debug)]
pub struct FacilitySolution {
    pub location: Point2,
    pub radius: f64,
    pub bound: f64,
    pub distances: Vec<f64>,
    pub active: Vec<usize>,
    pub status: SolverStatus,
    pub iterations: u32,
}

impl FacilitySolution {
    /// Largest recomputed distance (`0` for an empty distance list).
    pub fn max_distance(&self) -> f64 {
        self.distances.iter().copied().fold(0.0, f64::max)
    }

    /// Checks the solution invariants within `tol`, scaled by `max(1, radius)`.
    pub fn satisfies_invariants(&self, tol: f64) -> bool {
        let band = tol * self.radius.max(1.0);
        self.radius >= 0.0
            && (self.max_distance() - self.radius).abs() <= band
            && (self.bound - self.radius).abs() <= band
            && !self.active.is_empty()
            && self
                .active
                .iter()
                .all(|&i| (self.distances[i] - self.radius).abs() <= band)
    }

    pub fn stats(&self) -> DistanceStats {
        DistanceStats::from_distances(&self.distances)
    }
}

/// Summary of the point-to-facility distances.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct DistanceStats {
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub median: f64,
    /// Population standard deviation.
    pub std_dev: f64,
}

impl DistanceStats {
    /// All fields are NaN for an empty slice.
    pub fn from_distances(d: &[f64]) -> Self {
        if d.is_empty() {
            return Self {
                min: f64::NAN,
                max: f64::NAN,
                mean: f64::NAN,
                median: f64::NAN,
                std_dev: f64::NAN,
            };
        }
        let n = d.len() as f64;
        let mut sorted = d.to_vec();
        sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
        let mid = sorted.len() / 2;
        let median = if sorted.len() % 2 == 0 {
            0.5 * (sorted[mid - 1] + sorted[mid])
        } else {
            sorted[mid]
        };
        let mean = d.iter().sum::<f64>() / n;
        let var = d.iter().map(|x| (x - mean) * (x - mean)).sum::<f64>() / n;
        Self {
            min: sorted[0],
            max: sorted[sorted.len() - 1],
            mean,
            median,
            std_dev: var.sqrt(),
        }
    }
}
