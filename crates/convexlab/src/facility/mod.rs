//! Minimax facility location (planar 1-center) as a second-order cone program.
//!
//! Model
//! - Decision vector `z = (x, y, t)`; minimize `t` subject to
//!   `‖(x, y) - pᵢ‖₂ <= t` for every input point `pᵢ`.
//! - One 3-dimensional Lorentz block per point; the problem is always
//!   feasible and bounded below for finite, non-empty input.
//!
//! Responsibilities
//! - Formulate the cone program in Clarabel's standard form (`socp`).
//! - Interpret the solver status; anything but an optimum is an error.
//! - Recompute distances from the returned location and report the active set.

mod socp;
mod types;

pub use socp::{solve, Formulation};
pub use types::{DistanceStats, FacilitySolution, Point2, SolveCfg};

#[cfg(test)]
mod tests;
