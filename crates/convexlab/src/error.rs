//! Error types for the two cores.
//!
//! Both cores are total on well-formed input; every variant here is either a
//! caller error caught before any numerics run, or a solver outcome that must
//! not be mistaken for a solution.

use clarabel::solver::SolverStatus;
use thiserror::Error;

/// Rejections raised when a cone comparison is constructed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConeError {
    #[error("dimension mismatch for {operand}: cone expects {expected}, got {found}")]
    DimensionMismatch {
        operand: &'static str,
        expected: String,
        found: String,
    },
    #[error("{cone} cone acts on {expected}, got a {found} for {operand}")]
    OperandKind {
        cone: &'static str,
        operand: &'static str,
        expected: &'static str,
        found: &'static str,
    },
    #[error("{operand} has a non-finite entry")]
    NonFinite { operand: &'static str },
    #[error("second-order cone needs at least the scalar coordinate t (dimension >= 1)")]
    EmptySecondOrder,
}

/// Failures of the facility-location solve.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SolveError {
    #[error("facility problem has no points")]
    EmptyProblem,
    #[error("point {index} has a non-finite coordinate")]
    NonFinitePoint { index: usize },
    #[error("invalid solver settings: {0}")]
    Settings(String),
    #[error("conic solver did not reach an optimum (status: {status})")]
    SolveFailed { status: SolverStatus },
}
