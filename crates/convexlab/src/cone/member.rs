//! Membership predicates and the `a ⪰_K b` comparison built on them.

use nalgebra::{DMatrix, DVector, SymmetricEigen};
use tracing::debug;

use super::types::{Cone, ConeCfg, Operand};
use crate::error::ConeError;

/// Scalars that decided a membership test.
#[derive(Clone, Debug, PartialEq)]
pub enum Evidence {
    Orthant {
        v: DVector<f64>,
        /// `+inf` for the zero-dimensional orthant.
        min_component: f64,
        /// Indices of components below `-eps`.
        negative: Vec<usize>,
    },
    SecondOrder {
        v: DVector<f64>,
        t: f64,
        tail_norm: f64,
        /// `t - ‖r‖₂`; non-negative (up to eps) inside the cone.
        margin: f64,
    },
    Psd {
        m: DMatrix<f64>,
        /// Max-abs entry of `M - Mᵗ`.
        asymmetry: f64,
        /// Ascending; `None` when the symmetry check already failed.
        eigenvalues: Option<Vec<f64>>,
    },
}

impl Evidence {
    /// Smallest eigenvalue, if eigenvalues were computed and the matrix is non-empty.
    pub fn min_eigenvalue(&self) -> Option<f64> {
        match self {
            Evidence::Psd {
                eigenvalues: Some(ev),
                ..
            } => ev.first().copied(),
            _ => None,
        }
    }
}

/// Outcome of a membership test.
#[derive(Clone, Debug, PartialEq)]
pub struct Membership {
    pub cone: Cone,
    pub holds: bool,
    /// Slack used for this decision.
    pub eps: f64,
    pub evidence: Evidence,
}

/// `a ⪰_K b` with operands validated against `K` up front.
///
/// Invariants:
/// - `a` and `b` have the operand kind and dimension `cone` expects.
/// - `evaluate` never fails once construction succeeded.
#[derive(Clone, Debug)]
pub struct Comparison {
    cone: Cone,
    a: Operand,
    b: Operand,
}

impl Comparison {
    pub fn new(cone: Cone, a: Operand, b: Operand) -> Result<Self, ConeError> {
        cone.check("a", &a)?;
        cone.check("b", &b)?;
        Ok(Self { cone, a, b })
    }

    pub fn cone(&self) -> Cone {
        self.cone
    }

    /// `a - b` in the operands' ambient space.
    pub fn difference(&self) -> Operand {
        match (&self.a, &self.b) {
            (Operand::Vector(a), Operand::Vector(b)) => Operand::Vector(a - b),
            (Operand::Matrix(a), Operand::Matrix(b)) => Operand::Matrix(a - b),
            // Kinds are checked against the same cone in `new`.
            _ => unreachable!("operand kinds validated at construction"),
        }
    }

    pub fn evaluate(&self, cfg: &ConeCfg) -> Membership {
        let diff = self.difference();
        let scale = self.a.max_abs().max(self.b.max_abs()).max(diff.max_abs());
        let out = test_member(self.cone, &diff, cfg.eps(scale));
        debug!(
            cone = self.cone.name(),
            dim = self.cone.dim(),
            holds = out.holds,
            eps = out.eps,
            "cone comparison"
        );
        out
    }
}

/// `a ⪰_cone b` under the default tolerance policy.
pub fn holds(a: &Operand, b: &Operand, cone: Cone) -> Result<bool, ConeError> {
    let cmp = Comparison::new(cone, a.clone(), b.clone())?;
    Ok(cmp.evaluate(&ConeCfg::default()).holds)
}

/// `v ∈ cone`, with the tolerance scaled by the magnitude of `v`.
pub fn member(v: &Operand, cone: Cone, cfg: &ConeCfg) -> Result<Membership, ConeError> {
    cone.check("v", v)?;
    Ok(test_member(cone, v, cfg.eps(v.max_abs())))
}

fn test_member(cone: Cone, v: &Operand, eps: f64) -> Membership {
    let (holds, evidence) = match (cone, v) {
        (Cone::Orthant(_), Operand::Vector(v)) => in_orthant(v, eps),
        (Cone::SecondOrder(_), Operand::Vector(v)) => in_second_order(v, eps),
        (Cone::Psd(_), Operand::Matrix(m)) => in_psd(m, eps),
        _ => unreachable!("operand kind validated by Cone::check"),
    };
    Membership {
        cone,
        holds,
        eps,
        evidence,
    }
}

fn in_orthant(v: &DVector<f64>, eps: f64) -> (bool, Evidence) {
    let min_component = v.iter().copied().fold(f64::INFINITY, f64::min);
    let negative: Vec<usize> = v
        .iter()
        .enumerate()
        .filter(|(_, x)| **x < -eps)
        .map(|(i, _)| i)
        .collect();
    (
        negative.is_empty(),
        Evidence::Orthant {
            v: v.clone(),
            min_component,
            negative,
        },
    )
}

fn in_second_order(v: &DVector<f64>, eps: f64) -> (bool, Evidence) {
    let t = v[0];
    let tail_norm = v.rows(1, v.len() - 1).norm();
    let margin = t - tail_norm;
    (
        margin >= -eps,
        Evidence::SecondOrder {
            v: v.clone(),
            t,
            tail_norm,
            margin,
        },
    )
}

fn in_psd(m: &DMatrix<f64>, eps: f64) -> (bool, Evidence) {
    let asymmetry = (m - m.transpose()).amax();
    if asymmetry > eps {
        return (
            false,
            Evidence::Psd {
                m: m.clone(),
                asymmetry,
                eigenvalues: None,
            },
        );
    }
    let eigenvalues = symmetric_eigenvalues(m);
    let holds = eigenvalues.iter().all(|&l| l >= -eps);
    (
        holds,
        Evidence::Psd {
            m: m.clone(),
            asymmetry,
            eigenvalues: Some(eigenvalues),
        },
    )
}

/// Ascending eigenvalues of the symmetric part of `m`.
pub(crate) fn symmetric_eigenvalues(m: &DMatrix<f64>) -> Vec<f64> {
    if m.is_empty() {
        return Vec::new();
    }
    let sym = (m + m.transpose()) * 0.5;
    let mut ev: Vec<f64> = SymmetricEigen::new(sym).eigenvalues.iter().copied().collect();
    ev.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    ev
}
