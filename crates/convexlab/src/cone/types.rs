//! Cone tags, operands and tolerances.

use nalgebra::{DMatrix, DVector};

use crate::error::ConeError;

/// Tolerance policy shared by all membership predicates.
///
/// A quantity that must be `>= 0` passes when it is `>= -eps(scale)`, with
/// `eps(scale) = eps_abs + eps_rel * scale` and `scale` the largest absolute
/// entry among the compared operands.
#[derive(Clone, Copy, Debug)]
pub struct ConeCfg {
    pub eps_abs: f64,
    pub eps_rel: f64,
}

impl Default for ConeCfg {
    fn default() -> Self {
        Self {
            eps_abs: 1e-12,
            eps_rel: 1e-10,
        }
    }
}

impl ConeCfg {
    /// Exact comparisons (no slack); useful for integer-valued inputs.
    pub fn exact() -> Self {
        Self {
            eps_abs: 0.0,
            eps_rel: 0.0,
        }
    }

    #[inline]
    pub fn eps(&self, scale: f64) -> f64 {
        self.eps_abs + self.eps_rel * scale.abs()
    }
}

/// Convex cone with its declared dimension.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Cone {
    /// Non-negative orthant in R^n.
    Orthant(usize),
    /// Lorentz cone `{(t, r) : t >= ‖r‖₂}` in R^n; the first coordinate is `t`.
    SecondOrder(usize),
    /// Symmetric positive-semidefinite n×n matrices.
    Psd(usize),
}

impl Cone {
    pub fn dim(&self) -> usize {
        match *self {
            Cone::Orthant(n) | Cone::SecondOrder(n) | Cone::Psd(n) => n,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Cone::Orthant(_) => "orthant",
            Cone::SecondOrder(_) => "second-order",
            Cone::Psd(_) => "psd",
        }
    }

    /// Kind, shape and finiteness check for an operand; `which` names it in errors.
    pub(crate) fn check(&self, which: &'static str, op: &Operand) -> Result<(), ConeError> {
        self.check_shape(which, op)?;
        if op.is_finite() {
            Ok(())
        } else {
            Err(ConeError::NonFinite { operand: which })
        }
    }

    fn check_shape(&self, which: &'static str, op: &Operand) -> Result<(), ConeError> {
        let n = self.dim();
        match (self, op) {
            (Cone::SecondOrder(0), _) => Err(ConeError::EmptySecondOrder),
            (Cone::Orthant(_) | Cone::SecondOrder(_), Operand::Vector(v)) => {
                if v.len() == n {
                    Ok(())
                } else {
                    Err(ConeError::DimensionMismatch {
                        operand: which,
                        expected: format!("{n}"),
                        found: format!("{}", v.len()),
                    })
                }
            }
            (Cone::Psd(_), Operand::Matrix(m)) => {
                if m.nrows() == n && m.ncols() == n {
                    Ok(())
                } else {
                    Err(ConeError::DimensionMismatch {
                        operand: which,
                        expected: format!("{n}x{n}"),
                        found: format!("{}x{}", m.nrows(), m.ncols()),
                    })
                }
            }
            (Cone::Psd(_), Operand::Vector(_)) => Err(ConeError::OperandKind {
                cone: self.name(),
                operand: which,
                expected: "square matrices",
                found: "vector",
            }),
            (_, Operand::Matrix(_)) => Err(ConeError::OperandKind {
                cone: self.name(),
                operand: which,
                expected: "vectors",
                found: "matrix",
            }),
        }
    }
}

/// Element of the ambient space a cone lives in.
#[derive(Clone, Debug, PartialEq)]
pub enum Operand {
    Vector(DVector<f64>),
    Matrix(DMatrix<f64>),
}

impl Operand {
    pub fn vector(xs: &[f64]) -> Self {
        Operand::Vector(DVector::from_column_slice(xs))
    }

    /// Square matrix from row-major rows.
    pub fn matrix<const N: usize>(rows: [[f64; N]; N]) -> Self {
        Operand::Matrix(DMatrix::from_fn(N, N, |i, j| rows[i][j]))
    }

    pub fn is_finite(&self) -> bool {
        match self {
            Operand::Vector(v) => v.iter().all(|x| x.is_finite()),
            Operand::Matrix(m) => m.iter().all(|x| x.is_finite()),
        }
    }

    /// Largest absolute entry (0 for empty operands).
    pub fn max_abs(&self) -> f64 {
        match self {
            Operand::Vector(v) => v.iter().fold(0.0, |acc: f64, x| acc.max(x.abs())),
            Operand::Matrix(m) => m.iter().fold(0.0, |acc: f64, x| acc.max(x.abs())),
        }
    }
}

impl From<DVector<f64>> for Operand {
    fn from(v: DVector<f64>) -> Self {
        Operand::Vector(v)
    }
}

impl From<DMatrix<f64>> for Operand {
    fn from(m: DMatrix<f64>) -> Self {
        Operand::Matrix(m)
    }
}
