//! Cone orderings and minimax facility location.
//!
//! Two independent numerical cores:
//! - `cone`: decide `a ⪰_K b` by testing `a - b ∈ K` for the non-negative
//!   orthant, the second-order (Lorentz) cone and the PSD cone.
//! - `facility`: the 1-center problem in the plane, formulated as an SOCP and
//!   handed to Clarabel.
//!
//! Neither module renders text. Callers (the `cli` crate) turn the structured
//! results into explanations.

pub mod cone;
pub mod error;
pub mod facility;
pub mod fixtures;
pub mod villages;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use error::{ConeError, SolveError};

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::cone::{holds, member, Comparison, Cone, ConeCfg, Evidence, Membership, Operand};
    pub use crate::error::{ConeError, SolveError};
    pub use crate::facility::{solve, DistanceStats, FacilitySolution, Point2, SolveCfg};
    pub use crate::villages::{draw_villages, ReplayToken, VillageCfg};
    pub use nalgebra::{DMatrix, DVector, Vector2};
}
