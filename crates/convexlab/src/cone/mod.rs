//! Partial orderings induced by convex cones.
//!
//! Purpose
//! - Decide `a ⪰_K b ⟺ a - b ∈ K` for the non-negative orthant, the
//!   second-order (Lorentz) cone and the positive-semidefinite cone.
//! - Return the scalars behind each decision (minimum component, tail norm,
//!   eigenvalues) so a presentation layer can explain it.
//!
//! Shape
//! - `Comparison::new` checks operand kinds and dimensions once; afterwards
//!   `Comparison::evaluate` is a total, pure function.
//! - One tolerance policy (`ConeCfg`) for every predicate: absolute floor plus
//!   a term relative to the magnitude of the inputs.

mod member;
mod types;

pub use member::{holds, member, Comparison, Evidence, Membership};
pub use types::{Cone, ConeCfg, Operand};
