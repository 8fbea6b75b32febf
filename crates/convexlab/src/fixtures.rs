//! Literal inputs of the classroom cone-ordering exercise.
//!
//! - `x`, `y`: the vectors compared under the orthant and Lorentz orderings.
//! - `a`, `b`, `c`: the 3×3 symmetric matrices compared under the PSD ordering.

use crate::cone::Operand;

pub fn x() -> Operand {
    Operand::vector(&[1.0, 2.0, 3.0])
}

pub fn y() -> Operand {
    Operand::vector(&[3.0, 2.0, 1.0])
}

pub fn a() -> Operand {
    Operand::matrix([
        [-6.0, 7.0, 8.0], //
        [7.0, -8.0, 9.0],
        [8.0, 9.0, -10.0],
    ])
}

pub fn b() -> Operand {
    Operand::matrix([
        [0.0, 1.0, 2.0], //
        [1.0, 2.0, 3.0],
        [2.0, 3.0, 4.0],
    ])
}

pub fn c() -> Operand {
    Operand::matrix([
        [-10.0, 9.0, 8.0], //
        [9.0, -8.0, 7.0],
        [8.0, 7.0, -12.0],
    ])
}
