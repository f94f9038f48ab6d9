//! Small standalone routines: division by repeated subtraction and the
//! power comparison.

pub mod division;
pub mod power;
