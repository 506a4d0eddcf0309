//! Operation tables for the calculator engine.
//!
//! Each operation kind is a plain enum with a stable key label
//! (`as_str` / `parse`) and a lookup from variant to the function that
//! implements it. Functions return `None` when the result is undefined, which
//! the engine reports as a calculation error. Ordinary IEEE-754 edge cases such
//! as division by zero are not undefined; they produce infinities or NaN.

pub mod binary;
pub mod special;
pub mod unary;

pub use binary::{BinaryFunction, BinaryOperation};
pub use special::{Configuration, MemoryFunction, SpecialInput, TrigMode};
pub use unary::{UnaryFunction, UnaryOperation};
