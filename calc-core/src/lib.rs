//! Immediate-execution calculator engine.
//!
//! [`Calculator`] evaluates each binary operation as soon as the next operator
//! or equals is entered, holding two [`Operand`]s, a pending
//! [`BinaryOperation`], a memory register and the input-mode flags that decide
//! how the next keystroke is interpreted. It performs no I/O; a user interface
//! forwards one call per key press and reads back
//! [`Calculator::display_value`].
//!
//! ```
//! use calc_core::{BinaryOperation, Calculator, UnaryOperation};
//!
//! let mut calculator = Calculator::new();
//! calculator.input_digit(1).unwrap();
//! calculator.input_operation(BinaryOperation::Add).unwrap();
//! calculator.input_unary(UnaryOperation::SignChange).unwrap();
//! calculator.input_digit(3).unwrap();
//!
//! assert_eq!(calculator.evaluate(), Ok(-2.0));
//! ```

pub mod calculator;
pub mod error;
pub mod operand;
pub mod operations;

pub use calculator::Calculator;
pub use error::CalculatorError;
pub use operand::Operand;
pub use operations::*;
