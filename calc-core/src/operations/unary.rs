//! Unary operations applied in place to the active operand.
//!
//! Trigonometric functions honour the engine's [`TrigMode`]: in degrees mode
//! `sin`, `cos` and `tan` read their argument in degrees and the inverse
//! functions report their result in degrees. Hyperbolic functions do not
//! depend on the angle unit.
//!
//! A function that turns a real argument into NaN (square root of a negative
//! number, `asin(2)`, ...) is a domain error and reported as undefined.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::TrigMode;

/// Function backing a [`UnaryOperation`]. `None` means undefined.
pub type UnaryFunction = fn(f64, TrigMode) -> Option<f64>;

/// An operation on the active operand alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnaryOperation {
    /// Handled by the engine itself so it can apply to an operand that has
    /// not been started yet.
    SignChange,
    Percentage,

    Square,
    Cube,
    Exponential,
    PowerOfTen,
    PowerOfTwo,
    Reciprocal,
    SquareRoot,
    CubeRoot,

    NaturalLog,
    CommonLog,
    BinaryLog,

    Factorial,

    Sine,
    Cosine,
    Tangent,
    Arcsine,
    Arccosine,
    Arctangent,
    HyperbolicSine,
    HyperbolicCosine,
    HyperbolicTangent,
    InverseHyperbolicSine,
    InverseHyperbolicCosine,
    InverseHyperbolicTangent,
}

impl UnaryOperation {
    /// Every unary operation, in keypad order.
    pub const ALL: [Self; 26] = [
        Self::SignChange,
        Self::Percentage,
        Self::Square,
        Self::Cube,
        Self::Exponential,
        Self::PowerOfTen,
        Self::PowerOfTwo,
        Self::Reciprocal,
        Self::SquareRoot,
        Self::CubeRoot,
        Self::NaturalLog,
        Self::CommonLog,
        Self::BinaryLog,
        Self::Factorial,
        Self::Sine,
        Self::Cosine,
        Self::Tangent,
        Self::Arcsine,
        Self::Arccosine,
        Self::Arctangent,
        Self::HyperbolicSine,
        Self::HyperbolicCosine,
        Self::HyperbolicTangent,
        Self::InverseHyperbolicSine,
        Self::InverseHyperbolicCosine,
        Self::InverseHyperbolicTangent,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SignChange => "+/-",
            Self::Percentage => "%",
            Self::Square => "x^2",
            Self::Cube => "x^3",
            Self::Exponential => "e^x",
            Self::PowerOfTen => "10^x",
            Self::PowerOfTwo => "2^x",
            Self::Reciprocal => "1/x",
            Self::SquareRoot => "sqrt",
            Self::CubeRoot => "cbrt",
            Self::NaturalLog => "ln",
            Self::CommonLog => "log10",
            Self::BinaryLog => "log2",
            Self::Factorial => "x!",
            Self::Sine => "sin",
            Self::Cosine => "cos",
            Self::Tangent => "tan",
            Self::Arcsine => "sin-1",
            Self::Arccosine => "cos-1",
            Self::Arctangent => "tan-1",
            Self::HyperbolicSine => "sinh",
            Self::HyperbolicCosine => "cosh",
            Self::HyperbolicTangent => "tanh",
            Self::InverseHyperbolicSine => "sinh-1",
            Self::InverseHyperbolicCosine => "cosh-1",
            Self::InverseHyperbolicTangent => "tanh-1",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|op| op.as_str() == s)
    }

    /// Looks up the function implementing this operation.
    pub fn function(&self) -> UnaryFunction {
        match self {
            Self::SignChange => |x, _| Some(-x),
            Self::Percentage => |x, _| Some(x / 100.0),
            Self::Square => |x, _| Some(x * x),
            Self::Cube => |x, _| Some(x * x * x),
            Self::Exponential => |x, _| Some(x.exp()),
            Self::PowerOfTen => |x, _| Some(10f64.powf(x)),
            Self::PowerOfTwo => |x, _| Some(x.exp2()),
            Self::Reciprocal => |x, _| Some(x.recip()),
            Self::SquareRoot => |x, _| Some(x.sqrt()),
            Self::CubeRoot => |x, _| Some(x.cbrt()),
            Self::NaturalLog => |x, _| Some(x.ln()),
            Self::CommonLog => |x, _| Some(x.log10()),
            Self::BinaryLog => |x, _| Some(x.log2()),
            Self::Factorial => |x, _| factorial(x),
            Self::Sine => |x, mode| Some(mode.angle_to_radians(x).sin()),
            Self::Cosine => |x, mode| Some(mode.angle_to_radians(x).cos()),
            Self::Tangent => |x, mode| Some(mode.angle_to_radians(x).tan()),
            Self::Arcsine => |x, mode| Some(mode.radians_to_angle(x.asin())),
            Self::Arccosine => |x, mode| Some(mode.radians_to_angle(x.acos())),
            Self::Arctangent => |x, mode| Some(mode.radians_to_angle(x.atan())),
            Self::HyperbolicSine => |x, _| Some(x.sinh()),
            Self::HyperbolicCosine => |x, _| Some(x.cosh()),
            Self::HyperbolicTangent => |x, _| Some(x.tanh()),
            Self::InverseHyperbolicSine => |x, _| Some(x.asinh()),
            Self::InverseHyperbolicCosine => |x, _| Some(x.acosh()),
            Self::InverseHyperbolicTangent => |x, _| Some(x.atanh()),
        }
    }

    /// Applies the operation to `operand` under the given angle unit.
    ///
    /// # Example
    ///
    /// ```
    /// use calc_core::{TrigMode, UnaryOperation};
    ///
    /// assert_eq!(UnaryOperation::Percentage.apply(50.0, TrigMode::Radians), Some(0.5));
    /// assert_eq!(UnaryOperation::Factorial.apply(5.0, TrigMode::Radians), Some(120.0));
    /// assert_eq!(UnaryOperation::SquareRoot.apply(-4.0, TrigMode::Radians), None);
    /// ```
    pub fn apply(
        &self,
        operand: f64,
        mode: TrigMode,
    ) -> Option<f64> {
        let result = (self.function())(operand, mode)?;

        if result.is_nan() && !operand.is_nan() {
            return None;
        }
        Some(result)
    }
}

impl fmt::Display for UnaryOperation {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Largest `n` for which `n!` is finite in an `f64`.
const MAX_FINITE_FACTORIAL: f64 = 170.0;

/// `n!` for non-negative integral `n`; overflows to infinity.
fn factorial(n: f64) -> Option<f64> {
    if n < 0.0 || n.fract() != 0.0 {
        return None;
    }
    if n > MAX_FINITE_FACTORIAL {
        return Some(f64::INFINITY);
    }

    Some((2..=n as u32).fold(1.0, |acc, k| acc * f64::from(k)))
}
