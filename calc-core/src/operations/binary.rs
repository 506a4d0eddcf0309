//! Binary operations.
//!
//! | Label   | Operation               | Result                  |
//! |---------|-------------------------|-------------------------|
//! | `+`     | Add                     | `x + y`                 |
//! | `-`     | Subtract                | `x - y`                 |
//! | `*`     | Multiply                | `x * y`                 |
//! | `/`     | Divide                  | `x / y`                 |
//! | `x^y`   | Power                   | `x` raised to `y`       |
//! | `y^x`   | PowerReverseOperands    | `y` raised to `x`       |
//! | `nthRt` | NthRoot                 | `y`-th root of `x`      |
//! | `logY`  | LogToTheBase            | logarithm of `x` base `y` |
//! | `EE`    | EnterExponent           | `x * 10^y`              |
//!
//! `x` is the first operand (the running result) and `y` the second.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Function backing a [`BinaryOperation`]. `None` means undefined.
pub type BinaryFunction = fn(f64, f64) -> Option<f64>;

/// An operation that combines the first and second operand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BinaryOperation {
    Add,
    Subtract,
    Multiply,
    Divide,
    Power,
    PowerReverseOperands,
    NthRoot,
    LogToTheBase,
    EnterExponent,
}

impl BinaryOperation {
    /// Every binary operation, in keypad order.
    pub const ALL: [Self; 9] = [
        Self::Add,
        Self::Subtract,
        Self::Multiply,
        Self::Divide,
        Self::Power,
        Self::PowerReverseOperands,
        Self::NthRoot,
        Self::LogToTheBase,
        Self::EnterExponent,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Subtract => "-",
            Self::Multiply => "*",
            Self::Divide => "/",
            Self::Power => "x^y",
            Self::PowerReverseOperands => "y^x",
            Self::NthRoot => "nthRt",
            Self::LogToTheBase => "logY",
            Self::EnterExponent => "EE",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|op| op.as_str() == s)
    }

    /// Looks up the function implementing this operation.
    pub fn function(&self) -> BinaryFunction {
        match self {
            Self::Add => add,
            Self::Subtract => subtract,
            Self::Multiply => multiply,
            Self::Divide => divide,
            Self::Power => power,
            Self::PowerReverseOperands => power_reverse_operands,
            Self::NthRoot => nth_root,
            Self::LogToTheBase => log_to_the_base,
            Self::EnterExponent => enter_exponent,
        }
    }

    /// Applies the operation to `(lhs, rhs)`.
    ///
    /// # Example
    ///
    /// ```
    /// use calc_core::BinaryOperation;
    ///
    /// assert_eq!(BinaryOperation::Subtract.apply(7.0, 2.0), Some(5.0));
    /// assert_eq!(BinaryOperation::Divide.apply(1.0, 0.0), Some(f64::INFINITY));
    /// assert_eq!(BinaryOperation::NthRoot.apply(8.0, 1.5), None);
    /// ```
    pub fn apply(
        &self,
        lhs: f64,
        rhs: f64,
    ) -> Option<f64> {
        (self.function())(lhs, rhs)
    }
}

impl fmt::Display for BinaryOperation {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn add(
    x: f64,
    y: f64,
) -> Option<f64> {
    Some(x + y)
}

fn subtract(
    x: f64,
    y: f64,
) -> Option<f64> {
    Some(x - y)
}

fn multiply(
    x: f64,
    y: f64,
) -> Option<f64> {
    Some(x * y)
}

fn divide(
    x: f64,
    y: f64,
) -> Option<f64> {
    Some(x / y)
}

fn power(
    x: f64,
    y: f64,
) -> Option<f64> {
    Some(x.powf(y))
}

fn power_reverse_operands(
    x: f64,
    y: f64,
) -> Option<f64> {
    Some(y.powf(x))
}

fn enter_exponent(
    mantissa: f64,
    exponent: f64,
) -> Option<f64> {
    Some(mantissa * 10f64.powf(exponent))
}

/// The `index`-th root of `radicand`. Only integral, non-zero indices are
/// defined; odd roots of negative numbers are real, even ones are undefined.
fn nth_root(
    radicand: f64,
    index: f64,
) -> Option<f64> {
    if index == 0.0 || index.fract() != 0.0 {
        return None;
    }
    if radicand < 0.0 && index % 2.0 == 0.0 {
        return None;
    }

    let root = if index == 2.0 {
        radicand.sqrt()
    } else if index == 3.0 {
        radicand.cbrt()
    } else if radicand < 0.0 && index % 2.0 != 0.0 {
        -(-radicand).powf(index.recip())
    } else {
        radicand.powf(index.recip())
    };
    Some(root)
}

/// Logarithm of `value` in `base`. Non-positive bases and arguments are
/// undefined.
fn log_to_the_base(
    value: f64,
    base: f64,
) -> Option<f64> {
    if value <= 0.0 || base <= 0.0 {
        return None;
    }

    let log = if base == 2.0 {
        value.log2()
    } else if base == 10.0 {
        value.log10()
    } else {
        value.ln() / base.ln()
    };
    Some(log)
}
