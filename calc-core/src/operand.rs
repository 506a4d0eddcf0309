//! A single calculator operand.
//!
//! An [`Operand`] is the number currently being typed or held by the engine.
//! It supports two input styles: whole-value replacement via [`Operand::set`]
//! and digit-by-digit entry via [`Operand::input_digit`]. Once a decimal point
//! has been inserted, digits are collected as text so that leading zeros in the
//! fractional part survive (typing `0`, `0`, `4`, `1` after the point yields
//! `.0041`, not `.41`).

use std::fmt;

/// A numeric accumulator for one side of a binary operation.
///
/// # Example
///
/// ```
/// use calc_core::Operand;
///
/// let mut operand = Operand::default();
/// operand.input_digit(1);
/// operand.input_digit(2);
/// operand.insert_decimal_point();
/// operand.input_digit(0);
/// operand.input_digit(5);
///
/// assert_eq!(operand.value(), 12.05);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Operand {
    value: f64,
    decimal_inserted: bool,
    fractional_digits: String,
}

impl Operand {
    /// Creates an operand holding `value`, with no decimal entry in progress.
    pub fn new(value: f64) -> Self {
        Self {
            value,
            decimal_inserted: false,
            fractional_digits: String::new(),
        }
    }

    /// The current numeric value.
    pub fn value(&self) -> f64 {
        self.value
    }

    /// Whether a decimal point has been inserted for this operand.
    pub fn has_decimal_point(&self) -> bool {
        self.decimal_inserted
    }

    /// Digits typed after the decimal point, leading zeros included.
    pub fn fractional_digits(&self) -> &str {
        &self.fractional_digits
    }

    /// Appends a single digit.
    ///
    /// Before a decimal point the digit extends the integral part; afterwards it
    /// extends the fractional part. The operand keeps its sign either way, so a
    /// negative operand (including `-0.0`) stays negative.
    ///
    /// `digit` must be in `0..=9`; the engine validates this before calling.
    pub fn input_digit(
        &mut self,
        digit: u8,
    ) {
        debug_assert!(digit <= 9, "digit out of range: {digit}");

        if self.decimal_inserted {
            self.fractional_digits.push(char::from(b'0' + digit));
            self.recombine();
        } else {
            self.value = self.value * 10.0 + f64::from(digit).copysign(self.value);
        }
    }

    /// Switches to fractional entry. Calling it again before the next digit
    /// keeps the digits collected so far.
    pub fn insert_decimal_point(&mut self) {
        self.decimal_inserted = true;
    }

    /// Replaces the value wholesale and drops any decimal entry state.
    pub fn set(
        &mut self,
        value: f64,
    ) {
        *self = Self::new(value);
    }

    /// Flips the sign of the value, zero included.
    pub fn negate(&mut self) {
        self.value = -self.value;
    }

    /// Returns the operand to `0.0` with no decimal entry in progress.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Rebuilds `value` from its integral part and the typed fractional digits.
    ///
    /// The decimal text is parsed directly so the result is the closest `f64`
    /// to what was typed, rather than the sum of two rounded halves.
    fn recombine(&mut self) {
        let integral = self.value.abs().trunc();
        if !integral.is_finite() || self.fractional_digits.is_empty() {
            return;
        }

        let text = format!("{integral}.{}", self.fractional_digits);
        if let Ok(magnitude) = text.parse::<f64>() {
            self.value = magnitude.copysign(self.value);
        }
    }
}

impl fmt::Display for Operand {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        write!(f, "{}", self.value)?;
        if self.decimal_inserted && self.fractional_digits.is_empty() {
            write!(f, ".")?;
        }
        Ok(())
    }
}
