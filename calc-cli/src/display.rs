//! Turns engine values into the text a calculator screen would show.

use calc_core::Operand;

/// Default number of significant digits shown.
pub const DEFAULT_PRECISION: usize = 10;

/// Largest useful precision; `f64` carries at most 17 significant digits.
pub const MAX_PRECISION: usize = 17;

/// Magnitudes in `[SCIENTIFIC_BELOW, SCIENTIFIC_FROM)` print positionally.
const SCIENTIFIC_BELOW: f64 = 1e-9;
const SCIENTIFIC_FROM: f64 = 1e16;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayFormatter {
    precision: usize,
}

impl Default for DisplayFormatter {
    fn default() -> Self {
        Self::new(DEFAULT_PRECISION)
    }
}

impl DisplayFormatter {
    /// `precision` is clamped to `1..=MAX_PRECISION`.
    pub fn new(precision: usize) -> Self {
        Self {
            precision: precision.clamp(1, MAX_PRECISION),
        }
    }

    pub fn precision(&self) -> usize {
        self.precision
    }

    /// Formats a finished value.
    ///
    /// ```
    /// use calc_cli::display::DisplayFormatter;
    ///
    /// let formatter = DisplayFormatter::default();
    /// assert_eq!(formatter.format_value(1.0 / 3.0), "0.3333333333");
    /// assert_eq!(formatter.format_value(2.5e20), "2.5e20");
    /// assert_eq!(formatter.format_value(f64::NEG_INFINITY), "-inf");
    /// ```
    pub fn format_value(
        &self,
        value: f64,
    ) -> String {
        if value.is_nan() {
            return "NaN".to_string();
        }
        if value.is_infinite() {
            return if value > 0.0 { "inf" } else { "-inf" }.to_string();
        }
        if value == 0.0 {
            return if value.is_sign_negative() { "-0" } else { "0" }.to_string();
        }

        let magnitude = value.abs();
        let exponent = magnitude.log10().floor() as i32;
        if !(SCIENTIFIC_BELOW..SCIENTIFIC_FROM).contains(&magnitude)
            || exponent >= self.precision as i32
        {
            return self.format_scientific(value);
        }

        let decimals = (self.precision as i32 - 1 - exponent).max(0) as usize;
        let text = format!("{value:.decimals$}");

        // Rounding can carry into a new leading digit (999999.7 -> 1000000).
        let integral_digits = text
            .trim_start_matches('-')
            .split('.')
            .next()
            .map_or(0, str::len);
        if integral_digits > self.precision {
            return self.format_scientific(value);
        }

        trim_fraction(&text).to_string()
    }

    /// Formats the operand being typed, echoing its fractional digits as
    /// entered so that `1 . 5 0` shows `1.50` and `1 .` shows `1.`.
    pub fn format_entry(
        &self,
        operand: &Operand,
    ) -> String {
        let value = operand.value();
        if !operand.has_decimal_point() || !value.is_finite() || value.abs() >= SCIENTIFIC_FROM {
            return self.format_value(value);
        }

        let integral = value.trunc();
        let sign = if value.is_sign_negative() { "-" } else { "" };
        let integral_text = format!("{sign}{}", integral.abs());
        let room = self.precision.saturating_sub(integral_text.trim_start_matches('-').len());
        let fraction: String = operand.fractional_digits().chars().take(room).collect();

        format!("{integral_text}.{fraction}")
    }

    fn format_scientific(
        &self,
        value: f64,
    ) -> String {
        let text = format!("{:.*e}", self.precision - 1, value);
        match text.split_once('e') {
            Some((mantissa, exponent)) => format!("{}e{exponent}", trim_fraction(mantissa)),
            None => text,
        }
    }
}

/// Drops trailing fractional zeros and a dangling decimal point.
fn trim_fraction(text: &str) -> &str {
    if text.contains('.') {
        text.trim_end_matches('0').trim_end_matches('.')
    } else {
        text
    }
}
