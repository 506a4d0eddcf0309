//! A calculator session as a user interface would run it.
//!
//! The engine reports a calculation error and keeps its state; a screen shows
//! `Error` instead and waits for `AC`. [`Session`] layers that convention and
//! the display formatting over a [`Calculator`].

use calc_core::{Calculator, CalculatorError};
use tracing::{debug, trace, warn};

use crate::{
    display::DisplayFormatter,
    keys::{Key, KeyParseError},
    settings::Settings,
};

/// Text shown while a calculation error is latched.
pub const ERROR_DISPLAY: &str = "Error";

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error(transparent)]
    Key(#[from] KeyParseError),

    #[error(transparent)]
    Calculator(#[from] CalculatorError),
}

#[derive(Debug, Clone)]
pub struct Session {
    calculator: Calculator,
    formatter: DisplayFormatter,
    error: Option<CalculatorError>,
}

impl Session {
    pub fn new(
        calculator: Calculator,
        formatter: DisplayFormatter,
    ) -> Self {
        Self {
            calculator,
            formatter,
            error: None,
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        let calculator = match settings.seed {
            Some(seed) => Calculator::with_seed(seed),
            None => Calculator::new(),
        };

        Self::new(
            calculator.with_trig_mode(settings.trig_mode),
            DisplayFormatter::new(settings.precision),
        )
    }

    pub fn calculator(&self) -> &Calculator {
        &self.calculator
    }

    /// The calculation error currently shown, if any.
    pub fn error(&self) -> Option<&CalculatorError> {
        self.error.as_ref()
    }

    /// Presses one key.
    ///
    /// While an error is shown every key but `AC` is ignored. A calculation
    /// error latches the error display; rejected input is returned without
    /// latching anything.
    pub fn press(
        &mut self,
        key: Key,
    ) -> Result<(), SessionError> {
        if self.error.is_some() && !matches!(key, Key::AllClear) {
            trace!(%key, "key ignored while error is shown");
            return Ok(());
        }

        debug!(%key, "key pressed");
        let result = match key {
            Key::Digit(digit) => self.calculator.input_digit(digit),
            Key::DecimalPoint => {
                self.calculator.insert_decimal_point();
                Ok(())
            }
            Key::Number(number) => {
                self.calculator.input_number(number);
                Ok(())
            }
            Key::Binary(op) => self.calculator.input_operation(op),
            Key::Unary(op) => self.calculator.input_unary(op),
            Key::Special(input) => {
                self.calculator.input_special(input);
                Ok(())
            }
            Key::Config(config) => {
                self.calculator.set_config(config);
                Ok(())
            }
            Key::Memory(function) => {
                self.calculator.perform_memory(function);
                Ok(())
            }
            Key::MemoryRecall => {
                self.calculator.recall_memory();
                Ok(())
            }
            Key::Equals => self.calculator.evaluate().map(|_| ()),
            Key::AllClear => {
                self.error = None;
                self.calculator.all_clear();
                Ok(())
            }
        };
        trace!(state = %self.calculator);

        result.map_err(|error| {
            if error.is_calculation_error() {
                warn!(%error, "showing error until all clear");
                self.error = Some(error);
            }
            SessionError::from(error)
        })
    }

    /// Presses every key on a line in order. Problems are collected rather
    /// than stopping the line, matching a user who keeps typing.
    pub fn press_line(
        &mut self,
        line: &str,
    ) -> Vec<SessionError> {
        Key::parse_line(line)
            .filter_map(|key| {
                key.map_err(SessionError::from)
                    .and_then(|key| self.press(key))
                    .err()
            })
            .collect()
    }

    /// The text on the screen.
    pub fn display(&self) -> String {
        if self.error.is_some() {
            return ERROR_DISPLAY.to_string();
        }
        self.formatter.format_entry(self.calculator.active_operand())
    }

    /// Mode indicators: angle unit, `M` when memory is non-zero and the
    /// highlighted operator.
    pub fn indicators(&self) -> String {
        let mut parts = vec![self.calculator.trig_mode().to_string()];
        if self.calculator.memory() != 0.0 {
            parts.push("M".to_string());
        }
        if let Some(op) = self.calculator.pending_operation() {
            parts.push(op.to_string());
        }
        parts.join(" ")
    }
}
