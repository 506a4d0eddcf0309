//! Key labels understood by the command-line driver.
//!
//! A line of input is split on whitespace and every token is one key press.
//!
//! | Token | Key |
//! |-------------------------------|----------------------------------------|
//! | `0` .. `9` | a single digit |
//! | `.` | decimal point |
//! | `=` | evaluate |
//! | `AC` | all clear |
//! | `mr` | memory recall |
//! | `mc` `m+` `m-` | memory functions |
//! | `+` `-` `*` `/` `x^y` `y^x` `nthRt` `logY` `EE` | binary operations |
//! | `+/-` `%` `x^2` `sin` `cos-1` ... | unary operations |
//! | `e` `pi` `rand` | special inputs |
//! | `Rad` `Deg` | toggle angle unit |
//! | any other finite number | whole-number input (`12.5`, `-3`, `1e6`) |
//!
//! Single digits are digit keys rather than numbers so that `1 2 3` builds
//! `123` the way a keypad does.

use std::fmt;

use calc_core::{BinaryOperation, Configuration, MemoryFunction, SpecialInput, UnaryOperation};

/// One key press.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Key {
    Digit(u8),
    DecimalPoint,
    Number(f64),
    Binary(BinaryOperation),
    Unary(UnaryOperation),
    Special(SpecialInput),
    Config(Configuration),
    Memory(MemoryFunction),
    MemoryRecall,
    Equals,
    AllClear,
}

/// A token that names no key.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unrecognised key '{0}'")]
pub struct KeyParseError(pub String);

impl Key {
    /// Parses a single token. Labels take precedence over numbers, so `e` is
    /// Euler's constant while `2e3` is the number 2000.
    pub fn parse(token: &str) -> Result<Self, KeyParseError> {
        match token {
            "." => return Ok(Self::DecimalPoint),
            "=" => return Ok(Self::Equals),
            "AC" => return Ok(Self::AllClear),
            "mr" => return Ok(Self::MemoryRecall),
            _ => {}
        }

        if let [digit @ b'0'..=b'9'] = token.as_bytes() {
            return Ok(Self::Digit(digit - b'0'));
        }

        if let Some(op) = BinaryOperation::parse(token) {
            return Ok(Self::Binary(op));
        }
        if let Some(op) = UnaryOperation::parse(token) {
            return Ok(Self::Unary(op));
        }
        if let Some(input) = SpecialInput::parse(token) {
            return Ok(Self::Special(input));
        }
        if let Some(config) = Configuration::parse(token) {
            return Ok(Self::Config(config));
        }
        if let Some(function) = MemoryFunction::parse(token) {
            return Ok(Self::Memory(function));
        }

        match token.parse::<f64>() {
            Ok(number) if number.is_finite() => Ok(Self::Number(number)),
            _ => Err(KeyParseError(token.to_string())),
        }
    }

    /// Parses every whitespace-separated token on a line, keeping failures in
    /// place so the caller can report them and carry on.
    pub fn parse_line(line: &str) -> impl Iterator<Item = Result<Self, KeyParseError>> + '_ {
        line.split_whitespace().map(Self::parse)
    }
}

impl fmt::Display for Key {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        match self {
            Self::Digit(digit) => write!(f, "{digit}"),
            Self::DecimalPoint => f.write_str("."),
            Self::Number(number) => write!(f, "{number}"),
            Self::Binary(op) => write!(f, "{op}"),
            Self::Unary(op) => write!(f, "{op}"),
            Self::Special(input) => write!(f, "{input}"),
            Self::Config(config) => write!(f, "{config}"),
            Self::Memory(function) => write!(f, "{function}"),
            Self::MemoryRecall => f.write_str("mr"),
            Self::Equals => f.write_str("="),
            Self::AllClear => f.write_str("AC"),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn single_digits_are_digit_keys() {
        assert_eq!(Key::parse("0"), Ok(Key::Digit(0)));
        assert_eq!(Key::parse("7"), Ok(Key::Digit(7)));
    }

    #[test]
    fn longer_numerals_are_number_keys() {
        assert_eq!(Key::parse("12"), Ok(Key::Number(12.0)));
        assert_eq!(Key::parse("-3.5"), Ok(Key::Number(-3.5)));
        assert_eq!(Key::parse("2e3"), Ok(Key::Number(2000.0)));
    }

    #[test]
    fn labels_win_over_numbers() {
        assert_eq!(Key::parse("e"), Ok(Key::Special(SpecialInput::EulersConstant)));
        assert_eq!(Key::parse("-"), Ok(Key::Binary(BinaryOperation::Subtract)));
        assert_eq!(Key::parse("+/-"), Ok(Key::Unary(UnaryOperation::SignChange)));
    }

    #[test]
    fn control_keys_parse() {
        assert_eq!(Key::parse("."), Ok(Key::DecimalPoint));
        assert_eq!(Key::parse("="), Ok(Key::Equals));
        assert_eq!(Key::parse("AC"), Ok(Key::AllClear));
        assert_eq!(Key::parse("mr"), Ok(Key::MemoryRecall));
        assert_eq!(Key::parse("m+"), Ok(Key::Memory(MemoryFunction::Add)));
        assert_eq!(
            Key::parse("Deg"),
            Ok(Key::Config(Configuration::ToggleDegreesOrRadians))
        );
    }

    #[test]
    fn non_finite_and_unknown_tokens_are_rejected() {
        for token in ["inf", "NaN", "sqr", "ac"] {
            assert_eq!(Key::parse(token), Err(KeyParseError(token.to_string())));
        }
    }

    #[test]
    fn every_label_round_trips_through_display() {
        let labelled = BinaryOperation::ALL
            .into_iter()
            .map(Key::Binary)
            .chain(UnaryOperation::ALL.into_iter().map(Key::Unary))
            .chain(SpecialInput::ALL.into_iter().map(Key::Special))
            .chain(MemoryFunction::ALL.into_iter().map(Key::Memory));

        for key in labelled {
            assert_eq!(Key::parse(&key.to_string()), Ok(key));
        }
    }

    #[test]
    fn parse_line_keeps_failures_in_position() {
        let keys: Vec<_> = Key::parse_line("  1 + bogus 2  =").collect();

        assert_eq!(keys.len(), 5);
        assert_eq!(keys[0], Ok(Key::Digit(1)));
        assert!(keys[2].is_err());
        assert_eq!(keys[4], Ok(Key::Equals));
    }
}
