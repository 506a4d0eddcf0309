//! Special inputs, configuration toggles and memory functions.

use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};

/// A value that replaces the active operand wholesale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpecialInput {
    EulersConstant,
    Pi,
    RandomNumber,
}

impl SpecialInput {
    pub const ALL: [Self; 3] = [Self::EulersConstant, Self::Pi, Self::RandomNumber];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::EulersConstant => "e",
            Self::Pi => "pi",
            Self::RandomNumber => "rand",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|input| input.as_str() == s)
    }

    /// Produces the value; random numbers are uniform in `[0, 1)`.
    pub fn value<R: Rng>(
        &self,
        rng: &mut R,
    ) -> f64 {
        match self {
            Self::EulersConstant => std::f64::consts::E,
            Self::Pi => std::f64::consts::PI,
            Self::RandomNumber => rng.gen_range(0.0..1.0),
        }
    }
}

/// Angle unit used by the trigonometric functions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrigMode {
    Degrees,
    #[default]
    Radians,
}

impl TrigMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Degrees => "deg",
            Self::Radians => "rad",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "deg" | "degrees" => Some(Self::Degrees),
            "rad" | "radians" => Some(Self::Radians),
            _ => None,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::Degrees => Self::Radians,
            Self::Radians => Self::Degrees,
        }
    }

    /// Converts an angle expressed in this unit to radians.
    pub fn angle_to_radians(
        self,
        angle: f64,
    ) -> f64 {
        match self {
            Self::Degrees => angle.to_radians(),
            Self::Radians => angle,
        }
    }

    /// Converts an angle in radians to this unit.
    pub fn radians_to_angle(
        self,
        radians: f64,
    ) -> f64 {
        match self {
            Self::Degrees => radians.to_degrees(),
            Self::Radians => radians,
        }
    }
}

/// A change to the engine's configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Configuration {
    ToggleDegreesOrRadians,
}

impl Configuration {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ToggleDegreesOrRadians => "Rad",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Rad" | "Deg" => Some(Self::ToggleDegreesOrRadians),
            _ => None,
        }
    }
}

/// An operation on the memory register.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MemoryFunction {
    Clear,
    Add,
    Subtract,
}

impl MemoryFunction {
    pub const ALL: [Self; 3] = [Self::Clear, Self::Add, Self::Subtract];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Clear => "mc",
            Self::Add => "m+",
            Self::Subtract => "m-",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|function| function.as_str() == s)
    }
}

macro_rules! display_as_label {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl fmt::Display for $ty {
                fn fmt(
                    &self,
                    f: &mut fmt::Formatter<'_>,
                ) -> fmt::Result {
                    f.write_str(self.as_str())
                }
            }
        )+
    };
}

display_as_label!(SpecialInput, TrigMode, Configuration, MemoryFunction);
