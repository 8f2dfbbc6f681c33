//! Self-reported lifestyle data submitted for estimation.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::error::{EstimateError, Result};

/// Message shown when a submission carries a negative numeric field.
pub const NEGATIVE_INPUT_MESSAGE: &str = "Please enter positive values for all numeric fields.";

/// Failure to parse one of the lifestyle enumerations from its wire string.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown {kind} '{value}', expected one of: {expected}")]
pub struct ParseLifestyleError {
    pub kind: &'static str,
    pub value: String,
    pub expected: String,
}

/// An enumeration whose variants travel as fixed lowercase strings.
pub trait WireName: Sized + Copy + 'static {
    const KIND: &'static str;
    const ALL: &'static [Self];

    fn as_str(&self) -> &'static str;

    fn parse_wire(s: &str) -> std::result::Result<Self, ParseLifestyleError> {
        let wanted = s.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|v| v.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| ParseLifestyleError {
                kind: Self::KIND,
                value: s.to_string(),
                expected: Self::ALL
                    .iter()
                    .map(|v| v.as_str())
                    .collect::<Vec<_>>()
                    .join(", "),
            })
    }
}

/// Primary mode of transportation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Transportation {
    Car,
    Public,
    Bike,
    Electric,
}

impl WireName for Transportation {
    const KIND: &'static str = "transportation mode";
    const ALL: &'static [Self] = &[Self::Car, Self::Public, Self::Bike, Self::Electric];

    fn as_str(&self) -> &'static str {
        match self {
            Self::Car => "car",
            Self::Public => "public",
            Self::Bike => "bike",
            Self::Electric => "electric",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Diet {
    MeatHeavy,
    Mixed,
    Vegetarian,
    Vegan,
}

impl WireName for Diet {
    const KIND: &'static str = "diet";
    const ALL: &'static [Self] = &[Self::MeatHeavy, Self::Mixed, Self::Vegetarian, Self::Vegan];

    fn as_str(&self) -> &'static str {
        match self {
            Self::MeatHeavy => "meat-heavy",
            Self::Mixed => "mixed",
            Self::Vegetarian => "vegetarian",
            Self::Vegan => "vegan",
        }
    }
}

/// Household waste production.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WasteLevel {
    Low,
    Moderate,
    High,
}

impl WireName for WasteLevel {
    const KIND: &'static str = "waste level";
    const ALL: &'static [Self] = &[Self::Low, Self::Moderate, Self::High];

    fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Moderate => "moderate",
            Self::High => "high",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ShoppingFrequency {
    Minimal,
    Moderate,
    Frequent,
}

impl WireName for ShoppingFrequency {
    const KIND: &'static str = "shopping frequency";
    const ALL: &'static [Self] = &[Self::Minimal, Self::Moderate, Self::Frequent];

    fn as_str(&self) -> &'static str {
        match self {
            Self::Minimal => "minimal",
            Self::Moderate => "moderate",
            Self::Frequent => "frequent",
        }
    }
}

macro_rules! wire_string_impls {
    ($($ty:ty),*) => {$(
        impl FromStr for $ty {
            type Err = ParseLifestyleError;

            fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
                <$ty as WireName>::parse_wire(s)
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    )*};
}

wire_string_impls!(Transportation, Diet, WasteLevel, ShoppingFrequency);

/// The seven lifestyle fields collected from the user.
///
/// Numeric fields are monthly quantities. They default to 0 when absent from
/// a JSON body; the enumerations have no default on the wire and must be
/// present.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LifestyleInput {
    /// Electricity in kWh per month
    #[serde(default)]
    pub electricity: f64,
    /// Natural gas in therms per month
    #[serde(default)]
    pub natural_gas: f64,
    pub transportation: Transportation,
    /// Distance travelled in miles per month
    #[serde(default)]
    pub mileage: f64,
    pub diet: Diet,
    pub waste: WasteLevel,
    pub shopping: ShoppingFrequency,
}

impl Default for LifestyleInput {
    fn default() -> Self {
        Self {
            electricity: 0.0,
            natural_gas: 0.0,
            transportation: Transportation::Car,
            mileage: 0.0,
            diet: Diet::Mixed,
            waste: WasteLevel::Moderate,
            shopping: ShoppingFrequency::Moderate,
        }
    }
}

impl LifestyleInput {
    fn numeric_fields(&self) -> [(&'static str, f64); 3] {
        [
            ("electricity", self.electricity),
            ("naturalGas", self.natural_gas),
            ("mileage", self.mileage),
        ]
    }

    /// Names of the numeric fields that are negative or not finite.
    pub fn invalid_fields(&self) -> Vec<&'static str> {
        self.numeric_fields()
            .into_iter()
            .filter(|(_, v)| !v.is_finite() || *v < 0.0)
            .map(|(name, _)| name)
            .collect()
    }

    /// Client-side check run before any submission leaves the process.
    pub fn validate(&self) -> Result<()> {
        let fields = self.invalid_fields();
        if fields.is_empty() {
            Ok(())
        } else {
            Err(EstimateError::Validation { fields })
        }
    }

    /// Copy of the input with every numeric field forced to a finite, non-negative value.
    pub fn clamped(&self) -> Self {
        fn clamp(v: f64) -> f64 {
            if v.is_finite() {
                v.max(0.0)
            } else {
                0.0
            }
        }
        Self {
            electricity: clamp(self.electricity),
            natural_gas: clamp(self.natural_gas),
            mileage: clamp(self.mileage),
            ..self.clone()
        }
    }
}
