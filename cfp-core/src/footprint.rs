//! The structured estimate returned by the external model.

use serde::{Deserialize, Serialize};

use crate::error::{EstimateError, Result};

/// US national average footprint in tons CO2e per year.
pub const NATIONAL_AVERAGE_TONS: f64 = 16.0;

/// Fraction of the national average below which a footprint counts as good.
pub const GOOD_THRESHOLD: f64 = 0.8;
/// Fraction of the national average above which a footprint counts as high.
pub const HIGH_THRESHOLD: f64 = 1.2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComparisonStatus {
    Good,
    Average,
    High,
}

impl ComparisonStatus {
    /// Classify a total against the national average.
    ///
    /// Only the local reference calculation uses this; results from the
    /// model carry their own status.
    pub fn classify(total_tons: f64, average_tons: f64) -> Self {
        let ratio = total_tons / average_tons;
        if ratio < GOOD_THRESHOLD {
            Self::Good
        } else if ratio > HIGH_THRESHOLD {
            Self::High
        } else {
            Self::Average
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Good => "good",
            Self::Average => "average",
            Self::High => "high",
        }
    }
}

/// One category's share of the total footprint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct BreakdownEntry {
    pub category: String,
    /// Tons CO2e per year
    pub amount: f64,
    /// Share of the total, 0-100. Entries are not required to sum to 100.
    pub percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Comparison {
    pub average: f64,
    pub status: ComparisonStatus,
}

/// A complete footprint estimate.
///
/// Decoding is strict: unknown fields, missing fields and mistyped fields
/// are all rejected. [`FootprintResult::validate`] checks the values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct FootprintResult {
    /// Total in tons CO2e per year
    pub carbon_footprint: f64,
    pub breakdown: Vec<BreakdownEntry>,
    pub recommendations: Vec<String>,
    pub comparison: Comparison,
}

fn schema_error(reason: impl Into<String>) -> EstimateError {
    EstimateError::Schema(reason.into())
}

fn check_tons(field: &str, value: f64) -> Result<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(schema_error(format!(
            "{} must be a finite, non-negative number of tons (got {})",
            field, value
        )));
    }
    Ok(())
}

impl FootprintResult {
    /// Check value constraints that the type system does not capture.
    pub fn validate(&self) -> Result<()> {
        check_tons("carbonFootprint", self.carbon_footprint)?;

        for (idx, entry) in self.breakdown.iter().enumerate() {
            if entry.category.trim().is_empty() {
                return Err(schema_error(format!("breakdown[{}].category is blank", idx)));
            }
            check_tons(&format!("breakdown[{}].amount", idx), entry.amount)?;
            if !entry.percentage.is_finite() || !(0.0..=100.0).contains(&entry.percentage) {
                return Err(schema_error(format!(
                    "breakdown[{}].percentage must be within 0-100 (got {})",
                    idx, entry.percentage
                )));
            }
        }

        if self.recommendations.is_empty() {
            return Err(schema_error("recommendations is empty"));
        }
        if let Some(idx) = self.recommendations.iter().position(|r| r.trim().is_empty()) {
            return Err(schema_error(format!("recommendations[{}] is blank", idx)));
        }

        let average = self.comparison.average;
        if !average.is_finite() || average <= 0.0 {
            return Err(schema_error(format!(
                "comparison.average must be a positive number (got {})",
                average
            )));
        }
        if (average - NATIONAL_AVERAGE_TONS).abs() > f64::EPSILON {
            log::warn!(
                "Model reported a national average of {} tons instead of {}",
                average,
                NATIONAL_AVERAGE_TONS
            );
        }
        Ok(())
    }
}
