//! Deterministic estimate from the reference emission factors.
//!
//! Covers the categories that have a published factor: energy,
//! transportation and diet. Waste and shopping have none and are left out,
//! so this total is a lower bound on what the model would report.

use crate::emission_factors::{
    diet_tons_per_year, lbs_per_mile, ELECTRICITY_LBS_PER_KWH, NATURAL_GAS_LBS_PER_THERM,
    TONS_PER_LB,
};
use crate::footprint::{BreakdownEntry, ComparisonStatus, NATIONAL_AVERAGE_TONS};
use crate::lifestyle::LifestyleInput;

const MONTHS_PER_YEAR: f64 = 12.0;

#[derive(Debug, Clone, PartialEq)]
pub struct ReferenceEstimate {
    pub energy_tons: f64,
    pub transportation_tons: f64,
    pub diet_tons: f64,
    pub total_tons: f64,
    pub status: ComparisonStatus,
}

impl ReferenceEstimate {
    /// Annualise the monthly inputs and convert pounds to metric tons.
    pub fn compute(input: &LifestyleInput) -> Self {
        let input = input.clamped();
        let energy_lbs = input.electricity * ELECTRICITY_LBS_PER_KWH
            + input.natural_gas * NATURAL_GAS_LBS_PER_THERM;
        let energy_tons = energy_lbs * MONTHS_PER_YEAR * TONS_PER_LB;
        let transportation_tons =
            input.mileage * lbs_per_mile(input.transportation) * MONTHS_PER_YEAR * TONS_PER_LB;
        let diet_tons = diet_tons_per_year(input.diet);
        let total_tons = energy_tons + transportation_tons + diet_tons;

        Self {
            energy_tons,
            transportation_tons,
            diet_tons,
            total_tons,
            status: ComparisonStatus::classify(total_tons, NATIONAL_AVERAGE_TONS),
        }
    }

    /// Per-category entries with percentages of the reference total.
    pub fn breakdown(&self) -> Vec<BreakdownEntry> {
        [
            ("energy", self.energy_tons),
            ("transportation", self.transportation_tons),
            ("diet", self.diet_tons),
        ]
        .into_iter()
        .map(|(category, amount)| BreakdownEntry {
            category: category.to_string(),
            amount,
            percentage: if self.total_tons > 0.0 {
                (amount / self.total_tons * 100.0).round()
            } else {
                0.0
            },
        })
        .collect()
    }
}
