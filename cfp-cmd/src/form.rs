//! The seven lifestyle fields as command-line flags.

use cfp_core::lifestyle::{Diet, LifestyleInput, ShoppingFrequency, Transportation, WasteLevel};
use clap::Args;

/// Negative numbers are accepted here so that validation, not the argument
/// parser, is what rejects them.
#[derive(Args, Debug, Clone)]
pub struct FormArgs {
    /// Monthly electricity use in kWh
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    pub electricity: f64,

    /// Monthly natural gas use in therms
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    pub natural_gas: f64,

    /// Primary transportation: car, public, bike, electric
    #[arg(long, default_value = "car")]
    pub transportation: Transportation,

    /// Monthly mileage in miles
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    pub mileage: f64,

    /// Diet: meat-heavy, mixed, vegetarian, vegan
    #[arg(long, default_value = "mixed")]
    pub diet: Diet,

    /// Waste production: low, moderate, high
    #[arg(long, default_value = "moderate")]
    pub waste: WasteLevel,

    /// Shopping habits: minimal, moderate, frequent
    #[arg(long, default_value = "moderate")]
    pub shopping: ShoppingFrequency,
}

impl FormArgs {
    pub fn into_input(self) -> LifestyleInput {
        LifestyleInput {
            electricity: self.electricity,
            natural_gas: self.natural_gas,
            transportation: self.transportation,
            mileage: self.mileage,
            diet: self.diet,
            waste: self.waste,
            shopping: self.shopping,
        }
    }
}
