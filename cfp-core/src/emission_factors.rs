//! Approximate reference emission factors.
//!
//! These are quoted to the model as context. The proxy never multiplies by
//! them; only [`crate::reference`] does, for the explicit offline estimate.

use crate::lifestyle::{Diet, Transportation};

/// Pounds CO2 per kWh of grid electricity
pub const ELECTRICITY_LBS_PER_KWH: f64 = 0.92;
/// Pounds CO2 per therm of natural gas
pub const NATURAL_GAS_LBS_PER_THERM: f64 = 11.7;
pub const CAR_LBS_PER_MILE: f64 = 0.79;
pub const PUBLIC_TRANSIT_LBS_PER_MILE: f64 = 0.14;
pub const ELECTRIC_VEHICLE_LBS_PER_MILE: f64 = 0.24;

pub const MEAT_HEAVY_DIET_TONS: f64 = 3.3;
pub const MIXED_DIET_TONS: f64 = 2.5;
pub const VEGETARIAN_DIET_TONS: f64 = 1.7;
pub const VEGAN_DIET_TONS: f64 = 1.5;

/// Metric tons per pound
pub const TONS_PER_LB: f64 = 0.000_453_592_37;

/// Pounds CO2 per mile for a transportation mode. Cycling and walking emit nothing.
pub fn lbs_per_mile(mode: Transportation) -> f64 {
    match mode {
        Transportation::Car => CAR_LBS_PER_MILE,
        Transportation::Public => PUBLIC_TRANSIT_LBS_PER_MILE,
        Transportation::Electric => ELECTRIC_VEHICLE_LBS_PER_MILE,
        Transportation::Bike => 0.0,
    }
}

/// Annual baseline in tons CO2e for a diet.
pub fn diet_tons_per_year(diet: Diet) -> f64 {
    match diet {
        Diet::MeatHeavy => MEAT_HEAVY_DIET_TONS,
        Diet::Mixed => MIXED_DIET_TONS,
        Diet::Vegetarian => VEGETARIAN_DIET_TONS,
        Diet::Vegan => VEGAN_DIET_TONS,
    }
}
