//! Prompt text sent to the chat-completion model.

use crate::emission_factors::*;
use crate::lifestyle::LifestyleInput;

/// Sampling temperature for every estimation request.
pub const TEMPERATURE: f64 = 0.3;

/// Fixed instruction defining the role, the deliverables and the output schema.
pub const SYSTEM_PROMPT: &str = r#"You are an expert climate scientist and environmental analyst. Your role is to analyze lifestyle data and predict carbon footprints with high accuracy. You must provide:
1. A precise carbon footprint estimate in tons CO2e per year
2. A detailed breakdown by category (energy, transportation, diet, waste, shopping)
3. 5-7 personalized, actionable recommendations to reduce emissions
4. A comparison to the national average (16 tons CO2e/year in the US)

Respond ONLY with valid JSON in this exact format:
{
  "carbonFootprint": number,
  "breakdown": [
    {"category": string, "amount": number, "percentage": number}
  ],
  "recommendations": [string],
  "comparison": {
    "average": 16,
    "status": "good" | "average" | "high"
  }
}"#;

/// Per-submission prompt carrying the raw field values and the reference factors.
pub fn user_prompt(input: &LifestyleInput) -> String {
    format!(
        "Analyze this lifestyle data and predict the carbon footprint:

Energy Usage:
- Monthly Electricity: {electricity} kWh
- Monthly Natural Gas: {gas} therms

Transportation:
- Primary Mode: {mode}
- Monthly Mileage: {mileage} miles

Lifestyle:
- Diet: {diet}
- Waste Production: {waste}
- Shopping Habits: {shopping}

Calculate the total annual carbon footprint, break it down by category, and provide personalized recommendations. Consider:
- Electricity: ~{ELECTRICITY_LBS_PER_KWH} lbs CO2/kWh
- Natural gas: ~{NATURAL_GAS_LBS_PER_THERM} lbs CO2/therm
- Car: ~{CAR_LBS_PER_MILE} lbs CO2/mile
- Public transit: ~{PUBLIC_TRANSIT_LBS_PER_MILE} lbs CO2/mile
- Electric vehicle: ~{ELECTRIC_VEHICLE_LBS_PER_MILE} lbs CO2/mile
- Meat-heavy diet: ~{MEAT_HEAVY_DIET_TONS} tons CO2/year
- Mixed diet: ~{MIXED_DIET_TONS} tons CO2/year
- Vegetarian: ~{VEGETARIAN_DIET_TONS} tons CO2/year
- Vegan: ~{VEGAN_DIET_TONS} tons CO2/year

Return only the JSON with accurate calculations.",
        electricity = input.electricity,
        gas = input.natural_gas,
        mode = input.transportation,
        mileage = input.mileage,
        diet = input.diet,
        waste = input.waste,
        shopping = input.shopping,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lifestyle::{Diet, ShoppingFrequency, Transportation, WasteLevel};

    fn input() -> LifestyleInput {
        LifestyleInput {
            electricity: 300.0,
            natural_gas: 50.0,
            transportation: Transportation::Car,
            mileage: 500.0,
            diet: Diet::MeatHeavy,
            waste: WasteLevel::High,
            shopping: ShoppingFrequency::Frequent,
        }
    }

    #[test]
    fn test_user_prompt_injects_raw_values() {
        let prompt = user_prompt(&input());
        assert!(prompt.contains("- Monthly Electricity: 300 kWh"));
        assert!(prompt.contains("- Monthly Natural Gas: 50 therms"));
        assert!(prompt.contains("- Primary Mode: car"));
        assert!(prompt.contains("- Monthly Mileage: 500 miles"));
        assert!(prompt.contains("- Diet: meat-heavy"));
        assert!(prompt.contains("- Waste Production: high"));
        assert!(prompt.contains("- Shopping Habits: frequent"));
    }

    #[test]
    fn test_user_prompt_carries_reference_factors() {
        let prompt = user_prompt(&input());
        for needle in [
            "~0.92 lbs CO2/kWh",
            "~11.7 lbs CO2/therm",
            "Car: ~0.79 lbs CO2/mile",
            "Public transit: ~0.14 lbs CO2/mile",
            "Electric vehicle: ~0.24 lbs CO2/mile",
            "Meat-heavy diet: ~3.3 tons",
            "Mixed diet: ~2.5 tons",
            "Vegetarian: ~1.7 tons",
            "Vegan: ~1.5 tons",
        ] {
            assert!(prompt.contains(needle), "missing {:?}", needle);
        }
    }

    #[test]
    fn test_fractional_values_are_not_rounded() {
        let prompt = user_prompt(&LifestyleInput {
            electricity: 312.5,
            ..input()
        });
        assert!(prompt.contains("312.5 kWh"));
    }

    #[test]
    fn test_system_prompt_defines_schema() {
        for key in ["\"carbonFootprint\"", "\"breakdown\"", "\"recommendations\"", "\"comparison\""] {
            assert!(SYSTEM_PROMPT.contains(key));
        }
        assert!(SYSTEM_PROMPT.contains("16 tons CO2e/year"));
    }
}
