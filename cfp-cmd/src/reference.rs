//! Offline estimate from the reference emission factors.

use cfp_core::footprint::NATIONAL_AVERAGE_TONS;
use cfp_core::lifestyle::LifestyleInput;
use cfp_core::reference::ReferenceEstimate;
use cfp_ui::render::{breakdown_rows, format_tons, StatusBadge};

pub fn run_reference(input: &LifestyleInput) -> anyhow::Result<()> {
    input.validate()?;
    println!("{}", render_reference(&ReferenceEstimate::compute(input)));
    Ok(())
}

fn render_reference(estimate: &ReferenceEstimate) -> String {
    let badge = StatusBadge::for_status(estimate.status);
    let mut lines = vec![
        "Reference Estimate (energy, transportation and diet only)".to_string(),
        format!("  {} tons CO2e / year", format_tons(estimate.total_tons)),
        format!(
            "  {} {} against a national average of {} tons",
            badge.icon, badge.label, NATIONAL_AVERAGE_TONS
        ),
        String::new(),
    ];
    lines.extend(breakdown_rows(&estimate.breakdown()).iter().map(|r| r.to_string()));
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use cfp_core::lifestyle::Diet;

    #[test]
    fn test_render_reference() {
        let estimate = ReferenceEstimate::compute(&LifestyleInput {
            diet: Diet::Vegan,
            ..LifestyleInput::default()
        });
        let rendered = render_reference(&estimate);
        assert!(rendered.contains("1.50 tons CO2e / year"));
        assert!(rendered.contains("GOOD"));
        assert!(rendered.contains("Diet"));
        assert_eq!(rendered.matches(" tons (").count(), 3);
    }

    #[test]
    fn test_negative_input_rejected() {
        let input = LifestyleInput {
            electricity: -3.0,
            ..LifestyleInput::default()
        };
        assert!(run_reference(&input).is_err());
    }
}
