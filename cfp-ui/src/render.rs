//! Plain-text rendering of a footprint result.
//!
//! [`Report`] is a view model: every number is formatted once here and the
//! `Display` impl only lays the strings out. Nothing is recomputed or
//! re-validated.

use std::fmt;

use cfp_core::footprint::{BreakdownEntry, ComparisonStatus, FootprintResult};

/// Width of progress bars in characters.
pub const BAR_WIDTH: usize = 30;

/// Draw `percent` (clamped to 0-100) as a fixed-width bar.
pub fn bar(percent: f64, width: usize) -> String {
    let percent = if percent.is_finite() {
        percent.clamp(0.0, 100.0)
    } else {
        0.0
    };
    let filled = ((percent / 100.0) * width as f64).round() as usize;
    format!("[{}{}]", "#".repeat(filled), "-".repeat(width - filled))
}

/// Upper-case the first letter of every word.
pub fn capitalize(text: &str) -> String {
    text.split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn format_tons(tons: f64) -> String {
    format!("{:.2}", tons)
}

#[derive(Debug, Clone, PartialEq)]
pub struct StatusBadge {
    pub label: String,
    pub icon: &'static str,
    pub message: &'static str,
}

impl StatusBadge {
    pub fn for_status(status: ComparisonStatus) -> Self {
        let (icon, message) = match status {
            ComparisonStatus::Good => ("✔", "You're doing better than average! Keep it up."),
            ComparisonStatus::Average => {
                ("↘", "You're at the average. There's room for improvement.")
            }
            ComparisonStatus::High => (
                "⚠",
                "Your footprint is above average. Let's work on reducing it.",
            ),
        };
        Self {
            label: status.as_str().to_uppercase(),
            icon,
            message,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BreakdownRow {
    pub category: String,
    pub amount: String,
    pub percentage: f64,
    pub bar: String,
}

pub fn breakdown_rows(entries: &[BreakdownEntry]) -> Vec<BreakdownRow> {
    entries
        .iter()
        .map(|entry| BreakdownRow {
            category: capitalize(&entry.category),
            amount: format_tons(entry.amount),
            percentage: entry.percentage,
            bar: bar(entry.percentage, BAR_WIDTH),
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub total: String,
    pub average: f64,
    /// Total as a percentage of the national average, before clamping
    pub progress: f64,
    pub progress_bar: String,
    pub badge: StatusBadge,
    pub rows: Vec<BreakdownRow>,
    pub recommendations: Vec<String>,
}

impl Report {
    pub fn from_result(result: &FootprintResult) -> Self {
        let average = result.comparison.average;
        let progress = result.carbon_footprint / average * 100.0;
        Self {
            total: format_tons(result.carbon_footprint),
            average,
            progress,
            progress_bar: bar(progress, BAR_WIDTH),
            badge: StatusBadge::for_status(result.comparison.status),
            rows: breakdown_rows(&result.breakdown),
            recommendations: result.recommendations.clone(),
        }
    }
}

impl fmt::Display for BreakdownRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "  {:<16} {} tons ({}%)",
            self.category, self.amount, self.percentage
        )?;
        write!(f, "  {}", self.bar)
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Annual Carbon Footprint")?;
        writeln!(f, "  {} tons CO2e / year", self.total)?;
        writeln!(f)?;
        writeln!(f, "  Your Impact       {} tons", self.total)?;
        writeln!(f, "  {}", self.progress_bar)?;
        writeln!(f, "  National Average  {} tons", self.average)?;
        writeln!(f)?;
        writeln!(f, "Impact Status: {} {}", self.badge.icon, self.badge.label)?;
        writeln!(f, "  {}", self.badge.message)?;
        writeln!(f)?;
        writeln!(f, "Emissions Breakdown")?;
        for row in &self.rows {
            writeln!(f, "{}", row)?;
        }
        writeln!(f)?;
        writeln!(f, "AI-Powered Recommendations")?;
        for (idx, rec) in self.recommendations.iter().enumerate() {
            writeln!(f, "  {}. {}", idx + 1, rec)?;
        }
        Ok(())
    }
}
