//! Pie-chart geometry for the breakdown page.
//!
//! Segments are plain angle spans a renderer sweeps clockwise from 0°;
//! no drawing happens here.

use cafetal_core::{round_dp, Category, EmissionBreakdown};
use serde::{Deserialize, Serialize};

/// Fixed legend color per category.
pub fn category_color(category: Category) -> &'static str {
    match category {
        Category::Fertilizantes => "#2d6a4f",
        Category::Energia => "#40916c",
        Category::Transporte => "#52b788",
        Category::Procesamiento => "#74c69d",
        Category::Residuos => "#95d5b2",
        Category::Deforestacion => "#b7e4c7",
    }
}

/// One wedge of the pie.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PieSegment {
    pub name: String,
    /// kg CO₂e, unrounded.
    pub value: f64,
    /// Share of the total, percent, unrounded.
    pub percent: f64,
    pub start_angle: f64,
    pub end_angle: f64,
    pub color: String,
}

/// The breakdown pie: wedges in category order plus legend labels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PieChart {
    pub total: f64,
    pub segments: Vec<PieSegment>,
    /// "Name (pct%)" labels, share rounded to a whole percent.
    pub legend: Vec<String>,
}

impl PieChart {
    /// Build the pie from a breakdown. The breakdown carries only
    /// strictly-positive entries, so the wedges partition the full circle.
    pub fn from_breakdown(breakdown: &EmissionBreakdown) -> PieChart {
        let total = breakdown.sum();
        let mut start_angle = 0.0;
        let mut segments = Vec::with_capacity(breakdown.0.len());
        let mut legend = Vec::with_capacity(breakdown.0.len());

        for entry in &breakdown.0 {
            let share = if total == 0.0 {
                0.0
            } else {
                entry.value / total
            };
            let end_angle = start_angle + share * 360.0;
            legend.push(format!(
                "{} ({}%)",
                entry.category.name(),
                round_dp(share * 100.0, 0)
            ));
            segments.push(PieSegment {
                name: entry.category.name().to_string(),
                value: entry.value,
                percent: share * 100.0,
                start_angle,
                end_angle,
                color: category_color(entry.category).to_string(),
            });
            start_angle = end_angle;
        }

        PieChart {
            total,
            segments,
            legend,
        }
    }
}
