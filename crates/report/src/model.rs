//! The report document model.
//!
//! A [`Report`] is plain data a downstream renderer (PDF, HTML, terminal)
//! walks page by page; this crate never draws anything.

use serde::{Deserialize, Serialize};

use crate::pie::PieChart;

/// A label/value display line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    pub label: String,
    pub value: String,
}

/// A figure with the color it should be painted in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metric {
    pub label: String,
    pub value: String,
    pub color: String,
}

/// One page of the report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Page {
    Cover {
        productor: String,
        finca: String,
        area: String,
        produccion: String,
    },
    Inputs {
        lines: Vec<LineItem>,
    },
    Results {
        headline: Vec<Metric>,
        indicators: Vec<Metric>,
    },
    Breakdown {
        lines: Vec<LineItem>,
        chart: PieChart,
    },
}

/// The assembled report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub title: String,
    pub subtitle: String,
    /// Display date on the cover.
    pub fecha: String,
    pub pages: Vec<Page>,
}

impl Report {
    /// Attribution line every page's footer carries.
    pub const FOOTER: &'static str = "Generado por EUDR Calculator App";

    /// Page-number label for the 1-based page number.
    pub fn page_label(&self, page_number: usize) -> String {
        format!("Página {} de {}", page_number, self.pages.len())
    }
}
