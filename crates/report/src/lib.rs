//! cafetal-report: renderer-agnostic report documents.
//!
//! Takes a survey and its assessment and assembles the four-page report the
//! export surface draws — cover, inputs, color-coded results, and the
//! emission breakdown with its pie chart. Actual drawing (PDF primitives,
//! fonts, layout) is a collaborator concern; everything here is serde data.

mod assemble;
mod model;
mod pie;
mod severity;

pub use assemble::build_report;
pub use model::{LineItem, Metric, Page, Report};
pub use pie::{category_color, PieChart, PieSegment};
pub use severity::{per_kg_severity, total_severity, Severity};
