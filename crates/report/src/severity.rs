use serde::{Deserialize, Serialize};

/// Traffic-light classification of a headline figure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Bueno,
    Medio,
    Alto,
}

impl Severity {
    /// The hex color the renderer paints this severity with.
    pub fn hex(&self) -> &'static str {
        match self {
            Severity::Bueno => "#2d6a4f",
            Severity::Medio => "#bb3e03",
            Severity::Alto => "#9b2226",
        }
    }
}

/// Classify the aggregate footprint. Boundaries are strict: exactly 1500
/// (or 3000) kg stays in the lower band.
pub fn total_severity(total_co2e: f64) -> Severity {
    if total_co2e > 3000.0 {
        Severity::Alto
    } else if total_co2e > 1500.0 {
        Severity::Medio
    } else {
        Severity::Bueno
    }
}

/// Classify the per-kg footprint, the headline indicator.
pub fn per_kg_severity(co2e_per_kg: f64) -> Severity {
    if co2e_per_kg > 1.5 {
        Severity::Alto
    } else if co2e_per_kg > 1.0 {
        Severity::Medio
    } else {
        Severity::Bueno
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn total_boundaries() {
        assert_eq!(total_severity(0.0), Severity::Bueno);
        assert_eq!(total_severity(1500.0), Severity::Bueno);
        assert_eq!(total_severity(1500.01), Severity::Medio);
        assert_eq!(total_severity(3000.0), Severity::Medio);
        assert_eq!(total_severity(3000.01), Severity::Alto);
    }

    #[test]
    fn per_kg_boundaries() {
        assert_eq!(per_kg_severity(1.0), Severity::Bueno);
        assert_eq!(per_kg_severity(1.2), Severity::Medio);
        assert_eq!(per_kg_severity(1.5), Severity::Medio);
        assert_eq!(per_kg_severity(1.51), Severity::Alto);
    }
}
