//! Report assembly: survey + assessment → four-page document model.

use cafetal_core::{Assessment, FarmSurvey, RoundedAssessment};

use crate::model::{LineItem, Metric, Page, Report};
use crate::pie::PieChart;
use crate::severity::{per_kg_severity, total_severity, Severity};

/// Quantity for a display line: blank inputs read "0".
fn fmt_qty(value: f64) -> String {
    if value == 0.0 {
        "0".to_string()
    } else {
        format!("{}", value)
    }
}

/// First letter upper-cased, as selector values are shown.
fn capitalize(token: &str) -> String {
    let mut chars = token.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

fn or_na(value: &str) -> String {
    if value.trim().is_empty() {
        "N/A".to_string()
    } else {
        value.to_string()
    }
}

fn line(label: &str, value: String) -> LineItem {
    LineItem {
        label: label.to_string(),
        value,
    }
}

fn metric(label: &str, value: String, color: &str) -> Metric {
    Metric {
        label: label.to_string(),
        value,
        color: color.to_string(),
    }
}

/// Assemble the full report for one assessment.
///
/// `fecha` is the display date for the cover (the host decides locale
/// and clock).
pub fn build_report(survey: &FarmSurvey, assessment: &Assessment, fecha: &str) -> Report {
    let rounded = RoundedAssessment::from_assessment(assessment);

    let cover = Page::Cover {
        productor: or_na(&survey.nombre_productor),
        finca: or_na(&survey.nombre_finca),
        area: format!("{} ha", fmt_qty(survey.area_cultivada)),
        produccion: format!("{} kg café verde", fmt_qty(survey.produccion_verde)),
    };

    let inputs = Page::Inputs {
        lines: vec![
            line("Fertilizante Total (kg)", fmt_qty(survey.fertilizante_total)),
            line(
                "Tipo de Fertilizante",
                capitalize(survey.tipo_fertilizante.as_str()),
            ),
            line("Energía Eléctrica (kWh)", fmt_qty(survey.energia_electrica)),
            line("Combustible (litros)", fmt_qty(survey.combustible_litros)),
            line(
                "Tipo de Combustible",
                capitalize(survey.tipo_combustible.as_str()),
            ),
            line("Árboles de Sombra", fmt_qty(survey.arboles_sombra)),
            line("Área de Copa (m²/árbol)", fmt_qty(survey.area_copa_promedio)),
            line("Distancia de Transporte (km)", fmt_qty(survey.distancia_km)),
            line("Volumen (cargas)", fmt_qty(survey.volumen_cargas)),
            line(
                "Tipo de Procesamiento",
                capitalize(survey.tipo_procesamiento.as_str()),
            ),
            line("Residuos Totales (kg)", fmt_qty(survey.residuos_totales)),
            line(
                "Residuos Compostados (kg)",
                fmt_qty(survey.residuos_compostados),
            ),
            line("Bosque Base 2020 (ha)", fmt_qty(survey.bosque_base)),
            line("Bosque Actual (ha)", fmt_qty(survey.bosque_actual)),
        ],
    };

    let results = Page::Results {
        headline: vec![
            metric(
                "Huella de Carbono Total",
                format!("{:.2} kg CO₂e", rounded.total),
                total_severity(rounded.total).hex(),
            ),
            metric(
                "Huella por kg de café verde",
                format!("{:.3} kg CO₂e/kg", rounded.por_kg),
                per_kg_severity(rounded.por_kg).hex(),
            ),
            metric(
                "Rendimiento promedio",
                format!("{:.0} kg/ha", rounded.rendimiento),
                Severity::Bueno.hex(),
            ),
        ],
        indicators: vec![
            metric(
                "Fertilizante por ha",
                format!("{:.1} kg/ha", rounded.fert_por_ha),
                "#8B4513",
            ),
            metric(
                "Árboles por ha",
                format!("{:.0}", rounded.arboles_por_ha),
                "#2d6a4f",
            ),
            metric(
                "Cobertura de copa",
                format!("{:.1}%", rounded.cobertura_porc),
                "#1b4332",
            ),
            metric(
                "Distancia promedio",
                format!("{:.1} km", rounded.distancia_prom),
                "#40916c",
            ),
            metric(
                "Fracción compostada",
                format!("{:.0}%", rounded.fraccion_compost),
                "#52b788",
            ),
            metric(
                "Deforestación",
                format!("{:.1}%", rounded.deforestacion_porc),
                if rounded.deforestacion_porc == 0.0 {
                    "#2d6a4f"
                } else {
                    "#9b2226"
                },
            ),
        ],
    };

    let breakdown = Page::Breakdown {
        lines: rounded
            .desglose
            .iter()
            .map(|share| {
                line(
                    &share.name,
                    format!("{:.1} kg CO₂e ({:.1}%)", share.value, share.percent),
                )
            })
            .collect(),
        chart: PieChart::from_breakdown(&assessment.breakdown),
    };

    Report {
        title: "Reporte de Huella de Carbono".to_string(),
        subtitle: "Reglamento EUDR".to_string(),
        fecha: fecha.to_string(),
        pages: vec![cover, inputs, results, breakdown],
    }
}
