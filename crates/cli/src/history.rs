//! History subcommands: store selection, save, list.

use std::path::{Path, PathBuf};

use clap::Args;
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;

use cafetal_storage::{
    FileHistoryStore, HistoryQuery, HistoryRecord, HistoryStore, HttpHistoryStore,
};

use crate::{assess, load_survey, OutputFormat};

/// Where history operations go: the HTTP backend when `--api-url` is set,
/// otherwise a local JSON file.
#[derive(Args)]
pub(crate) struct StoreTarget {
    /// Backend base URL; selects the HTTP history service
    #[arg(long)]
    pub api_url: Option<String>,

    /// Session cookie for the backend
    #[arg(long)]
    pub cookie: Option<String>,

    /// Local history file used when no --api-url is given
    #[arg(long, default_value = "cafetal-history.json")]
    pub store: PathBuf,
}

impl StoreTarget {
    fn open(&self) -> Result<Box<dyn HistoryStore>, String> {
        match self.api_url.as_deref() {
            Some(api_url) => {
                let mut store = HttpHistoryStore::new(api_url);
                if let Some(cookie) = self.cookie.as_deref() {
                    store = store.with_cookie(cookie);
                }
                Ok(Box::new(store))
            }
            None => FileHistoryStore::open(&self.store)
                .map(|s| Box::new(s) as Box<dyn HistoryStore>)
                .map_err(|e| e.to_string()),
        }
    }
}

/// A runtime for driving the async store seam from the sync CLI.
pub(crate) fn runtime() -> Result<tokio::runtime::Runtime, String> {
    tokio::runtime::Runtime::new().map_err(|e| format!("tokio runtime: {e}"))
}

pub(crate) fn cmd_save(survey_path: &Path, target: &StoreTarget) -> Result<(), String> {
    let survey = load_survey(survey_path)?;
    let assessment = assess(&survey)?;
    let fecha = now_rfc3339()?;
    let record = HistoryRecord::new(survey, &assessment, fecha);

    let store = target.open()?;
    runtime()?
        .block_on(store.save(record))
        .map_err(|e| e.to_string())?;

    println!("Cálculo guardado en el historial.");
    Ok(())
}

pub(crate) fn cmd_list(
    page: u32,
    per_page: u32,
    search: Option<String>,
    target: &StoreTarget,
    output: OutputFormat,
) -> Result<(), String> {
    let query = HistoryQuery {
        page,
        per_page,
        search,
    };
    let store = target.open()?;
    let page = runtime()?
        .block_on(store.list(&query))
        .map_err(|e| e.to_string())?;

    match output {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&page)
                .map_err(|e| format!("serialize history page: {e}"))?;
            println!("{json}");
        }
        OutputFormat::Text => {
            println!(
                "Historial (página {} de {}, {} cálculos)",
                page.page, page.pages, page.total
            );
            for record in &page.items {
                let finca = if record.survey.nombre_finca.is_empty() {
                    "finca sin nombre"
                } else {
                    &record.survey.nombre_finca
                };
                println!(
                    "  {}  {:<24} {:>10.2} kg CO₂e  {:.3} kg/kg",
                    record.fecha, finca, record.total, record.por_kg
                );
            }
        }
    }
    Ok(())
}

fn now_rfc3339() -> Result<String, String> {
    OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .map_err(|e| format!("format timestamp: {e}"))
}
