mod history;

use std::fs;
use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, Subcommand, ValueEnum};
use time::macros::format_description;
use time::OffsetDateTime;

use cafetal_core::{compute, Assessment, FarmSurvey, RoundedAssessment};
use cafetal_report::build_report;
use cafetal_session::{HttpSession, SessionProvider};

/// Output format for CLI responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    Text,
    Json,
}

/// Cafetal carbon-footprint toolchain.
#[derive(Parser)]
#[command(name = "cafetal", version, about = "Cafetal carbon-footprint toolchain")]
struct Cli {
    /// Output format (text or json)
    #[arg(long, global = true, default_value = "text", value_enum)]
    output: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute the emission assessment for a survey JSON file
    Compute {
        /// Path to the survey JSON file
        survey: PathBuf,
    },

    /// Assemble the report document for a survey JSON file
    Report {
        /// Path to the survey JSON file
        survey: PathBuf,
        /// Write the report JSON here instead of stdout
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Saved-calculation history
    History {
        #[command(subcommand)]
        command: HistoryCommands,
    },

    /// Show who holds the current backend session
    Whoami {
        /// Backend base URL
        #[arg(long)]
        api_url: String,
        /// Session cookie issued at login
        #[arg(long)]
        cookie: String,
    },
}

#[derive(Subcommand)]
enum HistoryCommands {
    /// Compute a survey and save the result to the history
    Save {
        /// Path to the survey JSON file
        survey: PathBuf,
        #[command(flatten)]
        target: history::StoreTarget,
    },

    /// List saved calculations, newest first
    List {
        /// 1-based page number
        #[arg(long, default_value = "1")]
        page: u32,
        #[arg(long, default_value = "10")]
        per_page: u32,
        /// Filter: YYYY-MM-DD for one day, YYYY-MM for one month
        #[arg(long)]
        search: Option<String>,
        #[command(flatten)]
        target: history::StoreTarget,
    },
}

fn main() {
    let cli = Cli::parse();

    let outcome = match cli.command {
        Commands::Compute { survey } => cmd_compute(&survey, cli.output),
        Commands::Report { survey, out } => cmd_report(&survey, out.as_deref()),
        Commands::History { command } => match command {
            HistoryCommands::Save { survey, target } => history::cmd_save(&survey, &target),
            HistoryCommands::List {
                page,
                per_page,
                search,
                target,
            } => history::cmd_list(page, per_page, search, &target, cli.output),
        },
        Commands::Whoami { api_url, cookie } => cmd_whoami(&api_url, &cookie, cli.output),
    };

    if let Err(message) = outcome {
        eprintln!("{message}");
        process::exit(1);
    }
}

/// Read and deserialize a survey file (parse-or-zero semantics).
pub(crate) fn load_survey(path: &Path) -> Result<FarmSurvey, String> {
    let raw =
        fs::read_to_string(path).map_err(|e| format!("cannot read {}: {}", path.display(), e))?;
    serde_json::from_str(&raw).map_err(|e| format!("invalid survey {}: {}", path.display(), e))
}

/// Compute an assessment, mapping validation failure to a CLI error string.
pub(crate) fn assess(survey: &FarmSurvey) -> Result<Assessment, String> {
    compute(survey).map_err(|e| e.to_string())
}

fn cmd_compute(survey_path: &Path, output: OutputFormat) -> Result<(), String> {
    let survey = load_survey(survey_path)?;
    let assessment = assess(&survey)?;

    match output {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&assessment)
                .map_err(|e| format!("serialize assessment: {e}"))?;
            println!("{json}");
        }
        OutputFormat::Text => print_assessment(&survey, &assessment),
    }
    Ok(())
}

fn print_assessment(survey: &FarmSurvey, assessment: &Assessment) {
    let r = RoundedAssessment::from_assessment(assessment);
    let finca = if survey.nombre_finca.is_empty() {
        "finca sin nombre"
    } else {
        &survey.nombre_finca
    };

    println!("Huella de carbono: {finca}");
    println!("  Total:               {:.2} kg CO₂e", r.total);
    println!("  Por kg de café:      {:.3} kg CO₂e/kg", r.por_kg);
    println!("  Rendimiento:         {:.0} kg/ha", r.rendimiento);
    println!("  Energía total:       {:.1} kWh", r.energia_total);
    println!("  Fertilizante por ha: {:.1} kg/ha", r.fert_por_ha);
    println!("  Árboles por ha:      {:.0}", r.arboles_por_ha);
    println!("  Cobertura de copa:   {:.1}%", r.cobertura_porc);
    println!("  Distancia promedio:  {:.1} km", r.distancia_prom);
    println!("  Fracción compostada: {:.0}%", r.fraccion_compost);
    println!("  Deforestación:       {:.1}%", r.deforestacion_porc);
    println!();
    println!("Desglose de emisiones:");
    for share in &r.desglose {
        println!(
            "  {:<15} {:.1} kg CO₂e ({:.1}%)",
            share.name, share.value, share.percent
        );
    }
}

fn cmd_report(survey_path: &Path, out: Option<&Path>) -> Result<(), String> {
    let survey = load_survey(survey_path)?;
    let assessment = assess(&survey)?;
    let report = build_report(&survey, &assessment, &today_display());

    let json =
        serde_json::to_string_pretty(&report).map_err(|e| format!("serialize report: {e}"))?;
    match out {
        Some(path) => fs::write(path, json)
            .map_err(|e| format!("cannot write {}: {}", path.display(), e))?,
        None => println!("{json}"),
    }
    Ok(())
}

fn cmd_whoami(api_url: &str, cookie: &str, output: OutputFormat) -> Result<(), String> {
    let session = HttpSession::new(api_url, cookie);
    let profile = history::runtime()?
        .block_on(session.current_user())
        .map_err(|e| e.to_string())?;

    match output {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&profile)
                .map_err(|e| format!("serialize profile: {e}"))?;
            println!("{json}");
        }
        OutputFormat::Text => match profile {
            Some(p) => println!("Sesión activa: {} {} ({})", p.nombre, p.apellido, p.username),
            None => println!("No hay sesión activa."),
        },
    }
    Ok(())
}

/// Cover display date, day/month/year.
fn today_display() -> String {
    let format = format_description!("[day]/[month]/[year]");
    OffsetDateTime::now_utc()
        .date()
        .format(&format)
        .unwrap_or_else(|_| "--/--/----".to_string())
}
