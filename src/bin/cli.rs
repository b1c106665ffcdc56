//! GradeView CLI
//!
//! Local entry point for dashboard aggregation and report export.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use gradeview::{
    api::ApiClient,
    error::Result,
    export::{JsonExporter, ReportSink},
    models::Config,
    report::{ExportTypes, ReportAssembler},
    stats::Dashboard,
};

/// GradeView - Grading Platform Aggregation & Reporting
#[derive(Parser, Debug)]
#[command(
    name = "gradeview",
    version,
    about = "Dashboard statistics and grade report export for the GradeView platform"
)]
struct Cli {
    /// Path to the configuration file
    #[arg(short, long, default_value = "gradeview.toml")]
    config: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compute the administrative dashboard overview
    Overview,

    /// Compute the dashboard chart series
    Charts,

    /// Assemble and export a grade report
    Report {
        /// Class section to report on
        #[arg(long)]
        class: i64,

        /// Restrict to one student's own submissions
        #[arg(long)]
        student: Option<i64>,

        /// Include assignments
        #[arg(long)]
        assignments: bool,

        /// Include labs
        #[arg(long)]
        labs: bool,

        /// Include practical exams
        #[arg(long)]
        practical_exams: bool,
    },

    /// Validate the configuration file
    Validate,
}

/// Initialize logging based on verbosity flag.
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

/// Build the kind filter from CLI flags; no flags means everything.
fn export_types(assignments: bool, labs: bool, practical_exams: bool) -> ExportTypes {
    if !assignments && !labs && !practical_exams {
        return ExportTypes::all();
    }
    ExportTypes {
        assignment: assignments,
        lab: labs,
        practical_exam: practical_exams,
    }
}

/// Main entry point for the CLI application.
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = Config::load_or_default(&cli.config);

    match cli.command {
        Command::Overview => {
            config.validate()?;
            let client = ApiClient::new(&config.api)?;
            let dashboard = Dashboard::new(&client, config.api.page_size);

            let overview = dashboard.overview().await;
            println!("{}", serde_json::to_string_pretty(&overview)?);
        }

        Command::Charts => {
            config.validate()?;
            let client = ApiClient::new(&config.api)?;
            let dashboard = Dashboard::new(&client, config.api.page_size);

            let charts = dashboard.chart_series().await;
            println!("{}", serde_json::to_string_pretty(&charts)?);
        }

        Command::Report {
            class,
            student,
            assignments,
            labs,
            practical_exams,
        } => {
            config.validate()?;
            let client = ApiClient::new(&config.api)?;
            let assembler = ReportAssembler::new(&client, config.report.max_concurrent);
            let types = export_types(assignments, labs, practical_exams);

            let (scope, rows) = match student {
                Some(student_id) => (
                    format!("class-{class}-student-{student_id}"),
                    assembler
                        .assemble_student_report(class, student_id, &types)
                        .await?,
                ),
                None => (
                    format!("class-{class}"),
                    assembler.assemble_lecturer_report(class, &types).await?,
                ),
            };

            log::info!("Assembled {} report rows", rows.len());

            let sink = JsonExporter::new(&config.report.export_dir);
            let summary = sink.write_report(&scope, &rows).await?;
            log::info!("Report written to {}", summary.location);
        }

        Command::Validate => {
            log::info!("Validating configuration...");

            if let Err(e) = config.validate() {
                log::error!("Config validation failed: {}", e);
                return Err(e);
            }
            log::info!("Config OK (api.base_url, timeouts, and report settings)");
        }
    }

    Ok(())
}
