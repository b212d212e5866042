//! Squad CLI entry point.
//!
//! This binary is the composition root for the entire system. Responsibilities:
//!
//! 1. **Parse arguments**: one optional free-text request plus flags.
//! 2. **Wire observability**: `tracing-subscriber` to stderr (text or JSON)
//!    and an optional OpenTelemetry OTLP exporter.
//! 3. **Load configuration**: defaults, `.squad/config.toml`, flags, and
//!    provider credentials read once from the environment, falling back to
//!    a `.env` file.
//! 4. **Construct infrastructure**: one backend connection per present
//!    credential, the provider router, template and report stores, all
//!    injected into the [`nodes::SquadRunner`].
//! 5. **Run** the squad once and print each stage's output.

mod config;
mod observability;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use nodes::{FileReportStore, FsPromptTemplates, ProviderRouter, SquadRun, SquadRunner};
use pipeline::Role;

use crate::config::ConfigOptions;
use crate::observability::LogFormat;

/// Run the Planner → Builder → Auditor squad on a request.
#[derive(Debug, Parser)]
#[command(name = "squad", version, about)]
struct Cli {
    /// What the squad should work on. A fixed default request is used when omitted.
    request: Option<String>,

    /// Config file (default: `.squad/config.toml`, skipped if absent).
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Where to write the run report.
    #[arg(long, value_name = "PATH")]
    output: Option<String>,

    /// Directory holding `<role>.md` prompt templates.
    #[arg(long, value_name = "DIR")]
    templates: Option<String>,

    /// Log format on stderr.
    #[arg(long, value_enum, default_value_t = LogFormat::Text)]
    log_format: LogFormat,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let _telemetry = observability::init(cli.log_format)?;

    let options = ConfigOptions {
        config_file: cli.config,
        output: cli.output,
        templates: cli.templates,
    };
    let env_file = config::read_env_file(Path::new(config::ENV_FILE))?;
    let config = config::load(
        &options,
        config::with_env_file(|name| std::env::var(name).ok(), env_file),
    )?;

    let router = ProviderRouter::new(config.bindings.clone(), llm::connect_backends(&config));
    let runner = SquadRunner::new(
        router,
        Arc::new(FsPromptTemplates::new(config.template_dir.as_str())),
        Arc::new(FileReportStore::new(config.report_path.clone())),
    );

    let run = runner
        .run(cli.request.as_deref())
        .await
        .context("squad run did not complete")?;

    print_summary(&run);
    Ok(())
}

fn print_summary(run: &SquadRun) {
    for (role, outcome) in run.report.sections() {
        let heading = match role {
            Role::Planner => "PLAN",
            Role::Builder => "BUILD OUTPUT",
            Role::Auditor => "AUDIT REPORT",
        };
        println!("\n{heading}:\n{outcome}\n");
    }
    println!("Squad mission completed. Check {}", run.artifact);
}
