//! Continuum - run observations through the governed awareness pipeline
//!
//! Usage:
//!   continuum run [--observations scenario.json] [--config continuum.toml] [--json]
//!   continuum dump-config
//!   continuum version

use anyhow::Context;
use clap::{Parser, Subcommand};
use continuum::render::{self, CycleOutcome, RunDocument};
use continuum::{default_observations, load_observations};
use continuum_agent::{ContinuumConfig, Pipeline};
use std::path::{Path, PathBuf};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Fallback scenario path when `--observations` is not given.
const ENV_INPUT: &str = "AWARENESS_INPUT";

#[derive(Parser)]
#[command(name = "continuum", about = "Governed awareness pipeline")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run a scenario through the pipeline and print the report
    Run {
        /// JSON array of observations. Default: the built-in three-cycle scenario
        #[arg(long)]
        observations: Option<PathBuf>,

        /// Path to config file (TOML)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Print one JSON document instead of text
        #[arg(long, default_value_t = false)]
        json: bool,

        /// Also write logs to this file
        #[arg(long)]
        log_file: Option<PathBuf>,
    },
    /// Dump default config as TOML
    DumpConfig,
    /// Print version
    Version,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Version => {
            println!("continuum v{}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        Command::DumpConfig => {
            println!("{}", ContinuumConfig::default().to_toml());
            Ok(())
        }
        Command::Run {
            observations,
            config,
            json,
            log_file,
        } => {
            let _guard = init_tracing(log_file.as_deref())?;
            run(observations, config.as_deref(), json).await
        }
    }
}

fn init_tracing(log_file: Option<&Path>) -> anyhow::Result<Option<WorkerGuard>> {
    let (file_layer, guard) = match log_file {
        Some(path) => {
            let dir = path.parent().filter(|d| !d.as_os_str().is_empty()).unwrap_or(Path::new("."));
            let name = path
                .file_name()
                .with_context(|| format!("invalid log file path {}", path.display()))?;
            let appender = tracing_appender::rolling::never(dir, name);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = tracing_subscriber::fmt::layer()
                .with_writer(writer)
                .with_ansi(false);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "continuum=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(file_layer)
        .init();

    Ok(guard)
}

async fn run(observations: Option<PathBuf>, config: Option<&Path>, json: bool) -> anyhow::Result<()> {
    let config = ContinuumConfig::load_with_env(config);
    let observations = match observations.or_else(|| std::env::var_os(ENV_INPUT).map(PathBuf::from)) {
        Some(path) => load_observations(&path)?,
        None => default_observations(),
    };
    tracing::info!(
        observations = observations.len(),
        backend = %config.llm,
        "starting run"
    );

    let mut pipeline = Pipeline::from_config(&config);
    if !json {
        println!("{}", render::banner());
    }

    let mut cycles = Vec::with_capacity(observations.len());
    for (index, observation) in observations.iter().enumerate() {
        let outcome = match pipeline.run_cycle(observation).await {
            Ok(report) => CycleOutcome::Accepted(Box::new(report)),
            Err(e) => {
                tracing::warn!(observation = index + 1, code = e.code(), "cycle rejected");
                CycleOutcome::rejected(index + 1, &e)
            }
        };
        if !json {
            println!("{}", render::outcome(&outcome));
        }
        cycles.push(outcome);
    }

    let report = pipeline.report();
    if json {
        let document = RunDocument { cycles, report };
        println!("{}", serde_json::to_string_pretty(&document)?);
    } else {
        println!("{}", render::summary(&report));
    }
    Ok(())
}
