mod cli;
mod provision;

use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use tracing::warn;
use tracing_subscriber::{filter::EnvFilter, fmt, prelude::*};

use cli::{Cli, Commands};
use mania_config::{Config, EntityTypeConfig, ExitPolicy};
use mania_dialogflow::EntityType;
use provision::{provision, Reporter};

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    if let Some(Commands::Completions { shell }) = &cli.command {
        cli::print_completions(*shell);
        return Ok(ExitCode::SUCCESS);
    }

    let mut config = mania_config::load(cli.config.as_deref())?;
    cli.apply_overrides(&mut config);

    match &cli.command {
        Some(Commands::ShowConfig) => {
            println!("{}", serde_yaml::to_string(&config).context("serialising config")?);
            Ok(ExitCode::SUCCESS)
        }
        Some(Commands::Validate) => validate_cmd(&config),
        Some(Commands::Completions { .. }) => Ok(ExitCode::SUCCESS),
        None if cli.dry_run => dry_run(&config),
        None => run(&config).await,
    }
}

/// Check project id and entity types; print a summary to stdout.
fn validate_cmd(config: &Config) -> anyhow::Result<ExitCode> {
    let types = mania_config::validate(config)?;
    println!("Project: {}", config.project_id);
    println!("Agent:   {}", mania_dialogflow::agent_parent(config));
    println!("Entity types: {}", types.len());
    for (i, t) in types.iter().enumerate() {
        println!("  {}. {} ({:?}, {} entities)", i + 1, t.display_name, t.kind, t.entities.len());
        for e in &t.entities {
            println!("       {} = {}", e.value, e.synonyms.join(", "));
        }
    }
    println!("\nConfiguration is valid.");
    Ok(ExitCode::SUCCESS)
}

/// Print every request a run would send, without sending any.
fn dry_run(config: &Config) -> anyhow::Result<ExitCode> {
    let types = mania_config::validate(config)?;
    let parent = mania_dialogflow::agent_parent(config);
    for ty in to_wire(&types) {
        println!("POST {}", mania_dialogflow::path::entity_types_path(&parent));
        println!("{}\n", serde_json::to_string_pretty(&ty)?);
    }
    Ok(ExitCode::SUCCESS)
}

async fn run(config: &Config) -> anyhow::Result<ExitCode> {
    let types = mania_config::validate(config)?;
    let client = mania_dialogflow::from_config(config)?;
    let parent = mania_dialogflow::agent_parent(config);

    let mut reporter = Reporter::stdio();
    let mut write_failed = None;
    let result = provision(client.as_ref(), &parent, &to_wire(&types), |c| {
        if let Err(e) = reporter.created(c) {
            write_failed.get_or_insert(e);
        }
    })
    .await;
    if let Some(e) = write_failed {
        warn!(error = %e, "could not write confirmation to stdout");
    }

    match result {
        Ok(_) => Ok(ExitCode::SUCCESS),
        Err(e) => {
            reporter.failed(&e).context("writing error report")?;
            Ok(match config.exit_policy {
                ExitPolicy::Failure => ExitCode::FAILURE,
                ExitPolicy::Success => ExitCode::SUCCESS,
            })
        }
    }
}

fn to_wire(types: &[EntityTypeConfig]) -> Vec<EntityType> {
    types.iter().map(EntityType::from).collect()
}

fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();
}
