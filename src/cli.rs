// Copyright (c) 2024-2026 Martin Schröder <info@swedishembedded.com>
//
// SPDX-License-Identifier: MIT
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use mania_config::{Config, ExitPolicy};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "mania",
    about = "Provision the entity types of the mania Dialogflow agent",
    version,
    long_about = None,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Path to config file (overrides auto-discovery)
    #[arg(long, short = 'c', global = true)]
    pub config: Option<PathBuf>,

    /// Google Cloud project that owns the agent
    #[arg(long, short = 'p', env = "MANIA_PROJECT_ID", global = true)]
    pub project: Option<String>,

    /// Regional agent location, e.g. "europe-west1"
    #[arg(long, global = true)]
    pub location: Option<String>,

    /// Dialogflow API base URL (for proxies and local emulators)
    #[arg(long, env = "MANIA_DIALOGFLOW_URL")]
    pub base_url: Option<String>,

    /// Language of the entity synonyms, e.g. "en"
    #[arg(long)]
    pub language_code: Option<String>,

    /// Exit status after a failed run (failure = 1, success = 0)
    #[arg(long, value_enum)]
    pub exit_policy: Option<ExitPolicy>,

    /// Validate and print the create requests without calling the API
    #[arg(long)]
    pub dry_run: bool,

    /// Increase verbosity (-v = debug, -vv = trace)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate shell completion script
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
    /// Print the effective configuration and exit
    ShowConfig,
    /// Check the configured entity types without calling the API.
    /// Exits 0 if valid, non-zero with an error description otherwise.
    Validate,
}

impl Cli {
    /// Apply command-line overrides on top of the loaded config.
    pub fn apply_overrides(&self, config: &mut Config) {
        if let Some(p) = &self.project {
            config.project_id = p.clone();
        }
        if let Some(l) = &self.location {
            config.dialogflow.location = Some(l.clone());
        }
        if let Some(u) = &self.base_url {
            config.dialogflow.base_url = Some(u.clone());
        }
        if let Some(lang) = &self.language_code {
            config.dialogflow.language_code = Some(lang.clone());
        }
        if let Some(policy) = self.exit_policy {
            config.exit_policy = policy;
        }
    }
}

pub fn print_completions(shell: Shell) {
    let mut cmd = Cli::command();
    generate(shell, &mut cmd, "mania", &mut std::io::stdout());
}
