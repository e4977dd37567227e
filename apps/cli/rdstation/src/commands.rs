//! Argument parsing and command execution.

use crate::error::CliError;
use crate::logger;

use rdstation_client::config::{load_env_file, load_secret_from_env};
use rdstation_client::{Lead, RdStationClient, RdStationConfig, Transport};

use std::io::{Write, stdout};
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use log::info;
use serde::Serialize;

#[derive(Debug, Parser)]
#[command(name = "rdstation-cli", version, about = "Manage RD Station leads from the terminal")]
pub struct Cli {
    /// Env file with RDSTATION_* credentials, loaded before `.env`
    #[arg(long, global = true, value_name = "PATH")]
    pub env_file: Option<PathBuf>,

    /// Also write logs to rdstation-cli.log in this directory
    #[arg(long, global = true, value_name = "DIR")]
    pub log_dir: Option<PathBuf>,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Print a lead as JSON
    Get { email: String },

    /// Delete a lead
    Delete { email: String },

    /// Add tags to a lead and print its resulting tags
    AddTags {
        email: String,
        #[arg(required = true)]
        tags: Vec<String>,
    },

    /// Remove tags from a lead and print its resulting tags
    RemoveTags {
        email: String,
        #[arg(required = true)]
        tags: Vec<String>,
    },
}

/// Full run: logger, environment, connection, one command.
pub async fn run(cli: Cli) -> Result<(), CliError> {
    logger::initialize(logger::level_for(cli.verbose), cli.log_dir.as_deref())?;

    if let Some(env_file) = &cli.env_file {
        load_env_file(env_file)?;
    }

    let config = RdStationConfig::from_env()?;
    let secret = load_secret_from_env()?;
    let client = RdStationClient::connect(secret, &config).await?;

    info!("Connected to {}", client.base_url());

    let mut out = stdout().lock();
    execute(&client, &cli.command, &mut out).await
}

/// Runs `command` and writes its result to `out`.
pub async fn execute<T: Transport>(
    client: &RdStationClient<T>,
    command: &Command,
    out: &mut impl Write,
) -> Result<(), CliError> {
    match command {
        Command::Get { email } => {
            let lead = client.get_lead_by_email(email).await?;
            write_json(out, &lead)
        }
        Command::Delete { email } => {
            client.delete_lead_by_email(email).await?;
            writeln!(out, "Deleted {email}")
                .map_err(|e| CliError::cli(format!("Failed to write output: {e}")))
        }
        Command::AddTags { email, tags } => {
            let mut lead = client.get_lead_by_email(email).await?;
            client.add_tags(&mut lead, &as_strs(tags)).await?;
            write_tags(out, &lead)
        }
        Command::RemoveTags { email, tags } => {
            let mut lead = client.get_lead_by_email(email).await?;
            client.remove_tags(&mut lead, &as_strs(tags)).await?;
            write_tags(out, &lead)
        }
    }
}

fn as_strs(tags: &[String]) -> Vec<&str> {
    tags.iter().map(String::as_str).collect()
}

fn write_tags(out: &mut impl Write, lead: &Lead) -> Result<(), CliError> {
    let tags = lead.tags.as_deref().unwrap_or_default();
    write_json(out, &tags)
}

fn write_json<S: Serialize + ?Sized>(out: &mut impl Write, value: &S) -> Result<(), CliError> {
    serde_json::to_writer_pretty(&mut *out, value)
        .map_err(|e| CliError::cli(format!("Failed to encode output: {e}")))?;
    writeln!(out).map_err(|e| CliError::cli(format!("Failed to write output: {e}")))
}
