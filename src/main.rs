// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use tokio::runtime::Handle;
use tracing_subscriber::EnvFilter;

use facts::config::{load_and_validate_config, Config};
use facts::Logical;

/// Facts - gather system facts concurrently and query them by dotted path
#[derive(Parser)]
#[command(name = "facts")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to a YAML or TOML graft configuration (default: os, cpu and hostname)
    #[arg(long, short, global = true)]
    config: Option<PathBuf>,

    /// Output format for gathered values
    #[arg(long, short, global = true, value_enum, default_value_t = Format::Json)]
    format: Format,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print every gathered fact
    All,

    /// Print the value at a dotted path, e.g. `os.family`
    Read {
        path: String,
    },

    /// Test an expression such as `os.family=linux`; exits 1 when it does not hold
    Match {
        expression: String,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Json,
    Yaml,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => load_and_validate_config(path)
            .with_context(|| format!("loading configuration from {}", path.display()))?,
        None => Config::default(),
    };
    let logical = Logical::from_config(&config, Handle::current())
        .context("building grafts from configuration")?;

    match cli.command.unwrap_or(Commands::All) {
        Commands::All => {
            let facts = logical.gather().await.context("gathering facts")?;
            print(&facts, cli.format)?;
        }
        Commands::Read { path } => {
            let value = logical
                .read(&path)
                .await
                .with_context(|| format!("reading '{}'", path))?;
            print(&value, cli.format)?;
        }
        Commands::Match { expression } => {
            let matched = logical
                .matches(&expression)
                .await
                .with_context(|| format!("matching '{}'", expression))?;
            println!("{}", matched);
            if !matched {
                return Ok(ExitCode::FAILURE);
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}

fn print<T: Serialize>(value: &T, format: Format) -> Result<()> {
    let rendered = match format {
        Format::Json => serde_json::to_string_pretty(value).context("rendering JSON")?,
        Format::Yaml => serde_yaml::to_string(value).context("rendering YAML")?,
    };
    println!("{}", rendered.trim_end());
    Ok(())
}
