// SPDX-FileCopyrightText: 2026 Lumen Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Lumen - component host for light effects and output devices.
//!
//! This is the binary entry point. It loads the built-in effect and device
//! modules, then lists them, prints their schemas, or checks a configuration.

mod devices;
mod effects;
mod host;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use lumen_config::{ConfigError, LumenConfig};

use crate::host::Host;

/// Lumen - component host for light effects and output devices.
#[derive(Parser, Debug)]
#[command(name = "lumen", version, about, long_about = None)]
struct Cli {
    /// Read configuration from this file instead of the standard hierarchy.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// List registered component types per category.
    Types,
    /// Print the composed configuration schema of a component type.
    Schema {
        /// Category (`effects` or `devices`).
        category: String,
        /// Registered type name.
        name: String,
        /// Only the fields the type declares itself.
        #[arg(long)]
        own: bool,
    },
    /// Create every declared instance and report the result.
    Check,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let loaded = match &cli.config {
        Some(path) => lumen_config::load_and_validate_path(path),
        None => lumen_config::load_and_validate(),
    };
    let config = match loaded {
        Ok(config) => config,
        Err(errors) => {
            lumen_config::render_errors(&errors);
            return ExitCode::FAILURE;
        }
    };

    init_tracing(&config.app.log_level);

    let mut host = match Host::open(&config.app.name, config.schema.extra) {
        Ok(host) => host,
        Err(err) => {
            eprintln!("lumen: failed to load components: {err}");
            return ExitCode::FAILURE;
        }
    };

    match cli.command {
        Some(Commands::Types) => {
            print_types(&host);
            ExitCode::SUCCESS
        }
        Some(Commands::Schema {
            category,
            name,
            own,
        }) => match host.schema(&category, &name, !own) {
            Ok(schema) => {
                match serde_json::to_string_pretty(&schema.describe()) {
                    Ok(text) => println!("{text}"),
                    Err(err) => eprintln!("lumen: {err}"),
                }
                ExitCode::SUCCESS
            }
            Err(err) => {
                eprintln!("lumen: {err}");
                ExitCode::FAILURE
            }
        },
        Some(Commands::Check) => check(&mut host, &config),
        None => {
            println!("lumen: use --help for available commands");
            ExitCode::SUCCESS
        }
    }
}

fn print_types(host: &Host) {
    for (category, types) in host.catalog() {
        println!("{category}:");
        for (name, description) in types {
            match description {
                Some(text) => println!("  {name:<14} {text}"),
                None => println!("  {name}"),
            }
        }
    }
}

fn check(host: &mut Host, config: &LumenConfig) -> ExitCode {
    let (created, failed) = host.apply(config);

    for item in &created {
        println!(
            "ok    {}[{}] {}: {}",
            item.category, item.id, item.kind, item.summary
        );
    }
    if failed.is_empty() {
        println!("{} instance(s) created", created.len());
        return ExitCode::SUCCESS;
    }

    let errors: Vec<ConfigError> = failed
        .into_iter()
        .map(|f| ConfigError::Validation {
            message: format!(
                "{}[{}] (type `{}`): {}",
                f.category, f.index, f.type_name, f.error
            ),
        })
        .collect();
    lumen_config::render_errors(&errors);
    ExitCode::FAILURE
}

fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "lumen={log_level},lumen_registry={log_level},lumen_schema={log_level},lumen_config={log_level},warn"
        ))
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}
