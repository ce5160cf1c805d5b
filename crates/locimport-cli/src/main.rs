//! Location import CLI
//!
//! - `init`: register the location root container in a content store
//! - `run`: import a location dataset (Ctrl-C stops cooperatively)
//! - `tree`: print the folders and locations under the root

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use locimport_ingest::InputSource;
use locimport_storage::{ContentRef, FileStore, RootResolver};
use locimport_sync::{CancelFlag, ImportConfig, LocationImportJob, RunReport};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "locimport")]
#[command(author, version, about = "Import location datasets into a content tree")]
struct Cli {
    /// JSON config file (input_path, store_path, root_key, root_id)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug). RUST_LOG overrides.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Register the location root container (idempotent)
    Init {
        #[command(flatten)]
        target: StoreArgs,
    },

    /// Import locations, creating missing region folders and entries
    Run {
        /// Location dataset (JSON array)
        #[arg(short, long)]
        input: Option<PathBuf>,
        #[command(flatten)]
        target: StoreArgs,
    },

    /// Show the folders and locations under the root container
    Tree {
        #[command(flatten)]
        target: StoreArgs,
    },
}

#[derive(Args)]
struct StoreArgs {
    /// Content store snapshot
    #[arg(short, long)]
    store: Option<PathBuf>,
    /// Root container key
    #[arg(long)]
    root_key: Option<String>,
}

impl StoreArgs {
    fn apply(&self, config: &mut ImportConfig) {
        if let Some(store) = &self.store {
            config.store_path = store.clone();
        }
        if let Some(root_key) = &self.root_key {
            config.root_key = root_key.clone();
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let mut config = match &cli.config {
        Some(path) => ImportConfig::load(path)?,
        None => ImportConfig::default(),
    };

    match &cli.command {
        Commands::Init { target } => {
            target.apply(&mut config);
            cmd_init(&config)
        }
        Commands::Run { input, target } => {
            target.apply(&mut config);
            if let Some(input) = input {
                config.input_path = input.clone();
            }
            cmd_run(&config)
        }
        Commands::Tree { target } => {
            target.apply(&mut config);
            cmd_tree(&config)
        }
    }
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn open_store(config: &ImportConfig) -> Result<FileStore> {
    FileStore::open(&config.store_path).with_context(|| {
        format!(
            "failed to open content store {}",
            config.store_path.display()
        )
    })
}

fn cmd_init(config: &ImportConfig) -> Result<()> {
    let store = open_store(config)?;
    let root = store.register_root(&config.root_key, config.root_id, &config.root_key)?;
    println!(
        "{} root `{}` is {} in {}",
        "Registered".green(),
        config.root_key,
        root,
        config.store_path.display()
    );
    Ok(())
}

fn cmd_run(config: &ImportConfig) -> Result<()> {
    let store = open_store(config)?;

    let cancel = CancelFlag::new();
    register_stop_signal(&cancel)?;

    let job = LocationImportJob::new(InputSource::file(&config.input_path), store)
        .with_root_key(config.root_key.clone())
        .with_cancel_flag(cancel);

    let report = job
        .run()
        .with_context(|| format!("import of {} failed", config.input_path.display()))?;
    print_report(&report);
    Ok(())
}

// First Ctrl-C requests a cooperative stop; a second one terminates.
fn register_stop_signal(cancel: &CancelFlag) -> Result<()> {
    use signal_hook::consts::SIGINT;
    use signal_hook::flag;

    let shared = cancel.shared();
    flag::register_conditional_shutdown(SIGINT, 1, Arc::clone(&shared))
        .context("failed to install Ctrl-C handler")?;
    flag::register(SIGINT, shared).context("failed to install Ctrl-C handler")?;
    Ok(())
}

fn print_report(report: &RunReport) {
    let status = report.status_message();
    if report.is_stopped() {
        println!("{}", status.yellow());
    } else {
        println!("{}", status.green());
    }
    if report.locations_skipped > 0 {
        println!("  ({} already present)", report.locations_skipped);
    }
}

fn cmd_tree(config: &ImportConfig) -> Result<()> {
    let store = open_store(config)?;
    let root = store
        .resolve_root(&config.root_key)?
        .with_context(|| format!("root container `{}` is not registered", config.root_key))?;

    println!("{} {}", config.root_key.bold(), root.to_string().dimmed());
    print_children(&store, root, 1);
    Ok(())
}

fn print_children(store: &FileStore, parent: ContentRef, depth: usize) {
    let indent = "  ".repeat(depth);
    for child in store.children(parent) {
        match child.as_location() {
            Some(location) => {
                let place = [location.city.as_str(), location.country.as_str()]
                    .iter()
                    .filter(|s| !s.is_empty())
                    .copied()
                    .collect::<Vec<_>>()
                    .join(", ");
                if place.is_empty() {
                    println!("{indent}- {}", child.name);
                } else {
                    println!("{indent}- {} ({place})", child.name);
                }
            }
            None => {
                println!("{indent}{}/", child.name.cyan().bold());
                print_children(store, child.id, depth + 1);
            }
        }
    }
}
