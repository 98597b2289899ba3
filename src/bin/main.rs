//! vizexec CLI - Compile and execute visualization metadata
//!
//! Usage:
//!   vizexec compile <metadata.json> [--remove-date-items] [--compact]
//!   vizexec list <metadata.json>
//!   vizexec execute <metadata.json> --project <id> [--extended] [--config <file>]
//!
//! Examples:
//!   vizexec compile revenue_by_region.json
//!   vizexec list revenue_by_region.json
//!   RUST_LOG=vizexec=debug vizexec execute revenue_by_region.json --project p1

use clap::{Parser, Subcommand};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;
use vizexec::client::{ExecuteOptions, ExecutionClient, HttpTransport};
use vizexec::compile::{compile, CompileOptions};
use vizexec::config::Settings;
use vizexec::metric::MetricDispatcher;
use vizexec::model::MetadataObject;

#[derive(Parser)]
#[command(name = "vizexec")]
#[command(about = "vizexec - Compile visualization metadata into execution requests")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compile a metadata object to an execution configuration
    Compile {
        /// Path to the metadata JSON file
        file: PathBuf,

        /// Leave date categories and date filters out
        #[arg(long)]
        remove_date_items: bool,

        /// Print JSON on a single line
        #[arg(long)]
        compact: bool,
    },

    /// List the measures of a metadata object and how each is compiled
    List {
        /// Path to the metadata JSON file
        file: PathBuf,
    },

    /// Compile a metadata object and execute it
    Execute {
        /// Path to the metadata JSON file
        file: PathBuf,

        /// Project to execute in
        #[arg(short, long)]
        project: String,

        /// Read the extended tabular result
        #[arg(long)]
        extended: bool,

        /// Settings file (defaults to the standard locations)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Compile {
            file,
            remove_date_items,
            compact,
        } => cmd_compile(file, remove_date_items, compact),
        Commands::List { file } => cmd_list(file),
        Commands::Execute {
            file,
            project,
            extended,
            config,
        } => cmd_execute(file, project, extended, config),
    }
}

fn read_metadata(file: &Path) -> Result<MetadataObject, ExitCode> {
    let source = fs::read_to_string(file).map_err(|e| {
        eprintln!("Error reading file '{}': {}", file.display(), e);
        ExitCode::FAILURE
    })?;

    MetadataObject::from_json(&source).map_err(|e| {
        eprintln!("Invalid metadata in '{}': {}", file.display(), e);
        ExitCode::FAILURE
    })
}

fn print_json<T: Serialize>(value: &T, compact: bool) -> ExitCode {
    let printed = if compact {
        serde_json::to_string(value)
    } else {
        serde_json::to_string_pretty(value)
    };

    match printed {
        Ok(json) => {
            println!("{}", json);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Failed to serialize output: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn cmd_compile(file: PathBuf, remove_date_items: bool, compact: bool) -> ExitCode {
    let md = match read_metadata(&file) {
        Ok(md) => md,
        Err(code) => return code,
    };

    let options = CompileOptions::default().with_remove_date_items(remove_date_items);

    match compile(&md, &options) {
        Ok(config) => print_json(&config, compact),
        Err(e) => {
            eprintln!("Compilation error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn cmd_list(file: PathBuf) -> ExitCode {
    let md = match read_metadata(&file) {
        Ok(md) => md,
        Err(code) => return code,
    };

    println!("File: {}", file.display());
    if let Some(vis) = md.visualization_type {
        println!("Type: {:?}", vis);
    }
    println!();

    let dispatcher = MetricDispatcher::new();
    let mut failed = false;

    if md.buckets.measures.is_empty() {
        println!("No measures defined.");
    } else {
        println!("Measures:");
        for (index, measure) in md.buckets.measures.iter().enumerate() {
            match dispatcher.dispatch(measure, index) {
                Ok(strategy) => println!(
                    "  {}. {} ({}) -> {}",
                    index, measure.title, measure.object_uri, strategy
                ),
                Err(e) => {
                    println!("  {}. {} ({}) -> error: {}", index, measure.title, measure.object_uri, e);
                    failed = true;
                }
            }
        }
    }

    if !md.buckets.categories.is_empty() {
        println!();
        println!("Categories:");
        for category in &md.buckets.categories {
            println!("  - {} ({:?})", category.display_form, category.category_type);
        }
    }

    if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

fn cmd_execute(file: PathBuf, project: String, extended: bool, config: Option<PathBuf>) -> ExitCode {
    let md = match read_metadata(&file) {
        Ok(md) => md,
        Err(code) => return code,
    };

    let settings = match config {
        Some(path) => Settings::from_file(path),
        None => Settings::load(),
    };
    let settings = match settings {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let transport = match HttpTransport::from_settings(&settings) {
        Ok(t) => t,
        Err(e) => {
            eprintln!("Failed to create HTTP client: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let client = ExecutionClient::new(transport, project)
        .with_compile_options(settings.compile_options())
        .with_execute_options(
            ExecuteOptions::default().with_extended(extended || settings.execution.extended),
        );

    let runtime = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("Failed to start runtime: {}", e);
            return ExitCode::FAILURE;
        }
    };

    match runtime.block_on(client.execute_visualization(&md)) {
        Ok(result) => print_json(&result, false),
        Err(e) => {
            eprintln!("Execution error: {}", e);
            ExitCode::FAILURE
        }
    }
}
