//! egonet CLI - Decompose graphs into bounded-radius ego-network components.
//!
//! # Commands
//!
//! - `egonet decompose <file>` - Split a graph file into component files
//! - `egonet info <file>` - Print a summary of a graph file
//! - `egonet init` - Write a default `egonet.toml`
//!
//! # Examples
//!
//! ```bash
//! # Ten components of radius 2, written as out/ego_0000.egr, out/ego_0001.egr, ...
//! egonet decompose graph.egr --depth 2 --max-components 10 --prefix ego_ --output out
//!
//! # Inspect one of them
//! egonet info out/ego_0000.egr
//! ```

use clap::{Parser, Subcommand};
use colored::Colorize;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

mod commands;
mod config;
mod error;

use commands::{decompose, info, init};

/// egonet - ego-network graph decomposition
#[derive(Parser)]
#[command(name = "egonet")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Split a graph into max-degree-seeded ego-network components
    Decompose {
        /// Input graph file (.egr)
        input: String,

        /// Output file name prefix
        #[arg(short, long)]
        prefix: Option<String>,

        /// Output directory
        #[arg(short, long)]
        output: Option<String>,

        /// Maximum number of components to extract
        #[arg(short, long)]
        max_components: Option<usize>,

        /// BFS radius around each seed
        #[arg(short, long)]
        depth: Option<u32>,

        /// Configuration file (default: ./egonet.toml if present)
        #[arg(short, long)]
        config: Option<String>,
    },

    /// Print node, edge and label statistics for a graph file
    Info {
        /// Graph file (.egr)
        file: String,
    },

    /// Write a default egonet.toml in the current directory
    Init {
        /// Overwrite existing configuration
        #[arg(long)]
        force: bool,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

fn setup_logging(verbose: bool, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let result = match cli.command {
        Commands::Decompose {
            input,
            prefix,
            output,
            max_components,
            depth,
            config,
        } => decompose::execute(
            &input,
            decompose::Overrides {
                prefix,
                output,
                max_components,
                depth,
            },
            config.as_deref(),
            cli.quiet,
        ),

        Commands::Info { file } => info::execute(&file),

        Commands::Init { force } => init::execute(force),

        Commands::Completions { shell } => {
            use clap::CommandFactory;
            clap_complete::generate(shell, &mut Cli::command(), "egonet", &mut std::io::stdout());
            Ok(())
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", "Error:".red().bold(), e);
            ExitCode::FAILURE
        }
    }
}
