// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//
//! Routeyard CLI - Switching yard for small weighted route graphs

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use routeyard::{commands, config};

#[derive(Parser)]
#[command(name = "routeyard")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Quiet mode (suppress non-error output)
    #[arg(short, long)]
    quiet: bool,

    /// Data directory override
    #[arg(long, env = "ROUTEYARD_DATA_DIR")]
    data_dir: Option<std::path::PathBuf>,

    /// Disable colored output
    #[arg(long, env = "NO_COLOR")]
    no_color: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write the example route graph to the data directory
    Seed,

    /// Compute the shortest route between two nodes
    Route {
        /// Source node (label or node: ID)
        from: String,

        /// Target node (label or node: ID)
        to: String,

        /// Output the raw path in JSON format
        #[arg(long)]
        json: bool,
    },

    /// Print the shortest-distance table from a source node
    Distances {
        /// Source node (label or node: ID)
        from: String,

        /// Output the table in JSON format
        #[arg(long)]
        json: bool,
    },

    /// Export the graph to various formats
    Export {
        /// Output format (dot, json)
        #[arg(short, long, default_value = "dot")]
        format: String,

        /// Output file (stdout if not specified)
        #[arg(short, long)]
        output: Option<std::path::PathBuf>,

        /// Highlight the shortest route between two nodes
        #[arg(long, num_args = 2, value_names = ["FROM", "TO"])]
        route: Option<Vec<String>>,
    },

    /// List nodes, edges, and structure stats
    Show,

    /// Generate shell completions
    Completions {
        /// Shell type (bash, zsh, fish, powershell)
        shell: clap_complete::Shell,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = match cli.verbose {
        0 if cli.quiet => tracing::Level::ERROR,
        0 => tracing::Level::INFO,
        1 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };

    tracing_subscriber::fmt()
        .with_max_level(log_level)
        .with_target(false)
        .init();

    let data_dir = config::resolve_data_dir(cli.data_dir.clone())?;

    // Execute command
    match cli.command {
        Commands::Seed => commands::seed::run(&data_dir),
        Commands::Route { from, to, json } => {
            commands::route::run(&data_dir, &from, &to, json, !cli.no_color)
        }
        Commands::Distances { from, json } => {
            commands::distances::run(&data_dir, &from, json)
        }
        Commands::Export { format, output, route } => {
            // clap guarantees exactly two values when --route is present
            let route = route.and_then(|mut pair| {
                let to = pair.pop()?;
                let from = pair.pop()?;
                Some((from, to))
            });
            commands::export::run(&data_dir, &format, output, route)
        }
        Commands::Show => commands::show::run(&data_dir),
        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            commands::completions::run(shell, &mut cmd)
        }
    }
}
