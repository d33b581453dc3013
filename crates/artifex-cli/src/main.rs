//! Artifex CLI
//!
//! Command-line interface for Artifex

use clap::{Parser, Subcommand};

mod commands;

#[derive(Debug, Parser)]
#[command(name = "artifex")]
#[command(about = "Artifex - Metadata-driven domain object service", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Run the router endpoint
    Serve(commands::serve::ServeArgs),
    /// Send one request envelope and print the response
    Call(commands::call::CallArgs),
    /// List the cataloged types of a running server
    Types(commands::types::TypesArgs),
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Serve(args) => commands::serve::execute(args),
        Commands::Call(args) => commands::call::execute(args),
        Commands::Types(args) => commands::types::execute(args),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
