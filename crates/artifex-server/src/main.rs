//! artifex-server binary
//!
//! Minimal entry point: `artifex-server [--config <path>] [--seed <path>]
//! [--listen <addr>]`. The richer operator surface lives in artifex-cli.

use std::path::PathBuf;
use std::sync::Arc;

use artifex_core::logging_facility;
use artifex_core::provider::{InMemoryBackend, MetadataProvider, PatternLibrary, StorageProvider};
use artifex_server::{AppState, Server, ServerConfig};

fn parse_args() -> Result<(Option<PathBuf>, Option<PathBuf>, Option<String>), String> {
    let mut config = None;
    let mut seed = None;
    let mut listen = None;
    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" => {
                config = Some(PathBuf::from(
                    args.next().ok_or("--config requires a path")?,
                ));
            }
            "--seed" => {
                seed = Some(PathBuf::from(args.next().ok_or("--seed requires a path")?));
            }
            "--listen" => {
                listen = Some(args.next().ok_or("--listen requires an address")?);
            }
            other => return Err(format!("unknown argument: {}", other)),
        }
    }
    Ok((config, seed, listen))
}

#[tokio::main]
async fn main() {
    let (config_path, seed_path, listen) = match parse_args() {
        Ok(parsed) => parsed,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(2);
        }
    };

    let mut config = match config_path {
        Some(path) => match ServerConfig::from_path(&path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        },
        None => ServerConfig::default(),
    };
    if let Some(listen) = listen {
        config.listen = listen;
    }

    logging_facility::init(config.log_profile.into());

    let backend = match seed_path {
        Some(path) => match InMemoryBackend::from_seed_path(&path) {
            Ok(backend) => Arc::new(backend),
            Err(e) => {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        },
        None => Arc::new(InMemoryBackend::new()),
    };

    let app = AppState::new(
        Arc::clone(&backend) as Arc<dyn MetadataProvider>,
        Arc::clone(&backend) as Arc<dyn StorageProvider>,
        Arc::clone(&backend) as Arc<dyn PatternLibrary>,
        &config,
    );

    if let Err(e) = Server::new(config, app).run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
