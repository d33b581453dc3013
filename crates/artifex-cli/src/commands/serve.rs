//! Serve command
//!
//! Usage: artifex serve [--seed <PATH>] [--config <PATH>] [--listen <ADDR>]

use clap::Args;
use std::path::PathBuf;
use std::sync::Arc;

use artifex_core::logging_facility;
use artifex_core::provider::{
    InMemoryBackend, MetadataProvider, PatternLibrary, StorageProvider,
};
use artifex_server::{AppState, Server, ServerConfig};

#[derive(Debug, Args)]
pub struct ServeArgs {
    /// Path to a JSON seed file with types, enums, and patterns
    #[arg(long)]
    pub seed: Option<PathBuf>,

    /// Path to a TOML config file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Listen address, overrides the config file
    #[arg(long)]
    pub listen: Option<String>,
}

/// Execute serve command
pub fn execute(args: ServeArgs) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = match &args.config {
        Some(path) => ServerConfig::from_path(path)?,
        None => ServerConfig::default(),
    };
    if let Some(listen) = args.listen {
        config.listen = listen;
    }

    logging_facility::init(config.log_profile.into());

    let backend = match &args.seed {
        Some(path) => Arc::new(InMemoryBackend::from_seed_path(path)?),
        None => Arc::new(InMemoryBackend::new()),
    };

    let app = AppState::new(
        Arc::clone(&backend) as Arc<dyn MetadataProvider>,
        Arc::clone(&backend) as Arc<dyn StorageProvider>,
        Arc::clone(&backend) as Arc<dyn PatternLibrary>,
        &config,
    );
    let server = Server::new(config, app);

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(server.run())?;
    Ok(())
}
