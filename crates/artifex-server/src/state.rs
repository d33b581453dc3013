//! Shared application state composed at startup
//!
//! The catalog and its caches are constructed once with an explicit
//! lifecycle and injected here; handlers reach everything through this
//! struct rather than through globals.

use std::sync::Arc;

use artifex_core::catalog::TypeCatalog;
use artifex_core::factory::ObjectFactory;
use artifex_core::inspector::Inspector;
use artifex_core::pattern::PatternBuilder;
use artifex_core::provider::{MetadataProvider, PatternLibrary, StorageProvider};

use crate::config::ServerConfig;

/// Everything a handler needs, behind one Arc
pub struct AppState {
    pub catalog: Arc<TypeCatalog>,
    pub factory: Arc<ObjectFactory>,
    pub inspector: Inspector,
    pub builder: PatternBuilder,
    pub patterns: Arc<dyn PatternLibrary>,
}

impl AppState {
    pub fn new(
        metadata: Arc<dyn MetadataProvider>,
        storage: Arc<dyn StorageProvider>,
        patterns: Arc<dyn PatternLibrary>,
        config: &ServerConfig,
    ) -> Self {
        let catalog = Arc::new(TypeCatalog::new(metadata));
        let factory = Arc::new(ObjectFactory::new(Arc::clone(&catalog), storage));
        let inspector = Inspector::with_limits(
            Arc::clone(&catalog),
            Arc::clone(&factory),
            config.inspect_limits(),
        );
        let builder = PatternBuilder::with_max_depth(
            Arc::clone(&factory),
            Arc::clone(&catalog),
            config.pattern_max_depth,
        );
        Self {
            catalog,
            factory,
            inspector,
            builder,
            patterns,
        }
    }
}
