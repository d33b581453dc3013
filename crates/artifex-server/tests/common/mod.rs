use std::sync::Arc;

use artifex_core::model::{
    CollectionDescriptor, ParameterSpec, PatternNode, PropertyDescriptor, TypeDescriptor,
};
use artifex_core::provider::{
    InMemoryBackend, MetadataProvider, PatternLibrary, StorageProvider,
};
use artifex_server::{AppState, ServerConfig};

fn simple_type(
    name: &str,
    collections: Vec<CollectionDescriptor>,
    parameters: Vec<ParameterSpec>,
) -> TypeDescriptor {
    TypeDescriptor {
        name: name.to_string(),
        namespace: "Demo".to_string(),
        base_type: None,
        constructible: true,
        internal: false,
        properties: vec![
            PropertyDescriptor::text("Name"),
            PropertyDescriptor::text("Caption"),
        ],
        collections,
        parameters,
    }
}

/// Backend seeded with the demo schema shared by the server tests
#[allow(dead_code)]
pub fn demo_backend() -> Arc<InMemoryBackend> {
    let backend = InMemoryBackend::new();

    backend.register_type(simple_type(
        "Form",
        vec![CollectionDescriptor {
            name: "Elements".to_string(),
            element_type: "Field".to_string(),
        }],
        vec![ParameterSpec::required("name")],
    ));
    backend.register_type(simple_type("Field", Vec::new(), Vec::new()));
    backend.register_type(simple_type(
        "Report",
        Vec::new(),
        vec![
            ParameterSpec::required("name"),
            ParameterSpec::optional("title", serde_json::json!("Untitled Report")),
        ],
    ));
    backend.register_type(simple_type(
        "Widget",
        vec![CollectionDescriptor {
            name: "Items".to_string(),
            element_type: "Item".to_string(),
        }],
        vec![ParameterSpec::required("name")],
    ));
    backend.register_type(simple_type("Item", Vec::new(), Vec::new()));

    backend.register_pattern(
        "LoginForm",
        "1.0",
        PatternNode {
            type_name: "Container".to_string(),
            require_one: false,
            restrictions: Vec::new(),
            children: vec![PatternNode::leaf("Field"), PatternNode::leaf("Field")],
        },
    );

    Arc::new(backend)
}

/// AppState over the demo backend
#[allow(dead_code)]
pub fn demo_state(config: &ServerConfig) -> (Arc<InMemoryBackend>, AppState) {
    let backend = demo_backend();
    let state = AppState::new(
        Arc::clone(&backend) as Arc<dyn MetadataProvider>,
        Arc::clone(&backend) as Arc<dyn StorageProvider>,
        Arc::clone(&backend) as Arc<dyn PatternLibrary>,
        config,
    );
    (backend, state)
}
