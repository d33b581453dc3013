use std::sync::Arc;

use artifex_core::catalog::TypeCatalog;
use artifex_core::factory::ObjectFactory;
use artifex_core::model::{
    CollectionDescriptor, ObjectInstance, ParameterSpec, PropertyDescriptor, TypeDescriptor,
    ValueKind,
};
use artifex_core::provider::{InMemoryBackend, MetadataProvider, StorageProvider};

/// Enum property helper for fixture types
#[allow(dead_code)]
pub fn enum_property(name: &str) -> PropertyDescriptor {
    PropertyDescriptor {
        name: name.to_string(),
        kind: ValueKind::Enum,
        label: None,
        description: None,
        read_only: false,
        nullable: false,
        enum_type: None,
        enum_candidates: Vec::new(),
    }
}

/// Backend seeded with the demo schema used across integration tests
///
/// Types: Form (Elements collection), Field (enum-heavy), Group (nested
/// Elements), Report (required `name` with format constraint, defaulted
/// `title`), Widget (Items collection), Item.
#[allow(dead_code)]
pub fn demo_backend() -> Arc<InMemoryBackend> {
    let backend = InMemoryBackend::new();

    backend.register_type(TypeDescriptor {
        name: "Form".to_string(),
        namespace: "Demo".to_string(),
        base_type: None,
        constructible: true,
        internal: false,
        properties: vec![
            PropertyDescriptor::text("Name"),
            PropertyDescriptor {
                label: Some("Form caption".to_string()),
                description: Some("Caption shown in the title bar".to_string()),
                ..PropertyDescriptor::text("Caption")
            },
        ],
        collections: vec![CollectionDescriptor {
            name: "Elements".to_string(),
            element_type: "Field".to_string(),
        }],
        parameters: vec![ParameterSpec::required("name")],
    });

    backend.register_type(TypeDescriptor {
        name: "Field".to_string(),
        namespace: "Demo".to_string(),
        base_type: None,
        constructible: true,
        internal: false,
        properties: vec![
            PropertyDescriptor::text("Name"),
            PropertyDescriptor::text("Caption"),
            // Directly-typed candidates
            PropertyDescriptor {
                enum_candidates: vec![
                    "Red".to_string(),
                    "Green".to_string(),
                    "Blue".to_string(),
                ],
                ..enum_property("Color")
            },
            // Resolves by exact property name against the backend enum set
            enum_property("FieldType"),
            // Resolves with the `Type` suffix stripped
            enum_property("StatusType"),
            // Resolves by the {type}{property} concatenation
            enum_property("Mode"),
        ],
        collections: Vec::new(),
        parameters: Vec::new(),
    });

    backend.register_type(TypeDescriptor {
        name: "Group".to_string(),
        namespace: "Demo".to_string(),
        base_type: None,
        constructible: true,
        internal: false,
        properties: vec![PropertyDescriptor::text("Name")],
        collections: vec![CollectionDescriptor {
            name: "Elements".to_string(),
            element_type: "Field".to_string(),
        }],
        parameters: Vec::new(),
    });

    backend.register_type(TypeDescriptor {
        name: "Report".to_string(),
        namespace: "Demo".to_string(),
        base_type: None,
        constructible: true,
        internal: false,
        properties: vec![
            PropertyDescriptor::text("Name"),
            PropertyDescriptor::text("Title"),
        ],
        collections: vec![CollectionDescriptor {
            name: "Sections".to_string(),
            element_type: "Group".to_string(),
        }],
        parameters: vec![
            ParameterSpec {
                format: Some("[A-Za-z][A-Za-z0-9_-]*".to_string()),
                ..ParameterSpec::required("name")
            },
            ParameterSpec::optional("title", serde_json::json!("Untitled Report")),
        ],
    });

    backend.register_type(TypeDescriptor {
        name: "Widget".to_string(),
        namespace: "Demo".to_string(),
        base_type: None,
        constructible: true,
        internal: false,
        properties: vec![PropertyDescriptor::text("Name")],
        collections: vec![CollectionDescriptor {
            name: "Items".to_string(),
            element_type: "Item".to_string(),
        }],
        parameters: vec![ParameterSpec::required("name")],
    });

    backend.register_type(TypeDescriptor {
        name: "Item".to_string(),
        namespace: "Demo".to_string(),
        base_type: None,
        constructible: true,
        internal: false,
        properties: vec![PropertyDescriptor::text("Name")],
        collections: Vec::new(),
        parameters: Vec::new(),
    });

    backend.register_enum(
        "FieldType",
        vec!["Text".to_string(), "Number".to_string(), "Date".to_string()],
    );
    backend.register_enum("Status", vec!["Draft".to_string(), "Final".to_string()]);
    backend.register_enum(
        "FieldMode",
        vec!["Edit".to_string(), "View".to_string()],
    );

    Arc::new(backend)
}

#[allow(dead_code)]
pub fn new_catalog(backend: &Arc<InMemoryBackend>) -> Arc<TypeCatalog> {
    Arc::new(TypeCatalog::new(
        Arc::clone(backend) as Arc<dyn MetadataProvider>
    ))
}

#[allow(dead_code)]
pub fn new_factory(
    catalog: &Arc<TypeCatalog>,
    backend: &Arc<InMemoryBackend>,
) -> Arc<ObjectFactory> {
    Arc::new(ObjectFactory::new(
        Arc::clone(catalog),
        Arc::clone(backend) as Arc<dyn StorageProvider>,
    ))
}

/// Persist a Widget whose Items collection holds `item_count` entries
#[allow(dead_code)]
pub fn put_widget_with_items(
    backend: &Arc<InMemoryBackend>,
    name: &str,
    item_count: usize,
) -> ObjectInstance {
    let mut widget = ObjectInstance::new("Widget", name);
    widget.set_property("Name", serde_json::json!(name));
    for i in 0..item_count {
        let mut item = ObjectInstance::new("Item", format!("item-{}", i));
        item.set_property("Name", serde_json::json!(format!("item-{}", i)));
        widget.add_child("Items", item);
    }
    backend
        .store("Widget", name, &widget)
        .expect("fixture store should succeed");
    widget
}
