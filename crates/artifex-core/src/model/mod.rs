pub mod descriptor;
pub mod instance;
pub mod pattern;

pub use descriptor::{
    CollectionDescriptor, ParameterSpec, PropertyDescriptor, TypeDescriptor, ValueKind,
};
pub use instance::ObjectInstance;
pub use pattern::{PatternNode, PropertyRestriction, CHILD_COLLECTION, CONTAINER_TYPE};
