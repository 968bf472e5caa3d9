//! Shared DTOs for the kubeschema workspace.
//!
//! # Design constraints
//! - Input types mirror the subset of Kubernetes' generated swagger that the resolver understands.
//! - Reading is tolerant: unknown keys are ignored and oddly-typed values degrade to "absent".
//! - Output types are what consumers render; their JSON form is camelCase.

pub mod resolved;
pub mod swagger;

pub use resolved::{PropertyInfo, ResolvedSchema};
pub use swagger::{
    AdditionalProperties, Definitions, RawDefinition, RawPropertySchema, SwaggerDocument,
};

/// Well-known literals shared between the resolver and its consumers.
pub mod literal {
    /// Prefix of every in-document `$ref`.
    pub const DEFINITIONS_REF_PREFIX: &str = "#/definitions/";

    pub const TYPE_OBJECT: &str = "object";
    pub const TYPE_ARRAY: &str = "array";
    pub const TYPE_MAP: &str = "object (map)";
    pub const TYPE_ANY: &str = "any";

    /// Name given to the synthetic element of a primitive array.
    pub const ARRAY_ITEM_NAME: &str = "item";
}
