use thiserror::Error;

/// Failures surfaced by the resolver.
///
/// Truncation at the depth limit or on a revisited reference is not an error; the branch is
/// rendered as a leaf instead.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ResolveError {
    /// The requested root definition is not in the definitions map.
    #[error("definition \"{name}\" not found")]
    DefinitionNotFound { name: String },
}

#[cfg(test)]
mod tests {
    use super::ResolveError;

    #[test]
    fn definition_not_found_names_the_definition() {
        let err = ResolveError::DefinitionNotFound {
            name: "io.k8s.api.core.v1.Nope".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "definition \"io.k8s.api.core.v1.Nope\" not found"
        );
    }
}
