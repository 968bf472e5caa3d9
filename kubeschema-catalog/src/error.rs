use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CatalogError {
    #[error("version {version} not found")]
    VersionNotFound { version: String },

    #[error("no schema versions available")]
    NoVersions,

    #[error("io error at {path}: {message}")]
    Io { path: String, message: String },

    #[error("json parse error in {path}: {message}")]
    Json { path: String, message: String },
}

impl CatalogError {
    pub(crate) fn io(path: impl ToString, err: impl ToString) -> Self {
        CatalogError::Io {
            path: path.to_string(),
            message: err.to_string(),
        }
    }

    pub(crate) fn json(path: impl ToString, err: impl ToString) -> Self {
        CatalogError::Json {
            path: path.to_string(),
            message: err.to_string(),
        }
    }
}
