use crate::error::CatalogError;
use crate::version::{parse_version, sort_newest_first};
use camino::{Utf8Path, Utf8PathBuf};
use fs_err as fs;
use glob::glob;
use kubeschema_types::SwaggerDocument;
use std::collections::BTreeMap;
use tracing::{debug, warn};

/// File name of the document inside each version directory.
pub const DOCUMENT_FILE_NAME: &str = "swagger.json";

/// Source of versioned swagger documents.
pub trait SchemaCatalog {
    /// Available versions, newest first.
    fn available_versions(&self) -> Result<Vec<String>, CatalogError>;

    fn load_version(&self, version: &str) -> Result<SwaggerDocument, CatalogError>;
}

/// File-system backed `SchemaCatalog` rooted at an `apis_dir`.
#[derive(Debug, Clone)]
pub struct FsCatalog {
    apis_dir: Utf8PathBuf,
}

impl FsCatalog {
    pub fn new(apis_dir: Utf8PathBuf) -> Self {
        Self { apis_dir }
    }

    pub fn apis_dir(&self) -> &Utf8Path {
        &self.apis_dir
    }

    pub fn document_path(&self, version: &str) -> Utf8PathBuf {
        self.apis_dir.join(version).join(DOCUMENT_FILE_NAME)
    }
}

impl SchemaCatalog for FsCatalog {
    fn available_versions(&self) -> Result<Vec<String>, CatalogError> {
        let pattern = self.apis_dir.join("*").join(DOCUMENT_FILE_NAME);
        let pattern_str = pattern.as_str();

        debug!(pattern = %pattern_str, "scanning catalog for schema documents");

        let entries = glob(pattern_str).map_err(|e| CatalogError::io(&pattern, e))?;
        let mut versions = Vec::new();
        for entry in entries {
            let path = entry.map_err(|e| CatalogError::io(&pattern, e))?;
            let Some(dir_name) = path
                .parent()
                .and_then(|p| p.file_name())
                .and_then(|n| n.to_str())
            else {
                continue;
            };

            if parse_version(dir_name).is_none() {
                warn!(path = %path.display(), "skipping directory that is not a MAJOR.MINOR version");
                continue;
            }
            versions.push(dir_name.to_string());
        }

        sort_newest_first(&mut versions);
        debug!(count = versions.len(), "found schema versions");
        Ok(versions)
    }

    fn load_version(&self, version: &str) -> Result<SwaggerDocument, CatalogError> {
        let path = self.document_path(version);
        if parse_version(version).is_none() || !path.is_file() {
            return Err(CatalogError::VersionNotFound {
                version: version.to_string(),
            });
        }
        load_document(&path)
    }
}

/// Read and parse one swagger document.
pub fn load_document(path: &Utf8Path) -> Result<SwaggerDocument, CatalogError> {
    let contents = fs::read_to_string(path).map_err(|e| CatalogError::io(path, e))?;
    let doc: SwaggerDocument =
        serde_json::from_str(&contents).map_err(|e| CatalogError::json(path, e))?;
    debug!(path = %path, definitions = doc.definitions.len(), "loaded schema document");
    Ok(doc)
}

/// In-memory `SchemaCatalog`, for embedding pre-parsed documents and for tests.
#[derive(Debug, Clone, Default)]
pub struct MemoryCatalog {
    documents: BTreeMap<String, SwaggerDocument>,
}

impl MemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, version: impl Into<String>, document: SwaggerDocument) {
        self.documents.insert(version.into(), document);
    }
}

impl SchemaCatalog for MemoryCatalog {
    fn available_versions(&self) -> Result<Vec<String>, CatalogError> {
        let mut versions: Vec<String> = self
            .documents
            .keys()
            .filter(|v| parse_version(v).is_some())
            .cloned()
            .collect();
        sort_newest_first(&mut versions);
        Ok(versions)
    }

    fn load_version(&self, version: &str) -> Result<SwaggerDocument, CatalogError> {
        self.documents
            .get(version)
            .cloned()
            .ok_or_else(|| CatalogError::VersionNotFound {
                version: version.to_string(),
            })
    }
}
