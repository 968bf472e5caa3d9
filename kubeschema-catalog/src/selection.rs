use crate::error::CatalogError;
use camino::{Utf8Path, Utf8PathBuf};
use fs_err as fs;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Persisted user selection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionState {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

/// Remembers the last selected version across runs in a small JSON file.
#[derive(Debug, Clone)]
pub struct SelectionStore {
    path: Utf8PathBuf,
}

impl SelectionStore {
    pub fn new(path: Utf8PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Utf8Path {
        &self.path
    }

    /// The saved version, if any.
    ///
    /// A missing file means nothing was saved. An unreadable or corrupt file is logged and
    /// treated the same way; a stale preference must never block browsing.
    pub fn load(&self) -> Option<String> {
        if !self.path.exists() {
            debug!(path = %self.path, "no saved selection");
            return None;
        }

        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) => {
                warn!(path = %self.path, error = %e, "could not read saved selection");
                return None;
            }
        };

        match serde_json::from_str::<SelectionState>(&contents) {
            Ok(state) => state.version,
            Err(e) => {
                warn!(path = %self.path, error = %e, "ignoring corrupt selection file");
                None
            }
        }
    }

    pub fn save(&self, version: &str) -> Result<(), CatalogError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| CatalogError::io(parent, e))?;
        }

        let state = SelectionState {
            version: Some(version.to_string()),
        };
        let json =
            serde_json::to_string_pretty(&state).map_err(|e| CatalogError::json(&self.path, e))?;
        fs::write(&self.path, json).map_err(|e| CatalogError::io(&self.path, e))?;

        debug!(path = %self.path, version, "saved selection");
        Ok(())
    }
}

/// Pick the version to browse.
///
/// An explicitly requested version must be available. Otherwise the saved version is used while
/// it is still available, falling back to the newest one.
pub fn select_version(
    available: &[String],
    saved: Option<&str>,
    requested: Option<&str>,
) -> Result<String, CatalogError> {
    if let Some(requested) = requested {
        return available
            .iter()
            .find(|v| v.as_str() == requested)
            .cloned()
            .ok_or_else(|| CatalogError::VersionNotFound {
                version: requested.to_string(),
            });
    }

    if let Some(saved) = saved
        && let Some(version) = available.iter().find(|v| v.as_str() == saved)
    {
        return Ok(version.clone());
    }

    available.first().cloned().ok_or(CatalogError::NoVersions)
}
