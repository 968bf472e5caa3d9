//! Versioned schema documents.
//!
//! Documents live at `<apis_dir>/<MAJOR.MINOR>/swagger.json`. The catalog lists and loads them; the
//! resolver never sees paths, only the parsed definitions map. Loading is tolerant in the same way
//! the document types are: unknown keys are ignored and a missing `definitions` block is empty.

mod error;
mod load;
mod selection;
mod version;

pub use error::CatalogError;
pub use load::{DOCUMENT_FILE_NAME, FsCatalog, MemoryCatalog, SchemaCatalog, load_document};
pub use selection::{SelectionState, SelectionStore, select_version};
pub use version::{parse_version, sort_newest_first};
