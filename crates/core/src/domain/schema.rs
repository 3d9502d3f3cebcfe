// Schema Script (opaque DDL text)

use std::path::Path;

/// A DDL script applied by a schema initializer
///
/// The text is never parsed or validated here; it is handed to the store as-is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaScript {
    name: String,
    sql: String,
}

impl SchemaScript {
    pub fn new(name: impl Into<String>, sql: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            sql: sql.into(),
        }
    }

    /// Read a UTF-8 script from disk, named after the file stem
    pub fn from_file(path: impl AsRef<Path>) -> std::io::Result<Self> {
        let path = path.as_ref();
        let sql = std::fs::read_to_string(path)?;
        let name = path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Ok(Self::new(name, sql))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn sql(&self) -> &str {
        &self.sql
    }
}
