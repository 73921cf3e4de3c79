use crate::models::LedgerError;
use crate::storage::Storage;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Directory-backed storage keeping one `<key>.json` file per key.
///
/// Writes go to a temporary sibling first and are renamed into place, so a
/// reader never observes a half-written value.
#[derive(Debug, Clone)]
pub struct FileStorage {
    directory: PathBuf,
}

impl FileStorage {
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
        }
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, LedgerError> {
        let is_plain = !key.is_empty()
            && key.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');

        if !is_plain {
            return Err(LedgerError::Validation(format!(
                "storage key '{key}' may only contain letters, digits, '-' and '_'"
            )));
        }

        Ok(self.directory.join(format!("{key}.json")))
    }
}

impl Storage for FileStorage {
    fn load(&self, key: &str) -> Result<Option<String>, LedgerError> {
        match fs::read_to_string(self.path_for(key)?) {
            Ok(value) => Ok(Some(value)),
            Err(error) if error.kind() == ErrorKind::NotFound => Ok(None),
            Err(error) => Err(error.into()),
        }
    }

    fn save(&self, key: &str, value: &str) -> Result<(), LedgerError> {
        let path = self.path_for(key)?;
        let staging = path.with_extension("json.tmp");

        fs::create_dir_all(&self.directory)?;
        fs::write(&staging, value)?;
        fs::rename(&staging, &path)?;

        Ok(())
    }
}
