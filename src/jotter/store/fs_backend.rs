use super::SlotStorage;
use crate::error::{JotError, Result};
use log::warn;
use std::fs;
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// File-backed slots: key `k` lives in `<root>/k.json`.
pub struct FsBackend {
    root: PathBuf,
}

impl FsBackend {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn slot_path(&self, key: &str) -> PathBuf {
        self.root.join(format!("{}.json", key))
    }

    fn ensure_dir(&self) -> Result<()> {
        if !self.root.exists() {
            fs::create_dir_all(&self.root).map_err(JotError::Io)?;
        }
        Ok(())
    }
}

impl SlotStorage for FsBackend {
    fn read_slot(&self, key: &str) -> Result<Option<String>> {
        let path = self.slot_path(key);
        if !path.exists() {
            return Ok(None);
        }
        let bytes = fs::read(&path).map_err(JotError::Io)?;
        match String::from_utf8(bytes) {
            Ok(blob) => Ok(Some(blob)),
            // Undecodable bytes reach the store as a malformed blob, not an IO error.
            Err(err) => {
                warn!(
                    "event=slot_read slot={} status=invalid_utf8 offset={}",
                    key,
                    err.utf8_error().valid_up_to()
                );
                Ok(Some(String::from_utf8_lossy(err.as_bytes()).into_owned()))
            }
        }
    }

    fn write_slot(&self, key: &str, blob: &str) -> Result<()> {
        self.ensure_dir()?;

        let target = self.slot_path(key);
        let tmp = self.root.join(format!(".{}-{}.tmp", key, Uuid::new_v4()));
        let written = fs::write(&tmp, blob);
        if let Err(err) = written.and_then(|_| fs::rename(&tmp, &target)) {
            let _ = fs::remove_file(&tmp);
            warn!("event=slot_write slot={} status=failed error={}", key, err);
            return Err(JotError::Io(err));
        }

        Ok(())
    }

    fn slot_location(&self, key: &str) -> String {
        self.slot_path(key).display().to_string()
    }
}
