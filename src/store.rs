//! Persisted credential slot.
//!
//! Holds zero or one obfuscated credential in a single file under the store
//! directory. The plaintext never touches disk; see [`crate::codec`].

use crate::codec;
use crate::config;
use crate::error::Result;
use std::fs;
use std::path::{Path, PathBuf};

/// File-backed slot for the obfuscated credential.
pub struct CredentialStore {
    /// Directory holding the slot file.
    pub store_dir: PathBuf,
    slot: String,
}

impl CredentialStore {
    /// Create a store rooted at `store_dir`.
    ///
    /// If `store_dir` is `None`, uses the platform config directory
    /// (e.g. `~/.config/stock-dashboard` on Linux). Creates the directory if
    /// it does not exist.
    pub fn new(store_dir: Option<PathBuf>) -> Result<Self> {
        let dir = store_dir.unwrap_or_else(config::default_store_dir);
        fs::create_dir_all(&dir)?;
        Ok(Self {
            store_dir: dir,
            slot: config::CREDENTIAL_SLOT.to_string(),
        })
    }

    /// Path of the slot file.
    pub fn slot_path(&self) -> PathBuf {
        self.store_dir.join(&self.slot)
    }

    /// Read and reveal the persisted credential.
    ///
    /// Returns an empty string when the slot is absent, unreadable or holds a
    /// token that does not decode.
    pub fn load(&self) -> String {
        let path = self.slot_path();
        if !path.exists() {
            return String::new();
        }
        match fs::read_to_string(&path) {
            Ok(token) => codec::reveal(&token),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "failed to read credential slot");
                String::new()
            }
        }
    }

    /// Obfuscate and persist `plaintext`, overwriting any previous value.
    ///
    /// An empty plaintext is a no-op and returns `Ok(false)`.
    pub fn save(&self, plaintext: &str) -> Result<bool> {
        if plaintext.is_empty() {
            return Ok(false);
        }
        write_atomic(&self.slot_path(), &codec::obfuscate(plaintext))?;
        tracing::info!(path = %self.slot_path().display(), "credential saved");
        Ok(true)
    }

    /// Remove the persisted credential, if any.
    pub fn clear(&self) -> Result<()> {
        let path = self.slot_path();
        if path.exists() {
            fs::remove_file(path)?;
        }
        Ok(())
    }

    /// Whether the slot file exists.
    pub fn is_set(&self) -> bool {
        self.slot_path().exists()
    }
}

/// Write to a temp file first and rename, so an interrupted write never
/// leaves a truncated token behind.
fn write_atomic(dest: &Path, contents: &str) -> Result<()> {
    let tmp_dest = dest.with_extension("tmp");
    let result = fs::write(&tmp_dest, contents).and_then(|_| fs::rename(&tmp_dest, dest));
    if result.is_err() {
        let _ = fs::remove_file(&tmp_dest);
    }
    Ok(result?)
}
