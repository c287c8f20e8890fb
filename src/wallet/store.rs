//! Key persistence port and its backends.

use dashmap::DashMap;
use std::collections::HashMap;
use std::fs::{self, File, OpenOptions};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::wallet::types::{WalletError, WalletResult};

/// Slot holding the hex public key.
pub const PUBLIC_KEY_SLOT: &str = "publicKey";
/// Slot holding the hex private key.
pub const PRIVATE_KEY_SLOT: &str = "privateKey";

/// Opaque string key-value store for key material.
pub trait KeyStore: Send + Sync {
    fn save(&self, key: &str, value: &str) -> WalletResult<()>;
    fn load(&self, key: &str) -> WalletResult<Option<String>>;

    /// Store several slots as one write: either all of them land or none do.
    fn save_all(&self, entries: &[(&str, &str)]) -> WalletResult<()>;
}

/// Volatile store, used in tests and for throwaway sessions.
#[derive(Debug, Default)]
pub struct MemoryKeyStore {
    inner: DashMap<String, String>,
}

impl MemoryKeyStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyStore for MemoryKeyStore {
    fn save(&self, key: &str, value: &str) -> WalletResult<()> {
        self.inner.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn load(&self, key: &str) -> WalletResult<Option<String>> {
        Ok(self.inner.get(key).map(|r| r.value().clone()))
    }

    fn save_all(&self, entries: &[(&str, &str)]) -> WalletResult<()> {
        for (key, value) in entries {
            self.inner.insert(key.to_string(), value.to_string());
        }
        Ok(())
    }
}

/// JSON file store. The whole map is rewritten on every save.
///
/// Writes go to a sibling temp file that is then renamed over the store, so
/// the file on disk always holds either the old or the new contents.
#[derive(Debug)]
pub struct FileKeyStore {
    /// Location of the JSON file.
    path: PathBuf,
    /// In-memory copy of what the file holds.
    inner: DashMap<String, String>,
}

impl FileKeyStore {
    /// Open a store, reading the file if it exists.
    pub fn open(path: impl AsRef<Path>) -> WalletResult<Self> {
        let path = path.as_ref().to_path_buf();
        let inner = DashMap::new();

        if path.exists() {
            let file = File::open(&path).map_err(|e| store_error(&path, e))?;
            let map: HashMap<String, String> = serde_json::from_reader(BufReader::new(file))
                .map_err(|e| WalletError::Store(format!("{}: {}", path.display(), e)))?;
            for (k, v) in map {
                inner.insert(k, v);
            }
            tracing::debug!(path = %path.display(), entries = inner.len(), "Loaded key store");
        }

        Ok(Self { path, inner })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.file_name().unwrap_or_default().to_os_string();
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    /// Write `map` to disk. The in-memory copy is only updated by callers
    /// once this succeeds.
    fn flush(&self, map: &HashMap<String, String>) -> WalletResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| store_error(parent, e))?;
            }
        }

        let mut options = OpenOptions::new();
        options.write(true).create(true).truncate(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(0o600);
        }

        let temp = self.temp_path();
        let file = options.open(&temp).map_err(|e| store_error(&temp, e))?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, map)
            .map_err(|e| WalletError::Store(format!("{}: {}", temp.display(), e)))?;
        writer.flush().map_err(|e| store_error(&temp, e))?;
        writer
            .get_ref()
            .sync_all()
            .map_err(|e| store_error(&temp, e))?;

        fs::rename(&temp, &self.path).map_err(|e| {
            let _ = fs::remove_file(&temp);
            store_error(&self.path, e)
        })
    }
}

impl KeyStore for FileKeyStore {
    fn save(&self, key: &str, value: &str) -> WalletResult<()> {
        self.save_all(&[(key, value)])
    }

    fn load(&self, key: &str) -> WalletResult<Option<String>> {
        Ok(self.inner.get(key).map(|r| r.value().clone()))
    }

    fn save_all(&self, entries: &[(&str, &str)]) -> WalletResult<()> {
        let mut map: HashMap<String, String> = self
            .inner
            .iter()
            .map(|r| (r.key().clone(), r.value().clone()))
            .collect();
        for (key, value) in entries {
            map.insert(key.to_string(), value.to_string());
        }

        self.flush(&map)?;
        for (key, value) in entries {
            self.inner.insert(key.to_string(), value.to_string());
        }
        Ok(())
    }
}

fn store_error(path: &Path, e: std::io::Error) -> WalletError {
    WalletError::Store(format!("{}: {}", path.display(), e))
}
