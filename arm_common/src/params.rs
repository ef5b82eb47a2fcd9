//! Tunable-parameter store.
//!
//! Named double values with defaults. The control unit reads its
//! setpoint and proportional gain from here at reload points, so both
//! can be tuned while the loop runs. `init_double` seeds a key on
//! first-ever initialization and never overwrites a stored value.

use crate::hal::driver::HalError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Named double storage with init-once semantics.
pub trait ParameterStore {
    /// Seed `key` with `default` if it does not exist yet.
    fn init_double(&mut self, key: &str, default: f64);

    /// Read `key`, falling back to `default` when absent.
    fn get_double(&self, key: &str, default: f64) -> f64;

    /// Write `key` unconditionally.
    fn set_double(&mut self, key: &str, value: f64);
}

/// In-memory store for tests and transient runs.
#[derive(Debug, Default)]
pub struct MemoryParameterStore {
    values: BTreeMap<String, f64>,
}

impl ParameterStore for MemoryParameterStore {
    fn init_double(&mut self, key: &str, default: f64) {
        self.values.entry(key.to_string()).or_insert(default);
    }

    fn get_double(&self, key: &str, default: f64) -> f64 {
        self.values.get(key).copied().unwrap_or(default)
    }

    fn set_double(&mut self, key: &str, value: f64) {
        self.values.insert(key.to_string(), value);
    }
}

/// On-disk file layout: a single `[parameters]` table.
#[derive(Debug, Default, Serialize, Deserialize)]
struct ParameterFile {
    #[serde(default)]
    parameters: BTreeMap<String, f64>,
}

/// TOML-file-backed store.
///
/// Values are held in memory and the whole table is rewritten whenever
/// a key changes. A write failure is logged and the in-memory value is
/// kept, so a read-only filesystem degrades to a transient store.
pub struct FileParameterStore {
    path: PathBuf,
    values: BTreeMap<String, f64>,
}

impl FileParameterStore {
    /// Open the store, loading existing values if the file is present.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, HalError> {
        let path = path.as_ref().to_path_buf();
        let values = if path.exists() {
            let content = fs::read_to_string(&path).map_err(|e| {
                HalError::PersistenceError(format!("Failed to read {:?}: {}", path, e))
            })?;
            let file: ParameterFile = toml::from_str(&content).map_err(|e| {
                HalError::PersistenceError(format!("Failed to parse {:?}: {}", path, e))
            })?;
            debug!(
                "Loaded {} parameters from {:?}",
                file.parameters.len(),
                path
            );
            file.parameters
        } else {
            BTreeMap::new()
        };

        Ok(Self { path, values })
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn save(&self) {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                if let Err(e) = fs::create_dir_all(parent) {
                    warn!("Failed to create {:?}: {}", parent, e);
                    return;
                }
            }
        }

        let file = ParameterFile {
            parameters: self.values.clone(),
        };
        let content = match toml::to_string_pretty(&file) {
            Ok(c) => c,
            Err(e) => {
                warn!("Failed to serialize parameters: {}", e);
                return;
            }
        };
        if let Err(e) = fs::write(&self.path, content) {
            warn!("Failed to write {:?}: {}", self.path, e);
        }
    }
}

impl ParameterStore for FileParameterStore {
    fn init_double(&mut self, key: &str, default: f64) {
        if !self.values.contains_key(key) {
            self.values.insert(key.to_string(), default);
            self.save();
        }
    }

    fn get_double(&self, key: &str, default: f64) -> f64 {
        self.values.get(key).copied().unwrap_or(default)
    }

    fn set_double(&mut self, key: &str, value: f64) {
        self.values.insert(key.to_string(), value);
        self.save();
    }
}
