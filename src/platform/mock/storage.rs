//! Mock parameter storage
//!
//! Keeps a snapshot of the last saved store in memory.

use std::string::{String, ToString};
use std::vec::Vec;

use strato_rats_core::parameters::{ParamFlags, ParamValue, ParameterStore};

use crate::platform::{ParamStorage, Result, StorageError};

#[derive(Debug, Clone)]
struct SavedParam {
    name: String,
    value: ParamValue,
    flags: ParamFlags,
}

/// Mock parameter storage
#[derive(Debug, Default)]
pub struct MockStorage {
    saved: Option<Vec<SavedParam>>,
    save_count: u32,
    fail_writes: bool,
}

impl MockStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Storage that already holds `store`, as if saved by a previous run
    pub fn with_saved(store: &ParameterStore) -> Self {
        let mut storage = Self::new();
        storage.snapshot(store);
        storage
    }

    pub fn set_fail_writes(&mut self, fail: bool) {
        self.fail_writes = fail;
    }

    /// Number of successful saves
    pub fn save_count(&self) -> u32 {
        self.save_count
    }

    /// Saved value of `name`
    pub fn saved_value(&self, name: &str) -> Option<ParamValue> {
        self.saved
            .as_ref()?
            .iter()
            .find(|p| p.name == name)
            .map(|p| p.value)
    }

    fn snapshot(&mut self, store: &ParameterStore) {
        let params = store
            .iter()
            .map(|(name, entry)| SavedParam {
                name: name.to_string(),
                value: entry.value,
                flags: entry.flags,
            })
            .collect();
        self.saved = Some(params);
    }
}

impl ParamStorage for MockStorage {
    fn load(&mut self, store: &mut ParameterStore) -> Result<()> {
        let saved = self.saved.as_ref().ok_or(StorageError::Empty)?;
        for param in saved {
            store
                .insert_raw(&param.name, param.value, param.flags)
                .map_err(|_| StorageError::Corrupted)?;
        }
        Ok(())
    }

    fn save(&mut self, store: &ParameterStore) -> Result<()> {
        if self.fail_writes {
            return Err(StorageError::WriteFailed.into());
        }
        self.snapshot(store);
        self.save_count += 1;
        Ok(())
    }
}
