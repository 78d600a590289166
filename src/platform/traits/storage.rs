//! Durable parameter storage interface

use crate::platform::Result;
use strato_rats_core::parameters::ParameterStore;

/// Persists the parameter store across restarts
pub trait ParamStorage {
    /// Load saved parameters into `store`
    ///
    /// Implementations insert values with `ParameterStore::insert_raw`, so a
    /// successful load leaves the store clean.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Empty` when nothing has been saved yet.
    fn load(&mut self, store: &mut ParameterStore) -> Result<()>;

    /// Save every parameter in `store`
    fn save(&mut self, store: &ParameterStore) -> Result<()>;
}
