//! Parameter store
//!
//! Named, typed configuration values kept in a fixed-capacity map. Each
//! entry carries its flags next to the value. Persisting the store is the
//! platform's job; the store only tracks whether a save is needed.

use super::error::ParameterError;
use bitflags::bitflags;
use heapless::index_map::FnvIndexMap;
use heapless::String;

/// Maximum parameter name length
pub const PARAM_NAME_LEN: usize = 16;

/// Maximum number of parameters (power of two for `FnvIndexMap`)
pub const MAX_PARAMS: usize = 16;

/// Parameter name as stored
pub type ParamName = String<PARAM_NAME_LEN>;

bitflags! {
    /// Parameter flags
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct ParamFlags: u8 {
        /// Parameter cannot be changed by telecommand
        const READ_ONLY = 0b00000001;
    }
}

/// Typed parameter value
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ParamValue {
    Bool(bool),
    Int(i32),
    Float(f32),
}

impl ParamValue {
    /// Type tag used by storage encodings
    pub fn type_id(&self) -> u8 {
        match self {
            ParamValue::Bool(_) => 0,
            ParamValue::Int(_) => 1,
            ParamValue::Float(_) => 2,
        }
    }

    /// Read as float, converting integers
    pub fn as_f32(&self) -> Option<f32> {
        match *self {
            ParamValue::Float(v) => Some(v),
            ParamValue::Int(v) => Some(v as f32),
            ParamValue::Bool(_) => None,
        }
    }

    /// Read as integer, truncating floats
    pub fn as_i32(&self) -> Option<i32> {
        match *self {
            ParamValue::Int(v) => Some(v),
            ParamValue::Float(v) => Some(v as i32),
            ParamValue::Bool(v) => Some(v as i32),
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match *self {
            ParamValue::Bool(v) => Some(v),
            ParamValue::Int(v) => Some(v != 0),
            ParamValue::Float(_) => None,
        }
    }
}

/// One stored parameter
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParamEntry {
    pub value: ParamValue,
    pub flags: ParamFlags,
}

/// Instrument parameter store
#[derive(Debug, Clone, Default)]
pub struct ParameterStore {
    entries: FnvIndexMap<ParamName, ParamEntry, MAX_PARAMS>,
    /// Changed since the last successful save
    dirty: bool,
}

fn name_key(name: &str) -> Result<ParamName, ParameterError> {
    ParamName::try_from(name).map_err(|_| ParameterError::InvalidConfig)
}

impl ParameterStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current value of `name`
    pub fn get(&self, name: &str) -> Option<&ParamValue> {
        self.entry(name).map(|entry| &entry.value)
    }

    /// Value and flags of `name`
    pub fn entry(&self, name: &str) -> Option<&ParamEntry> {
        let key = name_key(name).ok()?;
        self.entries.get(&key)
    }

    /// Change a registered parameter
    ///
    /// The new value must have the registered type. Read-only parameters
    /// are refused. A successful change marks the store dirty.
    pub fn set(&mut self, name: &str, value: ParamValue) -> Result<(), ParameterError> {
        let key = name_key(name)?;
        let entry = self
            .entries
            .get_mut(&key)
            .ok_or(ParameterError::InvalidConfig)?;

        if entry.flags.contains(ParamFlags::READ_ONLY) {
            return Err(ParameterError::ReadOnly);
        }
        if entry.value.type_id() != value.type_id() {
            return Err(ParameterError::TypeMismatch);
        }

        entry.value = value;
        self.dirty = true;
        Ok(())
    }

    /// Add `name` with its default value unless it already exists
    ///
    /// Values loaded from storage survive registration.
    pub fn register(
        &mut self,
        name: &str,
        default: ParamValue,
        flags: ParamFlags,
    ) -> Result<(), ParameterError> {
        let key = name_key(name)?;
        if self.entries.contains_key(&key) {
            return Ok(());
        }
        self.entries
            .insert(key, ParamEntry { value: default, flags })
            .map_err(|_| ParameterError::StoreFull)?;
        self.dirty = true;
        Ok(())
    }

    /// Insert or overwrite an entry as loaded from storage
    ///
    /// Skips the read-only and type checks and leaves the dirty flag alone.
    pub fn insert_raw(
        &mut self,
        name: &str,
        value: ParamValue,
        flags: ParamFlags,
    ) -> Result<(), ParameterError> {
        let key = name_key(name)?;
        self.entries
            .insert(key, ParamEntry { value, flags })
            .map_err(|_| ParameterError::StoreFull)?;
        Ok(())
    }

    pub fn is_read_only(&self, name: &str) -> bool {
        self.entry(name)
            .is_some_and(|entry| entry.flags.contains(ParamFlags::READ_ONLY))
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Mark the store saved
    pub fn clear_dirty(&mut self) {
        self.dirty = false;
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in registration order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamEntry)> {
        self.entries.iter().map(|(name, entry)| (name.as_str(), entry))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_with(name: &str, value: ParamValue, flags: ParamFlags) -> ParameterStore {
        let mut store = ParameterStore::new();
        store.register(name, value, flags).unwrap();
        store
    }

    #[test]
    fn test_value_conversions() {
        assert_eq!(ParamValue::Int(3).as_f32(), Some(3.0));
        assert_eq!(ParamValue::Float(2.9).as_i32(), Some(2));
        assert_eq!(ParamValue::Int(0).as_bool(), Some(false));
        assert_eq!(ParamValue::Bool(true).as_f32(), None);
    }

    #[test]
    fn test_register_then_set() {
        let mut store = store_with("RATS_X", ParamValue::Int(42), ParamFlags::empty());
        assert_eq!(store.get("RATS_X"), Some(&ParamValue::Int(42)));

        store.set("RATS_X", ParamValue::Int(7)).unwrap();
        assert_eq!(store.get("RATS_X"), Some(&ParamValue::Int(7)));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_set_unknown() {
        let mut store = ParameterStore::new();
        assert_eq!(
            store.set("UNKNOWN", ParamValue::Int(1)),
            Err(ParameterError::InvalidConfig)
        );
    }

    #[test]
    fn test_set_wrong_type() {
        let mut store = store_with("RATS_V", ParamValue::Float(1.0), ParamFlags::empty());
        store.clear_dirty();
        assert_eq!(
            store.set("RATS_V", ParamValue::Bool(true)),
            Err(ParameterError::TypeMismatch)
        );
        assert!(!store.is_dirty());
    }

    #[test]
    fn test_register_keeps_loaded_value() {
        let mut store = ParameterStore::new();
        store
            .insert_raw("RATS_X", ParamValue::Int(100), ParamFlags::empty())
            .unwrap();
        assert!(!store.is_dirty());

        store
            .register("RATS_X", ParamValue::Int(42), ParamFlags::empty())
            .unwrap();
        assert_eq!(store.get("RATS_X"), Some(&ParamValue::Int(100)));
        assert!(!store.is_dirty());
    }

    #[test]
    fn test_dirty_tracking() {
        let mut store = store_with("RATS_X", ParamValue::Int(42), ParamFlags::empty());
        assert!(store.is_dirty());
        store.clear_dirty();
        store.set("RATS_X", ParamValue::Int(100)).unwrap();
        assert!(store.is_dirty());
    }

    #[test]
    fn test_read_only() {
        let mut store = store_with("RATS_RO", ParamValue::Int(42), ParamFlags::READ_ONLY);
        assert!(store.is_read_only("RATS_RO"));
        assert_eq!(
            store.set("RATS_RO", ParamValue::Int(100)),
            Err(ParameterError::ReadOnly)
        );
    }

    #[test]
    fn test_name_too_long() {
        let mut store = ParameterStore::new();
        assert_eq!(
            store.register(
                "A_NAME_LONGER_THAN_SIXTEEN",
                ParamValue::Bool(true),
                ParamFlags::empty()
            ),
            Err(ParameterError::InvalidConfig)
        );
    }

    #[test]
    fn test_iter_in_registration_order() {
        let mut store = ParameterStore::new();
        store.register("B", ParamValue::Int(1), ParamFlags::empty()).unwrap();
        store.register("A", ParamValue::Bool(false), ParamFlags::READ_ONLY).unwrap();

        let names: heapless::Vec<&str, 4> = store.iter().map(|(name, _)| name).collect();
        assert_eq!(names.as_slice(), &["B", "A"]);
    }
}
