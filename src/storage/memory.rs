/// In-memory implementation of the preference store
///
/// Used by tests and for throwaway sessions; nothing survives the process.

use std::collections::HashMap;
use std::sync::Mutex;
use tokio::sync::watch;

use crate::storage::{PreferenceStore, StorageError, ValueKind};

#[derive(Debug, Clone, PartialEq)]
enum StoredValue {
    String(String),
    Bool(bool),
}

impl StoredValue {
    fn kind(&self) -> ValueKind {
        match self {
            StoredValue::String(_) => ValueKind::String,
            StoredValue::Bool(_) => ValueKind::Bool,
        }
    }
}

/// Map-backed preference store
pub struct MemoryPreferences {
    values: Mutex<HashMap<String, StoredValue>>,
    changes: watch::Sender<u64>,
}

impl MemoryPreferences {
    /// Create an empty store
    pub fn new() -> Self {
        let (changes, _) = watch::channel(0);
        Self {
            values: Mutex::new(HashMap::new()),
            changes,
        }
    }

    /// Number of keys currently present
    pub fn len(&self) -> Result<usize, StorageError> {
        let values = self.values.lock().map_err(|_| StorageError::Poisoned)?;
        Ok(values.len())
    }

    pub fn is_empty(&self) -> Result<bool, StorageError> {
        Ok(self.len()? == 0)
    }

    fn read(&self, key: &str) -> Result<Option<StoredValue>, StorageError> {
        let values = self.values.lock().map_err(|_| StorageError::Poisoned)?;
        Ok(values.get(key).cloned())
    }

    fn write(&self, key: &str, value: Option<StoredValue>) -> Result<(), StorageError> {
        {
            let mut values = self.values.lock().map_err(|_| StorageError::Poisoned)?;
            match value {
                Some(value) => {
                    values.insert(key.to_string(), value);
                }
                None => {
                    values.remove(key);
                }
            }
        }
        self.changes.send_modify(|generation| *generation += 1);
        Ok(())
    }

    fn mismatch(key: &str, expected: ValueKind, found: &StoredValue) -> StorageError {
        StorageError::TypeMismatch {
            key: key.to_string(),
            expected: expected.as_str(),
            found: found.kind().as_str().to_string(),
        }
    }
}

impl Default for MemoryPreferences {
    fn default() -> Self {
        Self::new()
    }
}

impl PreferenceStore for MemoryPreferences {
    fn get_string(&self, key: &str) -> Result<Option<String>, StorageError> {
        match self.read(key)? {
            None => Ok(None),
            Some(StoredValue::String(value)) => Ok(Some(value)),
            Some(other) => Err(Self::mismatch(key, ValueKind::String, &other)),
        }
    }

    fn set_string(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.write(key, Some(StoredValue::String(value.to_string())))
    }

    fn get_bool(&self, key: &str) -> Result<Option<bool>, StorageError> {
        match self.read(key)? {
            None => Ok(None),
            Some(StoredValue::Bool(value)) => Ok(Some(value)),
            Some(other) => Err(Self::mismatch(key, ValueKind::Bool, &other)),
        }
    }

    fn set_bool(&self, key: &str, value: bool) -> Result<(), StorageError> {
        self.write(key, Some(StoredValue::Bool(value)))
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.write(key, None)
    }

    fn subscribe(&self) -> watch::Receiver<u64> {
        self.changes.subscribe()
    }
}
