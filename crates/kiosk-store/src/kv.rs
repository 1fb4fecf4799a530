//! The key-value store contract.

use crate::StoreError;

/// A process-wide persistent string store.
///
/// This is the only durability primitive the storefront engines know about.
/// Reads return `None` for absent keys; `set` overwrites unconditionally.
/// There is no compare-and-swap: callers that interleave read-modify-write
/// sequences from multiple threads must provide their own mutual exclusion.
pub trait KvStore {
    /// Get the value stored under `key`, if any.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Store `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;
}

impl<S: KvStore + ?Sized> KvStore for &S {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        (**self).set(key, value)
    }
}
