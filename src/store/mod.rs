//! Persistence for the dashboard around the Pomodoro cycle.
//!
//! Everything here sits behind the `KeyValueStore` trait so the record stores
//! stay independent of where data lives:
//!
//! ```text
//! ┌───────────┐ ┌───────────────┐
//! │ TaskStore │ │ SettingsStore │
//! └─────┬─────┘ └───────┬───────┘
//!       └───────┬───────┘
//!               ▼
//!      ┌─────────────────┐
//!      │  KeyValueStore  │
//!      └────────┬────────┘
//!        ┌──────┴───────┐
//!        ▼              ▼
//!  JsonFileStore   MemoryStore
//! ```
//!
//! The Pomodoro cycle itself is never persisted.

mod error;
mod file;
mod memory;
pub mod settings;
pub mod tasks;

pub use error::StoreError;
pub use file::{default_store_path, JsonFileStore, DEFAULT_STORE_PATH};
pub use memory::MemoryStore;
pub use settings::{
    find_gradient_preset, BackgroundType, ColorScheme, DashboardSettings, GradientPreset,
    SettingsStore, GRADIENT_PRESETS,
};
pub use tasks::{Task, TaskStore};

use serde_json::Value;

/// String-keyed JSON storage.
pub trait KeyValueStore {
    /// Returns the value stored under `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read.
    fn get(&self, key: &str) -> Result<Option<Value>, StoreError>;

    /// Stores `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be written.
    fn set(&self, key: &str, value: Value) -> Result<(), StoreError>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for &S {
    fn get(&self, key: &str) -> Result<Option<Value>, StoreError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: Value) -> Result<(), StoreError> {
        (**self).set(key, value)
    }
}
