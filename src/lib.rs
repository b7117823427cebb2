//! Focus Dashboard Library
//!
//! This library provides the core functionality for the focusboard CLI.
//! It includes:
//! - Pomodoro cycle state machine
//! - Timer engine and IPC server for the daemon
//! - CLI command parsing, IPC client and display utilities
//! - Key-value storage for tasks, display settings, name and focus
//! - Type definitions for configuration, state and IPC messages

pub mod cli;
pub mod cycle;
pub mod daemon;
pub mod store;
pub mod types;

// Re-export commonly used types for convenience
pub use cycle::{format_clock, CycleError, PhaseTransition, PomodoroCycle};
pub use types::{
    ConfigureParams, CycleConfig, CyclePhase, CycleState, IpcRequest, IpcResponse, ResponseData,
};

pub use store::{
    JsonFileStore, KeyValueStore, MemoryStore, SettingsStore, StoreError, Task, TaskStore,
};
