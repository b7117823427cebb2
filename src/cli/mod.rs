//! CLI module for the focus dashboard.
//!
//! This module provides:
//! - Command parsing (commands)
//! - IPC client for daemon communication (client)
//! - Output formatting (display)

pub mod client;
pub mod commands;
pub mod display;

pub use client::IpcClient;
pub use commands::{Cli, Commands, CycleArgs, DaemonArgs, SettingsArgs, TaskCommand};
pub use display::Display;
