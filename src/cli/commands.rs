//! Command definitions for the focus dashboard CLI.
//!
//! Uses clap derive macro for argument parsing.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::store::ColorScheme;
use crate::types::{ConfigureParams, CycleConfig};

// ============================================================================
// CLI Structure
// ============================================================================

/// Focus dashboard CLI
#[derive(Parser, Debug)]
#[command(
    name = "focusboard",
    version,
    about = "ポモドーロタイマー付きのフォーカスダッシュボード",
    long_about = "作業/休憩サイクルを管理するポモドーロタイマーと、\n\
                  タスクリスト・今日のフォーカス・表示設定をまとめたダッシュボード。",
    propagate_version = true
)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Enable verbose output for debugging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Daemon socket path (default: ~/.focusboard/focusboard.sock)
    #[arg(long, global = true, value_name = "PATH")]
    pub socket: Option<PathBuf>,

    /// Data file for tasks and settings (default: ~/.focusboard/store.json)
    #[arg(long, global = true, value_name = "PATH")]
    pub store: Option<PathBuf>,
}

// ============================================================================
// Subcommands
// ============================================================================

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Show the dashboard: clock, greeting, focus, tasks and timer (default)
    Dashboard,

    /// Start or resume the Pomodoro countdown
    Start,

    /// Pause the countdown
    Pause,

    /// Reset to the beginning of a work session
    Reset,

    /// Show current timer status
    Status,

    /// Change cycle durations
    Configure(CycleArgs),

    /// Run as daemon (background service)
    #[command(hide = true)]
    Daemon(DaemonArgs),

    /// Manage the task list
    #[command(subcommand)]
    Task(TaskCommand),

    /// Show or change display settings
    Settings(SettingsArgs),

    /// Show or set your name
    Name {
        /// New name
        name: Option<String>,
    },

    /// Show or set today's main focus
    Focus {
        /// New focus text
        text: Option<String>,

        /// Clear the current focus
        #[arg(long, conflicts_with = "text")]
        clear: bool,
    },

    /// Generate shell completion scripts
    Completions {
        /// Shell type for completion script
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

// ============================================================================
// Cycle Arguments
// ============================================================================

/// Duration options for the configure command. Omitted options keep their value.
#[derive(Args, Debug, Clone, Default)]
pub struct CycleArgs {
    /// Work duration in minutes
    #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..))]
    pub work: Option<u32>,

    /// Short break duration in minutes
    #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..))]
    pub break_time: Option<u32>,

    /// Long break duration in minutes
    #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..))]
    pub long_break: Option<u32>,

    /// Work sessions before a long break
    #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..))]
    pub sessions: Option<u32>,
}

impl CycleArgs {
    /// Converts to IPC parameters.
    pub fn to_params(&self) -> ConfigureParams {
        ConfigureParams {
            work_minutes: self.work,
            break_minutes: self.break_time,
            long_break_minutes: self.long_break,
            sessions_before_long_break: self.sessions,
        }
    }
}

/// Arguments for the daemon command
#[derive(Args, Debug, Clone, Default)]
pub struct DaemonArgs {
    /// Initial durations; omitted options use the defaults (25/5/15/4)
    #[command(flatten)]
    pub cycle: CycleArgs,
}

impl DaemonArgs {
    /// Builds the initial cycle configuration.
    pub fn config(&self) -> CycleConfig {
        self.cycle.to_params().apply_to(CycleConfig::default())
    }
}

// ============================================================================
// Task Commands
// ============================================================================

/// Task list operations
#[derive(Subcommand, Debug, Clone)]
pub enum TaskCommand {
    /// Add a task
    Add {
        /// Task title
        #[arg(value_parser = validate_task_title)]
        title: String,

        /// Longer description
        #[arg(short, long)]
        description: Option<String>,
    },

    /// List tasks
    #[command(alias = "ls")]
    List,

    /// Mark a task done (or not done again)
    Done {
        /// Task id or unique id prefix
        id: String,
    },

    /// Edit a task
    Edit {
        /// Task id or unique id prefix
        id: String,

        /// New title
        #[arg(short, long, value_parser = validate_task_title)]
        title: Option<String>,

        /// New description (empty to clear)
        #[arg(short, long)]
        description: Option<String>,
    },

    /// Remove a task
    #[command(alias = "rm")]
    Remove {
        /// Task id or unique id prefix
        id: String,
    },
}

// ============================================================================
// Settings Arguments
// ============================================================================

/// Display settings options. With no options the current settings are shown.
#[derive(Args, Debug, Clone, Default)]
pub struct SettingsArgs {
    /// Use a gradient preset (e.g. "Ocean Depth")
    #[arg(long, value_name = "NAME", conflicts_with = "image")]
    pub gradient: Option<String>,

    /// Use an image URL as background
    #[arg(long, value_name = "URL")]
    pub image: Option<String>,

    /// Accent color: yellow, blue, purple, green, pink
    #[arg(long, value_name = "COLOR")]
    pub color: Option<ColorScheme>,

    /// Enable or disable the glass effect
    #[arg(long, value_name = "BOOL")]
    pub glass: Option<bool>,

    /// Glass blur radius in pixels (0-64)
    #[arg(long, value_name = "PX", value_parser = clap::value_parser!(u32).range(0..=64))]
    pub blur: Option<u32>,
}

impl SettingsArgs {
    /// Returns true if no option was given.
    pub fn is_empty(&self) -> bool {
        self.gradient.is_none()
            && self.image.is_none()
            && self.color.is_none()
            && self.glass.is_none()
            && self.blur.is_none()
    }
}

// ============================================================================
// Validation Functions
// ============================================================================

/// Validates a task title.
///
/// - Must not be blank
/// - Must not exceed 100 characters
fn validate_task_title(s: &str) -> Result<String, String> {
    if s.trim().is_empty() {
        return Err("タスク名は空にできません".to_string());
    }
    if s.chars().count() > 100 {
        return Err("タスク名は100文字以内にしてください".to_string());
    }
    Ok(s.to_string())
}

// ============================================================================
// Tests
// ============================================================================
