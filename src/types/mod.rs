//! Core data types for the focus dashboard.
//!
//! This module defines the data structures used for:
//! - Pomodoro cycle phases and state
//! - Cycle configuration with validation
//! - IPC request/response serialization

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::cycle::CycleError;

// ============================================================================
// CyclePhase
// ============================================================================

/// Represents the current phase of the Pomodoro cycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CyclePhase {
    /// Focused work interval
    #[default]
    Work,
    /// Short break between work intervals
    ShortBreak,
    /// Long break after a full set of sessions
    LongBreak,
}

impl CyclePhase {
    /// Returns the string representation of the phase.
    pub fn as_str(&self) -> &'static str {
        match self {
            CyclePhase::Work => "work",
            CyclePhase::ShortBreak => "short_break",
            CyclePhase::LongBreak => "long_break",
        }
    }
}

// ============================================================================
// CycleConfig
// ============================================================================

/// Largest minute value whose second count still fits in a `u32`.
pub const MAX_MINUTES: u32 = u32::MAX / 60;

/// Duration parameters for the Pomodoro cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CycleConfig {
    /// Work duration in minutes
    pub work_minutes: u32,
    /// Short break duration in minutes
    pub break_minutes: u32,
    /// Long break duration in minutes
    pub long_break_minutes: u32,
    /// Number of work sessions before a long break
    pub sessions_before_long_break: u32,
}

impl Default for CycleConfig {
    fn default() -> Self {
        Self {
            work_minutes: 25,
            break_minutes: 5,
            long_break_minutes: 15,
            sessions_before_long_break: 4,
        }
    }
}

impl CycleConfig {
    /// Returns a copy with the specified work duration.
    pub fn with_work_minutes(mut self, minutes: u32) -> Self {
        self.work_minutes = minutes;
        self
    }

    /// Returns a copy with the specified short break duration.
    pub fn with_break_minutes(mut self, minutes: u32) -> Self {
        self.break_minutes = minutes;
        self
    }

    /// Returns a copy with the specified long break duration.
    pub fn with_long_break_minutes(mut self, minutes: u32) -> Self {
        self.long_break_minutes = minutes;
        self
    }

    /// Returns a copy with the specified session count before a long break.
    pub fn with_sessions_before_long_break(mut self, sessions: u32) -> Self {
        self.sessions_before_long_break = sessions;
        self
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns `CycleError::InvalidConfig` naming the first offending field.
    pub fn validate(&self) -> Result<(), CycleError> {
        let minutes = [
            ("workMinutes", self.work_minutes),
            ("breakMinutes", self.break_minutes),
            ("longBreakMinutes", self.long_break_minutes),
        ];
        for (field, value) in minutes {
            if value < 1 {
                return Err(CycleError::invalid(field, "1以上の整数で指定してください"));
            }
            if value > MAX_MINUTES {
                return Err(CycleError::invalid(field, "値が大きすぎます"));
            }
        }
        if self.sessions_before_long_break < 1 {
            return Err(CycleError::invalid(
                "sessionsBeforeLongBreak",
                "1以上の整数で指定してください",
            ));
        }
        Ok(())
    }

    /// Work duration in seconds.
    pub fn work_seconds(&self) -> u32 {
        self.work_minutes * 60
    }

    /// Short break duration in seconds.
    pub fn break_seconds(&self) -> u32 {
        self.break_minutes * 60
    }

    /// Long break duration in seconds.
    pub fn long_break_seconds(&self) -> u32 {
        self.long_break_minutes * 60
    }
}

// ============================================================================
// CycleState
// ============================================================================

/// Mutable countdown state owned by a `PomodoroCycle`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CycleState {
    /// Current phase
    pub phase: CyclePhase,
    /// Seconds left in the current phase
    pub remaining_seconds: u32,
    /// Whether ticks currently advance the countdown
    pub is_running: bool,
    /// Finished work phases since the last long break
    pub completed_sessions: u32,
}

impl CycleState {
    /// Creates the initial idle state for a configuration.
    pub fn new(config: &CycleConfig) -> Self {
        Self {
            phase: CyclePhase::Work,
            remaining_seconds: config.work_seconds(),
            is_running: false,
            completed_sessions: 0,
        }
    }
}

// ============================================================================
// IPC Types
// ============================================================================

/// Parameters for the configure command.
///
/// Absent fields keep their current value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigureParams {
    /// Work duration in minutes
    #[serde(rename = "workMinutes", skip_serializing_if = "Option::is_none")]
    pub work_minutes: Option<u32>,
    /// Break duration in minutes
    #[serde(rename = "breakMinutes", skip_serializing_if = "Option::is_none")]
    pub break_minutes: Option<u32>,
    /// Long break duration in minutes
    #[serde(rename = "longBreakMinutes", skip_serializing_if = "Option::is_none")]
    pub long_break_minutes: Option<u32>,
    /// Sessions before a long break
    #[serde(
        rename = "sessionsBeforeLongBreak",
        skip_serializing_if = "Option::is_none"
    )]
    pub sessions_before_long_break: Option<u32>,
}

impl ConfigureParams {
    /// Wire names of the configurable fields.
    pub const FIELDS: [&'static str; 4] = [
        "workMinutes",
        "breakMinutes",
        "longBreakMinutes",
        "sessionsBeforeLongBreak",
    ];

    /// Checks the configure fields of a raw JSON request.
    ///
    /// Negative, fractional and non-numeric values cannot be represented in
    /// `ConfigureParams`, so they are rejected here instead of failing
    /// deserialization. Zero passes and is left to `CycleConfig::validate`.
    ///
    /// # Errors
    ///
    /// Returns `CycleError::InvalidConfig` naming the first offending field.
    pub fn check_fields(request: &Value) -> Result<(), CycleError> {
        for field in Self::FIELDS {
            match request.get(field) {
                None | Some(Value::Null) => {}
                Some(value) => match value.as_u64() {
                    Some(n) if n > u64::from(u32::MAX) => {
                        return Err(CycleError::invalid(field, "値が大きすぎます"));
                    }
                    Some(_) => {}
                    None => {
                        return Err(CycleError::invalid(field, "1以上の整数で指定してください"));
                    }
                },
            }
        }
        Ok(())
    }

    /// Returns true if no field is set.
    pub fn is_empty(&self) -> bool {
        self.work_minutes.is_none()
            && self.break_minutes.is_none()
            && self.long_break_minutes.is_none()
            && self.sessions_before_long_break.is_none()
    }

    /// Overlays the set fields onto `base`.
    pub fn apply_to(&self, base: CycleConfig) -> CycleConfig {
        CycleConfig {
            work_minutes: self.work_minutes.unwrap_or(base.work_minutes),
            break_minutes: self.break_minutes.unwrap_or(base.break_minutes),
            long_break_minutes: self.long_break_minutes.unwrap_or(base.long_break_minutes),
            sessions_before_long_break: self
                .sessions_before_long_break
                .unwrap_or(base.sessions_before_long_break),
        }
    }
}

/// IPC request from client to daemon.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "lowercase")]
pub enum IpcRequest {
    /// Start or resume the countdown
    Start,
    /// Pause the countdown
    Pause,
    /// Return to the beginning of a work phase
    Reset,
    /// Change cycle durations
    Configure {
        /// Durations to change
        #[serde(flatten)]
        params: ConfigureParams,
    },
    /// Query the current status
    Status,
}

/// Response data for IPC responses.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseData {
    /// Current phase
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phase: Option<CyclePhase>,
    /// Remaining seconds
    #[serde(rename = "remainingSeconds", skip_serializing_if = "Option::is_none")]
    pub remaining_seconds: Option<u32>,
    /// Whether the countdown is running
    #[serde(rename = "isRunning", skip_serializing_if = "Option::is_none")]
    pub is_running: Option<bool>,
    /// Completed sessions since the last long break
    #[serde(rename = "completedSessions", skip_serializing_if = "Option::is_none")]
    pub completed_sessions: Option<u32>,
    /// Active configuration
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config: Option<CycleConfig>,
}

impl ResponseData {
    /// Creates response data from a cycle state and its configuration.
    pub fn from_cycle(state: &CycleState, config: &CycleConfig) -> Self {
        Self {
            phase: Some(state.phase),
            remaining_seconds: Some(state.remaining_seconds),
            is_running: Some(state.is_running),
            completed_sessions: Some(state.completed_sessions),
            config: Some(*config),
        }
    }
}

/// IPC response from daemon to client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IpcResponse {
    /// Response status ("success" or "error")
    pub status: String,
    /// Human-readable message
    pub message: String,
    /// Optional response data
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<ResponseData>,
}

impl IpcResponse {
    /// Creates a success response.
    pub fn success(message: impl Into<String>, data: Option<ResponseData>) -> Self {
        Self {
            status: "success".to_string(),
            message: message.into(),
            data,
        }
    }

    /// Creates an error response.
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: "error".to_string(),
            message: message.into(),
            data: None,
        }
    }

    /// Returns true for error responses.
    pub fn is_error(&self) -> bool {
        self.status == "error"
    }
}

// ============================================================================
// Tests
// ============================================================================
