//! Pomodoro cycle state machine.
//!
//! `PomodoroCycle` owns the countdown state and advances it one second per
//! `tick()`. Every phase boundary pauses the cycle; the caller has to `start()`
//! again to continue.
//!
//! Session bookkeeping happens in two steps: the counter is incremented when a
//! work phase finishes, and cleared only when leaving the break that follows
//! the session which reached `sessions_before_long_break`. During that long
//! break the counter therefore equals `sessions_before_long_break`.

mod error;

pub use error::CycleError;

use crate::types::{CycleConfig, CyclePhase, CycleState};

// ============================================================================
// PhaseTransition
// ============================================================================

/// Describes a phase boundary crossed by `PomodoroCycle::tick`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhaseTransition {
    /// Phase that just finished
    pub from: CyclePhase,
    /// Phase that is now loaded
    pub to: CyclePhase,
    /// Session counter after the transition
    pub completed_sessions: u32,
}

// ============================================================================
// PomodoroCycle
// ============================================================================

/// Countdown state machine cycling through work and break phases.
#[derive(Debug, Clone)]
pub struct PomodoroCycle {
    config: CycleConfig,
    state: CycleState,
}

impl PomodoroCycle {
    /// Creates an idle cycle at the start of a work phase.
    ///
    /// # Errors
    ///
    /// Returns `CycleError::InvalidConfig` if `config` fails validation.
    pub fn new(config: CycleConfig) -> Result<Self, CycleError> {
        config.validate()?;
        Ok(Self {
            state: CycleState::new(&config),
            config,
        })
    }

    /// Replaces the configuration.
    ///
    /// A running countdown keeps its remaining time. An idle cycle in the
    /// work phase picks up the new work duration immediately.
    ///
    /// # Errors
    ///
    /// Returns `CycleError::InvalidConfig` and leaves the cycle untouched if
    /// `config` fails validation.
    pub fn configure(&mut self, config: CycleConfig) -> Result<(), CycleError> {
        config.validate()?;
        self.config = config;
        if !self.state.is_running && self.state.phase == CyclePhase::Work {
            self.state.remaining_seconds = self.config.work_seconds();
        }
        Ok(())
    }

    /// Starts the countdown.
    ///
    /// Returns false (and does nothing) if already running or if a transition
    /// is pending at zero.
    pub fn start(&mut self) -> bool {
        if self.state.is_running || self.state.remaining_seconds == 0 {
            return false;
        }
        self.state.is_running = true;
        true
    }

    /// Pauses the countdown. Returns false if it was not running.
    pub fn pause(&mut self) -> bool {
        let was_running = self.state.is_running;
        self.state.is_running = false;
        was_running
    }

    /// Returns to an idle work phase with the full work duration.
    ///
    /// The session counter is kept.
    pub fn reset(&mut self) {
        self.state.phase = CyclePhase::Work;
        self.state.remaining_seconds = self.config.work_seconds();
        self.state.is_running = false;
    }

    /// Advances the countdown by one second.
    ///
    /// Returns the transition performed when the countdown reached zero.
    pub fn tick(&mut self) -> Option<PhaseTransition> {
        if !self.state.is_running {
            return None;
        }

        if self.state.remaining_seconds > 0 {
            self.state.remaining_seconds -= 1;
            if self.state.remaining_seconds > 0 {
                return None;
            }
        }

        Some(self.advance_phase())
    }

    /// Loads the next phase and pauses.
    fn advance_phase(&mut self) -> PhaseTransition {
        let from = self.state.phase;
        let threshold = self.config.sessions_before_long_break;

        let (to, remaining) = match from {
            CyclePhase::Work => {
                self.state.completed_sessions += 1;
                if self.state.completed_sessions >= threshold {
                    (CyclePhase::LongBreak, self.config.long_break_seconds())
                } else {
                    (CyclePhase::ShortBreak, self.config.break_seconds())
                }
            }
            CyclePhase::ShortBreak | CyclePhase::LongBreak => {
                if self.state.completed_sessions >= threshold {
                    self.state.completed_sessions = 0;
                }
                (CyclePhase::Work, self.config.work_seconds())
            }
        };

        self.state.phase = to;
        self.state.remaining_seconds = remaining;
        self.state.is_running = false;

        PhaseTransition {
            from,
            to,
            completed_sessions: self.state.completed_sessions,
        }
    }

    /// Current phase.
    pub fn phase(&self) -> CyclePhase {
        self.state.phase
    }

    /// Seconds left in the current phase.
    pub fn remaining_seconds(&self) -> u32 {
        self.state.remaining_seconds
    }

    /// Whether ticks advance the countdown.
    pub fn is_running(&self) -> bool {
        self.state.is_running
    }

    /// Finished work phases since the last long break.
    pub fn completed_sessions(&self) -> u32 {
        self.state.completed_sessions
    }

    /// Active configuration.
    pub fn config(&self) -> &CycleConfig {
        &self.config
    }

    /// Read-only view of the whole state.
    pub fn state(&self) -> &CycleState {
        &self.state
    }

    #[cfg(test)]
    pub(crate) fn state_mut(&mut self) -> &mut CycleState {
        &mut self.state
    }
}

impl Default for PomodoroCycle {
    fn default() -> Self {
        let config = CycleConfig::default();
        Self {
            state: CycleState::new(&config),
            config,
        }
    }
}

/// Formats seconds as `MM:SS`.
pub fn format_clock(total_seconds: u32) -> String {
    format!("{:02}:{:02}", total_seconds / 60, total_seconds % 60)
}

// ============================================================================
// Tests
// ============================================================================
