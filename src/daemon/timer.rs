//! Timer engine for the focus dashboard.
//!
//! This module provides:
//! - `TimerEngine`, the single owner of the `PomodoroCycle`
//! - Event firing for logging and external integrations
//! - `run_ticker`, the once-per-second driver built on `tokio::time::interval_at`

use std::sync::Arc;

use tokio::sync::{mpsc, Mutex};
use tokio::time::{interval_at, Duration, Instant, MissedTickBehavior};

use crate::cycle::{CycleError, PhaseTransition, PomodoroCycle};
use crate::types::{CycleConfig, CyclePhase, CycleState};

/// Nominal tick period.
pub const TICK_PERIOD: Duration = Duration::from_secs(1);

// ============================================================================
// TimerEvent
// ============================================================================

/// Timer events for logging and external integrations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimerEvent {
    /// Countdown started or resumed
    Started {
        /// Phase being counted down
        phase: CyclePhase,
    },
    /// Countdown paused
    Paused,
    /// Cycle reset to the start of a work phase
    Reset,
    /// Durations changed
    Configured {
        /// The new configuration
        config: CycleConfig,
    },
    /// One second elapsed
    Tick {
        /// Remaining seconds
        remaining_seconds: u32,
    },
    /// A phase ended and the next one was loaded
    PhaseCompleted {
        /// Phase that ended
        from: CyclePhase,
        /// Phase that was loaded
        to: CyclePhase,
        /// Session counter after the transition
        completed_sessions: u32,
    },
}

impl From<PhaseTransition> for TimerEvent {
    fn from(transition: PhaseTransition) -> Self {
        TimerEvent::PhaseCompleted {
            from: transition.from,
            to: transition.to,
            completed_sessions: transition.completed_sessions,
        }
    }
}

// ============================================================================
// TimerEngine
// ============================================================================

/// Owns the Pomodoro cycle and reports its changes as events.
pub struct TimerEngine {
    /// The cycle state machine
    cycle: PomodoroCycle,
    /// Event sender channel
    event_tx: mpsc::UnboundedSender<TimerEvent>,
}

impl TimerEngine {
    /// Creates a new TimerEngine with the given configuration and event channel.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn new(
        config: CycleConfig,
        event_tx: mpsc::UnboundedSender<TimerEvent>,
    ) -> Result<Self, CycleError> {
        Ok(Self {
            cycle: PomodoroCycle::new(config)?,
            event_tx,
        })
    }

    /// Starts the countdown. Does nothing if it is already running.
    pub fn start(&mut self) {
        if self.cycle.start() {
            self.emit(TimerEvent::Started {
                phase: self.cycle.phase(),
            });
        }
    }

    /// Pauses the countdown. Does nothing if it is not running.
    pub fn pause(&mut self) {
        if self.cycle.pause() {
            self.emit(TimerEvent::Paused);
        }
    }

    /// Resets the cycle to the start of a work phase.
    ///
    /// Emits `Reset` only if the state actually changed.
    pub fn reset(&mut self) {
        let before = self.cycle.state().clone();
        self.cycle.reset();
        if *self.cycle.state() != before {
            self.emit(TimerEvent::Reset);
        }
    }

    /// Applies a new configuration.
    ///
    /// # Errors
    ///
    /// Returns `CycleError::InvalidConfig` and keeps the previous
    /// configuration if validation fails.
    pub fn configure(&mut self, config: CycleConfig) -> Result<(), CycleError> {
        let previous_config = *self.cycle.config();
        let previous_state = self.cycle.state().clone();

        self.cycle.configure(config)?;

        if previous_config != config || *self.cycle.state() != previous_state {
            self.emit(TimerEvent::Configured { config });
        }
        Ok(())
    }

    /// Advances the cycle by one second.
    pub fn tick(&mut self) -> Option<PhaseTransition> {
        if !self.cycle.is_running() {
            return None;
        }

        let transition = self.cycle.tick();

        self.emit(TimerEvent::Tick {
            remaining_seconds: self.cycle.remaining_seconds(),
        });

        if let Some(transition) = transition {
            tracing::info!(
                from = transition.from.as_str(),
                to = transition.to.as_str(),
                completed_sessions = transition.completed_sessions,
                "フェーズが終了しました"
            );
            self.emit(transition.into());
        }

        transition
    }

    /// Returns the current cycle state.
    pub fn get_state(&self) -> &CycleState {
        self.cycle.state()
    }

    /// Returns the active configuration.
    pub fn get_config(&self) -> &CycleConfig {
        self.cycle.config()
    }

    fn emit(&self, event: TimerEvent) {
        if self.event_tx.send(event).is_err() {
            tracing::debug!("Timer event receiver dropped");
        }
    }
}

/// Drives `engine` with one tick per `TICK_PERIOD` until the task is aborted.
pub async fn run_ticker(engine: Arc<Mutex<TimerEngine>>) {
    let mut ticker = interval_at(Instant::now() + TICK_PERIOD, TICK_PERIOD);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        ticker.tick().await;
        engine.lock().await.tick();
    }
}

// ============================================================================
// Tests
// ============================================================================
