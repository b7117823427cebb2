//! Pomodoro cycle error types.

use thiserror::Error;

/// Errors raised by `PomodoroCycle`.
///
/// Only configuration can fail; every other cycle operation is total.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CycleError {
    /// A duration or session count was not a positive integer.
    #[error("設定値が不正です ({field}): {reason}")]
    InvalidConfig {
        /// Name of the offending field
        field: &'static str,
        /// Why the value was rejected
        reason: &'static str,
    },
}

impl CycleError {
    pub(crate) fn invalid(field: &'static str, reason: &'static str) -> Self {
        Self::InvalidConfig { field, reason }
    }

    /// Returns the field that failed validation.
    #[must_use]
    pub fn field(&self) -> &'static str {
        match self {
            Self::InvalidConfig { field, .. } => field,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CycleError::invalid("workMinutes", "1以上の整数で指定してください");
        let message = err.to_string();
        assert!(message.contains("workMinutes"));
        assert!(message.contains("設定値が不正です"));
    }

    #[test]
    fn test_field() {
        let err = CycleError::invalid("breakMinutes", "reason");
        assert_eq!(err.field(), "breakMinutes");
    }
}
