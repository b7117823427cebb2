//! Storage error types.
//!
//! Covers both the key-value backends and the record stores built on them.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while reading or writing dashboard data.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The backing file could not be read or written.
    #[error("ストアファイルにアクセスできません ({path}): {source}")]
    Io {
        /// File that failed
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The backing file or a stored value is not valid JSON for its type.
    #[error("ストアデータの形式が不正です: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The backing file does not hold a JSON object.
    #[error("ストアファイルの形式が不正です ({0})")]
    NotAnObject(PathBuf),

    /// A lock guarding in-memory data was poisoned.
    #[error("ストアのロックが破損しています")]
    LockPoisoned,

    /// A task title was empty after trimming.
    #[error("タスク名は空にできません")]
    EmptyTitle,

    /// A user name was empty after trimming.
    #[error("名前は空にできません")]
    EmptyName,

    /// No task matches the given id.
    #[error("タスクが見つかりません: {0}")]
    TaskNotFound(String),

    /// Several tasks share the given id prefix.
    #[error("IDが複数のタスクに一致します: {0}")]
    AmbiguousTaskId(String),

    /// Dashboard settings failed validation.
    #[error("表示設定が不正です: {0}")]
    InvalidSettings(String),
}
