//! Daemon module for the focus dashboard.
//!
//! This module contains the core daemon functionality:
//! - `timer`: Timer engine owning the Pomodoro cycle, plus the tick driver
//! - `ipc`: Unix socket server and request dispatch

pub mod ipc;
pub mod timer;

pub use ipc::{IpcServer, RequestHandler};
pub use timer::{run_ticker, TimerEngine, TimerEvent};

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::sync::{mpsc, Mutex};

use crate::types::CycleConfig;

/// Runs the daemon until Ctrl-C.
///
/// Binds `socket_path`, drives the cycle once per second and serves one
/// request per connection.
///
/// # Errors
///
/// Returns an error if the configuration is invalid or the socket cannot be bound.
pub async fn run(socket_path: &Path, config: CycleConfig) -> Result<()> {
    let (event_tx, event_rx) = mpsc::unbounded_channel();
    let engine = TimerEngine::new(config, event_tx).context("初期設定が不正です")?;
    let engine = Arc::new(Mutex::new(engine));

    let server = IpcServer::new(socket_path)?;
    let handler = Arc::new(RequestHandler::new(engine.clone()));

    let ticker = tokio::spawn(run_ticker(engine));
    let logger = tokio::spawn(log_events(event_rx));

    tracing::info!(socket = ?server.socket_path(), "Daemon started");

    loop {
        tokio::select! {
            accepted = server.accept() => match accepted {
                Ok(stream) => {
                    let handler = handler.clone();
                    tokio::spawn(async move { handler.serve(stream).await });
                }
                Err(e) => tracing::warn!("接続の受け付けに失敗しました: {:#}", e),
            },
            signal = tokio::signal::ctrl_c() => {
                if let Err(e) = signal {
                    tracing::warn!("Failed to listen for Ctrl-C: {}", e);
                }
                break;
            }
        }
    }

    ticker.abort();
    logger.abort();
    tracing::info!("Daemon stopped");

    Ok(())
}

/// Writes timer events to the log.
async fn log_events(mut event_rx: mpsc::UnboundedReceiver<TimerEvent>) {
    while let Some(event) = event_rx.recv().await {
        match event {
            TimerEvent::Tick { remaining_seconds } => {
                tracing::trace!(remaining_seconds, "tick");
            }
            other => tracing::debug!(event = ?other, "Timer event"),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::UnixStream;
    use tokio::time::{sleep, Duration};

    use crate::types::IpcResponse;

    fn create_temp_socket_path() -> PathBuf {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("daemon.sock");
        std::mem::forget(dir);
        path
    }

    #[tokio::test]
    async fn test_run_rejects_invalid_config() {
        let socket_path = create_temp_socket_path();
        let config = CycleConfig::default().with_work_minutes(0);

        let result = run(&socket_path, config).await;

        assert!(result.is_err());
        assert!(!socket_path.exists());
    }

    async fn spawn_daemon(
        config: CycleConfig,
    ) -> (PathBuf, tokio::task::JoinHandle<Result<()>>) {
        let socket_path = create_temp_socket_path();
        let daemon_path = socket_path.clone();
        let daemon = tokio::spawn(async move { run(&daemon_path, config).await });

        for _ in 0..20 {
            if socket_path.exists() {
                break;
            }
            sleep(Duration::from_millis(50)).await;
        }
        (socket_path, daemon)
    }

    /// Sends `payload`, half-closes and reads the whole reply.
    async fn exchange(socket_path: &Path, payload: &str) -> Vec<u8> {
        let mut stream = UnixStream::connect(socket_path).await.unwrap();
        stream.write_all(payload.as_bytes()).await.unwrap();
        stream.shutdown().await.unwrap();
        let mut buffer = Vec::new();
        stream.read_to_end(&mut buffer).await.unwrap();
        buffer
    }

    #[tokio::test]
    async fn test_run_serves_status() {
        let (socket_path, daemon) =
            spawn_daemon(CycleConfig::default().with_work_minutes(10)).await;

        let reply = exchange(&socket_path, r#"{"command":"status"}"#).await;
        let response: IpcResponse = serde_json::from_slice(&reply).unwrap();

        daemon.abort();

        assert_eq!(response.status, "success");
        assert_eq!(response.data.unwrap().remaining_seconds, Some(600));
    }

    #[tokio::test]
    async fn test_run_answers_out_of_range_configure() {
        let (socket_path, daemon) = spawn_daemon(CycleConfig::default()).await;

        for payload in [
            r#"{"command":"configure","workMinutes":-5}"#,
            r#"{"command":"configure","workMinutes":1.5}"#,
        ] {
            let reply = exchange(&socket_path, payload).await;
            let response: IpcResponse = serde_json::from_slice(&reply).unwrap();
            assert!(response.is_error(), "{}", payload);
            assert!(response.message.contains("workMinutes"), "{}", response.message);
        }

        let reply = exchange(&socket_path, r#"{"command":"status"}"#).await;
        let response: IpcResponse = serde_json::from_slice(&reply).unwrap();
        daemon.abort();

        assert_eq!(response.data.unwrap().config, Some(CycleConfig::default()));
    }
}
