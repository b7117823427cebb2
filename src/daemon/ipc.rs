//! IPC Server for the focus dashboard daemon.
//!
//! This module provides Unix Domain Socket IPC functionality:
//! - Server that listens on a Unix socket
//! - Request/response handling for cycle commands
//! - Integration with TimerEngine for command execution

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use serde_json::Value;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{UnixListener, UnixStream};
use tokio::sync::Mutex;
use tokio::time::{timeout, Duration};

use crate::cycle::CycleError;
use crate::types::{ConfigureParams, IpcRequest, IpcResponse, ResponseData};

use super::timer::TimerEngine;

// ============================================================================
// Constants
// ============================================================================

/// Default socket path, relative to the home directory
pub const DEFAULT_SOCKET_PATH: &str = ".focusboard/focusboard.sock";

/// Maximum request size in bytes (4KB)
const MAX_REQUEST_SIZE: usize = 4096;

/// Read timeout in seconds
const READ_TIMEOUT_SECS: u64 = 5;

// ============================================================================
// IpcError
// ============================================================================

/// IPC-specific error types.
#[derive(Debug, thiserror::Error)]
pub enum IpcError {
    /// Read error
    #[error("Failed to read request: {0}")]
    ReadError(String),

    /// Peer closed the connection before sending anything
    #[error("Connection closed by client")]
    ConnectionClosed,

    /// Timeout error
    #[error("Operation timed out")]
    Timeout,

    /// Request too large
    #[error("Request too large (max {MAX_REQUEST_SIZE} bytes)")]
    RequestTooLarge,

    /// Request is not a valid command
    #[error("リクエストの形式が不正です: {0}")]
    InvalidRequest(String),

    /// Configure request carries a value no duration can have
    #[error(transparent)]
    InvalidConfig(#[from] CycleError),
}

impl IpcError {
    /// Returns true if the client should get an error response.
    ///
    /// Transport failures close the connection without a reply.
    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            Self::RequestTooLarge | Self::InvalidRequest(_) | Self::InvalidConfig(_)
        )
    }
}

/// Resolves the default socket path under the user's home directory.
///
/// # Errors
///
/// Returns an error if the home directory cannot be determined.
pub fn default_socket_path() -> Result<PathBuf> {
    let home = dirs::home_dir().context("ホームディレクトリが見つかりません")?;
    Ok(home.join(DEFAULT_SOCKET_PATH))
}

// ============================================================================
// IpcServer
// ============================================================================

/// Unix Domain Socket IPC server.
pub struct IpcServer {
    /// Unix socket listener
    listener: UnixListener,
    /// Socket path (for cleanup)
    socket_path: PathBuf,
}

impl IpcServer {
    /// Creates a new IPC server bound to the specified socket path.
    ///
    /// If the socket file already exists, it will be removed before binding.
    ///
    /// # Errors
    ///
    /// Returns an error if the socket cannot be bound.
    pub fn new(socket_path: &Path) -> Result<Self> {
        if socket_path.exists() {
            std::fs::remove_file(socket_path)
                .with_context(|| format!("Failed to remove existing socket: {:?}", socket_path))?;
        }

        if let Some(parent) = socket_path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create socket directory: {:?}", parent))?;
        }

        let listener = UnixListener::bind(socket_path)
            .with_context(|| format!("Failed to bind Unix socket: {:?}", socket_path))?;

        tracing::debug!("IPC server listening on {:?}", socket_path);

        Ok(Self {
            listener,
            socket_path: socket_path.to_path_buf(),
        })
    }

    /// Accepts an incoming client connection.
    ///
    /// # Errors
    ///
    /// Returns an error if the connection cannot be accepted.
    pub async fn accept(&self) -> Result<UnixStream> {
        let (stream, _addr) = self
            .listener
            .accept()
            .await
            .context("Failed to accept connection")?;
        Ok(stream)
    }

    /// Receives and deserializes an IPC request from the stream.
    ///
    /// Applies a read timeout to prevent blocking indefinitely.
    ///
    /// # Errors
    ///
    /// Returns an error if reading or deserialization fails.
    pub async fn receive_request(stream: &mut UnixStream) -> Result<IpcRequest> {
        let mut buffer = vec![0u8; MAX_REQUEST_SIZE + 1];

        let read_result = timeout(
            Duration::from_secs(READ_TIMEOUT_SECS),
            stream.read(&mut buffer),
        )
        .await;

        let n = match read_result {
            Ok(Ok(n)) => n,
            Ok(Err(e)) => return Err(IpcError::ReadError(e.to_string()).into()),
            Err(_) => return Err(IpcError::Timeout.into()),
        };

        if n == 0 {
            return Err(IpcError::ConnectionClosed.into());
        }
        if n > MAX_REQUEST_SIZE {
            return Err(IpcError::RequestTooLarge.into());
        }

        Ok(parse_request(&buffer[..n])?)
    }

    /// Serializes and sends an IPC response to the stream.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or writing fails.
    pub async fn send_response(stream: &mut UnixStream, response: &IpcResponse) -> Result<()> {
        let json = serde_json::to_vec(response).context("Failed to serialize IPC response")?;

        stream
            .write_all(&json)
            .await
            .context("Failed to write response")?;
        stream.flush().await.context("Failed to flush response")?;

        Ok(())
    }

    /// Returns the socket path.
    pub fn socket_path(&self) -> &Path {
        &self.socket_path
    }
}

impl Drop for IpcServer {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.socket_path);
    }
}

/// Parses a request, checking configure values before typed deserialization.
fn parse_request(bytes: &[u8]) -> Result<IpcRequest, IpcError> {
    let value: Value =
        serde_json::from_slice(bytes).map_err(|e| IpcError::InvalidRequest(e.to_string()))?;

    if value.get("command").and_then(Value::as_str) == Some("configure") {
        ConfigureParams::check_fields(&value)?;
    }

    serde_json::from_value(value).map_err(|e| IpcError::InvalidRequest(e.to_string()))
}

// ============================================================================
// RequestHandler
// ============================================================================

/// Handles IPC requests by dispatching to TimerEngine.
pub struct RequestHandler {
    /// Shared reference to the timer engine
    engine: Arc<Mutex<TimerEngine>>,
}

impl RequestHandler {
    /// Creates a new request handler with the given timer engine.
    pub fn new(engine: Arc<Mutex<TimerEngine>>) -> Self {
        Self { engine }
    }

    /// Serves a single request/response exchange on `stream`.
    ///
    /// Malformed or out-of-range requests get an error response; transport
    /// failures are only logged.
    pub async fn serve(&self, mut stream: UnixStream) {
        let response = match IpcServer::receive_request(&mut stream).await {
            Ok(request) => self.handle(request).await,
            Err(e) => match e.downcast_ref::<IpcError>() {
                Some(ipc_error) if ipc_error.is_rejection() => {
                    tracing::debug!("Rejected request: {}", ipc_error);
                    IpcResponse::error(ipc_error.to_string())
                }
                _ => {
                    tracing::warn!("リクエストの受信に失敗しました: {:#}", e);
                    return;
                }
            },
        };

        if let Err(e) = IpcServer::send_response(&mut stream, &response).await {
            tracing::warn!("レスポンスの送信に失敗しました: {:#}", e);
        }
    }

    /// Handles an IPC request and returns the appropriate response.
    pub async fn handle(&self, request: IpcRequest) -> IpcResponse {
        tracing::debug!(?request, "Handling IPC request");

        match request {
            IpcRequest::Start => self.handle_start().await,
            IpcRequest::Pause => self.handle_pause().await,
            IpcRequest::Reset => self.handle_reset().await,
            IpcRequest::Configure { params } => self.handle_configure(params).await,
            IpcRequest::Status => self.handle_status().await,
        }
    }

    /// Handles the start command.
    async fn handle_start(&self) -> IpcResponse {
        let mut engine = self.engine.lock().await;
        let was_running = engine.get_state().is_running;
        engine.start();

        let message = match (was_running, engine.get_state().is_running) {
            (true, _) => "タイマーは既に実行中です",
            (false, true) => "タイマーを開始しました",
            (false, false) => "フェーズの切り替え待ちです",
        };
        Self::success(&engine, message)
    }

    /// Handles the pause command.
    async fn handle_pause(&self) -> IpcResponse {
        let mut engine = self.engine.lock().await;
        engine.pause();
        Self::success(&engine, "タイマーを一時停止しました")
    }

    /// Handles the reset command.
    async fn handle_reset(&self) -> IpcResponse {
        let mut engine = self.engine.lock().await;
        engine.reset();
        Self::success(&engine, "タイマーをリセットしました")
    }

    /// Handles the configure command.
    async fn handle_configure(&self, params: ConfigureParams) -> IpcResponse {
        let mut engine = self.engine.lock().await;
        let config = params.apply_to(*engine.get_config());

        match engine.configure(config) {
            Ok(()) => Self::success(&engine, "設定を更新しました"),
            Err(e) => {
                tracing::debug!(field = e.field(), "Rejected configuration: {}", e);
                IpcResponse::error(e.to_string())
            }
        }
    }

    /// Handles the status command.
    async fn handle_status(&self) -> IpcResponse {
        let engine = self.engine.lock().await;
        Self::success(&engine, "")
    }

    fn success(engine: &TimerEngine, message: &str) -> IpcResponse {
        IpcResponse::success(
            message,
            Some(ResponseData::from_cycle(
                engine.get_state(),
                engine.get_config(),
            )),
        )
    }
}

// ============================================================================
// Tests
// ============================================================================
