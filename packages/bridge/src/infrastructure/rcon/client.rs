//! Per-call RCON command channel.

use std::time::Duration;

use async_trait::async_trait;
use tokio::io::AsyncWriteExt;
use tokio::net::TcpStream;
use tokio::time::timeout;

use crate::domain::{CommandChannel, CommandError};

use super::packet::{Packet, PacketType};

const AUTH_REQUEST_ID: i32 = 1;
const COMMAND_REQUEST_ID: i32 = 2;

/// Failed authentication is reported with this sentinel request id.
const AUTH_REJECTED_ID: i32 = -1;

/// [`CommandChannel`] implementation speaking RCON to the game server.
///
/// Every `execute` call runs a complete session — connect, authenticate,
/// one command, one response, close — under a single hard timeout. The
/// socket is owned by the call and dropped (closed) on every exit path,
/// including timeout. Sessions are deliberately not pooled: reuse would
/// require mutual exclusion on a shared socket, and the connect overhead is
/// negligible next to chat latency.
pub struct RconCommandChannel {
    host: String,
    port: u16,
    password: String,
    timeout: Duration,
}

impl RconCommandChannel {
    pub fn new(host: String, port: u16, password: String, timeout: Duration) -> Self {
        Self {
            host,
            port,
            password,
            timeout,
        }
    }

    /// Idle → Connecting → Authenticating → Sending → AwaitingResponse;
    /// any error (or the outer timeout) ends the session and drops the
    /// socket.
    async fn run_session(&self, command: &str) -> Result<String, CommandError> {
        // Connecting
        let mut stream = TcpStream::connect((self.host.as_str(), self.port))
            .await
            .map_err(|e| CommandError::ConnectFailed(e.to_string()))?;

        // Authenticating
        Packet::auth(AUTH_REQUEST_ID, &self.password)
            .write_to(&mut stream)
            .await?;
        loop {
            let packet = Packet::read_from(&mut stream).await?;
            match packet.packet_type {
                // Some servers precede the auth response with an empty
                // response-value packet; skip it.
                PacketType::ResponseValue => continue,
                PacketType::ExecOrAuthResponse => {
                    if packet.request_id == AUTH_REJECTED_ID {
                        return Err(CommandError::AuthFailed);
                    }
                    if packet.request_id != AUTH_REQUEST_ID {
                        return Err(CommandError::Protocol(format!(
                            "auth response for unknown request id {}",
                            packet.request_id
                        )));
                    }
                    break;
                }
                PacketType::Auth => {
                    return Err(CommandError::Protocol(
                        "server sent an auth request".to_string(),
                    ));
                }
            }
        }

        // Sending
        Packet::command(COMMAND_REQUEST_ID, command)
            .write_to(&mut stream)
            .await?;

        // AwaitingResponse
        let response = Packet::read_from(&mut stream).await?;
        if response.packet_type != PacketType::ResponseValue
            || response.request_id != COMMAND_REQUEST_ID
        {
            return Err(CommandError::Protocol(format!(
                "unexpected response (id {}, type {:?})",
                response.request_id, response.packet_type
            )));
        }

        // Closed; shutdown failures are irrelevant since the stream is
        // dropped either way.
        let _ = stream.shutdown().await;
        Ok(response.body)
    }
}

#[async_trait]
impl CommandChannel for RconCommandChannel {
    async fn execute(&self, command: &str) -> Result<String, CommandError> {
        let timeout_secs = self.timeout.as_secs();
        tracing::debug!("Executing RCON command against {}:{}", self.host, self.port);
        match timeout(self.timeout, self.run_session(command)).await {
            Ok(result) => {
                if let Err(e) = &result {
                    tracing::warn!("RCON command failed: {}", e);
                }
                result
            }
            Err(_) => {
                tracing::warn!("RCON command timed out after {}s", timeout_secs);
                Err(CommandError::Timeout(timeout_secs))
            }
        }
    }
}
