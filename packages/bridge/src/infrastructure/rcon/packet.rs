//! RCON wire format.
//!
//! Each packet is, in little-endian order: an `i32` length covering the
//! rest of the packet, an `i32` request id, an `i32` packet type, the body
//! bytes, and two NUL terminators. An auth failure is signaled by a
//! response carrying request id `-1`.

use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};

use crate::domain::CommandError;

/// Longest body the bridge will accept from the server. Minecraft caps
/// response payloads at 4096 bytes per packet.
const MAX_BODY_LEN: usize = 4096;

/// id + type + two NUL terminators
const HEADER_LEN: i32 = 10;

/// RCON packet types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PacketType {
    /// Login request carrying the password (serverbound, 3).
    Auth,
    /// Command request; also the type of the auth response (2).
    ExecOrAuthResponse,
    /// Command response value (clientbound, 0).
    ResponseValue,
}

impl PacketType {
    pub fn code(&self) -> i32 {
        match self {
            PacketType::Auth => 3,
            PacketType::ExecOrAuthResponse => 2,
            PacketType::ResponseValue => 0,
        }
    }

    fn from_code(code: i32) -> Result<Self, CommandError> {
        match code {
            3 => Ok(PacketType::Auth),
            2 => Ok(PacketType::ExecOrAuthResponse),
            0 => Ok(PacketType::ResponseValue),
            other => Err(CommandError::Protocol(format!(
                "unknown packet type {other}"
            ))),
        }
    }
}

/// One decoded RCON packet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Packet {
    pub request_id: i32,
    pub packet_type: PacketType,
    pub body: String,
}

impl Packet {
    pub fn auth(request_id: i32, password: &str) -> Self {
        Self {
            request_id,
            packet_type: PacketType::Auth,
            body: password.to_string(),
        }
    }

    pub fn command(request_id: i32, command: &str) -> Self {
        Self {
            request_id,
            packet_type: PacketType::ExecOrAuthResponse,
            body: command.to_string(),
        }
    }

    /// Write this packet to the stream.
    pub async fn write_to<W>(&self, writer: &mut W) -> Result<(), CommandError>
    where
        W: AsyncWrite + Unpin,
    {
        let body = self.body.as_bytes();
        let length = HEADER_LEN + body.len() as i32;

        let mut buf = Vec::with_capacity(4 + length as usize);
        buf.extend_from_slice(&length.to_le_bytes());
        buf.extend_from_slice(&self.request_id.to_le_bytes());
        buf.extend_from_slice(&self.packet_type.code().to_le_bytes());
        buf.extend_from_slice(body);
        buf.extend_from_slice(&[0, 0]);

        writer
            .write_all(&buf)
            .await
            .map_err(|e| CommandError::Protocol(format!("write failed: {e}")))?;
        writer
            .flush()
            .await
            .map_err(|e| CommandError::Protocol(format!("flush failed: {e}")))?;
        Ok(())
    }

    /// Read one packet from the stream.
    pub async fn read_from<R>(reader: &mut R) -> Result<Self, CommandError>
    where
        R: AsyncRead + Unpin,
    {
        let length = reader
            .read_i32_le()
            .await
            .map_err(|e| CommandError::Protocol(format!("read failed: {e}")))?;
        if length < HEADER_LEN || length as usize > MAX_BODY_LEN + HEADER_LEN as usize {
            return Err(CommandError::Protocol(format!(
                "invalid packet length {length}"
            )));
        }

        let request_id = reader
            .read_i32_le()
            .await
            .map_err(|e| CommandError::Protocol(format!("read failed: {e}")))?;
        let type_code = reader
            .read_i32_le()
            .await
            .map_err(|e| CommandError::Protocol(format!("read failed: {e}")))?;
        let packet_type = PacketType::from_code(type_code)?;

        let mut rest = vec![0u8; (length - 8) as usize];
        reader
            .read_exact(&mut rest)
            .await
            .map_err(|e| CommandError::Protocol(format!("read failed: {e}")))?;

        let [.., second_last, last] = rest.as_slice() else {
            return Err(CommandError::Protocol("truncated packet".to_string()));
        };
        if *second_last != 0 || *last != 0 {
            return Err(CommandError::Protocol(
                "packet missing NUL terminators".to_string(),
            ));
        }

        let body = String::from_utf8_lossy(&rest[..rest.len() - 2]).into_owned();
        Ok(Self {
            request_id,
            packet_type,
            body,
        })
    }
}
