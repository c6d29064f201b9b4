//! Protocol codec
//!
//! Encoding and decoding functions for the wire protocol.
//!
//! ## Wire Format
//!
//! ### Request Format
//! ```text
//! ┌──────────┬──────────┬─────────────────────────────┐
//! │ Kind (1) │ Len (4)  │         Payload             │
//! └──────────┴──────────┴─────────────────────────────┘
//! ```
//!
//! ### Payload by Request Kind (bincode)
//! - GET_USER:      i32 id
//! - GET_USERS:     Vec<i32> ids
//! - GET_ALL_USERS: empty
//! - SEARCH_USERS:  String query
//! - PING:          empty
//!
//! ### Response Format
//! ```text
//! ┌──────────┬──────────┬─────────────────────────────┐
//! │Status(1) │ Len (4)  │         Payload             │
//! └──────────┴──────────┴─────────────────────────────┘
//! ```

use std::io::{Read, Write};

use super::{Request, RequestKind, Response, Status};
use crate::directory::UserId;
use crate::error::{DirectoryError, Result};

/// Header size: 1 byte kind/status + 4 bytes length
pub const HEADER_SIZE: usize = 5;

/// Maximum payload size (16 MB)
pub const MAX_PAYLOAD_SIZE: u32 = 16 * 1024 * 1024;

// =============================================================================
// Request Encoding/Decoding
// =============================================================================

/// Encode a request to bytes
///
/// Format: kind (1) + payload_len (4) + payload
pub fn encode_request(request: &Request) -> Result<Vec<u8>> {
    let payload = match request {
        Request::GetUser { id } => bincode::serialize(id)?,
        Request::GetUsers { ids } => bincode::serialize(ids)?,
        Request::SearchUsers { query } => bincode::serialize(query)?,
        Request::GetAllUsers | Request::Ping => Vec::new(),
    };

    Ok(frame(request.kind() as u8, &payload))
}

/// Decode a request from bytes
pub fn decode_request(bytes: &[u8]) -> Result<Request> {
    let (kind, payload) = split_frame(bytes, "request")?;
    decode_request_payload(kind, payload)
}

fn decode_request_payload(kind_byte: u8, payload: &[u8]) -> Result<Request> {
    let kind = RequestKind::from_byte(kind_byte).ok_or_else(|| {
        DirectoryError::Protocol(format!("Unknown request kind: 0x{:02x}", kind_byte))
    })?;

    match kind {
        RequestKind::GetUser => {
            let id: UserId = decode_payload(payload, "GET_USER")?;
            Ok(Request::GetUser { id })
        }
        RequestKind::GetUsers => {
            let ids: Vec<UserId> = decode_payload(payload, "GET_USERS")?;
            Ok(Request::GetUsers { ids })
        }
        RequestKind::SearchUsers => {
            let query: String = decode_payload(payload, "SEARCH_USERS")?;
            Ok(Request::SearchUsers { query })
        }
        RequestKind::GetAllUsers => {
            expect_empty(payload, "GET_ALL_USERS")?;
            Ok(Request::GetAllUsers)
        }
        RequestKind::Ping => {
            expect_empty(payload, "PING")?;
            Ok(Request::Ping)
        }
    }
}

fn decode_payload<T: serde::de::DeserializeOwned>(payload: &[u8], name: &str) -> Result<T> {
    bincode::deserialize(payload)
        .map_err(|e| DirectoryError::Protocol(format!("{} request: malformed payload: {}", name, e)))
}

fn expect_empty(payload: &[u8], name: &str) -> Result<()> {
    if !payload.is_empty() {
        return Err(DirectoryError::Protocol(format!(
            "{} request: unexpected payload of {} bytes",
            name,
            payload.len()
        )));
    }
    Ok(())
}

// =============================================================================
// Response Encoding/Decoding
// =============================================================================

/// Encode a response to bytes
///
/// Format: status (1) + payload_len (4) + payload
pub fn encode_response(response: &Response) -> Vec<u8> {
    let payload = response.payload.as_deref().unwrap_or(&[]);
    frame(response.status as u8, payload)
}

/// Decode a response from bytes
pub fn decode_response(bytes: &[u8]) -> Result<Response> {
    let (status, payload) = split_frame(bytes, "response")?;
    decode_response_payload(status, payload)
}

fn decode_response_payload(status_byte: u8, payload: &[u8]) -> Result<Response> {
    let status = Status::from_byte(status_byte).ok_or_else(|| {
        DirectoryError::Protocol(format!("Unknown response status: 0x{:02x}", status_byte))
    })?;

    let payload = if payload.is_empty() {
        None
    } else {
        Some(payload.to_vec())
    };

    Ok(Response { status, payload })
}

// =============================================================================
// Framing
// =============================================================================

fn frame(tag: u8, payload: &[u8]) -> Vec<u8> {
    let mut message = Vec::with_capacity(HEADER_SIZE + payload.len());
    message.push(tag);
    message.extend_from_slice(&(payload.len() as u32).to_be_bytes());
    message.extend_from_slice(payload);
    message
}

fn payload_len(header: &[u8; HEADER_SIZE], what: &str) -> Result<usize> {
    let len = u32::from_be_bytes([header[1], header[2], header[3], header[4]]);
    if len > MAX_PAYLOAD_SIZE {
        return Err(DirectoryError::Protocol(format!(
            "{} payload too large: {} bytes (max {})",
            what, len, MAX_PAYLOAD_SIZE
        )));
    }
    Ok(len as usize)
}

/// Split a complete frame into its tag byte and payload
fn split_frame<'a>(bytes: &'a [u8], what: &str) -> Result<(u8, &'a [u8])> {
    if bytes.len() < HEADER_SIZE {
        return Err(DirectoryError::Protocol(format!(
            "Incomplete {} header: expected {} bytes, got {}",
            what,
            HEADER_SIZE,
            bytes.len()
        )));
    }

    let header = [bytes[0], bytes[1], bytes[2], bytes[3], bytes[4]];
    let len = payload_len(&header, what)?;

    let total_len = HEADER_SIZE + len;
    if bytes.len() < total_len {
        return Err(DirectoryError::Protocol(format!(
            "Incomplete {} payload: expected {} bytes, got {}",
            what,
            total_len,
            bytes.len()
        )));
    }

    Ok((header[0], &bytes[HEADER_SIZE..total_len]))
}

/// Read one frame (header then payload) from a stream
fn read_frame<R: Read>(reader: &mut R, what: &str) -> Result<(u8, Vec<u8>)> {
    let mut header = [0u8; HEADER_SIZE];
    reader.read_exact(&mut header)?;

    let len = payload_len(&header, what)?;

    let mut payload = vec![0u8; len];
    if len > 0 {
        reader.read_exact(&mut payload)?;
    }

    Ok((header[0], payload))
}

// =============================================================================
// Stream-based I/O helpers
// =============================================================================

/// Read a complete request from a stream
///
/// Blocks until a complete request is received or an error occurs
pub fn read_request<R: Read>(reader: &mut R) -> Result<Request> {
    let (kind, payload) = read_frame(reader, "request")?;
    decode_request_payload(kind, &payload)
}

/// Write a request to a stream
pub fn write_request<W: Write>(writer: &mut W, request: &Request) -> Result<()> {
    let bytes = encode_request(request)?;
    writer.write_all(&bytes)?;
    writer.flush()?;
    Ok(())
}

/// Read a complete response from a stream
pub fn read_response<R: Read>(reader: &mut R) -> Result<Response> {
    let (status, payload) = read_frame(reader, "response")?;
    decode_response_payload(status, &payload)
}

/// Write a response to a stream
pub fn write_response<W: Write>(writer: &mut W, response: &Response) -> Result<()> {
    let bytes = encode_response(response);
    writer.write_all(&bytes)?;
    writer.flush()?;
    Ok(())
}
