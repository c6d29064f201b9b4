//! Response definitions
//!
//! Represents responses to clients.

use serde::{Deserialize, Serialize};

use crate::directory::{User, UserId};
use crate::error::{DirectoryError, Result};

/// Response status codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Status {
    Ok = 0x00,
    NotFound = 0x01,
    InvalidArgument = 0x02,
    Error = 0x03,
}

impl Status {
    pub fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            0x00 => Some(Status::Ok),
            0x01 => Some(Status::NotFound),
            0x02 => Some(Status::InvalidArgument),
            0x03 => Some(Status::Error),
            _ => None,
        }
    }
}

/// Body of a successful response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Reply {
    /// A single record (GetUser)
    User(User),

    /// A record list (GetAllUsers, SearchUsers)
    Users(Vec<User>),

    /// Batch lookup result (GetUsers)
    Batch {
        users: Vec<User>,
        not_found_ids: Vec<UserId>,
    },

    /// Ping reply
    Pong,
}

/// A response to send to client
#[derive(Debug, Clone, PartialEq)]
pub struct Response {
    /// Status code
    pub status: Status,

    /// Optional payload (encoded reply for OK, error message otherwise)
    pub payload: Option<Vec<u8>>,
}

impl Response {
    /// Create an OK response carrying an encoded reply
    pub fn ok(reply: &Reply) -> Result<Self> {
        Ok(Self {
            status: Status::Ok,
            payload: Some(bincode::serialize(reply)?),
        })
    }

    /// Create a NOT_FOUND response
    pub fn not_found(message: &str) -> Self {
        Self::with_message(Status::NotFound, message)
    }

    /// Create an INVALID_ARGUMENT response
    pub fn invalid_argument(message: &str) -> Self {
        Self::with_message(Status::InvalidArgument, message)
    }

    /// Create an ERROR response
    pub fn error(message: &str) -> Self {
        Self::with_message(Status::Error, message)
    }

    fn with_message(status: Status, message: &str) -> Self {
        let payload = if message.is_empty() {
            None
        } else {
            Some(message.as_bytes().to_vec())
        };
        Self { status, payload }
    }

    /// Map a failed operation onto the status of the same name
    pub fn from_error(err: &DirectoryError) -> Self {
        match err {
            DirectoryError::InvalidArgument(msg) => Self::invalid_argument(msg),
            DirectoryError::NotFound(msg) => Self::not_found(msg),
            other => Self::error(&other.message()),
        }
    }

    /// Decode the reply, turning non-OK statuses back into errors
    pub fn into_reply(self) -> Result<Reply> {
        let message = || {
            self.payload
                .as_deref()
                .map(|p| String::from_utf8_lossy(p).into_owned())
                .unwrap_or_default()
        };

        match self.status {
            Status::Ok => {
                let payload = self.payload.as_deref().ok_or_else(|| {
                    DirectoryError::Protocol("OK response without payload".to_string())
                })?;
                Ok(bincode::deserialize(payload)?)
            }
            Status::NotFound => Err(DirectoryError::NotFound(message())),
            Status::InvalidArgument => Err(DirectoryError::InvalidArgument(message())),
            Status::Error => Err(DirectoryError::Remote(message())),
        }
    }
}
