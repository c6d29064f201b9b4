//! Request definitions
//!
//! Represents requests from clients.

use crate::directory::UserId;

/// Request kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum RequestKind {
    GetUser = 0x01,
    GetUsers = 0x02,
    GetAllUsers = 0x03,
    SearchUsers = 0x04,
    Ping = 0x05,
}

impl RequestKind {
    pub fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            0x01 => Some(RequestKind::GetUser),
            0x02 => Some(RequestKind::GetUsers),
            0x03 => Some(RequestKind::GetAllUsers),
            0x04 => Some(RequestKind::SearchUsers),
            0x05 => Some(RequestKind::Ping),
            _ => None,
        }
    }
}

/// A parsed request
#[derive(Debug, Clone, PartialEq)]
pub enum Request {
    /// Get one user by id
    GetUser { id: UserId },

    /// Get several users, reporting the ids that were not found
    GetUsers { ids: Vec<UserId> },

    /// Get every user
    GetAllUsers,

    /// Free-text search over name, city, phone and marital status
    SearchUsers { query: String },

    /// Ping (health check)
    Ping,
}

impl Request {
    /// Get the request kind
    pub fn kind(&self) -> RequestKind {
        match self {
            Request::GetUser { .. } => RequestKind::GetUser,
            Request::GetUsers { .. } => RequestKind::GetUsers,
            Request::GetAllUsers => RequestKind::GetAllUsers,
            Request::SearchUsers { .. } => RequestKind::SearchUsers,
            Request::Ping => RequestKind::Ping,
        }
    }
}
