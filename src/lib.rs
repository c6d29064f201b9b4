//! # userdir
//!
//! A small user directory service with:
//! - Concurrent in-memory record store (many readers, exclusive writer)
//! - Point, batch, bulk and free-text search queries
//! - Length-prefixed binary TCP protocol
//! - Blocking client and CLI
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      TCP Server                              │
//! │          (Acceptor + Worker Pool, Multiple Clients)          │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                    UserService                               │
//! │        (Request Routing, Error → Status Mapping)             │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//!                       ▼
//!               ┌───────────────┐
//!               │   Directory   │
//!               │   (RwLock)    │
//!               └───────────────┘
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod config;
pub mod error;

pub mod directory;
pub mod network;
pub mod protocol;
pub mod service;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use config::Config;
pub use directory::{BatchLookup, Directory, User, UserId};
pub use error::{DirectoryError, Result};
pub use service::UserService;

// =============================================================================
// Version Info
// =============================================================================

/// Current version of userdir
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
