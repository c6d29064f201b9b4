//! Network Module
//!
//! TCP server, connection handling, and client.
//!
//! ## Architecture
//! - Single acceptor thread (non-blocking accept, polls the shutdown flag)
//! - Worker thread pool fed through a bounded channel
//! - Requests routed through UserService

mod client;
mod connection;
mod server;

pub use client::Client;
pub use connection::Connection;
pub use server::{Server, ShutdownHandle};
