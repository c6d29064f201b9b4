//! Service Module
//!
//! Request handling on top of the directory store.
//!
//! ## Responsibilities
//! - Route each protocol request to the matching directory query
//! - Shape query results into protocol replies
//! - Log request outcomes (the store itself never logs)

use std::sync::Arc;

use crate::directory::Directory;
use crate::error::Result;
use crate::protocol::{Reply, Request, Response};

/// Serves protocol requests against a shared directory
///
/// Cheap to clone; every worker thread holds its own handle.
#[derive(Clone)]
pub struct UserService {
    directory: Arc<Directory>,
}

impl UserService {
    pub fn new(directory: Arc<Directory>) -> Self {
        Self { directory }
    }

    /// Execute a request
    ///
    /// Routes requests to the directory and wraps the result
    pub fn execute(&self, request: Request) -> Result<Reply> {
        match request {
            Request::GetUser { id } => {
                tracing::debug!(id, "GetUser");
                let user = self.directory.get_by_id(id)?;
                Ok(Reply::User(user))
            }
            Request::GetUsers { ids } => {
                tracing::debug!(count = ids.len(), "GetUsers");
                let lookup = self.directory.get_by_ids(&ids)?;
                if !lookup.missing.is_empty() {
                    tracing::info!("Some user IDs not found: {:?}", lookup.missing);
                }
                Ok(Reply::Batch {
                    users: lookup.found,
                    not_found_ids: lookup.missing,
                })
            }
            Request::GetAllUsers => {
                tracing::debug!("GetAllUsers");
                Ok(Reply::Users(self.directory.get_all()))
            }
            Request::SearchUsers { query } => {
                tracing::debug!(query = %query, "SearchUsers");
                let users = self.directory.search(&query)?;
                Ok(Reply::Users(users))
            }
            Request::Ping => Ok(Reply::Pong),
        }
    }

    /// Execute a request and encode the outcome as a response
    pub fn handle(&self, request: Request) -> Response {
        let outcome = self.execute(request).and_then(|reply| Response::ok(&reply));
        match outcome {
            Ok(response) => response,
            Err(e) => {
                tracing::debug!("Request failed: {}", e);
                Response::from_error(&e)
            }
        }
    }

    /// The directory this service reads from
    pub fn directory(&self) -> &Directory {
        &self.directory
    }
}
