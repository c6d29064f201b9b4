//! Directory store
//!
//! HashMap-based record store with RwLock for concurrency.

use std::collections::HashMap;

use parking_lot::RwLock;

use crate::error::{DirectoryError, Result};

use super::{seed_users, SearchQuery, User, UserId};

/// Outcome of a batch lookup
///
/// `found` and `missing` together cover every requested id, each in
/// request order. Duplicate ids are resolved independently.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BatchLookup {
    pub found: Vec<User>,
    pub missing: Vec<UserId>,
}

/// In-memory user directory
///
/// ## Concurrency:
/// - `users`: Protected by RwLock (many concurrent readers, exclusive writer)
/// - Every query holds the read guard for its whole scan
/// - Records leave the store as clones, never as references into the map
pub struct Directory {
    /// Records keyed by id; each record's `id` equals its key
    users: RwLock<HashMap<UserId, User>>,
}

impl Directory {
    /// Create an empty directory
    pub fn new() -> Self {
        Self {
            users: RwLock::new(HashMap::new()),
        }
    }

    /// Build a directory from a record set
    ///
    /// Fails with `InvalidArgument` on a non-positive or duplicate id.
    pub fn from_users(users: impl IntoIterator<Item = User>) -> Result<Self> {
        let directory = Self::new();
        {
            let mut map = directory.users.write();
            for user in users {
                if user.id <= 0 {
                    return Err(DirectoryError::invalid_argument("invalid user ID"));
                }
                if map.contains_key(&user.id) {
                    return Err(DirectoryError::invalid_argument(format!(
                        "duplicate user ID {}",
                        user.id
                    )));
                }
                map.insert(user.id, user);
            }
        }
        Ok(directory)
    }

    /// Directory holding the default seed records
    pub fn seeded() -> Self {
        let users = seed_users()
            .into_iter()
            .map(|user| (user.id, user))
            .collect();
        Self {
            users: RwLock::new(users),
        }
    }

    /// Get a single record by id
    pub fn get_by_id(&self, id: UserId) -> Result<User> {
        if id <= 0 {
            return Err(DirectoryError::invalid_argument("invalid user ID"));
        }

        let users = self.users.read();
        users
            .get(&id)
            .cloned()
            .ok_or_else(|| DirectoryError::not_found(format!("user with ID {} not found", id)))
    }

    /// Look up many ids at once
    ///
    /// Misses are reported in `missing`, not as an error. The whole call
    /// fails if `ids` is empty or any id is non-positive.
    pub fn get_by_ids(&self, ids: &[UserId]) -> Result<BatchLookup> {
        if ids.is_empty() {
            return Err(DirectoryError::invalid_argument("user IDs cannot be empty"));
        }
        if ids.iter().any(|&id| id <= 0) {
            return Err(DirectoryError::invalid_argument("invalid user ID"));
        }

        let users = self.users.read();
        let mut lookup = BatchLookup::default();
        for id in ids {
            match users.get(id) {
                Some(user) => lookup.found.push(user.clone()),
                None => lookup.missing.push(*id),
            }
        }

        Ok(lookup)
    }

    /// Every record, in unspecified order
    pub fn get_all(&self) -> Vec<User> {
        self.users.read().values().cloned().collect()
    }

    /// Records matching a free-text query, in unspecified order
    ///
    /// Zero matches is reported as `NotFound`.
    pub fn search(&self, query: &str) -> Result<Vec<User>> {
        let query = SearchQuery::parse(query)?;

        let users = self.users.read();
        let matched: Vec<User> = users
            .values()
            .filter(|user| query.matches(user))
            .cloned()
            .collect();

        if matched.is_empty() {
            return Err(DirectoryError::not_found(
                "no users found matching the search criteria",
            ));
        }

        Ok(matched)
    }

    /// Number of records
    pub fn len(&self) -> usize {
        self.users.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.read().is_empty()
    }
}

impl Default for Directory {
    fn default() -> Self {
        Self::new()
    }
}
