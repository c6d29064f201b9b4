//! Directory Module
//!
//! In-memory collection of user records and its query operations.
//!
//! ## Responsibilities
//! - Point lookup by id
//! - Batch lookup with partial-miss reporting
//! - Full enumeration
//! - Case-insensitive search across name, city, phone and marital status
//!
//! ## Data Structure Choice
//! HashMap wrapped in RwLock:
//! - Enumeration order is unspecified, callers must not rely on it
//! - Many concurrent readers, exclusive writer (construction only)
//! - Linear scans for search, the directory is small

mod search;
mod seed;
mod store;

use std::fmt;

use serde::{Deserialize, Serialize};

pub use search::{SearchQuery, MAX_QUERY_LEN};
pub use seed::seed_users;
pub use store::{BatchLookup, Directory};

/// Identity of a user record (wire type is int32)
pub type UserId = i32;

/// A single user's stored attributes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub first_name: String,
    pub city: String,
    pub phone: i64,
    pub height: f64,
    pub married: bool,
}

impl User {
    pub fn new(
        id: UserId,
        first_name: impl Into<String>,
        city: impl Into<String>,
        phone: i64,
        height: f64,
        married: bool,
    ) -> Self {
        Self {
            id,
            first_name: first_name.into(),
            city: city.into(),
            phone,
            height,
            married,
        }
    }
}

impl fmt::Display for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "id:{} fname:{:?} city:{:?} phone:{} height:{:.1} married:{}",
            self.id, self.first_name, self.city, self.phone, self.height, self.married
        )
    }
}
