//! Search query validation and the record matching predicate.

use crate::error::{DirectoryError, Result};

use super::User;

/// Longest accepted query, in bytes
pub const MAX_QUERY_LEN: usize = 100;

/// A validated, lowercased search query
///
/// A record matches when any of these hold:
/// - `first_name` contains the query
/// - `city` contains the query
/// - the decimal `phone` contains the query
/// - the query is `"true"` and the user is married, or `"false"` and not
///
/// All comparisons are case-insensitive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    needle: String,
}

impl SearchQuery {
    /// Validate and normalize a raw query string
    pub fn parse(raw: &str) -> Result<Self> {
        if raw.is_empty() {
            return Err(DirectoryError::invalid_argument(
                "search query cannot be empty",
            ));
        }
        if raw.len() > MAX_QUERY_LEN {
            return Err(DirectoryError::invalid_argument(format!(
                "search query should be between 1 and {} characters",
                MAX_QUERY_LEN
            )));
        }

        Ok(Self {
            needle: raw.to_lowercase(),
        })
    }

    /// The normalized (lowercased) query text
    pub fn as_str(&self) -> &str {
        &self.needle
    }

    /// Check a record against every searchable field
    pub fn matches(&self, user: &User) -> bool {
        let needle = self.needle.as_str();

        user.first_name.to_lowercase().contains(needle)
            || user.city.to_lowercase().contains(needle)
            || user.phone.to_string().contains(needle)
            || (needle == "true" && user.married)
            || (needle == "false" && !user.married)
    }
}
