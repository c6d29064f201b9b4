//! Seed records loaded at service start.

use super::User;

/// The fixed record set the server starts with
pub fn seed_users() -> Vec<User> {
    vec![
        User::new(1, "Steve", "LA", 1234567890, 5.8, true),
        User::new(2, "Jane", "NY", 1234567891, 5.5, false),
        User::new(3, "Alice", "LA", 1234567892, 5.6, true),
    ]
}
