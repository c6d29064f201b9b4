//! Directory Search Tests
//!
//! Tests verify:
//! - Matching across name, city, phone and marital status
//! - Case-insensitivity
//! - Query length validation
//! - NotFound on zero matches

use std::collections::HashSet;

use userdir::directory::{Directory, User, UserId, MAX_QUERY_LEN};
use userdir::DirectoryError;

fn search_ids(directory: &Directory, query: &str) -> HashSet<UserId> {
    directory
        .search(query)
        .unwrap()
        .iter()
        .map(|u| u.id)
        .collect()
}

// =============================================================================
// Seed Scenario Tests
// =============================================================================

#[test]
fn test_search_by_city() {
    let directory = Directory::seeded();
    assert_eq!(search_ids(&directory, "LA"), HashSet::from([1, 3]));
}

#[test]
fn test_search_married_true() {
    let directory = Directory::seeded();
    assert_eq!(search_ids(&directory, "true"), HashSet::from([1, 3]));
}

#[test]
fn test_search_married_false() {
    let directory = Directory::seeded();
    assert_eq!(search_ids(&directory, "false"), HashSet::from([2]));
}

#[test]
fn test_search_by_name() {
    let directory = Directory::seeded();
    assert_eq!(search_ids(&directory, "Steve"), HashSet::from([1]));
}

#[test]
fn test_search_by_phone() {
    let directory = Directory::seeded();

    assert_eq!(search_ids(&directory, "1234567891"), HashSet::from([2]));
    assert_eq!(search_ids(&directory, "123456789"), HashSet::from([1, 2, 3]));
}

#[test]
fn test_search_unknown_is_not_found() {
    let directory = Directory::seeded();

    match directory.search("unknown") {
        Err(DirectoryError::NotFound(msg)) => {
            assert_eq!(msg, "no users found matching the search criteria")
        }
        other => panic!("Expected NotFound, got {:?}", other),
    }
}

#[test]
fn test_search_returns_full_records() {
    let directory = Directory::seeded();

    let users = directory.search("Jane").unwrap();
    assert_eq!(users, vec![User::new(2, "Jane", "NY", 1234567891, 5.5, false)]);
}

// =============================================================================
// Case-Insensitivity Tests
// =============================================================================

#[test]
fn test_search_is_case_insensitive() {
    let directory = Directory::seeded();

    let lower = search_ids(&directory, "steve");
    let upper = search_ids(&directory, "STEVE");
    let mixed = search_ids(&directory, "sTeVe");

    assert_eq!(lower, upper);
    assert_eq!(lower, mixed);
    assert_eq!(search_ids(&directory, "la"), search_ids(&directory, "LA"));
}

#[test]
fn test_status_words_are_case_insensitive() {
    let directory = Directory::seeded();

    assert_eq!(search_ids(&directory, "TRUE"), HashSet::from([1, 3]));
    assert_eq!(search_ids(&directory, "False"), HashSet::from([2]));
}

// =============================================================================
// Validation Tests
// =============================================================================

#[test]
fn test_search_empty_query_is_invalid() {
    let directory = Directory::seeded();

    assert!(matches!(
        directory.search(""),
        Err(DirectoryError::InvalidArgument(_))
    ));
}

#[test]
fn test_search_overlong_query_is_invalid() {
    let directory = Directory::seeded();

    let query = "a".repeat(MAX_QUERY_LEN + 1);
    assert!(matches!(
        directory.search(&query),
        Err(DirectoryError::InvalidArgument(_))
    ));
}

#[test]
fn test_search_max_length_query_is_accepted() {
    let directory = Directory::seeded();

    // Valid length, just nothing matches
    let query = "z".repeat(MAX_QUERY_LEN);
    assert!(matches!(
        directory.search(&query),
        Err(DirectoryError::NotFound(_))
    ));
}

#[test]
fn test_search_on_empty_directory_is_not_found() {
    let directory = Directory::new();

    assert!(matches!(
        directory.search("a"),
        Err(DirectoryError::NotFound(_))
    ));
}

// =============================================================================
// Field Interaction Tests
// =============================================================================

#[test]
fn test_status_word_also_matches_text_fields() {
    let directory = Directory::from_users(vec![
        User::new(1, "Ana", "Truesdale", 5550000001, 5.1, false),
        User::new(2, "Ben", "Austin", 5550000002, 5.9, true),
        User::new(3, "Cid", "Austin", 5550000003, 5.4, false),
    ])
    .unwrap();

    // City substring (1) OR married flag (2)
    assert_eq!(search_ids(&directory, "true"), HashSet::from([1, 2]));
}

#[test]
fn test_status_substring_does_not_match_flag() {
    let directory = Directory::seeded();

    assert!(matches!(
        directory.search("tru"),
        Err(DirectoryError::NotFound(_))
    ));
}
