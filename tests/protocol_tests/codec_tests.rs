//! Codec Tests
//!
//! Tests for request and response encoding/decoding.

use std::io::Cursor;

use userdir::directory::User;
use userdir::protocol::{
    decode_request, decode_response, encode_request, encode_response, read_request,
    read_response, write_request, write_response, Reply, Request, RequestKind, Response, Status,
    HEADER_SIZE, MAX_PAYLOAD_SIZE,
};
use userdir::DirectoryError;

fn steve() -> User {
    User::new(1, "Steve", "LA", 1234567890, 5.8, true)
}

// =============================================================================
// Request Encoding/Decoding Tests
// =============================================================================

#[test]
fn test_encode_decode_get_user() {
    let request = Request::GetUser { id: 42 };
    let encoded = encode_request(&request).unwrap();

    assert_eq!(encoded[0], RequestKind::GetUser as u8);
    assert_eq!(decode_request(&encoded).unwrap(), request);
}

#[test]
fn test_encode_decode_get_users_keeps_order_and_duplicates() {
    let request = Request::GetUsers {
        ids: vec![3, 1, 3, 99],
    };
    let encoded = encode_request(&request).unwrap();

    match decode_request(&encoded).unwrap() {
        Request::GetUsers { ids } => assert_eq!(ids, vec![3, 1, 3, 99]),
        other => panic!("Expected GET_USERS, got {:?}", other),
    }
}

#[test]
fn test_encode_decode_search_unicode() {
    let request = Request::SearchUsers {
        query: "Zoë".to_string(),
    };
    let encoded = encode_request(&request).unwrap();

    assert_eq!(decode_request(&encoded).unwrap(), request);
}

#[test]
fn test_empty_payload_requests() {
    for request in [Request::GetAllUsers, Request::Ping] {
        let encoded = encode_request(&request).unwrap();

        assert_eq!(encoded.len(), HEADER_SIZE);
        assert_eq!(&encoded[1..5], &[0, 0, 0, 0]);
        assert_eq!(decode_request(&encoded).unwrap(), request);
    }
}

#[test]
fn test_header_length_is_big_endian() {
    let encoded = encode_request(&Request::GetUser { id: 7 }).unwrap();

    let len = u32::from_be_bytes([encoded[1], encoded[2], encoded[3], encoded[4]]) as usize;
    assert_eq!(len, encoded.len() - HEADER_SIZE);
}

// =============================================================================
// Malformed Request Tests
// =============================================================================

#[test]
fn test_decode_incomplete_header() {
    let result = decode_request(&[0x01, 0x00]);
    assert!(matches!(result, Err(DirectoryError::Protocol(_))));
}

#[test]
fn test_decode_incomplete_payload() {
    let mut encoded = encode_request(&Request::SearchUsers {
        query: "Steve".to_string(),
    })
    .unwrap();
    encoded.truncate(encoded.len() - 2);

    assert!(matches!(
        decode_request(&encoded),
        Err(DirectoryError::Protocol(_))
    ));
}

#[test]
fn test_decode_unknown_kind() {
    let bytes = [0x7F, 0, 0, 0, 0];
    assert!(matches!(
        decode_request(&bytes),
        Err(DirectoryError::Protocol(_))
    ));
}

#[test]
fn test_decode_oversized_payload() {
    let len = (MAX_PAYLOAD_SIZE + 1).to_be_bytes();
    let bytes = [0x01, len[0], len[1], len[2], len[3]];

    assert!(matches!(
        decode_request(&bytes),
        Err(DirectoryError::Protocol(_))
    ));
}

#[test]
fn test_decode_ping_with_payload() {
    let bytes = [RequestKind::Ping as u8, 0, 0, 0, 1, 0xFF];
    assert!(matches!(
        decode_request(&bytes),
        Err(DirectoryError::Protocol(_))
    ));
}

#[test]
fn test_decode_truncated_id() {
    // GET_USER with a 2-byte payload where an i32 is expected
    let bytes = [RequestKind::GetUser as u8, 0, 0, 0, 2, 0x01, 0x00];
    assert!(matches!(
        decode_request(&bytes),
        Err(DirectoryError::Protocol(_))
    ));
}

// =============================================================================
// Response Encoding/Decoding Tests
// =============================================================================

#[test]
fn test_ok_response_carries_reply() {
    let reply = Reply::User(steve());
    let response = Response::ok(&reply).unwrap();

    let decoded = decode_response(&encode_response(&response)).unwrap();

    assert_eq!(decoded.status, Status::Ok);
    assert_eq!(decoded.into_reply().unwrap(), reply);
}

#[test]
fn test_batch_reply() {
    let reply = Reply::Batch {
        users: vec![steve()],
        not_found_ids: vec![99],
    };
    let response = Response::ok(&reply).unwrap();

    let decoded = decode_response(&encode_response(&response)).unwrap();
    assert_eq!(decoded.into_reply().unwrap(), reply);
}

#[test]
fn test_error_statuses_map_back_to_errors() {
    let not_found = decode_response(&encode_response(&Response::not_found("no user"))).unwrap();
    assert_eq!(not_found.status, Status::NotFound);
    match not_found.into_reply() {
        Err(DirectoryError::NotFound(msg)) => assert_eq!(msg, "no user"),
        other => panic!("Expected NotFound, got {:?}", other),
    }

    let invalid = Response::invalid_argument("bad id");
    assert!(matches!(
        invalid.into_reply(),
        Err(DirectoryError::InvalidArgument(_))
    ));

    let internal = Response::error("boom");
    assert!(matches!(internal.into_reply(), Err(DirectoryError::Remote(_))));
}

#[test]
fn test_from_error_uses_same_named_status() {
    let invalid = Response::from_error(&DirectoryError::invalid_argument("invalid user ID"));
    assert_eq!(invalid.status, Status::InvalidArgument);
    assert_eq!(invalid.payload.as_deref(), Some(&b"invalid user ID"[..]));

    let missing = Response::from_error(&DirectoryError::not_found("gone"));
    assert_eq!(missing.status, Status::NotFound);

    let other = Response::from_error(&DirectoryError::Protocol("garbled".to_string()));
    assert_eq!(other.status, Status::Error);
}

#[test]
fn test_decode_unknown_status() {
    let bytes = [0x09, 0, 0, 0, 0];
    assert!(matches!(
        decode_response(&bytes),
        Err(DirectoryError::Protocol(_))
    ));
}

#[test]
fn test_ok_without_payload_is_protocol_error() {
    let bytes = [Status::Ok as u8, 0, 0, 0, 0];
    let response = decode_response(&bytes).unwrap();

    assert!(matches!(
        response.into_reply(),
        Err(DirectoryError::Protocol(_))
    ));
}

// =============================================================================
// Stream I/O Tests
// =============================================================================

#[test]
fn test_stream_requests_back_to_back() {
    let mut buffer = Vec::new();
    write_request(&mut buffer, &Request::GetUser { id: 1 }).unwrap();
    write_request(&mut buffer, &Request::GetAllUsers).unwrap();

    let mut cursor = Cursor::new(buffer);
    assert_eq!(read_request(&mut cursor).unwrap(), Request::GetUser { id: 1 });
    assert_eq!(read_request(&mut cursor).unwrap(), Request::GetAllUsers);

    // Stream exhausted
    assert!(matches!(
        read_request(&mut cursor),
        Err(DirectoryError::Io(_))
    ));
}

#[test]
fn test_stream_response() {
    let mut buffer = Vec::new();
    let response = Response::ok(&Reply::Users(vec![steve()])).unwrap();
    write_response(&mut buffer, &response).unwrap();

    let mut cursor = Cursor::new(buffer);
    let read = read_response(&mut cursor).unwrap();

    assert_eq!(read, response);
}

#[test]
fn test_stream_rejects_oversized_header() {
    let len = (MAX_PAYLOAD_SIZE + 1).to_be_bytes();
    let mut cursor = Cursor::new(vec![0x00, len[0], len[1], len[2], len[3]]);

    assert!(matches!(
        read_response(&mut cursor),
        Err(DirectoryError::Protocol(_))
    ));
}
