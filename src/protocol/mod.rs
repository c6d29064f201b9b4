//! Protocol Module
//!
//! Defines the wire protocol for client-server communication.
//!
//! ## Protocol Format (V1 - Simple Binary)
//!
//! ### Request Format
//! ```text
//! ┌──────────┬──────────┬─────────────────────────────┐
//! │ Kind (1) │ Len (4)  │         Payload             │
//! └──────────┴──────────┴─────────────────────────────┘
//! ```
//!
//! ### Requests
//! - 0x01: GET_USER       - Payload: id
//! - 0x02: GET_USERS      - Payload: ids
//! - 0x03: GET_ALL_USERS  - Payload: empty
//! - 0x04: SEARCH_USERS   - Payload: query
//! - 0x05: PING           - Payload: empty
//!
//! ### Response Format
//! ```text
//! ┌──────────┬──────────┬─────────────────────────────┐
//! │Status(1) │ Len (4)  │         Payload             │
//! └──────────┴──────────┴─────────────────────────────┘
//! ```
//!
//! ### Status Codes
//! - 0x00: OK                (payload: bincode-encoded `Reply`)
//! - 0x01: NOT_FOUND         (payload: message)
//! - 0x02: INVALID_ARGUMENT  (payload: message)
//! - 0x03: ERROR             (payload: message)

mod codec;
mod request;
mod response;

pub use codec::{
    decode_request, decode_response, encode_request, encode_response, read_request,
    read_response, write_request, write_response, HEADER_SIZE, MAX_PAYLOAD_SIZE,
};
pub use request::{Request, RequestKind};
pub use response::{Reply, Response, Status};
