//! HTTP protocol implementation.
//!
//! This module implements the HTTP/1.1 wire layer: an incremental request
//! parser, request/response values, and the per-connection driver that
//! ties them together. The server is strictly one request per connection;
//! every response carries `Connection: close`.
//!
//! # Architecture
//!
//! - **`parser`**: resumable state machine decoding the request head from
//!   byte chunks of any size
//! - **`request`**: parsed, immutable HTTP request representation
//! - **`response`**: HTTP response representation with builder pattern
//! - **`headers`**: case-insensitive header map
//! - **`status`**: the fixed status code table
//! - **`connection`**: the connection handler driving one request/response
//!   cycle over an accepted socket
//! - **`writer`**: serializes and writes responses, streaming large bodies
//!
//! # Connection lifecycle
//!
//! ```text
//!        ┌─────────────┐
//!        │   Reading   │ ← Bounded reads feed the incremental parser
//!        └──────┬──────┘
//!               │ Request head complete (or failed terminally)
//!               ▼
//!        ┌──────────────────┐
//!        │   Dispatching    │ ← Site produces a response; failures become
//!        └──────┬───────────┘   status-coded responses
//!               ▼
//!        ┌──────────────────┐
//!        │    Writing       │ ← Head as one chunk, body drained or
//!        └──────┬───────────┘   streamed chunk by chunk
//!               │ Response sent
//!               ▼
//!             Closed
//! ```
//!
//! A peer that closes before completing a request gets no response; any
//! transport failure closes the connection without touching the rest of
//! the server.

pub mod connection;
pub mod headers;
pub mod parser;
pub mod request;
pub mod response;
pub mod status;
pub mod writer;
