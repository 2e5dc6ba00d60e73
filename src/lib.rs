//! Breakwater - Event-driven HTTP/1.1 server core
//!
//! A single-process HTTP server: connections are accepted onto an
//! incremental request parser, completed requests are routed through a
//! first-match routing table to registered handlers, and responses are
//! streamed back, one request per connection.

pub mod config;
pub mod errors;
pub mod http;
pub mod routing;
pub mod server;
pub mod site;
