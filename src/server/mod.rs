//! Server lifecycle.
//!
//! [`Server`] owns the listening sockets and accept loops; a [`Protocol`]
//! binds a port to a connection constructor so several protocols can share
//! one server. `deploy` swaps the active site atomically between a stop
//! and a restart.

pub mod protocol;
pub mod server;

pub use protocol::{HttpProtocol, Protocol};
pub use server::Server;
