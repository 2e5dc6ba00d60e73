use std::sync::Arc;
use tokio::net::TcpStream;

use crate::http::connection::Connection;
use crate::site::Site;

/// Default port for [`HttpProtocol`].
pub const DEFAULT_HTTP_PORT: u16 = 8888;

/// Binds a listening port to a connection constructor.
///
/// The server binds one listener per protocol; on accept it asks the
/// protocol for a connection over the socket and the currently deployed
/// site.
pub trait Protocol: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &str;

    /// The port this protocol listens on.
    fn port(&self) -> u16;

    /// Creates the connection handler for an accepted socket.
    fn new_connection(&self, socket: TcpStream, site: Arc<Site>) -> Connection;
}

/// Plain HTTP/1.1.
#[derive(Debug, Clone)]
pub struct HttpProtocol {
    port: u16,
}

impl HttpProtocol {
    pub fn new() -> Self {
        Self {
            port: DEFAULT_HTTP_PORT,
        }
    }

    pub fn with_port(port: u16) -> Self {
        Self { port }
    }
}

impl Default for HttpProtocol {
    fn default() -> Self {
        Self::new()
    }
}

impl Protocol for HttpProtocol {
    fn name(&self) -> &str {
        "http"
    }

    fn port(&self) -> u16 {
        self.port
    }

    fn new_connection(&self, socket: TcpStream, site: Arc<Site>) -> Connection {
        Connection::new(socket, site)
    }
}
