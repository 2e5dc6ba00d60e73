use std::sync::Arc;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;

use crate::errors::StatusError;
use crate::http::parser::RequestParser;
use crate::http::response::Response;
use crate::http::writer::ResponseWriter;
use crate::site::Site;

/// Read at most this much per call, so one chatty peer cannot monopolize
/// a poll iteration.
const READ_CHUNK: usize = 1024;

/// A single HTTP connection: one accepted socket, one request, one
/// response, then close.
pub struct Connection {
    stream: TcpStream,
    site: Arc<Site>,
}

impl Connection {
    pub fn new(stream: TcpStream, site: Arc<Site>) -> Self {
        Self { stream, site }
    }

    /// Drives the connection to completion: read until the parser has a
    /// full request head, dispatch it, write the response, shut down.
    ///
    /// A peer that closes before completing a request gets no response;
    /// transport errors propagate to the caller, which logs them. They
    /// never affect other connections.
    pub async fn run(mut self) -> anyhow::Result<()> {
        let mut parser = RequestParser::new();
        let mut chunk = [0u8; READ_CHUNK];

        loop {
            let n = self.stream.read(&mut chunk).await?;

            if n == 0 {
                // Peer closed before a complete request arrived.
                return Ok(());
            }

            if parser.feed(&chunk[..n]) {
                break;
            }
        }

        let (response, http_version) = dispatch(&self.site, parser);

        let mut writer = ResponseWriter::new(response, &http_version);
        writer.write_to_stream(&mut self.stream).await?;
        self.stream.shutdown().await?;

        Ok(())
    }
}

/// Translates the parse outcome into exactly one response, using the
/// best-known HTTP version for the status line.
fn dispatch(site: &Site, parser: RequestParser) -> (Response, String) {
    match parser.finish() {
        Ok(mut request) => {
            let http_version = request.http_version().to_string();
            let response = match site.service(&mut request) {
                Ok(response) => response,
                Err(err) => error_response(&err),
            };
            (response, http_version)
        }
        Err(err) => {
            let http_version = err.http_version().to_string();
            (error_response(&err), http_version)
        }
    }
}

fn error_response(err: &StatusError) -> Response {
    match err.cause() {
        Some(cause) => tracing::error!(status = %err.status(), error = %cause, "Request failed"),
        None => tracing::debug!(status = %err.status(), "Request failed"),
    }
    Response::from_status(err.status())
}
