use bytes::BytesMut;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;

use crate::http::response::{Body, Response};

/// Chunk size for pulling stream-backed bodies.
const STREAM_CHUNK: usize = 8192;

fn serialize_head(response: &Response, http_version: &str) -> BytesMut {
    let mut buf = BytesMut::with_capacity(256);

    // Status line
    buf.extend_from_slice(format!("{} {}\r\n", http_version, response.status).as_bytes());

    // Headers
    for (name, value) in response.headers.iter() {
        buf.extend_from_slice(name.as_bytes());
        buf.extend_from_slice(b": ");
        buf.extend_from_slice(value.as_bytes());
        buf.extend_from_slice(b"\r\n");
    }

    // Header/body separator
    buf.extend_from_slice(b"\r\n");

    buf
}

/// Serializes and writes one response to the client.
///
/// The status line and headers go out as a single chunk. In-memory bodies
/// follow in one drain; stream bodies are pulled [`STREAM_CHUNK`] bytes at
/// a time as the socket accepts them, so they are never buffered whole.
pub struct ResponseWriter {
    head: BytesMut,
    body: Body,
}

impl ResponseWriter {
    pub fn new(response: Response, http_version: &str) -> Self {
        let head = serialize_head(&response, http_version);
        Self {
            head,
            body: response.body,
        }
    }

    pub async fn write_to_stream(&mut self, stream: &mut TcpStream) -> anyhow::Result<()> {
        drain(stream, &self.head).await?;

        match &mut self.body {
            Body::Bytes(data) => drain(stream, data).await?,
            Body::Stream(reader) => {
                let mut chunk = BytesMut::with_capacity(STREAM_CHUNK);
                loop {
                    chunk.clear();
                    let n = reader.read_buf(&mut chunk).await?;
                    if n == 0 {
                        break;
                    }
                    drain(stream, &chunk).await?;
                }
            }
        }

        stream.flush().await?;
        Ok(())
    }
}

async fn drain(stream: &mut TcpStream, buf: &[u8]) -> anyhow::Result<()> {
    let mut written = 0;
    while written < buf.len() {
        let n = stream.write(&buf[written..]).await?;

        if n == 0 {
            return Err(anyhow::anyhow!("connection closed while writing"));
        }

        written += n;
    }

    Ok(())
}
