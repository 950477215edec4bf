use anyhow::Context;
use bytes::BytesMut;
use tokio::io::{AsyncReadExt, AsyncWrite, AsyncWriteExt};

use crate::http::response::{Body, BodyReader, Response};

const HTTP_VERSION: &str = "HTTP/1.1";

/// Largest single read from a streamed body.
pub const CHUNK_SIZE: usize = 8192;

fn serialize_head(resp: &Response) -> Vec<u8> {
    let mut buf = Vec::new();

    // Status line
    let status_line = format!(
        "{} {} {}\r\n",
        HTTP_VERSION,
        resp.status.as_u16(),
        resp.status.reason_phrase()
    );
    buf.extend_from_slice(status_line.as_bytes());

    // Headers
    for (k, v) in &resp.headers {
        buf.extend_from_slice(k.as_bytes());
        buf.extend_from_slice(b": ");
        buf.extend_from_slice(v.as_bytes());
        buf.extend_from_slice(b"\r\n");
    }

    // Header/body separator
    buf.extend_from_slice(b"\r\n");

    buf
}

/// Writes one response: the serialized head, then the body.
///
/// Streamed bodies are copied through a fixed [`CHUNK_SIZE`] buffer, so a
/// file is never held in memory as a whole. An error after the head has
/// gone out leaves the client with a truncated body; the caller must close
/// the connection.
pub struct ResponseWriter {
    head: Vec<u8>,
    written: usize,
    body: Option<Body>,
}

impl ResponseWriter {
    /// `include_body` is false for HEAD requests; the head still announces
    /// the full `Content-Length`.
    pub fn new(response: Response, include_body: bool) -> Self {
        let head = serialize_head(&response);
        Self {
            head,
            written: 0,
            body: include_body.then_some(response.body),
        }
    }

    /// Returns the number of body bytes written.
    pub async fn write_to_stream<W>(&mut self, stream: &mut W) -> anyhow::Result<u64>
    where
        W: AsyncWrite + Unpin,
    {
        while self.written < self.head.len() {
            let n = stream
                .write(&self.head[self.written..])
                .await?;

            if n == 0 {
                return Err(anyhow::anyhow!("connection closed while writing"));
            }

            self.written += n;
        }

        let sent = match self.body.take() {
            None => 0,
            Some(Body::Full(bytes)) => {
                stream.write_all(&bytes).await?;
                bytes.len() as u64
            }
            Some(Body::Stream { mut reader, len }) => {
                stream_body(&mut reader, len, stream).await?
            }
        };

        stream.flush().await?;
        Ok(sent)
    }
}

async fn stream_body<W>(reader: &mut BodyReader, len: u64, stream: &mut W) -> anyhow::Result<u64>
where
    W: AsyncWrite + Unpin,
{
    let mut limited = reader.take(len);
    let mut buf = BytesMut::zeroed(CHUNK_SIZE);
    let mut sent: u64 = 0;

    loop {
        let n = limited
            .read(&mut buf[..])
            .await
            .context("reading response body")?;
        if n == 0 {
            break;
        }

        stream
            .write_all(&buf[..n])
            .await
            .context("writing response body")?;
        sent += n as u64;
    }

    if sent < len {
        anyhow::bail!("response body ended after {} of {} bytes", sent, len);
    }

    Ok(sent)
}
