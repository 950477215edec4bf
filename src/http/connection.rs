use std::sync::Arc;

use bytes::{Buf, BytesMut};
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};

use crate::assets::AssetHandler;
use crate::http::parser::{parse_http_request, ParseError};
use crate::http::request::{BodyFraming, Request};
use crate::http::response::Response;
use crate::http::writer::ResponseWriter;

/// Largest request body skipped to keep a connection alive. Anything
/// bigger closes the connection after the response instead.
pub const MAX_DISCARD: u64 = 64 * 1024;

/// One client connection, served until it closes or a response fails.
pub struct Connection<S> {
    stream: S,
    buffer: BytesMut,
    state: ConnectionState,
    handler: Arc<AssetHandler>,
}

pub enum ConnectionState {
    Reading,
    Processing(Request),
    Writing {
        writer: ResponseWriter,
        /// `None` closes the connection after the response; `Some(n)`
        /// skips an `n`-byte request body and reads the next request.
        then_discard: Option<u64>,
    },
    Closed,
}

enum ReadOutcome {
    Request(Request),
    Malformed(ParseError),
    Eof,
}

impl<S> Connection<S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    pub fn new(stream: S, handler: Arc<AssetHandler>) -> Self {
        Self {
            stream,
            buffer: BytesMut::with_capacity(4096),
            state: ConnectionState::Reading,
            handler,
        }
    }

    /// Drives the state machine to `Closed`.
    ///
    /// An error means the connection ended abnormally: the client went away
    /// or a body stream failed after its head was sent. In the latter case
    /// the client sees a truncated body and the socket is dropped.
    pub async fn run(&mut self) -> anyhow::Result<()> {
        loop {
            match std::mem::replace(&mut self.state, ConnectionState::Closed) {
                ConnectionState::Reading => {
                    self.state = match self.read_request().await? {
                        ReadOutcome::Request(req) => ConnectionState::Processing(req),
                        ReadOutcome::Malformed(err) => {
                            tracing::warn!(error = ?err, "Unparseable request");
                            ConnectionState::Writing {
                                writer: Self::prepare(Response::bad_request(), true, false),
                                then_discard: None,
                            }
                        }
                        ReadOutcome::Eof => ConnectionState::Closed,
                    };
                }

                ConnectionState::Processing(req) => {
                    let then_discard = match req.body_framing() {
                        _ if !req.keep_alive() => None,
                        BodyFraming::Empty => Some(0),
                        BodyFraming::Length(n) if n <= MAX_DISCARD => Some(n),
                        BodyFraming::Length(_) | BodyFraming::Unframed => None,
                    };
                    let include_body = !req.is_head();

                    let response = Arc::clone(&self.handler).handle_isolated(req).await;

                    self.state = ConnectionState::Writing {
                        writer: Self::prepare(response, include_body, then_discard.is_some()),
                        then_discard,
                    };
                }

                ConnectionState::Writing { mut writer, then_discard } => {
                    writer.write_to_stream(&mut self.stream).await?;

                    if let Some(len) = then_discard {
                        if self.discard_body(len).await? {
                            self.state = ConnectionState::Reading; // go back for next request
                        }
                    }
                }

                ConnectionState::Closed => {
                    // half-close; an unread request body may still be arriving
                    let _ = self.stream.shutdown().await;
                    break;
                }
            }
        }

        Ok(())
    }

    fn prepare(mut response: Response, include_body: bool, keep_alive: bool) -> ResponseWriter {
        if !keep_alive {
            response
                .headers
                .insert("Connection".to_string(), "close".to_string());
        }
        ResponseWriter::new(response, include_body)
    }

    /// Skips `len` body bytes, first from the buffer and then from the
    /// stream in small reads. Returns false if the client hung up first.
    async fn discard_body(&mut self, len: u64) -> anyhow::Result<bool> {
        let buffered = len.min(self.buffer.len() as u64) as usize;
        self.buffer.advance(buffered);
        let mut remaining = len - buffered as u64;

        let mut scratch = [0u8; 4096];
        while remaining > 0 {
            let want = remaining.min(scratch.len() as u64) as usize;
            let n = self.stream.read(&mut scratch[..want]).await?;
            if n == 0 {
                return Ok(false);
            }
            remaining -= n as u64;
        }

        Ok(true)
    }

    async fn read_request(&mut self) -> anyhow::Result<ReadOutcome> {
        loop {
            // Try parsing whatever we already have
            match parse_http_request(&self.buffer) {
                Ok((request, consumed)) => {
                    self.buffer.advance(consumed);
                    return Ok(ReadOutcome::Request(request));
                }

                Err(ParseError::Incomplete) => {
                    // Need more data → fall through to read
                }

                Err(e) => {
                    return Ok(ReadOutcome::Malformed(e));
                }
            }

            let n = self.stream.read_buf(&mut self.buffer).await?;

            if n == 0 {
                // Client closed connection
                if !self.buffer.is_empty() {
                    tracing::debug!(
                        pending = self.buffer.len(),
                        "Client closed mid-request"
                    );
                }
                return Ok(ReadOutcome::Eof);
            }
        }
    }
}
