//! Newline-delimited JSON over a byte stream: one message per line.

use crate::protocol::JsonRpcResponse;
use async_trait::async_trait;
use std::io;
use thiserror::Error;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader, Lines};

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Incoming side. Yields raw lines so the server can answer malformed JSON.
#[async_trait]
pub trait MessageSource: Send {
    /// `None` once the peer has closed the stream.
    async fn recv(&mut self) -> Result<Option<String>, TransportError>;
}

#[async_trait]
pub trait MessageSink: Send {
    async fn send(&mut self, response: &JsonRpcResponse) -> Result<(), TransportError>;
}

pub struct LineReader<R> {
    lines: Lines<R>,
}

impl<R: AsyncBufRead + Unpin> LineReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            lines: reader.lines(),
        }
    }
}

#[async_trait]
impl<R: AsyncBufRead + Unpin + Send> MessageSource for LineReader<R> {
    async fn recv(&mut self) -> Result<Option<String>, TransportError> {
        while let Some(line) = self.lines.next_line().await? {
            let line = line.trim();
            if !line.is_empty() {
                return Ok(Some(line.to_string()));
            }
        }
        Ok(None)
    }
}

pub struct LineWriter<W> {
    writer: W,
}

impl<W: AsyncWrite + Unpin> LineWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

#[async_trait]
impl<W: AsyncWrite + Unpin + Send> MessageSink for LineWriter<W> {
    async fn send(&mut self, response: &JsonRpcResponse) -> Result<(), TransportError> {
        let mut payload = serde_json::to_vec(response)?;
        payload.push(b'\n');
        self.writer.write_all(&payload).await?;
        self.writer.flush().await?;
        Ok(())
    }
}

pub fn stdio() -> (LineReader<BufReader<tokio::io::Stdin>>, LineWriter<tokio::io::Stdout>) {
    (
        LineReader::new(BufReader::new(tokio::io::stdin())),
        LineWriter::new(tokio::io::stdout()),
    )
}
