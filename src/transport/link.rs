//! Byte link to the DUT, abstracted so the client can be tested without hardware

use async_trait::async_trait;
use std::io;
use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncWrite, AsyncWriteExt, BufReader};

/// Line-oriented duplex link to the DUT
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DutLink: Send {
    /// Write a whole command frame and flush it
    async fn write_all(&mut self, data: &[u8]) -> io::Result<()>;

    /// Next line of DUT output without its terminator, `None` once the link closes
    async fn read_line(&mut self) -> io::Result<Option<String>>;
}

/// [`DutLink`] over any tokio byte stream (TCP socket, serial port)
pub struct StreamLink<S> {
    stream: BufReader<S>,
}

impl<S> StreamLink<S>
where
    S: AsyncRead + AsyncWrite + Unpin + Send,
{
    pub fn new(stream: S) -> Self {
        Self {
            stream: BufReader::new(stream),
        }
    }
}

#[async_trait]
impl<S> DutLink for StreamLink<S>
where
    S: AsyncRead + AsyncWrite + Unpin + Send,
{
    async fn write_all(&mut self, data: &[u8]) -> io::Result<()> {
        let stream = self.stream.get_mut();
        stream.write_all(data).await?;
        stream.flush().await
    }

    async fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut line = String::new();
        if self.stream.read_line(&mut line).await? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }
}
