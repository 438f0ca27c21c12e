//! Framing used on the host socket.
//!
//! Every frame is the size of the payload as 4 big-endian bytes, followed by the bincode-encoded payload.

use anyhow::{Context, Result};
use serde::{de::DeserializeOwned, Serialize};
use tokio::{
    io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt},
    sync::mpsc::UnboundedReceiver,
};

use crate::message::HostMessage;

pub fn encode_frame<T: Serialize>(value: &T) -> Result<Vec<u8>> {
    let payload = bincode::serialize(value).context("Failed to serialize IPC message")?;
    let mut frame = Vec::with_capacity(payload.len() + 4);
    frame.extend_from_slice(&(payload.len() as u32).to_be_bytes());
    frame.extend_from_slice(&payload);
    Ok(frame)
}

pub async fn write_frame<W, T>(stream_write: &mut W, value: &T) -> Result<()>
where
    W: AsyncWrite + Unpin,
    T: Serialize,
{
    let frame = encode_frame(value)?;
    stream_write.write_all(&frame).await.context("Failed to write message to IPC stream")?;
    stream_write.flush().await.context("Failed to flush IPC stream")?;
    Ok(())
}

/// Read a single frame. Returns `Ok(None)` if the stream ended cleanly before a new frame started.
pub async fn read_frame<R, T>(stream_read: &mut R) -> Result<Option<T>>
where
    R: AsyncRead + Unpin,
    T: DeserializeOwned,
{
    let mut message_byte_length = [0u8; 4];
    let read = stream_read.read(&mut message_byte_length[..1]).await.context("Failed to read message size header in IPC message")?;
    if read == 0 {
        return Ok(None);
    }
    stream_read
        .read_exact(&mut message_byte_length[1..])
        .await
        .context("Failed to read message size header in IPC message")?;
    let message_byte_length = u32::from_be_bytes(message_byte_length);
    let mut raw_message = vec![0u8; message_byte_length as usize];
    stream_read.read_exact(&mut raw_message).await.context("Failed to read actual IPC message")?;

    bincode::deserialize(&raw_message).map(Some).context("Failed to parse host message")
}

/// Drain queued messages into the host stream until every sender is dropped.
pub async fn write_messages<W>(mut stream_write: W, mut messages: UnboundedReceiver<HostMessage>) -> Result<()>
where
    W: AsyncWrite + Unpin,
{
    while let Some(message) = messages.recv().await {
        write_frame(&mut stream_write, &message).await?;
    }
    stream_write.shutdown().await.context("Failed to shut down IPC stream")?;
    Ok(())
}
