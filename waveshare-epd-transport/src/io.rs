//! Shared stream helpers

use std::time::Duration;

use bytes::BytesMut;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tokio::time::{Instant, timeout_at};
use tracing::trace;

use crate::error::{Error, Result};

/// Largest single read; the buffer grows as bytes arrive
const READ_CHUNK: usize = 4096;

/// Read until `max_size` bytes arrived or `timeout` elapsed
///
/// End of stream before anything arrived is reported as
/// [`Error::ConnectionClosed`]; bytes gathered before it are returned.
pub(crate) async fn read_with_deadline<R>(
    reader: &mut R,
    max_size: usize,
    timeout: Duration,
) -> Result<BytesMut>
where
    R: AsyncRead + Unpin + ?Sized,
{
    let deadline = Instant::now() + timeout;

    let mut buf = BytesMut::new();

    while buf.len() < max_size {
        let want = (max_size - buf.len()).min(READ_CHUNK);
        buf.reserve(want);

        let mut limited = (&mut *reader).take(want as u64);
        match timeout_at(deadline, limited.read_buf(&mut buf)).await {
            Err(_elapsed) => break,
            Ok(Ok(0)) if buf.is_empty() => return Err(Error::ConnectionClosed),
            Ok(Ok(0)) => break,
            Ok(Ok(_)) => {}
            Ok(Err(e)) => return Err(Error::Io(e)),
        }
    }

    trace!("Received {} bytes: {:02X?}", buf.len(), &buf[..buf.len().min(32)]);

    Ok(buf)
}

/// Flush pending output and shut the stream down
pub(crate) async fn close_stream<W>(writer: &mut W) -> Result<()>
where
    W: AsyncWrite + Unpin + ?Sized,
{
    writer.flush().await?;
    writer.shutdown().await?;
    Ok(())
}
