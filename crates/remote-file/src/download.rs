use std::path::Path;

use tokio::fs::File;
use tokio::io::AsyncWriteExt;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use skiff_protocol::consts::MAX_READ_LEN;

use crate::TransferError;
use crate::handle::RemoteFile;
use crate::progress::TransferProgress;
use crate::session::WireSession;
use crate::upload::TransferOptions;

impl<S: WireSession> RemoteFile<S> {
    /// Reads the whole file into memory.
    ///
    /// Stats the file first. With a known size, reads are issued for
    /// `min(remaining, MAX_READ_LEN)` at the accumulation buffer's write
    /// position until nothing remains; a premature EOF means the file
    /// shrank between stat and read and simply ends the assembly. With
    /// an unknown size, reads continue at the accumulated offset until
    /// one comes back empty.
    ///
    /// Any error other than EOF aborts the whole assembly; no partial
    /// buffer is returned.
    pub async fn read_to_end(&self) -> Result<Vec<u8>, TransferError> {
        self.ensure_active()?;
        let attrs = self.stat().await?;
        let mut buf = Vec::new();

        match attrs.size {
            Some(total) => {
                let mut remaining = total;
                while remaining > 0 {
                    let len = remaining.min(u64::from(MAX_READ_LEN)) as u32;
                    let chunk = self.read_at(buf.len() as u64, len).await?;
                    if chunk.is_empty() {
                        // Shrank since the stat; what accumulated is the
                        // whole file now.
                        break;
                    }
                    remaining = remaining.saturating_sub(chunk.len() as u64);
                    buf.extend_from_slice(&chunk);
                }
            }
            None => loop {
                let chunk = self.read_at(buf.len() as u64, MAX_READ_LEN).await?;
                if chunk.is_empty() {
                    break;
                }
                buf.extend_from_slice(&chunk);
            },
        }

        debug!(path = %self.path(), bytes = buf.len(), "remote file read to end");
        Ok(buf)
    }

    /// Streams the file to `dest` on the local filesystem.
    ///
    /// The disk-bound dual of [`upload_from`](RemoteFile::upload_from):
    /// sequential bounded reads written straight to the local file, so
    /// memory use stays at one chunk regardless of file size. Returns
    /// the number of bytes written.
    pub async fn download_to_path(
        &self,
        dest: impl AsRef<Path>,
        progress: Option<&TransferProgress>,
        cancel: &CancellationToken,
        opts: TransferOptions,
    ) -> Result<u64, TransferError> {
        self.ensure_active()?;
        let opts = opts.normalized();
        let total = self.stat().await?.size;
        if let Some(p) = progress {
            p.begin(total.unwrap_or(0));
        }

        let mut file = File::create(dest.as_ref()).await?;
        let mut written: u64 = 0;
        loop {
            if cancel.is_cancelled() {
                return Err(TransferError::Cancelled);
            }
            let want = match total {
                Some(t) if written >= t => break,
                Some(t) => (t - written).min(opts.chunk_len as u64) as u32,
                None => opts.chunk_len as u32,
            };
            let chunk = self.read_at(written, want).await?;
            if chunk.is_empty() {
                break;
            }
            file.write_all(&chunk).await?;
            written += chunk.len() as u64;
            if let Some(p) = progress {
                p.advance(chunk.len() as u64);
            }
        }
        file.flush().await?;

        if let Some(p) = progress {
            p.finish(written);
        }
        debug!(path = %self.path(), bytes = written, "remote file downloaded");
        Ok(written)
    }
}
