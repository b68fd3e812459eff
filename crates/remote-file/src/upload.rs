use std::io;
use std::path::Path;

use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use skiff_protocol::consts::{DEFAULT_STAGING_LEN, DEFAULT_WRITE_CHUNK, MAX_WRITE_LEN};

use crate::TransferError;
use crate::handle::RemoteFile;
use crate::progress::TransferProgress;
use crate::session::WireSession;
use crate::source::{FsSource, UploadSource};

/// Chunk sizes for streamed transfers.
///
/// The two levels are independent: `staging_len` bounds how much of the
/// local source sits in memory at once, `chunk_len` bounds a single wire
/// request. Local I/O and wire sizing have different optimal
/// granularities.
#[derive(Debug, Clone, Copy)]
pub struct TransferOptions {
    /// Largest slice sent in one write (or requested in one download
    /// read). Clamped to the protocol's single-request limit.
    pub chunk_len: usize,
    /// How much of the local source is staged in memory at once.
    pub staging_len: usize,
}

impl Default for TransferOptions {
    fn default() -> Self {
        Self {
            chunk_len: DEFAULT_WRITE_CHUNK,
            staging_len: DEFAULT_STAGING_LEN,
        }
    }
}

impl TransferOptions {
    /// Replaces zero sizes with the defaults and clamps the wire chunk
    /// to the single-request limit.
    pub(crate) fn normalized(self) -> Self {
        let chunk_len = if self.chunk_len == 0 {
            DEFAULT_WRITE_CHUNK
        } else {
            self.chunk_len
        };
        let staging_len = if self.staging_len == 0 {
            DEFAULT_STAGING_LEN
        } else {
            self.staging_len
        };
        Self {
            chunk_len: chunk_len.min(MAX_WRITE_LEN as usize),
            staging_len,
        }
    }
}

impl<S: WireSession> RemoteFile<S> {
    /// Streams `source` to the remote file, chunk by chunk.
    ///
    /// Bytes in `[offset, size)` of the source are written to the same
    /// offsets of the remote file, one bounded request at a time, each
    /// awaited before the next goes out. `progress` (when supplied) only
    /// ever counts bytes the server has acknowledged, and is pinned to
    /// exactly the source size after the last chunk. For handles opened
    /// in append mode the server ignores the offsets; they are sent
    /// regardless.
    ///
    /// A failed transfer leaves whatever prefix the server already
    /// acknowledged in place; the actual remote length can be re-queried
    /// with [`stat`](RemoteFile::stat). Returns the number of bytes
    /// written.
    pub async fn upload_from<Src: UploadSource>(
        &self,
        source: &mut Src,
        offset: u64,
        progress: Option<&TransferProgress>,
        cancel: &CancellationToken,
        opts: TransferOptions,
    ) -> Result<u64, TransferError> {
        self.ensure_active()?;
        let opts = opts.normalized();
        let total = source.size().await?;
        if let Some(p) = progress {
            p.begin(total);
        }
        info!(path = %self.path(), total, offset, "upload started");

        // Running count of acknowledged bytes; write offsets derive from
        // it rather than from staging-buffer cursor arithmetic.
        let mut sent: u64 = 0;
        let mut pos = offset;
        while pos < total {
            if cancel.is_cancelled() {
                return Err(TransferError::Cancelled);
            }
            let stage_len = (total - pos).min(opts.staging_len as u64) as usize;
            let staging = source.read_range(pos, stage_len).await?;
            if staging.len() != stage_len {
                return Err(TransferError::SourceUnavailable(io::Error::new(
                    io::ErrorKind::UnexpectedEof,
                    format!("short read from local source at offset {pos}"),
                )));
            }

            for slice in staging.chunks(opts.chunk_len) {
                if cancel.is_cancelled() {
                    return Err(TransferError::Cancelled);
                }
                self.write_at(offset + sent, slice).await?;
                sent += slice.len() as u64;
                if let Some(p) = progress {
                    p.advance(slice.len() as u64);
                }
                debug!(path = %self.path(), offset = offset + sent, "chunk acknowledged");
            }
            pos += stage_len as u64;
        }

        // Independent of any rounding in the loop arithmetic.
        if let Some(p) = progress {
            p.finish(total);
        }
        info!(path = %self.path(), bytes = sent, "upload complete");
        Ok(sent)
    }

    /// Uploads a local file from its start with default chunking.
    pub async fn upload_path(
        &self,
        path: impl AsRef<Path>,
        progress: Option<&TransferProgress>,
    ) -> Result<u64, TransferError> {
        let mut source = FsSource::open(path).await?;
        self.upload_from(
            &mut source,
            0,
            progress,
            &CancellationToken::new(),
            TransferOptions::default(),
        )
        .await
    }
}
