use std::future::Future;
use std::io::{self, SeekFrom};
use std::path::Path;

use tokio::fs::File;
use tokio::io::{AsyncReadExt, AsyncSeekExt};

use crate::TransferError;

/// Local data source streamed to the server by the upload engine.
///
/// The engine stages `read_range` results in memory one staging buffer
/// at a time, so implementations only need cheap bounded range reads.
pub trait UploadSource: Send {
    /// Total size of the source in bytes. An unsizable source cannot be
    /// uploaded.
    fn size(&mut self) -> impl Future<Output = io::Result<u64>> + Send;

    /// Reads exactly the bytes in `[offset, offset + len)`. A short read
    /// is an error.
    fn read_range(
        &mut self,
        offset: u64,
        len: usize,
    ) -> impl Future<Output = io::Result<Vec<u8>>> + Send;
}

/// [`UploadSource`] backed by a file on the local filesystem.
#[derive(Debug)]
pub struct FsSource {
    file: File,
    len: u64,
}

impl FsSource {
    /// Opens `path` for upload. Fails with
    /// [`TransferError::SourceUnavailable`] if the file cannot be opened
    /// or sized.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self, TransferError> {
        let file = File::open(path.as_ref()).await?;
        let len = file.metadata().await?.len();
        Ok(Self { file, len })
    }
}

impl UploadSource for FsSource {
    async fn size(&mut self) -> io::Result<u64> {
        Ok(self.len)
    }

    async fn read_range(&mut self, offset: u64, len: usize) -> io::Result<Vec<u8>> {
        self.file.seek(SeekFrom::Start(offset)).await?;
        let mut buf = vec![0u8; len];
        self.file.read_exact(&mut buf).await?;
        Ok(buf)
    }
}
