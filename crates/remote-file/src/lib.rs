//! Remote file handles over an established SFTP session.
//!
//! A [`RemoteFile`] wraps the opaque handle token a server issued for an
//! open file and drives the chunked-transfer protocol on top of it:
//! attribute fetches, bounded reads and writes, whole-file assembly and
//! disk-to-remote streaming with progress reporting. Opening files and
//! moving bytes on the wire belong to the session layer, reached through
//! the [`WireSession`] seam.

mod download;
mod handle;
mod progress;
mod session;
mod source;
mod upload;

#[cfg(test)]
pub(crate) mod test_support;

pub use handle::RemoteFile;
pub use progress::{ProgressCallback, TransferProgress, TransferSnapshot};
pub use session::{SessionError, WireSession};
pub use source::{FsSource, UploadSource};
pub use upload::TransferOptions;

pub use skiff_protocol::{FileAttributes, HandleToken, Request, Response, StatusCode};

/// Errors produced by remote file operations.
///
/// End-of-file is never represented here: an EOF status is a normal
/// termination signal for reads and is absorbed by the read paths.
#[derive(Debug, thiserror::Error)]
pub enum TransferError {
    /// The handle was closed (or never activated); no request was sent.
    #[error("file handle is no longer valid")]
    HandleInvalid,

    /// The server answered with a message shape that does not fit the
    /// request. Never retried.
    #[error("protocol violation: {0}")]
    Protocol(String),

    /// The server rejected the operation with a non-ok, non-eof code.
    #[error("server status {code}: {message}")]
    Status {
        code: StatusCode,
        message: String,
    },

    /// The local data source could not be opened, sized or range-read.
    #[error("local source unavailable: {0}")]
    SourceUnavailable(#[from] std::io::Error),

    /// The transfer was cancelled between chunks. The handle stays
    /// active; the caller still owns the close.
    #[error("transfer cancelled")]
    Cancelled,

    /// The session failed to carry the request.
    #[error(transparent)]
    Session(#[from] SessionError),
}
