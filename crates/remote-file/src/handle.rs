use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tracing::{debug, warn};

use skiff_protocol::consts::MAX_WRITE_LEN;
use skiff_protocol::{FileAttributes, HandleToken, Request, Response};

use crate::TransferError;
use crate::session::WireSession;

/// An open file on the remote server.
///
/// Owns the opaque handle token issued when the file was opened and a
/// shared reference to the session that carries requests. A handle is
/// `Active` from construction until [`close`](RemoteFile::close) flips it
/// to `Closed`; the transition is one-way, and every operation except
/// `close` fails fast with [`TransferError::HandleInvalid`] once it has
/// happened.
///
/// Operations suspend until the matching response arrives. Distinct
/// calls on the same handle may run concurrently (each awaits its own
/// response); the chunked helpers never issue more than one request at a
/// time internally, which is what keeps their offset bookkeeping sound.
pub struct RemoteFile<S: WireSession> {
    session: Arc<S>,
    token: HandleToken,
    path: String,
    active: AtomicBool,
}

impl<S: WireSession> RemoteFile<S> {
    /// Wraps a server-issued handle token.
    ///
    /// Called by the open-file operation, which hands ownership of the
    /// token over. The handle starts out active.
    pub fn new(session: Arc<S>, token: HandleToken, path: impl Into<String>) -> Self {
        Self {
            session,
            token,
            path: path.into(),
            active: AtomicBool::new(true),
        }
    }

    /// The path the file was opened with, kept for diagnostics and stat.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// `false` once the handle has been closed.
    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::Acquire)
    }

    pub(crate) fn ensure_active(&self) -> Result<(), TransferError> {
        if self.is_active() {
            Ok(())
        } else {
            Err(TransferError::HandleInvalid)
        }
    }

    /// Allocates an id, sends one request, and verifies the response is
    /// correlated to it.
    pub(crate) async fn roundtrip(
        &self,
        build: impl FnOnce(u32) -> Request,
    ) -> Result<Response, TransferError> {
        let id = self.session.next_request_id();
        let resp = self.session.request(build(id)).await?;
        if resp.id() != id {
            return Err(TransferError::Protocol(format!(
                "response id {} does not answer request id {id}",
                resp.id(),
            )));
        }
        Ok(resp)
    }

    fn expect_ok(resp: Response) -> Result<(), TransferError> {
        match resp {
            Response::Status { code, message, .. } => {
                if code.is_ok() {
                    Ok(())
                } else {
                    Err(TransferError::Status { code, message })
                }
            }
            other => Err(TransferError::Protocol(format!(
                "expected status, got {}",
                other.kind_name()
            ))),
        }
    }

    /// Fetches the file's attributes via a stat of its path.
    pub async fn stat(&self) -> Result<FileAttributes, TransferError> {
        self.ensure_active()?;
        let resp = self
            .roundtrip(|id| Request::Stat {
                id,
                path: self.path.clone(),
            })
            .await?;
        match resp {
            Response::Attrs { attrs, .. } => Ok(attrs),
            Response::Status { code, message, .. } if !code.is_ok() => {
                Err(TransferError::Status { code, message })
            }
            other => Err(TransferError::Protocol(format!(
                "expected attributes, got {}",
                other.kind_name()
            ))),
        }
    }

    /// Reads up to `len` bytes at `offset` with a single request.
    ///
    /// The server may return fewer bytes than asked for. An EOF status
    /// yields an empty vector: for sequential reads EOF is the expected
    /// terminal condition, not a failure.
    pub async fn read_at(&self, offset: u64, len: u32) -> Result<Vec<u8>, TransferError> {
        self.ensure_active()?;
        let resp = self
            .roundtrip(|id| Request::Read {
                id,
                handle: self.token.clone(),
                offset,
                len,
            })
            .await?;
        match resp {
            Response::Data { data, .. } => Ok(data),
            Response::Status { code, .. } if code.is_eof() => Ok(Vec::new()),
            Response::Status { code, message, .. } if !code.is_ok() => {
                Err(TransferError::Status { code, message })
            }
            other => Err(TransferError::Protocol(format!(
                "expected data, got {}",
                other.kind_name()
            ))),
        }
    }

    /// Writes `data` at `offset` with a single request.
    ///
    /// `data` must fit in one request
    /// ([`MAX_WRITE_LEN`](skiff_protocol::consts::MAX_WRITE_LEN)); the
    /// chunked engine slices larger payloads before calling this.
    pub async fn write_at(&self, offset: u64, data: &[u8]) -> Result<(), TransferError> {
        self.ensure_active()?;
        if data.len() > MAX_WRITE_LEN as usize {
            return Err(TransferError::Protocol(format!(
                "write of {} bytes exceeds the {MAX_WRITE_LEN} byte request limit",
                data.len(),
            )));
        }
        let resp = self
            .roundtrip(|id| Request::Write {
                id,
                handle: self.token.clone(),
                offset,
                data: data.to_vec(),
            })
            .await?;
        Self::expect_ok(resp)
    }

    /// Releases the server-side handle.
    ///
    /// Idempotent: closing an already-closed handle succeeds immediately
    /// without contacting the server. The handle is marked closed before
    /// the acknowledgment is awaited, so concurrent operations see it as
    /// invalid the moment a close begins.
    pub async fn close(&self) -> Result<(), TransferError> {
        if !self.active.swap(false, Ordering::AcqRel) {
            return Ok(());
        }
        let resp = self
            .roundtrip(|id| Request::Close {
                id,
                handle: self.token.clone(),
            })
            .await?;
        Self::expect_ok(resp)?;
        debug!(path = %self.path, "remote file closed");
        Ok(())
    }
}

impl<S: WireSession> Drop for RemoteFile<S> {
    fn drop(&mut self) {
        // A dropped handle can no longer be closed; the server-side
        // handle leaks until the session itself goes away. Programming
        // error, not a runtime failure.
        if self.active.load(Ordering::Relaxed) {
            warn!(
                path = %self.path,
                token = %self.token,
                session_connected = self.session.is_connected(),
                "remote file dropped while still open"
            );
        }
    }
}
