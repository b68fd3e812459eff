use std::future::Future;

use skiff_protocol::{Request, Response};

/// Failure of the session layer to carry a request.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("session is not connected")]
    Disconnected,

    #[error("transport failure: {0}")]
    Transport(String),
}

/// Contract the underlying SFTP session must satisfy.
///
/// The session owns the transport, serializes packets, and multiplexes
/// concurrent request/response pairs by request id. File handles only
/// ask it for fresh ids and matched responses; they never see the wire.
///
/// One session is shared by every handle opened on the connection, so id
/// allocation must be unique across all of them.
pub trait WireSession: Send + Sync {
    /// Allocates a request id unique within this session.
    fn next_request_id(&self) -> u32;

    /// Sends `req` and resolves with the response carrying the same id.
    fn request(
        &self,
        req: Request,
    ) -> impl Future<Output = Result<Response, SessionError>> + Send;

    /// Session liveness. Consulted for diagnostics only, never as an
    /// operation precondition.
    fn is_connected(&self) -> bool;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_error_display() {
        assert_eq!(
            SessionError::Disconnected.to_string(),
            "session is not connected"
        );
        assert_eq!(
            SessionError::Transport("broken pipe".into()).to_string(),
            "transport failure: broken pipe"
        );
    }
}
