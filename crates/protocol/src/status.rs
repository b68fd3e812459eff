use std::fmt;

use serde::{Deserialize, Serialize};

use crate::consts;

/// Error code carried by a status response.
///
/// `Ok` and `Eof` are the two codes the client interprets; everything
/// else is surfaced to the caller verbatim. Unknown values survive a
/// round-trip through [`StatusCode::Other`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "u32", into = "u32")]
pub enum StatusCode {
    Ok,
    Eof,
    NoSuchFile,
    PermissionDenied,
    Failure,
    BadMessage,
    NoConnection,
    ConnectionLost,
    OpUnsupported,
    Other(u32),
}

impl StatusCode {
    /// `true` for the success code.
    pub fn is_ok(self) -> bool {
        self == StatusCode::Ok
    }

    /// `true` for end-of-file. EOF is a normal termination signal for
    /// reads, never an error.
    pub fn is_eof(self) -> bool {
        self == StatusCode::Eof
    }
}

impl From<u32> for StatusCode {
    fn from(code: u32) -> Self {
        match code {
            consts::SSH_FX_OK => StatusCode::Ok,
            consts::SSH_FX_EOF => StatusCode::Eof,
            consts::SSH_FX_NO_SUCH_FILE => StatusCode::NoSuchFile,
            consts::SSH_FX_PERMISSION_DENIED => StatusCode::PermissionDenied,
            consts::SSH_FX_FAILURE => StatusCode::Failure,
            consts::SSH_FX_BAD_MESSAGE => StatusCode::BadMessage,
            consts::SSH_FX_NO_CONNECTION => StatusCode::NoConnection,
            consts::SSH_FX_CONNECTION_LOST => StatusCode::ConnectionLost,
            consts::SSH_FX_OP_UNSUPPORTED => StatusCode::OpUnsupported,
            other => StatusCode::Other(other),
        }
    }
}

impl From<StatusCode> for u32 {
    fn from(code: StatusCode) -> Self {
        match code {
            StatusCode::Ok => consts::SSH_FX_OK,
            StatusCode::Eof => consts::SSH_FX_EOF,
            StatusCode::NoSuchFile => consts::SSH_FX_NO_SUCH_FILE,
            StatusCode::PermissionDenied => consts::SSH_FX_PERMISSION_DENIED,
            StatusCode::Failure => consts::SSH_FX_FAILURE,
            StatusCode::BadMessage => consts::SSH_FX_BAD_MESSAGE,
            StatusCode::NoConnection => consts::SSH_FX_NO_CONNECTION,
            StatusCode::ConnectionLost => consts::SSH_FX_CONNECTION_LOST,
            StatusCode::OpUnsupported => consts::SSH_FX_OP_UNSUPPORTED,
            StatusCode::Other(other) => other,
        }
    }
}

impl fmt::Display for StatusCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatusCode::Ok => write!(f, "ok"),
            StatusCode::Eof => write!(f, "end of file"),
            StatusCode::NoSuchFile => write!(f, "no such file"),
            StatusCode::PermissionDenied => write!(f, "permission denied"),
            StatusCode::Failure => write!(f, "failure"),
            StatusCode::BadMessage => write!(f, "bad message"),
            StatusCode::NoConnection => write!(f, "no connection"),
            StatusCode::ConnectionLost => write!(f, "connection lost"),
            StatusCode::OpUnsupported => write!(f, "operation unsupported"),
            StatusCode::Other(code) => write!(f, "server code {code}"),
        }
    }
}
