use crate::attrs::FileAttributes;
use crate::consts;
use crate::handle::HandleToken;
use crate::status::StatusCode;

/// A request the client sends over the session.
///
/// Every variant carries the request id the session allocated for it;
/// the matching [`Response`] echoes the same id.
#[derive(Debug, Clone, PartialEq)]
pub enum Request {
    /// Fetch attributes for the file at `path`.
    Stat { id: u32, path: String },
    /// Read up to `len` bytes starting at `offset`.
    Read {
        id: u32,
        handle: HandleToken,
        offset: u64,
        len: u32,
    },
    /// Write `data` starting at `offset`. For handles opened in append
    /// mode the server ignores the offset; it is sent regardless.
    Write {
        id: u32,
        handle: HandleToken,
        offset: u64,
        data: Vec<u8>,
    },
    /// Release the server-side handle.
    Close { id: u32, handle: HandleToken },
}

impl Request {
    /// The request id embedded in this request.
    pub fn id(&self) -> u32 {
        match self {
            Request::Stat { id, .. }
            | Request::Read { id, .. }
            | Request::Write { id, .. }
            | Request::Close { id, .. } => *id,
        }
    }

    /// The `SSH_FXP_*` packet type for this request.
    pub fn packet_type(&self) -> u8 {
        match self {
            Request::Stat { .. } => consts::SSH_FXP_STAT,
            Request::Read { .. } => consts::SSH_FXP_READ,
            Request::Write { .. } => consts::SSH_FXP_WRITE,
            Request::Close { .. } => consts::SSH_FXP_CLOSE,
        }
    }
}

/// A response correlated to a [`Request`] by id.
#[derive(Debug, Clone, PartialEq)]
pub enum Response {
    /// Attributes, the success response to a stat.
    Attrs { id: u32, attrs: FileAttributes },
    /// File data, the success response to a read. May be shorter than
    /// the requested length.
    Data { id: u32, data: Vec<u8> },
    /// Completion status: `ok`, `eof`, or a server error code.
    Status {
        id: u32,
        code: StatusCode,
        message: String,
    },
}

impl Response {
    /// The request id this response answers.
    pub fn id(&self) -> u32 {
        match self {
            Response::Attrs { id, .. } | Response::Data { id, .. } | Response::Status { id, .. } => {
                *id
            }
        }
    }

    /// The `SSH_FXP_*` packet type for this response.
    pub fn packet_type(&self) -> u8 {
        match self {
            Response::Attrs { .. } => consts::SSH_FXP_ATTRS,
            Response::Data { .. } => consts::SSH_FXP_DATA,
            Response::Status { .. } => consts::SSH_FXP_STATUS,
        }
    }

    /// Short name of the response kind, for diagnostics.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Response::Attrs { .. } => "attributes",
            Response::Data { .. } => "data",
            Response::Status { .. } => "status",
        }
    }
}
