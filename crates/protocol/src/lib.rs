//! Typed SFTP wire shapes for the skiff client core.
//!
//! Requests, responses, status codes and file attributes as defined by
//! SFTP version 3 (draft-ietf-secsh-filexfer-02). Byte-level framing is
//! owned by the session layer that carries these values; this crate is
//! pure data.

pub mod attrs;
pub mod consts;
pub mod handle;
pub mod packet;
pub mod status;

pub use attrs::FileAttributes;
pub use handle::HandleToken;
pub use packet::{Request, Response};
pub use status::StatusCode;
