//! SFTP v3 packet ids, status values and transfer limits.

// Packet type ids (draft-ietf-secsh-filexfer-02, section 3).
pub const SSH_FXP_OPEN: u8 = 3;
pub const SSH_FXP_CLOSE: u8 = 4;
pub const SSH_FXP_READ: u8 = 5;
pub const SSH_FXP_WRITE: u8 = 6;
pub const SSH_FXP_STAT: u8 = 17;
pub const SSH_FXP_STATUS: u8 = 101;
pub const SSH_FXP_HANDLE: u8 = 102;
pub const SSH_FXP_DATA: u8 = 103;
pub const SSH_FXP_ATTRS: u8 = 105;

// Status codes carried by SSH_FXP_STATUS (section 7).
pub const SSH_FX_OK: u32 = 0;
pub const SSH_FX_EOF: u32 = 1;
pub const SSH_FX_NO_SUCH_FILE: u32 = 2;
pub const SSH_FX_PERMISSION_DENIED: u32 = 3;
pub const SSH_FX_FAILURE: u32 = 4;
pub const SSH_FX_BAD_MESSAGE: u32 = 5;
pub const SSH_FX_NO_CONNECTION: u32 = 6;
pub const SSH_FX_CONNECTION_LOST: u32 = 7;
pub const SSH_FX_OP_UNSUPPORTED: u32 = 8;

// Attribute presence flags (section 5).
pub const SSH_FILEXFER_ATTR_SIZE: u32 = 0x0000_0001;
pub const SSH_FILEXFER_ATTR_UIDGID: u32 = 0x0000_0002;
pub const SSH_FILEXFER_ATTR_PERMISSIONS: u32 = 0x0000_0004;
pub const SSH_FILEXFER_ATTR_ACMODTIME: u32 = 0x0000_0008;
pub const SSH_FILEXFER_ATTR_EXTENDED: u32 = 0x8000_0000;

/// Largest read accepted in a single request. The length field on the
/// wire is 32 bits, so one response can never carry more than this.
pub const MAX_READ_LEN: u32 = u32::MAX;

/// Largest data payload sent in a single write request. Nominally the
/// wire would allow up to 4 GiB, but common servers drop writes well
/// before that, so the ceiling sits far below the field maximum.
pub const MAX_WRITE_LEN: u32 = 256 * 1024;

/// Default slice size for chunked writes (32 KiB, the packet size most
/// servers negotiate).
pub const DEFAULT_WRITE_CHUNK: usize = 32 * 1024;

/// Default amount of a local source staged in memory at once (1 MiB).
/// Independent of [`DEFAULT_WRITE_CHUNK`]: local I/O granularity and
/// wire-request sizing have different sweet spots.
pub const DEFAULT_STAGING_LEN: usize = 1024 * 1024;
