use serde::{Deserialize, Serialize};

use crate::consts;

/// File attributes reported by the server.
///
/// Only `size` is interpreted by the client (it drives chunked reads);
/// the remaining fields are carried through untouched. Every field is
/// optional because the wire format only encodes what the server chose
/// to report.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileAttributes {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uid: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gid: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub permissions: Option<u32>,
    /// Access time, seconds since the epoch.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub atime: Option<u32>,
    /// Modification time, seconds since the epoch.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mtime: Option<u32>,
    /// Extension name/data pairs, opaque to the client.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub extended: Vec<(String, String)>,
}

impl FileAttributes {
    /// Attributes reporting only a size, the shape most servers return
    /// for a plain stat of a regular file.
    pub fn with_size(size: u64) -> Self {
        Self {
            size: Some(size),
            ..Self::default()
        }
    }

    /// The `SSH_FILEXFER_ATTR_*` presence bitmap matching the populated
    /// fields, for session layers encoding these attributes.
    pub fn flag_bits(&self) -> u32 {
        let mut flags = 0;
        if self.size.is_some() {
            flags |= consts::SSH_FILEXFER_ATTR_SIZE;
        }
        if self.uid.is_some() && self.gid.is_some() {
            flags |= consts::SSH_FILEXFER_ATTR_UIDGID;
        }
        if self.permissions.is_some() {
            flags |= consts::SSH_FILEXFER_ATTR_PERMISSIONS;
        }
        if self.atime.is_some() && self.mtime.is_some() {
            flags |= consts::SSH_FILEXFER_ATTR_ACMODTIME;
        }
        if !self.extended.is_empty() {
            flags |= consts::SSH_FILEXFER_ATTR_EXTENDED;
        }
        flags
    }
}
