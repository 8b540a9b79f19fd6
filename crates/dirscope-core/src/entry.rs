//! Directory entry and permission types.

use std::path::PathBuf;
use std::time::SystemTime;

use compact_str::CompactString;
use serde::{Deserialize, Serialize};

/// Permission class an access bit applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermClass {
    Owner,
    Group,
    Other,
}

impl PermClass {
    /// Bit shift for this class within a Unix mode word.
    fn shift(self) -> u32 {
        match self {
            PermClass::Owner => 6,
            PermClass::Group => 3,
            PermClass::Other => 0,
        }
    }
}

/// Owner/group/other read/write/execute bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Permissions {
    mode: u32,
}

impl Permissions {
    /// Wrap raw mode bits (the low nine bits are used).
    pub fn from_mode(mode: u32) -> Self {
        Self { mode: mode & 0o777 }
    }

    /// Derive permissions from filesystem metadata.
    #[cfg(unix)]
    pub fn from_metadata(metadata: &std::fs::Metadata) -> Self {
        use std::os::unix::fs::PermissionsExt;
        Self::from_mode(metadata.permissions().mode())
    }

    /// Derive permissions from filesystem metadata.
    ///
    /// Platforms without Unix mode bits only expose a read-only flag.
    #[cfg(not(unix))]
    pub fn from_metadata(metadata: &std::fs::Metadata) -> Self {
        if metadata.permissions().readonly() {
            Self::from_mode(0o444)
        } else {
            Self::from_mode(0o666)
        }
    }

    /// Raw mode bits.
    pub fn mode(&self) -> u32 {
        self.mode
    }

    pub fn read(&self, class: PermClass) -> bool {
        self.mode & (0o4 << class.shift()) != 0
    }

    pub fn write(&self, class: PermClass) -> bool {
        self.mode & (0o2 << class.shift()) != 0
    }

    pub fn exec(&self, class: PermClass) -> bool {
        self.mode & (0o1 << class.shift()) != 0
    }

    /// Render as "rwx r-x r--" for display.
    pub fn rwx_string(&self) -> String {
        let mut out = String::with_capacity(11);
        for (i, class) in [PermClass::Owner, PermClass::Group, PermClass::Other]
            .into_iter()
            .enumerate()
        {
            if i > 0 {
                out.push(' ');
            }
            out.push(if self.read(class) { 'r' } else { '-' });
            out.push(if self.write(class) { 'w' } else { '-' });
            out.push(if self.exec(class) { 'x' } else { '-' });
        }
        out
    }
}

/// One filesystem entry observed during a traversal pass.
///
/// Transient: lives only for the duration of one traversal. `file_size`
/// is `None` when the size could not be determined or does not apply,
/// which is distinct from a legitimate zero-byte file (`Some(0)`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DirectoryEntry {
    /// Full path of the entry.
    pub path: PathBuf,
    /// Byte size, meaningful only for regular files.
    pub file_size: Option<u64>,
    /// Last write time, when it could be resolved.
    pub modified: Option<SystemTime>,
    /// Owner/group/other permission bits.
    pub permissions: Permissions,
    /// Whether the entry existed when observed.
    pub exists: bool,
    /// Whether the entry is a directory.
    pub is_directory: bool,
    /// Whether the entry is a symbolic link.
    pub is_symlink: bool,
    /// Whether the entry is a regular file.
    pub is_regular_file: bool,
}

impl DirectoryEntry {
    /// Record for an entry that vanished or never existed (including a
    /// broken symbolic link). All descriptive fields stay at their safe
    /// defaults.
    pub fn missing(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            file_size: None,
            modified: None,
            permissions: Permissions::default(),
            exists: false,
            is_directory: false,
            is_symlink: false,
            is_regular_file: false,
        }
    }

    /// Final path component for display.
    pub fn name(&self) -> CompactString {
        self.path
            .file_name()
            .map(|n| CompactString::new(n.to_string_lossy()))
            .unwrap_or_else(|| CompactString::new(self.path.to_string_lossy()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_entry_defaults() {
        let entry = DirectoryEntry::missing("/gone/link");
        assert!(!entry.exists);
        assert!(!entry.is_directory);
        assert!(!entry.is_symlink);
        assert!(!entry.is_regular_file);
        assert_eq!(entry.file_size, None);
        assert_eq!(entry.modified, None);
        assert_eq!(entry.permissions.mode(), 0);
        assert_eq!(entry.name(), "link");
    }

    #[test]
    fn test_permission_bits() {
        let perms = Permissions::from_mode(0o754);
        assert!(perms.read(PermClass::Owner));
        assert!(perms.write(PermClass::Owner));
        assert!(perms.exec(PermClass::Owner));
        assert!(perms.read(PermClass::Group));
        assert!(!perms.write(PermClass::Group));
        assert!(perms.exec(PermClass::Group));
        assert!(perms.read(PermClass::Other));
        assert!(!perms.write(PermClass::Other));
        assert!(!perms.exec(PermClass::Other));
    }

    #[test]
    fn test_rwx_string() {
        assert_eq!(Permissions::from_mode(0o754).rwx_string(), "rwx r-x r--");
        assert_eq!(Permissions::from_mode(0).rwx_string(), "--- --- ---");
        // Bits above the permission word are masked off.
        assert_eq!(Permissions::from_mode(0o100644).rwx_string(), "rw- r-- r--");
    }
}
