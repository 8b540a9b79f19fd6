//! Directory listing and size aggregation.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use dirscope_core::{
    AggregationIndex, DirectoryEntry, DirectoryStats, LastError, OperationError, Permissions,
};

use crate::volume;

/// Traversal policy for [`Scanner::list_directory`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Descend {
    /// Immediate children only.
    Flat,
    /// Depth-first preorder walk of the whole subtree.
    Recursive,
}

/// How to treat a permission-denied error when opening the walk root.
///
/// Nested directories are always skipped; the root of a walk is surfaced
/// for a direct listing but tolerated when aggregation recurses into a
/// child the process cannot read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DeniedRoot {
    Surface,
    Skip,
}

/// Stateless directory scanner, except for the last observed error.
#[derive(Debug, Default)]
pub struct Scanner {
    last_error: LastError,
}

impl Scanner {
    /// Create a new scanner with no recorded error.
    pub fn new() -> Self {
        Self::default()
    }

    /// The most recent failure, retrievable after a call returns `Err`.
    pub fn last_error(&self) -> &LastError {
        &self.last_error
    }

    /// List directory contents, flat or recursive.
    ///
    /// Entries that vanish mid-listing (including broken symbolic links)
    /// are recorded with `exists = false`. During a recursive walk,
    /// directories the process cannot read are silently excluded. Any
    /// other failure aborts the whole call.
    pub fn list_directory(
        &mut self,
        path: &Path,
        descend: Descend,
    ) -> Result<Vec<DirectoryEntry>, OperationError> {
        self.last_error.clear();
        let mut entries = Vec::new();
        self.checked(walk(path, descend, DeniedRoot::Surface, &mut entries))?;
        Ok(entries)
    }

    /// Produce one rollup row per immediate child of `path`.
    ///
    /// Each directory child is reduced to the cumulative size and entry
    /// count of its whole subtree in a single recursive pass; the
    /// returned index carries the accumulated total.
    pub fn aggregate_sizes(&mut self, path: &Path) -> Result<AggregationIndex, OperationError> {
        self.last_error.clear();
        let result = aggregate(path);
        self.checked(result)
    }

    /// Space information for the volume containing `path`.
    pub fn space_info(&mut self, path: &Path) -> Result<dirscope_core::SpaceInfo, OperationError> {
        self.last_error.clear();
        let result = volume::space_info(path);
        self.checked(result)
    }

    /// Record a failure into the last-error slot before propagating it.
    fn checked<T>(&mut self, result: Result<T, OperationError>) -> Result<T, OperationError> {
        if let Err(error) = &result {
            self.last_error.record(error.clone());
        }
        result
    }
}

/// One traversal pass over `dir`, appending entries in depth-first
/// preorder. Symbolic links are never followed into.
fn walk(
    dir: &Path,
    descend: Descend,
    on_denied_root: DeniedRoot,
    out: &mut Vec<DirectoryEntry>,
) -> Result<(), OperationError> {
    let reader = match fs::read_dir(dir) {
        Ok(reader) => reader,
        Err(e)
            if e.kind() == io::ErrorKind::PermissionDenied
                && on_denied_root == DeniedRoot::Skip =>
        {
            debug!(path = %dir.display(), "skipping unreadable directory");
            return Ok(());
        }
        Err(e) => return Err(OperationError::io(dir, &e)),
    };

    for item in reader {
        let item = item.map_err(|e| OperationError::io(dir, &e))?;
        let entry = resolve_entry(item.path())?;
        let descend_into = descend == Descend::Recursive
            && entry.exists
            && entry.is_directory
            && !entry.is_symlink;
        let child_path = entry.path.clone();
        out.push(entry);
        if descend_into {
            walk(&child_path, descend, DeniedRoot::Skip, out)?;
        }
    }

    Ok(())
}

/// Resolve metadata for one entry.
///
/// Resolution order: existence, symbolic-link test, permissions, last
/// write time, directory test, regular-file test, then byte size if and
/// only if the entry is a regular file. A missing entry (the tolerated
/// not-found class) yields a safe-defaults record; any other failure
/// aborts.
fn resolve_entry(path: PathBuf) -> Result<DirectoryEntry, OperationError> {
    let metadata = match fs::metadata(&path) {
        Ok(metadata) => metadata,
        Err(e) => {
            let error = OperationError::io(&path, &e);
            if error.is_tolerated_missing() {
                return Ok(DirectoryEntry::missing(path));
            }
            return Err(error);
        }
    };

    let is_symlink = fs::symlink_metadata(&path)
        .map_err(|e| OperationError::io(&path, &e))?
        .file_type()
        .is_symlink();

    let permissions = Permissions::from_metadata(&metadata);
    let modified = Some(
        metadata
            .modified()
            .map_err(|e| OperationError::io(&path, &e))?,
    );

    let is_directory = metadata.is_dir();
    let is_regular_file = metadata.is_file();
    let file_size = if is_regular_file && !is_directory {
        Some(metadata.len())
    } else {
        None
    };

    Ok(DirectoryEntry {
        path,
        file_size,
        modified,
        permissions,
        exists: true,
        is_directory,
        is_symlink,
        is_regular_file,
    })
}

/// List the immediate children of `path` and fold each child's subtree
/// into one [`DirectoryStats`] row.
fn aggregate(path: &Path) -> Result<AggregationIndex, OperationError> {
    let mut children = Vec::new();
    walk(path, Descend::Flat, DeniedRoot::Surface, &mut children)?;

    let mut index = AggregationIndex::new();
    for child in children {
        let stats = if !child.exists {
            // Vanished between being listed and being stat-ed.
            DirectoryStats {
                is_directory: false,
                size: 0,
                count: 0,
            }
        } else if child.is_directory {
            if child.is_symlink {
                // Shown as a directory but never followed into.
                DirectoryStats {
                    is_directory: true,
                    size: 0,
                    count: 0,
                }
            } else {
                let mut subtree = Vec::new();
                walk(&child.path, Descend::Recursive, DeniedRoot::Skip, &mut subtree)?;
                // None is the unresolvable-size sentinel and never enters the sum.
                let size = subtree.iter().filter_map(|e| e.file_size).sum();
                DirectoryStats {
                    is_directory: true,
                    size,
                    count: subtree.len() as u64,
                }
            }
        } else {
            DirectoryStats {
                is_directory: false,
                size: child.file_size.unwrap_or(0),
                count: 1,
            }
        };
        index.insert(child.path, stats);
    }

    info!(
        path = %path.display(),
        rows = index.len(),
        total_size = index.total_size(),
        "aggregation pass complete"
    );
    Ok(index)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn create_test_tree() -> TempDir {
        let temp = TempDir::new().unwrap();
        let root = temp.path();

        fs::create_dir(root.join("dir1")).unwrap();
        fs::create_dir(root.join("dir2")).unwrap();
        fs::create_dir(root.join("dir1/subdir")).unwrap();

        fs::write(root.join("file1.txt"), "hello").unwrap();
        fs::write(root.join("dir1/file2.txt"), "world world world").unwrap();
        fs::write(root.join("dir1/subdir/file3.txt"), "test").unwrap();
        fs::write(root.join("dir2/file4.txt"), "another file here").unwrap();

        temp
    }

    #[test]
    fn test_flat_listing_exact_children() {
        let temp = create_test_tree();
        let mut scanner = Scanner::new();

        let entries = scanner
            .list_directory(temp.path(), Descend::Flat)
            .unwrap();

        // One entry per direct child, no grandchildren, no duplicates.
        assert_eq!(entries.len(), 3);
        let mut names: Vec<_> = entries.iter().map(|e| e.name().to_string()).collect();
        names.sort();
        assert_eq!(names, vec!["dir1", "dir2", "file1.txt"]);
        assert!(!scanner.last_error().is_error());
    }

    #[test]
    fn test_recursive_listing_visits_descendants() {
        let temp = create_test_tree();
        let mut scanner = Scanner::new();

        let entries = scanner
            .list_directory(temp.path(), Descend::Recursive)
            .unwrap();

        // 3 dirs + 4 files.
        assert_eq!(entries.len(), 7);
        assert!(entries
            .iter()
            .any(|e| e.name() == "file3.txt" && e.file_size == Some(4)));
    }

    #[test]
    fn test_entry_metadata_resolution() {
        let temp = create_test_tree();
        let mut scanner = Scanner::new();

        let entries = scanner
            .list_directory(temp.path(), Descend::Flat)
            .unwrap();

        let file = entries.iter().find(|e| e.name() == "file1.txt").unwrap();
        assert!(file.exists);
        assert!(file.is_regular_file);
        assert!(!file.is_directory);
        assert_eq!(file.file_size, Some(5));
        assert!(file.modified.is_some());

        let dir = entries.iter().find(|e| e.name() == "dir1").unwrap();
        assert!(dir.is_directory);
        assert!(!dir.is_regular_file);
        // Size is meaningless for directories.
        assert_eq!(dir.file_size, None);
    }

    #[test]
    fn test_listing_missing_root_fails_and_records() {
        let temp = TempDir::new().unwrap();
        let mut scanner = Scanner::new();

        let gone = temp.path().join("never-existed");
        let err = scanner.list_directory(&gone, Descend::Flat).unwrap_err();
        assert!(err.is_tolerated_missing());
        assert!(scanner.last_error().is_error());

        // A successful call clears the slot again.
        scanner.list_directory(temp.path(), Descend::Flat).unwrap();
        assert!(!scanner.last_error().is_error());
    }

    #[test]
    fn test_aggregate_single_file() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("answer.bin"), vec![0u8; 42]).unwrap();

        let mut scanner = Scanner::new();
        let index = scanner.aggregate_sizes(temp.path()).unwrap();

        assert_eq!(index.len(), 1);
        let stats = index.get(&temp.path().join("answer.bin")).unwrap();
        assert!(!stats.is_directory);
        assert_eq!(stats.size, 42);
        assert_eq!(stats.count, 1);
        assert_eq!(index.total_size(), 42);
    }

    #[test]
    fn test_aggregate_folds_subtree_into_child_row() {
        let temp = TempDir::new().unwrap();
        let sub = temp.path().join("sub");
        fs::create_dir(&sub).unwrap();
        fs::write(sub.join("a"), vec![0u8; 10]).unwrap();
        fs::write(sub.join("b"), vec![0u8; 20]).unwrap();
        fs::write(sub.join("c"), vec![0u8; 30]).unwrap();

        let mut scanner = Scanner::new();
        let index = scanner.aggregate_sizes(temp.path()).unwrap();

        // One row for the child, nothing for its descendants.
        assert_eq!(index.len(), 1);
        let stats = index.get(&sub).unwrap();
        assert!(stats.is_directory);
        assert_eq!(stats.size, 60);
        assert_eq!(stats.count, 3);
        assert_eq!(index.total_size(), 60);
    }

    #[test]
    fn test_aggregate_total_equals_row_sum() {
        let temp = create_test_tree();
        let mut scanner = Scanner::new();

        let index = scanner.aggregate_sizes(temp.path()).unwrap();

        let sum: u64 = index.iter().map(|(_, s)| s.size).sum();
        assert_eq!(index.total_size(), sum);
        // file1 (5) + dir1 subtree (17 + 4) + dir2 subtree (17)
        assert_eq!(index.total_size(), 43);
    }

    #[cfg(unix)]
    #[test]
    fn test_broken_symlink_is_tolerated() {
        let temp = TempDir::new().unwrap();
        std::os::unix::fs::symlink(
            temp.path().join("no-such-target"),
            temp.path().join("dangling"),
        )
        .unwrap();
        fs::write(temp.path().join("real.txt"), "data").unwrap();

        let mut scanner = Scanner::new();
        let entries = scanner
            .list_directory(temp.path(), Descend::Flat)
            .unwrap();

        assert_eq!(entries.len(), 2);
        let dangling = entries.iter().find(|e| e.name() == "dangling").unwrap();
        assert!(!dangling.exists);
        assert_eq!(dangling.file_size, None);

        // Aggregation treats it as a zero-size, zero-count row.
        let index = scanner.aggregate_sizes(temp.path()).unwrap();
        let stats = index.get(&temp.path().join("dangling")).unwrap();
        assert_eq!(stats.size, 0);
        assert_eq!(stats.count, 0);
        assert_eq!(index.total_size(), 4);
    }

    #[cfg(unix)]
    #[test]
    fn test_symlinked_directory_not_followed() {
        let temp = TempDir::new().unwrap();
        let real = temp.path().join("real");
        fs::create_dir(&real).unwrap();
        fs::write(real.join("payload"), vec![0u8; 16]).unwrap();
        std::os::unix::fs::symlink(&real, temp.path().join("alias")).unwrap();

        let mut scanner = Scanner::new();
        let index = scanner.aggregate_sizes(temp.path()).unwrap();

        let alias = index.get(&temp.path().join("alias")).unwrap();
        assert!(alias.is_directory);
        assert_eq!(alias.size, 0);
        assert_eq!(alias.count, 0);

        // The payload is counted once, under the real directory.
        let real_stats = index.get(&real).unwrap();
        assert_eq!(real_stats.size, 16);
        assert_eq!(index.total_size(), 16);
    }

    #[cfg(unix)]
    #[test]
    fn test_live_symlink_resolves_target() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("target.txt"), "12345678").unwrap();
        std::os::unix::fs::symlink(
            temp.path().join("target.txt"),
            temp.path().join("alias"),
        )
        .unwrap();

        let mut scanner = Scanner::new();
        let entries = scanner
            .list_directory(temp.path(), Descend::Flat)
            .unwrap();

        let alias = entries.iter().find(|e| e.name() == "alias").unwrap();
        assert!(alias.exists);
        assert!(alias.is_symlink);
        assert!(alias.is_regular_file);
        assert_eq!(alias.file_size, Some(8));
    }
}
