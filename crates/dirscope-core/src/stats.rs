//! Aggregation rollup types.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Rollup statistics for one immediate child of a scan root.
///
/// For a directory child, `size` and `count` cover the entire subtree;
/// for a leaf file, `count` is 1. Created once per child during a single
/// aggregation call and immutable afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectoryStats {
    /// Whether the child is a directory.
    pub is_directory: bool,
    /// Cumulative size of descendant regular files, in bytes.
    pub size: u64,
    /// Number of descendant entries, or 1 for a leaf file.
    pub count: u64,
}

/// Mapping from a scan root's immediate children to their rollup rows.
///
/// Keys are only ever direct children of the scanned root; the entire
/// contents of a subdirectory fold into that one child's row.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AggregationIndex {
    rows: HashMap<PathBuf, DirectoryStats>,
    total_size: u64,
}

impl AggregationIndex {
    /// Create an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a row for one child, accumulating its size into the total.
    pub fn insert(&mut self, path: PathBuf, stats: DirectoryStats) {
        debug_assert!(!self.rows.contains_key(&path), "duplicate child row");
        self.total_size += stats.size;
        self.rows.insert(path, stats);
    }

    /// Row for a specific child, if present.
    pub fn get(&self, path: &Path) -> Option<&DirectoryStats> {
        self.rows.get(path)
    }

    /// Iterate over all rows.
    pub fn iter(&self) -> impl Iterator<Item = (&PathBuf, &DirectoryStats)> {
        self.rows.iter()
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the index has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Sum of all row sizes.
    pub fn total_size(&self) -> u64 {
        self.total_size
    }

    /// Rows ordered largest first, ties broken by path for stability.
    pub fn sorted_by_size(&self) -> Vec<(&PathBuf, &DirectoryStats)> {
        let mut rows: Vec<_> = self.rows.iter().collect();
        rows.sort_by(|(pa, a), (pb, b)| b.size.cmp(&a.size).then_with(|| pa.cmp(pb)));
        rows
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(is_directory: bool, size: u64, count: u64) -> DirectoryStats {
        DirectoryStats {
            is_directory,
            size,
            count,
        }
    }

    #[test]
    fn test_empty_index() {
        let index = AggregationIndex::new();
        assert!(index.is_empty());
        assert_eq!(index.total_size(), 0);
    }

    #[test]
    fn test_insert_accumulates_total() {
        let mut index = AggregationIndex::new();
        index.insert(PathBuf::from("/root/a"), row(true, 60, 3));
        index.insert(PathBuf::from("/root/b.txt"), row(false, 42, 1));
        index.insert(PathBuf::from("/root/empty"), row(true, 0, 0));

        assert_eq!(index.len(), 3);
        assert_eq!(index.total_size(), 102);
        assert_eq!(
            index.get(Path::new("/root/b.txt")),
            Some(&row(false, 42, 1))
        );

        // Total always equals the sum over the rows.
        let sum: u64 = index.iter().map(|(_, s)| s.size).sum();
        assert_eq!(index.total_size(), sum);
    }

    #[test]
    fn test_sorted_by_size_descending() {
        let mut index = AggregationIndex::new();
        index.insert(PathBuf::from("/r/small"), row(false, 1, 1));
        index.insert(PathBuf::from("/r/big"), row(true, 100, 7));
        index.insert(PathBuf::from("/r/mid"), row(false, 50, 1));

        let sorted = index.sorted_by_size();
        let sizes: Vec<u64> = sorted.iter().map(|(_, s)| s.size).collect();
        assert_eq!(sizes, vec![100, 50, 1]);
    }
}
