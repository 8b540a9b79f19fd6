//! Filesystem traversal and size-aggregation engine for dirscope.
//!
//! # Overview
//!
//! `dirscope-scan` walks directories and reduces each immediate child of
//! a scan root to one rollup row. Key behaviors:
//!
//! - **One traversal function** parameterized by a [`Descend`] policy
//!   (flat or recursive), no duplicated walk logic
//! - **Tolerant of expected failures**: vanished entries are recorded
//!   with `exists = false`, unreadable directories are skipped
//!   mid-recursion; anything else aborts the call
//! - **Synchronous**: every scan is a fresh pass on the calling thread
//!
//! # Example
//!
//! ```rust,no_run
//! use dirscope_scan::{Descend, Scanner};
//!
//! let mut scanner = Scanner::new();
//! let index = scanner.aggregate_sizes("/path/to/scan".as_ref()).unwrap();
//!
//! for (path, stats) in index.sorted_by_size() {
//!     println!("{}: {} bytes ({} entries)", path.display(), stats.size, stats.count);
//! }
//! println!("Total: {} bytes", index.total_size());
//! ```

mod scanner;
mod volume;

pub use scanner::{Descend, Scanner};

// Re-export core types for convenience
pub use dirscope_core::{
    AggregationIndex, DirectoryEntry, DirectoryStats, ErrorClass, LastError, OperationError,
    Permissions, ScanOptions, SpaceInfo,
};
