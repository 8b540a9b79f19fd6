//! Core types for dirscope.
//!
//! This crate provides the fundamental data structures used throughout
//! the dirscope ecosystem: directory entries, aggregation rows, volume
//! space information and the operation error model.

mod entry;
mod error;
mod options;
mod space;
mod stats;

pub use entry::{DirectoryEntry, PermClass, Permissions};
pub use error::{ErrorClass, LastError, OperationError, PlatformError};
pub use options::{ScanOptions, ScanOptionsBuilder};
pub use space::SpaceInfo;
pub use stats::{AggregationIndex, DirectoryStats};
