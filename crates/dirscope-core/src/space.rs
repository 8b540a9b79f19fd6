//! Volume space information.

use serde::{Deserialize, Serialize};

/// Byte counts for the volume containing a path.
///
/// Always recomputed on demand, never cached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpaceInfo {
    /// Total capacity of the volume.
    pub capacity: u64,
    /// Free bytes on the volume.
    pub free: u64,
    /// Bytes available to the calling process.
    pub available: u64,
}

impl SpaceInfo {
    /// Fraction of the volume in use, in `0.0..=1.0`.
    pub fn used_ratio(&self) -> f64 {
        if self.capacity == 0 {
            return 0.0;
        }
        1.0 - (self.available as f64 / self.capacity as f64)
    }
}
