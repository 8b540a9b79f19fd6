//! Volume space queries.

use std::path::Path;

use sysinfo::Disks;
use tracing::debug;

use dirscope_core::{OperationError, SpaceInfo};

/// Space information for the volume containing `path`.
///
/// The disk list is refreshed on every call; results are never cached.
/// Fails when the path does not resolve, or when no mounted volume's
/// mount point is a prefix of the resolved path.
pub fn space_info(path: &Path) -> Result<SpaceInfo, OperationError> {
    let resolved = path
        .canonicalize()
        .map_err(|e| OperationError::io(path, &e))?;

    let disks = Disks::new_with_refreshed_list();
    let disk = disks
        .iter()
        .filter(|d| resolved.starts_with(d.mount_point()))
        .max_by_key(|d| d.mount_point().as_os_str().len())
        .ok_or_else(|| OperationError::NoVolume {
            path: resolved.clone(),
        })?;

    debug!(
        path = %resolved.display(),
        mount = %disk.mount_point().display(),
        "resolved containing volume"
    );

    // The OS does not report root-reserved blocks separately here, so
    // free and available coincide.
    Ok(SpaceInfo {
        capacity: disk.total_space(),
        free: disk.available_space(),
        available: disk.available_space(),
    })
}
