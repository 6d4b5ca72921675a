pub mod run;
pub mod sweep;

use crate::error::Result;
use std::path::Path;

/// Creates the parent directory of an output file if it does not exist yet.
pub(crate) fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}
