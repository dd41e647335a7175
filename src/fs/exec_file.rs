//! The `testra.exec` file: the execution id as plain text, so later CI steps
//! can adopt the execution created by an earlier one.

use std::path::Path;
use tracing::info;

use super::locking::{locked_read, locked_write};
use crate::error::{Result, TestraError};

/// Write `execution_id` to `path`, creating or overwriting the file.
pub fn write_execution_id(path: &Path, execution_id: &str) -> Result<()> {
    if execution_id.trim().is_empty() {
        return Err(TestraError::InvalidArgument(
            "refusing to write an empty execution id".to_string(),
        ));
    }
    let existed = path.exists();
    locked_write(path, execution_id)?;
    info!(
        path = %path.display(),
        overwritten = existed,
        "wrote execution id file"
    );
    Ok(())
}

/// Read a previously written execution id. A missing or blank file yields `None`.
pub fn read_execution_id(path: &Path) -> Result<Option<String>> {
    if !path.exists() {
        return Ok(None);
    }
    let content = locked_read(path)?;
    let id = content.trim();
    Ok((!id.is_empty()).then(|| id.to_string()))
}
