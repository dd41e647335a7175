//! Advisory-locked file access.
//!
//! Parallel CI jobs on one agent may share a workspace, so the execution id
//! file is read under a shared `fs2` lock and written under an exclusive one.

use fs2::FileExt;
use std::fs::{File, OpenOptions};
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use crate::error::{Result, TestraError};

fn io_error(path: &Path) -> impl FnOnce(std::io::Error) -> TestraError + '_ {
    move |source| TestraError::Io {
        path: path.display().to_string(),
        source,
    }
}

/// Read file contents with a shared (read) lock.
pub fn locked_read(path: &Path) -> Result<String> {
    let file = File::open(path).map_err(io_error(path))?;
    file.lock_shared().map_err(io_error(path))?;
    let mut content = String::new();
    BufReader::new(&file)
        .read_to_string(&mut content)
        .map_err(io_error(path))?;
    Ok(content)
}

/// Write file contents with an exclusive (write) lock.
///
/// The file is truncated only after the lock is held, so a concurrent reader
/// never observes it empty.
pub fn locked_write(path: &Path, content: &str) -> Result<()> {
    #[allow(clippy::suspicious_open_options)]
    let file = OpenOptions::new()
        .write(true)
        .create(true)
        .open(path)
        .map_err(io_error(path))?;
    file.lock_exclusive().map_err(io_error(path))?;
    file.set_len(0).map_err(io_error(path))?;
    let mut writer = BufWriter::new(&file);
    writer
        .write_all(content.as_bytes())
        .map_err(io_error(path))?;
    writer.flush().map_err(io_error(path))?;
    Ok(())
}
