//! PID marker for external stop scripts

use std::{fs, io::ErrorKind, path::Path};

use tracing::info;

use crate::error::ReminderError;

/// Write the current process id as plain decimal text
pub fn write_pid_file(path: &Path) -> Result<(), ReminderError> {
    fs::write(path, std::process::id().to_string())
        .map_err(|e| ReminderError::persistence("write PID file", path, e))?;
    info!("PID file written: {}", path.display());
    Ok(())
}

/// Remove the marker; a file that is already gone is not an error
pub fn remove_pid_file(path: &Path) -> Result<(), ReminderError> {
    match fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
        Err(e) => Err(ReminderError::persistence("remove PID file", path, e)),
    }
}
