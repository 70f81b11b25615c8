//! Regeneration shortcut placed beside a report
//!
//! On unix the report directory gets a symlink to the plugin executable; on
//! windows a batch file forwarding its arguments. Running it with
//! `--input <last_run_result> --output <dir>` rebuilds the report.

use crate::ReportError;
use std::path::{Path, PathBuf};

/// Create the shortcut for `executable` inside `report_dir` and return its path
pub fn create_shortcut(executable: &Path, report_dir: &Path) -> Result<PathBuf, ReportError> {
    let name = executable.file_name().ok_or_else(|| {
        let err = std::io::Error::new(std::io::ErrorKind::InvalidInput, "no file name");
        ReportError::io("Invalid executable path", executable, err)
    })?;
    let target = report_dir.join(name);
    link(executable, &target)
}

#[cfg(unix)]
fn link(executable: &Path, target: &Path) -> Result<PathBuf, ReportError> {
    if target.symlink_metadata().is_ok() {
        std::fs::remove_file(target).map_err(|e| ReportError::io("Failed to remove", target, e))?;
    }
    std::os::unix::fs::symlink(executable, target)
        .map_err(|e| ReportError::io("Failed to create symlink", target, e))?;
    Ok(target.to_path_buf())
}

#[cfg(windows)]
fn link(executable: &Path, target: &Path) -> Result<PathBuf, ReportError> {
    let bat = target.with_extension("bat");
    let content = format!("@echo off \n{} %*", executable.display());
    std::fs::write(&bat, content).map_err(|e| ReportError::io("Failed to write", &bat, e))?;
    Ok(bat)
}

#[cfg(not(any(unix, windows)))]
fn link(_executable: &Path, target: &Path) -> Result<PathBuf, ReportError> {
    let err = std::io::Error::new(std::io::ErrorKind::Unsupported, "no shortcut support on this platform");
    Err(ReportError::io("Failed to create shortcut", target, err))
}
