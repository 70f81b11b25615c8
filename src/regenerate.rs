//! Offline regeneration from a saved execution result

use crate::generator::{create_report, RenderContext};
use crate::proto::decode_snapshot;
use crate::ReportError;
use std::fs;
use std::path::{Path, PathBuf};

/// File the runner writes after each run when results are saved
pub const LAST_RUN_RESULT: &str = "last_run_result";

/// Rebuild a report from the snapshot at `input` into `output`.
/// Spec page names are made relative to `project_root`.
pub fn regenerate(
    input: &Path,
    output: &Path,
    theme: &Path,
    project_root: &Path,
) -> Result<PathBuf, ReportError> {
    let bytes = fs::read(input).map_err(|e| ReportError::io("Unable to read last run data from", input, e))?;
    let psr = decode_snapshot(&bytes)?;
    tracing::debug!("Read {} bytes of execution result from {}", bytes.len(), input.display());
    let ctx = RenderContext {
        project_root: project_root.to_path_buf(),
        theme_path: theme.to_path_buf(),
        overwrite: true,
        ..Default::default()
    };
    create_report(&psr, output, &ctx)
}
