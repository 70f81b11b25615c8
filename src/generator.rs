//! Report driver: writes the pages and the search index of one run
//!
//! Output order is fixed: `index.html`, spec pages in input order, then
//! `js/search_index.js`. Each page is rendered in memory and written in
//! one call.

use crate::proto::ProtoSuiteResult;
use crate::reporter::HtmlReporter;
use crate::search::SearchIndex;
use crate::{theme, transform, ReportError, SuiteResult};
use chrono::{DateTime, Local};
use std::fs;
use std::path::{Path, PathBuf};

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H.%M.%S";

/// Inputs shared by every step of a report run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderContext {
    /// Spec page names are made relative to this directory
    pub project_root: PathBuf,
    /// Theme whose assets are copied next to the pages
    pub theme_path: PathBuf,
    /// Reuse one report directory instead of one per run
    pub overwrite: bool,
    /// Write `<dir>/index.html` for every directory holding spec pages
    pub nested_index: bool,
}

impl RenderContext {
    /// `<reports_root>/html-report`, plus a timestamped subdirectory unless
    /// reports are overwritten
    pub fn report_dir(&self, reports_root: &Path, now: DateTime<Local>) -> PathBuf {
        let dir = reports_root.join(crate::config::HTML_REPORT_DIR);
        if self.overwrite {
            dir
        } else {
            dir.join(now.format(TIMESTAMP_FORMAT).to_string())
        }
    }
}

fn create_dir(path: &Path) -> Result<(), ReportError> {
    fs::create_dir_all(path).map_err(|e| ReportError::io("Failed to create directory", path, e))
}

fn write_page(path: &Path, html: &str) -> Result<(), ReportError> {
    fs::write(path, html).map_err(|e| ReportError::io("Failed to write", path, e))
}

/// Write one overview page per spec directory. Skipped when the suite
/// failed before any spec ran.
pub fn generate_nested_indexes(res: &SuiteResult, report_dir: &Path) -> Result<(), ReportError> {
    if res.pre_hook_failure.is_some() {
        return Ok(());
    }
    let reporter = HtmlReporter::new(res);
    for dir in transform::spec_dirs(res) {
        let nested = transform::to_nested_suite_result(&dir, res);
        let dir_path = report_dir.join(&dir);
        create_dir(&dir_path)?;
        let path = dir_path.join("index.html");
        write_page(&path, &reporter.nested_index_page(&nested, &dir))?;
        tracing::debug!("Wrote {}", path.display());
    }
    Ok(())
}

/// Write all pages and the search index for `res` into `report_dir`.
/// Returns the report directory.
pub fn generate_reports(res: &SuiteResult, report_dir: &Path) -> Result<PathBuf, ReportError> {
    create_dir(report_dir)?;
    let reporter = HtmlReporter::new(res);

    write_page(&report_dir.join("index.html"), &reporter.index_page())?;
    for spec in &res.spec_results {
        let path = report_dir.join(&spec.report_file);
        if let Some(parent) = path.parent() {
            create_dir(parent)?;
        }
        write_page(&path, &reporter.spec_page(spec))?;
        tracing::debug!("Wrote {}", path.display());
    }

    SearchIndex::build(res).write(report_dir)?;
    Ok(report_dir.to_path_buf())
}

/// Full pipeline for one suite result: transform, render, copy theme assets
pub fn create_report(
    psr: &ProtoSuiteResult,
    report_dir: &Path,
    ctx: &RenderContext,
) -> Result<PathBuf, ReportError> {
    // fail before writing anything when the theme is unusable
    theme::assets_dir(&ctx.theme_path)?;

    let res = transform::to_suite_result(&ctx.project_root, psr);
    tracing::debug!("Transformed SuiteResult to report structure");
    let dir = generate_reports(&res, report_dir)?;
    if ctx.nested_index {
        generate_nested_indexes(&res, &dir)?;
    }
    theme::copy_assets(&ctx.theme_path, &dir)?;
    tracing::info!(
        "Successfully generated html-report to => {}",
        dir.join("index.html").display()
    );
    Ok(dir)
}
