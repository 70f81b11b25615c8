//! Theme lookup and asset copying
//!
//! A theme directory carries an `assets/` tree (css, js, images, fonts)
//! that is mirrored into every generated report.

use crate::ReportError;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

const ASSETS_DIR: &str = "assets";

/// Theme shipped with the plugin
pub fn default_theme_path(plugins_dir: &Path) -> PathBuf {
    plugins_dir.join("themes").join("default")
}

/// Explicit path first, then the configured one, then the bundled default
pub fn resolve_theme_path(
    explicit: Option<&Path>,
    configured: Option<&Path>,
    plugins_dir: &Path,
) -> PathBuf {
    explicit
        .or(configured)
        .map(Path::to_path_buf)
        .unwrap_or_else(|| default_theme_path(plugins_dir))
}

/// Install directory of the running plugin: the parent of the directory
/// holding the (symlink-resolved) executable
pub fn plugin_dir_from_exe() -> Option<PathBuf> {
    let exe = std::env::current_exe().ok()?;
    let exe = fs::canonicalize(&exe).unwrap_or(exe);
    exe.parent()?.parent().map(Path::to_path_buf)
}

/// `<theme>/assets`, or an error when the theme is missing
pub fn assets_dir(theme: &Path) -> Result<PathBuf, ReportError> {
    let assets = theme.join(ASSETS_DIR);
    if !assets.is_dir() {
        return Err(ReportError::ThemeNotFound(theme.to_path_buf()));
    }
    Ok(assets)
}

/// Mirror `<theme>/assets` into `report_dir`. Existing files are
/// overwritten; returns the number of files copied.
pub fn copy_assets(theme: &Path, report_dir: &Path) -> Result<usize, ReportError> {
    let assets = assets_dir(theme)?;
    let mut copied = 0;
    for entry in WalkDir::new(&assets).follow_links(true).min_depth(1) {
        let entry = entry.map_err(|e| {
            let path = e.path().unwrap_or(&assets).to_path_buf();
            ReportError::io("Failed to read theme", path, e.into())
        })?;
        let Ok(relative) = entry.path().strip_prefix(&assets) else {
            continue;
        };
        let target = report_dir.join(relative);
        if entry.file_type().is_dir() {
            fs::create_dir_all(&target)
                .map_err(|e| ReportError::io("Failed to create directory", &target, e))?;
        } else {
            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent)
                    .map_err(|e| ReportError::io("Failed to create directory", parent, e))?;
            }
            fs::copy(entry.path(), &target)
                .map_err(|e| ReportError::io("Failed to copy", entry.path(), e))?;
            copied += 1;
        }
    }
    tracing::debug!("Copied {} theme files from {}", copied, assets.display());
    Ok(copied)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn theme_with_assets() -> TempDir {
        let theme = TempDir::new().unwrap();
        let assets = theme.path().join("assets");
        fs::create_dir_all(assets.join("css")).unwrap();
        fs::create_dir_all(assets.join("js")).unwrap();
        fs::create_dir_all(assets.join("images/icons")).unwrap();
        fs::write(assets.join("css/style.css"), "body{}").unwrap();
        fs::write(assets.join("js/main.js"), "// main").unwrap();
        fs::write(assets.join("images/icons/pass.svg"), "<svg/>").unwrap();
        theme
    }

    #[test]
    fn resolve_prefers_explicit_then_configured() {
        let plugins = Path::new("/plugins/html-report");
        assert_eq!(
            resolve_theme_path(Some(Path::new("/a")), Some(Path::new("/b")), plugins),
            PathBuf::from("/a")
        );
        assert_eq!(
            resolve_theme_path(None, Some(Path::new("/b")), plugins),
            PathBuf::from("/b")
        );
        assert_eq!(
            resolve_theme_path(None, None, plugins),
            PathBuf::from("/plugins/html-report/themes/default")
        );
    }

    #[test]
    fn copy_assets_mirrors_tree() {
        let theme = theme_with_assets();
        let report = TempDir::new().unwrap();
        let copied = copy_assets(theme.path(), report.path()).unwrap();
        assert_eq!(copied, 3);
        assert_eq!(fs::read_to_string(report.path().join("css/style.css")).unwrap(), "body{}");
        assert!(report.path().join("js/main.js").is_file());
        assert!(report.path().join("images/icons/pass.svg").is_file());
    }

    #[test]
    fn copy_assets_keeps_generated_files() {
        let theme = theme_with_assets();
        let report = TempDir::new().unwrap();
        fs::create_dir_all(report.path().join("js")).unwrap();
        fs::write(report.path().join("js/search_index.js"), "var index = {};").unwrap();
        copy_assets(theme.path(), report.path()).unwrap();
        assert!(report.path().join("js/search_index.js").is_file());
        assert!(report.path().join("js/main.js").is_file());
    }

    #[test]
    fn missing_theme_is_an_error() {
        let missing = TempDir::new().unwrap().path().join("nope");
        let report = TempDir::new().unwrap();
        let err = copy_assets(&missing, report.path()).unwrap_err();
        assert!(matches!(err, ReportError::ThemeNotFound(_)));
        assert!(err.to_string().contains("nope"));
    }
}
