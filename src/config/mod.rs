//! Report settings from the plugin environment
//!
//! The runner passes everything through environment variables. They are
//! read through a lookup function so callers (and tests) decide where the
//! values come from.

mod schema;

pub use schema::{PluginAction, Settings};

use crate::generator::RenderContext;
use std::path::{Path, PathBuf};

pub const REPORTS_DIR_ENV: &str = "GAUGE_REPORTS_DIR";
pub const OVERWRITE_REPORTS_ENV: &str = "overwrite_reports";
pub const SAVE_EXECUTION_RESULT_ENV: &str = "save_execution_result";
pub const USE_NESTED_SPECS_ENV: &str = "use_nested_specs";
pub const THEME_PATH_ENV: &str = "GAUGE_HTML_REPORT_THEME_PATH";
pub const PROJECT_ROOT_ENV: &str = "GAUGE_PROJECT_ROOT";
pub const MAX_MESSAGE_SIZE_ENV: &str = "GAUGE_MAX_MESSAGE_SIZE";
pub const PORT_ENV: &str = "plugin_connection_port";
pub const ACTION_ENV: &str = "html-report_action";

pub const DEFAULT_REPORTS_DIR: &str = "reports";
pub const DEFAULT_MAX_MESSAGE_SIZE_MB: u64 = 1024;

/// Directory under the reports dir that holds this plugin's output
pub const HTML_REPORT_DIR: &str = "html-report";

impl Settings {
    /// Build settings from a variable lookup. Missing or malformed values
    /// fall back to their defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let value = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        let defaults = Settings::default();

        Settings {
            reports_dir: value(REPORTS_DIR_ENV)
                .map(PathBuf::from)
                .unwrap_or(defaults.reports_dir),
            overwrite_reports: value(OVERWRITE_REPORTS_ENV)
                .map(|v| v.trim().eq_ignore_ascii_case("true"))
                .unwrap_or(defaults.overwrite_reports),
            save_execution_result: value(SAVE_EXECUTION_RESULT_ENV)
                .map(|v| !v.trim().eq_ignore_ascii_case("false"))
                .unwrap_or(defaults.save_execution_result),
            use_nested_specs: value(USE_NESTED_SPECS_ENV)
                .map(|v| v.trim().eq_ignore_ascii_case("true"))
                .unwrap_or(defaults.use_nested_specs),
            theme_path: value(THEME_PATH_ENV).map(PathBuf::from),
            project_root: value(PROJECT_ROOT_ENV).map(PathBuf::from),
            max_message_size_mb: value(MAX_MESSAGE_SIZE_ENV)
                .and_then(|v| v.trim().parse::<u64>().ok())
                .filter(|mb| *mb > 0)
                .unwrap_or(defaults.max_message_size_mb),
            plugin_connection_port: value(PORT_ENV).and_then(|v| v.trim().parse().ok()),
            action: value(ACTION_ENV).and_then(|v| PluginAction::parse(&v)),
        }
    }

    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Largest listener frame in bytes
    pub fn max_message_bytes(&self) -> u64 {
        self.max_message_size_mb.saturating_mul(1024 * 1024)
    }

    /// Configured project root, else the current directory
    pub fn project_root(&self) -> PathBuf {
        match &self.project_root {
            Some(root) => root.clone(),
            None => std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
        }
    }

    /// Base output directory, resolved against the project root when relative
    pub fn reports_root(&self) -> PathBuf {
        if self.reports_dir.is_absolute() {
            self.reports_dir.clone()
        } else {
            self.project_root().join(&self.reports_dir)
        }
    }

    pub fn render_context(&self, theme_path: &Path) -> RenderContext {
        RenderContext {
            project_root: self.project_root(),
            theme_path: theme_path.to_path_buf(),
            overwrite: self.overwrite_reports,
            nested_index: self.use_nested_specs,
        }
    }
}
