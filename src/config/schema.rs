//! Settings schema

use std::path::PathBuf;

/// What the runner asked the plugin to do (`html-report_action`)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PluginAction {
    /// Project setup; nothing to do for this plugin
    Setup,
    /// A run is starting: connect and wait for the suite result
    Execution,
}

impl PluginAction {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "setup" => Some(PluginAction::Setup),
            "execution" => Some(PluginAction::Execution),
            _ => None,
        }
    }
}

/// Report settings resolved from the environment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Base output directory; reports go to `<reports_dir>/html-report`
    pub reports_dir: PathBuf,

    /// Reuse `html-report/` instead of a timestamped subdirectory per run
    pub overwrite_reports: bool,

    /// Place a regeneration shortcut beside the report
    pub save_execution_result: bool,

    /// Also write an overview page for every spec directory
    pub use_nested_specs: bool,

    /// Theme directory override
    pub theme_path: Option<PathBuf>,

    /// Project root; spec page names are relative to it
    pub project_root: Option<PathBuf>,

    /// Largest accepted listener message, in megabytes
    pub max_message_size_mb: u64,

    /// Port the runner listens on for this plugin
    pub plugin_connection_port: Option<u16>,

    pub action: Option<PluginAction>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            reports_dir: PathBuf::from(super::DEFAULT_REPORTS_DIR),
            overwrite_reports: false,
            save_execution_result: true,
            use_nested_specs: false,
            theme_path: None,
            project_root: None,
            max_message_size_mb: super::DEFAULT_MAX_MESSAGE_SIZE_MB,
            plugin_connection_port: None,
            action: None,
        }
    }
}
