//! Gauge HTML report generator
//!
//! Turns a suite execution result produced by the Gauge test runner into a
//! static HTML site: an index overview, one page per specification and a
//! client-side search index. The render model below is built once by
//! [`transform`] and only read afterwards.

pub mod config;
pub mod error;
pub mod generator;
pub mod listener;
pub mod logger;
pub mod proto;
pub mod regenerate;
pub mod reporter;
pub mod search;
pub mod shortcut;
pub mod theme;
pub mod transform;

pub use error::ReportError;
pub use generator::{generate_nested_indexes, generate_reports, RenderContext};
pub use search::SearchIndex;

use serde::{Deserialize, Serialize};

/// Outcome of a suite, spec, scenario, step or data-table row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    #[default]
    Pass,
    Fail,
    Skip,
}

impl Status {
    /// CSS class used by the theme for this status
    pub fn css_class(self) -> &'static str {
        match self {
            Status::Pass => "passed",
            Status::Fail => "failed",
            Status::Skip => "skipped",
        }
    }

    /// Sort key placing failures first, then skips, then passes
    pub fn rank(self) -> u8 {
        match self {
            Status::Fail => 0,
            Status::Skip => 1,
            Status::Pass => 2,
        }
    }
}

/// Pass/fail/skip counters shown in overviews and spec headers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub total: usize,
    pub failed: usize,
    pub passed: usize,
    pub skipped: usize,
}

/// One test run
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct SuiteResult {
    pub project_name: String,
    pub environment: String,
    /// Tag expression the run was filtered with (may be empty)
    pub tags: String,
    /// Percentage of passing specs (0-100)
    pub success_rate: f32,
    /// Total run time, formatted `HH:MM:SS`
    pub execution_time: String,
    /// Human readable generation timestamp supplied by the runner
    pub timestamp: String,
    /// Spec counts: `passed = total - failed - skipped`
    pub summary: Summary,
    /// Scenario counts summed over all specs
    pub scenario_summary: Summary,
    pub pre_hook_failure: Option<HookFailure>,
    pub post_hook_failure: Option<HookFailure>,
    pub spec_results: Vec<SpecResult>,
}

/// One specification
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct SpecResult {
    pub heading: String,
    /// Source file path as reported by the runner
    pub file_name: String,
    /// Page name relative to the report directory, e.g. `specs/login.html`
    pub report_file: String,
    pub tags: Vec<String>,
    pub execution_time: String,
    /// Raw run time, summed for directory overviews
    pub execution_ms: i64,
    pub status: Status,
    pub spec: Spec,
}

/// Body of a specification
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Spec {
    pub comments_before_table: Vec<Comment>,
    pub data_table: Option<Table>,
    pub comments_after_table: Vec<Comment>,
    pub scenarios: Vec<Scenario>,
    pub pre_hook_failures: Vec<HookFailure>,
    pub post_hook_failures: Vec<HookFailure>,
    pub errors: Vec<BuildError>,
    pub is_table_driven: bool,
    pub scenario_summary: Summary,
}

/// One scenario, possibly bound to a data-table row
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scenario {
    pub heading: String,
    pub execution_time: String,
    pub tags: Vec<String>,
    pub status: Status,
    /// Reasons the runner gave for skipping the scenario
    pub skip_errors: Vec<String>,
    /// Row of the spec data table this scenario ran against, `-1` otherwise
    pub table_row_index: i32,
    pub contexts: Vec<Item>,
    pub items: Vec<Item>,
    pub teardowns: Vec<Item>,
    pub pre_hook_failure: Option<HookFailure>,
    pub post_hook_failure: Option<HookFailure>,
}

impl Default for Scenario {
    fn default() -> Self {
        Self {
            heading: String::new(),
            execution_time: String::new(),
            tags: Vec::new(),
            status: Status::Pass,
            skip_errors: Vec::new(),
            table_row_index: -1,
            contexts: Vec::new(),
            items: Vec::new(),
            teardowns: Vec::new(),
            pre_hook_failure: None,
            post_hook_failure: None,
        }
    }
}

/// Element of a scenario or concept body
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Item {
    Step(Step),
    Comment(Comment),
    Concept(Concept),
}

/// One executed step
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Step {
    pub fragments: Vec<Fragment>,
    pub result: StepResult,
    pub pre_hook_failure: Option<HookFailure>,
    pub post_hook_failure: Option<HookFailure>,
}

/// Composite step expanding to nested items
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Concept {
    /// Header step; its result is the concept's aggregate result
    pub step: Step,
    pub items: Vec<Item>,
}

/// Narrative line inside a spec or scenario
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub text: String,
}

/// Part of a step sentence
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum Fragment {
    Text {
        text: String,
    },
    StaticParam {
        text: String,
    },
    DynamicParam {
        text: String,
    },
    /// File parameter shown behind a modal link
    SpecialString {
        name: String,
        text: String,
        file_name: String,
    },
    /// CSV/table file parameter shown behind a modal link
    SpecialTable {
        name: String,
        table: Table,
        file_name: String,
    },
    InlineTable {
        table: Table,
    },
    /// Special string whose value spans several lines
    Multiline {
        text: String,
    },
}

/// Tabular data
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Row>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Row {
    pub cells: Vec<String>,
    pub status: Status,
}

/// Outcome of a step
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct StepResult {
    pub status: Status,
    /// Failure message
    pub message: String,
    pub stack_trace: String,
    /// Base64 encoded PNG
    pub screenshot: String,
    pub execution_time: String,
    pub skipped_reason: String,
    /// Custom messages written by the step implementation
    pub messages: Vec<String>,
}

/// Failure of a before/after hook
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct HookFailure {
    /// Label such as `BeforeSuite` or `AfterScenario`
    pub hook_name: String,
    pub error_message: String,
    /// Base64 encoded PNG
    pub screenshot: String,
    pub stack_trace: String,
    pub table_row_index: i32,
}

/// Hook scopes, displayed as the label used in failure headings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hook {
    BeforeSuite,
    AfterSuite,
    BeforeSpec,
    AfterSpec,
    BeforeScenario,
    AfterScenario,
    BeforeStep,
    AfterStep,
}

impl std::fmt::Display for Hook {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Hook::BeforeSuite => write!(f, "BeforeSuite"),
            Hook::AfterSuite => write!(f, "AfterSuite"),
            Hook::BeforeSpec => write!(f, "BeforeSpec"),
            Hook::AfterSpec => write!(f, "AfterSpec"),
            Hook::BeforeScenario => write!(f, "BeforeScenario"),
            Hook::AfterScenario => write!(f, "AfterScenario"),
            Hook::BeforeStep => write!(f, "BeforeStep"),
            Hook::AfterStep => write!(f, "AfterStep"),
        }
    }
}

/// Parse or validation error reported for a spec file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildError {
    pub kind: BuildErrorKind,
    pub file_name: String,
    pub line_number: i32,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BuildErrorKind {
    Parse,
    Validation,
}

impl std::fmt::Display for BuildError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.kind {
            BuildErrorKind::Parse => write!(f, "[Parse Error] {}", self.message),
            BuildErrorKind::Validation => write!(f, "[Validation Error] {}", self.message),
        }
    }
}
