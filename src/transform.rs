//! Projection of runner messages into the render model
//!
//! Every function here is pure: no I/O and no failure modes. Missing
//! optional fields fall back to their zero values.

use crate::proto::{
    self, ErrorType, ExecutionStatus, FragmentType, ItemType, ParameterType, ProtoComment,
    ProtoConcept, ProtoExecutionResult, ProtoHookFailure, ProtoItem, ProtoScenario, ProtoSpec,
    ProtoSpecResult, ProtoStep, ProtoStepExecutionResult, ProtoSuiteResult, ProtoTable,
};
use crate::{
    BuildError, BuildErrorKind, Comment, Concept, Fragment, Hook, HookFailure, Item, Row,
    Scenario, Spec, SpecResult, Status, Step, StepResult, SuiteResult, Summary, Table,
};
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use chrono::DateTime;
use std::path::{Component, Path};

/// Format a duration in milliseconds as `HH:MM:SS` (UTC clock from epoch)
pub fn format_time(ms: i64) -> String {
    DateTime::from_timestamp_millis(ms)
        .map(|t| t.format("%H:%M:%S").to_string())
        .unwrap_or_else(|| "00:00:00".to_string())
}

/// Page name for a spec source file: path relative to the project root,
/// `/` separated, extension replaced by `.html`. Characters that are not
/// valid in file names become `_`. Only normal components are kept, so the
/// page always lands inside the report directory.
pub fn to_html_file_name(spec_path: &str, project_root: &Path) -> String {
    let path = Path::new(spec_path);
    let relative = if project_root.as_os_str().is_empty() {
        path
    } else {
        match path.strip_prefix(project_root) {
            Ok(rel) => rel,
            Err(_) => path.file_name().map(Path::new).unwrap_or(path),
        }
    };

    let with_ext = relative.with_extension("html");
    let parts: Vec<String> = with_ext
        .components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(sanitize_file_name(&part.to_string_lossy())),
            _ => None,
        })
        .collect();
    parts.join("/")
}

fn sanitize_file_name(part: &str) -> String {
    part.chars()
        .map(|c| match c {
            '<' | '>' | ':' | '"' | '|' | '?' | '*' | '\\' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect()
}

/// Build the render model for a whole run
pub fn to_suite_result(project_root: &Path, psr: &ProtoSuiteResult) -> SuiteResult {
    let spec_results: Vec<SpecResult> = psr
        .spec_results
        .iter()
        .map(|r| to_spec_result(project_root, r))
        .collect();

    let total = spec_results.len();
    // counts from the runner are capped so they always add up to total
    let failed = usize::try_from(psr.specs_failed_count).unwrap_or(0).min(total);
    let skipped = usize::try_from(psr.specs_skipped_count)
        .unwrap_or(0)
        .min(total - failed);
    let summary = Summary {
        total,
        failed,
        skipped,
        passed: total - failed - skipped,
    };

    let mut scenario_summary = Summary::default();
    for r in &spec_results {
        let s = r.spec.scenario_summary;
        scenario_summary.total += s.total;
        scenario_summary.failed += s.failed;
        scenario_summary.passed += s.passed;
        scenario_summary.skipped += s.skipped;
    }

    SuiteResult {
        project_name: psr.project_name.clone(),
        environment: psr.environment.clone(),
        tags: psr.tags.clone(),
        success_rate: psr.success_rate,
        execution_time: format_time(psr.execution_time),
        timestamp: psr.timestamp.clone(),
        summary,
        scenario_summary,
        pre_hook_failure: to_hook_failure(psr.pre_hook_failure.as_ref(), Hook::BeforeSuite),
        post_hook_failure: to_hook_failure(psr.post_hook_failure.as_ref(), Hook::AfterSuite),
        spec_results,
    }
}

/// Directories holding spec pages, parents before children, in first-seen
/// order. The report root itself is not listed.
pub fn spec_dirs(res: &SuiteResult) -> Vec<String> {
    let mut dirs: Vec<String> = Vec::new();
    for spec in &res.spec_results {
        let mut end = 0;
        while let Some(pos) = spec.report_file[end..].find('/') {
            end += pos;
            let dir = &spec.report_file[..end];
            if !dirs.iter().any(|d| d == dir) {
                dirs.push(dir.to_string());
            }
            end += 1;
        }
    }
    dirs
}

/// Overview of the specs below `dir`. Counts and run time come from those
/// specs alone; project details and suite hook failures are carried over.
pub fn to_nested_suite_result(dir: &str, res: &SuiteResult) -> SuiteResult {
    let prefix = format!("{}/", dir.trim_end_matches('/'));
    let spec_results: Vec<SpecResult> = res
        .spec_results
        .iter()
        .filter(|s| s.report_file.starts_with(&prefix))
        .cloned()
        .collect();

    let mut summary = Summary {
        total: spec_results.len(),
        ..Default::default()
    };
    let mut scenario_summary = Summary::default();
    let mut execution_ms = 0i64;
    for spec in &spec_results {
        match spec.status {
            Status::Fail => summary.failed += 1,
            Status::Skip => summary.skipped += 1,
            Status::Pass => summary.passed += 1,
        }
        let s = spec.spec.scenario_summary;
        scenario_summary.total += s.total;
        scenario_summary.failed += s.failed;
        scenario_summary.passed += s.passed;
        scenario_summary.skipped += s.skipped;
        execution_ms = execution_ms.saturating_add(spec.execution_ms);
    }
    let success_rate = if summary.total == 0 {
        0.0
    } else {
        100.0 * summary.passed as f32 / summary.total as f32
    };

    SuiteResult {
        project_name: res.project_name.clone(),
        environment: res.environment.clone(),
        tags: res.tags.clone(),
        success_rate,
        execution_time: format_time(execution_ms),
        timestamp: res.timestamp.clone(),
        summary,
        scenario_summary,
        pre_hook_failure: res.pre_hook_failure.clone(),
        post_hook_failure: res.post_hook_failure.clone(),
        spec_results,
    }
}

pub fn to_spec_result(project_root: &Path, res: &ProtoSpecResult) -> SpecResult {
    let fallback = ProtoSpec::default();
    let proto_spec = res.proto_spec.as_ref().unwrap_or(&fallback);
    let spec = to_spec(res, proto_spec);

    let has_failure = spec.scenarios.iter().any(|s| s.status == Status::Fail)
        || !spec.pre_hook_failures.is_empty()
        || !spec.post_hook_failures.is_empty()
        || !spec.errors.is_empty();
    let status = if res.failed || has_failure {
        Status::Fail
    } else if res.skipped {
        Status::Skip
    } else {
        Status::Pass
    };

    SpecResult {
        heading: spec_heading(proto_spec),
        file_name: proto_spec.file_name.clone(),
        report_file: to_html_file_name(&proto_spec.file_name, project_root),
        tags: proto_spec.tags.clone(),
        execution_time: format_time(res.execution_time),
        execution_ms: res.execution_time,
        status,
        spec,
    }
}

fn spec_heading(spec: &ProtoSpec) -> String {
    if !spec.spec_heading.trim().is_empty() {
        return spec.spec_heading.clone();
    }
    Path::new(&spec.file_name)
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

fn to_spec(res: &ProtoSpecResult, proto_spec: &ProtoSpec) -> Spec {
    let mut spec = Spec {
        is_table_driven: proto_spec.is_table_driven,
        errors: to_errors(&res.errors),
        ..Default::default()
    };
    if spec.errors.iter().any(|e| e.kind == BuildErrorKind::Parse) {
        return spec;
    }

    let mut table_seen = false;
    for item in &proto_spec.items {
        match item.item_type() {
            ItemType::Comment => {
                let comment = item.comment.as_ref().map(to_comment).unwrap_or_default();
                if table_seen {
                    spec.comments_after_table.push(comment);
                } else {
                    spec.comments_before_table.push(comment);
                }
            }
            ItemType::Table => {
                if let (false, Some(table)) = (table_seen, item.table.as_ref()) {
                    spec.data_table = Some(to_table(table));
                    table_seen = true;
                }
            }
            ItemType::Scenario => {
                if let Some(scenario) = &item.scenario {
                    spec.scenarios.push(to_scenario(scenario, -1));
                }
            }
            ItemType::TableDrivenScenario => {
                if let Some(tds) = &item.table_driven_scenario {
                    if let Some(scenario) = &tds.scenario {
                        spec.scenarios.push(to_scenario(scenario, tds.table_row_index));
                    }
                }
            }
            ItemType::Step | ItemType::Concept | ItemType::Tags => {}
        }
    }

    spec.pre_hook_failures = proto_spec
        .pre_hook_failures
        .iter()
        .filter_map(|f| to_hook_failure(Some(f), Hook::BeforeSpec))
        .collect();
    spec.post_hook_failures = proto_spec
        .post_hook_failures
        .iter()
        .filter_map(|f| to_hook_failure(Some(f), Hook::AfterSpec))
        .collect();

    if spec.is_table_driven {
        compute_table_driven_statuses(&mut spec);
    }
    spec.scenarios.sort_by_key(|s| s.status.rank());
    spec.scenario_summary = scenario_summary(&spec.scenarios);
    spec
}

fn scenario_summary(scenarios: &[Scenario]) -> Summary {
    let mut summary = Summary {
        total: scenarios.len(),
        ..Default::default()
    };
    for s in scenarios {
        match s.status {
            Status::Pass => summary.passed += 1,
            Status::Fail => summary.failed += 1,
            Status::Skip => summary.skipped += 1,
        }
    }
    summary
}

/// Row status of a table-driven spec follows the row-scenarios bound to it.
/// Rows no scenario ran against are skipped.
fn compute_table_driven_statuses(spec: &mut Spec) {
    let Some(table) = spec.data_table.as_mut() else {
        return;
    };
    for row in &mut table.rows {
        row.status = Status::Skip;
    }
    for scenario in &spec.scenarios {
        let Some(row) = row_at(table, scenario.table_row_index) else {
            continue;
        };
        match scenario.status {
            Status::Fail => row.status = Status::Fail,
            Status::Pass if row.status != Status::Fail => row.status = Status::Pass,
            _ => {}
        }
    }
    for hook in spec.pre_hook_failures.iter().chain(&spec.post_hook_failures) {
        if let Some(row) = row_at(table, hook.table_row_index) {
            row.status = Status::Fail;
        }
    }
}

fn row_at(table: &mut Table, index: i32) -> Option<&mut Row> {
    usize::try_from(index).ok().and_then(|i| table.rows.get_mut(i))
}

fn to_errors(errors: &[proto::Error]) -> Vec<BuildError> {
    errors
        .iter()
        .map(|e| BuildError {
            kind: match e.error_type() {
                ErrorType::ParseError => BuildErrorKind::Parse,
                ErrorType::ValidationError => BuildErrorKind::Validation,
            },
            file_name: e.filename.clone(),
            line_number: e.line_number,
            message: e.message.clone(),
        })
        .collect()
}

pub fn to_scenario(scenario: &ProtoScenario, table_row_index: i32) -> Scenario {
    Scenario {
        heading: scenario.scenario_heading.clone(),
        execution_time: format_time(scenario.execution_time),
        tags: scenario.tags.clone(),
        status: scenario_status(scenario),
        skip_errors: scenario.skip_errors.clone(),
        table_row_index,
        contexts: to_items(&scenario.contexts),
        items: to_items(&scenario.scenario_items),
        teardowns: to_items(&scenario.tear_down_steps),
        pre_hook_failure: to_hook_failure(scenario.pre_hook_failure.as_ref(), Hook::BeforeScenario),
        post_hook_failure: to_hook_failure(scenario.post_hook_failure.as_ref(), Hook::AfterScenario),
    }
}

fn scenario_status(scenario: &ProtoScenario) -> Status {
    let status = scenario.execution_status();
    if scenario.failed || status == ExecutionStatus::Failed {
        Status::Fail
    } else if scenario.skipped || status == ExecutionStatus::Skipped {
        Status::Skip
    } else {
        Status::Pass
    }
}

fn to_items(items: &[ProtoItem]) -> Vec<Item> {
    items
        .iter()
        .filter_map(|item| match item.item_type() {
            ItemType::Step => item.step.as_ref().map(|s| Item::Step(to_step(s))),
            ItemType::Comment => item.comment.as_ref().map(|c| Item::Comment(to_comment(c))),
            ItemType::Concept => item.concept.as_ref().map(|c| Item::Concept(to_concept(c))),
            _ => None,
        })
        .collect()
}

pub fn to_comment(comment: &ProtoComment) -> Comment {
    Comment {
        text: comment.text.clone(),
    }
}

pub fn to_step(step: &ProtoStep) -> Step {
    to_step_with_result(step, step.step_execution_result.as_ref())
}

fn to_step_with_result(step: &ProtoStep, outcome: Option<&ProtoStepExecutionResult>) -> Step {
    let fallback = ProtoExecutionResult::default();
    let execution = outcome
        .and_then(|o| o.execution_result.as_ref())
        .unwrap_or(&fallback);
    let skipped = outcome.is_some_and(|o| o.skipped);

    let status = if execution.failed {
        Status::Fail
    } else if skipped {
        Status::Skip
    } else {
        Status::Pass
    };
    let skipped_reason = match outcome {
        Some(o) if skipped => o.skipped_reason.clone(),
        _ => String::new(),
    };

    Step {
        fragments: to_fragments(&step.fragments),
        result: StepResult {
            status,
            message: execution.error_message.clone(),
            stack_trace: execution.stack_trace.clone(),
            screenshot: to_screenshot(&execution.screen_shot),
            execution_time: format_time(execution.execution_time),
            skipped_reason,
            messages: execution.message.clone(),
        },
        pre_hook_failure: to_hook_failure(
            outcome.and_then(|o| o.pre_hook_failure.as_ref()),
            Hook::BeforeStep,
        ),
        post_hook_failure: to_hook_failure(
            outcome.and_then(|o| o.post_hook_failure.as_ref()),
            Hook::AfterStep,
        ),
    }
}

/// The concept header takes the concept's aggregate result
pub fn to_concept(concept: &ProtoConcept) -> Concept {
    let fallback = ProtoStep::default();
    let step = concept.concept_step.as_ref().unwrap_or(&fallback);
    Concept {
        step: to_step_with_result(step, concept.concept_execution_result.as_ref()),
        items: to_items(&concept.steps),
    }
}

pub fn to_fragments(fragments: &[proto::Fragment]) -> Vec<Fragment> {
    fragments.iter().filter_map(to_fragment).collect()
}

fn to_fragment(fragment: &proto::Fragment) -> Option<Fragment> {
    match fragment.fragment_type() {
        FragmentType::Text => Some(Fragment::Text {
            text: fragment.text.clone(),
        }),
        FragmentType::Parameter => {
            let param = fragment.parameter.as_ref()?;
            let projected = match param.parameter_type() {
                ParameterType::Static => Fragment::StaticParam {
                    text: param.value.clone(),
                },
                ParameterType::Dynamic => Fragment::DynamicParam {
                    text: param.value.clone(),
                },
                ParameterType::Table => Fragment::InlineTable {
                    table: param.table.as_ref().map(to_table).unwrap_or_default(),
                },
                ParameterType::SpecialTable => Fragment::SpecialTable {
                    name: param.name.clone(),
                    table: param.table.as_ref().map(to_table).unwrap_or_default(),
                    file_name: to_file_name(&param.name),
                },
                ParameterType::SpecialString if param.value.contains('\n') => Fragment::Multiline {
                    text: param.value.clone(),
                },
                ParameterType::SpecialString => Fragment::SpecialString {
                    name: param.name.clone(),
                    text: param.value.clone(),
                    file_name: to_file_name(&param.name),
                },
            };
            Some(projected)
        }
    }
}

/// `file:data/hello.txt` -> `hello.txt`
fn to_file_name(name: &str) -> String {
    let source = name.split_once(':').map_or(name, |(_, rest)| rest);
    Path::new(source)
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| source.to_string())
}

fn to_table(table: &ProtoTable) -> Table {
    Table {
        headers: table
            .headers
            .as_ref()
            .map(|h| h.cells.clone())
            .unwrap_or_default(),
        rows: table
            .rows
            .iter()
            .map(|r| Row {
                cells: r.cells.clone(),
                status: Status::Pass,
            })
            .collect(),
    }
}

pub fn to_hook_failure(failure: Option<&ProtoHookFailure>, hook: Hook) -> Option<HookFailure> {
    let failure = failure?;
    Some(HookFailure {
        hook_name: hook.to_string(),
        error_message: failure.error_message.clone(),
        screenshot: to_screenshot(&failure.screen_shot),
        stack_trace: failure.stack_trace.clone(),
        table_row_index: failure.table_row_index,
    })
}

/// Screenshot bytes for a `data:` URL. Text that is already base64 is kept,
/// anything else (raw PNG bytes) is encoded.
fn to_screenshot(bytes: &[u8]) -> String {
    if bytes.is_empty() {
        return String::new();
    }
    match std::str::from_utf8(bytes) {
        Ok(text) => {
            // line-wrapped base64 is still base64
            let compact: String = text.chars().filter(|c| !c.is_ascii_whitespace()).collect();
            if !compact.is_empty() && STANDARD.decode(&compact).is_ok() {
                compact
            } else {
                STANDARD.encode(bytes)
            }
        }
        Err(_) => STANDARD.encode(bytes),
    }
}
