//! Scenario and specification bodies

use super::escape_html;
use super::fragment::write_table;
use super::item::{write_comment, write_hook_failure, write_item};
use crate::{Item, Scenario, SpecResult};

fn write_tags(out: &mut String, tags: &[String]) {
    if tags.is_empty() {
        return;
    }
    out.push_str("<div class=\"tags scenario_tags contentSection\">\n<strong>Tags:</strong>\n");
    for tag in tags {
        out.push_str(&format!("<span> {}</span>\n", escape_html(tag)));
    }
    out.push_str("</div>\n");
}

/// Contexts and teardowns share one wrapper
fn write_context_items(out: &mut String, items: &[Item]) {
    for item in items {
        out.push_str("<div class=\"context-step\">\n");
        write_item(out, item);
        out.push_str("</div>\n");
    }
}

pub fn write_scenario(out: &mut String, scenario: &Scenario) {
    if scenario.table_row_index >= 0 {
        out.push_str(&format!(
            "<div class=\"scenario-container {}\" data-tablerow='{}'>\n",
            scenario.status.css_class(),
            scenario.table_row_index
        ));
    } else {
        out.push_str(&format!(
            "<div class=\"scenario-container {}\">\n",
            scenario.status.css_class()
        ));
    }
    out.push_str(&format!(
        "<div class=\"scenario-head\">\n<h3 class=\"head borderBottom\">{}</h3>\n<span class=\"time\">{}</span>\n</div>\n",
        escape_html(&scenario.heading),
        escape_html(&scenario.execution_time)
    ));
    write_tags(out, &scenario.tags);
    for reason in &scenario.skip_errors {
        out.push_str(&format!(
            "<div class=\"message-container\">\n<h4 class=\"skipReason\">Skipped Reason: {}</h4>\n</div>\n",
            escape_html(reason)
        ));
    }

    // a failed before-hook means the body never ran
    match &scenario.pre_hook_failure {
        Some(failure) => write_hook_failure(out, failure),
        None => {
            write_context_items(out, &scenario.contexts);
            for item in &scenario.items {
                write_item(out, item);
            }
            write_context_items(out, &scenario.teardowns);
        }
    }
    if let Some(failure) = &scenario.post_hook_failure {
        write_hook_failure(out, failure);
    }
    out.push_str("</div>\n");
}

fn write_spec_header(out: &mut String, result: &SpecResult) {
    let summary = result.spec.scenario_summary;
    let file_name = escape_html(&result.file_name);
    out.push_str("<header class=\"curr-spec\">\n<div class=\"spec-head-wrapper\">\n");
    out.push_str(&format!(
        "<h3 class=\"spec-head\" title=\"{}\">{}</h3>\n",
        file_name,
        escape_html(&result.heading)
    ));
    out.push_str("<div class=\"hidden report_test-results\" alt=\"Scenarios\" title=\"Scenarios\">\n<ul>\n");
    out.push_str(&format!(
        "<li class=\"fail\"><span class=\"value\">{}</span><span class=\"txt\">Failed</span></li>\n",
        summary.failed
    ));
    out.push_str(&format!(
        "<li class=\"pass\"><span class=\"value\">{}</span><span class=\"txt\">Passed</span></li>\n",
        summary.passed
    ));
    out.push_str(&format!(
        "<li class=\"skip\"><span class=\"value\">{}</span><span class=\"txt\">Skipped</span></li>\n",
        summary.skipped
    ));
    out.push_str("</ul>\n</div>\n</div>\n");

    out.push_str("<div class=\"spec-meta\">\n<div class=\"spec-filename\">\n");
    out.push_str("<label for=\"specFileName\">File Path</label>\n");
    out.push_str(&format!(
        "<input id=\"specFileName\" value=\"{file_name}\" readonly/>\n"
    ));
    out.push_str(
        "<button class=\"clipboard-btn\" data-clipboard-target=\"#specFileName\" title=\"Copy to Clipboard\">\
         <i class=\"fa fa-clipboard\" aria-hidden=\"true\" title=\"Copy to Clipboard\"></i></button>\n",
    );
    out.push_str(&format!(
        "</div>\n<span class=\"time\">{}</span>\n</div>\n",
        escape_html(&result.execution_time)
    ));
    write_tags(out, &result.tags);
    out.push_str("</header>\n");
}

/// Write a specification body. `with_scenarios` is false when a suite
/// level hook failed and nothing below the spec header ran. A failed
/// before-spec hook suppresses the scenarios too.
pub fn write_spec(out: &mut String, result: &SpecResult, with_scenarios: bool) {
    let spec = &result.spec;
    out.push_str("<div id=\"specificationContainer\" class=\"details\">\n");
    write_spec_header(out, result);

    for failure in &spec.pre_hook_failures {
        write_hook_failure(out, failure);
    }

    let has_preamble = !spec.comments_before_table.is_empty()
        || spec.data_table.is_some()
        || !spec.comments_after_table.is_empty();
    if has_preamble {
        out.push_str("<div class=\"comments-datatable contentSection\">\n");
        for comment in &spec.comments_before_table {
            write_comment(out, comment);
        }
        if let Some(table) = &spec.data_table {
            write_table(out, table, true);
        }
        for comment in &spec.comments_after_table {
            write_comment(out, comment);
        }
        out.push_str("</div>\n");
    }

    if with_scenarios && spec.pre_hook_failures.is_empty() {
        for scenario in &spec.scenarios {
            write_scenario(out, scenario);
        }
    }

    for failure in &spec.post_hook_failures {
        write_hook_failure(out, failure);
    }

    if !spec.errors.is_empty() {
        out.push_str("<div class=\"error-container failed\">\n<div class=\"error-heading\">Errors:</div>\n");
        out.push_str("<div class=\"exception-container\">\n<div class=\"exception\">\n");
        for error in &spec.errors {
            out.push_str(&format!(
                "<pre class=\"error\">{}</pre>\n",
                escape_html(&error.to_string())
            ));
        }
        out.push_str("</div>\n</div>\n</div>\n");
    }
    out.push_str("</div>\n");
}
