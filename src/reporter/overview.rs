//! Suite overview strip and the specification sidebar

use super::escape_html;
use crate::{SpecResult, SuiteResult, Summary};

fn write_chart(out: &mut String, summary: &Summary) {
    let Summary {
        total,
        failed,
        passed,
        skipped,
    } = *summary;
    out.push_str("<div class=\"report_chart\">\n<div class=\"chart\">\n");
    out.push_str(&format!(
        "<svg id=\"pie-chart\" data-results=\"{failed},{passed},{skipped}\" data-total=\"{total}\">\n"
    ));
    for (class, label, count) in [
        ("failed", "Failed", failed),
        ("passed", "Passed", passed),
        ("skipped", "Skipped", skipped),
    ] {
        out.push_str(&format!("<path class=\"status {class}\" />\n"));
        out.push_str(&format!(
            "<path class=\"shadow {class}\" data-status=\"{class}\"><title>{label}: {count}/{total}</title></path>\n"
        ));
    }
    out.push_str("</svg>\n</div>\n</div>\n");
}

fn write_counts(out: &mut String, specs: &Summary, scenarios: &Summary) {
    out.push_str("<div class=\"report_test-results\">\n<div class=\"report_test-result specs\">\n");
    out.push_str(&format!(
        "<div class=\"total-specs\" title=\"Filter all specs\"><span class=\"txt\">Total specs</span><span class=\"value\">{}</span></div>\n",
        specs.total
    ));
    for (short, class, count) in [
        ("fail", "failed", specs.failed),
        ("pass", "passed", specs.passed),
        ("skip", "skipped", specs.skipped),
    ] {
        out.push_str(&format!(
            "<div class=\"{short} spec-filter\" data-status=\"{class}\" title=\"Filter {class} specs\"><span class=\"value\">{count}</span></div>\n"
        ));
    }
    out.push_str("</div>\n<div class=\"report_test-result scenarios\">\n");
    out.push_str(&format!(
        "<div class=\"total-scenarios\"><span class=\"txt\">Total scenario</span><span class=\"value\">{}</span></div>\n",
        scenarios.total
    ));
    for (short, class, count) in [
        ("fail", "failed", scenarios.failed),
        ("pass", "passed", scenarios.passed),
        ("skip", "skipped", scenarios.skipped),
    ] {
        out.push_str(&format!(
            "<div class=\"{short} scenario-stats\" data-status=\"{class}\"><span class=\"value\">{count}</span></div>\n"
        ));
    }
    out.push_str("</div>\n</div>\n");
}

fn write_detail(out: &mut String, label: &str, value: &str) {
    out.push_str(&format!(
        "<li><label>{}</label><span>{}</span></li>\n",
        label,
        escape_html(value)
    ));
}

/// Chart, counters and run details shown at the top of every page
pub fn write_overview(out: &mut String, suite: &SuiteResult) {
    out.push_str("<div class=\"report-overview\">\n");
    write_chart(out, &suite.summary);
    write_counts(out, &suite.summary, &suite.scenario_summary);

    out.push_str("<div class=\"report_details\">\n<ul>\n");
    write_detail(out, "Environment", &suite.environment);
    if !suite.tags.is_empty() {
        write_detail(out, "Tags", &suite.tags);
    }
    // the rate is displayed truncated, as a whole percentage
    let rate = suite.success_rate as i64;
    write_detail(out, "Success Rate", &format!("{rate}%"));
    write_detail(out, "Total Time", &suite.execution_time);
    write_detail(out, "Generated On", &suite.timestamp);
    out.push_str("</ul>\n</div>\n</div>\n");
}

/// Specification list linking to each spec page, failed specs first.
/// `base` prefixes the links so nested pages resolve them.
pub fn write_sidebar(out: &mut String, specs: &[SpecResult], base: &str) {
    out.push_str("<aside class=\"sidebar\">\n<h3 class=\"title\">Specifications</h3>\n");
    out.push_str("<div class=\"searchbar\">\n");
    out.push_str("<input id=\"searchSpecifications\" placeholder=\"Type specification or tag name\" type=\"text\" />\n");
    out.push_str("<i class=\"fa fa-search\"></i>\n</div>\n");
    out.push_str("<div class=\"specs-sorting\">\n");
    for (key, label) in [("specs-name", "Name"), ("execution-time", "Execution time")] {
        out.push_str(&format!(
            "<div class=\"sort sort-{key}\" data-sort-by=\"{key}\"><span class=\"sort-icons\">\
             <i class=\"fa fa-caret-up\"></i><i class=\"fa fa-caret-down\"></i></span><span>{label}</span></div>\n"
        ));
    }
    out.push_str("</div>\n<div id=\"listOfSpecifications\">\n<ul id=\"scenarios\" class=\"spec-list\">\n");

    let mut ordered: Vec<&SpecResult> = specs.iter().collect();
    ordered.sort_by_key(|s| s.status.rank());
    for spec in ordered {
        out.push_str(&format!(
            "<a href=\"{}{}\">\n<li class=\"{} spec-name\">\n",
            base,
            escape_html(&spec.report_file),
            spec.status.css_class()
        ));
        out.push_str(&format!(
            "<span id=\"scenarioName\" class=\"scenarioname\">{}</span>\n",
            escape_html(&spec.heading)
        ));
        out.push_str(&format!(
            "<span id=\"time\" class=\"time\">{}</span>\n</li>\n</a>\n",
            escape_html(&spec.execution_time)
        ));
    }
    out.push_str("</ul>\n</div>\n</aside>\n");
}

pub fn write_congratulations(out: &mut String) {
    out.push_str("<div class=\"congratulations details\">\n");
    out.push_str("<p>Congratulations! You've gone all <span class=\"green\">green</span> and saved the environment!</p>\n");
    out.push_str("</div>\n");
}
