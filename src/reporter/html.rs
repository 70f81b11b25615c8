//! HTML reporter: assembles full pages from the section renderers
//!
//! Pages reference the theme's stylesheets and scripts by relative URL,
//! so spec pages nested in subdirectories get a `../` prefix per level.

use super::escape_html;
use super::item::write_hook_failure;
use super::overview::{write_congratulations, write_overview, write_sidebar};
use super::spec::write_spec;
use crate::{SpecResult, SuiteResult};

const STYLESHEETS: [&str; 4] = [
    "css/open-sans.css",
    "css/font-awesome.css",
    "css/normalize.css",
    "css/style.css",
];

/// Relative prefix from a page back to the report root
pub fn base_path(report_file: &str) -> String {
    "../".repeat(report_file.matches('/').count())
}

/// Reporter that renders the pages of one suite result
pub struct HtmlReporter<'a> {
    suite: &'a SuiteResult,
}

impl<'a> HtmlReporter<'a> {
    pub fn new(suite: &'a SuiteResult) -> Self {
        Self { suite }
    }

    /// `index.html`: overview, then the sidebar, or only the hook failure
    /// when the suite failed before any spec ran
    pub fn index_page(&self) -> String {
        self.overview_page(self.suite, "")
    }

    /// `<dir>/index.html`: the overview page limited to the specs below
    /// `dir`, as built by [`crate::transform::to_nested_suite_result`]
    pub fn nested_index_page(&self, nested: &SuiteResult, dir: &str) -> String {
        self.overview_page(nested, &base_path(&format!("{dir}/index.html")))
    }

    fn overview_page(&self, suite: &SuiteResult, base: &str) -> String {
        let mut html = String::with_capacity(16_384);
        self.open_page(&mut html, base);
        write_overview(&mut html, suite);
        if let Some(failure) = &suite.post_hook_failure {
            write_hook_failure(&mut html, failure);
        }
        match &suite.pre_hook_failure {
            Some(failure) => write_hook_failure(&mut html, failure),
            None => {
                write_sidebar(&mut html, &suite.spec_results, base);
                if suite.summary.failed == 0 && suite.summary.skipped == 0 {
                    write_congratulations(&mut html);
                }
            }
        }
        self.close_page(&mut html, base);
        html
    }

    /// Page for one specification
    pub fn spec_page(&self, spec: &SpecResult) -> String {
        let suite = self.suite;
        let base = base_path(&spec.report_file);
        let mut html = String::with_capacity(32_768);
        self.open_page(&mut html, &base);
        write_overview(&mut html, suite);
        if let Some(failure) = &suite.pre_hook_failure {
            write_hook_failure(&mut html, failure);
        }
        if let Some(failure) = &suite.post_hook_failure {
            write_hook_failure(&mut html, failure);
        }
        write_spec(&mut html, spec, suite.pre_hook_failure.is_none());
        self.close_page(&mut html, &base);
        html
    }

    fn open_page(&self, html: &mut String, base: &str) {
        html.push_str("<!doctype html>\n<html>\n<head>\n");
        html.push_str("<meta http-equiv=\"X-UA-Compatible\" content=\"IE=9; IE=8; IE=7; IE=EDGE\" />\n");
        html.push_str("<meta charset=\"utf-8\" />\n<title>Gauge Test Results</title>\n");
        html.push_str(&format!(
            "<link rel=\"shortcut icon\" type=\"image/x-icon\" href=\"{base}images/favicon.ico\">\n"
        ));
        for sheet in STYLESHEETS {
            html.push_str(&format!(
                "<link rel=\"stylesheet\" type=\"text/css\" href=\"{base}{sheet}\" />\n"
            ));
        }
        html.push_str("</head>\n<body>\n<header class=\"top\">\n<div class=\"header\">\n<div class=\"container\">\n");
        html.push_str(&format!(
            "<div class=\"logo\"><a href=\"{base}index.html\"><img src=\"{base}images/gaugeLogo.png\" alt=\"Report logo\"></a></div>\n"
        ));
        html.push_str(&format!(
            "<h2 class=\"project\">Project: {}</h2>\n",
            escape_html(&self.suite.project_name)
        ));
        html.push_str("</div>\n</div>\n</header>\n");
        html.push_str("<main class=\"main-container\">\n<div class=\"container\">\n");
    }

    fn close_page(&self, html: &mut String, base: &str) {
        html.push_str("</div>\n</main>\n");
        html.push_str(&format!(
            "<script type=\"text/javascript\" src=\"{base}js/search_index.js\"></script>\n"
        ));
        html.push_str(&format!(
            "<script type=\"text/javascript\" src=\"{base}js/main.js\"></script>\n"
        ));
        html.push_str("</body>\n</html>\n");
    }
}
