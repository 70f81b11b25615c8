//! Step sentence fragments

use super::escape_html;
use crate::{Fragment, Table};

/// Write the parts of a step sentence that belong on its title line.
///
/// Inline tables and multiline strings are skipped here; they are
/// rendered below the title by [`write_fragment_blocks`].
pub fn write_fragments(out: &mut String, fragments: &[Fragment]) {
    for fragment in fragments {
        match fragment {
            Fragment::Text { text } => {
                let text = text.trim();
                if !text.is_empty() {
                    out.push_str(&format!("<span>{}</span>\n", escape_html(text)));
                }
            }
            Fragment::StaticParam { text } | Fragment::DynamicParam { text } => {
                out.push_str(&format!(
                    "<span class=\"parameter\">\"{}\"</span>\n",
                    escape_html(text)
                ));
            }
            Fragment::SpecialString {
                name,
                text,
                file_name,
            } => {
                write_modal_open(out, name, file_name);
                out.push_str(&format!("<pre>{}</pre>", escape_html(text)));
                write_modal_close(out);
            }
            Fragment::SpecialTable {
                name,
                table,
                file_name,
            } => {
                write_modal_open(out, name, file_name);
                write_table(out, table, false);
                write_modal_close(out);
            }
            Fragment::InlineTable { .. } | Fragment::Multiline { .. } => {}
        }
    }
}

/// Write the block-level fragments of a step: inline tables and multiline
/// strings, in sentence order
pub fn write_fragment_blocks(out: &mut String, fragments: &[Fragment]) {
    for fragment in fragments {
        match fragment {
            Fragment::InlineTable { table } => write_table(out, table, false),
            Fragment::Multiline { text } => {
                out.push_str(&format!(
                    "<div class=\"multiline-container\"><pre>{}</pre></div>\n",
                    escape_html(text)
                ));
            }
            _ => {}
        }
    }
}

fn write_modal_open(out: &mut String, name: &str, file_name: &str) {
    out.push_str(&format!(
        "<span class=\"modal-link\">&lt;{}&gt;</span>\n",
        escape_html(name)
    ));
    out.push_str("<div class=\"modal\">\n");
    out.push_str(&format!(
        "<h2 class=\"modal-title\">{}</h2>\n",
        escape_html(file_name)
    ));
    out.push_str("<span class=\"close\">&times;</span>\n");
    out.push_str("<div class=\"modal-content\">");
}

fn write_modal_close(out: &mut String) {
    out.push_str("</div>\n</div>\n");
}

/// Write a data table. With `with_status` every body row carries the
/// `row-selector` class, its status class and its index; the first row is
/// marked `selected`.
pub fn write_table(out: &mut String, table: &Table, with_status: bool) {
    out.push_str("<table class=\"data-table\">\n<tr>");
    for header in &table.headers {
        out.push_str(&format!("<th>{}</th>", escape_html(header)));
    }
    out.push_str("</tr>\n");
    out.push_str(&format!("<tbody data-rowCount={}>\n", table.rows.len()));
    for (index, row) in table.rows.iter().enumerate() {
        if with_status {
            let selected = if index == 0 { " selected" } else { "" };
            out.push_str(&format!(
                "<tr class=\"row-selector {}{}\" data-rowIndex='{}'>",
                row.status.css_class(),
                selected,
                index
            ));
        } else {
            out.push_str("<tr>");
        }
        for cell in &row.cells {
            out.push_str(&format!("<td>{}</td>", escape_html(cell)));
        }
        out.push_str("</tr>\n");
    }
    out.push_str("</tbody>\n</table>\n");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Row, Status};

    fn render(fragments: &[Fragment]) -> String {
        let mut out = String::new();
        write_fragments(&mut out, fragments);
        write_fragment_blocks(&mut out, fragments);
        out
    }

    fn table(rows: &[(&[&str], Status)]) -> Table {
        Table {
            headers: vec!["Word".into(), "Count".into()],
            rows: rows
                .iter()
                .map(|(cells, status)| Row {
                    cells: cells.iter().map(|c| c.to_string()).collect(),
                    status: *status,
                })
                .collect(),
        }
    }

    #[test]
    fn text_is_trimmed_and_params_quoted() {
        let html = render(&[
            Fragment::Text { text: "Say ".into() },
            Fragment::StaticParam {
                text: "good <a> morning".into(),
            },
            Fragment::Text { text: " to ".into() },
            Fragment::DynamicParam { text: "gauge".into() },
        ]);
        assert_eq!(
            html,
            "<span>Say</span>\n\
             <span class=\"parameter\">\"good &lt;a&gt; morning\"</span>\n\
             <span>to</span>\n\
             <span class=\"parameter\">\"gauge\"</span>\n"
        );
    }

    #[test]
    fn special_string_renders_modal() {
        let html = render(&[Fragment::SpecialString {
            name: "file:hello.txt".into(),
            text: "good morning".into(),
            file_name: "hello.txt".into(),
        }]);
        assert!(html.contains("<span class=\"modal-link\">&lt;file:hello.txt&gt;</span>"));
        assert!(html.contains("<h2 class=\"modal-title\">hello.txt</h2>"));
        assert!(html.contains("<span class=\"close\">&times;</span>"));
        assert!(html.contains("<div class=\"modal-content\"><pre>good morning</pre></div>"));
    }

    #[test]
    fn special_table_renders_table_in_modal() {
        let html = render(&[Fragment::SpecialTable {
            name: "table:hello.csv".into(),
            table: table(&[(&["Gauge", "3"], Status::Pass)]),
            file_name: "hello.csv".into(),
        }]);
        assert!(html.contains("&lt;table:hello.csv&gt;"));
        assert!(html.contains("<div class=\"modal-content\"><table class=\"data-table\">"));
        assert!(!html.contains("row-selector"));
    }

    #[test]
    fn multiline_renders_pre_without_modal() {
        let html = render(&[
            Fragment::Text {
                text: "Step with JSON ".into(),
            },
            Fragment::Multiline {
                text: "{\n  \"name\": \"Gauge\"\n}".into(),
            },
        ]);
        assert!(html.contains("<span>Step with JSON</span>"));
        assert!(html.contains("<pre>{\n  &#34;name&#34;: &#34;Gauge&#34;\n}</pre>"));
        assert!(!html.contains("modal-link"));
    }

    #[test]
    fn blocks_come_after_title_line() {
        let fragments = [
            Fragment::InlineTable {
                table: table(&[(&["a", "1"], Status::Pass)]),
            },
            Fragment::Text { text: "Check".into() },
        ];
        let mut title = String::new();
        write_fragments(&mut title, &fragments);
        assert_eq!(title, "<span>Check</span>\n");

        let mut blocks = String::new();
        write_fragment_blocks(&mut blocks, &fragments);
        assert!(blocks.starts_with("<table class=\"data-table\">"));
    }

    #[test]
    fn table_rows_carry_status_when_requested() {
        let t = table(&[
            (&["Gauge", "3"], Status::Pass),
            (&["Mingle", "2"], Status::Fail),
            (&["foobar", "1"], Status::Skip),
        ]);
        let mut html = String::new();
        write_table(&mut html, &t, true);
        assert!(html.contains("<tr><th>Word</th><th>Count</th></tr>"));
        assert!(html.contains("<tbody data-rowCount=3>"));
        let first = html.find("row-selector passed selected\" data-rowIndex='0'").unwrap();
        let second = html.find("row-selector failed\" data-rowIndex='1'").unwrap();
        let third = html.find("row-selector skipped\" data-rowIndex='2'").unwrap();
        assert!(first < second && second < third);
        assert_eq!(html.matches("<tr class=").count(), 3);
    }

    #[test]
    fn inline_table_has_plain_rows() {
        let mut html = String::new();
        write_table(&mut html, &table(&[(&["<x>", "1"], Status::Fail)]), false);
        assert!(html.contains("<tr><td>&lt;x&gt;</td><td>1</td></tr>"));
        assert!(!html.contains("failed"));
    }
}
