//! HTML rendering of the report model
//!
//! Renderers append to an in-memory `String`; nothing here touches the
//! filesystem or fails. Every piece of user-controlled text goes through
//! [`escape_html`].

mod fragment;
pub mod html;
mod item;
mod overview;
mod spec;

pub use fragment::{write_fragment_blocks, write_fragments, write_table};
pub use html::{base_path, HtmlReporter};
pub use item::{write_comment, write_concept, write_hook_failure, write_item, write_step};
pub use overview::{write_congratulations, write_overview, write_sidebar};
pub use spec::{write_scenario, write_spec};

/// Escape text for HTML element content and double-quoted attributes
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&#34;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}
