//! Steps, comments, concepts and hook failures

use super::escape_html;
use super::fragment::{write_fragment_blocks, write_fragments};
use crate::{Comment, Concept, HookFailure, Item, Status, Step, StepResult};

pub fn write_item(out: &mut String, item: &Item) {
    match item {
        Item::Step(step) => write_step(out, step),
        Item::Comment(comment) => write_comment(out, comment),
        Item::Concept(concept) => write_concept(out, concept),
    }
}

pub fn write_step(out: &mut String, step: &Step) {
    write_step_with_marker(out, step, false);
}

fn write_step_with_marker(out: &mut String, step: &Step, concept: bool) {
    let result = &step.result;
    out.push_str("<div class=\"step\">\n");
    if result.status != Status::Skip {
        out.push_str(&format!(
            "<h5 class=\"execution-time\"><span class=\"time\">Execution Time : {}</span></h5>\n",
            escape_html(&result.execution_time)
        ));
    }
    out.push_str(&format!(
        "<div class=\"step-info {}\">\n<ul>\n<li class=\"step\">\n<div class=\"step-txt\">\n",
        result.status.css_class()
    ));
    if concept {
        out.push_str("<span class=\"concept-marker\"></span>\n");
    }
    write_fragments(out, &step.fragments);
    out.push_str("</div>\n");
    write_fragment_blocks(out, &step.fragments);
    write_messages(out, &result.messages);

    if let Some(failure) = &step.pre_hook_failure {
        write_hook_failure(out, failure);
    }
    if result.status == Status::Fail && !result.message.is_empty() && !result.stack_trace.is_empty() {
        write_step_failure(out, result);
    }
    if let Some(failure) = &step.post_hook_failure {
        write_hook_failure(out, failure);
    }
    if result.status == Status::Skip && !result.skipped_reason.is_empty() {
        out.push_str(&format!(
            "<div class=\"message-container\">\n<h4 class=\"skipReason\">Skipped Reason: {}</h4>\n</div>\n",
            escape_html(&result.skipped_reason)
        ));
    }
    out.push_str("</li>\n</ul>\n</div>\n</div>\n");
}

fn write_messages(out: &mut String, messages: &[String]) {
    if messages.is_empty() {
        return;
    }
    out.push_str("<div class=\"message-container\">\n");
    for message in messages {
        out.push_str(&format!(
            "<div class=\"step-message\"><p>{}</p></div>\n",
            escape_html(message)
        ));
    }
    out.push_str("</div>\n");
}

fn write_step_failure(out: &mut String, result: &StepResult) {
    out.push_str("<div class=\"error-container failed\">\n<div class=\"exception-container\">\n");
    out.push_str("<div class=\"exception\">\n");
    out.push_str(&format!(
        "<h4 class=\"error-message\"><pre>{}</pre></h4>\n",
        escape_html(&result.message)
    ));
    out.push_str(&format!(
        "<pre class=\"stacktrace\">{}</pre>\n",
        escape_html(&result.stack_trace)
    ));
    out.push_str("</div>\n");
    write_screenshot(out, &result.screenshot);
    out.push_str("</div>\n</div>\n");
}

/// Collapsible failure block for a before/after hook
pub fn write_hook_failure(out: &mut String, failure: &HookFailure) {
    out.push_str(&format!(
        "<div class=\"error-container failed\" data-tablerow='{}'>\n",
        failure.table_row_index
    ));
    out.push_str(&format!(
        "<div class=\"error-heading\">{} Failed:<span class=\"error-message\"> {}</span></div>\n",
        escape_html(&failure.hook_name),
        escape_html(&failure.error_message)
    ));
    out.push_str("<div class=\"toggle-show\">[Show details]</div>\n");
    out.push_str("<div class=\"exception-container hidden\">\n<div class=\"exception\">\n");
    out.push_str(&format!(
        "<pre class=\"stacktrace\">{}</pre>\n",
        escape_html(&failure.stack_trace)
    ));
    out.push_str("</div>\n");
    write_screenshot(out, &failure.screenshot);
    out.push_str("</div>\n</div>\n");
}

fn write_screenshot(out: &mut String, screenshot: &str) {
    if screenshot.is_empty() {
        return;
    }
    let src = format!("data:image/png;base64,{}", escape_html(screenshot));
    out.push_str("<div class=\"screenshot-container\">\n<div class=\"screenshot\">\n");
    out.push_str(&format!(
        "<a href=\"{src}\" rel=\"lightbox\"><img src=\"{src}\"></a>\n"
    ));
    out.push_str("</div>\n</div>\n");
}

/// Comments are narrative text; a blank comment keeps its slot as an
/// empty span
pub fn write_comment(out: &mut String, comment: &Comment) {
    if comment.text.trim().is_empty() {
        out.push_str("<span></span>\n");
    } else {
        out.push_str(&format!("<span><p>{}</p></span>\n", escape_html(&comment.text)));
    }
}

pub fn write_concept(out: &mut String, concept: &Concept) {
    out.push_str(&format!(
        "<div class=\"concept {}\">\n",
        concept.step.result.status.css_class()
    ));
    write_step_with_marker(out, &concept.step, true);
    out.push_str("<div class=\"concept-steps\">\n");
    for item in &concept.items {
        write_item(out, item);
    }
    out.push_str("</div>\n</div>\n");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Fragment;

    fn step(status: Status) -> Step {
        Step {
            fragments: vec![Fragment::Text {
                text: "Say hello".into(),
            }],
            result: StepResult {
                status,
                execution_time: "00:03:31".into(),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    fn hook(name: &str) -> HookFailure {
        HookFailure {
            hook_name: name.into(),
            error_message: "SomeError".into(),
            stack_trace: "Stack trace".into(),
            ..Default::default()
        }
    }

    fn render_step(s: &Step) -> String {
        let mut out = String::new();
        write_step(&mut out, s);
        out
    }

    #[test]
    fn passed_step_shows_time_and_status() {
        let html = render_step(&step(Status::Pass));
        assert!(html.contains("<span class=\"time\">Execution Time : 00:03:31</span>"));
        assert!(html.contains("<div class=\"step-info passed\">"));
        assert!(html.contains("<span>Say hello</span>"));
    }

    #[test]
    fn skipped_step_has_no_time_but_reason() {
        let mut s = step(Status::Skip);
        s.result.skipped_reason = "step impl not found".into();
        let html = render_step(&s);
        assert!(!html.contains("execution-time"));
        assert!(html.contains("<div class=\"step-info skipped\">"));
        assert!(html.contains("<h4 class=\"skipReason\">Skipped Reason: step impl not found</h4>"));
    }

    #[test]
    fn skip_reason_only_for_skipped_steps() {
        let mut s = step(Status::Pass);
        s.result.skipped_reason = "ignored".into();
        assert!(!render_step(&s).contains("skipReason"));
    }

    #[test]
    fn failed_step_renders_one_error_block() {
        let mut s = step(Status::Fail);
        s.result.message = "expected:<foo [foo] foo> but was:<foo [bar] foo>".into();
        s.result.stack_trace = "stacktrace".into();
        let html = render_step(&s);
        assert_eq!(html.matches("<div class=\"error-container failed\">").count(), 1);
        assert!(html.contains("<pre>expected:&lt;foo [foo] foo&gt; but was:&lt;foo [bar] foo&gt;</pre>"));
        assert!(html.contains("<pre class=\"stacktrace\">stacktrace</pre>"));
        assert!(!html.contains("screenshot"));
    }

    #[test]
    fn failed_step_without_stack_has_no_error_block() {
        let mut s = step(Status::Fail);
        s.result.message = "boom".into();
        assert!(!render_step(&s).contains("error-container"));
    }

    #[test]
    fn failed_step_with_screenshot() {
        let mut s = step(Status::Fail);
        s.result.message = "boom".into();
        s.result.stack_trace = "at x".into();
        s.result.screenshot = "iVBO".into();
        let html = render_step(&s);
        assert!(html.contains("<a href=\"data:image/png;base64,iVBO\" rel=\"lightbox\">"));
        assert!(html.contains("<img src=\"data:image/png;base64,iVBO\">"));
    }

    #[test]
    fn hook_failures_surround_step_failure() {
        let mut s = step(Status::Fail);
        s.result.message = "boom".into();
        s.result.stack_trace = "at x".into();
        s.pre_hook_failure = Some(hook("BeforeStep"));
        s.post_hook_failure = Some(hook("AfterStep"));
        let html = render_step(&s);
        let pre = html.find("BeforeStep Failed:").unwrap();
        let failure = html.find("<h4 class=\"error-message\">").unwrap();
        let post = html.find("AfterStep Failed:").unwrap();
        assert!(pre < failure && failure < post);
    }

    #[test]
    fn step_messages_are_listed() {
        let mut s = step(Status::Pass);
        s.result.messages = vec!["first".into(), "<second>".into()];
        let html = render_step(&s);
        assert!(html.contains("<div class=\"step-message\"><p>first</p></div>"));
        assert!(html.contains("<div class=\"step-message\"><p>&lt;second&gt;</p></div>"));
    }

    #[test]
    fn hook_failure_block() {
        let mut failure = hook("BeforeSuite");
        failure.screenshot = "iVBO".into();
        let mut html = String::new();
        write_hook_failure(&mut html, &failure);
        assert!(html.starts_with("<div class=\"error-container failed\" data-tablerow='0'>"));
        assert!(html.contains(
            "<div class=\"error-heading\">BeforeSuite Failed:<span class=\"error-message\"> SomeError</span></div>"
        ));
        assert!(html.contains("[Show details]"));
        assert!(html.contains("<div class=\"exception-container hidden\">"));
        assert!(html.contains("<pre class=\"stacktrace\">Stack trace</pre>"));
        assert!(html.contains("<img src=\"data:image/png;base64,iVBO\">"));
    }

    #[test]
    fn comment_escaped_and_blank() {
        let mut html = String::new();
        write_comment(&mut html, &Comment { text: "a < b".into() });
        write_comment(&mut html, &Comment { text: "\n".into() });
        assert_eq!(html, "<span><p>a &lt; b</p></span>\n<span></span>\n");
    }

    #[test]
    fn concept_nests_items_recursively() {
        let inner = Concept {
            step: step(Status::Pass),
            items: vec![Item::Step(step(Status::Pass))],
        };
        let outer = Concept {
            step: step(Status::Fail),
            items: vec![
                Item::Comment(Comment { text: "note".into() }),
                Item::Concept(inner),
            ],
        };
        let mut html = String::new();
        write_concept(&mut html, &outer);
        assert!(html.starts_with("<div class=\"concept failed\">"));
        assert_eq!(html.matches("<span class=\"concept-marker\"></span>").count(), 2);
        assert_eq!(html.matches("<div class=\"concept-steps\">").count(), 2);
        assert!(html.contains("<span><p>note</p></span>"));
    }
}
