//! Markdown descriptions.
//!
//! `{@link Name}` references are expanded on the parsed text, so code spans
//! and fenced code keep them verbatim.

use pulldown_cmark::{CowStr, Event, Options, Parser, Tag, TagEnd, TextMergeStream, html};
use stylist_tree::ResolveError;

use crate::link::Linker;

fn options() -> Options {
    Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH | Options::ENABLE_TASKLISTS
}

/// Render a markdown description to HTML.
#[must_use]
pub fn render_markdown(text: &str) -> String {
    let parser = Parser::new_ext(text, options());
    let mut out = String::with_capacity(text.len() * 3 / 2);
    html::push_html(&mut out, parser);
    out
}

/// Render a one-paragraph description for use inside table cells.
///
/// The wrapping `<p>` is removed when the text is a single paragraph.
#[must_use]
pub fn render_inline(text: &str) -> String {
    strip_paragraph(&render_markdown(text))
}

/// Render markdown, turning `{@link ...}` references in prose into links.
///
/// # Errors
///
/// Propagates external resolver failures.
pub fn render_markdown_linked(text: &str, linker: &Linker) -> Result<String, ResolveError> {
    let mut events = Vec::new();
    let mut in_code_block = false;

    for event in TextMergeStream::new(Parser::new_ext(text, options())) {
        match event {
            Event::Start(Tag::CodeBlock(_)) => {
                in_code_block = true;
                events.push(event);
            }
            Event::End(TagEnd::CodeBlock) => {
                in_code_block = false;
                events.push(event);
            }
            Event::Text(prose) if !in_code_block && prose.contains("{@link") => {
                let linked = linker.expand_inline_links(&prose)?;
                events.push(Event::InlineHtml(CowStr::from(linked)));
            }
            other => events.push(other),
        }
    }

    let mut out = String::with_capacity(text.len() * 3 / 2);
    html::push_html(&mut out, events.into_iter());
    Ok(out)
}

/// [`render_inline`] with `{@link ...}` expansion.
///
/// # Errors
///
/// Propagates external resolver failures.
pub fn render_inline_linked(text: &str, linker: &Linker) -> Result<String, ResolveError> {
    render_markdown_linked(text, linker).map(|out| strip_paragraph(&out))
}

fn strip_paragraph(out: &str) -> String {
    let trimmed = out.trim_end();
    if let Some(inner) = trimmed.strip_prefix("<p>").and_then(|s| s.strip_suffix("</p>"))
        && !inner.contains("<p>")
    {
        return inner.to_owned();
    }
    trimmed.to_owned()
}
