//! Cross-link rendering.
//!
//! Turns names and type expressions into HTML, linking every identifier the
//! [`CrossLinkIndex`] or the external resolver knows about.

use std::sync::{Arc, LazyLock};

use regex::{Captures, Regex};
use stylist_tree::{CrossLinkIndex, ExternalResolver, LinkTarget, ResolveError};

/// Identifiers inside a type expression, dotted paths included.
static TYPE_NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[A-Za-z_$][\w$]*(?:\.[A-Za-z_$][\w$]*)*").unwrap());

/// `{@link Name}`, `{@link Name|label}` and `{@link Name label}`.
static INLINE_LINK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{@link\s+([^\s|}]+)(?:\s*\|\s*|\s+)?([^}]*)\}").unwrap());

/// Name lookup shared by the view model and the template functions.
#[derive(Clone)]
pub struct Linker {
    index: Arc<CrossLinkIndex>,
    resolver: Option<Arc<dyn ExternalResolver>>,
}

impl Linker {
    pub fn new(index: Arc<CrossLinkIndex>, resolver: Option<Arc<dyn ExternalResolver>>) -> Self {
        Self { index, resolver }
    }

    /// Render `name` as a link if it resolves, escaped text otherwise.
    ///
    /// # Errors
    ///
    /// Propagates external resolver failures.
    pub fn link(&self, name: &str) -> Result<String, ResolveError> {
        self.link_labelled(name, name)
    }

    /// Like [`link`](Self::link) but with custom link text.
    ///
    /// # Errors
    ///
    /// Propagates external resolver failures.
    pub fn link_labelled(&self, name: &str, label: &str) -> Result<String, ResolveError> {
        let target = self.index.resolve(name, self.resolver.as_deref())?;
        let label = escape_html(label);
        Ok(match target {
            LinkTarget::Anchor(slug) => format!(r##"<a href="#{}">{label}</a>"##, escape_html(&slug)),
            LinkTarget::External(url) => format!(r#"<a href="{}">{label}</a>"#, escape_html(&url)),
            LinkTarget::Plain => label,
        })
    }

    /// Render a type expression, linking each identifier in it.
    ///
    /// `Array<Button>` links `Array` and `Button` separately; punctuation is
    /// kept as escaped text.
    ///
    /// # Errors
    ///
    /// Propagates external resolver failures.
    pub fn link_type(&self, expr: &str) -> Result<String, ResolveError> {
        let mut html = String::with_capacity(expr.len() * 2);
        let mut last = 0;
        for name in TYPE_NAME_RE.find_iter(expr) {
            html.push_str(&escape_html(&expr[last..name.start()]));
            html.push_str(&self.link(name.as_str())?);
            last = name.end();
        }
        html.push_str(&escape_html(&expr[last..]));
        Ok(html)
    }

    /// Render plain text as HTML, replacing `{@link ...}` references with
    /// links. Everything else is escaped.
    ///
    /// # Errors
    ///
    /// Propagates external resolver failures.
    pub fn expand_inline_links(&self, text: &str) -> Result<String, ResolveError> {
        if !text.contains("{@link") {
            return Ok(escape_html(text));
        }

        let mut out = String::with_capacity(text.len());
        let mut last = 0;
        for caps in INLINE_LINK_RE.captures_iter(text) {
            let Some(whole) = caps.get(0) else { continue };
            out.push_str(&escape_html(&text[last..whole.start()]));
            out.push_str(&self.inline_link(&caps)?);
            last = whole.end();
        }
        out.push_str(&escape_html(&text[last..]));
        Ok(out)
    }

    fn inline_link(&self, caps: &Captures<'_>) -> Result<String, ResolveError> {
        let name = caps.get(1).map_or("", |m| m.as_str());
        let label = caps
            .get(2)
            .map(|m| m.as_str().trim())
            .filter(|label| !label.is_empty())
            .unwrap_or(name);
        self.link_labelled(name, label)
    }
}

/// Escape HTML special characters.
#[must_use]
pub fn escape_html(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&#x27;"),
            _ => result.push(c),
        }
    }
    result
}
