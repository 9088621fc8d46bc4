//! Cross-link index.
//!
//! Maps declaration names to slugs so type and name references can be turned
//! into in-page links. A name declared more than once is ambiguous and is
//! never linked, whichever declaration comes first.

use std::collections::BTreeMap;
use std::collections::btree_map::Entry;

use crate::error::ResolveError;
use crate::model::DocBlock;

/// Options for [`build_index`].
#[derive(Debug, Clone)]
pub struct IndexOptions {
    /// Log a warning when a name turns ambiguous.
    pub dupe_warning: bool,
}

impl Default for IndexOptions {
    fn default() -> Self {
        Self { dupe_warning: true }
    }
}

/// Index entry for one name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkEntry {
    /// Declared exactly once.
    Slug(String),
    /// Declared more than once; never linked.
    Ambiguous,
}

/// Where a name reference should point.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkTarget {
    /// In-page anchor slug.
    Anchor(String),
    /// URL in an outside documentation set.
    External(String),
    /// Not linkable; render the name as text.
    Plain,
}

/// Resolves names that belong to an outside documentation set.
pub trait ExternalResolver: Send + Sync {
    /// Return the URL documenting `name`, or `None` if it is unknown.
    fn resolve(&self, name: &str) -> Result<Option<String>, ResolveError>;
}

impl<F> ExternalResolver for F
where
    F: Fn(&str) -> Result<Option<String>, ResolveError> + Send + Sync,
{
    fn resolve(&self, name: &str) -> Result<Option<String>, ResolveError> {
        self(name)
    }
}

/// Name → slug table for one render. Read-only once built.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CrossLinkIndex {
    entries: BTreeMap<String, LinkEntry>,
}

impl CrossLinkIndex {
    pub fn get(&self, name: &str) -> Option<&LinkEntry> {
        self.entries.get(name)
    }

    /// Slug for `name` if it was declared exactly once.
    pub fn slug_for(&self, name: &str) -> Option<&str> {
        match self.entries.get(name) {
            Some(LinkEntry::Slug(slug)) => Some(slug),
            Some(LinkEntry::Ambiguous) | None => None,
        }
    }

    pub fn is_ambiguous(&self, name: &str) -> bool {
        matches!(self.entries.get(name), Some(LinkEntry::Ambiguous))
    }

    /// Ambiguous names in sorted order.
    pub fn ambiguous_names(&self) -> impl Iterator<Item = &str> {
        self.entries
            .iter()
            .filter(|(_, entry)| **entry == LinkEntry::Ambiguous)
            .map(|(name, _)| name.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Decide where a reference to `name` points.
    ///
    /// A concrete slug wins; otherwise the external resolver is asked;
    /// otherwise the name stays plain text. Resolver errors propagate.
    pub fn resolve(
        &self,
        name: &str,
        external: Option<&dyn ExternalResolver>,
    ) -> Result<LinkTarget, ResolveError> {
        if let Some(slug) = self.slug_for(name) {
            return Ok(LinkTarget::Anchor(slug.to_owned()));
        }
        if let Some(resolver) = external
            && let Some(url) = resolver.resolve(name)?
        {
            return Ok(LinkTarget::External(url));
        }
        Ok(LinkTarget::Plain)
    }

    fn record(&mut self, block: &DocBlock, options: &IndexOptions) {
        match self.entries.entry(block.name.clone()) {
            Entry::Vacant(entry) => {
                entry.insert(LinkEntry::Slug(block.slug.clone()));
            }
            Entry::Occupied(mut entry) => {
                if options.dupe_warning && matches!(entry.get(), LinkEntry::Slug(_)) {
                    tracing::warn!(
                        name = %block.name,
                        "Duplicate declaration name; references to it will not be linked"
                    );
                }
                entry.insert(LinkEntry::Ambiguous);
            }
        }
    }
}

/// Build the cross-link index from a slugged, linked tree.
///
/// Walks depth-first pre-order. Attached `props` blocks are not indexed.
pub fn build_index(blocks: &[DocBlock], options: &IndexOptions) -> CrossLinkIndex {
    let mut index = CrossLinkIndex::default();
    for block in blocks {
        visit(block, &mut index, options);
    }
    index
}

fn visit(block: &DocBlock, index: &mut CrossLinkIndex, options: &IndexOptions) {
    index.record(block, options);
    for (_, list) in block.members.iter() {
        for child in list {
            visit(child, index, options);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io;
    use std::sync::{Arc, Mutex};

    use super::*;
    use crate::model::MemberKind;
    use pretty_assertions::assert_eq;

    fn slugged(name: &str, slug: &str) -> DocBlock {
        let mut block = DocBlock::new(name);
        slug.clone_into(&mut block.slug);
        block
    }

    fn no_external(_: &str) -> Result<Option<String>, ResolveError> {
        Ok(None)
    }

    #[test]
    fn test_unique_names_map_to_slugs() {
        let tree = vec![
            slugged("Map", "map").with_member(MemberKind::Instance, slugged("render", "render")),
            slugged("View", "view"),
        ];

        let index = build_index(&tree, &IndexOptions::default());

        assert_eq!(index.len(), 3);
        assert_eq!(index.slug_for("Map"), Some("map"));
        assert_eq!(index.slug_for("render"), Some("render"));
        assert_eq!(index.slug_for("View"), Some("view"));
        assert_eq!(index.slug_for("Missing"), None);
    }

    #[test]
    fn test_duplicate_top_level_names_are_ambiguous() {
        let tree = vec![slugged("Foo", "foo"), slugged("Foo", "foo-1")];

        let index = build_index(&tree, &IndexOptions::default());

        assert_eq!(index.get("Foo"), Some(&LinkEntry::Ambiguous));
        assert_eq!(index.slug_for("Foo"), None);
    }

    #[test]
    fn test_ambiguity_is_permanent() {
        let tree = vec![
            slugged("Foo", "foo"),
            slugged("Bar", "bar").with_member(MemberKind::Static, slugged("Foo", "foo-1")),
            slugged("Foo", "foo-2"),
        ];

        let index = build_index(
            &tree,
            &IndexOptions {
                dupe_warning: false,
            },
        );

        assert!(index.is_ambiguous("Foo"));
        assert_eq!(index.ambiguous_names().collect::<Vec<_>>(), vec!["Foo"]);
        assert_eq!(
            index.resolve("Foo", Some(&no_external)).unwrap(),
            LinkTarget::Plain
        );
    }

    #[test]
    fn test_props_blocks_are_not_indexed() {
        let mut button = slugged("Button", "button");
        button.props = Some(Box::new(slugged("ButtonProps", "buttonprops")));

        let index = build_index(&[button], &IndexOptions::default());

        assert_eq!(index.slug_for("ButtonProps"), None);
        assert_eq!(index.len(), 1);
    }

    #[test]
    fn test_resolve_prefers_local_slug() {
        let index = build_index(&[slugged("Map", "map")], &IndexOptions::default());
        let external =
            |name: &str| -> Result<Option<String>, ResolveError> { Ok(Some(format!("https://x/{name}"))) };

        assert_eq!(
            index.resolve("Map", Some(&external)).unwrap(),
            LinkTarget::Anchor("map".to_owned())
        );
        assert_eq!(
            index.resolve("Promise", Some(&external)).unwrap(),
            LinkTarget::External("https://x/Promise".to_owned())
        );
        assert_eq!(index.resolve("Promise", None).unwrap(), LinkTarget::Plain);
    }

    #[test]
    fn test_resolve_ambiguous_name_consults_external() {
        let tree = vec![slugged("Event", "event"), slugged("Event", "event-1")];
        let index = build_index(&tree, &IndexOptions::default());
        let external = |name: &str| -> Result<Option<String>, ResolveError> {
            Ok((name == "Event").then(|| "https://dom/Event".to_owned()))
        };

        assert_eq!(
            index.resolve("Event", Some(&external)).unwrap(),
            LinkTarget::External("https://dom/Event".to_owned())
        );
    }

    #[test]
    fn test_resolve_propagates_resolver_error() {
        let index = CrossLinkIndex::default();
        let failing = |name: &str| -> Result<Option<String>, ResolveError> {
            Err(ResolveError::new(name, "lookup table unavailable"))
        };

        let err = index.resolve("Promise", Some(&failing)).unwrap_err();
        assert_eq!(err.name, "Promise");
        assert!(err.to_string().contains("lookup table unavailable"));
    }
    /// Formatted log output collected from a scoped subscriber.
    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl io::Write for Captured {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn logs_while_indexing(tree: &[DocBlock], options: &IndexOptions) -> String {
        let captured = Captured::default();
        let writer = captured.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .finish();

        tracing::subscriber::with_default(subscriber, || build_index(tree, options));

        String::from_utf8(captured.0.lock().unwrap().clone()).unwrap()
    }

    const DUPE_WARNING: &str = "Duplicate declaration name";

    #[test]
    fn test_dupe_warning_emitted_once_per_name() {
        let tree = vec![
            slugged("Foo", "foo"),
            slugged("Foo", "foo-1"),
            slugged("Foo", "foo-2"),
        ];

        let logs = logs_while_indexing(&tree, &IndexOptions::default());

        assert_eq!(logs.matches(DUPE_WARNING).count(), 1, "{logs}");
        assert!(logs.contains("WARN"));
        assert!(logs.contains("name=Foo"));
    }

    #[test]
    fn test_dupe_warning_per_distinct_name() {
        let tree = vec![
            slugged("Foo", "foo"),
            slugged("Bar", "bar"),
            slugged("Foo", "foo-1"),
            slugged("Bar", "bar-1"),
            slugged("Unique", "unique"),
        ];

        let logs = logs_while_indexing(&tree, &IndexOptions::default());

        assert_eq!(logs.matches(DUPE_WARNING).count(), 2, "{logs}");
        assert!(!logs.contains("name=Unique"));
    }

    #[test]
    fn test_dupe_warning_disabled() {
        let tree = vec![
            slugged("Foo", "foo"),
            slugged("Foo", "foo-1"),
            slugged("Foo", "foo-2"),
        ];

        let logs = logs_while_indexing(&tree, &IndexOptions { dupe_warning: false });

        assert_eq!(logs, "");
    }
}
