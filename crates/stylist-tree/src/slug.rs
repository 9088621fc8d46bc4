//! Slug assignment.

use std::collections::HashMap;

use crate::model::DocBlock;

/// Base used when a name has no alphanumeric characters.
const FALLBACK_SLUG: &str = "block";

/// Issues unique slugs within one render.
///
/// Same-named inputs get `foo`, `foo-1`, `foo-2`, ... in call order.
#[derive(Debug, Default)]
pub struct Slugger {
    /// Issued slug → last suffix tried for that base.
    occurrences: HashMap<String, usize>,
}

impl Slugger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Slugify `text` and make the result unique among slugs issued so far.
    pub fn slug(&mut self, text: &str) -> String {
        let mut base = slugify(text);
        if base.is_empty() {
            base = FALLBACK_SLUG.to_owned();
        }

        let mut slug = base.clone();
        while self.occurrences.contains_key(&slug) {
            let count = self.occurrences.entry(base.clone()).or_default();
            *count += 1;
            slug = format!("{base}-{count}");
        }
        self.occurrences.insert(slug.clone(), 0);
        slug
    }

    /// Number of slugs issued.
    pub fn len(&self) -> usize {
        self.occurrences.len()
    }

    pub fn is_empty(&self) -> bool {
        self.occurrences.is_empty()
    }
}

/// Convert text to a URL-safe slug.
///
/// Lowercases, keeps alphanumeric characters, and folds every run of
/// whitespace or punctuation into a single dash. Leading and trailing dashes
/// are dropped.
#[must_use]
pub fn slugify(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut last_was_dash = true; // Prevents leading dash

    for c in text.chars() {
        if c.is_alphanumeric() {
            result.extend(c.to_lowercase());
            last_was_dash = false;
        } else if !last_was_dash {
            result.push('-');
            last_was_dash = true;
        }
    }

    if result.ends_with('-') {
        result.pop();
    }

    result
}

/// Assign a slug to `root` and all of its members, depth-first pre-order.
///
/// Member lists are visited in declared kind order, then list order, so the
/// same input always yields the same slugs.
pub fn assign_slugs(root: &mut DocBlock, slugger: &mut Slugger) {
    root.slug = slugger.slug(&root.name);
    for child in root.members.children_mut() {
        assign_slugs(child, slugger);
    }
}
