//! Documentation tree model.
//!
//! Mirrors the JSON emitted by the comment extractor. Only the fields the
//! theme renders are modelled; unknown fields are ignored on input.

use serde::{Deserialize, Serialize};

use crate::error::TreeError;
use crate::props::PROPS_FOR_TAG;

/// A node in the documentation tree (class, function, interface, ...).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DocBlock {
    /// Declaration name. Not unique across the tree.
    pub name: String,
    /// Declaration kind as reported by the extractor (`class`, `function`, ...).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    /// Markdown description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Free-form `@tag` metadata, in source order.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<Tag>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub params: Vec<Param>,
    /// Documented properties of an object type or interface.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub properties: Vec<Param>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub returns: Vec<Returns>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub examples: Vec<Example>,
    /// Where the block was declared.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<SourceContext>,
    /// Child blocks grouped by member kind.
    #[serde(skip_serializing_if = "Members::is_empty")]
    pub members: Members,
    /// Unique URL fragment, empty until slugs are assigned.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub slug: String,
    /// Attached property/type contract block.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub props: Option<Box<DocBlock>>,
}

impl DocBlock {
    /// Create a block with only a name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Append a tag.
    #[must_use]
    pub fn with_tag(mut self, title: impl Into<String>, description: impl Into<String>) -> Self {
        self.tags.push(Tag {
            title: title.into(),
            description: Some(description.into()),
        });
        self
    }

    /// Append a child block under `kind`.
    #[must_use]
    pub fn with_member(mut self, kind: MemberKind, child: DocBlock) -> Self {
        self.members.get_mut(kind).push(child);
        self
    }

    /// Description of the first tag titled `title`.
    pub fn tag(&self, title: &str) -> Option<&str> {
        find_tag(&self.tags, title)
    }

    /// Whether the block carries a `propsfor` tag, with or without a target.
    pub fn is_detached_props(&self) -> bool {
        self.tags.iter().any(|t| t.title == PROPS_FOR_TAG)
    }

    /// Name of the block this one describes the properties of.
    pub fn props_target(&self) -> Option<&str> {
        self.tag(PROPS_FOR_TAG)
    }
}

/// A `@title description` pair.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Look up the description of the first tag with the given title.
///
/// Returns `None` if no tag matches, or if the first match has no description.
/// Later tags with the same title are never consulted.
pub fn find_tag<'a>(tags: &'a [Tag], title: &str) -> Option<&'a str> {
    tags.iter()
        .find(|t| t.title == title)
        .and_then(|t| t.description.as_deref())
}

/// A documented parameter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Param {
    pub name: String,
    /// Type expression, e.g. `Array<Button>`.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub type_expr: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,
}

/// A documented return value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Returns {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub type_expr: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// An `@example` body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Example {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
    /// Example source code.
    pub description: String,
}

/// Source location of a block.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceContext {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<u32>,
}

/// Member kinds, in traversal order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MemberKind {
    Global,
    Inner,
    Instance,
    Events,
    Static,
}

impl MemberKind {
    /// All kinds in declared order.
    pub const ALL: [Self; 5] = [
        Self::Global,
        Self::Inner,
        Self::Instance,
        Self::Events,
        Self::Static,
    ];

    /// Key used in extractor JSON.
    pub fn key(self) -> &'static str {
        match self {
            Self::Global => "global",
            Self::Inner => "inner",
            Self::Instance => "instance",
            Self::Events => "events",
            Self::Static => "static",
        }
    }

    /// Section heading used when rendering.
    pub fn label(self) -> &'static str {
        match self {
            Self::Global => "Global Members",
            Self::Inner => "Inner Members",
            Self::Instance => "Instance Members",
            Self::Events => "Events",
            Self::Static => "Static Members",
        }
    }
}

/// Child blocks keyed by member kind.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Members {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub global: Vec<DocBlock>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub inner: Vec<DocBlock>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub instance: Vec<DocBlock>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub events: Vec<DocBlock>,
    #[serde(rename = "static", skip_serializing_if = "Vec::is_empty")]
    pub statics: Vec<DocBlock>,
}

impl Members {
    pub fn get(&self, kind: MemberKind) -> &[DocBlock] {
        match kind {
            MemberKind::Global => &self.global,
            MemberKind::Inner => &self.inner,
            MemberKind::Instance => &self.instance,
            MemberKind::Events => &self.events,
            MemberKind::Static => &self.statics,
        }
    }

    pub fn get_mut(&mut self, kind: MemberKind) -> &mut Vec<DocBlock> {
        match kind {
            MemberKind::Global => &mut self.global,
            MemberKind::Inner => &mut self.inner,
            MemberKind::Instance => &mut self.instance,
            MemberKind::Events => &mut self.events,
            MemberKind::Static => &mut self.statics,
        }
    }

    /// Non-empty member lists in declared kind order.
    pub fn iter(&self) -> impl Iterator<Item = (MemberKind, &[DocBlock])> {
        MemberKind::ALL
            .into_iter()
            .map(|kind| (kind, self.get(kind)))
            .filter(|(_, list)| !list.is_empty())
    }

    /// Every child block in declared kind order, then list order.
    pub fn children_mut(&mut self) -> impl Iterator<Item = &mut DocBlock> {
        self.global
            .iter_mut()
            .chain(self.inner.iter_mut())
            .chain(self.instance.iter_mut())
            .chain(self.events.iter_mut())
            .chain(self.statics.iter_mut())
    }

    pub fn is_empty(&self) -> bool {
        MemberKind::ALL.iter().all(|&k| self.get(k).is_empty())
    }
}

/// Parse extractor output: a JSON array of documentation blocks.
pub fn parse_blocks(json: &str) -> Result<Vec<DocBlock>, TreeError> {
    Ok(serde_json::from_str(json)?)
}
