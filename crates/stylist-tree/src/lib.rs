//! Documentation tree model and processing pipeline for Stylist.
//!
//! The extractor hands us a forest of [`DocBlock`]s. Before rendering, a
//! [`Pipeline`] runs three stages over it:
//!
//! 1. [`assign_slugs`]: every block gets a unique URL fragment.
//! 2. [`link_props`]: blocks tagged `@propsfor Target` are detached from the
//!    top level and attached to `Target` as its `props`.
//! 3. [`build_index`]: a name → slug table for cross-linking. Names declared
//!    more than once become [`LinkEntry::Ambiguous`] and never link.
//!
//! # Example
//!
//! ```
//! use stylist_tree::{IndexOptions, Pipeline, parse_blocks};
//!
//! let blocks = parse_blocks(r#"[{"name": "Foo"}, {"name": "Foo"}]"#).unwrap();
//! let processed = Pipeline::new(IndexOptions::default()).run(blocks);
//!
//! assert_eq!(processed.blocks[0].slug, "foo");
//! assert_eq!(processed.blocks[1].slug, "foo-1");
//! assert!(processed.index.is_ambiguous("Foo"));
//! ```

mod error;
mod model;
mod pipeline;
mod props;
mod slug;
mod xref;

pub use error::{ResolveError, TreeError};
pub use model::{
    DocBlock, Example, MemberKind, Members, Param, Returns, SourceContext, Tag, find_tag,
    parse_blocks,
};
pub use pipeline::{Pipeline, ProcessedTree};
pub use props::{PROPS_FOR_TAG, link_props};
pub use slug::{Slugger, assign_slugs, slugify};
pub use xref::{CrossLinkIndex, ExternalResolver, IndexOptions, LinkEntry, LinkTarget, build_index};
