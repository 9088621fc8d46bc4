//! Per-render processing pipeline.

use crate::model::DocBlock;
use crate::props::link_props;
use crate::slug::{Slugger, assign_slugs};
use crate::xref::{CrossLinkIndex, IndexOptions, build_index};

/// Output of a pipeline run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessedTree {
    /// Top-level blocks with slugs assigned and props attached.
    pub blocks: Vec<DocBlock>,
    /// Cross-link table for rendering.
    pub index: CrossLinkIndex,
}

/// State for one render: slug registry and index options.
///
/// A pipeline is consumed by [`run`](Self::run), so nothing carries over from
/// one render to the next.
#[derive(Debug, Default)]
pub struct Pipeline {
    slugger: Slugger,
    options: IndexOptions,
}

impl Pipeline {
    pub fn new(options: IndexOptions) -> Self {
        Self {
            slugger: Slugger::new(),
            options,
        }
    }

    /// Slug every block, attach properties blocks, then build the index.
    pub fn run(mut self, mut blocks: Vec<DocBlock>) -> ProcessedTree {
        for block in &mut blocks {
            assign_slugs(block, &mut self.slugger);
        }

        let blocks = link_props(blocks);
        let index = build_index(&blocks, &self.options);

        tracing::debug!(
            blocks = blocks.len(),
            slugs = self.slugger.len(),
            names = index.len(),
            "Processed documentation tree"
        );

        ProcessedTree { blocks, index }
    }
}
