//! Render adapter entry point.

use std::sync::Arc;

use stylist_config::Config;
use stylist_tree::{CrossLinkIndex, DocBlock, ExternalResolver};

use crate::assets::{Asset, theme_assets};
use crate::error::RenderError;
use crate::link::Linker;
use crate::template::render_page;
use crate::view::PageView;

/// Everything one render reads. Nothing here is modified.
pub struct RenderInput<'a> {
    /// Processed top-level blocks (slugs assigned, props attached).
    pub blocks: &'a [DocBlock],
    pub config: &'a Config,
    pub index: &'a CrossLinkIndex,
    /// Resolver for names documented elsewhere.
    pub resolver: Option<Arc<dyn ExternalResolver>>,
}

/// Rendered page and the assets it links to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOutput {
    pub html: String,
    pub assets: Vec<Asset>,
}

/// Render the documentation page.
///
/// # Errors
///
/// Returns `RenderError::Resolve` if the external resolver fails and
/// `RenderError::Template` if the page template fails to render.
pub fn render(input: &RenderInput<'_>) -> Result<RenderOutput, RenderError> {
    let assets = theme_assets(&input.config.theme_resolved);
    let linker = Linker::new(Arc::new(input.index.clone()), input.resolver.clone());

    let page = PageView::build(input.blocks, input.config, &assets, &linker)?;
    let html = render_page(&page, linker)?;

    tracing::debug!(
        blocks = input.blocks.len(),
        bytes = html.len(),
        assets = assets.len(),
        "Rendered page"
    );

    Ok(RenderOutput { html, assets })
}
