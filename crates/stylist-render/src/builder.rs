//! Static site builder.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use stylist_config::{Config, ConfigError, ExternalLinks};
use stylist_tree::{DocBlock, ExternalResolver, IndexOptions, Pipeline, parse_blocks};

use crate::error::BuildError;
use crate::renderer::{RenderInput, render};
use crate::writer::SiteWriter;

/// Result of a build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildOutput {
    /// No output directory configured: the rendered page.
    Html(String),
    /// Page and assets written to `dir`.
    Written { dir: PathBuf, files: Vec<PathBuf> },
}

/// Builds a documentation site from extractor output.
///
/// Every call to [`build`](Self::build) runs a fresh pipeline, so one
/// builder can render several trees without state leaking between them.
pub struct StaticSiteBuilder<'a> {
    config: &'a Config,
    resolver: Option<Arc<dyn ExternalResolver>>,
}

impl<'a> StaticSiteBuilder<'a> {
    pub fn new(config: &'a Config) -> Self {
        Self {
            config,
            resolver: None,
        }
    }

    /// Use `resolver` for external names instead of the configured link table.
    #[must_use]
    pub fn with_resolver(mut self, resolver: Arc<dyn ExternalResolver>) -> Self {
        self.resolver = Some(resolver);
        self
    }

    /// Parse extractor JSON and build it.
    ///
    /// # Errors
    ///
    /// Returns `BuildError::Input` for malformed JSON, otherwise as
    /// [`build`](Self::build).
    pub fn build_json(&self, json: &str) -> Result<BuildOutput, BuildError> {
        self.build(parse_blocks(json)?)
    }

    /// Process, render and (when an output directory is set) write the site.
    ///
    /// # Errors
    ///
    /// Returns an error if the AST dump or the external link table cannot be
    /// handled, if rendering fails, or if the site cannot be written.
    pub fn build(&self, blocks: Vec<DocBlock>) -> Result<BuildOutput, BuildError> {
        let theme = &self.config.theme_resolved;

        if let Some(path) = &theme.dump_ast {
            dump_tree(path, &blocks)?;
        }

        let resolver = self.external_resolver()?;
        let processed = Pipeline::new(IndexOptions {
            dupe_warning: theme.cross_links_dupe_warning,
        })
        .run(blocks);

        let output = render(&RenderInput {
            blocks: &processed.blocks,
            config: self.config,
            index: &processed.index,
            resolver,
        })?;

        let Some(dir) = &self.config.output_resolved.dir else {
            tracing::info!(bytes = output.html.len(), "Rendered documentation page");
            return Ok(BuildOutput::Html(output.html));
        };

        let files = SiteWriter::new(dir).write(&output)?;
        tracing::info!(dir = %dir.display(), files = files.len(), "Wrote documentation site");

        Ok(BuildOutput::Written {
            dir: dir.clone(),
            files,
        })
    }

    fn external_resolver(&self) -> Result<Option<Arc<dyn ExternalResolver>>, ConfigError> {
        if let Some(resolver) = &self.resolver {
            return Ok(Some(Arc::clone(resolver)));
        }
        let Some(path) = &self.config.theme_resolved.external_cross_links else {
            return Ok(None);
        };

        let links = ExternalLinks::load(path)?;
        tracing::debug!(path = %path.display(), links = links.len(), "Loaded external cross-links");
        Ok(Some(Arc::new(links)))
    }
}

/// Write the unprocessed input tree as pretty JSON.
fn dump_tree(path: &Path, blocks: &[DocBlock]) -> Result<(), BuildError> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(|source| BuildError::Write {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    let json = serde_json::to_string_pretty(blocks)?;
    fs::write(path, json).map_err(|source| BuildError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::debug!(path = %path.display(), "Dumped documentation tree");
    Ok(())
}
