//! HTML rendering and static site output for Stylist.
//!
//! [`render`] turns a processed documentation tree into a single HTML page
//! plus the list of assets it references. It never mutates the tree and
//! produces identical output for identical input.
//!
//! [`StaticSiteBuilder`] runs the whole build for a loaded [`Config`]: dump the
//! raw input if asked, process the tree, render, then either return the HTML
//! or write `index.html` and the assets into the output directory.
//!
//! [`Config`]: stylist_config::Config

mod assets;
mod builder;
mod error;
mod link;
mod markdown;
mod renderer;
mod template;
mod view;
mod writer;

pub use assets::{Asset, AssetSource, theme_assets};
pub use builder::{BuildOutput, StaticSiteBuilder};
pub use error::{BuildError, RenderError};
pub use link::{Linker, escape_html};
pub use markdown::{render_inline, render_inline_linked, render_markdown, render_markdown_linked};
pub use renderer::{RenderInput, RenderOutput, render};
pub use writer::SiteWriter;
