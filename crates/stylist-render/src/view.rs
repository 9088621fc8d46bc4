//! Template view model.
//!
//! The processed tree is flattened into the shapes the page template walks:
//! a navigation tree and a pre-order list of sections. Descriptions are
//! rendered to HTML here; type expressions stay raw and are linked by the
//! template through `link_type`.

use serde::Serialize;
use stylist_config::{ClassNames, Config};
use stylist_tree::{DocBlock, Param, ResolveError};

use crate::assets::Asset;
use crate::link::Linker;
use crate::markdown::{render_inline_linked, render_markdown_linked};

const DEFAULT_TITLE: &str = "API Documentation";

#[derive(Debug, Serialize)]
pub(crate) struct PageView<'a> {
    title: String,
    project_name: Option<&'a str>,
    project_version: Option<&'a str>,
    classes: &'a ClassNames,
    stylesheets: Vec<&'a str>,
    scripts: Vec<&'a str>,
    nav: Vec<NavItem<'a>>,
    sections: Vec<Section<'a>>,
}

#[derive(Debug, PartialEq, Eq, Serialize)]
struct NavItem<'a> {
    name: &'a str,
    slug: &'a str,
    children: Vec<NavItem<'a>>,
}

#[derive(Debug, Serialize)]
struct Section<'a> {
    name: &'a str,
    slug: &'a str,
    kind: Option<&'a str>,
    depth: usize,
    heading: u8,
    parent: Option<&'a str>,
    /// Member-kind heading, set on the first member of each kind.
    members_label: Option<&'static str>,
    description: Option<String>,
    params: Vec<ParamView<'a>>,
    returns: Vec<ReturnView<'a>>,
    examples: Vec<ExampleView<'a>>,
    props: Option<PropsView<'a>>,
    source: Option<String>,
}

#[derive(Debug, Serialize)]
struct ParamView<'a> {
    name: &'a str,
    #[serde(rename = "type")]
    type_expr: Option<&'a str>,
    description: Option<String>,
    default: Option<&'a str>,
}

#[derive(Debug, Serialize)]
struct ReturnView<'a> {
    #[serde(rename = "type")]
    type_expr: Option<&'a str>,
    description: Option<String>,
}

#[derive(Debug, Serialize)]
struct ExampleView<'a> {
    caption: Option<String>,
    code: &'a str,
}

#[derive(Debug, Serialize)]
struct PropsView<'a> {
    name: &'a str,
    slug: &'a str,
    description: Option<String>,
    properties: Vec<ParamView<'a>>,
}

impl<'a> PageView<'a> {
    pub(crate) fn build(
        blocks: &'a [DocBlock],
        config: &'a Config,
        assets: &'a [Asset],
        linker: &Linker,
    ) -> Result<Self, ResolveError> {
        let project_name = config.project.name.as_deref();
        let project_version = config.project.version.as_deref();
        let title = match (project_name, project_version) {
            (Some(name), Some(version)) => format!("{name} {version}"),
            (Some(name), None) => name.to_owned(),
            (None, _) => DEFAULT_TITLE.to_owned(),
        };

        let mut sections = Vec::new();
        for block in blocks {
            push_sections(&mut sections, block, 0, None, None, linker)?;
        }

        Ok(Self {
            title,
            project_name,
            project_version,
            classes: &config.theme_resolved.classes,
            stylesheets: assets
                .iter()
                .filter(|a| a.is_stylesheet())
                .map(|a| a.path.as_str())
                .collect(),
            scripts: assets
                .iter()
                .filter(|a| a.is_script())
                .map(|a| a.path.as_str())
                .collect(),
            nav: blocks.iter().map(NavItem::from_block).collect(),
            sections,
        })
    }
}

impl<'a> NavItem<'a> {
    fn from_block(block: &'a DocBlock) -> Self {
        Self {
            name: &block.name,
            slug: &block.slug,
            children: block
                .members
                .iter()
                .flat_map(|(_, list)| list.iter().map(Self::from_block))
                .collect(),
        }
    }
}

fn push_sections<'a>(
    out: &mut Vec<Section<'a>>,
    block: &'a DocBlock,
    depth: usize,
    parent: Option<&'a str>,
    members_label: Option<&'static str>,
    linker: &Linker,
) -> Result<(), ResolveError> {
    out.push(Section::new(block, depth, parent, members_label, linker)?);

    for (kind, list) in block.members.iter() {
        for (i, child) in list.iter().enumerate() {
            let label = (i == 0).then(|| kind.label());
            push_sections(out, child, depth + 1, Some(&block.name), label, linker)?;
        }
    }
    Ok(())
}

impl<'a> Section<'a> {
    fn new(
        block: &'a DocBlock,
        depth: usize,
        parent: Option<&'a str>,
        members_label: Option<&'static str>,
        linker: &Linker,
    ) -> Result<Self, ResolveError> {
        let props = block
            .props
            .as_deref()
            .map(|props| PropsView::new(props, linker))
            .transpose()?;

        let returns = block
            .returns
            .iter()
            .map(|ret| -> Result<_, ResolveError> {
                Ok(ReturnView {
                    type_expr: ret.type_expr.as_deref(),
                    description: inline(ret.description.as_deref(), linker)?,
                })
            })
            .collect::<Result<_, _>>()?;

        let examples = block
            .examples
            .iter()
            .map(|example| -> Result<_, ResolveError> {
                Ok(ExampleView {
                    caption: inline(example.caption.as_deref(), linker)?,
                    code: &example.description,
                })
            })
            .collect::<Result<_, _>>()?;

        Ok(Self {
            name: &block.name,
            slug: &block.slug,
            kind: block.kind.as_deref(),
            depth,
            heading: heading_level(depth),
            parent,
            members_label,
            description: markdown(block.description.as_deref(), linker)?,
            params: params(&block.params, linker)?,
            returns,
            examples,
            props,
            source: block.context.as_ref().and_then(|ctx| {
                let file = ctx.file.as_deref()?;
                Some(match ctx.line {
                    Some(line) => format!("{file}:{line}"),
                    None => file.to_owned(),
                })
            }),
        })
    }
}

impl<'a> PropsView<'a> {
    fn new(block: &'a DocBlock, linker: &Linker) -> Result<Self, ResolveError> {
        Ok(Self {
            name: &block.name,
            slug: &block.slug,
            description: markdown(block.description.as_deref(), linker)?,
            properties: params(&block.properties, linker)?,
        })
    }
}

fn heading_level(depth: usize) -> u8 {
    match depth {
        0 => 2,
        1 => 3,
        _ => 4,
    }
}

fn params<'a>(params: &'a [Param], linker: &Linker) -> Result<Vec<ParamView<'a>>, ResolveError> {
    params
        .iter()
        .map(|param| -> Result<_, ResolveError> {
            Ok(ParamView {
                name: &param.name,
                type_expr: param.type_expr.as_deref(),
                description: inline(param.description.as_deref(), linker)?,
                default: param.default.as_deref(),
            })
        })
        .collect()
}

fn markdown(text: Option<&str>, linker: &Linker) -> Result<Option<String>, ResolveError> {
    text.filter(|t| !t.trim().is_empty())
        .map(|t| render_markdown_linked(t, linker))
        .transpose()
}

fn inline(text: Option<&str>, linker: &Linker) -> Result<Option<String>, ResolveError> {
    text.filter(|t| !t.trim().is_empty())
        .map(|t| render_inline_linked(t, linker))
        .transpose()
}
