//! Property block linking.
//!
//! Interfaces describing a component's properties are declared on their own
//! and tagged `@propsfor Component`. They are pulled out of the top level and
//! attached to the component they describe.

use crate::model::DocBlock;

/// Tag title marking a detached properties block.
pub const PROPS_FOR_TAG: &str = "propsfor";

/// Detach top-level `propsfor` blocks and attach each to its target.
///
/// Targets are searched depth-first pre-order, top-level block by top-level
/// block. At each visited block the first remaining detached entry naming it
/// is consumed, so a block gets at most one `props` and a detached block is
/// attached at most once. Detached blocks that match nothing are dropped.
pub fn link_props(blocks: Vec<DocBlock>) -> Vec<DocBlock> {
    let (mut detached, mut rest): (Vec<_>, Vec<_>) =
        blocks.into_iter().partition(DocBlock::is_detached_props);

    if !detached.is_empty() {
        for block in &mut rest {
            attach(block, &mut detached);
        }
    }

    for dropped in &detached {
        tracing::debug!(
            name = %dropped.name,
            props_for = dropped.props_target().unwrap_or_default(),
            "Dropping unmatched properties block"
        );
    }

    rest
}

fn attach(block: &mut DocBlock, detached: &mut Vec<DocBlock>) {
    if detached.is_empty() {
        return;
    }

    if let Some(idx) = detached
        .iter()
        .position(|p| p.props_target() == Some(block.name.as_str()))
    {
        block.props = Some(Box::new(detached.remove(idx)));
    }

    for child in block.members.children_mut() {
        attach(child, detached);
    }
}
