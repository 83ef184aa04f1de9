//! # Layout Engine
//!
//! The heart of the crate: size resolution and the per-kind layout pass.
//!
//! ## The pass
//!
//! Every container runs the same three-step pipeline when layout is
//! requested:
//!
//! 1. Resolve children's sizes. Container children delegate to their own
//!    recursive pass (they must self-size); leaf children are sized from
//!    their spec or the host-established content size.
//! 2. Resolve children's origins — by constraint rules (Relative) or
//!    sequential wrapping placement (Flow).
//! 3. Resolve the container's own frame, unless the host already framed it.
//!
//! Size comes strictly before position: a constraint can read a sibling's
//! extent only because step 1 ran for every child first, and a sibling's
//! origin only because children are positioned in insertion order.
//!
//! ## Size resolution
//!
//! `Fill` walks up the ancestor chain: the parent's extent may itself need
//! resolving (a `Fixed` grandparent behind a `Fill` parent), so the walk is
//! recursive but bounded — exceeding [`MAX_DEPTH`] is reported as a
//! configuration error instead of overflowing the stack. `Wrap` reads the
//! children's current frames, never their specs, which is what keeps the
//! mutual fill/wrap dependency between a container and its parent from
//! looping: the two directions consume different data.

pub mod flow;
pub mod relative;

use serde::Serialize;

use crate::error::LayoutError;
use crate::model::{Axis, BoxKind, SizeSpec};
use crate::tree::{BoxId, BoxNode, LayoutTree};

/// Upper bound on tree depth and `Fill` ancestor walks.
pub(crate) const MAX_DEPTH: usize = 256;

impl LayoutTree {
    /// Run a layout pass on a container box. On success every box in the
    /// subtree is `Framed` and its frame is authoritative.
    pub fn layout(&mut self, id: BoxId) -> Result<(), LayoutError> {
        self.check(id)?;
        if !self.node(id).kind.is_container() {
            return Err(LayoutError::NotAContainer(self.label(id)));
        }
        tracing::debug!(root = %self.label(id), "layout pass");
        self.layout_at(id, 0)
    }

    /// Kind dispatch for one container, shared by the public entry point and
    /// the recursive container-child case.
    pub(crate) fn layout_at(&mut self, id: BoxId, depth: usize) -> Result<(), LayoutError> {
        if depth >= MAX_DEPTH {
            return Err(LayoutError::DepthExceeded(MAX_DEPTH));
        }
        match self.node(id).kind.clone() {
            BoxKind::Relative => relative::layout_relative(self, id, depth),
            BoxKind::Flow { direction } => flow::layout_flow(self, id, direction, depth),
            BoxKind::Leaf => Err(LayoutError::NotAContainer(self.label(id))),
        }
    }
}

fn spec_on(node: &BoxNode, axis: Axis) -> SizeSpec {
    match axis {
        Axis::Horizontal => node.width,
        Axis::Vertical => node.height,
    }
}

/// Resolve a box's extent along one axis.
///
/// A frame that already carries a positive extent wins outright — a box
/// explicitly sized earlier in the pass is never recomputed. Otherwise the
/// spec decides: `Fixed` is taken as-is, `Fill` consumes the parent's
/// resolved extent minus the box's own effective margins (clamped at zero,
/// never negative geometry), and `Wrap` is kind-specific: flow containers
/// report zero here and receive their content size from their own self-size
/// step, everything else shrinks to the children's far edges.
pub(crate) fn resolved_extent(
    tree: &LayoutTree,
    id: BoxId,
    axis: Axis,
    depth: usize,
) -> Result<f64, LayoutError> {
    if depth >= MAX_DEPTH {
        return Err(LayoutError::DepthExceeded(MAX_DEPTH));
    }
    let node = tree.node(id);
    let current = node.frame.extent(axis);
    if current > 0.0 {
        return Ok(current);
    }
    match spec_on(node, axis) {
        SizeSpec::Fixed(v) => Ok(v.max(0.0)),
        SizeSpec::Fill => {
            let Some(parent) = node.parent else {
                return Ok(0.0);
            };
            let available = resolved_extent(tree, parent, axis, depth + 1)?;
            let margins = node.margins.leading(axis) + node.margins.trailing(axis);
            Ok((available - margins).max(0.0))
        }
        SizeSpec::Wrap => match node.kind {
            BoxKind::Flow { .. } => Ok(0.0),
            _ => Ok(wrap_extent(tree, id, axis)),
        },
    }
}

/// Content extent along one axis: the maximum over children of the child's
/// far edge plus its trailing effective margin. Zero for no children.
pub(crate) fn wrap_extent(tree: &LayoutTree, id: BoxId, axis: Axis) -> f64 {
    tree.children(id)
        .iter()
        .map(|&child| {
            let node = tree.node(child);
            node.frame.far(axis) + node.margins.trailing(axis)
        })
        .fold(0.0, f64::max)
}

// ── Resolved-frame report ──────────────────────────────────────

/// Serializable snapshot of a laid-out tree, for hosts and tooling.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutReport {
    pub root: FrameInfo,
}

/// One box's resolved frame, with children nested.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FrameInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub kind: String,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub framed: bool,
    pub children: Vec<FrameInfo>,
}

fn kind_name(kind: &BoxKind) -> &'static str {
    match kind {
        BoxKind::Leaf => "Leaf",
        BoxKind::Relative => "Relative",
        BoxKind::Flow { .. } => "Flow",
    }
}

impl LayoutReport {
    /// Extract the frame snapshot for a subtree.
    pub fn from_tree(tree: &LayoutTree, root: BoxId) -> Self {
        LayoutReport {
            root: build_info(tree, root),
        }
    }
}

fn build_info(tree: &LayoutTree, id: BoxId) -> FrameInfo {
    let node = tree.node(id);
    FrameInfo {
        name: node.name.clone(),
        kind: kind_name(&node.kind).to_string(),
        x: node.frame.x,
        y: node.frame.y,
        width: node.frame.width,
        height: node.frame.height,
        framed: tree.is_framed(id),
        children: tree
            .children(id)
            .iter()
            .map(|&child| build_info(tree, child))
            .collect(),
    }
}
