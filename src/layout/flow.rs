//! # Flow Box — sequential wrapping placement
//!
//! Children are placed one after another along the container's primary axis.
//! When a child's far edge (including its trailing margin) would pass the
//! container's bound, placement wraps: the child returns to the leading
//! margin and the row/column advances along the cross axis. The tie is
//! strict — a child landing exactly on the bound stays put.
//!
//! The sizing step of this pass is deliberately a no-op: children keep
//! whatever size they already carry. A container child must have run its own
//! pass, and a leaf child must have been sized by the host, before this pass
//! places them. Only the flow box's *own* frame is derived here, at the end,
//! from the extents its children actually used.

use crate::error::LayoutError;
use crate::model::{Axis, Direction, Rect, SizeSpec};
use crate::tree::{BoxId, LayoutTree, Phase};

use super::{resolved_extent, wrap_extent};

/// Full pass for one flow container.
pub(crate) fn layout_flow(
    tree: &mut LayoutTree,
    id: BoxId,
    direction: Direction,
    depth: usize,
) -> Result<(), LayoutError> {
    let entered_framed = tree.node(id).phase == Phase::Framed;
    // Child sizing is a no-op by design; see the module docs.
    place_children(tree, id, direction, depth)?;
    frame_self(tree, id, depth, entered_framed)
}

/// Walk children in insertion order, advancing along the primary axis and
/// wrapping at the container bound. `max` tracks the cross-axis extent
/// consumed by the current row/column; it becomes the offset base after a
/// wrap.
fn place_children(
    tree: &mut LayoutTree,
    id: BoxId,
    direction: Direction,
    depth: usize,
) -> Result<(), LayoutError> {
    let primary = direction.primary();
    let cross = direction.cross();
    let bound = resolved_extent(tree, id, primary, depth)?;

    let kids = tree.children(id).to_vec();
    let mut last: Option<BoxId> = None;
    let mut max = 0.0f64;
    for child in kids {
        tree.node_mut(child).phase = Phase::Positioning;
        let (m, extent) = {
            let node = tree.node(child);
            (node.margins, node.frame.extent(primary))
        };

        let mut p = m.leading(primary);
        let mut q = m.leading(cross);
        if let Some(prev_id) = last {
            let (prev_frame, prev_margins) = {
                let prev = tree.node(prev_id);
                (prev.frame, prev.margins)
            };
            p = prev_frame.far(primary) + prev_margins.trailing(primary) + m.leading(primary);
            q = max + prev_margins.trailing(cross) + m.leading(cross);
            if p + extent + m.trailing(primary) > bound {
                p = m.leading(primary);
                q = prev_frame.far(cross) + prev_margins.trailing(cross) + m.leading(cross);
                max = q - m.leading(cross);
                tracing::trace!(
                    child = %tree.label(child),
                    offset = q,
                    "flow wrap"
                );
            }
        }

        let node = tree.node_mut(child);
        node.frame.set_origin(primary, p);
        node.frame.set_origin(cross, q);
        node.phase = Phase::Framed;
        last = Some(child);
    }
    Ok(())
}

/// Unless the host framed this box, size it to the ceiling of the extents
/// its placed children used (`Wrap`), or to the spec-resolved extent
/// (`Fixed`/`Fill`), and park the origin at the leading margins.
fn frame_self(
    tree: &mut LayoutTree,
    id: BoxId,
    depth: usize,
    entered_framed: bool,
) -> Result<(), LayoutError> {
    let node = tree.node(id);
    if !node.explicit && !entered_framed {
        let width = self_extent(tree, id, Axis::Horizontal, depth)?.ceil();
        let height = self_extent(tree, id, Axis::Vertical, depth)?.ceil();
        let m = tree.node(id).margins;
        let node = tree.node_mut(id);
        node.frame = Rect::new(
            m.leading(Axis::Horizontal),
            m.leading(Axis::Vertical),
            width,
            height,
        );
    }
    tree.node_mut(id).phase = Phase::Framed;
    Ok(())
}

fn self_extent(
    tree: &LayoutTree,
    id: BoxId,
    axis: Axis,
    depth: usize,
) -> Result<f64, LayoutError> {
    let node = tree.node(id);
    let spec = match axis {
        Axis::Horizontal => node.width,
        Axis::Vertical => node.height,
    };
    match spec {
        // Content size exists only now that children are placed; the
        // resolver reports zero for a wrap flow box on purpose.
        SizeSpec::Wrap => Ok(wrap_extent(tree, id, axis)),
        _ => resolved_extent(tree, id, axis, depth),
    }
}
