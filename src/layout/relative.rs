//! # Relative Box — constraint-override placement
//!
//! Children of a relative container are positioned by an ordered chain of
//! override rules, not a solved equation system. Every child starts at its
//! leading margins; each rule whose reference is set then overwrites the x
//! or y coordinate outright, and the last applicable rule per axis wins.
//! The rule order is fixed: attach-before (`toTopOf`/`toLeftOf`),
//! attach-after (`toBottomOf`/`toRightOf`), edge alignment, parent edges,
//! and finally gravity, which ignores everything before it on the axes it
//! covers.
//!
//! Rules read their target's frame as resolved *in this pass*, which is why
//! children are walked in insertion order and why a constraint may only
//! point backward: a reference to a later sibling would read a frame that
//! does not exist yet. Validation rejects that, along with non-sibling
//! targets and constraint cycles, before any child is moved.

use std::collections::HashMap;

use crate::error::LayoutError;
use crate::model::{Axis, Gravity, Margins, Rect};
use crate::tree::{BoxId, LayoutTree, Phase};

use super::resolved_extent;

/// Full pass for one relative container: size children, validate and apply
/// constraints, then self-size.
pub(crate) fn layout_relative(
    tree: &mut LayoutTree,
    id: BoxId,
    depth: usize,
) -> Result<(), LayoutError> {
    let entered_framed = tree.node(id).phase == Phase::Framed;
    size_children(tree, id, depth)?;
    validate_constraints(tree, id)?;
    position_children(tree, id, depth)?;
    frame_self(tree, id, depth, entered_framed)
}

/// Step 1: give every child a size. Container children run their own pass
/// and self-size; leaves resolve from their spec. Host-pinned sizes are
/// kept; everything else is re-derived from scratch.
fn size_children(tree: &mut LayoutTree, id: BoxId, depth: usize) -> Result<(), LayoutError> {
    let kids = tree.children(id).to_vec();
    for child in kids {
        let is_container = tree.node(child).kind.is_container();
        let node = tree.node_mut(child);
        if !node.explicit {
            node.frame = Rect::ZERO;
        }
        node.phase = Phase::Sizing;
        if is_container {
            tree.layout_at(child, depth + 1)?;
        } else {
            let width = resolved_extent(tree, child, Axis::Horizontal, depth)?;
            let height = resolved_extent(tree, child, Axis::Vertical, depth)?;
            let node = tree.node_mut(child);
            node.frame.width = width;
            node.frame.height = height;
        }
    }
    Ok(())
}

/// Reject constraint configurations the pass cannot honor: targets outside
/// this sibling group, reference cycles, and forward references. Cycles are
/// found with a visited-set walk so a bad configuration fails with a
/// descriptive path instead of looping.
fn validate_constraints(tree: &LayoutTree, id: BoxId) -> Result<(), LayoutError> {
    let children = tree.children(id);
    for &child in children {
        for &target in tree.node(child).constraints.references() {
            tree.check(target)?;
            if tree.node(target).parent != Some(id) {
                return Err(LayoutError::ForeignConstraint {
                    from: tree.label(child),
                    target: tree.label(target),
                });
            }
        }
    }

    let index_of: HashMap<BoxId, usize> = children
        .iter()
        .enumerate()
        .map(|(i, &c)| (c, i))
        .collect();

    let mut color = vec![WHITE; children.len()];
    for start in 0..children.len() {
        if color[start] == WHITE {
            if let Some(cycle) = visit(tree, children, &index_of, start, &mut color, &mut Vec::new())
            {
                let path = cycle
                    .iter()
                    .map(|&i| tree.label(children[i]))
                    .collect::<Vec<_>>()
                    .join(" -> ");
                return Err(LayoutError::ConstraintCycle { path });
            }
        }
    }

    for (i, &child) in children.iter().enumerate() {
        for &target in tree.node(child).constraints.references() {
            if index_of.get(&target).copied().unwrap_or(0) > i {
                return Err(LayoutError::ForwardReference {
                    from: tree.label(child),
                    target: tree.label(target),
                });
            }
        }
    }
    Ok(())
}

const WHITE: u8 = 0;
const GRAY: u8 = 1;
const BLACK: u8 = 2;

/// Depth-first walk over the sibling constraint graph. Returns the cycle
/// path (closed, first node repeated) if one is reachable from `idx`.
fn visit(
    tree: &LayoutTree,
    children: &[BoxId],
    index_of: &HashMap<BoxId, usize>,
    idx: usize,
    color: &mut [u8],
    stack: &mut Vec<usize>,
) -> Option<Vec<usize>> {
    color[idx] = GRAY;
    stack.push(idx);
    for &target in tree.node(children[idx]).constraints.references() {
        let Some(&t_idx) = index_of.get(&target) else {
            continue;
        };
        match color[t_idx] {
            GRAY => {
                let pos = stack.iter().position(|&s| s == t_idx).unwrap_or(0);
                let mut cycle = stack[pos..].to_vec();
                cycle.push(t_idx);
                return Some(cycle);
            }
            WHITE => {
                if let Some(cycle) = visit(tree, children, index_of, t_idx, color, stack) {
                    return Some(cycle);
                }
            }
            _ => {}
        }
    }
    stack.pop();
    color[idx] = BLACK;
    None
}

/// Step 2: walk children in insertion order and run each through the
/// override chain. The container's own extents are resolved once, up front,
/// for the parent-edge and gravity rules.
fn position_children(tree: &mut LayoutTree, id: BoxId, depth: usize) -> Result<(), LayoutError> {
    let parent_w = resolved_extent(tree, id, Axis::Horizontal, depth)?;
    let parent_h = resolved_extent(tree, id, Axis::Vertical, depth)?;
    let kids = tree.children(id).to_vec();
    for child in kids {
        tree.node_mut(child).phase = Phase::Positioning;
        let (x, y) = place(tree, child, parent_w, parent_h);
        let node = tree.node_mut(child);
        node.frame.x = x;
        node.frame.y = y;
        node.phase = Phase::Framed;
    }
    Ok(())
}

/// The override chain for one child. Each rule overwrites a single
/// coordinate; rules are applied in fixed order so the last applicable rule
/// per axis is the one that survives.
fn place(tree: &LayoutTree, child: BoxId, parent_w: f64, parent_h: f64) -> (f64, f64) {
    use Axis::{Horizontal as H, Vertical as V};

    let node = tree.node(child);
    let m = node.margins;
    let w = node.frame.width;
    let h = node.frame.height;
    let c = node.constraints.clone();

    let mut x = m.leading(H);
    let mut y = m.leading(V);

    if let Some(t) = c.to_top_of {
        let (tf, tm) = target(tree, t);
        y = tf.y - tm.leading(V) - (h + m.trailing(V));
    }
    if let Some(t) = c.to_left_of {
        let (tf, tm) = target(tree, t);
        x = tf.x - tm.leading(H) - (w + m.trailing(H));
    }
    if let Some(t) = c.to_bottom_of {
        let (tf, tm) = target(tree, t);
        y = tf.max_y() + tm.trailing(V) + m.leading(V);
    }
    if let Some(t) = c.to_right_of {
        let (tf, tm) = target(tree, t);
        x = tf.max_x() + tm.trailing(H) + m.leading(H);
    }
    if let Some(t) = c.align_top {
        let (tf, _) = target(tree, t);
        y = tf.y + m.leading(V);
    }
    if let Some(t) = c.align_left {
        let (tf, _) = target(tree, t);
        x = tf.x + m.leading(H);
    }
    if let Some(t) = c.align_bottom {
        let (tf, _) = target(tree, t);
        y = tf.max_y() - (h + m.trailing(V));
    }
    if let Some(t) = c.align_right {
        let (tf, _) = target(tree, t);
        x = tf.max_x() - (w + m.trailing(H));
    }
    if c.align_parent.top {
        y = m.leading(V);
    }
    if c.align_parent.left {
        x = m.leading(H);
    }
    if c.align_parent.bottom {
        y = parent_h - (h + m.trailing(V));
    }
    if c.align_parent.right {
        x = parent_w - (w + m.trailing(H));
    }
    match c.gravity {
        Gravity::Center => {
            x = (parent_w - w) / 2.0;
            y = (parent_h - h) / 2.0;
        }
        Gravity::CenterHorizontal => {
            x = (parent_w - w) / 2.0 + (m.left - m.right);
        }
        Gravity::CenterVertical => {
            y = (parent_h - h) / 2.0 + (m.top - m.bottom);
        }
        Gravity::None => {}
    }
    (x, y)
}

/// Frame and margins of a constraint target. Targets are always earlier
/// siblings, already framed in this pass.
fn target(tree: &LayoutTree, t: BoxId) -> (Rect, Margins) {
    let node = tree.node(t);
    debug_assert!(
        node.phase == Phase::Framed,
        "constraint target read before it is framed"
    );
    (node.frame, node.margins)
}

/// Step 3: unless the host pinned this box's frame (or a prior pass already
/// framed it and nothing reset it), derive the container's own size from its
/// spec — for `Wrap`, the now-positioned children — and park the origin at
/// the leading margins.
fn frame_self(
    tree: &mut LayoutTree,
    id: BoxId,
    depth: usize,
    entered_framed: bool,
) -> Result<(), LayoutError> {
    let node = tree.node(id);
    if !node.explicit && !entered_framed {
        let width = resolved_extent(tree, id, Axis::Horizontal, depth)?;
        let height = resolved_extent(tree, id, Axis::Vertical, depth)?;
        let m = tree.node(id).margins;
        let node = tree.node_mut(id);
        node.frame = Rect::new(m.leading(Axis::Horizontal), m.leading(Axis::Vertical), width, height);
    }
    tree.node_mut(id).phase = Phase::Framed;
    Ok(())
}

#[cfg(test)]
mod tests {
    use crate::model::{BoxDecl, Constraints, SizeSpec};
    use crate::tree::LayoutTree;
    use crate::LayoutError;

    fn named_leaf(name: &str, w: f64, h: f64) -> BoxDecl {
        BoxDecl {
            name: Some(name.to_string()),
            ..BoxDecl::leaf(w, h)
        }
    }

    #[test]
    fn test_axes_resolve_independently() {
        // x comes from an attach rule, y from a parent edge; neither
        // disturbs the other.
        let decl = BoxDecl::relative(
            SizeSpec::Fixed(300.0),
            SizeSpec::Fixed(300.0),
            vec![
                named_leaf("anchor", 100.0, 100.0),
                BoxDecl {
                    constraints: Constraints {
                        to_right_of: Some("anchor".into()),
                        align_parent: crate::model::AlignParent {
                            bottom: true,
                            ..Default::default()
                        },
                        ..Default::default()
                    },
                    ..BoxDecl::leaf(50.0, 50.0)
                },
            ],
        );
        let mut tree = LayoutTree::build(&decl).unwrap();
        tree.layout(tree.root()).unwrap();
        let child = tree.children(tree.root())[1];
        let frame = tree.frame(child);
        assert_eq!(frame.x, 100.0);
        assert_eq!(frame.y, 250.0);
    }

    #[test]
    fn test_self_reference_is_a_cycle() {
        let decl = BoxDecl::relative(
            SizeSpec::Fixed(300.0),
            SizeSpec::Fixed(300.0),
            vec![named_leaf("a", 10.0, 10.0), named_leaf("b", 10.0, 10.0)],
        );
        let mut tree = LayoutTree::build(&decl).unwrap();
        let a = tree.find("a").unwrap();
        tree.set_constraints(
            a,
            Constraints {
                align_left: Some(a),
                ..Default::default()
            },
        );
        let err = tree.layout(tree.root()).unwrap_err();
        assert!(matches!(err, LayoutError::ConstraintCycle { .. }));
    }
}
