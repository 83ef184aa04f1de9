//! # Box Tree
//!
//! The ownership structure the engine operates on. Boxes live in a flat
//! arena; a box owns its children as an insertion-ordered list of handles
//! and holds a non-owning handle back to its parent. Sibling constraints are
//! also stored as handles, so relations never create shared ownership and
//! the tree stays a strict tree.
//!
//! A tree is usually built in one shot from a declarative [`BoxDecl`]
//! document, which also resolves constraint names to sibling handles. The
//! host may then mutate specs, margins, constraints, and content sizes
//! between passes; mutations only take effect on the next `layout()` call.

use std::collections::HashMap;

use crate::error::LayoutError;
use crate::model::{BoxDecl, BoxKind, Constraints, Margins, Rect, Size, SizeSpec};

/// Handle to a box in a [`LayoutTree`]. Handles are only meaningful for the
/// tree that minted them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct BoxId(pub(crate) usize);

/// Lifecycle of a box within a single layout pass.
///
/// Every box moves `Unresolved → Sizing → Positioning → Framed` at most once
/// per pass. `Framed` is the explicit "this frame is authoritative" marker:
/// the engine never infers resolution state from geometry, so a legitimately
/// zero-sized box is not mistaken for an unresolved one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Phase {
    #[default]
    Unresolved,
    Sizing,
    Positioning,
    Framed,
}

#[derive(Debug, Clone)]
pub(crate) struct BoxNode {
    pub(crate) kind: BoxKind,
    pub(crate) name: Option<String>,
    pub(crate) width: SizeSpec,
    pub(crate) height: SizeSpec,
    pub(crate) margins: Margins,
    pub(crate) constraints: Constraints<BoxId>,
    pub(crate) parent: Option<BoxId>,
    pub(crate) children: Vec<BoxId>,
    pub(crate) frame: Rect,
    pub(crate) phase: Phase,
    /// Set when the host pinned this box's size (or full frame). The engine
    /// keeps the size across passes and skips the self-sizing step.
    pub(crate) explicit: bool,
}

/// The box tree plus per-box layout state.
#[derive(Debug, Clone)]
pub struct LayoutTree {
    nodes: Vec<BoxNode>,
    root: BoxId,
}

impl LayoutTree {
    /// Build a tree from a declarative document, resolving constraint names
    /// to sibling handles. Fails on duplicate names, references to unknown
    /// names, and references to non-siblings.
    pub fn build(decl: &BoxDecl) -> Result<Self, LayoutError> {
        let mut tree = LayoutTree {
            nodes: Vec::new(),
            root: BoxId(0),
        };
        let mut names = HashMap::new();
        let mut pending = Vec::new();
        let root = tree.insert_subtree(None, decl, &mut names, &mut pending)?;
        tree.root = root;
        tree.resolve_pending(&names, &pending)?;
        Ok(tree)
    }

    /// Append a declarative subtree under an existing box. Constraint names
    /// inside the subtree may reference boxes already in the tree.
    pub fn add_child(&mut self, parent: BoxId, decl: &BoxDecl) -> Result<BoxId, LayoutError> {
        self.check(parent)?;
        let mut names: HashMap<String, BoxId> = self
            .nodes
            .iter()
            .enumerate()
            .filter_map(|(i, n)| n.name.clone().map(|name| (name, BoxId(i))))
            .collect();
        let mut pending = Vec::new();
        let id = self.insert_subtree(Some(parent), decl, &mut names, &mut pending)?;
        self.node_mut(parent).children.push(id);
        self.resolve_pending(&names, &pending)?;
        Ok(id)
    }

    fn insert_subtree<'d>(
        &mut self,
        parent: Option<BoxId>,
        decl: &'d BoxDecl,
        names: &mut HashMap<String, BoxId>,
        pending: &mut Vec<(BoxId, &'d Constraints<String>)>,
    ) -> Result<BoxId, LayoutError> {
        let id = BoxId(self.nodes.len());
        let mut node = BoxNode {
            kind: decl.kind.clone(),
            name: decl.name.clone(),
            width: decl.width,
            height: decl.height,
            margins: decl.margins.sanitized(),
            constraints: Constraints::default(),
            parent,
            children: Vec::new(),
            frame: Rect::ZERO,
            phase: Phase::Unresolved,
            explicit: false,
        };
        if let Some(size) = decl.size {
            node.frame.width = size.width.max(0.0);
            node.frame.height = size.height.max(0.0);
            node.explicit = true;
        }
        self.nodes.push(node);

        if let Some(name) = &decl.name {
            if names.insert(name.clone(), id).is_some() {
                return Err(LayoutError::DuplicateName(name.clone()));
            }
        }
        if !decl.constraints.is_empty() {
            pending.push((id, &decl.constraints));
        }
        for child in &decl.children {
            let child_id = self.insert_subtree(Some(id), child, names, pending)?;
            self.node_mut(id).children.push(child_id);
        }
        Ok(id)
    }

    fn resolve_pending(
        &mut self,
        names: &HashMap<String, BoxId>,
        pending: &[(BoxId, &Constraints<String>)],
    ) -> Result<(), LayoutError> {
        for &(id, decl_constraints) in pending {
            let parent = self.node(id).parent;
            let resolved = decl_constraints.try_map(|name| {
                let target = *names.get(name).ok_or_else(|| LayoutError::UnknownReference {
                    from: self.label(id),
                    name: name.clone(),
                })?;
                if self.node(target).parent != parent || target == id {
                    return Err(LayoutError::ForeignConstraint {
                        from: self.label(id),
                        target: self.label(target),
                    });
                }
                Ok(target)
            })?;
            self.node_mut(id).constraints = resolved;
        }
        Ok(())
    }

    // ── Accessors ──────────────────────────────────────────────

    pub fn root(&self) -> BoxId {
        self.root
    }

    /// Look up a box by its declared name.
    pub fn find(&self, name: &str) -> Option<BoxId> {
        self.nodes
            .iter()
            .position(|n| n.name.as_deref() == Some(name))
            .map(BoxId)
    }

    /// The box's current frame. Authoritative once the box is `Framed`.
    pub fn frame(&self, id: BoxId) -> Rect {
        self.node(id).frame
    }

    pub fn phase(&self, id: BoxId) -> Phase {
        self.node(id).phase
    }

    pub fn is_framed(&self, id: BoxId) -> bool {
        self.node(id).phase == Phase::Framed
    }

    pub fn kind(&self, id: BoxId) -> &BoxKind {
        &self.node(id).kind
    }

    pub fn margins(&self, id: BoxId) -> Margins {
        self.node(id).margins
    }

    pub fn children(&self, id: BoxId) -> &[BoxId] {
        &self.node(id).children
    }

    pub fn parent(&self, id: BoxId) -> Option<BoxId> {
        self.node(id).parent
    }

    // ── Host mutators (take effect on the next pass) ───────────

    pub fn set_size_specs(&mut self, id: BoxId, width: SizeSpec, height: SizeSpec) {
        let node = self.node_mut(id);
        node.width = width;
        node.height = height;
    }

    pub fn set_margins(&mut self, id: BoxId, margins: Margins) {
        self.node_mut(id).margins = margins.sanitized();
    }

    /// Rebind a box's sibling constraints. Validity (sibling-ship, cycles,
    /// ordering) is checked by the next layout pass.
    pub fn set_constraints(&mut self, id: BoxId, constraints: Constraints<BoxId>) {
        self.node_mut(id).constraints = constraints;
    }

    /// Establish a host-measured content size. The box becomes explicitly
    /// sized: the engine keeps this size and skips self-sizing for it.
    pub fn set_content_size(&mut self, id: BoxId, size: Size) {
        let node = self.node_mut(id);
        node.frame.width = size.width.max(0.0);
        node.frame.height = size.height.max(0.0);
        node.explicit = true;
    }

    /// Pin a full frame (origin and size). A pinned child still has its
    /// origin re-assigned by its parent's positioning step.
    pub fn set_frame(&mut self, id: BoxId, frame: Rect) {
        let node = self.node_mut(id);
        node.frame = frame;
        node.explicit = true;
    }

    /// Forget any resolved or host-pinned frame so the next pass derives
    /// everything from scratch.
    pub fn reset_frame(&mut self, id: BoxId) {
        let node = self.node_mut(id);
        node.frame = Rect::ZERO;
        node.phase = Phase::Unresolved;
        node.explicit = false;
    }

    // ── Crate internals ────────────────────────────────────────

    pub(crate) fn check(&self, id: BoxId) -> Result<(), LayoutError> {
        if id.0 < self.nodes.len() {
            Ok(())
        } else {
            Err(LayoutError::UnknownBox(id.0))
        }
    }

    pub(crate) fn node(&self, id: BoxId) -> &BoxNode {
        &self.nodes[id.0]
    }

    pub(crate) fn node_mut(&mut self, id: BoxId) -> &mut BoxNode {
        &mut self.nodes[id.0]
    }

    /// Display label for diagnostics: the declared name, or the handle index.
    pub(crate) fn label(&self, id: BoxId) -> String {
        match &self.node(id).name {
            Some(name) => name.clone(),
            None => format!("#{}", id.0),
        }
    }
}
