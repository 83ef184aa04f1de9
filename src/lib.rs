//! # Cadre
//!
//! A relative/flow box layout engine.
//!
//! Most layout systems make you pick between two extremes: a full constraint
//! solver (heavy, order-independent, hard to predict) or hand-positioning
//! every frame. Cadre sits deliberately in between. Boxes declare a sizing
//! intent per axis — fill the parent, wrap the content, or a fixed length —
//! plus margins, and containers place their children with two simple,
//! completely deterministic strategies:
//!
//! - a **Relative** container applies an ordered chain of override rules
//!   (attach to a sibling's edge, align edges, pin to the parent, center),
//!   where the last applicable rule per axis wins;
//! - a **Flow** container lays children out sequentially along one axis,
//!   wrapping to the next row or column at the container bound.
//!
//! There is no equation solving and no partial re-layout: a pass recomputes
//! the whole subtree, top to bottom, and either completes or reports a
//! configuration error (bad sibling reference, constraint cycle, forward
//! reference).
//!
//! ## Architecture
//!
//! ```text
//! Input (JSON/API)
//!       ↓
//!   [model]   — Declarative box tree: kinds, size specs, margins, constraints
//!       ↓
//!   [tree]    — Arena-backed box tree with handle-based sibling references
//!       ↓
//!   [layout]  — Size resolution + per-kind placement passes
//!       ↓
//!   LayoutReport — resolved frame per box
//! ```

pub mod error;
pub mod layout;
pub mod model;
pub mod tree;

pub use error::LayoutError;
pub use layout::{FrameInfo, LayoutReport};
pub use model::{
    AlignParent, Axis, BoxDecl, BoxKind, Constraints, Direction, Gravity, Margins, Rect, Size,
    SizeSpec,
};
pub use tree::{BoxId, LayoutTree, Phase};

/// Lay out a declarative box document and report every resolved frame.
///
/// This is the primary one-shot entry point. Hosts that keep a tree alive
/// between passes should use [`LayoutTree`] directly.
pub fn solve(decl: &BoxDecl) -> Result<LayoutReport, LayoutError> {
    let mut tree = LayoutTree::build(decl)?;
    let root = tree.root();
    tree.layout(root)?;
    Ok(LayoutReport::from_tree(&tree, root))
}

/// Lay out a box document described as JSON.
pub fn solve_json(json: &str) -> Result<LayoutReport, LayoutError> {
    let decl: BoxDecl = serde_json::from_str(json)?;
    solve(&decl)
}
