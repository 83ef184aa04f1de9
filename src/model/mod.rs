//! # Box Model
//!
//! The input representation for the layout engine. A document is a tree of
//! boxes, each with a sizing intent per axis, a margin block, and — for
//! children of a relative container — a set of sibling constraints. This is
//! designed to be easily produced by a host view framework, a UI reconciler,
//! or direct JSON construction.
//!
//! Three box kinds exist: **Leaf** (content measured by the host), **Relative**
//! (children placed by pairwise constraints and gravity), and **Flow**
//! (children placed sequentially along one axis, wrapping at the container
//! bound). The kind enum is the dispatch point for the engine: anything that
//! answers `is_container()` with `true` lays itself out recursively and must
//! honor the same self-sizing contract, so further container kinds can be
//! added without touching the resolvers.

use serde::{Deserialize, Serialize};

// ── Geometry ───────────────────────────────────────────────────

/// One of the two layout axes. Sizing and placement are written once,
/// parameterized over this, rather than duplicated per dimension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Horizontal,
    Vertical,
}

/// A resolved frame: origin plus size, in points, relative to the parent's
/// origin. All-zero until the engine (or the host) produces a value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub const ZERO: Rect = Rect {
        x: 0.0,
        y: 0.0,
        width: 0.0,
        height: 0.0,
    };

    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Trailing X edge (origin + width).
    pub fn max_x(&self) -> f64 {
        self.x + self.width
    }

    /// Trailing Y edge (origin + height).
    pub fn max_y(&self) -> f64 {
        self.y + self.height
    }

    pub fn origin(&self, axis: Axis) -> f64 {
        match axis {
            Axis::Horizontal => self.x,
            Axis::Vertical => self.y,
        }
    }

    pub fn set_origin(&mut self, axis: Axis, v: f64) {
        match axis {
            Axis::Horizontal => self.x = v,
            Axis::Vertical => self.y = v,
        }
    }

    pub fn extent(&self, axis: Axis) -> f64 {
        match axis {
            Axis::Horizontal => self.width,
            Axis::Vertical => self.height,
        }
    }

    pub fn set_extent(&mut self, axis: Axis, v: f64) {
        match axis {
            Axis::Horizontal => self.width = v,
            Axis::Vertical => self.height = v,
        }
    }

    /// Far edge along an axis (origin + extent).
    pub fn far(&self, axis: Axis) -> f64 {
        self.origin(axis) + self.extent(axis)
    }
}

/// A plain width/height pair, used for host-established content sizes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

// ── Sizing intent ──────────────────────────────────────────────

/// Per-axis sizing intent for a box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum SizeSpec {
    /// Consume the parent's extent on this axis, minus the box's own
    /// effective margins on both sides.
    Fill,
    /// Shrink to the content extent on this axis.
    Wrap,
    /// An explicit length in points.
    Fixed(f64),
}

impl Default for SizeSpec {
    fn default() -> Self {
        SizeSpec::Fill
    }
}

// ── Margins ────────────────────────────────────────────────────

/// Spacing around a box: a uniform `outer` margin applied to every side,
/// plus four side-specific margins added on top of it. The effective margin
/// on a side is always `outer + side`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Margins {
    pub outer: f64,
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl Margins {
    pub fn uniform(outer: f64) -> Self {
        Self {
            outer,
            ..Default::default()
        }
    }

    /// Effective margin on the leading side of an axis (left / top).
    pub fn leading(&self, axis: Axis) -> f64 {
        self.outer
            + match axis {
                Axis::Horizontal => self.left,
                Axis::Vertical => self.top,
            }
    }

    /// Effective margin on the trailing side of an axis (right / bottom).
    pub fn trailing(&self, axis: Axis) -> f64 {
        self.outer
            + match axis {
                Axis::Horizontal => self.right,
                Axis::Vertical => self.bottom,
            }
    }

    /// Margins are never negative; out-of-range inputs clamp to zero.
    pub fn sanitized(self) -> Self {
        Self {
            outer: self.outer.max(0.0),
            left: self.left.max(0.0),
            top: self.top.max(0.0),
            right: self.right.max(0.0),
            bottom: self.bottom.max(0.0),
        }
    }
}

// ── Constraints (relative children only) ───────────────────────

/// Edges of the parent a relative child can pin to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AlignParent {
    pub top: bool,
    pub left: bool,
    pub bottom: bool,
    pub right: bool,
}

/// Centering directive. Applied last, it overrides every positional rule on
/// the axes it covers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub enum Gravity {
    #[default]
    None,
    Center,
    CenterHorizontal,
    CenterVertical,
}

/// The constraint block of a relative child. Each reference names a sibling
/// of the same parent; `R` is a sibling name (`String`) in the declarative
/// model and a tree handle (`BoxId`) once the tree is built. References are
/// relations only, never ownership.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Constraints<R> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to_top_of: Option<R>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to_left_of: Option<R>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to_bottom_of: Option<R>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to_right_of: Option<R>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub align_top: Option<R>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub align_left: Option<R>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub align_bottom: Option<R>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub align_right: Option<R>,
    pub align_parent: AlignParent,
    pub gravity: Gravity,
}

impl<R> Constraints<R> {
    /// All sibling references that are set, in rule order.
    pub fn references(&self) -> impl Iterator<Item = &R> {
        [
            self.to_top_of.as_ref(),
            self.to_left_of.as_ref(),
            self.to_bottom_of.as_ref(),
            self.to_right_of.as_ref(),
            self.align_top.as_ref(),
            self.align_left.as_ref(),
            self.align_bottom.as_ref(),
            self.align_right.as_ref(),
        ]
        .into_iter()
        .flatten()
    }

    pub fn is_empty(&self) -> bool {
        self.references().next().is_none()
            && self.align_parent == AlignParent::default()
            && self.gravity == Gravity::None
    }

    /// Convert every sibling reference with `f`, keeping flags as-is.
    /// Used to turn declared sibling names into tree handles.
    pub fn try_map<S, E>(
        &self,
        mut f: impl FnMut(&R) -> Result<S, E>,
    ) -> Result<Constraints<S>, E> {
        let mut conv = |r: &Option<R>| -> Result<Option<S>, E> {
            r.as_ref().map(&mut f).transpose()
        };
        Ok(Constraints {
            to_top_of: conv(&self.to_top_of)?,
            to_left_of: conv(&self.to_left_of)?,
            to_bottom_of: conv(&self.to_bottom_of)?,
            to_right_of: conv(&self.to_right_of)?,
            align_top: conv(&self.align_top)?,
            align_left: conv(&self.align_left)?,
            align_bottom: conv(&self.align_bottom)?,
            align_right: conv(&self.align_right)?,
            align_parent: self.align_parent,
            gravity: self.gravity,
        })
    }
}

// ── Box kinds ──────────────────────────────────────────────────

/// Primary placement axis of a flow container.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    #[default]
    Horizontal,
    Vertical,
}

impl Direction {
    /// The axis children advance along.
    pub fn primary(self) -> Axis {
        match self {
            Direction::Horizontal => Axis::Horizontal,
            Direction::Vertical => Axis::Vertical,
        }
    }

    /// The axis rows/columns stack along.
    pub fn cross(self) -> Axis {
        match self {
            Direction::Horizontal => Axis::Vertical,
            Direction::Vertical => Axis::Horizontal,
        }
    }
}

/// The different kinds of boxes in the tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum BoxKind {
    /// Content box. Its size is established by the host before layout;
    /// the engine only positions it.
    Leaf,

    /// Container placing children via sibling constraints and gravity.
    Relative,

    /// Container placing children sequentially with axis wrapping.
    Flow {
        #[serde(default)]
        direction: Direction,
    },
}

impl BoxKind {
    /// Container kinds lay themselves out recursively and self-size;
    /// leaves are sized from their spec or host-set content size only.
    pub fn is_container(&self) -> bool {
        !matches!(self, BoxKind::Leaf)
    }
}

// ── Declarative tree ───────────────────────────────────────────

/// A box in the declarative input tree.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoxDecl {
    /// What kind of box this is.
    pub kind: BoxKind,

    /// A name unique within the document. Sibling constraints refer to
    /// their targets by this name; unnamed boxes cannot be targeted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Sizing intent on the horizontal axis.
    #[serde(default)]
    pub width: SizeSpec,

    /// Sizing intent on the vertical axis.
    #[serde(default)]
    pub height: SizeSpec,

    #[serde(default)]
    pub margins: Margins,

    /// Sibling constraints. Only meaningful on children of a Relative box.
    #[serde(default)]
    pub constraints: Constraints<String>,

    /// Host-established content size. A box carrying one is explicitly
    /// sized: the engine keeps the size and skips self-sizing for it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<Size>,

    /// Child boxes, in insertion order.
    #[serde(default)]
    pub children: Vec<BoxDecl>,
}

impl BoxDecl {
    /// Create a Relative container.
    pub fn relative(width: SizeSpec, height: SizeSpec, children: Vec<BoxDecl>) -> Self {
        Self {
            kind: BoxKind::Relative,
            name: None,
            width,
            height,
            margins: Margins::default(),
            constraints: Constraints::default(),
            size: None,
            children,
        }
    }

    /// Create a Flow container.
    pub fn flow(
        direction: Direction,
        width: SizeSpec,
        height: SizeSpec,
        children: Vec<BoxDecl>,
    ) -> Self {
        Self {
            kind: BoxKind::Flow { direction },
            name: None,
            width,
            height,
            margins: Margins::default(),
            constraints: Constraints::default(),
            size: None,
            children,
        }
    }

    /// Create a fixed-size Leaf, the common case for host content.
    pub fn leaf(width: f64, height: f64) -> Self {
        Self {
            kind: BoxKind::Leaf,
            name: None,
            width: SizeSpec::Fixed(width),
            height: SizeSpec::Fixed(height),
            margins: Margins::default(),
            constraints: Constraints::default(),
            size: None,
            children: vec![],
        }
    }
}
