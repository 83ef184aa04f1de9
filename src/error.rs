//! Structured error types for the layout engine.
//!
//! Everything here is a configuration error: the caller handed the engine a
//! tree it cannot resolve. Layout itself never fails on geometry — degenerate
//! sizes clamp to zero locally. There are no retries; the only recovery path
//! is fixing the tree and re-requesting layout.

use thiserror::Error;

/// The unified error type returned by all public API functions.
#[derive(Debug, Error)]
pub enum LayoutError {
    /// JSON input failed to parse as a valid box document. The hint, when
    /// present, is pre-formatted for display after the parser message.
    #[error("failed to parse document: {source}{hint}")]
    Parse {
        source: serde_json::Error,
        hint: String,
    },

    /// Two boxes in the same document carry the same name.
    #[error("duplicate box name `{0}`")]
    DuplicateName(String),

    /// A declared constraint names a box that does not exist.
    #[error("constraint on `{from}` references unknown box `{name}`")]
    UnknownReference { from: String, name: String },

    /// A constraint targets a box that is not a sibling of its owner.
    #[error("constraint on `{from}` targets `{target}`, which is not a sibling")]
    ForeignConstraint { from: String, target: String },

    /// Constraints among siblings form a cycle.
    #[error("constraint cycle: {path}")]
    ConstraintCycle { path: String },

    /// A constraint targets a sibling added later in insertion order, whose
    /// frame is not yet resolved when the owner is positioned.
    #[error(
        "constraint on `{from}` targets `{target}`, which comes later in \
         insertion order and is not yet laid out"
    )]
    ForwardReference { from: String, target: String },

    /// The tree is nested deeper than the engine's recursion bound.
    #[error("layout recursion exceeded depth {0}")]
    DepthExceeded(usize),

    /// `layout()` was requested on a box with no layout algorithm of its own.
    #[error("`{0}` is not a container box")]
    NotAContainer(String),

    /// A handle that does not belong to this tree.
    #[error("box handle {0} is out of range for this tree")]
    UnknownBox(usize),
}

impl From<serde_json::Error> for LayoutError {
    fn from(e: serde_json::Error) -> Self {
        let hint = match e.classify() {
            serde_json::error::Category::Syntax => {
                "\n  Hint: check for trailing commas, missing quotes, or unescaped characters."
            }
            serde_json::error::Category::Data => {
                "\n  Hint: the JSON is valid but doesn't match the box document schema. Check field names and types."
            }
            serde_json::error::Category::Eof => {
                "\n  Hint: unexpected end of input — is the JSON truncated?"
            }
            serde_json::error::Category::Io => "",
        };
        LayoutError::Parse {
            source: e,
            hint: hint.to_string(),
        }
    }
}
