//! Input events and scroll requests exchanged between the page loop and the document.

use crate::{Document, NodeId};

/// Host input events the presentation layer reacts to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventKind {
    Click,
    KeyDown { key: String },
    /// `mouseenter`; delivered to the target only.
    PointerEnter,
    /// `mouseleave`; delivered to the target only.
    PointerLeave,
}

impl EventKind {
    /// DOM event type name.
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Click => "click",
            Self::KeyDown { .. } => "keydown",
            Self::PointerEnter => "mouseenter",
            Self::PointerLeave => "mouseleave",
        }
    }

    pub const fn bubbles(&self) -> bool {
        matches!(self, Self::Click | Self::KeyDown { .. })
    }
}

/// Whether dispatch continues to the next node on the propagation path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Propagation {
    #[default]
    Continue,
    Stop,
}

impl Propagation {
    pub const fn is_stopped(self) -> bool {
        matches!(self, Self::Stop)
    }
}

/// Nodes visited while dispatching `kind` at `target`: the target and then each
/// ancestor up to the document root for bubbling events, only the target otherwise.
pub fn propagation_path(document: &Document, target: NodeId, kind: &EventKind) -> Vec<NodeId> {
    if kind.bubbles() {
        document.ancestors(target).collect()
    } else {
        vec![target]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScrollBehavior {
    #[default]
    Auto,
    Smooth,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScrollLogicalPosition {
    #[default]
    Start,
    Center,
    End,
    Nearest,
}

/// `scrollIntoView` options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScrollIntoViewOptions {
    pub behavior: ScrollBehavior,
    pub block: ScrollLogicalPosition,
    pub inline: ScrollLogicalPosition,
}

/// A recorded `scrollIntoView` call, left for the embedder to perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollRequest {
    pub node: NodeId,
    pub options: ScrollIntoViewOptions,
}
