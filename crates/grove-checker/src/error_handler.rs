//! Internal rule failures.
//!
//! A `RuleFault` is an invariant violation inside a rule (inconsistent data from the
//! host, a node whose shape does not match its kind). Faults are logged and dropped;
//! they never become user-facing diagnostics.

use grove_syntax::{NodeIndex, SyntaxKind};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuleFault {
    /// The node's data pool entry is missing or does not match its kind.
    MalformedNode { node: NodeIndex, kind: SyntaxKind },
    /// A resolved method is called but the call has no argument list to anchor on.
    MissingArguments { reference: NodeIndex },
    /// A rule panicked; the payload message when it was a string.
    Panicked { node: NodeIndex, message: String },
}

impl RuleFault {
    pub fn node(&self) -> NodeIndex {
        match self {
            RuleFault::MalformedNode { node, .. } | RuleFault::Panicked { node, .. } => *node,
            RuleFault::MissingArguments { reference } => *reference,
        }
    }

    /// Build a `Panicked` fault from a `catch_unwind` payload.
    pub fn from_panic(node: NodeIndex, payload: &(dyn std::any::Any + Send)) -> Self {
        let message = payload
            .downcast_ref::<&str>()
            .map(|s| (*s).to_string())
            .or_else(|| payload.downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "non-string panic payload".to_string());
        RuleFault::Panicked { node, message }
    }
}

impl std::fmt::Display for RuleFault {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RuleFault::MalformedNode { node, kind } => {
                write!(f, "node {} has no data for kind {kind:?}", node.0)
            }
            RuleFault::MissingArguments { reference } => {
                write!(
                    f,
                    "call through reference {} has no argument list",
                    reference.0
                )
            }
            RuleFault::Panicked { node, message } => {
                write!(f, "rule panicked on node {}: {message}", node.0)
            }
        }
    }
}

impl std::error::Error for RuleFault {}
