use std::fmt;

/// Reason a node mutation was rejected.
///
/// None of these are fatal; they describe why an add or remove call left
/// the node unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeError {
    /// A pin with this id is already attached
    PinAlreadyPresent(i32),
    /// A wire with this id is already attached
    WireAlreadyPresent(i32),
    /// The node has no pins to remove
    NoPins,
    /// The node has no wires to remove
    NoWires,
    /// The wire is not attached to this node
    WireNotFound(i32),
}

impl fmt::Display for NodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PinAlreadyPresent(id) => write!(f, "Pin {} already attached", id),
            Self::WireAlreadyPresent(id) => write!(f, "Wire {} already attached", id),
            Self::NoPins => write!(f, "Node has no pins"),
            Self::NoWires => write!(f, "Node has no wires"),
            Self::WireNotFound(id) => write!(f, "Wire {} not attached", id),
        }
    }
}

impl std::error::Error for NodeError {}
