//! Graph node identifiers

/// Unique node identifier within an audio graph host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub u32);

impl NodeId {
    /// The host's destination (speaker) node; every graph owns exactly one
    pub const DESTINATION: Self = Self(0);

    pub fn new(id: u32) -> Self {
        Self(id)
    }
}

/// Node classification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    /// Audio pulled from a playable media element
    MediaSource,
    /// Scalar gain stage
    Gain,
    /// Terminal output
    Destination,
}
