use thiserror::Error;

use crate::scene::{ConnectionId, NodeId};

/// Rejections reported by [`crate::scene::Scene`] operations.
///
/// None of these leave the scene in a modified state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SceneError {
    /// The requested box extends past the canvas bounds.
    #[error("node would extend past the canvas bounds")]
    OutOfBounds,
    /// The requested box overlaps an existing node.
    #[error("node would overlap node {with}")]
    Overlap { with: NodeId },
    /// Both ends of a connection name the same node.
    #[error("cannot connect node {0} to itself")]
    SameRectangle(NodeId),
    #[error("unknown node {0}")]
    UnknownNode(NodeId),
    #[error("unknown connection {0}")]
    UnknownConnection(ConnectionId),
}

#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum ConfigError {
    #[error("node size must be positive, got {width}x{height}")]
    NonPositiveNodeSize { width: f32, height: f32 },
    #[error("canvas bounds are empty")]
    EmptyCanvas,
    #[error("a {width}x{height} node does not fit inside the canvas")]
    NodeLargerThanCanvas { width: f32, height: f32 },
    #[error("resolver iteration cap must be at least 1")]
    ZeroIterations,
}
