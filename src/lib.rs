//! Geometry core of a rectangle-and-connector diagram editor.
//!
//! Nodes are fixed-size rectangles on a bounded canvas. When a dragged node is
//! released somewhere invalid, [`placement::Resolver`] moves it to a nearby
//! valid spot or reverts it. [`connector::compute_segment`] picks the corners
//! a connection line attaches to. [`scene::Scene`] ties both to the node and
//! connection bookkeeping a host UI drives.

pub mod config;
pub mod connector;
pub mod error;
pub mod model;
pub mod placement;
pub mod scene;

pub use config::SceneConfig;
pub use connector::{Anchor, Segment, compute_segment};
pub use error::{ConfigError, SceneError};
pub use model::{Point, RectF, Size};
pub use placement::{MAX_ITERATIONS, Resolution, ResolveStatus, Resolver};
pub use scene::{Connection, ConnectionId, Node, NodeId, Scene, Selection};
