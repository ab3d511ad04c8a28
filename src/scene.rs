//! Session state: nodes on a bounded canvas, the connections between them,
//! the drag snapshot and the two-click connection protocol.
//!
//! All mutation goes through [`Scene`], which owns both the nodes and the
//! connections. A connection names its endpoints by [`NodeId`]; each node keeps
//! the ids of its incident connections. Every operation that touches one side
//! updates the other before returning.

use std::fmt;

use tracing::{debug, info};

use crate::config::SceneConfig;
use crate::connector::{Segment, compute_segment};
use crate::error::{ConfigError, SceneError};
use crate::model::{Point, RectF};
use crate::placement::{Resolution, Resolver};

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(pub u64);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ConnectionId(pub u64);

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "L{}", self.0)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Node {
    id: NodeId,
    center: Point,
    connections: Vec<ConnectionId>,
}

impl Node {
    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn center(&self) -> Point {
        self.center
    }

    pub fn connections(&self) -> &[ConnectionId] {
        &self.connections
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Connection {
    id: ConnectionId,
    source: NodeId,
    target: NodeId,
    segment: Segment,
}

impl Connection {
    pub fn id(&self) -> ConnectionId {
        self.id
    }

    pub fn source(&self) -> NodeId {
        self.source
    }

    pub fn target(&self) -> NodeId {
        self.target
    }

    /// Endpoints as of the last recompute.
    pub fn segment(&self) -> Segment {
        self.segment
    }

    pub fn touches(&self, node: NodeId) -> bool {
        self.source == node || self.target == node
    }
}

/// Position a node had when its drag began.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MotionSnapshot {
    pub node: NodeId,
    pub origin: Point,
}

/// Outcome of [`Scene::select_for_connection`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Selection {
    /// The node is now waiting for a second node to connect to.
    Pending(NodeId),
    /// The pending node was selected again and is no longer pending.
    Cleared,
    /// A second node was selected and the two are now connected.
    Connected(ConnectionId),
}

pub struct Scene {
    config: SceneConfig,
    resolver: Resolver,
    nodes: Vec<Node>,
    connections: Vec<Connection>,
    pending: Option<NodeId>,
    drag: Option<MotionSnapshot>,
    next_node_id: u64,
    next_connection_id: u64,
}

impl Default for Scene {
    fn default() -> Self {
        Self::with_config(SceneConfig::default())
    }
}

impl Scene {
    pub fn new(config: SceneConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::with_config(config))
    }

    fn with_config(config: SceneConfig) -> Self {
        let resolver = Resolver::new(config.bounds, config.node_size)
            .with_max_iterations(config.max_iterations);
        Self {
            config,
            resolver,
            nodes: Vec::new(),
            connections: Vec::new(),
            pending: None,
            drag: None,
            next_node_id: 1,
            next_connection_id: 1,
        }
    }

    pub fn bounds(&self) -> RectF {
        self.config.bounds
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.iter().find(|n| n.id == id)
    }

    pub fn connections(&self) -> &[Connection] {
        &self.connections
    }

    pub fn connection(&self, id: ConnectionId) -> Option<&Connection> {
        self.connections.iter().find(|c| c.id == id)
    }

    pub fn node_bounds(&self, id: NodeId) -> Option<RectF> {
        self.node(id).map(|n| self.box_at(n.center))
    }

    pub fn pending_source(&self) -> Option<NodeId> {
        self.pending
    }

    pub fn dragging(&self) -> Option<MotionSnapshot> {
        self.drag
    }

    fn box_at(&self, center: Point) -> RectF {
        RectF::from_center_size(center, self.config.node_size)
    }

    fn node_index(&self, id: NodeId) -> Result<usize, SceneError> {
        self.nodes
            .iter()
            .position(|n| n.id == id)
            .ok_or(SceneError::UnknownNode(id))
    }

    fn obstacles_for(&self, moving: NodeId) -> Vec<RectF> {
        self.nodes
            .iter()
            .filter(|n| n.id != moving)
            .map(|n| self.box_at(n.center))
            .collect()
    }

    /// Adds a node centred at `center` if it fits as-is.
    ///
    /// Nothing is moved to make room: a request that leaves the canvas or
    /// overlaps an existing node is rejected and the scene is left untouched.
    pub fn try_create(&mut self, center: Point) -> Result<NodeId, SceneError> {
        let rect = self.box_at(center);
        if !self.config.bounds.contains_rect(&rect) {
            debug!(x = center.x, y = center.y, "node rejected: out of bounds");
            return Err(SceneError::OutOfBounds);
        }
        if let Some(hit) = self.nodes.iter().find(|n| self.box_at(n.center).overlaps(&rect)) {
            debug!(x = center.x, y = center.y, with = %hit.id, "node rejected: overlap");
            return Err(SceneError::Overlap { with: hit.id });
        }

        let id = NodeId(self.next_node_id);
        self.next_node_id += 1;
        self.nodes.push(Node {
            id,
            center,
            connections: Vec::new(),
        });
        info!(node = %id, x = center.x, y = center.y, "node created");
        Ok(id)
    }

    /// Removes a node together with every connection attached to it.
    pub fn remove_node(&mut self, id: NodeId) -> Result<(), SceneError> {
        let idx = self.node_index(id)?;
        let incident = self.nodes[idx].connections.clone();
        for conn in incident {
            self.delete_connection(conn)?;
        }
        self.nodes.remove(idx);
        if self.pending == Some(id) {
            self.pending = None;
        }
        if self.drag.is_some_and(|d| d.node == id) {
            self.drag = None;
        }
        info!(node = %id, "node removed");
        Ok(())
    }

    /// Records the pre-drag position of `id` as the fallback for [`Scene::end_drag`].
    pub fn begin_drag(&mut self, id: NodeId) -> Result<(), SceneError> {
        let idx = self.node_index(id)?;
        self.drag = Some(MotionSnapshot {
            node: id,
            origin: self.nodes[idx].center,
        });
        Ok(())
    }

    /// Moves `id` without any correction. Connectors follow the node.
    pub fn drag_to(&mut self, id: NodeId, center: Point) -> Result<(), SceneError> {
        let idx = self.node_index(id)?;
        self.nodes[idx].center = center;
        self.refresh_connectors_of(id);
        Ok(())
    }

    /// Finishes a drag of `id`, resolving its current position against the
    /// rest of the scene and clearing the snapshot.
    pub fn end_drag(&mut self, id: NodeId) -> Result<Resolution, SceneError> {
        let idx = self.node_index(id)?;
        let current = self.nodes[idx].center;
        let snapshot = match self.drag.take() {
            Some(snap) if snap.node == id => snap.origin,
            other => {
                self.drag = other;
                current
            }
        };
        self.resolve_placement(id, current, snapshot)
    }

    /// Places `id` at the nearest valid position to `requested`, or at
    /// `snapshot` if none is found, then recomputes the node's connectors.
    pub fn resolve_placement(
        &mut self,
        id: NodeId,
        requested: Point,
        snapshot: Point,
    ) -> Result<Resolution, SceneError> {
        let idx = self.node_index(id)?;
        let obstacles = self.obstacles_for(id);
        let resolution = self.resolver.resolve(requested, &obstacles, snapshot);
        self.nodes[idx].center = resolution.position;
        debug!(
            node = %id,
            status = ?resolution.status,
            iterations = resolution.iterations,
            "placement committed"
        );
        self.refresh_connectors_of(id);
        Ok(resolution)
    }

    /// One step of the two-click connection protocol.
    pub fn select_for_connection(&mut self, id: NodeId) -> Result<Selection, SceneError> {
        self.node_index(id)?;
        match self.pending {
            None => {
                self.pending = Some(id);
                Ok(Selection::Pending(id))
            }
            Some(from) if from == id => {
                self.pending = None;
                Ok(Selection::Cleared)
            }
            Some(from) => {
                let conn = self.create_connection(from, id)?;
                self.pending = None;
                Ok(Selection::Connected(conn))
            }
        }
    }

    pub fn clear_pending(&mut self) {
        self.pending = None;
    }

    pub fn create_connection(&mut self, a: NodeId, b: NodeId) -> Result<ConnectionId, SceneError> {
        if a == b {
            return Err(SceneError::SameRectangle(a));
        }
        let a_idx = self.node_index(a)?;
        let b_idx = self.node_index(b)?;

        let id = ConnectionId(self.next_connection_id);
        self.next_connection_id += 1;
        let segment = compute_segment(
            &self.box_at(self.nodes[a_idx].center),
            &self.box_at(self.nodes[b_idx].center),
        );
        self.connections.push(Connection {
            id,
            source: a,
            target: b,
            segment,
        });
        self.nodes[a_idx].connections.push(id);
        self.nodes[b_idx].connections.push(id);
        info!(connection = %id, source = %a, target = %b, "connection created");
        Ok(id)
    }

    /// Detaches `id` from both endpoints and drops it.
    pub fn delete_connection(&mut self, id: ConnectionId) -> Result<(), SceneError> {
        let pos = self
            .connections
            .iter()
            .position(|c| c.id == id)
            .ok_or(SceneError::UnknownConnection(id))?;
        let conn = self.connections.remove(pos);
        for node in self
            .nodes
            .iter_mut()
            .filter(|n| n.id == conn.source || n.id == conn.target)
        {
            node.connections.retain(|c| *c != id);
        }
        info!(connection = %id, "connection deleted");
        Ok(())
    }

    pub fn recompute_connector(&mut self, id: ConnectionId) -> Result<Segment, SceneError> {
        let pos = self
            .connections
            .iter()
            .position(|c| c.id == id)
            .ok_or(SceneError::UnknownConnection(id))?;
        let (source, target) = (self.connections[pos].source, self.connections[pos].target);
        let a = self
            .node_bounds(source)
            .ok_or(SceneError::UnknownNode(source))?;
        let b = self
            .node_bounds(target)
            .ok_or(SceneError::UnknownNode(target))?;
        let segment = compute_segment(&a, &b);
        self.connections[pos].segment = segment;
        Ok(segment)
    }

    fn refresh_connectors_of(&mut self, node: NodeId) {
        let size = self.config.node_size;
        let nodes = &self.nodes;
        let bounds_of = |id: NodeId| {
            nodes
                .iter()
                .find(|n| n.id == id)
                .map(|n| RectF::from_center_size(n.center, size))
        };
        for conn in self.connections.iter_mut().filter(|c| c.touches(node)) {
            if let (Some(a), Some(b)) = (bounds_of(conn.source), bounds_of(conn.target)) {
                conn.segment = compute_segment(&a, &b);
            }
        }
    }
}
