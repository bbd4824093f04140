//! In-memory audio graph

use std::collections::HashMap;

use crate::error::{GraphError, GraphResult};
use crate::host::AudioGraphHost;
use crate::media::MediaElement;
use crate::node::{NodeId, NodeKind};

/// Connection between two nodes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Connection {
    pub from: NodeId,
    pub to: NodeId,
}

#[derive(Debug, Clone)]
struct NodeEntry {
    kind: NodeKind,
    gain: Option<f32>,
    label: Option<String>,
}

/// Audio graph host that records wiring instead of producing sound.
///
/// Backs tests, examples, and headless hosts; query helpers expose the
/// recorded topology. The destination node exists from construction.
pub struct OfflineGraph {
    sample_rate: f64,
    nodes: HashMap<NodeId, NodeEntry>,
    connections: Vec<Connection>,
    next_id: u32,
}

impl OfflineGraph {
    pub fn new(sample_rate: f64) -> Self {
        let mut nodes = HashMap::new();
        nodes.insert(
            NodeId::DESTINATION,
            NodeEntry {
                kind: NodeKind::Destination,
                gain: None,
                label: None,
            },
        );
        Self {
            sample_rate,
            nodes,
            connections: Vec::new(),
            next_id: 1,
        }
    }

    fn insert(&mut self, entry: NodeEntry) -> NodeId {
        let id = NodeId::new(self.next_id);
        self.next_id += 1;
        self.nodes.insert(id, entry);
        id
    }

    fn entry(&self, node: NodeId) -> GraphResult<&NodeEntry> {
        self.nodes.get(&node).ok_or(GraphError::UnknownNode(node.0))
    }

    // === Topology queries ===

    /// Kind of a node, if present
    pub fn node_kind(&self, node: NodeId) -> Option<NodeKind> {
        self.nodes.get(&node).map(|entry| entry.kind)
    }

    /// Current gain of a gain node
    pub fn gain(&self, node: NodeId) -> Option<f32> {
        self.nodes.get(&node).and_then(|entry| entry.gain)
    }

    /// True when `from`'s output feeds `to`'s input
    pub fn is_connected(&self, from: NodeId, to: NodeId) -> bool {
        self.connections
            .iter()
            .any(|c| c.from == from && c.to == to)
    }

    /// All recorded connections, in wiring order
    pub fn connections(&self) -> &[Connection] {
        &self.connections
    }

    pub fn connection_count(&self) -> usize {
        self.connections.len()
    }

    /// Node count, including the destination
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }
}

impl Default for OfflineGraph {
    fn default() -> Self {
        Self::new(48_000.0)
    }
}

impl AudioGraphHost for OfflineGraph {
    fn create_media_element_source(&mut self, element: &MediaElement) -> GraphResult<NodeId> {
        let id = self.insert(NodeEntry {
            kind: NodeKind::MediaSource,
            gain: None,
            label: Some(element.label().to_string()),
        });
        log::debug!(
            "media source node {} bound to '{}' ({} ch)",
            id.0,
            element.label(),
            element.channels()
        );
        Ok(id)
    }

    fn create_gain(&mut self) -> GraphResult<NodeId> {
        let id = self.insert(NodeEntry {
            kind: NodeKind::Gain,
            gain: Some(1.0),
            label: None,
        });
        Ok(id)
    }

    fn set_gain(&mut self, node: NodeId, gain: f32) -> GraphResult<()> {
        let entry = self
            .nodes
            .get_mut(&node)
            .ok_or(GraphError::UnknownNode(node.0))?;
        match entry.kind {
            NodeKind::Gain => {
                entry.gain = Some(gain);
                Ok(())
            }
            _ => Err(GraphError::NotAGainNode(node.0)),
        }
    }

    fn connect(&mut self, from: NodeId, to: NodeId) -> GraphResult<()> {
        self.entry(from)?;
        self.entry(to)?;
        // Reconnecting an existing edge is a no-op, as in platform graphs.
        if !self.is_connected(from, to) {
            self.connections.push(Connection { from, to });
            log::debug!("connect {} -> {}", from.0, to.0);
        }
        Ok(())
    }

    fn destination(&self) -> NodeId {
        NodeId::DESTINATION
    }

    fn sample_rate(&self) -> f64 {
        self.sample_rate
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wiring() {
        let mut graph = OfflineGraph::default();
        let element = MediaElement::new("clip", 4);

        let source = graph.create_media_element_source(&element).unwrap();
        let gain = graph.create_gain().unwrap();

        graph.connect(source, gain).unwrap();
        graph.connect(gain, graph.destination()).unwrap();

        assert_eq!(graph.node_count(), 3);
        assert!(graph.is_connected(source, gain));
        assert!(graph.is_connected(gain, NodeId::DESTINATION));
        assert!(!graph.is_connected(source, NodeId::DESTINATION));
        assert_eq!(graph.node_kind(source), Some(NodeKind::MediaSource));
    }

    #[test]
    fn test_reconnect_is_noop() {
        let mut graph = OfflineGraph::default();
        let gain = graph.create_gain().unwrap();
        graph.connect(gain, graph.destination()).unwrap();
        graph.connect(gain, graph.destination()).unwrap();
        assert_eq!(graph.connection_count(), 1);
    }

    #[test]
    fn test_gain_handling() {
        let mut graph = OfflineGraph::default();
        let gain = graph.create_gain().unwrap();

        assert_eq!(graph.gain(gain), Some(1.0));
        graph.set_gain(gain, 0.25).unwrap();
        assert_eq!(graph.gain(gain), Some(0.25));

        let source = graph
            .create_media_element_source(&MediaElement::new("clip", 4))
            .unwrap();
        assert_eq!(
            graph.set_gain(source, 0.5),
            Err(GraphError::NotAGainNode(source.0))
        );
        assert_eq!(
            graph.set_gain(NodeId::new(99), 0.5),
            Err(GraphError::UnknownNode(99))
        );
    }

    #[test]
    fn test_connect_unknown_node() {
        let mut graph = OfflineGraph::default();
        assert_eq!(
            graph.connect(NodeId::new(7), NodeId::DESTINATION),
            Err(GraphError::UnknownNode(7))
        );
    }
}
