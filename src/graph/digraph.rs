use tracing::trace;

use crate::graph::vertex::{Edge, VertexId};

#[derive(Debug)]
pub(super) struct VertexSlot<T> {
    pub(super) data: T,
    pub(super) edges: Vec<Edge>,
}

/// A directed graph over arbitrary vertex payloads, stored as
/// adjacency lists.
///
/// Vertices live in a dense table indexed by [`VertexId`]. Removal
/// tombstones the slot instead of shifting the table, which keeps all
/// other handles valid for the life of the graph. Edges are owned by
/// their origin vertex; parallel edges between the same pair are
/// allowed and removal drops one at a time.
///
/// # Invariants
/// - Every stored edge starts and ends at a live vertex: removing a
///   vertex drops its outgoing list and purges every inbound edge.
/// - Handles of removed vertices stay stale forever, they are never
///   reassigned to later vertices.
///
/// # Examples
/// ```
/// use mortar::graph::DiGraph;
///
/// let mut graph = DiGraph::new();
/// let a = graph.add_vertex("Lausanne");
/// let b = graph.add_vertex("Geneva");
/// assert!(graph.add_edge(a, b));
/// assert_eq!(graph.payload(b), Some(&"Geneva"));
/// assert_eq!(graph.vertex_count(), 2);
/// ```
#[derive(Debug)]
pub struct DiGraph<T> {
    slots: Vec<Option<VertexSlot<T>>>,
    live: usize,
}

impl<T> DiGraph<T> {
    /// Creates a new empty graph.
    pub fn new() -> Self {
        DiGraph {
            slots: Vec::new(),
            live: 0,
        }
    }

    pub(super) fn slot(&self, id: VertexId) -> Option<&VertexSlot<T>> {
        self.slots.get(id.internal).and_then(|slot| slot.as_ref())
    }

    fn slot_mut(&mut self, id: VertexId) -> Option<&mut VertexSlot<T>> {
        self.slots.get_mut(id.internal).and_then(|slot| slot.as_mut())
    }

    /// Adds a vertex carrying `data` and returns its handle.
    pub fn add_vertex(&mut self, data: T) -> VertexId {
        let id = VertexId {
            internal: self.slots.len(),
        };
        self.slots.push(Some(VertexSlot {
            data,
            edges: Vec::new(),
        }));
        self.live += 1;
        trace!(vertex = id.internal, live = self.live, "vertex added");
        id
    }

    /// Removes a vertex together with every edge touching it.
    ///
    /// Outgoing edges vanish with the vertex's own slot; inbound edges
    /// are purged from every surviving adjacency list. Returns `false`
    /// when the handle is stale or out of range.
    pub fn remove_vertex(&mut self, id: VertexId) -> bool {
        let removed = self
            .slots
            .get_mut(id.internal)
            .and_then(|slot| slot.take());
        if removed.is_none() {
            return false;
        }
        self.live -= 1;
        for slot in self.slots.iter_mut().flatten() {
            slot.edges.retain(|edge| edge.to != id);
        }
        trace!(vertex = id.internal, live = self.live, "vertex removed");
        true
    }

    /// Adds an edge with weight 1.0 and no label.
    pub fn add_edge(&mut self, from: VertexId, to: VertexId) -> bool {
        self.add_edge_with(from, to, 1.0, None)
    }

    /// Adds an edge carrying an explicit weight and optional label.
    ///
    /// Both endpoints must be live, otherwise the graph is left
    /// untouched and `false` comes back. A repeated call adds a second
    /// parallel edge rather than overwriting the first.
    pub fn add_edge_with(
        &mut self,
        from: VertexId,
        to: VertexId,
        weight: f64,
        label: Option<String>,
    ) -> bool {
        if !self.contains(to) {
            return false;
        }
        match self.slot_mut(from) {
            Some(slot) => {
                slot.edges.push(Edge {
                    from,
                    to,
                    weight,
                    label,
                });
                trace!(from = from.internal, to = to.internal, "edge added");
                true
            }
            None => false,
        }
    }

    /// Removes one edge `from -> to`, the earliest-added one when
    /// parallel edges exist. Returns `false` when no such edge is
    /// present.
    pub fn remove_edge(&mut self, from: VertexId, to: VertexId) -> bool {
        let slot = match self.slot_mut(from) {
            Some(slot) => slot,
            None => return false,
        };
        match slot.edges.iter().position(|edge| edge.to == to) {
            Some(index) => {
                slot.edges.remove(index);
                trace!(from = from.internal, to = to.internal, "edge removed");
                true
            }
            None => false,
        }
    }

    /// Returns the handle of the first vertex (in insertion order)
    /// whose payload matches `predicate`.
    pub fn find_vertex(&self, mut predicate: impl FnMut(&T) -> bool) -> Option<VertexId> {
        self.slots.iter().enumerate().find_map(|(index, slot)| match slot {
            Some(vertex) if predicate(&vertex.data) => Some(VertexId { internal: index }),
            _ => None,
        })
    }

    /// Whether `id` refers to a live vertex.
    pub fn contains(&self, id: VertexId) -> bool {
        self.slot(id).is_some()
    }

    /// Borrows the payload behind `id`, or `None` for stale handles.
    pub fn payload(&self, id: VertexId) -> Option<&T> {
        self.slot(id).map(|slot| &slot.data)
    }

    /// Mutably borrows the payload behind `id`.
    pub fn payload_mut(&mut self, id: VertexId) -> Option<&mut T> {
        self.slot_mut(id).map(|slot| &mut slot.data)
    }

    /// Number of live vertices.
    pub fn vertex_count(&self) -> usize {
        self.live
    }

    /// Number of edges over all adjacency lists.
    pub fn edge_count(&self) -> usize {
        self.slots
            .iter()
            .flatten()
            .map(|slot| slot.edges.len())
            .sum()
    }

    /// Handles of all live vertices in insertion order.
    ///
    /// The returned vector is a snapshot and stays valid while the
    /// graph keeps mutating.
    pub fn vertices(&self) -> Vec<VertexId> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(index, slot)| slot.as_ref().map(|_| VertexId { internal: index }))
            .collect()
    }

    /// Clones the outgoing edges of `id` in insertion order.
    ///
    /// Stale handles yield an empty vector.
    pub fn adjacent(&self, id: VertexId) -> Vec<Edge> {
        self.slot(id).map(|slot| slot.edges.clone()).unwrap_or_default()
    }
}

impl<T> Default for DiGraph<T> {
    fn default() -> Self {
        Self::new()
    }
}
