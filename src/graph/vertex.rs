/// Stable handle to a vertex of a [`DiGraph`](crate::graph::DiGraph).
///
/// Handles index into the graph's vertex table and are never reused:
/// once the vertex is removed, every copy of its handle goes stale and
/// resolves to nothing instead of aliasing a newer vertex.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VertexId {
    pub internal: usize,
}

/// A directed, weighted connection between two vertices.
///
/// The weight defaults to 1.0 so hop counting works out of the box,
/// and the label is free-form carrier or annotation text.
#[derive(Debug, Clone, PartialEq)]
pub struct Edge {
    pub from: VertexId,
    pub to: VertexId,
    pub weight: f64,
    pub label: Option<String>,
}
