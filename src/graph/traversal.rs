use std::collections::VecDeque;

use hashbrown::{HashMap, HashSet};
use tracing::trace;

use crate::graph::digraph::DiGraph;
use crate::graph::vertex::VertexId;

impl<T> DiGraph<T> {
    fn edges_to(&self, id: VertexId) -> impl Iterator<Item = VertexId> + '_ {
        self.slot(id)
            .map(|slot| slot.edges.as_slice())
            .unwrap_or(&[])
            .iter()
            .map(|edge| edge.to)
    }

    /// Finds a path with the fewest edges from `start` to `end`.
    ///
    /// Runs a breadth-first expansion and reconstructs the route from
    /// predecessor links, so the result is hop-optimal regardless of
    /// edge weights. Among equally short paths the one discovered
    /// first wins, which follows adjacency insertion order.
    ///
    /// # Semantics
    /// * `start == end` short-circuits to `Some(vec![start])` for any live vertex.
    /// * Returns `None` when either endpoint is stale or no route exists.
    ///
    /// # Examples
    /// ```
    /// use mortar::graph::DiGraph;
    ///
    /// let mut graph = DiGraph::new();
    /// let a = graph.add_vertex("A");
    /// let b = graph.add_vertex("B");
    /// let c = graph.add_vertex("C");
    /// graph.add_edge(a, b);
    /// graph.add_edge(b, c);
    /// assert_eq!(graph.find_path(a, c), Some(vec![a, b, c]));
    /// ```
    pub fn find_path(&self, start: VertexId, end: VertexId) -> Option<Vec<VertexId>> {
        if !self.contains(start) || !self.contains(end) {
            return None;
        }
        if start == end {
            return Some(vec![start]);
        }

        let mut predecessor: HashMap<VertexId, VertexId> = HashMap::new();
        let mut frontier = VecDeque::new();
        predecessor.insert(start, start);
        frontier.push_back(start);

        while let Some(current) = frontier.pop_front() {
            for next in self.edges_to(current) {
                if predecessor.contains_key(&next) {
                    continue;
                }
                predecessor.insert(next, current);
                if next == end {
                    let path = Self::backtrack(&predecessor, start, end);
                    trace!(hops = path.len() - 1, "path found");
                    return Some(path);
                }
                frontier.push_back(next);
            }
        }
        trace!("no path");
        None
    }

    fn backtrack(
        predecessor: &HashMap<VertexId, VertexId>,
        start: VertexId,
        end: VertexId,
    ) -> Vec<VertexId> {
        let mut path = vec![end];
        let mut current = end;
        while current != start {
            current = predecessor[&current];
            path.push(current);
        }
        path.reverse();
        path
    }

    /// Depth-first traversal from `start`, returning payloads in
    /// preorder. Neighbors are explored in adjacency insertion order.
    ///
    /// A stale `start` yields an empty vector.
    pub fn dfs(&self, start: VertexId) -> Vec<&T> {
        let mut visited = HashSet::new();
        self.dfs_with_visited(start, &mut visited)
    }

    /// Depth-first traversal sharing an externally owned visited set.
    ///
    /// Vertices already present in `visited` are skipped as if they had
    /// been reached before, and every newly visited vertex is added.
    /// Calling this once per root covers a disconnected graph without
    /// repeating vertices.
    pub fn dfs_with_visited<'a>(
        &'a self,
        start: VertexId,
        visited: &mut HashSet<VertexId>,
    ) -> Vec<&'a T> {
        let mut order = Vec::new();
        self.dfs_visit(start, visited, &mut order);
        order
    }

    fn dfs_visit<'a>(
        &'a self,
        id: VertexId,
        visited: &mut HashSet<VertexId>,
        order: &mut Vec<&'a T>,
    ) {
        let vertex = match self.slot(id) {
            Some(vertex) => vertex,
            None => return,
        };
        if !visited.insert(id) {
            return;
        }
        order.push(&vertex.data);
        for edge in &vertex.edges {
            self.dfs_visit(edge.to, visited, order);
        }
    }

    /// Breadth-first traversal from `start`, returning payloads level
    /// by level. Within one level, vertices appear in the order their
    /// discovering edges were added.
    ///
    /// A stale `start` yields an empty vector.
    pub fn bfs(&self, start: VertexId) -> Vec<&T> {
        let mut order = Vec::new();
        if !self.contains(start) {
            return order;
        }

        let mut visited = HashSet::new();
        let mut frontier = VecDeque::new();
        visited.insert(start);
        frontier.push_back(start);

        while let Some(current) = frontier.pop_front() {
            if let Some(vertex) = self.slot(current) {
                order.push(&vertex.data);
                for edge in &vertex.edges {
                    if visited.insert(edge.to) {
                        frontier.push_back(edge.to);
                    }
                }
            }
        }
        order
    }
}
