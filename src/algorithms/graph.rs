//! Traversal, shortest path and spanning tree algorithms over adjacency matrices
//!
//! All algorithms take a square matrix of non-negative weights where `0` means
//! "no edge". Traversals follow edges in the direction they are stored, so an
//! undirected graph needs a symmetric matrix. Kruskal reads only the upper
//! triangle.

use super::AlgorithmError;
use crate::snapshot::graph::{Distance, GraphState, NodeId};
use crate::trace::{Recorder, StepExtras};
use serde_json::Value;
use std::collections::{BTreeMap, VecDeque};

/// Six-node weighted undirected graph used when no matrix is supplied
pub const SAMPLE_GRAPH: [[i64; 6]; 6] = [
    [0, 4, 2, 0, 0, 0],
    [4, 0, 1, 5, 0, 0],
    [2, 1, 0, 8, 10, 0],
    [0, 5, 8, 0, 2, 6],
    [0, 0, 10, 2, 0, 3],
    [0, 0, 0, 6, 3, 0],
];

pub fn sample_graph() -> Vec<Vec<i64>> {
    SAMPLE_GRAPH.iter().map(|row| row.to_vec()).collect()
}

pub const BFS: &[&str] = &[
    "queue = [start]; visited = {start}",
    "while queue is not empty:",
    "    node = queue.pop_front()",
    "    for each neighbor of node:",
    "        if neighbor not visited:",
    "            visited.add(neighbor); queue.push_back(neighbor)",
    "done",
];

pub const DFS: &[&str] = &[
    "dfs(start)",
    "dfs(node): visited.add(node)",
    "    for each neighbor of node:",
    "        if neighbor not visited: dfs(neighbor)",
    "done",
];

pub const DIJKSTRA: &[&str] = &[
    "dist = [inf; n]; dist[start] = 0",
    "while some unvisited node has finite dist:",
    "    u = unvisited node with smallest dist; visited.add(u)",
    "    for each neighbor v of u:",
    "        if dist[u] + w(u, v) < dist[v]:",
    "            dist[v] = dist[u] + w(u, v); prev[v] = u",
    "done",
];

pub const PRIM: &[&str] = &[
    "visited = {start}; mst = []",
    "while some edge crosses from visited to unvisited:",
    "    pick the lightest crossing edge (u, v)",
    "    mst.push((u, v)); visited.add(v)",
    "done: total weight",
];

pub const KRUSKAL: &[&str] = &[
    "edges = all edges sorted by weight",
    "for (u, v, w) in edges:",
    "    if find(u) != find(v):",
    "        union(u, v); mst.push((u, v))",
    "    else: skip (would form a cycle)",
    "done: total weight",
];

/// Check that `matrix` is square with non-negative weights and that every
/// node in `nodes` exists
pub fn validate(matrix: &[Vec<i64>], nodes: &[NodeId]) -> Result<(), AlgorithmError> {
    let count = matrix.len();
    for (row, entries) in matrix.iter().enumerate() {
        if entries.len() != count {
            return Err(AlgorithmError::NonSquareMatrix {
                row,
                len: entries.len(),
                expected: count,
            });
        }
        if let Some((to, &weight)) = entries.iter().enumerate().find(|(_, w)| **w < 0) {
            return Err(AlgorithmError::NegativeWeight {
                from: row,
                to,
                weight,
            });
        }
    }
    match nodes.iter().find(|&&n| n >= count) {
        Some(&node) => Err(AlgorithmError::NodeOutOfRange { node, count }),
        None => Ok(()),
    }
}

fn nodes_json<'a>(nodes: impl IntoIterator<Item = &'a NodeId>) -> Value {
    Value::from(nodes.into_iter().copied().collect::<Vec<_>>())
}

#[derive(Debug, Clone, Copy)]
struct Edge {
    from: NodeId,
    to: NodeId,
    weight: i64,
}

impl Edge {
    fn label(&self) -> String {
        format!("{}-{}", self.from, self.to)
    }

    /// Running MST weight plus this edge
    fn add_to(&self, total: i64) -> Result<i64, AlgorithmError> {
        total
            .checked_add(self.weight)
            .ok_or(AlgorithmError::WeightOverflow {
                from: self.from,
                to: self.to,
                weight: self.weight,
            })
    }
}

fn edges_json(edges: &[Edge]) -> Value {
    Value::Array(
        edges
            .iter()
            .map(|e| Value::from(vec![e.from as i64, e.to as i64, e.weight]))
            .collect(),
    )
}

pub fn bfs(matrix: &[Vec<i64>], start: NodeId, rec: &mut Recorder) -> Result<(), AlgorithmError> {
    validate(matrix, &[start])?;
    let mut g = GraphState::new(matrix.to_vec());
    let mut queue = VecDeque::from([start]);
    let mut order = Vec::new();

    g.current_node = Some(start);
    rec.record_with(
        &g,
        format!("Starting BFS from node {}", start),
        StepExtras::line(1).with("queue", nodes_json(&queue)),
    )?;
    g.visited_nodes.insert(start);
    rec.record_with(
        &g,
        format!("Added start node {} to visited", start),
        StepExtras::line(1).with("queue", nodes_json(&queue)),
    )?;

    while let Some(node) = queue.pop_front() {
        order.push(node);
        g.current_node = Some(node);
        g.current_edge = None;
        rec.record_with(
            &g,
            format!("Processing node {}", node),
            StepExtras::line(3).with("queue", nodes_json(&queue)),
        )?;

        for next in g.neighbors(node) {
            if g.visited_nodes.insert(next) {
                g.visited_edges.insert((node, next));
                g.current_edge = Some((node, next));
                queue.push_back(next);
                rec.record_with(
                    &g,
                    format!("Found neighbor {}, adding to queue", next),
                    StepExtras::line(6).with("queue", nodes_json(&queue)),
                )?;
            }
        }
    }

    g.clear_focus();
    rec.record_with(
        &g,
        format!("BFS completed! Visited {} nodes", g.visited_nodes.len()),
        StepExtras::line(7).with("order", nodes_json(&order)),
    )?;
    Ok(())
}

pub fn dfs(matrix: &[Vec<i64>], start: NodeId, rec: &mut Recorder) -> Result<(), AlgorithmError> {
    validate(matrix, &[start])?;
    let mut g = GraphState::new(matrix.to_vec());
    let mut stack = Vec::new();
    let mut order = Vec::new();

    g.current_node = Some(start);
    rec.record_with(
        &g,
        format!("Starting DFS from node {}", start),
        StepExtras::line(1).with("stack", nodes_json(&stack)),
    )?;
    dfs_visit(&mut g, start, None, &mut stack, &mut order, rec)?;

    g.clear_focus();
    rec.record_with(
        &g,
        format!("DFS completed! Visited {} nodes", g.visited_nodes.len()),
        StepExtras::line(5).with("order", nodes_json(&order)),
    )?;
    Ok(())
}

fn dfs_visit(
    g: &mut GraphState,
    node: NodeId,
    parent: Option<NodeId>,
    stack: &mut Vec<NodeId>,
    order: &mut Vec<NodeId>,
    rec: &mut Recorder,
) -> Result<(), AlgorithmError> {
    g.visited_nodes.insert(node);
    order.push(node);
    if let Some(parent) = parent {
        g.visited_edges.insert((parent, node));
    }
    g.current_node = Some(node);
    g.current_edge = None;
    rec.record_with(
        &*g,
        format!("Visiting node {}", node),
        StepExtras::line(2).with("stack", nodes_json(&*stack)),
    )?;

    for next in g.neighbors(node) {
        if g.visited_nodes.contains(&next) {
            continue;
        }
        stack.push(next);
        g.current_node = Some(node);
        g.current_edge = Some((node, next));
        rec.record_with(
            &*g,
            format!("Exploring neighbor {}", next),
            StepExtras::line(4).with("stack", nodes_json(&*stack)),
        )?;
        dfs_visit(g, next, Some(node), stack, order, rec)?;
        stack.pop();
    }
    Ok(())
}

pub fn dijkstra(
    matrix: &[Vec<i64>],
    start: NodeId,
    end: Option<NodeId>,
    rec: &mut Recorder,
) -> Result<(), AlgorithmError> {
    let mut nodes = vec![start];
    nodes.extend(end);
    validate(matrix, &nodes)?;

    let mut g = GraphState::new(matrix.to_vec());
    let n = g.node_count();
    g.distances = (0..n).map(|i| (i, Distance::Infinite)).collect();
    g.distances.insert(start, Distance::Finite(0));
    let mut previous: BTreeMap<NodeId, NodeId> = BTreeMap::new();

    g.current_node = Some(start);
    rec.record_with(
        &g,
        format!("Starting Dijkstra from node {}", start),
        StepExtras::line(1),
    )?;

    loop {
        let next = (0..n)
            .filter(|u| !g.visited_nodes.contains(u))
            .filter_map(|u| g.distances[&u].finite().map(|d| (d, u)))
            .min();
        let Some((dist_u, u)) = next else {
            break;
        };

        g.visited_nodes.insert(u);
        g.current_node = Some(u);
        g.current_edge = None;
        rec.record_with(
            &g,
            format!("Processing node {} with distance {}", u, dist_u),
            StepExtras::line(3),
        )?;

        for v in g.neighbors(u) {
            if g.visited_nodes.contains(&v) {
                continue;
            }
            let Some(w) = g.weight(u, v) else {
                continue;
            };
            let candidate = Distance::Finite(dist_u.saturating_add(w));
            if candidate < g.distances[&v] {
                g.distances.insert(v, candidate);
                previous.insert(v, u);
                g.visited_edges.insert((u, v));
                g.current_edge = Some((u, v));
                rec.record_with(
                    &g,
                    format!("Updated distance to node {}: {}", v, candidate),
                    StepExtras::line(6).with("from", u),
                )?;
            }
        }
    }

    g.clear_focus();
    let distances: Vec<Value> = (0..n)
        .map(|i| {
            g.distances[&i]
                .finite()
                .map_or(Value::Null, Value::from)
        })
        .collect();
    let mut extras = StepExtras::line(7).with("distances", distances);
    let description = match end {
        Some(end) => {
            let path = shortest_path(&previous, start, end);
            extras = extras.with("path", nodes_json(&path));
            format!(
                "Shortest path from {} to {}: {}",
                start, end, g.distances[&end]
            )
        }
        None => "Dijkstra completed! All shortest distances calculated".to_string(),
    };
    rec.record_with(&g, description, extras)?;
    Ok(())
}

/// Walk predecessor links back from `end`; empty when `end` is unreachable
fn shortest_path(previous: &BTreeMap<NodeId, NodeId>, start: NodeId, end: NodeId) -> Vec<NodeId> {
    let mut path = vec![end];
    let mut node = end;
    while node != start {
        match previous.get(&node) {
            Some(&p) => {
                path.push(p);
                node = p;
            }
            None => return Vec::new(),
        }
    }
    path.reverse();
    path
}

pub fn prim(matrix: &[Vec<i64>], start: NodeId, rec: &mut Recorder) -> Result<(), AlgorithmError> {
    validate(matrix, &[start])?;
    let mut g = GraphState::new(matrix.to_vec());
    let mut mst: Vec<Edge> = Vec::new();
    let mut total = 0i64;

    g.current_node = Some(start);
    rec.record_with(
        &g,
        format!("Starting Prim's algorithm from node {}", start),
        StepExtras::line(1)
            .with("mst_edges", edges_json(&mst))
            .with("total_weight", total),
    )?;
    g.visited_nodes.insert(start);

    loop {
        let mut lightest: Option<Edge> = None;
        for &from in &g.visited_nodes {
            for to in g.neighbors(from) {
                if g.visited_nodes.contains(&to) {
                    continue;
                }
                let Some(weight) = g.weight(from, to) else {
                    continue;
                };
                if lightest.map_or(true, |e| weight < e.weight) {
                    lightest = Some(Edge { from, to, weight });
                }
            }
        }
        let Some(edge) = lightest else {
            break;
        };

        mst.push(edge);
        total = edge.add_to(total)?;
        g.visited_nodes.insert(edge.to);
        g.visited_edges.insert((edge.from, edge.to));
        g.current_node = Some(edge.to);
        g.current_edge = Some((edge.from, edge.to));
        rec.record_with(
            &g,
            format!("Added edge {} with weight {}", edge.label(), edge.weight),
            StepExtras::line(4)
                .with("mst_edges", edges_json(&mst))
                .with("total_weight", total),
        )?;
    }

    g.clear_focus();
    rec.record_with(
        &g,
        format!("Prim's MST completed! Total weight: {}", total),
        StepExtras::line(5)
            .with("mst_edges", edges_json(&mst))
            .with("total_weight", total),
    )?;
    Ok(())
}

/// Union-find with path compression and union by rank
#[derive(Debug)]
struct DisjointSet {
    parent: Vec<usize>,
    rank: Vec<u32>,
}

impl DisjointSet {
    fn new(size: usize) -> Self {
        DisjointSet {
            parent: (0..size).collect(),
            rank: vec![0; size],
        }
    }

    fn find(&mut self, x: usize) -> usize {
        let mut root = x;
        while self.parent[root] != root {
            root = self.parent[root];
        }
        let mut node = x;
        while self.parent[node] != root {
            let next = self.parent[node];
            self.parent[node] = root;
            node = next;
        }
        root
    }

    /// Returns false when `a` and `b` were already joined
    fn union(&mut self, a: usize, b: usize) -> bool {
        let (ra, rb) = (self.find(a), self.find(b));
        if ra == rb {
            return false;
        }
        match self.rank[ra].cmp(&self.rank[rb]) {
            std::cmp::Ordering::Less => self.parent[ra] = rb,
            std::cmp::Ordering::Greater => self.parent[rb] = ra,
            std::cmp::Ordering::Equal => {
                self.parent[rb] = ra;
                self.rank[ra] += 1;
            }
        }
        true
    }
}

pub fn kruskal(matrix: &[Vec<i64>], rec: &mut Recorder) -> Result<(), AlgorithmError> {
    validate(matrix, &[])?;
    let mut g = GraphState::new(matrix.to_vec());
    let n = g.node_count();

    let mut edges: Vec<Edge> = (0..n)
        .flat_map(|from| (from + 1..n).map(move |to| (from, to)))
        .filter_map(|(from, to)| {
            g.weight(from, to).map(|weight| Edge { from, to, weight })
        })
        .collect();
    edges.sort_by_key(|e| e.weight);
    let listing = Value::from(
        edges
            .iter()
            .map(|e| format!("{}({})", e.label(), e.weight))
            .collect::<Vec<_>>(),
    );

    let mut sets = DisjointSet::new(n);
    let mut mst: Vec<Edge> = Vec::new();
    let mut total = 0i64;
    rec.record_with(
        &g,
        format!("Starting Kruskal's algorithm with {} edges", edges.len()),
        StepExtras::line(1)
            .with("edges", listing.clone())
            .with("mst_edges", edges_json(&mst))
            .with("total_weight", total),
    )?;

    for edge in &edges {
        g.current_edge = Some((edge.from, edge.to));
        rec.record_with(
            &g,
            format!(
                "Considering edge {} with weight {}",
                edge.label(),
                edge.weight
            ),
            StepExtras::line(2)
                .with("edges", listing.clone())
                .with("mst_edges", edges_json(&mst))
                .with("total_weight", total),
        )?;

        let (description, line) = if sets.union(edge.from, edge.to) {
            mst.push(*edge);
            total = edge.add_to(total)?;
            g.visited_edges.insert((edge.from, edge.to));
            g.visited_nodes.insert(edge.from);
            g.visited_nodes.insert(edge.to);
            (format!("Added edge {} to MST", edge.label()), 4)
        } else {
            (
                format!("Edge {} would create cycle, skipping", edge.label()),
                5,
            )
        };
        rec.record_with(
            &g,
            description,
            StepExtras::line(line)
                .with("mst_edges", edges_json(&mst))
                .with("total_weight", total),
        )?;
    }

    g.clear_focus();
    rec.record_with(
        &g,
        format!("Kruskal's MST completed! Total weight: {}", total),
        StepExtras::line(6)
            .with("mst_edges", edges_json(&mst))
            .with("total_weight", total),
    )?;
    Ok(())
}
