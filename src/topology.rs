//! Derived connectivity graph over board holes and component pins.
//!
//! A [`Topology`] is a snapshot built from a [`Layout`]; rebuild it after the
//! layout changes. Edges come from three places:
//! - board adjacency (contact strips and power rails);
//! - hole occupancy, when the occupant recorded which pin went into the hole;
//! - wires, pin to pin.
//!
//! Connectivity is reachability, kept in a disjoint-set forest. Because strip
//! adjacency overlaps along a row, every hole in a row ends up in one net.

#[cfg(test)]
#[path = "topology_test.rs"]
mod topology_test;

use std::collections::HashMap;

use tracing::warn;

use crate::board::HoleRef;
use crate::layout::Layout;
use crate::wire::PinRef;

/// A vertex in the connectivity graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Node {
    Hole(HoleRef),
    Pin(PinRef),
}

/// Connectivity snapshot of a layout.
#[derive(Debug, Clone, Default)]
pub struct Topology {
    nodes: Vec<Node>,
    index: HashMap<Node, usize>,
    parent: Vec<usize>,
    rank: Vec<u8>,
    live_holes: Vec<HoleRef>,
    skipped_wires: usize,
}

impl Topology {
    /// Build the graph for the current state of `layout`.
    #[must_use]
    pub fn build(layout: &Layout) -> Self {
        let mut topo = Self::default();

        for c in layout.components() {
            for p in c.pins() {
                topo.add_node(Node::Pin(PinRef::new(p.owner, p.index)));
            }
        }

        if let Some(board) = layout.board() {
            let refs: Vec<HoleRef> = board.holes().iter().map(crate::board::Hole::hole_ref).collect();
            for &h in &refs {
                topo.add_node(Node::Hole(h));
            }
            for hole in board.holes() {
                let a = Node::Hole(hole.hole_ref());
                for &j in &hole.connected_to {
                    topo.union(a, Node::Hole(refs[j]));
                }
                if let Some(pin) = hole.occupant.and_then(|o| o.pin.map(|p| PinRef::new(o.component, p))) {
                    if topo.index.contains_key(&Node::Pin(pin)) {
                        topo.union(a, Node::Pin(pin));
                    }
                }
            }
            topo.live_holes = refs.into_iter().filter(|&h| board.is_topologically_live(h)).collect();
        }

        for w in layout.wires() {
            if w.endpoints(layout).is_none() {
                warn!(id = %w.id, "skipping malformed wire");
                topo.skipped_wires += 1;
                continue;
            }
            topo.union(Node::Pin(w.start), Node::Pin(w.end));
        }

        topo
    }

    fn add_node(&mut self, node: Node) -> usize {
        if let Some(&i) = self.index.get(&node) {
            return i;
        }
        let i = self.nodes.len();
        self.nodes.push(node);
        self.index.insert(node, i);
        self.parent.push(i);
        self.rank.push(0);
        i
    }

    fn find(&mut self, mut i: usize) -> usize {
        while self.parent[i] != i {
            self.parent[i] = self.parent[self.parent[i]];
            i = self.parent[i];
        }
        i
    }

    fn root(&self, mut i: usize) -> usize {
        while self.parent[i] != i {
            i = self.parent[i];
        }
        i
    }

    fn union(&mut self, a: Node, b: Node) {
        let (Some(&ia), Some(&ib)) = (self.index.get(&a), self.index.get(&b)) else {
            return;
        };
        let (ra, rb) = (self.find(ia), self.find(ib));
        if ra == rb {
            return;
        }
        match self.rank[ra].cmp(&self.rank[rb]) {
            std::cmp::Ordering::Less => self.parent[ra] = rb,
            std::cmp::Ordering::Greater => self.parent[rb] = ra,
            std::cmp::Ordering::Equal => {
                self.parent[rb] = ra;
                self.rank[ra] += 1;
            }
        }
    }

    /// Whether `a` and `b` are reachable from each other. Unknown nodes are
    /// connected to nothing but themselves.
    #[must_use]
    pub fn connected(&self, a: Node, b: Node) -> bool {
        if a == b {
            return true;
        }
        match (self.index.get(&a), self.index.get(&b)) {
            (Some(&ia), Some(&ib)) => self.root(ia) == self.root(ib),
            _ => false,
        }
    }

    /// Every node in the same net as `node`, in insertion order (pins first,
    /// then holes row-major). Empty for an unknown node.
    #[must_use]
    pub fn net(&self, node: Node) -> Vec<Node> {
        let Some(&i) = self.index.get(&node) else {
            return Vec::new();
        };
        let r = self.root(i);
        (0..self.nodes.len()).filter(|&j| self.root(j) == r).map(|j| self.nodes[j]).collect()
    }

    /// All nets with more than one member.
    #[must_use]
    pub fn nets(&self) -> Vec<Vec<Node>> {
        let mut groups: Vec<(usize, Vec<Node>)> = Vec::new();
        for (j, &node) in self.nodes.iter().enumerate() {
            let r = self.root(j);
            match groups.iter_mut().find(|(root, _)| *root == r) {
                Some((_, members)) => members.push(node),
                None => groups.push((r, vec![node])),
            }
        }
        groups.into_iter().map(|(_, m)| m).filter(|m| m.len() > 1).collect()
    }

    /// Holes that are occupied or adjacent to an occupied hole.
    #[must_use]
    pub fn live_holes(&self) -> &[HoleRef] {
        &self.live_holes
    }

    /// Number of wires left out because an endpoint did not resolve.
    #[must_use]
    pub fn skipped_wires(&self) -> usize {
        self.skipped_wires
    }

    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }
}
