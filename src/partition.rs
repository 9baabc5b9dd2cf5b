use crate::*;
use petgraph::graph::NodeIndex;
use petgraph::graph::UnGraph;
use petgraph::visit::Dfs;

/// Weakly-connected components of a dominance relation.
///
/// Two candidates share a component when a chain of dominance edges links
/// them, ignoring direction. Component ids are assigned in order of each
/// component's smallest member.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Partition {
    map: Vec<usize>,
    size: Vec<usize>,
}

impl Partition {
    /// Number of components.
    pub fn count(&self) -> usize {
        self.size.len()
    }
    /// Component containing `candidate`.
    pub fn component(&self, candidate: Candidate) -> usize {
        self.map[candidate]
    }
    pub fn size(&self, component: usize) -> usize {
        self.size[component]
    }
    pub fn largest(&self) -> usize {
        self.size.iter().copied().max().unwrap_or(0)
    }
    /// Members of `component` in ascending order.
    pub fn members(&self, component: usize) -> Vec<Candidate> {
        self.map
            .iter()
            .enumerate()
            .filter(|(_, c)| **c == component)
            .map(|(v, _)| v)
            .collect()
    }
}

impl From<&Dominance> for Partition {
    fn from(graph: &Dominance) -> Self {
        let n = graph.size();
        let mut undirected = UnGraph::<Candidate, ()>::with_capacity(n, n);
        for v in 0..n {
            undirected.add_node(v);
        }
        for i in 0..n {
            for j in 0..i {
                if graph.adjacent(i, j) {
                    undirected.add_edge(NodeIndex::new(i), NodeIndex::new(j), ());
                }
            }
        }
        let mut map = vec![usize::MAX; n];
        let mut size = Vec::new();
        for root in 0..n {
            if map[root] != usize::MAX {
                continue;
            }
            let id = size.len();
            let mut dfs = Dfs::new(&undirected, NodeIndex::new(root));
            let mut members = 0;
            while let Some(index) = dfs.next(&undirected) {
                map[undirected[index]] = id;
                members += 1;
            }
            size.push(members);
        }
        log::debug!("partitioned {} candidates into components {:?}", n, size);
        Self { map, size }
    }
}
