//! Branch graph construction and rendering
//!
//! - `graphml`: serialization of a built graph

pub mod graphml;

use crate::artifacts::history::History;
use crate::artifacts::history::revision_path::RevisionPath;
use crate::artifacts::layout::{self, Root};
use derive_new::new;
use petgraph::graph::{DiGraph, NodeIndex};
use std::collections::BTreeMap;
use std::collections::btree_map::Entry;

/// A graph node: one root at one revision, labelled `<root>@<revision>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BranchNode {
    root: Root,
    revision: u64,
}

impl BranchNode {
    pub fn root(&self) -> &Root {
        &self.root
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn label(&self) -> String {
        format!("{}@{}", self.root.name(), self.revision)
    }
}

/// A copy update excluded from the graph because its source or target path
/// does not resolve to any trunk/branches/tags root.
#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct SkippedUpdate {
    revision: u64,
    path: String,
}

impl SkippedUpdate {
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn path(&self) -> &str {
        &self.path
    }
}

/// The branching history as a directed multigraph.
///
/// Nodes exist only for (root, revision) pairs referenced by a significant
/// copy event; edges record copy lineage plus the continuity links between
/// consecutive revisions of one root. Duplicate edges are kept.
#[derive(Debug, Clone, Default)]
pub struct BranchGraph {
    graph: DiGraph<BranchNode, ()>,
    nodes: BTreeMap<RevisionPath, NodeIndex>,
    skipped: Vec<SkippedUpdate>,
}

impl BranchGraph {
    /// Builds the graph from the significant revisions of a history,
    /// ascending, each revision's significant updates in original order.
    ///
    /// A copy whose source or target resolves to no root is recorded as
    /// skipped and excluded; the build itself never fails.
    pub fn build(history: &History) -> Self {
        let mut graph = BranchGraph::default();

        for revision in history.significant_revisions() {
            for update in revision.significant_updates() {
                // only copies link roots; a plain root creation (an initial
                // trunk import, say) has no provenance to draw
                let Some(source) = update.copy_source() else {
                    continue;
                };

                let Some(source_root) = layout::classify(source.path()) else {
                    graph.skipped.push(SkippedUpdate::new(
                        revision.number(),
                        source.path().to_string(),
                    ));
                    continue;
                };
                let Some(target_root) = layout::classify(update.path()) else {
                    graph.skipped.push(SkippedUpdate::new(
                        revision.number(),
                        update.path().to_string(),
                    ));
                    continue;
                };

                let source_index = graph.ensure_node(source_root, source.revision());
                let target_index = graph.ensure_node(target_root, revision.number());
                graph.graph.add_edge(source_index, target_index, ());
            }
        }

        graph.link_root_revisions();
        graph
    }

    /// The node for the key, creating it when absent. First seen wins: a
    /// later attempt with the same (root name, revision) reuses the node.
    fn ensure_node(&mut self, root: Root, revision: u64) -> NodeIndex {
        let key = RevisionPath::new(root.name().to_string(), revision);

        match self.nodes.entry(key) {
            Entry::Occupied(entry) => *entry.get(),
            Entry::Vacant(entry) => {
                let index = self.graph.add_node(BranchNode { root, revision });
                *entry.insert(index)
            }
        }
    }

    /// Adds an edge between each pair of consecutive revisions of one root.
    ///
    /// Copy events alone leave a root's nodes disconnected between copies;
    /// these edges restore the lineage line. The key map orders by root
    /// name then revision, so consecutive same-root keys are exactly the
    /// pairs to link.
    fn link_root_revisions(&mut self) {
        let mut links = Vec::new();
        let mut previous: Option<(&RevisionPath, NodeIndex)> = None;

        for (key, index) in &self.nodes {
            if let Some((previous_key, previous_index)) = previous
                && previous_key.path() == key.path()
            {
                links.push((previous_index, *index));
            }
            previous = Some((key, *index));
        }

        for (from, to) in links {
            self.graph.add_edge(from, to, ());
        }
    }

    pub fn graph(&self) -> &DiGraph<BranchNode, ()> {
        &self.graph
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    pub fn node_index(&self, root: &str, revision: u64) -> Option<NodeIndex> {
        self.nodes
            .get(&RevisionPath::new(root.to_string(), revision))
            .copied()
    }

    pub fn skipped_updates(&self) -> &[SkippedUpdate] {
        &self.skipped
    }
}
