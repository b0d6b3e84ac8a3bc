//! Cached topological orders and registry of graphs keyed by root.

use crate::context::{Context, ContextId};
use crate::debug::DebugMask;
use crate::error::AdError;
use crate::node::NodeId;
use crate::scalar::Scalar;
use std::collections::BTreeMap;

/// Root node with lazily computed topological order.
///
/// The order is computed once and reused for the lifetime of the graph.
/// It is not invalidated when nodes are connected or cleaned afterwards,
/// drop the graph (or reroot it) after mutating edges.
/// The order belongs to the context it was sorted in, running the graph
/// with another context sorts it again.
#[derive(Debug, Default, Clone)]
pub struct Graph {
    root: Option<NodeId>,
    owner: Option<ContextId>,
    sorted_nodes: Vec<NodeId>,
}

impl Graph {
    /// Graph without root
    pub const fn new() -> Self {
        Self { root: None, owner: None, sorted_nodes: Vec::new() }
    }

    /// Graph with given root
    pub const fn with_root(root: NodeId) -> Self {
        Self { root: Some(root), owner: None, sorted_nodes: Vec::new() }
    }

    /// Root of this graph
    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    /// Context the cached order was computed in
    pub fn owner(&self) -> Option<ContextId> {
        self.owner
    }

    /// Set root, drops cached order if root changed
    pub fn set_root(&mut self, root: NodeId) {
        if self.root != Some(root) {
            self.root = Some(root);
            self.sorted_nodes.clear();
        }
    }

    /// Is the order already cached?
    pub fn is_sorted(&self) -> bool {
        !self.sorted_nodes.is_empty()
    }

    /// Topological order of root, computed on first call in ctx
    pub fn sorted_nodes<T: Scalar>(&mut self, ctx: &Context<T>) -> Result<&[NodeId], AdError> {
        let root = self.root.ok_or(AdError::RootNotSet)?;
        if self.owner != Some(ctx.id()) {
            self.owner = Some(ctx.id());
            self.sorted_nodes.clear();
        }
        if self.sorted_nodes.is_empty() {
            self.sorted_nodes = ctx.sort(root)?;
        }
        Ok(&self.sorted_nodes)
    }
}

/// Resolves graph for given root.
pub trait GraphRegistry {
    /// Get graph for root of context ctx, creating it if root was not seen before
    fn resolve(&mut self, ctx: ContextId, root: NodeId) -> &mut Graph;
}

/// Graphs keyed by identity of their context and root, remembers the current root.
#[derive(Debug, Default)]
pub struct GraphSet {
    graphs: BTreeMap<(ContextId, NodeId), Graph>,
    current: Option<(ContextId, NodeId)>,
    debug: DebugMask,
}

impl GraphSet {
    /// Empty set, debug mask is read from `ADGRAPH_DEBUG`
    pub fn new() -> Self {
        Self::with_debug(DebugMask::from_env().unwrap_or_default())
    }

    /// Empty set with given debug mask
    pub fn with_debug(debug: DebugMask) -> Self {
        Self { graphs: BTreeMap::new(), current: None, debug }
    }

    /// Make root current, creating new graph for it if needed
    pub fn find_set_graph(&mut self, ctx: ContextId, root: NodeId) -> &mut Graph {
        self.current = Some((ctx, root));
        let debug = self.debug;
        self.graphs.entry((ctx, root)).or_insert_with(|| {
            if debug.registry() {
                println!("New graph for root {root} in {ctx}");
            }
            Graph::with_root(root)
        })
    }

    /// Graph of current root
    pub fn current(&self) -> Option<&Graph> {
        self.current.and_then(|key| self.graphs.get(&key))
    }

    /// Current root
    pub fn current_root(&self) -> Option<NodeId> {
        self.current.map(|(_, root)| root)
    }

    /// Graph for root of context ctx, if it exists
    pub fn get(&self, ctx: ContextId, root: NodeId) -> Option<&Graph> {
        self.graphs.get(&(ctx, root))
    }

    /// Drop all graphs of context ctx
    pub fn remove_context(&mut self, ctx: ContextId) {
        self.graphs.retain(|&(owner, _), _| owner != ctx);
        if self.current.is_some_and(|(owner, _)| owner == ctx) {
            self.current = None;
        }
    }

    /// Number of graphs
    pub fn len(&self) -> usize {
        self.graphs.len()
    }

    /// Are there no graphs?
    pub fn is_empty(&self) -> bool {
        self.graphs.is_empty()
    }
}

impl GraphRegistry for GraphSet {
    fn resolve(&mut self, ctx: ContextId, root: NodeId) -> &mut Graph {
        self.find_set_graph(ctx, root)
    }
}
