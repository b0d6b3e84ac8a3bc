use crate::debug::DebugMask;
use crate::error::AdError;
use crate::node::{id, Node, NodeId, NodeKind};
use crate::scalar::Scalar;
use itertools::Itertools;
use rand::rngs::SmallRng;
use rand::SeedableRng;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_CONTEXT: AtomicU64 = AtomicU64::new(0);

/// Identity of a [Context], unique within the process.
///
/// [NodeId]s are only unique inside one context, so caches of node ids
/// are keyed by the context as well.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ContextId(u64);

impl core::fmt::Display for ContextId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_fmt(format_args!("ctx{}", self.0))
    }
}

/// Arena owning all nodes of a graph.
///
/// Nodes are never removed, so [NodeId] stays valid for the lifetime of the context.
/// Edges are stored as lists of ids on both ends and [Context] keeps
/// `inputs` and `outputs` mutual inverses.
pub struct Context<T = f64> {
    id: ContextId,
    pub(crate) nodes: Vec<Node<T>>,
    pub(crate) rng: SmallRng,
    pub(crate) debug: DebugMask,
}

impl<T: Scalar> Default for Context<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Scalar> Context<T> {
    /// Create empty context, debug mask is read from `ADGRAPH_DEBUG`.
    #[must_use]
    pub fn new() -> Self {
        Self::with_debug(DebugMask::from_env().unwrap_or_default())
    }

    /// Create empty context with given debug mask.
    #[must_use]
    pub fn with_debug(debug: DebugMask) -> Self {
        Self {
            id: ContextId(NEXT_CONTEXT.fetch_add(1, Ordering::Relaxed)),
            nodes: Vec::new(),
            rng: SmallRng::seed_from_u64(420_694_206_942_069),
            debug,
        }
    }

    /// Identity of this context
    pub fn id(&self) -> ContextId {
        self.id
    }

    /// Debug mask of this context
    pub fn debug(&self) -> DebugMask {
        self.debug
    }

    /// Change debug mask
    pub fn set_debug(&mut self, debug: DebugMask) {
        self.debug = debug;
    }

    /// Number of nodes
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Are there no nodes?
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Get node x
    pub fn node(&self, x: NodeId) -> Result<&Node<T>, AdError> {
        self.nodes.get(x.i()).ok_or(AdError::UnknownNode { id: x.i() })
    }

    pub(crate) fn node_mut(&mut self, x: NodeId) -> Result<&mut Node<T>, AdError> {
        self.nodes.get_mut(x.i()).ok_or(AdError::UnknownNode { id: x.i() })
    }

    /// `name#id`, used in errors and debug output
    pub(crate) fn label(&self, x: NodeId) -> Box<str> {
        match self.nodes.get(x.i()) {
            Some(node) => format!("{}#{x}", node.name).into(),
            None => format!("#{x}").into(),
        }
    }

    /// Kind of node x
    pub fn kind(&self, x: NodeId) -> Result<NodeKind, AdError> {
        Ok(self.node(x)?.kind)
    }

    /// Display name of node x
    pub fn name(&self, x: NodeId) -> Result<&str, AdError> {
        Ok(&self.node(x)?.name)
    }

    /// Current value of node x, None if it was not evaluated yet
    pub fn value(&self, x: NodeId) -> Result<Option<T>, AdError> {
        Ok(self.node(x)?.value)
    }

    /// Inputs of node x
    pub fn inputs(&self, x: NodeId) -> Result<&[NodeId], AdError> {
        Ok(&self.node(x)?.inputs)
    }

    /// Outputs of node x
    pub fn outputs(&self, x: NodeId) -> Result<&[NodeId], AdError> {
        Ok(&self.node(x)?.outputs)
    }

    /// Gradient of the last differentiation root w.r.t. x
    pub fn accumulated_gradient(&self, x: NodeId) -> Result<Option<NodeId>, AdError> {
        Ok(self.node(x)?.accumulated_gradient)
    }

    /// Derivative nodes that were built as the gradient of x
    pub fn grad_refs(&self, x: NodeId) -> Result<&[NodeId], AdError> {
        Ok(&self.node(x)?.grad_refs)
    }

    /// Set value of variable or placeholder x
    pub fn set_value(&mut self, x: NodeId, value: T) -> Result<(), AdError> {
        match self.kind(x)? {
            NodeKind::Variable | NodeKind::PlaceHolder => {
                self.nodes[x.i()].value = Some(value);
                Ok(())
            }
            _ => Err(AdError::ImmutableNode { node: self.label(x) }),
        }
    }

    pub(crate) fn push_leaf(&mut self, kind: NodeKind, name: Box<str>, value: Option<T>) -> NodeId {
        let nid = id(self.nodes.len());
        self.nodes.push(Node::new(kind, name, value));
        nid
    }

    /// Push new operator node with given inputs.
    /// Checks arity and synthesizes name from tag and names of inputs.
    pub fn op(&mut self, kind: NodeKind, inputs: &[NodeId]) -> Result<NodeId, AdError> {
        if kind.is_leaf() {
            return Err(AdError::NotAnOperator { kind: kind.tag() });
        }
        for &x in inputs {
            self.node(x)?;
        }
        if let Some(n) = kind.arity() {
            if inputs.len() != n {
                return Err(AdError::ArityError {
                    op: kind.tag(),
                    expected: n,
                    found: inputs.len(),
                });
            }
        }
        let name = format!(
            "{}({})",
            kind.tag(),
            inputs.iter().map(|x| &self.nodes[x.i()].name).join(",")
        );
        let nid = id(self.nodes.len());
        let mut node = Node::new(kind, name.into(), None);
        node.inputs = inputs.to_vec();
        self.nodes.push(node);
        for x in inputs {
            self.nodes[x.i()].outputs.push(nid);
        }
        Ok(nid)
    }

    /// Add edge, x becomes the last input of y.
    /// Fails if y already is an input (transitively) of x.
    pub fn connect(&mut self, x: NodeId, y: NodeId) -> Result<(), AdError> {
        self.node(x)?;
        self.node(y)?;
        if x == y || self.reaches(x, y)? {
            return Err(AdError::CycleDetected { node: self.label(y) });
        }
        self.nodes[y.i()].inputs.push(x);
        self.nodes[x.i()].outputs.push(y);
        Ok(())
    }

    /// Detach x from all of its inputs and outputs.
    pub fn clean(&mut self, x: NodeId) -> Result<(), AdError> {
        let node = self.node_mut(x)?;
        let inputs = core::mem::take(&mut node.inputs);
        let outputs = core::mem::take(&mut node.outputs);
        for p in inputs {
            self.nodes[p.i()].outputs.retain(|&o| o != x);
        }
        for o in outputs {
            self.nodes[o.i()].inputs.retain(|&p| p != x);
        }
        Ok(())
    }
}
