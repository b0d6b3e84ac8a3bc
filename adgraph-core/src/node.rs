use core::fmt::Formatter;

/// Identity of a node.
///
/// Ids are indices into [Context](crate::context::Context) assigned in construction
/// order. Only the id takes part in equality, ordering and hashing, never
/// the name or value of the node.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(usize);

/// Create new id.
pub const fn id(id: usize) -> NodeId {
    NodeId(id)
}

impl NodeId {
    /// Convert id to usize
    pub const fn i(self) -> usize {
        self.0
    }
}

impl core::fmt::Display for NodeId {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        f.write_fmt(format_args!("{}", self.0))
    }
}

/// Kind of node
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum NodeKind {
    /// Leaf with mutable value, target of differentiation
    Variable,
    /// Leaf with value fixed at construction
    Constant,
    /// Leaf whose value is fed by name at run time
    PlaceHolder,
    /// Sum of all inputs
    Add,
    /// Negation unary op
    Neg,
    /// Subtraction binary op
    Minus,
    /// Product of all inputs
    Mul,
    /// Division binary op
    Div,
    /// Exponentiation binary op
    Pow,
    /// Natural logarithm unary op
    Log,
    /// Aggregator of result nodes
    List,
    /// Aggregator of result nodes, returned by multi target differentiation
    Tuple,
}

impl NodeKind {
    /// Lowercase tag used in synthesized names
    pub const fn tag(self) -> &'static str {
        match self {
            NodeKind::Variable => "variable",
            NodeKind::Constant => "constant",
            NodeKind::PlaceHolder => "placeholder",
            NodeKind::Add => "add",
            NodeKind::Neg => "neg",
            NodeKind::Minus => "minus",
            NodeKind::Mul => "mul",
            NodeKind::Div => "div",
            NodeKind::Pow => "pow",
            NodeKind::Log => "log",
            NodeKind::List => "list",
            NodeKind::Tuple => "tuple",
        }
    }

    /// Exact number of inputs, None for variadic nodes
    pub const fn arity(self) -> Option<usize> {
        match self {
            NodeKind::Variable | NodeKind::Constant | NodeKind::PlaceHolder => Some(0),
            NodeKind::Neg | NodeKind::Log => Some(1),
            NodeKind::Minus | NodeKind::Div | NodeKind::Pow => Some(2),
            NodeKind::Add | NodeKind::Mul | NodeKind::List | NodeKind::Tuple => None,
        }
    }

    /// Is this a leaf kind?
    pub const fn is_leaf(self) -> bool {
        matches!(
            self,
            NodeKind::Variable | NodeKind::Constant | NodeKind::PlaceHolder
        )
    }

    /// Is this List or Tuple?
    pub const fn is_aggregate(self) -> bool {
        matches!(self, NodeKind::List | NodeKind::Tuple)
    }
}

/// Single vertex of the graph together with both edge lists.
///
/// `inputs` and `outputs` are kept as mutual inverses by
/// [Context](crate::context::Context), nodes are never edited directly.
#[derive(Clone)]
pub struct Node<T> {
    pub(crate) kind: NodeKind,
    pub(crate) name: Box<str>,
    pub(crate) value: Option<T>,
    pub(crate) inputs: Vec<NodeId>,
    pub(crate) outputs: Vec<NodeId>,
    pub(crate) accumulated_gradient: Option<NodeId>,
    pub(crate) grad_refs: Vec<NodeId>,
}

impl<T: Copy> Node<T> {
    pub(crate) fn new(kind: NodeKind, name: Box<str>, value: Option<T>) -> Self {
        Self {
            kind,
            name,
            value,
            inputs: Vec::new(),
            outputs: Vec::new(),
            accumulated_gradient: None,
            grad_refs: Vec::new(),
        }
    }

    /// Kind of this node
    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    /// Display name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Current value, None until evaluated
    pub fn value(&self) -> Option<T> {
        self.value
    }

    /// Nodes this node depends on, in order
    pub fn inputs(&self) -> &[NodeId] {
        &self.inputs
    }

    /// Nodes that consume this node
    pub fn outputs(&self) -> &[NodeId] {
        &self.outputs
    }

    /// Gradient of the last differentiation root w.r.t. this node
    pub fn accumulated_gradient(&self) -> Option<NodeId> {
        self.accumulated_gradient
    }

    /// Derivative nodes built as the gradient of this node
    pub fn grad_refs(&self) -> &[NodeId] {
        &self.grad_refs
    }
}

impl<T: core::fmt::Debug> core::fmt::Debug for Node<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self.kind {
            NodeKind::Variable | NodeKind::Constant | NodeKind::PlaceHolder => f.write_fmt(
                format_args!("{:?}({}, {:?})", self.kind, self.name, self.value),
            ),
            _ => f.write_fmt(format_args!("{:?}{:?}", self.kind, self.inputs)),
        }
    }
}
