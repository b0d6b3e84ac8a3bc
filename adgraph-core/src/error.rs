use core::fmt::{Display, Formatter};

/// Enumeration representing the various errors that can occur while building,
/// evaluating or differentiating a graph.
///
/// Nodes are referred to by `name#id`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdError {
    /// Traversal reached a node that is still on the active path
    CycleDetected {
        /// Node that closes the cycle
        node: Box<str>,
    },
    /// Operator received wrong number of inputs
    ArityError {
        /// Operator tag
        op: &'static str,
        /// Required number of inputs
        expected: usize,
        /// Actual number of inputs
        found: usize,
    },
    /// Divisor evaluated to zero
    DivisionByZero {
        /// Div node
        node: Box<str>,
    },
    /// Logarithm of zero or of a negative number
    NonPositiveLogArgument {
        /// Log node
        node: Box<str>,
    },
    /// Placeholder was evaluated before a value was fed to it
    MissingPlaceholderValue {
        /// Placeholder name
        name: Box<str>,
    },
    /// Feed has no entry for placeholder
    MissingFeedKey {
        /// Placeholder name
        name: Box<str>,
    },
    /// Differentiation target can not be reached from the differentiated node
    TargetNotInGraph {
        /// Target node
        target: Box<str>,
    },
    /// Local derivative requested w.r.t. a node that is not an operand
    GradTargetMismatch {
        /// Operator node
        node: Box<str>,
        /// Requested target
        target: Box<str>,
    },
    /// Node kind has no local derivative rule
    NotDifferentiable {
        /// Node
        node: Box<str>,
    },
    /// Operator was evaluated before one of its inputs
    UnevaluatedInput {
        /// Operator node
        node: Box<str>,
        /// Input without value
        input: Box<str>,
    },
    /// Value of this node can not be set by the user
    ImmutableNode {
        /// Node
        node: Box<str>,
    },
    /// Leaf kind passed where operator was expected
    NotAnOperator {
        /// Kind tag
        kind: &'static str,
    },
    /// Graph was asked for its order before root was set
    RootNotSet,
    /// Id does not belong to this context
    UnknownNode {
        /// Passed id
        id: usize,
    },
}

impl Display for AdError {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            AdError::CycleDetected { node } => {
                f.write_fmt(format_args!("Cycle detected at node {node}"))
            }
            AdError::ArityError { op, expected, found } => f.write_fmt(format_args!(
                "Operator {op} expects {expected} inputs, but {found} were given"
            )),
            AdError::DivisionByZero { node } => {
                f.write_fmt(format_args!("Division by zero in {node}"))
            }
            AdError::NonPositiveLogArgument { node } => {
                f.write_fmt(format_args!("Logarithm of non positive value in {node}"))
            }
            AdError::MissingPlaceholderValue { name } => {
                f.write_fmt(format_args!("Placeholder {name} was not fed a value"))
            }
            AdError::MissingFeedKey { name } => {
                f.write_fmt(format_args!("Feed has no entry for placeholder {name}"))
            }
            AdError::TargetNotInGraph { target } => {
                f.write_fmt(format_args!("Target {target} is not in the graph"))
            }
            AdError::GradTargetMismatch { node, target } => f.write_fmt(format_args!(
                "Can not differentiate {node} w.r.t. {target}, it is not an input"
            )),
            AdError::NotDifferentiable { node } => {
                f.write_fmt(format_args!("{node} is not differentiable"))
            }
            AdError::UnevaluatedInput { node, input } => f.write_fmt(format_args!(
                "Input {input} of {node} was not evaluated"
            )),
            AdError::ImmutableNode { node } => {
                f.write_fmt(format_args!("Value of {node} can not be set"))
            }
            AdError::NotAnOperator { kind } => {
                f.write_fmt(format_args!("{kind} is a leaf, not an operator"))
            }
            AdError::RootNotSet => f.write_str("Graph root not set"),
            AdError::UnknownNode { id } => {
                f.write_fmt(format_args!("Node with id {id} does not exist"))
            }
        }
    }
}

impl std::error::Error for AdError {}
