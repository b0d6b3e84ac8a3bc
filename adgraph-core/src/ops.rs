//! Constructors for all node kinds.

use crate::context::Context;
use crate::error::AdError;
use crate::node::{NodeId, NodeKind};
use crate::scalar::Scalar;
use rand::Rng;

impl<T: Scalar> Context<T> {
    /// Constant named by its value
    pub fn constant(&mut self, value: T) -> NodeId {
        self.push_leaf(NodeKind::Constant, format!("{value}").into(), Some(value))
    }

    /// Constant with explicit name
    pub fn constant_named(&mut self, value: T, name: &str) -> NodeId {
        self.push_leaf(NodeKind::Constant, name.into(), Some(value))
    }

    /// Variable named by its value
    pub fn variable(&mut self, value: T) -> NodeId {
        self.push_leaf(NodeKind::Variable, format!("{value}").into(), Some(value))
    }

    /// Variable with explicit name
    pub fn variable_named(&mut self, value: T, name: &str) -> NodeId {
        self.push_leaf(NodeKind::Variable, name.into(), Some(value))
    }

    /// Variable initialized from uniform distribution in range low..high.
    /// Uses seeded rng of this context, so initialization is reproducible.
    pub fn uniform(&mut self, low: T, high: T, name: &str) -> NodeId {
        let (low, high) = (low.into_f64(), high.into_f64());
        let x: f64 = self.rng.gen();
        let value = T::from_f64(low + (high - low) * x);
        self.push_leaf(NodeKind::Variable, name.into(), Some(value))
    }

    /// Placeholder, value is fed by name at run time
    pub fn placeholder(&mut self, name: &str) -> NodeId {
        self.push_leaf(NodeKind::PlaceHolder, name.into(), None)
    }

    /// Constant one
    pub fn ones(&mut self) -> NodeId {
        self.constant(T::one())
    }

    /// Constant zero
    pub fn zeros(&mut self) -> NodeId {
        self.constant(T::zero())
    }

    /// Sum of all inputs
    pub fn add(&mut self, inputs: &[NodeId]) -> Result<NodeId, AdError> {
        self.op(NodeKind::Add, inputs)
    }

    /// -x
    pub fn neg(&mut self, x: NodeId) -> Result<NodeId, AdError> {
        self.op(NodeKind::Neg, &[x])
    }

    /// x - y
    pub fn minus(&mut self, x: NodeId, y: NodeId) -> Result<NodeId, AdError> {
        self.op(NodeKind::Minus, &[x, y])
    }

    /// Product of all inputs
    pub fn mul(&mut self, inputs: &[NodeId]) -> Result<NodeId, AdError> {
        self.op(NodeKind::Mul, inputs)
    }

    /// x / y
    pub fn div(&mut self, x: NodeId, y: NodeId) -> Result<NodeId, AdError> {
        self.op(NodeKind::Div, &[x, y])
    }

    /// x ^ y
    pub fn pow(&mut self, x: NodeId, y: NodeId) -> Result<NodeId, AdError> {
        self.op(NodeKind::Pow, &[x, y])
    }

    /// Natural logarithm of x
    pub fn log(&mut self, x: NodeId) -> Result<NodeId, AdError> {
        self.op(NodeKind::Log, &[x])
    }

    /// 1 / x, built as `div(ones, x)`
    pub fn reciprocal(&mut self, x: NodeId) -> Result<NodeId, AdError> {
        self.node(x)?;
        let one = self.ones();
        self.div(one, x)
    }

    /// List of result nodes
    pub fn list(&mut self, inputs: &[NodeId]) -> Result<NodeId, AdError> {
        self.op(NodeKind::List, inputs)
    }

    /// Tuple of result nodes
    pub fn tuple(&mut self, inputs: &[NodeId]) -> Result<NodeId, AdError> {
        self.op(NodeKind::Tuple, inputs)
    }
}
