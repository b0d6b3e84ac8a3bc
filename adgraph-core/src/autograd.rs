use crate::context::Context;
use crate::error::AdError;
use crate::node::{NodeId, NodeKind};
use crate::scalar::Scalar;
use itertools::Itertools;
use std::collections::{BTreeMap, BTreeSet};

impl<T: Scalar> Context<T> {
    /// Derivative of root w.r.t. targets as new nodes.
    ///
    /// Returns the derivative node itself for a single target and a
    /// [Tuple](NodeKind::Tuple) of derivatives otherwise. Nothing is evaluated,
    /// run the returned node to get numeric gradients.
    pub fn grad(&mut self, root: NodeId, targets: &[NodeId]) -> Result<NodeId, AdError> {
        let grads = self.grads(root, targets)?;
        if let [grad] = grads[..] {
            Ok(grad)
        } else {
            self.tuple(&grads)
        }
    }

    /// Derivatives of root w.r.t. each of targets, in order of targets.
    ///
    /// Contributions over all paths from target to root are summed.
    pub fn grads(&mut self, root: NodeId, targets: &[NodeId]) -> Result<Vec<NodeId>, AdError> {
        let order = self.sort(root)?;
        let in_graph: BTreeSet<NodeId> = order.iter().copied().collect();
        for &target in targets {
            self.node(target)?;
            if !in_graph.contains(&target) {
                return Err(AdError::TargetNotInGraph { target: self.label(target) });
            }
        }

        // Nodes that depend on at least one target
        let mut req_grad: BTreeSet<NodeId> = targets.iter().copied().collect();
        for &nid in &order {
            if self.nodes[nid.i()].inputs.iter().any(|p| req_grad.contains(p)) {
                req_grad.insert(nid);
            }
        }
        // Reject the whole pass before the arena is touched
        for &nid in &order {
            let node = &self.nodes[nid.i()];
            if !req_grad.contains(&nid) || node.kind.is_leaf() {
                continue;
            }
            if node.kind.is_aggregate() {
                return Err(AdError::NotDifferentiable { node: self.label(nid) });
            }
            if let Some(n) = node.kind.arity() {
                if node.inputs.len() != n {
                    return Err(AdError::ArityError {
                        op: node.kind.tag(),
                        expected: n,
                        found: node.inputs.len(),
                    });
                }
            }
        }
        for &nid in &order {
            self.nodes[nid.i()].accumulated_gradient = None;
        }

        // Node -> gradients flowing back from its outputs
        let mut contributions: BTreeMap<NodeId, Vec<NodeId>> = BTreeMap::new();
        let ones = self.ones();
        contributions.insert(root, vec![ones]);

        // Reverse order ensures that all outputs of a node added
        // their contributions before the node is reached.
        for &nid in order.iter().rev() {
            if !req_grad.contains(&nid) {
                continue;
            }
            let Some(parts) = contributions.remove(&nid) else {
                continue;
            };
            let upstream = self.accumulate(nid, parts)?;
            if self.nodes[nid.i()].kind.is_leaf() {
                continue;
            }
            let params: Vec<NodeId> = self.nodes[nid.i()]
                .inputs
                .iter()
                .copied()
                .unique()
                .filter(|p| req_grad.contains(p))
                .collect();
            for p in params {
                let grad = self.eval_grad(nid, p, upstream)?;
                self.nodes[p.i()].grad_refs.push(grad);
                contributions.entry(p).or_default().push(grad);
            }
        }

        targets
            .iter()
            .map(|&t| {
                self.nodes[t.i()]
                    .accumulated_gradient
                    .ok_or_else(|| AdError::TargetNotInGraph { target: self.label(t) })
            })
            .collect()
    }

    // Resolves accumulated gradient of x as sum of contributions from its outputs
    fn accumulate(&mut self, x: NodeId, parts: Vec<NodeId>) -> Result<NodeId, AdError> {
        let grad = if let [part] = parts[..] {
            part
        } else {
            let sum = self.add(&parts)?;
            self.nodes[x.i()].grad_refs.push(sum);
            sum
        };
        if self.debug.grad() {
            println!("Gradient of {} is {}", self.label(x), self.label(grad));
        }
        self.nodes[x.i()].accumulated_gradient = Some(grad);
        Ok(grad)
    }

    /// Local derivative of operator x w.r.t. its input wrt, multiplied by upstream.
    ///
    /// If wrt is used as several inputs of x, derivatives for all positions are summed.
    pub fn eval_grad(&mut self, x: NodeId, wrt: NodeId, upstream: NodeId) -> Result<NodeId, AdError> {
        let node = self.node(x)?;
        let kind = node.kind;
        let inputs = node.inputs.clone();
        self.node(wrt)?;
        self.node(upstream)?;
        if kind.is_leaf() || kind.is_aggregate() {
            return Err(AdError::NotDifferentiable { node: self.label(x) });
        }
        if let Some(n) = kind.arity() {
            if inputs.len() != n {
                return Err(AdError::ArityError { op: kind.tag(), expected: n, found: inputs.len() });
            }
        }
        let positions: Vec<usize> = inputs.iter().positions(|&p| p == wrt).collect();
        if positions.is_empty() {
            return Err(AdError::GradTargetMismatch {
                node: self.label(x),
                target: self.label(wrt),
            });
        }
        let mut parts = Vec::with_capacity(positions.len());
        for i in positions {
            parts.push(self.local_grad(x, kind, &inputs, i, upstream)?);
        }
        let grad = if let [part] = parts[..] { part } else { self.add(&parts)? };
        if self.debug.grad() {
            println!(
                "d {} / d {} = {}",
                self.label(x),
                self.label(wrt),
                self.label(grad)
            );
        }
        Ok(grad)
    }

    fn local_grad(
        &mut self,
        x: NodeId,
        kind: NodeKind,
        inputs: &[NodeId],
        i: usize,
        grad: NodeId,
    ) -> Result<NodeId, AdError> {
        match kind {
            NodeKind::Add => Ok(grad),
            NodeKind::Neg => self.neg(grad),
            NodeKind::Minus => {
                if i == 0 {
                    Ok(grad)
                } else {
                    self.neg(grad)
                }
            }
            NodeKind::Mul => {
                // product of all other inputs
                let mut factors: Vec<NodeId> = inputs
                    .iter()
                    .enumerate()
                    .filter(|&(j, _)| j != i)
                    .map(|(_, &p)| p)
                    .collect();
                if factors.is_empty() {
                    return Ok(grad);
                }
                factors.push(grad);
                self.mul(&factors)
            }
            NodeKind::Div => {
                let (a, b) = (inputs[0], inputs[1]);
                if i == 0 {
                    self.div(grad, b)
                } else {
                    // -grad*a/(b^2)
                    let temp = self.mul(&[a, grad])?;
                    let two = self.constant(T::one().add(T::one()));
                    let b_2 = self.pow(b, two)?;
                    let quot = self.div(temp, b_2)?;
                    self.neg(quot)
                }
            }
            NodeKind::Pow => {
                let (base, exp) = (inputs[0], inputs[1]);
                if i == 0 {
                    // exp * base^(exp-1) * grad
                    let one = self.ones();
                    let exp_1 = self.minus(exp, one)?;
                    let pow_exp_1 = self.pow(base, exp_1)?;
                    self.mul(&[exp, pow_exp_1, grad])
                } else {
                    // base^exp * ln(base) * grad
                    let ln = self.log(base)?;
                    self.mul(&[x, ln, grad])
                }
            }
            NodeKind::Log => self.div(grad, inputs[0]),
            NodeKind::Variable
            | NodeKind::Constant
            | NodeKind::PlaceHolder
            | NodeKind::List
            | NodeKind::Tuple => Err(AdError::NotDifferentiable { node: self.label(x) }),
        }
    }
}
