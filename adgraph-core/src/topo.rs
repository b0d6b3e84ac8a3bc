use crate::context::Context;
use crate::error::AdError;
use crate::node::{NodeId, NodeKind};
use crate::scalar::Scalar;
use std::collections::BTreeMap;

impl<T: Scalar> Context<T> {
    /// Topological order of all nodes reachable from root, root is last.
    ///
    /// Depth first post order over inputs. Siblings are visited in the order
    /// of inputs, so the order is deterministic for a fixed graph.
    pub fn sort(&self, root: NodeId) -> Result<Vec<NodeId>, AdError> {
        self.node(root)?;
        // false while node is on the active path, true once finished
        let mut done: BTreeMap<NodeId, bool> = BTreeMap::new();
        let mut order = Vec::new();
        let mut stack: Vec<(NodeId, usize)> = vec![(root, 0)];
        done.insert(root, false);
        while let Some(&(nid, i)) = stack.last() {
            if let Some(&p) = self.nodes[nid.i()].inputs.get(i) {
                let top = stack.len() - 1;
                stack[top].1 += 1;
                match done.get(&p) {
                    None => {
                        done.insert(p, false);
                        stack.push((p, 0));
                    }
                    Some(false) => return Err(AdError::CycleDetected { node: self.label(p) }),
                    Some(true) => {}
                }
            } else {
                stack.pop();
                done.insert(nid, true);
                order.push(nid);
            }
        }
        if self.debug.sort() {
            println!("Order of {}: {order:?}", self.label(root));
        }
        Ok(order)
    }

    /// Does x depend (transitively) on y?
    pub fn reaches(&self, x: NodeId, y: NodeId) -> Result<bool, AdError> {
        self.node(x)?;
        self.node(y)?;
        let mut visited = std::collections::BTreeSet::new();
        let mut params = vec![x];
        while let Some(nid) = params.pop() {
            if nid == y {
                return Ok(true);
            }
            if visited.insert(nid) {
                params.extend(self.nodes[nid.i()].inputs.iter().copied());
            }
        }
        Ok(false)
    }

    /// All variables reachable from root, each once, in order of the sort.
    pub fn trainable_parameters(&self, root: NodeId) -> Result<Vec<NodeId>, AdError> {
        Ok(self
            .sort(root)?
            .into_iter()
            .filter(|x| self.nodes[x.i()].kind == NodeKind::Variable)
            .collect())
    }
}
