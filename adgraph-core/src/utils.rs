use crate::context::Context;
use crate::error::AdError;
use crate::node::{NodeId, NodeKind};
use crate::scalar::Scalar;
use std::collections::BTreeSet;

/// Is target one of nodes? Compares identities only.
pub fn contains(nodes: &[NodeId], target: NodeId) -> bool {
    nodes.iter().any(|&x| x == target)
}

impl<T: Scalar> Context<T> {
    /// Inputs of nested List and Tuple nodes in order, other nodes are returned as is.
    pub fn flatten(&self, x: NodeId) -> Result<Vec<NodeId>, AdError> {
        let mut res = Vec::new();
        let mut params = vec![x];
        while let Some(nid) = params.pop() {
            let node = self.node(nid)?;
            if node.kind.is_aggregate() {
                params.extend(node.inputs.iter().rev().copied());
            } else {
                res.push(nid);
            }
        }
        Ok(res)
    }

    /// Puts graph of roots into dot language for visualization.
    /// Gradient references are drawn as dashed edges.
    pub fn plot_dot(&self, roots: &[NodeId]) -> Result<String, AdError> {
        let mut ids = BTreeSet::new();
        for &root in roots {
            ids.extend(self.sort(root)?);
        }
        let mut res = String::from("strict digraph {\n  ordering=in\n  rank=source\n");
        let mut edges = String::new();
        for &id in &ids {
            let node = &self.nodes[id.i()];
            let (shape, fillcolor) = match node.kind {
                NodeKind::Variable => ("box", "lightblue"),
                NodeKind::Constant => ("box", "grey"),
                NodeKind::PlaceHolder => ("box", "lightyellow"),
                NodeKind::List | NodeKind::Tuple => ("box3d", "white"),
                _ => ("oval", "white"),
            };
            let value = node.value.map_or(String::from("-"), |v| format!("{v}"));
            res.push_str(&format!(
                "  {id}[label=\"{} #{id}\\n{value}\", shape={shape}, fillcolor=\"{fillcolor}\", style=filled]\n",
                node.name.replace('"', "\\\"")
            ));
            for param in &node.inputs {
                edges.push_str(&format!("  {param} -> {id}\n"));
            }
            for grad in node.grad_refs.iter().filter(|&g| ids.contains(g)) {
                edges.push_str(&format!("  {grad} -> {id} [style=dashed]\n"));
            }
        }
        res.push_str(&edges);
        res.push('}');
        Ok(res)
    }
}
