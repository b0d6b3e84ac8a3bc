use crate::context::{Context, ContextId};
use crate::error::AdError;
use crate::eval::Feed;
use crate::graph::{Graph, GraphRegistry};
use crate::node::NodeId;
use crate::scalar::Scalar;

enum GraphSource<'a> {
    Graph(&'a mut Graph),
    Registry(&'a mut dyn GraphRegistry),
}

/// Session evaluates targets in topological order.
///
/// Session is bound either to single [Graph], which is rerooted to each target,
/// or to a [GraphRegistry] that keeps one graph (and its cached order) per target
/// of each context.
pub struct Session<'a> {
    source: GraphSource<'a>,
}

impl<'a> Session<'a> {
    /// Session running on explicit graph
    pub fn new(graph: &'a mut Graph) -> Self {
        Self { source: GraphSource::Graph(graph) }
    }

    /// Session resolving graphs through registry
    pub fn with_registry(registry: &'a mut dyn GraphRegistry) -> Self {
        Self { source: GraphSource::Registry(registry) }
    }

    /// Graph that would be used to run target of context ctx
    pub fn graph(&mut self, ctx: ContextId, target: NodeId) -> &mut Graph {
        match &mut self.source {
            GraphSource::Graph(graph) => {
                graph.set_root(target);
                &mut **graph
            }
            GraphSource::Registry(registry) => registry.resolve(ctx, target),
        }
    }

    /// Feed placeholders and evaluate every node target depends on.
    ///
    /// All nodes are evaluated again on each call, only the order is cached.
    /// Returns target, its value is set in ctx.
    pub fn run<T: Scalar>(
        &mut self,
        ctx: &mut Context<T>,
        target: NodeId,
        feed: Option<&Feed<T>>,
    ) -> Result<NodeId, AdError> {
        ctx.node(target)?;
        let order = self.graph(ctx.id(), target).sorted_nodes(ctx)?.to_vec();
        if let Some(feed) = feed {
            ctx.feed(feed, &order)?;
        }
        for &nid in &order {
            ctx.eval(nid)?;
        }
        Ok(order.last().copied().unwrap_or(target))
    }
}
