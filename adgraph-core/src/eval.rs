use crate::context::Context;
use crate::error::AdError;
use crate::node::{NodeId, NodeKind};
use crate::scalar::Scalar;
use std::collections::BTreeMap;

/// Values for placeholders, keyed by placeholder name
pub type Feed<T> = BTreeMap<String, T>;

impl<T: Scalar> Context<T> {
    /// Evaluate x from the current values of its inputs.
    ///
    /// Inputs are not evaluated recursively, evaluate nodes in order given by
    /// [sort](Context::sort) or use [evaluate](Context::evaluate).
    /// Returns new value of x, which is None for List and Tuple.
    pub fn eval(&mut self, x: NodeId) -> Result<Option<T>, AdError> {
        let node = self.node(x)?;
        let value = match node.kind {
            NodeKind::Variable | NodeKind::Constant => node.value,
            NodeKind::PlaceHolder => Some(node.value.ok_or_else(|| {
                AdError::MissingPlaceholderValue { name: node.name.clone() }
            })?),
            NodeKind::List | NodeKind::Tuple => None,
            kind => Some(self.apply(x, kind)?),
        };
        if self.debug.eval() {
            println!("Eval {} = {value:?}", self.label(x));
        }
        self.nodes[x.i()].value = value;
        Ok(value)
    }

    fn apply(&self, x: NodeId, kind: NodeKind) -> Result<T, AdError> {
        // Add skips inputs without value, such as List and Tuple
        if kind == NodeKind::Add {
            return Ok(self.nodes[x.i()]
                .inputs
                .iter()
                .filter_map(|p| self.nodes[p.i()].value)
                .fold(T::zero(), T::add));
        }
        let values: Vec<T> = self.nodes[x.i()]
            .inputs
            .iter()
            .map(|&p| {
                self.nodes[p.i()].value.ok_or_else(|| AdError::UnevaluatedInput {
                    node: self.label(x),
                    input: self.label(p),
                })
            })
            .collect::<Result<_, _>>()?;
        if let Some(n) = kind.arity() {
            if values.len() != n {
                return Err(AdError::ArityError { op: kind.tag(), expected: n, found: values.len() });
            }
        }
        Ok(match kind {
            NodeKind::Mul => values.into_iter().fold(T::one(), T::mul),
            NodeKind::Neg => values[0].neg(),
            NodeKind::Minus => values[0].sub(values[1]),
            NodeKind::Div => {
                if values[1].is_zero() {
                    return Err(AdError::DivisionByZero { node: self.label(x) });
                }
                values[0].div(values[1])
            }
            NodeKind::Pow => values[0].pow(values[1]),
            NodeKind::Log => {
                // also rejects NaN
                if !(values[0] > T::zero()) {
                    return Err(AdError::NonPositiveLogArgument { node: self.label(x) });
                }
                values[0].ln()
            }
            NodeKind::Add
            | NodeKind::Variable
            | NodeKind::Constant
            | NodeKind::PlaceHolder
            | NodeKind::List
            | NodeKind::Tuple => return Err(AdError::NotAnOperator { kind: kind.tag() }),
        })
    }

    /// Set value of every placeholder in nodes from feed.
    pub fn feed(&mut self, feed: &Feed<T>, nodes: &[NodeId]) -> Result<(), AdError> {
        for &x in nodes {
            let node = self.node_mut(x)?;
            if node.kind == NodeKind::PlaceHolder {
                let value = feed
                    .get(&*node.name)
                    .ok_or_else(|| AdError::MissingFeedKey { name: node.name.clone() })?;
                node.value = Some(*value);
            }
        }
        Ok(())
    }

    /// Sort and evaluate whole subgraph of x, returns value of x.
    /// Unlike [Session](crate::session::Session) this does not cache the order.
    pub fn evaluate(&mut self, x: NodeId) -> Result<Option<T>, AdError> {
        let mut value = None;
        for nid in self.sort(x)? {
            value = self.eval(nid)?;
        }
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use crate::context::Context;
    use crate::error::AdError;
    use crate::eval::Feed;

    #[test]
    fn add_minus_roundtrip() -> Result<(), AdError> {
        let mut ctx = Context::<f64>::new();
        let a = ctx.variable(0.1);
        let b = ctx.variable(0.7);
        let c = ctx.add(&[a, b])?;
        let d = ctx.minus(c, b)?;
        assert_eq!(ctx.evaluate(d)?, Some(0.1 + 0.7 - 0.7));
        Ok(())
    }

    #[test]
    fn domain_errors() -> Result<(), AdError> {
        let mut ctx = Context::<f64>::new();
        let a = ctx.variable_named(1., "a");
        let z = ctx.zeros();
        let d = ctx.div(a, z)?;
        assert_eq!(ctx.evaluate(d), Err(AdError::DivisionByZero { node: "div(a,0)#2".into() }));
        let n = ctx.neg(a)?;
        let l = ctx.log(n)?;
        assert!(matches!(ctx.evaluate(l), Err(AdError::NonPositiveLogArgument { .. })));
        Ok(())
    }

    #[test]
    fn out_of_order() -> Result<(), AdError> {
        let mut ctx = Context::<f64>::new();
        let a = ctx.placeholder("a");
        let b = ctx.neg(a)?;
        assert_eq!(ctx.eval(a), Err(AdError::MissingPlaceholderValue { name: "a".into() }));
        assert!(matches!(ctx.eval(b), Err(AdError::UnevaluatedInput { .. })));
        let mut feed = Feed::new();
        assert_eq!(ctx.feed(&feed, &[a, b]), Err(AdError::MissingFeedKey { name: "a".into() }));
        feed.insert("a".into(), 3.);
        ctx.feed(&feed, &[a, b])?;
        assert_eq!(ctx.evaluate(b)?, Some(-3.));
        Ok(())
    }

    #[test]
    fn add_skips_aggregates() -> Result<(), AdError> {
        let mut ctx = Context::<f64>::new();
        let a = ctx.variable(1.);
        let b = ctx.variable(2.);
        let l = ctx.list(&[a])?;
        let c = ctx.add(&[l, b])?;
        assert_eq!(ctx.name(c)?, "add(list(1),2)");
        assert_eq!(ctx.evaluate(c)?, Some(2.));
        // other operators still require every input
        let m = ctx.mul(&[l, b])?;
        assert!(matches!(ctx.evaluate(m), Err(AdError::UnevaluatedInput { .. })));
        Ok(())
    }
}
