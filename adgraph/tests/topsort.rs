use adgraph::prelude::*;
use itertools::Itertools;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::collections::BTreeSet;

// Random DAG where every operator only uses earlier nodes
fn random_graph(rng: &mut SmallRng, ctx: &mut Context<f64>, n: usize) -> Result<Vec<NodeId>, AdError> {
    let mut nodes: Vec<NodeId> = (0..3).map(|i| ctx.variable(f64::from(i) + 1.)).collect();
    for _ in 0..n {
        let x = nodes[rng.gen_range(0..nodes.len())];
        let y = nodes[rng.gen_range(0..nodes.len())];
        let z = match rng.gen_range(0..4) {
            0 => ctx.add(&[x, y])?,
            1 => ctx.mul(&[x, y, nodes[0]])?,
            2 => ctx.minus(x, y)?,
            _ => ctx.neg(x)?,
        };
        nodes.push(z);
    }
    Ok(nodes)
}

#[test]
fn inputs_before_outputs() -> Result<(), AdError> {
    let mut rng = SmallRng::seed_from_u64(420_694_206_942_069);
    for _ in 0..20 {
        let mut ctx = Context::<f64>::new();
        let nodes = random_graph(&mut rng, &mut ctx, 30)?;
        let root = nodes[nodes.len() - 1];
        let order = ctx.sort(root)?;
        assert_eq!(order.last(), Some(&root));
        assert!(order.iter().all_unique());
        for (i, &x) in order.iter().enumerate() {
            for &p in ctx.inputs(x)? {
                assert!(order[..i].contains(&p), "{p} is not before {x}");
            }
        }
        // Order covers exactly the nodes root depends on
        let mut reachable = BTreeSet::from([root]);
        let mut stack = vec![root];
        while let Some(x) = stack.pop() {
            for &p in ctx.inputs(x)? {
                if reachable.insert(p) {
                    stack.push(p);
                }
            }
        }
        assert_eq!(order.iter().copied().collect::<BTreeSet<_>>(), reachable);
    }
    Ok(())
}

#[test]
fn connect_rejects_cycle() -> Result<(), AdError> {
    let mut ctx = Context::<f64>::new();
    let a = ctx.variable_named(1., "a");
    let b = ctx.neg(a)?;
    let c = ctx.neg(b)?;
    assert_eq!(ctx.connect(c, a), Err(AdError::CycleDetected { node: "a#0".into() }));
    assert_eq!(ctx.connect(c, c), Err(AdError::CycleDetected { node: "neg(neg(a))#2".into() }));
    assert!(ctx.inputs(a)?.is_empty());
    Ok(())
}

#[test]
fn clean_detaches() -> Result<(), AdError> {
    let mut ctx = Context::<f64>::new();
    let a = ctx.variable_named(1., "a");
    let b = ctx.variable_named(2., "b");
    let c = ctx.add(&[a, b])?;
    let d = ctx.neg(c)?;
    ctx.clean(c)?;
    assert!(ctx.inputs(c)?.is_empty());
    assert!(ctx.outputs(c)?.is_empty());
    assert!(ctx.outputs(a)?.is_empty());
    assert!(ctx.inputs(d)?.is_empty());
    assert_eq!(ctx.sort(d)?, [d]);
    Ok(())
}

#[test]
fn gradients_match_finite_differences() -> Result<(), AdError> {
    // f = ln(a*b + a) / b^a - (-a)
    let mut ctx = Context::<f64>::new();
    let a = ctx.variable_named(1.5, "a");
    let b = ctx.variable_named(2.5, "b");
    let ab = ctx.mul(&[a, b])?;
    let s = ctx.add(&[ab, a])?;
    let l = ctx.log(s)?;
    let p = ctx.pow(b, a)?;
    let q = ctx.div(l, p)?;
    let n = ctx.neg(a)?;
    let root = ctx.minus(q, n)?;
    let vars = ctx.trainable_parameters(root)?;
    assert_eq!(vars, [a, b]);
    let grads = ctx.grads(root, &vars)?;
    let h = 1e-6;
    for (&v, &g) in vars.iter().zip(&grads) {
        let Some(analytic) = ctx.evaluate(g)? else { panic!("{g} has no value") };
        let Some(x) = ctx.value(v)? else { panic!("{v} has no value") };
        ctx.set_value(v, x + h)?;
        let up = ctx.evaluate(root)?.unwrap_or_default();
        ctx.set_value(v, x - h)?;
        let down = ctx.evaluate(root)?.unwrap_or_default();
        ctx.set_value(v, x)?;
        let numeric = (up - down) / (2. * h);
        assert!((analytic - numeric).abs() < 1e-6, "{analytic} != {numeric} for {v}");
    }
    Ok(())
}
