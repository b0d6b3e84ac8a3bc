use adgraph::prelude::*;

fn assert_eq<T: Scalar>(x: impl IntoIterator<Item = T>, y: impl IntoIterator<Item = T>) {
    let x: Vec<T> = x.into_iter().collect();
    let y: Vec<T> = y.into_iter().collect();
    assert_eq!(x.len(), y.len());
    for (i, (ex, ey)) in x.into_iter().zip(y).enumerate() {
        if !ex.is_equal(ey) {
            panic!("Elements {ex:?} and {ey:?} at index {i} are not equal.");
        }
    }
}

fn run<T: Scalar>(ctx: &mut Context<T>, x: NodeId) -> Result<T, AdError> {
    let mut graph = Graph::new();
    let out = Session::new(&mut graph).run(ctx, x, None)?;
    Ok(ctx.value(out)?.unwrap_or_else(|| panic!("{x} has no value")))
}

#[test]
fn add() -> Result<(), AdError> {
    let mut ctx = Context::<f64>::new();
    let a = ctx.variable(1.);
    let b = ctx.variable(2.);
    let c = ctx.add(&[a, b])?;
    let dc_da = ctx.grad(c, &[a])?;
    let dc_db = ctx.grad(c, &[b])?;
    assert_eq!(run(&mut ctx, dc_da)?, 1.);
    assert_eq!(run(&mut ctx, dc_db)?, 1.);
    Ok(())
}

#[test]
fn mul() -> Result<(), AdError> {
    let mut ctx = Context::<f64>::new();
    let a = ctx.variable(1.);
    let b = ctx.variable(2.);
    let c = ctx.mul(&[a, b])?;
    let dc_da = ctx.grad(c, &[a])?;
    let dc_db = ctx.grad(c, &[b])?;
    assert_eq!(run(&mut ctx, dc_da)?, 2.);
    assert_eq!(run(&mut ctx, dc_db)?, 1.);
    Ok(())
}

#[test]
fn div() -> Result<(), AdError> {
    let mut ctx = Context::<f64>::new();
    let a = ctx.variable(1.);
    let b = ctx.variable(2.);
    let c = ctx.div(a, b)?;
    let dc_da = ctx.grad(c, &[a])?;
    let dc_db = ctx.grad(c, &[b])?;
    assert_eq!(run(&mut ctx, dc_da)?, 1. / 2.);
    assert_eq!(run(&mut ctx, dc_db)?, -1. / 4.);
    Ok(())
}

#[test]
fn pow() -> Result<(), AdError> {
    let mut ctx = Context::<f64>::new();
    let a = ctx.variable(2.);
    let b = ctx.variable(3.);
    let c = ctx.pow(a, b)?;
    let dc_da = ctx.grad(c, &[a])?;
    let dc_db = ctx.grad(c, &[b])?;
    assert_eq!(run(&mut ctx, dc_da)?, 3. * 2f64.powi(2));
    assert_eq!(run(&mut ctx, dc_db)?, 2f64.powi(3) * 2f64.ln());
    Ok(())
}

#[test]
fn log() -> Result<(), AdError> {
    let mut ctx = Context::<f64>::new();
    let a = ctx.variable(2.);
    let c = ctx.log(a)?;
    let dc_da = ctx.grad(c, &[a])?;
    assert_eq!(run(&mut ctx, dc_da)?, 1. / 2.);
    Ok(())
}

#[test]
fn reciprocal() -> Result<(), AdError> {
    let mut ctx = Context::<f64>::new();
    let a = ctx.variable(2.);
    let c = ctx.reciprocal(a)?;
    let dc_da = ctx.grad(c, &[a])?;
    assert_eq!(run(&mut ctx, dc_da)?, -1. / 4.);
    Ok(())
}

#[test]
fn neg_minus() -> Result<(), AdError> {
    let mut ctx = Context::<f64>::new();
    let a = ctx.variable(5.);
    let b = ctx.variable(7.);
    let c = ctx.minus(a, b)?;
    let d = ctx.neg(c)?;
    let grads = ctx.grads(d, &[a, b])?;
    assert_eq!(run(&mut ctx, grads[0])?, -1.);
    assert_eq!(run(&mut ctx, grads[1])?, 1.);
    Ok(())
}

#[test]
fn chain() -> Result<(), AdError> {
    // d/da ln(a^2 / b) = 2/a
    let mut ctx = Context::<f32>::new();
    let a = ctx.variable(3.);
    let b = ctx.variable(4.);
    let two = ctx.constant(2.);
    let a2 = ctx.pow(a, two)?;
    let q = ctx.div(a2, b)?;
    let l = ctx.log(q)?;
    let grads = ctx.grads(l, &[a, b])?;
    let values: Vec<f32> = grads
        .iter()
        .map(|&g| run(&mut ctx, g))
        .collect::<Result<_, _>>()?;
    assert_eq(values, [2. / 3., -1. / 4.]);
    Ok(())
}

#[test]
fn diamond() -> Result<(), AdError> {
    // c = a*a + a, both paths must be summed
    let mut ctx = Context::<f64>::new();
    let a = ctx.variable(3.);
    let aa = ctx.mul(&[a, a])?;
    let c = ctx.add(&[aa, a])?;
    let dc_da = ctx.grad(c, &[a])?;
    assert_eq!(run(&mut ctx, dc_da)?, 7.);

    // shared intermediate node
    let b = ctx.log(a)?;
    let n = ctx.neg(b)?;
    let d = ctx.mul(&[b, n])?;
    let dd_da = ctx.grad(d, &[a])?;
    // d = -ln(a)^2, dd/da = -2 ln(a) / a
    assert_eq([run(&mut ctx, dd_da)?], [-2. * 3f64.ln() / 3.]);
    Ok(())
}

#[test]
fn second_order() -> Result<(), AdError> {
    let mut ctx = Context::<f64>::new();
    let a = ctx.variable(2.);
    let three = ctx.constant(3.);
    let c = ctx.pow(a, three)?;
    let dc_da = ctx.grad(c, &[a])?;
    let d2c_da2 = ctx.grad(dc_da, &[a])?;
    assert_eq([run(&mut ctx, dc_da)?, run(&mut ctx, d2c_da2)?], [12., 12.]);
    Ok(())
}

#[test]
fn target_not_in_graph() -> Result<(), AdError> {
    let mut ctx = Context::<f64>::new();
    let a = ctx.variable_named(1., "a");
    let b = ctx.variable_named(2., "b");
    let c = ctx.neg(a)?;
    assert_eq!(ctx.grad(c, &[b]), Err(AdError::TargetNotInGraph { target: "b#1".into() }));
    Ok(())
}

#[test]
fn trainable_parameters() -> Result<(), AdError> {
    let mut ctx = Context::<f64>::new();
    let node1 = ctx.constant(1.);
    let node2 = ctx.variable(2.);
    let node3 = ctx.variable(3.);
    let node4 = ctx.variable(4.);
    let node5 = ctx.constant(5.);

    let node1_node2 = ctx.mul(&[node1, node2])?;
    let node1_node3 = ctx.mul(&[node1, node3])?;
    let node1_node4 = ctx.mul(&[node1, node4])?;

    let node_sum = ctx.add(&[node1_node2, node1_node3, node1_node4])?;
    let final_node = ctx.mul(&[node_sum, node5])?;
    let trainable_nodes = ctx.trainable_parameters(final_node)?;
    assert_eq!(trainable_nodes, [node2, node3, node4]);

    let mut graphs = GraphSet::new();
    let mut sess = Session::with_registry(&mut graphs);
    let out = sess.run(&mut ctx, final_node, None)?;
    assert_eq!(ctx.value(out)?, Some(45.));

    let grads = ctx.grad(final_node, &trainable_nodes)?;
    assert_eq!(ctx.kind(grads)?, NodeKind::Tuple);
    let grads = sess.run(&mut ctx, grads, None)?;
    let grads = ctx.flatten(grads)?;
    assert_eq!(grads.len(), trainable_nodes.len());
    for grad in grads {
        assert_eq!(ctx.value(grad)?, Some(5.));
    }
    Ok(())
}

#[test]
fn trainable_parameters_reached_twice() -> Result<(), AdError> {
    let mut ctx = Context::<f64>::new();
    let a = ctx.variable(1.);
    let b = ctx.variable(2.);
    let c = ctx.variable(3.);
    let k0 = ctx.constant(4.);
    let k1 = ctx.constant(5.);
    let x = ctx.mul(&[a, b, k0])?;
    let y = ctx.add(&[x, a, c, k1, b])?;
    let z = ctx.mul(&[y, a])?;
    assert_eq!(ctx.trainable_parameters(z)?, [a, b, c]);
    Ok(())
}

#[test]
fn half_precision() -> Result<(), AdError> {
    use half::f16;
    let mut ctx = Context::<f16>::new();
    let a = ctx.variable(f16::from_f32(2.));
    let b = ctx.variable(f16::from_f32(3.));
    let c = ctx.mul(&[a, b])?;
    let dc_da = ctx.grad(c, &[a])?;
    assert_eq([run(&mut ctx, dc_da)?], [f16::from_f32(3.)]);
    Ok(())
}
