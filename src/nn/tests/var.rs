/*
 * @Author       : 老董
 * @Description  : Var 句柄：算子重载、跨图校验、值与梯度访问
 */

use crate::nn::{Graph, GraphError, Init, VarMathOps, VarReduceOps};
use crate::tensor::Tensor;
use crate::{assert_err, assert_panic};
use approx::assert_abs_diff_eq;

#[test]
fn test_var_operators() {
    let graph = Graph::new();
    let a = graph.input(&Tensor::new(&[6.0, 8.0], &[1, 2])).unwrap();
    let b = graph.input(&Tensor::new(&[2.0, 4.0], &[1, 2])).unwrap();

    let cases = [
        (&a + &b, [8.0, 12.0]),
        (&a - &b, [4.0, 4.0]),
        (&a * &b, [12.0, 32.0]),
        (&a / &b, [3.0, 2.0]),
        (-&a, [-6.0, -8.0]),
        (a.clone() + b.clone(), [8.0, 12.0]),
    ];
    for (var, expected) in cases {
        var.forward().unwrap();
        assert_eq!(var.value().unwrap().unwrap(), Tensor::new(&expected, &[1, 2]));
    }
}

#[test]
fn test_var_operators_across_graphs() {
    let graph_1 = Graph::new();
    let graph_2 = Graph::new();
    let a = graph_1.input(&Tensor::ones(&[1, 2])).unwrap();
    let b = graph_2.input(&Tensor::ones(&[1, 2])).unwrap();

    assert!(!a.same_graph(&b));
    assert_err!(
        a.try_add(&b),
        GraphError::InvalidOperation("不能对来自不同 Graph 的 Var 进行加法")
    );
    assert_err!(a.try_div(&b), GraphError::InvalidOperation(_));
    assert_panic!(&a * &b);
}

#[test]
fn test_var_operator_shape_mismatch_panics() {
    let graph = Graph::new();
    let a = graph.input(&Tensor::ones(&[2, 3])).unwrap();
    let b = graph.input(&Tensor::ones(&[3, 2])).unwrap();

    assert_err!(a.try_sub(&b), GraphError::ShapeMismatch { .. });
    assert_panic!(&a + &b);
}

#[test]
fn test_var_item() {
    let graph = Graph::new();
    let x = graph.input(&Tensor::new(&[1.0, 2.0, 3.0], &[1, 3])).unwrap();
    let total = x.sum().unwrap();

    assert_err!(total.item(), GraphError::ComputationError(_));
    total.forward().unwrap();
    assert_abs_diff_eq!(total.item().unwrap(), 6.0);
    assert_err!(x.item(), GraphError::InvalidOperation("Tensor 不是标量"));
}

#[test]
fn test_var_name_and_shape() {
    let graph = Graph::new();
    let x = graph.input_named(&Tensor::ones(&[2, 3]), "features").unwrap();
    let y = x.scale(2.0).unwrap();

    assert_eq!(x.name(), "features");
    assert_eq!(y.name(), "scalar_multiply_1");
    assert_eq!(y.value_expected_shape(), vec![2, 3]);
    assert!(x.get_graph().same_graph(&graph));
}

#[test]
fn test_var_backward_returns_loss() {
    let graph = Graph::new();
    let w = graph
        .parameter(&[1, 2], Init::Values(Tensor::new(&[1.0, -2.0], &[1, 2])), None)
        .unwrap();
    let loss = w.square().unwrap().sum().unwrap();

    assert_abs_diff_eq!(loss.backward().unwrap(), 5.0);
    assert_eq!(w.grad().unwrap().unwrap(), Tensor::new(&[2.0, -4.0], &[1, 2]));
}
