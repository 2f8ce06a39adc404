/*
 * @Author       : 老董
 * @Description  : GraphInner 前向传播测试
 */

use crate::assert_err;
use crate::nn::{GraphError, GraphInner};
use crate::tensor::Tensor;
use approx::assert_abs_diff_eq;

#[test]
fn test_forward_add_with_broadcast() {
    let mut graph = GraphInner::new();
    let a = graph.new_input_node(&[2, 2], Some("a")).unwrap();
    let b = graph.new_input_node(&[1, 2], Some("b")).unwrap();
    let add = graph.new_add_node(&[a, b], None).unwrap();

    graph
        .set_node_value(a, Some(&Tensor::new(&[1.0, 2.0, 3.0, 4.0], &[2, 2])))
        .unwrap();
    graph
        .set_node_value(b, Some(&Tensor::new(&[10.0, 20.0], &[1, 2])))
        .unwrap();
    graph.forward(add).unwrap();

    let expected = Tensor::new(&[11.0, 22.0, 13.0, 24.0], &[2, 2]);
    assert_eq!(graph.get_node_value(add).unwrap().unwrap(), &expected);
}

#[test]
fn test_forward_chain_of_ops() {
    let mut graph = GraphInner::new();
    let x = graph.new_input_node(&[1, 3], None).unwrap();
    let w = graph.new_parameter_node(&[3, 2], None).unwrap();
    let xw = graph.new_mat_mul_node(x, w, None).unwrap();
    let shifted = graph.new_scalar_add_node(xw, -1.0, None).unwrap();
    let relu = graph.new_relu_node(shifted, None).unwrap();
    let total = graph.new_sum_node(relu, None).unwrap();

    graph
        .set_node_value(x, Some(&Tensor::new(&[1.0, 2.0, 3.0], &[1, 3])))
        .unwrap();
    graph
        .set_node_value(
            w,
            Some(&Tensor::new(&[1.0, -1.0, 0.0, -1.0, 1.0, -1.0], &[3, 2])),
        )
        .unwrap();
    graph.forward(total).unwrap();

    // xw = [1 + 0 + 3, -1 - 2 - 3] = [4, -6]；减1后relu = [3, 0]
    let relu_value = graph.get_node_value(relu).unwrap().unwrap();
    assert_eq!(relu_value, &Tensor::new(&[3.0, 0.0], &[1, 2]));
    let total_value = graph.get_node_value(total).unwrap().unwrap();
    assert_abs_diff_eq!(total_value.get_data_number().unwrap(), 3.0);
}

#[test]
fn test_forward_input_without_value() {
    let mut graph = GraphInner::new();
    let x = graph.new_input_node(&[2, 2], None).unwrap();
    let y = graph.new_sigmoid_node(x, None).unwrap();

    assert_err!(graph.forward(y), GraphError::InvalidOperation(_));
    assert!(!graph.has_node_value(y).unwrap());
}

#[test]
fn test_forward_updates_pass_id() {
    let mut graph = GraphInner::new();
    let x = graph.new_input_node(&[1, 1], None).unwrap();
    let y = graph.new_exp_node(x, None).unwrap();
    graph
        .set_node_value(x, Some(&Tensor::new(&[0.0], &[1, 1])))
        .unwrap();

    assert_eq!(graph.last_forward_pass_id(), 0);
    graph.forward(y).unwrap();
    assert_eq!(graph.last_forward_pass_id(), 1);
    graph.forward(y).unwrap();
    assert_eq!(graph.last_forward_pass_id(), 2);
    assert_abs_diff_eq!(
        graph.get_node_value(y).unwrap().unwrap().get_data_number().unwrap(),
        1.0
    );
}

/// 同一次前向传播中，被多个子节点共用的随机节点只采样一次
#[test]
fn test_shared_random_node_sampled_once_per_pass() {
    let mut graph = GraphInner::new();
    let r = graph.new_random_normal_node(&[2, 3], 0.0, 1.0, None).unwrap();
    let diff = graph.new_subtract_node(r, r, None).unwrap();

    graph.forward(diff).unwrap();
    assert_eq!(
        graph.get_node_value(diff).unwrap().unwrap(),
        &Tensor::zeros(&[2, 3])
    );
}

/// 每次新的前向传播都重新采样
#[test]
fn test_random_node_resampled_each_pass() {
    let mut graph = GraphInner::new();
    let r = graph.new_random_uniform_node(&[4, 4], 0.0, 1.0, None).unwrap();
    let y = graph.new_identity_node(r, None).unwrap();

    graph.forward(y).unwrap();
    let first = graph.get_node_value(y).unwrap().unwrap().clone();
    graph.forward(y).unwrap();
    let second = graph.get_node_value(y).unwrap().unwrap().clone();

    assert_ne!(first, second);
    assert!(first.data_as_slice().iter().all(|x| (0.0..1.0).contains(x)));
}

#[test]
fn test_seeded_graph_is_reproducible() {
    let sample = |seed: u64| {
        let mut graph = GraphInner::new_with_seed(seed);
        let r = graph.new_random_normal_node(&[3, 3], 0.0, 1.0, None).unwrap();
        let d = graph.new_dropout_node(r, 0.5, None).unwrap();
        graph.forward(d).unwrap();
        graph.get_node_value(d).unwrap().unwrap().clone()
    };

    assert_eq!(sample(42), sample(42));
    assert_ne!(sample(42), sample(43));
}

#[test]
fn test_dropout_forward() {
    let mut graph = GraphInner::new_with_seed(0);
    let x = graph.new_input_node(&[10, 10], None).unwrap();
    let d = graph.new_dropout_node(x, 0.8, None).unwrap();
    graph.set_node_value(x, Some(&Tensor::ones(&[10, 10]))).unwrap();
    graph.forward(d).unwrap();

    let value = graph.get_node_value(d).unwrap().unwrap();
    // 保留的元素被放大为 1/0.8
    for x in value.data_as_slice() {
        assert!(x == 0.0 || (x - 1.25).abs() < 1e-6);
    }

    // keep_prob = 1 时恒等
    let identity = graph.new_dropout_node(x, 1.0, None).unwrap();
    graph.forward(identity).unwrap();
    assert_eq!(
        graph.get_node_value(identity).unwrap().unwrap(),
        &Tensor::ones(&[10, 10])
    );
}

#[test]
fn test_forward_softmax_and_one_hot_max() {
    let mut graph = GraphInner::new();
    let x = graph.new_input_node(&[2, 3], None).unwrap();
    let softmax = graph.new_softmax_node(x, None).unwrap();
    let one_hot = graph.new_one_hot_max_node(x, None).unwrap();
    graph
        .set_node_value(
            x,
            Some(&Tensor::new(&[1.0, 2.0, 3.0, 0.0, 5.0, 1.0], &[2, 3])),
        )
        .unwrap();

    graph.forward(softmax).unwrap();
    let probs = graph.get_node_value(softmax).unwrap().unwrap();
    for row in 0..2 {
        let row_sum: f32 = (0..3).map(|c| probs[[row, c]]).sum();
        assert_abs_diff_eq!(row_sum, 1.0, epsilon = 1e-6);
    }
    // softmax([1, 2, 3])
    assert_abs_diff_eq!(probs[[0, 0]], 0.090_030_57, epsilon = 1e-6);
    assert_abs_diff_eq!(probs[[0, 2]], 0.665_240_94, epsilon = 1e-6);

    graph.forward(one_hot).unwrap();
    assert_eq!(
        graph.get_node_value(one_hot).unwrap().unwrap(),
        &Tensor::new(&[0.0, 0.0, 1.0, 0.0, 1.0, 0.0], &[2, 3])
    );
}

#[test]
fn test_forward_reductions() {
    let mut graph = GraphInner::new();
    let x = graph.new_input_node(&[2, 3], None).unwrap();
    let sum = graph.new_sum_node(x, None).unwrap();
    let mean = graph.new_mean_node(x, None).unwrap();
    let sum_axis = graph.new_sum_axis_node(x, 1, None).unwrap();
    graph
        .set_node_value(
            x,
            Some(&Tensor::new(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0], &[2, 3])),
        )
        .unwrap();

    for id in [sum, mean, sum_axis] {
        graph.forward(id).unwrap();
    }
    assert_eq!(
        graph.get_node_value(sum).unwrap().unwrap(),
        &Tensor::new(&[21.0], &[1, 1])
    );
    assert_eq!(
        graph.get_node_value(mean).unwrap().unwrap(),
        &Tensor::new(&[3.5], &[1, 1])
    );
    assert_eq!(
        graph.get_node_value(sum_axis).unwrap().unwrap(),
        &Tensor::new(&[6.0, 15.0], &[2, 1])
    );
}
