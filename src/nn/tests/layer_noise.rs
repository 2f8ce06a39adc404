/*
 * @Author       : 老董
 * @Description  : 随机层（Dropout、高斯噪声、变分采样）测试
 */

use crate::assert_err;
use crate::nn::{
    DenseLayer, DropoutLayer, GaussianNoiseLayer, Graph, GraphError, Init, InputLayer,
    TraitLayer, VarReduceOps, VariationalSampleLayer,
};
use crate::tensor::Tensor;
use approx::assert_abs_diff_eq;

fn ones_input(graph: &Graph, shape: &[usize]) -> InputLayer {
    InputLayer::from_var(&graph.input(&Tensor::ones(shape)).unwrap())
}

#[test]
fn test_dropout_layer() {
    let graph = Graph::new_with_seed(11);
    let input = ones_input(&graph, &[4, 50]);
    let dropout = DropoutLayer::with_keep_prob(&input, 0.8).unwrap();

    assert_eq!(dropout.get_output_shape(), vec![4, 50]);
    assert_abs_diff_eq!(dropout.keep_prob(), 0.8);

    let first = dropout.get_output().unwrap();
    let second = dropout.get_output().unwrap();
    assert_ne!(first.node_id(), second.node_id());

    first.forward().unwrap();
    let values = first.value().unwrap().unwrap().data_as_slice();
    assert!(
        values
            .iter()
            .all(|&v| v == 0.0 || (v - 1.25).abs() < 1e-6)
    );
    assert!(values.iter().any(|&v| v == 0.0));

    // 同一输出再次前向，掩码重新采样
    first.forward().unwrap();
    let redrawn = first.value().unwrap().unwrap().data_as_slice();
    assert_ne!(values, redrawn);

    // 两次 get_output 得到的输出，值也不同
    second.forward().unwrap();
    let other = second.value().unwrap().unwrap().data_as_slice();
    assert_ne!(redrawn, other);
}

#[test]
fn test_dropout_keep_prob_validation() {
    let graph = Graph::new();
    let input = ones_input(&graph, &[2, 2]);

    assert_abs_diff_eq!(DropoutLayer::new(&input).unwrap().keep_prob(), 0.5);
    assert_err!(DropoutLayer::with_keep_prob(&input, 0.0), GraphError::InvalidOperation(_));
    assert_err!(DropoutLayer::with_keep_prob(&input, 1.1), GraphError::InvalidOperation(_));
}

#[test]
fn test_gaussian_noise_layer() {
    let graph = Graph::new_with_seed(5);
    let input = ones_input(&graph, &[2, 3]);
    let noisy = GaussianNoiseLayer::with_params(&input, 0.0, 0.5).unwrap();

    assert_eq!(noisy.get_input_shape(), vec![2, 3]);
    assert_eq!(noisy.get_output_shape(), vec![2, 3]);

    let first = noisy.get_output().unwrap();
    let second = noisy.get_output().unwrap();
    first.forward().unwrap();
    second.forward().unwrap();
    assert_ne!(first.value().unwrap(), second.value().unwrap());
    assert_ne!(first.value().unwrap().unwrap(), Tensor::ones(&[2, 3]));
}

#[test]
fn test_gaussian_noise_zero_sigma_is_shift() {
    let graph = Graph::new();
    let input = ones_input(&graph, &[1, 3]);
    let noisy = GaussianNoiseLayer::with_params(&input, 2.0, 0.0).unwrap();

    let output = noisy.get_output().unwrap();
    output.forward().unwrap();
    assert_eq!(output.value().unwrap().unwrap(), Tensor::full(3.0, &[1, 3]));
}

#[test]
fn test_variational_sample_layer() {
    let graph = Graph::new_with_seed(9);
    let input = ones_input(&graph, &[3, 4]);
    let mu = DenseLayer::new(&input, 2).unwrap();
    let logvar = DenseLayer::new(&input, 2).unwrap();
    let sample = VariationalSampleLayer::new(&mu, &logvar).unwrap();

    assert_eq!(sample.get_output_shape(), vec![3, 2]);

    let loss = sample.get_output().unwrap().sum().unwrap();
    loss.backward().unwrap();
    assert!(mu.weight().grad().unwrap().is_some());
    assert!(logvar.weight().grad().unwrap().is_some());
}

#[test]
fn test_variational_sample_with_tiny_variance() {
    let graph = Graph::new();
    let input = ones_input(&graph, &[1, 2]);
    let mu = DenseLayer::with_init(&input, 2, Init::Zeros, Some(Init::Constant(3.0))).unwrap();
    let logvar =
        DenseLayer::with_init(&input, 2, Init::Zeros, Some(Init::Constant(-40.0))).unwrap();
    let sample = VariationalSampleLayer::new(&mu, &logvar).unwrap();

    // σ ≈ sqrt(1e-7)，采样值几乎等于均值
    let output = sample.get_output().unwrap();
    output.forward().unwrap();
    for v in output.value().unwrap().unwrap().data_as_slice() {
        assert_abs_diff_eq!(v, 3.0, epsilon = 0.01);
    }
}

#[test]
fn test_variational_sample_shape_mismatch() {
    let graph = Graph::new();
    let input = ones_input(&graph, &[2, 4]);
    let mu = DenseLayer::new(&input, 3).unwrap();
    let logvar = DenseLayer::new(&input, 2).unwrap();

    assert_err!(
        VariationalSampleLayer::new(&mu, &logvar),
        GraphError::ShapeMismatch([2, 3], [2, 2], "变分采样层的均值与对数方差形状不一致")
    );
}
