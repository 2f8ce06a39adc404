/*
 * @Author       : 老董
 * @Description  : 类别采样层（Gumbel-Softmax）测试
 */

use crate::assert_err;
use crate::nn::{
    CategoricalSampleLayer, Graph, GraphError, Init, InputLayer, TraitLayer, Var, VarReduceOps,
};
use crate::tensor::Tensor;
use approx::assert_abs_diff_eq;

fn logits_input(graph: &Graph) -> InputLayer {
    let data = Tensor::new(
        &[
            1.0, 2.0, 0.5, //
            -1.0, 0.0, 3.0, //
            0.2, 0.1, 0.3, //
            2.0, -2.0, 0.0,
        ],
        &[2, 2, 3],
    );
    InputLayer::from_var(&graph.input(&data).unwrap())
}

fn rows_of(var: &Var) -> Vec<Vec<f32>> {
    var.forward().unwrap();
    let value = var.value().unwrap().unwrap();
    let classes = value.shape()[2];
    value
        .data_as_slice()
        .chunks(classes)
        .map(<[f32]>::to_vec)
        .collect()
}

#[test]
fn test_soft_sample_rows_are_distributions() {
    let graph = Graph::new_with_seed(1);
    let input = logits_input(&graph);
    let layer = CategoricalSampleLayer::new(&input, 0.5, false).unwrap();

    assert_eq!(layer.get_output_shape(), vec![2, 2, 3]);
    assert!(!layer.is_hard());
    assert_abs_diff_eq!(layer.temperature(), 0.5);

    for row in rows_of(&layer.get_output().unwrap()) {
        assert_abs_diff_eq!(row.iter().sum::<f32>(), 1.0, epsilon = 1e-5);
        assert!(row.iter().all(|&p| (0.0..=1.0).contains(&p)));
    }
}

#[test]
fn test_hard_sample_is_one_hot() {
    let graph = Graph::new_with_seed(2);
    let input = logits_input(&graph);
    let layer = CategoricalSampleLayer::new(&input, 1.0, true).unwrap();

    for row in rows_of(&layer.get_output().unwrap()) {
        let ones = row.iter().filter(|&&p| (p - 1.0).abs() < 1e-5).count();
        let zeros = row.iter().filter(|&&p| p.abs() < 1e-5).count();
        assert_eq!((ones, zeros), (1, 2));
    }
}

/// 在同种子的图上构建相同的网络，返回 logits 参数在损失 `sum(sample * weights)` 下的梯度
fn logits_grad(hard: bool) -> Tensor {
    let graph = Graph::new_with_seed(33);
    let logits = graph
        .parameter(
            &[1, 2, 3],
            Init::Values(Tensor::new(&[0.3, 1.2, -0.5, 0.0, 0.4, 0.9], &[1, 2, 3])),
            None,
        )
        .unwrap();
    let layer = CategoricalSampleLayer::new(&InputLayer::from_var(&logits), 0.7, hard).unwrap();
    let weights = graph
        .input(&Tensor::new(&[1.0, -2.0, 3.0, 0.5, 0.0, -1.0], &[1, 2, 3]))
        .unwrap();
    let loss = (&layer.get_output().unwrap() * &weights).sum().unwrap();
    loss.backward().unwrap();
    logits.grad().unwrap().unwrap()
}

#[test]
fn test_hard_sample_passes_soft_gradient() {
    let hard = logits_grad(true);
    let soft = logits_grad(false);

    assert_eq!(hard.shape(), &[1, 2, 3]);
    for (h, s) in hard.data_as_slice().iter().zip(soft.data_as_slice()) {
        assert_abs_diff_eq!(*h, s, epsilon = 1e-6);
    }
    assert!(soft.data_as_slice().iter().any(|g| g.abs() > 1e-6));
}

#[test]
fn test_categorical_sample_checks() {
    let graph = Graph::new();
    let matrix = InputLayer::from_var(&graph.input(&Tensor::ones(&[2, 3])).unwrap());
    assert_err!(
        CategoricalSampleLayer::new(&matrix, 1.0, false),
        GraphError::DimensionMismatch(3, 2)
    );

    let input = logits_input(&graph);
    assert_err!(
        CategoricalSampleLayer::new(&input, 0.0, true),
        GraphError::InvalidOperation(_)
    );
}

#[test]
fn test_low_temperature_concentrates_on_dominant_class() {
    let graph = Graph::new_with_seed(4);
    let data = Tensor::new(&[0.0, 50.0, 0.0], &[1, 1, 3]);
    let input = InputLayer::from_var(&graph.input(&data).unwrap());
    let layer = CategoricalSampleLayer::new(&input, 0.1, false).unwrap();

    let rows = rows_of(&layer.get_output().unwrap());
    assert_abs_diff_eq!(rows[0][1], 1.0, epsilon = 1e-4);
}
