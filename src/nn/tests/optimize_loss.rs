/*
 * @Author       : 老董
 * @Description  : 代价函数、变分下界与 build_loss（含正则项）测试
 */

use crate::assert_err;
use crate::nn::{
    DenseLayer, Graph, Init, InputLayer, Network, Objective, OptimizationConfig, OptimizeError,
    Placeholders, TraitLayer, Var, build_loss, cost_function,
    variational_lower_bound,
};
use crate::tensor::Tensor;
use approx::assert_abs_diff_eq;

fn loss_value(loss: &Var) -> f32 {
    loss.forward().unwrap();
    loss.item().unwrap()
}

fn constant(graph: &Graph, data: &[f32], shape: &[usize]) -> Var {
    graph.input(&Tensor::new(data, shape)).unwrap()
}

#[test]
fn test_binary_cross_entropy() {
    let graph = Graph::new();
    let predictions = constant(&graph, &[0.5, 0.5], &[1, 2]);
    let targets = constant(&graph, &[1.0, 0.0], &[1, 2]);

    let loss = cost_function(&predictions, &targets, Objective::Binary, true).unwrap();
    assert_abs_diff_eq!(loss_value(&loss), std::f32::consts::LN_2, epsilon = 1e-6);
}

#[test]
fn test_binary_cross_entropy_clips_saturated_predictions() {
    let graph = Graph::new();
    let predictions = constant(&graph, &[1.0, 0.0], &[1, 2]);
    let targets = constant(&graph, &[1.0, 0.0], &[1, 2]);

    let clipped = cost_function(&predictions, &targets, Objective::Binary, true).unwrap();
    let value = loss_value(&clipped);
    assert!(value.is_finite());
    assert_abs_diff_eq!(value, 0.0, epsilon = 1e-5);

    let unclipped = cost_function(&predictions, &targets, Objective::Binary, false).unwrap();
    assert!(loss_value(&unclipped).is_nan());
}

#[test]
fn test_categorical_cross_entropy() {
    let graph = Graph::new();
    let predictions = constant(&graph, &[0.2, 0.8, 0.5, 0.5], &[2, 2]);
    let targets = constant(&graph, &[0.0, 1.0, 1.0, 0.0], &[2, 2]);

    let loss = cost_function(&predictions, &targets, Objective::Categorical, true).unwrap();
    let expected = -(0.8f32.ln() + 0.5f32.ln()) / 2.0;
    assert_abs_diff_eq!(loss_value(&loss), expected, epsilon = 1e-6);
}

#[test]
fn test_squared_error() {
    let graph = Graph::new();
    let predictions = constant(&graph, &[1.0, 2.0, 3.0], &[1, 3]);
    let targets = constant(&graph, &[1.0, 0.0, 0.0], &[1, 3]);

    let loss = cost_function(&predictions, &targets, Objective::SquaredError, false).unwrap();
    assert_abs_diff_eq!(loss_value(&loss), 13.0 / 3.0, epsilon = 1e-5);
}

#[test]
fn test_cost_function_rejects_lower_bound() {
    let graph = Graph::new();
    let x = constant(&graph, &[0.5], &[1, 1]);

    assert_err!(
        cost_function(&x, &x, Objective::LowerBound, false),
        OptimizeError::UnsupportedObjective(Objective::LowerBound)
    );
}

/// 以固定值的输入层模拟编码器/解码器输出，构造变分下界所需的网络
fn vae_network(graph: &Graph, mu: f32, logsigma: f32, x_mu: f32) -> Network {
    let layer = |value: f32| InputLayer::from_var(&constant(graph, &[value, value], &[1, 2]));
    let mut network = Network::new();
    network.insert("encode_mu", layer(mu));
    network.insert("encode_logsigma", layer(logsigma));
    network.insert("X", layer(x_mu));
    network
}

#[test]
fn test_variational_lower_bound_binary() {
    let graph = Graph::new();
    let targets = constant(&graph, &[1.0, 0.0], &[1, 2]);

    // 后验等于先验时 KL 项为0，损失只剩重构误差
    let network = vae_network(&graph, 0.0, 0.0, 0.5);
    let (loss, x_mu) = variational_lower_bound(&network, &targets, true).unwrap();
    assert_abs_diff_eq!(loss_value(&loss), 2.0 * std::f32::consts::LN_2, epsilon = 1e-5);
    assert_eq!(x_mu.value().unwrap().unwrap(), Tensor::full(0.5, &[1, 2]));

    // 均值偏离先验：每维 KL 增加 μ²/2
    let network = vae_network(&graph, 1.0, 0.0, 0.5);
    let (loss, _) = variational_lower_bound(&network, &targets, true).unwrap();
    assert_abs_diff_eq!(loss_value(&loss), 2.0 * std::f32::consts::LN_2 + 1.0, epsilon = 1e-5);
}

#[test]
fn test_variational_lower_bound_gaussian() {
    let graph = Graph::new();
    let targets = constant(&graph, &[0.5, 0.5], &[1, 2]);
    let network = vae_network(&graph, 0.0, 0.0, 0.5);

    // x_logsigma = ln(sqrt(0.5 * 0.5))，目标与均值相同
    let (loss, _) = variational_lower_bound(&network, &targets, false).unwrap();
    let per_dim = 0.5f32.ln() + 0.5 * (2.0 * std::f32::consts::PI).ln();
    assert_abs_diff_eq!(loss_value(&loss), 2.0 * per_dim, epsilon = 1e-5);
}

#[test]
fn test_variational_lower_bound_gaussian_returns_clipped_mean() {
    let graph = Graph::new();
    let targets = constant(&graph, &[1.0, 1.0], &[1, 2]);
    let network = vae_network(&graph, 0.0, 0.0, 1.0);

    let (loss, x_mu) = variational_lower_bound(&network, &targets, false).unwrap();
    assert!(loss_value(&loss).is_finite());
    for value in x_mu.value().unwrap().unwrap().data_as_slice() {
        assert!(value < 1.0);
        assert_abs_diff_eq!(value, 1.0, epsilon = 1e-6);
    }
}

#[test]
fn test_variational_lower_bound_missing_layer() {
    let graph = Graph::new();
    let targets = constant(&graph, &[1.0, 0.0], &[1, 2]);
    let encoder = vae_network(&graph, 0.0, 0.0, 0.5);
    let mut network = Network::new();
    for name in ["encode_mu", "encode_logsigma"] {
        network.insert(name, encoder.get(name).unwrap().clone());
    }

    assert_err!(
        variational_lower_bound(&network, &targets, true),
        OptimizeError::MissingLayer(name) if name == "X"
    );
}

fn regression_network(graph: &Graph) -> (Network, Placeholders) {
    let x = constant(graph, &[0.0], &[1, 1]);
    let input = InputLayer::from_var(&x);
    let output = DenseLayer::with_init(
        &input,
        2,
        Init::Values(Tensor::new(&[1.0, -2.0], &[1, 2])),
        Some(Init::Constant(0.5)),
    )
    .unwrap();
    let targets = constant(graph, &[0.5, 0.5], &[1, 2]);

    let mut network = Network::new();
    network.insert("input", input);
    network.insert("output", output);
    (network, Placeholders::new(&x, &targets))
}

fn squared_error_config(l1: Option<f32>, l2: Option<f32>) -> OptimizationConfig {
    OptimizationConfig {
        objective: Some(Objective::SquaredError),
        l1,
        l2,
        ..Default::default()
    }
}

#[test]
fn test_build_loss_with_regularization() {
    let graph = Graph::new();
    let (network, placeholders) = regression_network(&graph);

    // 输入为0，输出恰为偏置，与目标一致，代价为0
    let (loss, predictions) =
        build_loss(&network, &placeholders, &squared_error_config(None, None)).unwrap();
    assert_abs_diff_eq!(loss_value(&loss), 0.0);
    assert_eq!(predictions.value_expected_shape(), vec![1, 2]);

    // |W| + |b| = 1 + 2 + 0.5 + 0.5
    let (loss, _) =
        build_loss(&network, &placeholders, &squared_error_config(Some(0.1), None)).unwrap();
    assert_abs_diff_eq!(loss_value(&loss), 0.4, epsilon = 1e-6);

    // W² + b² = 1 + 4 + 0.25 + 0.25
    let (loss, _) =
        build_loss(&network, &placeholders, &squared_error_config(Some(0.1), Some(0.01))).unwrap();
    assert_abs_diff_eq!(loss_value(&loss), 0.455, epsilon = 1e-6);
}

#[test]
fn test_build_loss_respects_regularization_flags() {
    let graph = Graph::new();
    let (network, placeholders) = regression_network(&graph);
    let output = network.output().unwrap().as_param_layer().unwrap();
    for var in output.get_variable(false) {
        var.set_l1_regularize(false).unwrap();
    }

    let (loss, _) =
        build_loss(&network, &placeholders, &squared_error_config(Some(0.1), Some(0.01))).unwrap();
    assert_abs_diff_eq!(loss_value(&loss), 0.055, epsilon = 1e-6);
}

#[test]
fn test_build_loss_errors() {
    let graph = Graph::new();
    let (network, placeholders) = regression_network(&graph);

    assert_err!(
        build_loss(&network, &placeholders, &OptimizationConfig::default()),
        OptimizeError::MissingKey(key) if *key == "objective"
    );

    let categorical = OptimizationConfig {
        objective: Some(Objective::Categorical),
        ..Default::default()
    };
    assert_err!(
        build_loss(&Network::new(), &placeholders, &categorical),
        OptimizeError::MissingLayer(name) if name == "output"
    );
    assert_err!(
        build_loss(&network, &Placeholders::default(), &categorical),
        OptimizeError::MissingPlaceholder(name) if *name == "targets"
    );

    let lower_bound = OptimizationConfig {
        objective: Some(Objective::LowerBound),
        ..Default::default()
    };
    assert_err!(
        build_loss(&network, &Placeholders::default(), &lower_bound),
        OptimizeError::MissingPlaceholder(name) if *name == "inputs"
    );
}

#[test]
fn test_build_loss_lower_bound() {
    let graph = Graph::new();
    let network = vae_network(&graph, 0.0, 0.0, 0.5);
    let inputs = constant(&graph, &[1.0, 0.0], &[1, 2]);
    let placeholders = Placeholders {
        inputs: Some(inputs),
        targets: None,
    };
    let config = OptimizationConfig {
        objective: Some(Objective::LowerBound),
        binary: Some(true),
        ..Default::default()
    };

    let (loss, _) = build_loss(&network, &placeholders, &config).unwrap();
    assert_abs_diff_eq!(loss_value(&loss), 2.0 * std::f32::consts::LN_2, epsilon = 1e-5);
}
