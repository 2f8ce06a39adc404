/*
 * @Author       : 老董
 * @Date         : 2026-02-08
 * @Description  : 变分自编码器：以变分下界为目标训练，损失应明显下降
 *                 网络结构：X(6) -> Dense(8, ReLU) -> [encode_mu(2), encode_logsigma(2)]
 *                          -> VariationalSample -> Dense(8, ReLU) -> Dense(6, Sigmoid)
 */
use deepomics::nn::{
    Activation, ActivationLayer, DenseLayer, GaussianNoiseLayer, Graph, InputLayer, Network,
    OptimizationConfig, OptimizeError, Placeholders, TraitLayer, TraitOptimizer,
    VariationalSampleLayer, build_loss, build_updates,
};
use deepomics::tensor::Tensor;

fn binary_patterns() -> Tensor {
    let rows: [[f32; 6]; 8] = [
        [1.0, 1.0, 1.0, 0.0, 0.0, 0.0],
        [0.0, 0.0, 0.0, 1.0, 1.0, 1.0],
        [1.0, 1.0, 0.0, 0.0, 0.0, 0.0],
        [0.0, 0.0, 0.0, 0.0, 1.0, 1.0],
        [1.0, 1.0, 1.0, 0.0, 0.0, 0.0],
        [0.0, 0.0, 0.0, 1.0, 1.0, 1.0],
        [0.0, 1.0, 1.0, 0.0, 0.0, 0.0],
        [0.0, 0.0, 0.0, 1.0, 1.0, 0.0],
    ];
    Tensor::new(&rows.concat(), &[8, 6])
}

fn average(values: &[f32]) -> f32 {
    values.iter().sum::<f32>() / values.len() as f32
}

#[test]
fn test_vae_lower_bound_decreases() -> Result<(), OptimizeError> {
    let graph = Graph::new_with_seed(2026);
    let x = graph.input_named(&binary_patterns(), "x")?;

    let input = InputLayer::from_var(&x);
    let noisy = GaussianNoiseLayer::with_params(&input, 0.0, 0.05)?;
    let encoder = DenseLayer::new(&noisy, 8)?;
    let encoder = ActivationLayer::new(&encoder, Activation::Relu)?;
    let encode_mu = DenseLayer::new(&encoder, 2)?;
    let encode_logsigma = DenseLayer::new(&encoder, 2)?;
    let z = VariationalSampleLayer::new(&encode_mu, &encode_logsigma)?;
    let decoder = DenseLayer::new(&z, 8)?;
    let decoder = ActivationLayer::new(&decoder, Activation::Relu)?;
    let logits = DenseLayer::new(&decoder, 6)?;
    let reconstruction = ActivationLayer::new(&logits, Activation::Sigmoid)?;
    assert_eq!(reconstruction.get_output_shape(), vec![8, 6]);

    let mut network = Network::new();
    network.insert("encoder", encoder);
    network.insert("encode_mu", encode_mu);
    network.insert("encode_logsigma", encode_logsigma);
    network.insert("decoder", decoder);
    network.insert("logits", logits);
    network.insert("X", reconstruction);

    let config = OptimizationConfig::from_json(
        r#"{"optimizer": "adam", "learning_rate": 0.01, "objective": "lower_bound", "binary": true}"#,
    )?;
    let placeholders = Placeholders {
        inputs: Some(x),
        targets: None,
    };
    let (loss, _) = build_loss(&network, &placeholders, &config)?;
    let mut optimizer = build_updates(&config)?;

    let losses = (0..400)
        .map(|_| optimizer.minimize(&loss))
        .collect::<Result<Vec<_>, _>>()?;
    let (head, tail) = (average(&losses[..20]), average(&losses[losses.len() - 20..]));
    println!("VAE 负变分下界：{head:.4} -> {tail:.4}");
    assert!(losses.iter().all(|l| l.is_finite()));
    assert!(tail < head * 0.8, "负变分下界没有明显下降：{head} -> {tail}");
    Ok(())
}
