/*
 * @Author       : 老董
 * @Description  : Network（按名称索引的层集合）与 Placeholders 测试
 */

use crate::nn::{
    Activation, ActivationLayer, DenseLayer, Graph, InputLayer, LayerEnum, Network, Placeholders,
    TraitLayer,
};
use crate::tensor::Tensor;

fn small_network(graph: &Graph) -> Network {
    let input = InputLayer::new(graph, &[4, 3], Some("x")).unwrap();
    let hidden = DenseLayer::new(&input, 5).unwrap();
    let output = ActivationLayer::new(&hidden, Activation::Sigmoid).unwrap();

    let mut network = Network::new();
    network.insert("input", input);
    network.insert("hidden", hidden);
    network.insert("output", output);
    network
}

#[test]
fn test_network_lookup() {
    let graph = Graph::new();
    let network = small_network(&graph);

    assert_eq!(network.len(), 3);
    assert!(!network.is_empty());
    assert!(matches!(network.get("hidden"), Some(LayerEnum::DenseLayer(_))));
    assert!(network.get("missing").is_none());
    assert_eq!(network.output().unwrap().get_output_shape(), vec![4, 5]);
}

#[test]
fn test_network_iterates_by_name() {
    let graph = Graph::new();
    let network = small_network(&graph);

    let names = network.iter().map(|(name, _)| name).collect::<Vec<_>>();
    assert_eq!(names, ["hidden", "input", "output"]);
    assert_eq!(
        network.summary(),
        vec![
            ("hidden".to_string(), vec![4, 5]),
            ("input".to_string(), vec![4, 3]),
            ("output".to_string(), vec![4, 5]),
        ]
    );
}

#[test]
fn test_network_insert_replaces() {
    let graph = Graph::new();
    let mut network = small_network(&graph);
    let input = InputLayer::new(&graph, &[4, 3], None).unwrap();

    let previous = network.insert("hidden", DenseLayer::new(&input, 2).unwrap());
    assert!(matches!(previous, Some(LayerEnum::DenseLayer(_))));
    assert_eq!(network.len(), 3);
    assert_eq!(network.get("hidden").unwrap().get_output_shape(), vec![4, 2]);
    assert!(Network::new().output().is_none());
}

#[test]
fn test_placeholders() {
    let graph = Graph::new();
    let x = graph.input(&Tensor::zeros(&[2, 3])).unwrap();
    let y = graph.input(&Tensor::zeros(&[2, 1])).unwrap();

    let empty = Placeholders::default();
    assert!(empty.inputs.is_none() && empty.targets.is_none());

    let placeholders = Placeholders::new(&x, &y);
    assert_eq!(placeholders.inputs.unwrap().node_id(), x.node_id());
    assert_eq!(placeholders.targets.unwrap().node_id(), y.node_id());
}
