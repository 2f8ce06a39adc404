/*
 * @Author       : 老董
 * @Description  : 参数节点的训练/正则化标记与参数初始化
 */

use crate::assert_err;
use crate::nn::{Graph, GraphError, Init};
use crate::tensor::Tensor;

#[test]
fn test_param_default_flags() {
    let graph = Graph::new();
    let w = graph.parameter(&[2, 3], Init::Zeros, Some("w")).unwrap();

    assert!(w.is_trainable().unwrap());
    assert!(w.is_l1_regularize().unwrap());
    assert!(w.is_l2_regularize().unwrap());
}

#[test]
fn test_param_flags_toggle() {
    let graph = Graph::new();
    let w = graph.parameter(&[2, 3], Init::Zeros, None).unwrap();

    w.set_l1_regularize(false).unwrap();
    w.set_l2_regularize(false).unwrap();
    assert!(!w.is_l1_regularize().unwrap());
    assert!(!w.is_l2_regularize().unwrap());
    assert!(w.is_trainable().unwrap());

    w.set_l2_regularize(true).unwrap();
    assert!(w.is_l2_regularize().unwrap());
}

#[test]
fn test_trainable_filter() {
    let graph = Graph::new();
    let w = graph.parameter(&[2, 2], Init::Ones, Some("w")).unwrap();
    let b = graph.parameter(&[1, 2], Init::Zeros, Some("b")).unwrap();
    let frozen = graph.parameter(&[1, 2], Init::Zeros, Some("frozen")).unwrap();
    let _x = graph.input(&Tensor::ones(&[1, 2])).unwrap();

    frozen.set_trainable(false).unwrap();

    let trainable = graph.trainable_parameters();
    let names = trainable.iter().map(|v| v.name()).collect::<Vec<_>>();
    assert_eq!(names, vec!["w", "b"]);
    assert_eq!(
        graph.inner().get_trainable_nodes(),
        vec![w.node_id(), b.node_id()]
    );
}

#[test]
fn test_flags_on_non_parameter() {
    let graph = Graph::new();
    let x = graph.input(&Tensor::ones(&[1, 2])).unwrap();
    let y = x.clone() + x.clone();

    assert_err!(x.is_trainable(), GraphError::InvalidOperation(_));
    assert_err!(x.set_l1_regularize(true), GraphError::InvalidOperation(_));
    assert_err!(y.set_trainable(false), GraphError::InvalidOperation(_));
}

#[test]
fn test_param_init_values() {
    let graph = Graph::new();
    let w = graph
        .parameter(&[1, 2], Init::Values(Tensor::new(&[3.0, 4.0], &[1, 2])), None)
        .unwrap();
    assert_eq!(w.value().unwrap().unwrap(), Tensor::new(&[3.0, 4.0], &[1, 2]));

    assert_err!(
        graph.parameter(&[2, 1], Init::Values(Tensor::new(&[3.0, 4.0], &[1, 2])), None),
        GraphError::ShapeMismatch([2, 1], [1, 2], "参数的显式初始值与参数形状不一致")
    );
}

#[test]
fn test_seeded_param_init_is_reproducible() {
    let init = |seed| {
        let graph = Graph::new_with_seed(seed);
        let w = graph.parameter(&[4, 3], Init::HeNormal, None).unwrap();
        w.value().unwrap().unwrap()
    };

    assert_eq!(init(42), init(42));
    assert_ne!(init(42), init(43));
}
