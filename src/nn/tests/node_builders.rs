/*
 * @Author       : 老董
 * @Description  : 节点构建测试：命名、形状推断与构建时的校验
 */

use crate::assert_err;
use crate::nn::{GraphError, GraphInner, NodeId};
use crate::tensor::Tensor;

#[test]
fn test_node_auto_naming() {
    let mut graph = GraphInner::new();
    let a = graph.new_input_node(&[2, 2], None).unwrap();
    let b = graph.new_input_node(&[2, 2], None).unwrap();
    let add = graph.new_add_node(&[a, b], None).unwrap();
    let named = graph.new_parameter_node(&[2, 2], Some("weight")).unwrap();

    assert_eq!(graph.get_node_name(a).unwrap(), "input_1");
    assert_eq!(graph.get_node_name(b).unwrap(), "input_2");
    assert_eq!(graph.get_node_name(add).unwrap(), "add_1");
    assert_eq!(graph.get_node_name(named).unwrap(), "weight");
    assert_eq!(graph.get_node_type_name(named).unwrap(), "parameter");
    assert_eq!(graph.nodes_count(), 4);
    assert_eq!(graph.nodes(), vec![a, b, add, named]);
}

#[test]
fn test_duplicate_node_name() {
    let mut graph = GraphInner::with_name("dup");
    graph.new_input_node(&[1, 1], Some("x")).unwrap();

    assert_err!(
        graph.new_input_node(&[1, 1], Some("x")),
        GraphError::DuplicateNodeName("节点x在图dup中重复")
    );
}

#[test]
fn test_node_edges() {
    let mut graph = GraphInner::new();
    let a = graph.new_input_node(&[2, 3], None).unwrap();
    let b = graph.new_parameter_node(&[3, 4], None).unwrap();
    let c = graph.new_mat_mul_node(a, b, None).unwrap();

    assert_eq!(graph.get_node_parents(c).unwrap(), vec![a, b]);
    assert_eq!(graph.get_node_children(a).unwrap(), vec![c]);
    assert!(graph.get_node_children(c).unwrap().is_empty());
    assert_eq!(graph.get_node_value_expected_shape(c).unwrap(), &[2, 4]);
}

#[test]
fn test_node_not_found() {
    let mut graph = GraphInner::new();

    assert_err!(
        graph.new_sigmoid_node(NodeId(999), None),
        GraphError::NodeNotFound(NodeId(999))
    );
    assert_err!(graph.forward(NodeId(7)), GraphError::NodeNotFound(NodeId(7)));
}

#[test]
fn test_invalid_source_shape() {
    let mut graph = GraphInner::new();

    assert_err!(graph.new_input_node(&[], None), GraphError::InvalidOperation(_));
    assert_err!(graph.new_parameter_node(&[2, 0], None), GraphError::InvalidOperation(_));
    assert_err!(
        graph.new_random_normal_node(&[2, 2], 0.0, -1.0, None),
        GraphError::InvalidOperation(_)
    );
    assert_err!(
        graph.new_random_uniform_node(&[2, 2], 1.0, 1.0, None),
        GraphError::InvalidOperation(_)
    );
}

#[test]
fn test_broadcast_shape_inference() {
    let mut graph = GraphInner::new();
    let a = graph.new_input_node(&[4, 1], None).unwrap();
    let b = graph.new_input_node(&[1, 3], None).unwrap();
    let c = graph.new_input_node(&[2, 3], None).unwrap();

    let mul = graph.new_multiply_node(a, b, None).unwrap();
    assert_eq!(graph.get_node_value_expected_shape(mul).unwrap(), &[4, 3]);

    assert_err!(
        graph.new_subtract_node(a, c, None),
        GraphError::ShapeMismatch { expected, got, .. } if expected == &[4, 1] && got == &[2, 3]
    );
}

#[test]
fn test_add_needs_two_parents() {
    let mut graph = GraphInner::new();
    let a = graph.new_input_node(&[2, 2], None).unwrap();

    assert_err!(
        graph.new_add_node(&[a], None),
        GraphError::InvalidOperation("Add节点至少需要2个父节点")
    );
}

#[test]
fn test_mat_mul_shape_checks() {
    let mut graph = GraphInner::new();
    let a = graph.new_input_node(&[2, 3], None).unwrap();
    let b = graph.new_input_node(&[2, 3], None).unwrap();
    let rank3 = graph.new_input_node(&[2, 3, 4], None).unwrap();

    assert_err!(graph.new_mat_mul_node(a, b, None), GraphError::ShapeMismatch { .. });
    assert_err!(
        graph.new_mat_mul_node(rank3, a, None),
        GraphError::DimensionMismatch(2, 3)
    );
}

#[test]
fn test_matrix_only_nodes() {
    let mut graph = GraphInner::new();
    let rank3 = graph.new_input_node(&[2, 3, 4], None).unwrap();

    assert_err!(graph.new_softmax_node(rank3, None), GraphError::DimensionMismatch(2, 3));
    assert_err!(graph.new_one_hot_max_node(rank3, None), GraphError::DimensionMismatch(2, 3));
    assert_err!(graph.new_concat_node(&[rank3], None), GraphError::DimensionMismatch(2, 3));
}

#[test]
fn test_concat_checks() {
    let mut graph = GraphInner::new();
    let a = graph.new_input_node(&[2, 3], None).unwrap();
    let b = graph.new_input_node(&[2, 1], None).unwrap();
    let c = graph.new_input_node(&[3, 1], None).unwrap();

    let joined = graph.new_concat_node(&[a, b], None).unwrap();
    assert_eq!(graph.get_node_value_expected_shape(joined).unwrap(), &[2, 4]);

    assert_err!(graph.new_concat_node(&[a, c], None), GraphError::ShapeMismatch { .. });
    assert_err!(
        graph.new_concat_node(&[], None),
        GraphError::InvalidOperation("Concat节点至少需要1个父节点")
    );
}

#[test]
fn test_unary_node_checks() {
    let mut graph = GraphInner::new();
    let x = graph.new_input_node(&[2, 3], None).unwrap();

    assert_err!(graph.new_clip_node(x, 1.0, 0.0, None), GraphError::InvalidOperation(_));
    assert_err!(graph.new_dropout_node(x, 0.0, None), GraphError::InvalidOperation(_));
    assert_err!(graph.new_dropout_node(x, 1.5, None), GraphError::InvalidOperation(_));
    assert!(graph.new_dropout_node(x, 1.0, None).is_ok());

    let reshaped = graph.new_reshape_node(x, &[3, 2], None).unwrap();
    assert_eq!(graph.get_node_value_expected_shape(reshaped).unwrap(), &[3, 2]);
    assert_err!(
        graph.new_reshape_node(x, &[4, 2], None),
        GraphError::ShapeMismatch([2, 3], [4, 2], "Reshape节点的目标形状与父节点的元素总数不一致")
    );
}

#[test]
fn test_reduction_shapes() {
    let mut graph = GraphInner::new();
    let x = graph.new_input_node(&[2, 3], None).unwrap();

    let sum = graph.new_sum_node(x, None).unwrap();
    let mean = graph.new_mean_node(x, None).unwrap();
    let rows = graph.new_sum_axis_node(x, 1, None).unwrap();
    let cols = graph.new_sum_axis_node(x, 0, None).unwrap();

    assert_eq!(graph.get_node_value_expected_shape(sum).unwrap(), &[1, 1]);
    assert_eq!(graph.get_node_value_expected_shape(mean).unwrap(), &[1, 1]);
    assert_eq!(graph.get_node_value_expected_shape(rows).unwrap(), &[2, 1]);
    assert_eq!(graph.get_node_value_expected_shape(cols).unwrap(), &[1, 3]);
    assert_err!(graph.new_sum_axis_node(x, 2, None), GraphError::DimensionMismatch(3, 2));
}

#[test]
fn test_set_node_value_checks() {
    let mut graph = GraphInner::new();
    let x = graph.new_input_node(&[1, 2], None).unwrap();
    let y = graph.new_exp_node(x, None).unwrap();

    assert_err!(
        graph.set_node_value(x, Some(&Tensor::zeros(&[2, 1]))),
        GraphError::ShapeMismatch { expected, got, .. } if expected == &[1, 2] && got == &[2, 1]
    );
    assert_err!(
        graph.set_node_value(y, Some(&Tensor::zeros(&[1, 2]))),
        GraphError::InvalidOperation(_)
    );

    graph.set_node_value(x, Some(&Tensor::zeros(&[1, 2]))).unwrap();
    assert!(graph.has_node_value(x).unwrap());
    graph.set_node_value(x, None).unwrap();
    assert!(!graph.has_node_value(x).unwrap());
}
