use crate::nn::nodes::raw_node::TraitNode;
use crate::nn::GraphError;
use crate::tensor::Tensor;

/// 逐元素乘法（Hadamard积）节点，支持广播
pub(in crate::nn) struct Multiply;

impl TraitNode for Multiply {
    fn type_name(&self) -> &'static str {
        "multiply"
    }

    fn calc_value_by_parents(&mut self, parents: &[&Tensor]) -> Result<Tensor, GraphError> {
        Ok(parents[0] * parents[1])
    }

    /// d(a⊙b)/da = b，d(a⊙b)/db = a
    fn calc_grad_to_parent(
        &self,
        index: usize,
        parents: &[&Tensor],
        _value: &Tensor,
        upstream_grad: &Tensor,
    ) -> Result<Tensor, GraphError> {
        let other = parents[1 - index];
        Ok((upstream_grad * other).sum_to_shape(parents[index].shape()))
    }
}
