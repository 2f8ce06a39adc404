use crate::nn::nodes::raw_node::TraitNode;
use crate::nn::GraphError;
use crate::tensor::Tensor;

/// 对所有元素求和，输出形状为`[1, 1]`
pub(in crate::nn) struct Sum;

impl TraitNode for Sum {
    fn type_name(&self) -> &'static str {
        "sum"
    }

    fn calc_value_by_parents(&mut self, parents: &[&Tensor]) -> Result<Tensor, GraphError> {
        Ok(parents[0].sum())
    }

    fn calc_grad_to_parent(
        &self,
        _index: usize,
        parents: &[&Tensor],
        _value: &Tensor,
        upstream_grad: &Tensor,
    ) -> Result<Tensor, GraphError> {
        Ok(upstream_grad.broadcast_to(parents[0].shape()))
    }
}
