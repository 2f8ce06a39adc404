use crate::nn::nodes::raw_node::TraitNode;
use crate::nn::GraphError;
use crate::tensor::Tensor;

/// 对所有元素求均值，输出形状为`[1, 1]`
pub(in crate::nn) struct Mean;

impl TraitNode for Mean {
    fn type_name(&self) -> &'static str {
        "mean"
    }

    fn calc_value_by_parents(&mut self, parents: &[&Tensor]) -> Result<Tensor, GraphError> {
        Ok(parents[0].mean())
    }

    fn calc_grad_to_parent(
        &self,
        _index: usize,
        parents: &[&Tensor],
        _value: &Tensor,
        upstream_grad: &Tensor,
    ) -> Result<Tensor, GraphError> {
        let size = parents[0].size() as f32;
        Ok(upstream_grad.broadcast_to(parents[0].shape()) / size)
    }
}
