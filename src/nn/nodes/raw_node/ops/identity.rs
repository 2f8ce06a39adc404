use crate::nn::nodes::raw_node::TraitNode;
use crate::nn::GraphError;
use crate::tensor::Tensor;

/// 恒等节点：值与父节点相同。配合detach可实现stop-gradient（前向不变、梯度截断）
pub(in crate::nn) struct Identity;

impl TraitNode for Identity {
    fn type_name(&self) -> &'static str {
        "identity"
    }

    fn calc_value_by_parents(&mut self, parents: &[&Tensor]) -> Result<Tensor, GraphError> {
        Ok(parents[0].clone())
    }

    fn calc_grad_to_parent(
        &self,
        _index: usize,
        _parents: &[&Tensor],
        _value: &Tensor,
        upstream_grad: &Tensor,
    ) -> Result<Tensor, GraphError> {
        Ok(upstream_grad.clone())
    }
}
