use crate::nn::nodes::raw_node::TraitNode;
use crate::nn::GraphError;
use crate::tensor::Tensor;

/// 逐元素减法节点：`parents[0] - parents[1]`（支持广播）
pub(in crate::nn) struct Subtract;

impl TraitNode for Subtract {
    fn type_name(&self) -> &'static str {
        "subtract"
    }

    fn calc_value_by_parents(&mut self, parents: &[&Tensor]) -> Result<Tensor, GraphError> {
        Ok(parents[0] - parents[1])
    }

    fn calc_grad_to_parent(
        &self,
        index: usize,
        parents: &[&Tensor],
        _value: &Tensor,
        upstream_grad: &Tensor,
    ) -> Result<Tensor, GraphError> {
        let grad = if index == 0 {
            upstream_grad.clone()
        } else {
            -upstream_grad
        };
        Ok(grad.sum_to_shape(parents[index].shape()))
    }
}
