use crate::nn::nodes::raw_node::TraitNode;
use crate::nn::GraphError;
use crate::tensor::Tensor;

/// 逐元素除法节点：`parents[0] / parents[1]`（支持广播）
pub(in crate::nn) struct Divide;

impl TraitNode for Divide {
    fn type_name(&self) -> &'static str {
        "divide"
    }

    fn calc_value_by_parents(&mut self, parents: &[&Tensor]) -> Result<Tensor, GraphError> {
        Ok(parents[0] / parents[1])
    }

    /// d(a/b)/da = 1/b，d(a/b)/db = -a/b²
    fn calc_grad_to_parent(
        &self,
        index: usize,
        parents: &[&Tensor],
        _value: &Tensor,
        upstream_grad: &Tensor,
    ) -> Result<Tensor, GraphError> {
        let (a, b) = (parents[0], parents[1]);
        let grad = if index == 0 {
            upstream_grad / b
        } else {
            -(upstream_grad * a) / b.square()
        };
        Ok(grad.sum_to_shape(parents[index].shape()))
    }
}
