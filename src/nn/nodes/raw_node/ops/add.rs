use crate::nn::nodes::raw_node::TraitNode;
use crate::nn::GraphError;
use crate::tensor::Tensor;

/// 逐元素加法节点，支持2个及以上父节点，父节点之间按广播规则对齐
pub(in crate::nn) struct Add;

impl TraitNode for Add {
    fn type_name(&self) -> &'static str {
        "add"
    }

    fn calc_value_by_parents(&mut self, parents: &[&Tensor]) -> Result<Tensor, GraphError> {
        let mut result = parents[0].clone();
        for parent in &parents[1..] {
            result = &result + *parent;
        }
        Ok(result)
    }

    fn calc_grad_to_parent(
        &self,
        index: usize,
        parents: &[&Tensor],
        _value: &Tensor,
        upstream_grad: &Tensor,
    ) -> Result<Tensor, GraphError> {
        // 加法对每个父节点的局部导数都是1，只需把广播过的维度规约回去
        Ok(upstream_grad.sum_to_shape(parents[index].shape()))
    }
}
