use crate::nn::nodes::raw_node::TraitNode;
use crate::nn::GraphError;
use crate::tensor::Tensor;

/// 将每行的最大值位置置1、其余置0（按行取one-hot）
///
/// 该运算几乎处处不可导，对父节点的梯度恒为0；
/// 直通估计（straight-through）需配合stop-gradient在图中显式构造。
pub(in crate::nn) struct OneHotMax;

impl TraitNode for OneHotMax {
    fn type_name(&self) -> &'static str {
        "one_hot_max"
    }

    fn calc_value_by_parents(&mut self, parents: &[&Tensor]) -> Result<Tensor, GraphError> {
        Ok(parents[0].max_mask(1))
    }

    fn calc_grad_to_parent(
        &self,
        _index: usize,
        parents: &[&Tensor],
        _value: &Tensor,
        _upstream_grad: &Tensor,
    ) -> Result<Tensor, GraphError> {
        Ok(Tensor::zeros(parents[0].shape()))
    }
}
