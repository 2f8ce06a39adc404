use crate::nn::nodes::raw_node::TraitNode;
use crate::nn::GraphError;
use crate::tensor::Tensor;

/// 截断节点：将每个元素限制在`[min, max]`内
///
/// 梯度只在区间内部（含边界）透传，被截断的元素梯度为0。
pub(in crate::nn) struct Clip {
    min: f32,
    max: f32,
}

impl Clip {
    pub(in crate::nn) const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }
}

impl TraitNode for Clip {
    fn type_name(&self) -> &'static str {
        "clip"
    }

    fn calc_value_by_parents(&mut self, parents: &[&Tensor]) -> Result<Tensor, GraphError> {
        Ok(parents[0].clip(self.min, self.max))
    }

    fn calc_grad_to_parent(
        &self,
        _index: usize,
        parents: &[&Tensor],
        _value: &Tensor,
        upstream_grad: &Tensor,
    ) -> Result<Tensor, GraphError> {
        Ok(upstream_grad * parents[0].inside_mask(self.min, self.max))
    }
}
