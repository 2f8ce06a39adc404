use crate::nn::nodes::raw_node::TraitNode;
use crate::nn::GraphError;
use crate::tensor::Tensor;

/// 数乘节点：y = c·x（c为构建时给定的常数）
pub(in crate::nn) struct ScalarMultiply {
    scalar: f32,
}

impl ScalarMultiply {
    pub(in crate::nn) const fn new(scalar: f32) -> Self {
        Self { scalar }
    }
}

impl TraitNode for ScalarMultiply {
    fn type_name(&self) -> &'static str {
        "scalar_multiply"
    }

    fn calc_value_by_parents(&mut self, parents: &[&Tensor]) -> Result<Tensor, GraphError> {
        Ok(parents[0] * self.scalar)
    }

    fn calc_grad_to_parent(
        &self,
        _index: usize,
        _parents: &[&Tensor],
        _value: &Tensor,
        upstream_grad: &Tensor,
    ) -> Result<Tensor, GraphError> {
        Ok(upstream_grad * self.scalar)
    }
}
