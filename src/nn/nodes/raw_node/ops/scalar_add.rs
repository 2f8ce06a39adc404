use crate::nn::nodes::raw_node::TraitNode;
use crate::nn::GraphError;
use crate::tensor::Tensor;

/// 加常数节点：y = x + c
pub(in crate::nn) struct ScalarAdd {
    scalar: f32,
}

impl ScalarAdd {
    pub(in crate::nn) const fn new(scalar: f32) -> Self {
        Self { scalar }
    }
}

impl TraitNode for ScalarAdd {
    fn type_name(&self) -> &'static str {
        "scalar_add"
    }

    fn calc_value_by_parents(&mut self, parents: &[&Tensor]) -> Result<Tensor, GraphError> {
        Ok(parents[0] + self.scalar)
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
