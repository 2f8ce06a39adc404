use crate::nn::nodes::raw_node::TraitNode;
use crate::nn::GraphError;
use crate::tensor::Tensor;

/// ReLU激活：y = max(0, x)
pub(in crate::nn) struct Relu;

impl TraitNode for Relu {
    fn type_name(&self) -> &'static str {
        "relu"
    }

    fn calc_value_by_parents(&mut self, parents: &[&Tensor]) -> Result<Tensor, GraphError> {
        Ok(parents[0].map(|x| x.max(0.0)))
    }

    fn calc_grad_to_parent(
        &self,
        _index: usize,
        parents: &[&Tensor],
        _value: &Tensor,
        upstream_grad: &Tensor,
    ) -> Result<Tensor, GraphError> {
        Ok(upstream_grad * parents[0].positive_mask())
    }
}
