use crate::nn::nodes::raw_node::TraitNode;
use crate::nn::GraphError;
use crate::tensor::Tensor;

/// Sigmoid激活：y = 1 / (1 + e⁻ˣ)，导数为y(1-y)
pub(in crate::nn) struct Sigmoid;

impl TraitNode for Sigmoid {
    fn type_name(&self) -> &'static str {
        "sigmoid"
    }

    fn calc_value_by_parents(&mut self, parents: &[&Tensor]) -> Result<Tensor, GraphError> {
        Ok(parents[0].sigmoid())
    }

    fn calc_grad_to_parent(
        &self,
        _index: usize,
        _parents: &[&Tensor],
        value: &Tensor,
        upstream_grad: &Tensor,
    ) -> Result<Tensor, GraphError> {
        Ok(upstream_grad * value * (1.0 - value))
    }
}
