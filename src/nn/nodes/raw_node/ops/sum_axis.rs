use crate::nn::nodes::raw_node::TraitNode;
use crate::nn::GraphError;
use crate::tensor::Tensor;

/// 沿指定轴求和并保留该维度，如`[batch, n]`沿axis=1求和得到`[batch, 1]`
pub(in crate::nn) struct SumAxis {
    axis: usize,
}

impl SumAxis {
    pub(in crate::nn) const fn new(axis: usize) -> Self {
        Self { axis }
    }
}

impl TraitNode for SumAxis {
    fn type_name(&self) -> &'static str {
        "sum_axis"
    }

    fn calc_value_by_parents(&mut self, parents: &[&Tensor]) -> Result<Tensor, GraphError> {
        Ok(parents[0].sum_axis_keepdims(self.axis))
    }

    fn calc_grad_to_parent(
        &self,
        _index: usize,
        parents: &[&Tensor],
        _value: &Tensor,
        upstream_grad: &Tensor,
    ) -> Result<Tensor, GraphError> {
        Ok(upstream_grad.broadcast_to(parents[0].shape()))
    }
}
