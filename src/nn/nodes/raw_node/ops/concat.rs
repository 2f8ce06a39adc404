use crate::nn::nodes::raw_node::TraitNode;
use crate::nn::GraphError;
use crate::tensor::Tensor;

/// 按列（axis=1）拼接若干个行数相同的矩阵
pub(in crate::nn) struct Concat;

impl TraitNode for Concat {
    fn type_name(&self) -> &'static str {
        "concat"
    }

    fn calc_value_by_parents(&mut self, parents: &[&Tensor]) -> Result<Tensor, GraphError> {
        Ok(Tensor::concat_cols(parents))
    }

    fn calc_grad_to_parent(
        &self,
        index: usize,
        parents: &[&Tensor],
        _value: &Tensor,
        upstream_grad: &Tensor,
    ) -> Result<Tensor, GraphError> {
        let start: usize = parents[..index].iter().map(|p| p.shape()[1]).sum();
        let end = start + parents[index].shape()[1];
        Ok(upstream_grad.slice_cols(start, end))
    }
}
