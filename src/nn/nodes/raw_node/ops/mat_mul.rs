use crate::nn::nodes::raw_node::TraitNode;
use crate::nn::GraphError;
use crate::tensor::Tensor;

/// 矩阵乘法节点：`[m, n] @ [n, p] = [m, p]`
pub(in crate::nn) struct MatMul;

impl TraitNode for MatMul {
    fn type_name(&self) -> &'static str {
        "mat_mul"
    }

    fn calc_value_by_parents(&mut self, parents: &[&Tensor]) -> Result<Tensor, GraphError> {
        Ok(parents[0].mat_mul(parents[1]))
    }

    /// 对于 C = AB：dL/dA = G·Bᵀ，dL/dB = Aᵀ·G
    fn calc_grad_to_parent(
        &self,
        index: usize,
        parents: &[&Tensor],
        _value: &Tensor,
        upstream_grad: &Tensor,
    ) -> Result<Tensor, GraphError> {
        if index == 0 {
            Ok(upstream_grad.mat_mul(&parents[1].transpose()))
        } else {
            Ok(parents[0].transpose().mat_mul(upstream_grad))
        }
    }
}
