use super::{no_parent_error, NodeKind, TraitNode};
use crate::nn::GraphError;
use crate::tensor::Tensor;

/// 输入节点：值由调用者通过`set_value`提供（如训练数据、标签）
pub(in crate::nn) struct Input;

impl TraitNode for Input {
    fn type_name(&self) -> &'static str {
        "input"
    }

    fn kind(&self) -> NodeKind {
        NodeKind::Input
    }

    fn calc_value_by_parents(&mut self, _parents: &[&Tensor]) -> Result<Tensor, GraphError> {
        Err(GraphError::InvalidOperation(
            "输入节点的值应通过 set_value 设置，而非通过父节点前向传播计算".to_string(),
        ))
    }

    fn calc_grad_to_parent(
        &self,
        _index: usize,
        _parents: &[&Tensor],
        _value: &Tensor,
        _upstream_grad: &Tensor,
    ) -> Result<Tensor, GraphError> {
        Err(no_parent_error(self.type_name()))
    }
}
