use super::{no_parent_error, NodeKind, TraitNode};
use crate::nn::GraphError;
use crate::tensor::Tensor;

/// 参数的训练/正则化标记
///
/// - `trainable`: 是否被优化器收集并更新
/// - `l1_regularize` / `l2_regularize`: 是否计入对应的正则化惩罚项
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParamFlags {
    pub trainable: bool,
    pub l1_regularize: bool,
    pub l2_regularize: bool,
}

impl Default for ParamFlags {
    fn default() -> Self {
        Self {
            trainable: true,
            l1_regularize: true,
            l2_regularize: true,
        }
    }
}

/// 参数节点：值在创建时初始化，之后只被优化器更新
pub(in crate::nn) struct Parameter {
    flags: ParamFlags,
}

impl Parameter {
    pub(in crate::nn) fn new() -> Self {
        Self {
            flags: ParamFlags::default(),
        }
    }

    pub(in crate::nn) const fn flags(&self) -> &ParamFlags {
        &self.flags
    }

    pub(in crate::nn) const fn flags_mut(&mut self) -> &mut ParamFlags {
        &mut self.flags
    }
}

impl TraitNode for Parameter {
    fn type_name(&self) -> &'static str {
        "parameter"
    }

    fn kind(&self) -> NodeKind {
        NodeKind::Parameter
    }

    fn calc_value_by_parents(&mut self, _parents: &[&Tensor]) -> Result<Tensor, GraphError> {
        Err(GraphError::InvalidOperation(
            "参数节点被执行了前向传播。不该触及本错误，否则说明crate代码有问题".to_string(),
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
