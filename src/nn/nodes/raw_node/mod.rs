/*
 * @Author       : 老董
 * @Description  : 各类原始节点（raw node）：源节点（输入/参数/随机）与运算节点，
 *                 统一通过`TraitNode`分派前向计算和反向VJP
 */

mod input;
mod ops;
mod parameter;
mod random;

pub(in crate::nn) use input::Input;
pub(in crate::nn) use ops::*;
pub(in crate::nn) use parameter::{ParamFlags, Parameter};
pub(in crate::nn) use random::{RandomNormal, RandomUniform};

use crate::nn::GraphError;
use crate::tensor::Tensor;
use enum_dispatch::enum_dispatch;

/// 节点的大类，决定其值的来源以及能否接收梯度
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(in crate::nn) enum NodeKind {
    /// 值由外部设置，不接收梯度
    Input,
    /// 值由外部设置（初始化/优化器更新），接收梯度
    Parameter,
    /// 无父节点，每次前向传播重新采样，不接收梯度
    Random,
    /// 值由父节点计算得到
    Operator,
}

#[enum_dispatch]
pub(in crate::nn) enum NodeType {
    /*↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓源节点↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓*/
    Input,
    Parameter,
    RandomNormal,
    RandomUniform,
    /*↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑源节点↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑*/
    /*↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓算子↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓*/
    Add,
    Subtract,
    Multiply,
    Divide,
    MatMul,
    Concat,
    ScalarMultiply,
    ScalarAdd,
    Exp,
    Ln,
    Sqrt,
    Abs,
    Square,
    Sigmoid,
    Relu,
    Softmax,
    Clip,
    OneHotMax,
    Reshape,
    Identity,
    Dropout,
    Sum,
    SumAxis,
    Mean,
    /*↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑算子↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑*/
}

#[enum_dispatch(NodeType)]
pub(in crate::nn) trait TraitNode {
    /// 节点类型名，用于自动命名（如"add_1"）和显示
    fn type_name(&self) -> &'static str;

    fn kind(&self) -> NodeKind {
        NodeKind::Operator
    }

    /// 根据父节点的值计算本节点的值（父节点的值均已由Graph预先计算好，顺序与创建时一致）
    fn calc_value_by_parents(&mut self, parents: &[&Tensor]) -> Result<Tensor, GraphError>;

    /// 给定结果节点对本节点的梯度`upstream_grad`，计算对第`index`个父节点的梯度（VJP）
    ///
    /// 同一节点可多次作为父节点出现（如`x * x`），所以用位置而非节点id区分父节点。
    fn calc_grad_to_parent(
        &self,
        index: usize,
        parents: &[&Tensor],
        value: &Tensor,
        upstream_grad: &Tensor,
    ) -> Result<Tensor, GraphError>;
}

/// 源节点没有父节点，若走到反向传播的这一步说明crate代码有问题
fn no_parent_error(type_name: &str) -> GraphError {
    GraphError::InvalidOperation(format!(
        "{type_name}节点没有父节点。不该触及本错误，否则说明crate代码有问题"
    ))
}
