/*
 * @Author       : 老董
 * @Description  : 节点句柄：持有节点的id、名称、值、梯度、detach状态等通用状态，
 *                 具体的前向/反向运算委托给内部的`raw_node`
 */

use super::raw_node::{NodeKind, NodeType, ParamFlags, TraitNode};
use crate::nn::format_node_display;
use crate::nn::GraphError;
use crate::tensor::Tensor;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u64);

pub(in crate::nn) struct NodeHandle {
    id: NodeId,
    name: String,
    raw_node: NodeType,
    /// 节点创建时即确定的值形状
    expected_shape: Vec<usize>,
    value: Option<Tensor>,
    grad: Option<Tensor>,
    /// 被detach的节点既不接收也不向父节点传播梯度
    is_detached: bool,
    last_forward_pass_id: u64,
}

impl NodeHandle {
    pub(in crate::nn) fn new<T: Into<NodeType>>(raw_node: T, expected_shape: &[usize]) -> Self {
        Self {
            id: NodeId(0),
            name: String::new(),
            raw_node: raw_node.into(),
            expected_shape: expected_shape.to_vec(),
            value: None,
            grad: None,
            is_detached: false,
            last_forward_pass_id: 0,
        }
    }

    pub(in crate::nn) fn bind_id_and_name(&mut self, id: NodeId, name: &str) {
        self.id = id;
        self.name = name.to_string();
    }

    pub(in crate::nn) fn name(&self) -> &str {
        &self.name
    }

    pub(in crate::nn) fn type_name(&self) -> &'static str {
        self.raw_node.type_name()
    }

    pub(in crate::nn) fn kind(&self) -> NodeKind {
        self.raw_node.kind()
    }

    pub(in crate::nn) fn value_expected_shape(&self) -> &[usize] {
        &self.expected_shape
    }

    // ========== 值 ==========

    pub(in crate::nn) const fn value(&self) -> Option<&Tensor> {
        self.value.as_ref()
    }

    pub(in crate::nn) const fn has_value(&self) -> bool {
        self.value.is_some()
    }

    /// 手动设置节点的值，仅输入节点和参数节点允许
    pub(in crate::nn) fn set_value(&mut self, value: Option<&Tensor>) -> Result<(), GraphError> {
        if !matches!(self.kind(), NodeKind::Input | NodeKind::Parameter) {
            return Err(GraphError::InvalidOperation(format!(
                "{self}的值由父节点计算得到，不能手动设置"
            )));
        }
        if let Some(value) = value {
            if value.shape() != self.expected_shape.as_slice() {
                return Err(GraphError::ShapeMismatch {
                    expected: self.expected_shape.clone(),
                    got: value.shape().to_vec(),
                    message: format!("{self}被设置的值形状与节点形状不一致"),
                });
            }
        }
        self.value = value.cloned();
        Ok(())
    }

    pub(in crate::nn) fn clear_value(&mut self) {
        self.value = None;
    }

    // ========== 梯度 ==========

    pub(in crate::nn) const fn grad(&self) -> Option<&Tensor> {
        self.grad.as_ref()
    }

    pub(in crate::nn) fn set_grad(&mut self, grad: Option<&Tensor>) {
        self.grad = grad.cloned();
    }

    /// 将梯度累加到本节点（多个子节点共用本节点时）
    pub(in crate::nn) fn accumulate_grad(&mut self, grad: &Tensor) {
        match &mut self.grad {
            Some(existing) => *existing += grad,
            None => self.grad = Some(grad.clone()),
        }
    }

    pub(in crate::nn) fn clear_grad(&mut self) {
        self.grad = None;
    }

    // ========== detach / 前向传播标记 ==========

    pub(in crate::nn) const fn is_detached(&self) -> bool {
        self.is_detached
    }

    pub(in crate::nn) const fn set_detached(&mut self, detached: bool) {
        self.is_detached = detached;
    }

    pub(in crate::nn) const fn last_forward_pass_id(&self) -> u64 {
        self.last_forward_pass_id
    }

    pub(in crate::nn) const fn set_last_forward_pass_id(&mut self, pass_id: u64) {
        self.last_forward_pass_id = pass_id;
    }

    // ========== 参数标记 ==========

    pub(in crate::nn) fn param_flags(&self) -> Option<&ParamFlags> {
        match &self.raw_node {
            NodeType::Parameter(param) => Some(param.flags()),
            _ => None,
        }
    }

    pub(in crate::nn) fn param_flags_mut(&mut self) -> Option<&mut ParamFlags> {
        match &mut self.raw_node {
            NodeType::Parameter(param) => Some(param.flags_mut()),
            _ => None,
        }
    }

    // ========== 运算 ==========

    /// 根据父节点的值计算本节点的值（父节点的值须已计算好）
    pub(in crate::nn) fn calc_value_by_parents(&mut self, parents: &[&Tensor]) -> Result<(), GraphError> {
        let value = self.raw_node.calc_value_by_parents(parents)?;
        if value.shape() != self.expected_shape.as_slice() {
            return Err(GraphError::ShapeMismatch {
                expected: self.expected_shape.clone(),
                got: value.shape().to_vec(),
                message: format!("{self}前向传播得到的值形状与节点形状不一致"),
            });
        }
        self.value = Some(value);
        Ok(())
    }

    /// 计算结果节点对第`index`个父节点的梯度（VJP）
    pub(in crate::nn) fn calc_grad_to_parent(
        &self,
        index: usize,
        parents: &[&Tensor],
    ) -> Result<Tensor, GraphError> {
        let value = self.value.as_ref().ok_or_else(|| {
            GraphError::ComputationError(format!("{self}没有值，请先执行 forward"))
        })?;
        let upstream_grad = self.grad.as_ref().ok_or_else(|| {
            GraphError::ComputationError(format!("{self}没有梯度，无法继续反向传播"))
        })?;
        self.raw_node
            .calc_grad_to_parent(index, parents, value, upstream_grad)
    }
}

impl fmt::Display for NodeHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            format_node_display(self.id, &self.name, self.type_name())
        )
    }
}
