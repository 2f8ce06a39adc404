/*
 * @Author       : 老董
 * @Date         : 2026-02-03
 * @Description  : Var 归约扩展 trait
 */

use crate::nn::{GraphError, Var};

/// 归约扩展 trait。全局归约的结果统一为`[1, 1]`的标量节点，可直接作为损失
pub trait VarReduceOps {
    /// 所有元素求和
    fn sum(&self) -> Result<Var, GraphError>;

    /// 沿`axis`求和并保留该维度
    fn sum_axis(&self, axis: usize) -> Result<Var, GraphError>;

    /// 所有元素求均值
    fn mean(&self) -> Result<Var, GraphError>;
}

impl VarReduceOps for Var {
    fn sum(&self) -> Result<Var, GraphError> {
        self.build(|g| g.new_sum_node(self.node_id(), None))
    }

    fn sum_axis(&self, axis: usize) -> Result<Var, GraphError> {
        self.build(|g| g.new_sum_axis_node(self.node_id(), axis, None))
    }

    fn mean(&self) -> Result<Var, GraphError> {
        self.build(|g| g.new_mean_node(self.node_id(), None))
    }
}
