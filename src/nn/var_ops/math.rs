/*
 * @Author       : 老董
 * @Date         : 2026-02-03
 * @Description  : Var 逐元素数学运算扩展 trait
 */

use crate::nn::{GraphError, Var};

/// 逐元素数学运算扩展 trait
pub trait VarMathOps {
    /// 乘以常数：c * x
    fn scale(&self, factor: f32) -> Result<Var, GraphError>;

    /// 加上常数：x + c
    fn shift(&self, offset: f32) -> Result<Var, GraphError>;

    fn exp(&self) -> Result<Var, GraphError>;

    /// 自然对数
    fn ln(&self) -> Result<Var, GraphError>;

    fn sqrt(&self) -> Result<Var, GraphError>;

    fn abs(&self) -> Result<Var, GraphError>;

    fn square(&self) -> Result<Var, GraphError>;

    /// 截断到 `[min, max]`，区间外的元素梯度为0
    fn clip(&self, min: f32, max: f32) -> Result<Var, GraphError>;
}

impl VarMathOps for Var {
    fn scale(&self, factor: f32) -> Result<Var, GraphError> {
        self.build(|g| g.new_scalar_multiply_node(self.node_id(), factor, None))
    }

    fn shift(&self, offset: f32) -> Result<Var, GraphError> {
        self.build(|g| g.new_scalar_add_node(self.node_id(), offset, None))
    }

    fn exp(&self) -> Result<Var, GraphError> {
        self.build(|g| g.new_exp_node(self.node_id(), None))
    }

    fn ln(&self) -> Result<Var, GraphError> {
        self.build(|g| g.new_ln_node(self.node_id(), None))
    }

    fn sqrt(&self) -> Result<Var, GraphError> {
        self.build(|g| g.new_sqrt_node(self.node_id(), None))
    }

    fn abs(&self) -> Result<Var, GraphError> {
        self.build(|g| g.new_abs_node(self.node_id(), None))
    }

    fn square(&self) -> Result<Var, GraphError> {
        self.build(|g| g.new_square_node(self.node_id(), None))
    }

    fn clip(&self, min: f32, max: f32) -> Result<Var, GraphError> {
        self.build(|g| g.new_clip_node(self.node_id(), min, max, None))
    }
}
