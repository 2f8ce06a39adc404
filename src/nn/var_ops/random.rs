/*
 * @Author       : 老董
 * @Date         : 2026-02-03
 * @Description  : Var 随机运算扩展 trait
 *
 * 随机节点每次前向传播都会重新采样；图带种子时结果可复现。
 */

use crate::nn::{GraphError, Var};

pub trait VarRandomOps {
    /// Dropout：以`keep_prob`的概率保留元素并放大`1/keep_prob`倍，其余置0
    fn dropout(&self, keep_prob: f32) -> Result<Var, GraphError>;

    /// 创建与本节点形状相同的正态分布随机节点
    fn random_normal_like(&self, mean: f32, std_dev: f32) -> Result<Var, GraphError>;
}

impl VarRandomOps for Var {
    fn dropout(&self, keep_prob: f32) -> Result<Var, GraphError> {
        self.build(|g| g.new_dropout_node(self.node_id(), keep_prob, None))
    }

    fn random_normal_like(&self, mean: f32, std_dev: f32) -> Result<Var, GraphError> {
        let shape = self.value_expected_shape();
        self.build(|g| g.new_random_normal_node(&shape, mean, std_dev, None))
    }
}
