/*
 * @Author       : 老董
 * @Date         : 2025-07-24 16:00:00
 * @LastEditors  : 老董
 * @LastEditTime : 2026-02-05
 * @Description  : Adam 优化器
 */

use super::{OptimizerBase, TraitOptimizer};
use crate::nn::NodeId;
use crate::tensor::Tensor;
use std::collections::HashMap;

/// Adam: Adaptive Moment Estimation
/// - m = β1 * m + (1 - β1) * g
/// - v = β2 * v + (1 - β2) * g²
/// - θ = θ - α * `m_hat` / (√`v_hat` + ε)
#[derive(Debug, Clone)]
pub struct Adam {
    base: OptimizerBase,
    /// β1 (一阶矩衰减)
    beta1: f32,
    /// β2 (二阶矩衰减)
    beta2: f32,
    /// 数值稳定项
    epsilon: f32,
    /// 一阶矩估计（按 `NodeId` 索引，高效查找）
    m: HashMap<NodeId, Tensor>,
    /// 二阶矩估计（按 `NodeId` 索引，高效查找）
    v: HashMap<NodeId, Tensor>,
    /// 时间步
    t: usize,
}

impl Adam {
    pub fn new(learning_rate: f32, beta1: f32, beta2: f32, epsilon: f32) -> Self {
        Self::with_options(learning_rate, beta1, beta2, epsilon, false, "adam")
    }

    pub fn with_options(
        learning_rate: f32,
        beta1: f32,
        beta2: f32,
        epsilon: f32,
        use_locking: bool,
        name: &str,
    ) -> Self {
        Self {
            base: OptimizerBase::new(name, learning_rate, use_locking),
            beta1,
            beta2,
            epsilon,
            m: HashMap::new(),
            v: HashMap::new(),
            t: 0,
        }
    }

    pub const fn beta1(&self) -> f32 {
        self.beta1
    }

    pub const fn beta2(&self) -> f32 {
        self.beta2
    }

    pub const fn epsilon(&self) -> f32 {
        self.epsilon
    }

    /// 获取指定参数的一阶矩 m
    pub fn get_momentum(&self, node_id: NodeId) -> Option<&Tensor> {
        self.m.get(&node_id)
    }

    /// 获取指定参数的二阶矩 v
    pub fn get_velocity(&self, node_id: NodeId) -> Option<&Tensor> {
        self.v.get(&node_id)
    }

    /// 获取当前时间步
    pub const fn timestep(&self) -> usize {
        self.t
    }
}

impl TraitOptimizer for Adam {
    fn base(&self) -> &OptimizerBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut OptimizerBase {
        &mut self.base
    }

    fn begin_step(&mut self) {
        self.t += 1;
    }

    fn update_param(&mut self, node_id: NodeId, value: &Tensor, grad: &Tensor) -> Tensor {
        // 预计算
        let scaled_grad = grad * (1.0 - self.beta1);
        let scaled_grad_squared = grad.square() * (1.0 - self.beta2);

        // 更新一阶矩
        let m = self
            .m
            .entry(node_id)
            .or_insert_with(|| Tensor::zeros(grad.shape()));
        *m *= self.beta1;
        *m += &scaled_grad;

        // 更新二阶矩
        let v = self
            .v
            .entry(node_id)
            .or_insert_with(|| Tensor::zeros(grad.shape()));
        *v *= self.beta2;
        *v += &scaled_grad_squared;

        // 偏差修正
        let m_hat = &*m / (1.0 - self.beta1.powi(self.t as i32));
        let v_hat = &*v / (1.0 - self.beta2.powi(self.t as i32));

        let denom = v_hat.sqrt() + self.epsilon;
        value - self.base.learning_rate() * (m_hat / denom)
    }

    fn reset(&mut self) {
        self.m.clear();
        self.v.clear();
        self.t = 0;
    }
}
