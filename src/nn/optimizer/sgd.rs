/*
 * @Author       : 老董
 * @Date         : 2025-07-24 16:00:00
 * @LastEditors  : 老董
 * @LastEditTime : 2026-02-05
 * @Description  : SGD 优化器
 */

use super::{OptimizerBase, TraitOptimizer};
use crate::nn::NodeId;
use crate::tensor::Tensor;

/// 随机梯度下降：θ = θ - α * ∇θ
#[derive(Debug, Clone)]
pub struct Sgd {
    base: OptimizerBase,
}

impl Sgd {
    pub fn new(learning_rate: f32) -> Self {
        Self::with_options(learning_rate, false, "sgd")
    }

    pub fn with_options(learning_rate: f32, use_locking: bool, name: &str) -> Self {
        Self {
            base: OptimizerBase::new(name, learning_rate, use_locking),
        }
    }
}

impl TraitOptimizer for Sgd {
    fn base(&self) -> &OptimizerBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut OptimizerBase {
        &mut self.base
    }

    fn update_param(&mut self, _node_id: NodeId, value: &Tensor, grad: &Tensor) -> Tensor {
        value - self.learning_rate() * grad
    }

    fn reset(&mut self) {
        // SGD 无状态
    }
}
