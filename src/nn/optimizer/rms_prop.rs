/*
 * @Author       : 老董
 * @Date         : 2026-02-05
 * @Description  : RMSProp 优化器
 */

use super::{OptimizerBase, TraitOptimizer};
use crate::nn::NodeId;
use crate::tensor::Tensor;
use std::collections::HashMap;

/// RMSProp
/// - s = ρ * s + (1 - ρ) * g²
/// - θ = θ - α * g / √(s + ε)
#[derive(Debug, Clone)]
pub struct RmsProp {
    base: OptimizerBase,
    rho: f32,
    epsilon: f32,
    /// 梯度平方的滑动平均，初始为0
    mean_square: HashMap<NodeId, Tensor>,
}

impl RmsProp {
    pub fn new(learning_rate: f32, rho: f32, epsilon: f32) -> Self {
        Self::with_options(learning_rate, rho, epsilon, false, "rmsprop")
    }

    pub fn with_options(
        learning_rate: f32,
        rho: f32,
        epsilon: f32,
        use_locking: bool,
        name: &str,
    ) -> Self {
        Self {
            base: OptimizerBase::new(name, learning_rate, use_locking),
            rho,
            epsilon,
            mean_square: HashMap::new(),
        }
    }

    pub const fn rho(&self) -> f32 {
        self.rho
    }

    pub const fn epsilon(&self) -> f32 {
        self.epsilon
    }
}

impl TraitOptimizer for RmsProp {
    fn base(&self) -> &OptimizerBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut OptimizerBase {
        &mut self.base
    }

    fn update_param(&mut self, node_id: NodeId, value: &Tensor, grad: &Tensor) -> Tensor {
        let s = self
            .mean_square
            .entry(node_id)
            .or_insert_with(|| Tensor::zeros(grad.shape()));
        *s *= self.rho;
        *s += &(grad.square() * (1.0 - self.rho));

        let denom = (&*s + self.epsilon).sqrt();
        value - self.base.learning_rate() * (grad / denom)
    }

    fn reset(&mut self) {
        self.mean_square.clear();
    }
}
