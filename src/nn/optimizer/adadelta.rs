/*
 * @Author       : 老董
 * @Date         : 2026-02-05
 * @Description  : Adadelta 优化器
 */

use super::{OptimizerBase, TraitOptimizer};
use crate::nn::NodeId;
use crate::tensor::Tensor;
use std::collections::HashMap;

/// Adadelta
/// - s = ρ * s + (1 - ρ) * g²
/// - u = √(d + ε) / √(s + ε) * g
/// - d = ρ * d + (1 - ρ) * u²
/// - θ = θ - α * u
#[derive(Debug, Clone)]
pub struct Adadelta {
    base: OptimizerBase,
    rho: f32,
    epsilon: f32,
    /// 梯度平方的滑动平均
    accum_grad: HashMap<NodeId, Tensor>,
    /// 更新量平方的滑动平均
    accum_update: HashMap<NodeId, Tensor>,
}

impl Adadelta {
    pub fn new(learning_rate: f32, rho: f32, epsilon: f32) -> Self {
        Self::with_options(learning_rate, rho, epsilon, false, "adadelta")
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
            accum_grad: HashMap::new(),
            accum_update: HashMap::new(),
        }
    }

    pub const fn rho(&self) -> f32 {
        self.rho
    }

    pub const fn epsilon(&self) -> f32 {
        self.epsilon
    }
}

impl TraitOptimizer for Adadelta {
    fn base(&self) -> &OptimizerBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut OptimizerBase {
        &mut self.base
    }

    fn update_param(&mut self, node_id: NodeId, value: &Tensor, grad: &Tensor) -> Tensor {
        let s = self
            .accum_grad
            .entry(node_id)
            .or_insert_with(|| Tensor::zeros(grad.shape()));
        *s *= self.rho;
        *s += &(grad.square() * (1.0 - self.rho));
        let s_sqrt = (&*s + self.epsilon).sqrt();

        let d = self
            .accum_update
            .entry(node_id)
            .or_insert_with(|| Tensor::zeros(grad.shape()));
        let update = (&*d + self.epsilon).sqrt() / s_sqrt * grad;
        *d *= self.rho;
        *d += &(update.square() * (1.0 - self.rho));

        value - self.base.learning_rate() * update
    }

    fn reset(&mut self) {
        self.accum_grad.clear();
        self.accum_update.clear();
    }
}
