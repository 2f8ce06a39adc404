/*
 * @Author       : 老董
 * @Date         : 2026-02-05
 * @Description  : Momentum 优化器（可选 Nesterov）
 */

use super::{OptimizerBase, TraitOptimizer};
use crate::nn::NodeId;
use crate::tensor::Tensor;
use std::collections::HashMap;

/// 动量法
/// - a = μ * a + g
/// - 普通：θ = θ - α * a
/// - Nesterov：θ = θ - α * (g + μ * a)
#[derive(Debug, Clone)]
pub struct Momentum {
    base: OptimizerBase,
    momentum: f32,
    use_nesterov: bool,
    /// 累积量（按 `NodeId` 索引）
    accumulation: HashMap<NodeId, Tensor>,
}

impl Momentum {
    pub fn new(learning_rate: f32, momentum: f32, use_nesterov: bool) -> Self {
        Self::with_options(learning_rate, momentum, use_nesterov, false, "momentum")
    }

    pub fn with_options(
        learning_rate: f32,
        momentum: f32,
        use_nesterov: bool,
        use_locking: bool,
        name: &str,
    ) -> Self {
        Self {
            base: OptimizerBase::new(name, learning_rate, use_locking),
            momentum,
            use_nesterov,
            accumulation: HashMap::new(),
        }
    }

    pub const fn momentum(&self) -> f32 {
        self.momentum
    }

    pub const fn use_nesterov(&self) -> bool {
        self.use_nesterov
    }
}

impl TraitOptimizer for Momentum {
    fn base(&self) -> &OptimizerBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut OptimizerBase {
        &mut self.base
    }

    fn update_param(&mut self, node_id: NodeId, value: &Tensor, grad: &Tensor) -> Tensor {
        let lr = self.learning_rate();
        let a = self
            .accumulation
            .entry(node_id)
            .or_insert_with(|| Tensor::zeros(grad.shape()));
        *a *= self.momentum;
        *a += grad;

        if self.use_nesterov {
            value - lr * (grad + self.momentum * &*a)
        } else {
            value - lr * &*a
        }
    }

    fn reset(&mut self) {
        self.accumulation.clear();
    }
}
