/*
 * @Author       : 老董
 * @Date         : 2026-02-05
 * @Description  : Adagrad 优化器
 */

use super::{OptimizerBase, TraitOptimizer};
use crate::nn::NodeId;
use crate::tensor::Tensor;
use std::collections::HashMap;

/// Adagrad
/// - s 初始为 `initial_accumulator_value`
/// - s = s + g²
/// - θ = θ - α * g / √s
#[derive(Debug, Clone)]
pub struct Adagrad {
    base: OptimizerBase,
    initial_accumulator_value: f32,
    accumulator: HashMap<NodeId, Tensor>,
}

impl Adagrad {
    pub fn new(learning_rate: f32, initial_accumulator_value: f32) -> Self {
        Self::with_options(learning_rate, initial_accumulator_value, false, "adagrad")
    }

    pub fn with_options(
        learning_rate: f32,
        initial_accumulator_value: f32,
        use_locking: bool,
        name: &str,
    ) -> Self {
        Self {
            base: OptimizerBase::new(name, learning_rate, use_locking),
            initial_accumulator_value,
            accumulator: HashMap::new(),
        }
    }

    pub const fn initial_accumulator_value(&self) -> f32 {
        self.initial_accumulator_value
    }
}

impl TraitOptimizer for Adagrad {
    fn base(&self) -> &OptimizerBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut OptimizerBase {
        &mut self.base
    }

    fn update_param(&mut self, node_id: NodeId, value: &Tensor, grad: &Tensor) -> Tensor {
        let initial = self.initial_accumulator_value;
        let s = self
            .accumulator
            .entry(node_id)
            .or_insert_with(|| Tensor::full(initial, grad.shape()));
        *s += &grad.square();

        value - self.base.learning_rate() * (grad / s.sqrt())
    }

    fn reset(&mut self) {
        self.accumulator.clear();
    }
}
