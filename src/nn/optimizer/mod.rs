/*
 * @Author       : 老董
 * @Date         : 2025-07-24 16:00:00
 * @LastEditors  : 老董
 * @LastEditTime : 2026-02-05
 * @Description  : 优化器模块：6种梯度优化算法，统一通过`TraitOptimizer`分派
 *
 * 训练循环：
 * ```ignore
 * let mut optimizer = build_updates(&config)?;
 * for _ in 0..epochs {
 *     let loss_value = optimizer.minimize(&loss)?;
 * }
 * ```
 */

mod adadelta;
mod adagrad;
mod adam;
mod base;
mod momentum;
mod rms_prop;
mod sgd;

pub use adadelta::Adadelta;
pub use adagrad::Adagrad;
pub use adam::Adam;
pub use base::OptimizerBase;
pub use momentum::Momentum;
pub use rms_prop::RmsProp;
pub use sgd::Sgd;

use crate::nn::{GraphError, GraphInner, NodeId, Var};
use crate::tensor::Tensor;
use enum_dispatch::enum_dispatch;

/// 所有优化器
#[enum_dispatch]
#[derive(Debug, Clone)]
pub enum Optimizer {
    Sgd,
    Momentum,
    Adam,
    RmsProp,
    Adadelta,
    Adagrad,
}

/// 优化器核心 trait
///
/// 各优化器只需给出单个参数的更新规则（`update_param`），
/// 遍历参数、读写参数值与梯度的流程由`apply_gradients`统一完成。
///
/// # 使用示例
/// ```ignore
/// graph.zero_grad();
/// loss.backward()?;
/// optimizer.apply_gradients(&mut graph.inner_mut(), &params)?;
///
/// // 或者一步完成
/// let loss_value = optimizer.minimize(&loss)?;
/// ```
#[enum_dispatch(Optimizer)]
pub trait TraitOptimizer {
    fn base(&self) -> &OptimizerBase;

    fn base_mut(&mut self) -> &mut OptimizerBase;

    /// 根据当前值与梯度计算参数的新值，并更新该参数的累积状态
    fn update_param(&mut self, node_id: NodeId, value: &Tensor, grad: &Tensor) -> Tensor;

    /// 每次`apply_gradients`开始前调用（如 Adam 的时间步递增）
    fn begin_step(&mut self) {}

    /// 重置累积状态（如 Adam 的动量）
    fn reset(&mut self);

    fn name(&self) -> &str {
        self.base().name()
    }

    /// 获取学习率
    fn learning_rate(&self) -> f32 {
        self.base().learning_rate()
    }

    /// 设置学习率
    fn set_learning_rate(&mut self, lr: f32) {
        self.base_mut().set_learning_rate(lr);
    }

    fn use_locking(&self) -> bool {
        self.base().use_locking()
    }

    /// 用各参数已计算的梯度更新参数；没有梯度的参数保持不变
    fn apply_gradients(
        &mut self,
        graph: &mut GraphInner,
        params: &[NodeId],
    ) -> Result<(), GraphError> {
        self.begin_step();
        for &node_id in params {
            let Some(grad) = graph.get_node_grad(node_id)? else {
                continue;
            };
            let current = graph.get_node_value(node_id)?.ok_or_else(|| {
                GraphError::ComputationError(format!("参数节点 {node_id:?} 没有值"))
            })?;
            let new_value = self.update_param(node_id, current, &grad);
            graph.set_node_value(node_id, Some(&new_value))?;
        }
        Ok(())
    }

    /// 一步完成训练：收集可训练参数 → 清零梯度 → 前向 → 反向 → 更新参数
    ///
    /// # 返回
    /// loss 的标量值
    fn minimize(&mut self, loss: &Var) -> Result<f32, GraphError> {
        let graph = loss.get_graph();
        let params = graph.inner().get_trainable_nodes();
        graph.zero_grad();
        let loss_value = loss.backward()?;
        self.apply_gradients(&mut graph.inner_mut(), &params)?;
        Ok(loss_value)
    }
}
