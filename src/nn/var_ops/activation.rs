/*
 * @Author       : 老董
 * @Date         : 2026-01-09
 * @Description  : Var 激活函数扩展 trait
 *
 * 提供激活函数的链式调用支持，用户需 import 此 trait 后才能使用。
 */

use crate::nn::{GraphError, Var};

/// 激活函数扩展 trait
///
/// - `sigmoid()`: Sigmoid 激活
/// - `relu()`: `ReLU` 激活
/// - `softmax()`: Softmax 激活（沿最后一维归一化）
/// - `one_hot_max()`: 每行最大值位置为1、其余为0（不可导）
///
/// # 使用示例
/// ```ignore
/// use deepomics::nn::{Var, VarActivationOps};
///
/// let h = x.relu()?.sigmoid()?;
/// let probs = logits.softmax()?;
/// ```
pub trait VarActivationOps {
    /// Sigmoid 激活：1 / (1 + exp(-x))
    fn sigmoid(&self) -> Result<Var, GraphError>;

    /// `ReLU` 激活：max(0, x)
    fn relu(&self) -> Result<Var, GraphError>;

    /// Softmax 激活：exp(x_i) / Σ exp(x_j)
    ///
    /// 输入形状 [batch, `num_classes`]，输出形状相同。
    fn softmax(&self) -> Result<Var, GraphError>;

    /// 按行取最大值的 one-hot 编码，反向传播时梯度为0
    fn one_hot_max(&self) -> Result<Var, GraphError>;
}

impl VarActivationOps for Var {
    fn sigmoid(&self) -> Result<Var, GraphError> {
        self.build(|g| g.new_sigmoid_node(self.node_id(), None))
    }

    fn relu(&self) -> Result<Var, GraphError> {
        self.build(|g| g.new_relu_node(self.node_id(), None))
    }

    fn softmax(&self) -> Result<Var, GraphError> {
        self.build(|g| g.new_softmax_node(self.node_id(), None))
    }

    fn one_hot_max(&self) -> Result<Var, GraphError> {
        self.build(|g| g.new_one_hot_max_node(self.node_id(), None))
    }
}
