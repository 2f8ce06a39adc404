/*
 * @Author       : 老董
 * @Date         : 2025-12-22
 * @LastEditTime : 2026-02-06
 * @Description  : Layer 模块：对节点组合的统一封装
 *
 * 每个层读取上游层的输出与形状，构建自己的节点，并对外提供统一的查询接口：
 * - 所有层：`get_input_shape`、`get_output_shape`、`get_output`
 * - 带参数的层：另实现`TraitParamLayer`（获取参数、训练/正则化标记）
 *
 * # 使用示例
 * ```ignore
 * let graph = Graph::new_with_seed(42);
 * let input = InputLayer::new(&graph, &[32, 784], Some("x"))?;
 * let hidden = DenseLayer::new(&input, 128)?;
 * let hidden = ActivationLayer::new(&hidden, Activation::Relu)?;
 * let output = DenseLayer::new(&hidden, 10)?;
 * let probs = output.get_output()?.softmax()?;
 * ```
 */

mod activation;
mod categorical_sample;
mod dense;
mod dropout;
mod gaussian_noise;
mod input;
mod network;
mod reshape;
mod stochastic_dense;
mod variational_sample;

pub use activation::{Activation, ActivationLayer};
pub use categorical_sample::CategoricalSampleLayer;
pub use dense::DenseLayer;
pub use dropout::DropoutLayer;
pub use gaussian_noise::GaussianNoiseLayer;
pub use input::InputLayer;
pub use network::{Network, Placeholders};
pub use reshape::ReshapeLayer;
pub use stochastic_dense::StochasticDenseLayer;
pub use variational_sample::VariationalSampleLayer;

use crate::nn::{GraphError, Var};
use enum_dispatch::enum_dispatch;

/// 所有层的公共接口
#[enum_dispatch]
pub trait TraitLayer {
    /// 上游输出的形状（即本层的输入形状）
    fn get_input_shape(&self) -> Vec<usize>;

    /// 本层输出的形状，与`get_output`返回节点的形状一致
    fn get_output_shape(&self) -> Vec<usize>;

    /// 本层的输出节点
    ///
    /// 确定性的层在构造时即建好输出节点，每次返回同一个；
    /// 随机层（Dropout、高斯噪声、变分采样）每次调用都会新建随机节点。
    fn get_output(&self) -> Result<Var, GraphError>;

    /// 若本层带参数，返回其参数接口
    fn as_param_layer(&self) -> Option<&dyn TraitParamLayer> {
        None
    }
}

/// 带参数的层的公共接口
///
/// 标记的修改只影响之后的参数收集（优化器、正则化），不改变已有节点。
pub trait TraitParamLayer {
    /// 获取本层的参数
    ///
    /// `shaped`为真时返回参数的使用形态，否则返回其存储形态；
    /// 本 crate 中的参数都以使用形态存储，两者相同。
    fn get_variable(&self, shaped: bool) -> Vec<Var>;

    /// 同时设置本层所有参数的可训练标记
    fn set_trainable(&self, status: bool) -> Result<(), GraphError> {
        self.get_variable(false)
            .iter()
            .try_for_each(|var| var.set_trainable(status))
    }

    fn set_l1_regularize(&self, status: bool) -> Result<(), GraphError> {
        self.get_variable(false)
            .iter()
            .try_for_each(|var| var.set_l1_regularize(status))
    }

    fn set_l2_regularize(&self, status: bool) -> Result<(), GraphError> {
        self.get_variable(false)
            .iter()
            .try_for_each(|var| var.set_l2_regularize(status))
    }

    /// 以第一个参数（权重）的标记为准
    fn is_trainable(&self) -> Result<bool, GraphError> {
        self.primary_variable()?.is_trainable()
    }

    fn is_l1_regularize(&self) -> Result<bool, GraphError> {
        self.primary_variable()?.is_l1_regularize()
    }

    fn is_l2_regularize(&self) -> Result<bool, GraphError> {
        self.primary_variable()?.is_l2_regularize()
    }

    /// 代表本层标记的参数（第一个参数）
    fn primary_variable(&self) -> Result<Var, GraphError> {
        self.get_variable(false)
            .into_iter()
            .next()
            .ok_or_else(|| GraphError::InvalidOperation("该层没有任何参数".to_string()))
    }
}

/// 所有层
#[enum_dispatch(TraitLayer)]
#[derive(Debug, Clone)]
pub enum LayerEnum {
    InputLayer,
    ReshapeLayer,
    ActivationLayer,
    DenseLayer,
    StochasticDenseLayer,
    DropoutLayer,
    GaussianNoiseLayer,
    VariationalSampleLayer,
    CategoricalSampleLayer,
}
