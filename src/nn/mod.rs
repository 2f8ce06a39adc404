/*
 * @Author       : 老董
 * @Date         : 2024-01-31 20:23:53
 * @LastEditors  : 老董
 * @LastEditTime : 2026-02-07
 * @Description  : 负责神经网络（neural network）的构建：计算图、层、优化器与损失
 */

mod display;
mod graph;
pub mod layer;
mod nodes;
pub mod optimize;
pub mod optimizer;
mod var;
mod var_ops;

pub(in crate::nn) use display::format_node_display;
pub use graph::{Graph, GraphError, GraphInner};
pub use layer::{
    Activation, ActivationLayer, CategoricalSampleLayer, DenseLayer, DropoutLayer,
    GaussianNoiseLayer, InputLayer, LayerEnum, Network, Placeholders, ReshapeLayer,
    StochasticDenseLayer, TraitLayer, TraitParamLayer, VariationalSampleLayer,
};
pub use nodes::NodeId;
pub use optimize::{
    Objective, OptimizationConfig, OptimizeError, OptimizerKind, build_loss, build_updates,
    cost_function, variational_lower_bound,
};
pub use optimizer::{Optimizer, TraitOptimizer};
pub use var::{Init, Var};
pub use var_ops::{
    VarActivationOps, VarMathOps, VarMatrixOps, VarRandomOps, VarReduceOps, VarShapeOps,
};

#[cfg(test)]
mod tests;
