/*
 * @Author       : 老董
 * @Date         : 2026-02-07
 * @Description  : 优化器/损失构建的错误类型
 */

use super::Objective;
use crate::nn::GraphError;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum OptimizeError {
    #[error("配置缺少必需的键`{0}`")]
    MissingKey(&'static str),

    #[error("目标`{0}`不能直接计算代价")]
    UnsupportedObjective(Objective),

    #[error("网络中没有名为`{0}`的层")]
    MissingLayer(String),

    #[error("缺少占位符`{0}`")]
    MissingPlaceholder(&'static str),

    #[error("无效的配置：{0}")]
    InvalidConfig(String),

    #[error(transparent)]
    Graph(#[from] GraphError),
}
