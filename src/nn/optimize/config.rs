/*
 * @Author       : 老董
 * @Date         : 2026-02-07
 * @Description  : 训练配置
 */

use super::OptimizeError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// 优化器种类
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OptimizerKind {
    Sgd,
    Momentum,
    Adam,
    #[serde(rename = "rmsprop")]
    RmsProp,
    Adadelta,
    Adagrad,
}

impl OptimizerKind {
    /// 配置中的名称，同时作为优化器的默认名称
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Sgd => "sgd",
            Self::Momentum => "momentum",
            Self::Adam => "adam",
            Self::RmsProp => "rmsprop",
            Self::Adadelta => "adadelta",
            Self::Adagrad => "adagrad",
        }
    }
}

impl fmt::Display for OptimizerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 训练目标
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Objective {
    /// 变分下界（VAE）
    LowerBound,
    /// 二分类交叉熵
    Binary,
    /// 多分类交叉熵
    Categorical,
    /// 均方误差
    SquaredError,
}

impl fmt::Display for Objective {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::LowerBound => "lower_bound",
            Self::Binary => "binary",
            Self::Categorical => "categorical",
            Self::SquaredError => "squared_error",
        };
        f.write_str(name)
    }
}

/// 训练配置，所有键均可缺省（缺省值由使用方决定）
///
/// 可从 JSON 读取，未知的键被忽略：
/// ```ignore
/// let config = OptimizationConfig::from_json(r#"{
///     "optimizer": "momentum",
///     "learning_rate": 0.01,
///     "objective": "binary",
///     "l2": 1e-6
/// }"#)?;
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OptimizationConfig {
    pub optimizer: Option<OptimizerKind>,
    pub learning_rate: Option<f32>,
    pub momentum: Option<f32>,
    pub use_nesterov: Option<bool>,
    pub use_locking: Option<bool>,
    pub name: Option<String>,
    pub beta1: Option<f32>,
    pub beta2: Option<f32>,
    pub epsilon: Option<f32>,
    pub rho: Option<f32>,
    pub initial_accumulator_value: Option<f32>,
    pub objective: Option<Objective>,
    pub binary: Option<bool>,
    pub clip_value: Option<bool>,
    pub l1: Option<f32>,
    pub l2: Option<f32>,
}

impl OptimizationConfig {
    pub fn from_json(json: &str) -> Result<Self, OptimizeError> {
        serde_json::from_str(json).map_err(|e| OptimizeError::InvalidConfig(e.to_string()))
    }

    pub fn to_json(&self) -> Result<String, OptimizeError> {
        serde_json::to_string_pretty(self).map_err(|e| OptimizeError::InvalidConfig(e.to_string()))
    }
}
