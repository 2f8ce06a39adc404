/*
 * @Author       : 老董
 * @Date         : 2026-02-07
 * @Description  : 训练配置的分派：由配置构建优化器（`build_updates`）与损失（`build_loss`）
 *
 * # 使用示例
 * ```ignore
 * let config = OptimizationConfig::from_json(r#"{"optimizer": "adam", "objective": "categorical"}"#)?;
 * let (loss, predictions) = build_loss(&network, &placeholders, &config)?;
 * let mut optimizer = build_updates(&config)?;
 * let loss_value = optimizer.minimize(&loss)?;
 * ```
 */

mod config;
mod error;
mod loss;
mod params;
mod updates;

pub use config::{Objective, OptimizationConfig, OptimizerKind};
pub use error::OptimizeError;
pub use loss::{build_loss, cost_function, variational_lower_bound};
pub use params::{get_l1_parameters, get_l2_parameters, get_trainable_parameters, merge_parameters};
pub use updates::build_updates;
