/*
 * @Author       : 老董
 * @Date         : 2026-02-07
 * @Description  : 由配置构建优化器
 */

use super::{OptimizationConfig, OptimizeError, OptimizerKind};
use crate::nn::optimizer::{Adadelta, Adagrad, Adam, Momentum, Optimizer, RmsProp, Sgd};
use log::debug;

/// 未指定优化器时使用 adam，学习率固定为该值
const FALLBACK_LEARNING_RATE: f32 = 0.001;

/// 按配置构建优化器
///
/// 未配置`optimizer`时使用 adam，且学习率固定为0.001（忽略配置的学习率）；
/// 其余情况下各超参数优先取配置值，缺省时取各优化器自己的默认值：
///
/// | 优化器 | 默认超参数 |
/// |---|---|
/// | sgd | lr=0.005 |
/// | momentum | lr=0.005, momentum=0.9, use_nesterov=true |
/// | adam | lr=0.001, beta1=0.95, beta2=0.999, epsilon=1e-8 |
/// | rmsprop | lr=0.001, rho=0.95, epsilon=1e-8 |
/// | adadelta | lr=0.001, rho=0.95, epsilon=1e-8 |
/// | adagrad | lr=0.001, initial_accumulator_value=0.95 |
///
/// 所有优化器的`use_locking`默认为false，`name`默认为种类名。
pub fn build_updates(config: &OptimizationConfig) -> Result<Optimizer, OptimizeError> {
    let (kind, forced_lr) = match config.optimizer {
        Some(kind) => (kind, None),
        None => {
            debug!("未指定优化器，使用 adam（学习率{FALLBACK_LEARNING_RATE}）");
            (OptimizerKind::Adam, Some(FALLBACK_LEARNING_RATE))
        }
    };

    let learning_rate = |default: f32| forced_lr.or(config.learning_rate).unwrap_or(default);
    let use_locking = config.use_locking.unwrap_or(false);
    let name = config.name.as_deref().unwrap_or(kind.as_str());
    let epsilon = config.epsilon.unwrap_or(1e-8);
    let rho = config.rho.unwrap_or(0.95);

    if let Some(lr) = config.learning_rate {
        if !(lr > 0.0) {
            return Err(OptimizeError::InvalidConfig(format!("学习率必须为正数，但得到{lr}")));
        }
    }

    let optimizer: Optimizer = match kind {
        OptimizerKind::Sgd => Sgd::with_options(learning_rate(0.005), use_locking, name).into(),
        OptimizerKind::Momentum => Momentum::with_options(
            learning_rate(0.005),
            config.momentum.unwrap_or(0.9),
            config.use_nesterov.unwrap_or(true),
            use_locking,
            name,
        )
        .into(),
        OptimizerKind::Adam => Adam::with_options(
            learning_rate(0.001),
            config.beta1.unwrap_or(0.95),
            config.beta2.unwrap_or(0.999),
            epsilon,
            use_locking,
            name,
        )
        .into(),
        OptimizerKind::RmsProp => {
            RmsProp::with_options(learning_rate(0.001), rho, epsilon, use_locking, name).into()
        }
        OptimizerKind::Adadelta => {
            Adadelta::with_options(learning_rate(0.001), rho, epsilon, use_locking, name).into()
        }
        OptimizerKind::Adagrad => Adagrad::with_options(
            learning_rate(0.001),
            config.initial_accumulator_value.unwrap_or(0.95),
            use_locking,
            name,
        )
        .into(),
    };
    debug!("构建优化器{kind}（名称{name}）");
    Ok(optimizer)
}
