/*
 * @Author       : 老董
 * @Date         : 2026-02-07
 * @Description  : 由配置构建损失：直接代价（交叉熵/均方误差）或变分下界，外加 L1/L2 正则项
 */

use super::params::{get_l1_parameters, get_l2_parameters};
use super::{Objective, OptimizationConfig, OptimizeError};
use crate::nn::layer::{Network, Placeholders, TraitLayer};
use crate::nn::{GraphError, Var, VarMathOps, VarReduceOps};
use log::{debug, warn};

/// 预测值截断的下界，上界为`1 - CLIP_EPSILON`
const CLIP_EPSILON: f32 = 1e-7;

fn clip_probability(predictions: &Var) -> Result<Var, GraphError> {
    predictions.clip(CLIP_EPSILON, 1.0 - CLIP_EPSILON)
}

/// 逐元素的伯努利对数似然：t * ln(p) + (1 - t) * ln(1 - p)
fn bernoulli_log_likelihood(targets: &Var, probs: &Var) -> Result<Var, GraphError> {
    let positive = targets.try_mul(&probs.ln()?)?;
    let negative = one_minus(targets)?.try_mul(&one_minus(probs)?.ln()?)?;
    positive.try_add(&negative)
}

/// `1 - x`
fn one_minus(x: &Var) -> Result<Var, GraphError> {
    x.scale(-1.0)?.shift(1.0)
}

fn layer_output(network: &Network, name: &str) -> Result<Var, OptimizeError> {
    let layer = network
        .get(name)
        .ok_or_else(|| OptimizeError::MissingLayer(name.to_string()))?;
    Ok(layer.get_output()?)
}

/// 直接代价
///
/// - `binary`：`-mean(t * ln(p) + (1 - t) * ln(1 - p))`
/// - `categorical`：`-mean(sum_axis1(t * ln(p)))`
/// - `squared_error`：`mean((p - t)²)`
///
/// `clip_value`为真时先将预测值截断到`[1e-7, 1 - 1e-7]`。
/// `lower_bound`不是直接代价，返回`UnsupportedObjective`。
pub fn cost_function(
    predictions: &Var,
    targets: &Var,
    objective: Objective,
    clip_value: bool,
) -> Result<Var, OptimizeError> {
    let predictions = if clip_value {
        clip_probability(predictions)?
    } else {
        predictions.clone()
    };

    let loss = match objective {
        Objective::Binary => bernoulli_log_likelihood(targets, &predictions)?
            .mean()?
            .scale(-1.0)?,
        Objective::Categorical => targets
            .try_mul(&predictions.ln()?)?
            .sum_axis(1)?
            .mean()?
            .scale(-1.0)?,
        Objective::SquaredError => predictions.try_sub(targets)?.square()?.mean()?,
        Objective::LowerBound => return Err(OptimizeError::UnsupportedObjective(objective)),
    };
    Ok(loss)
}

/// 变分下界（取负，作为最小化目标），返回（损失, 重构均值）
///
/// 读取网络中的`encode_mu`、`encode_logsigma`（隐变量后验）与`X`（重构均值）层：
/// - KL = 0.5 * sum_axis1(1 + 2 * z_logσ - z_μ² - exp(2 * z_logσ))
/// - `binary`为真时为伯努利似然；否则为高斯似然，其标准差由重构均值导出：
///   `x_logσ = ln(sqrt(x_μ * (1 - x_μ)))`，
///   ll = sum_axis1(-0.5 * ln(2π) - x_logσ - 0.5 * (t - x_μ)² / exp(2 * x_logσ))
/// - 损失 = mean(-ll - KL)
///
/// 两种情况下重构均值都先截断到`[1e-7, 1 - 1e-7]`，返回的重构均值即截断后的值。
pub fn variational_lower_bound(
    network: &Network,
    targets: &Var,
    binary: bool,
) -> Result<(Var, Var), OptimizeError> {
    let z_mu = layer_output(network, "encode_mu")?;
    let z_logsigma = layer_output(network, "encode_logsigma")?;
    let kl_divergence = z_logsigma
        .scale(2.0)?
        .shift(1.0)?
        .try_sub(&z_mu.square()?)?
        .try_sub(&z_logsigma.scale(2.0)?.exp()?)?
        .sum_axis(1)?
        .scale(0.5)?;

    let x_mu = clip_probability(&layer_output(network, "X")?)?;

    let log_likelihood = if binary {
        bernoulli_log_likelihood(targets, &x_mu)?.sum_axis(1)?
    } else {
        let x_logsigma = x_mu.try_mul(&one_minus(&x_mu)?)?.sqrt()?.ln()?;
        let half_ln_2pi = 0.5 * (2.0 * std::f32::consts::PI).ln();
        targets
            .try_sub(&x_mu)?
            .square()?
            .try_div(&x_logsigma.scale(2.0)?.exp()?)?
            .scale(-0.5)?
            .try_sub(&x_logsigma)?
            .shift(-half_ln_2pi)?
            .sum_axis(1)?
    };

    let loss = log_likelihood
        .scale(-1.0)?
        .try_sub(&kl_divergence)?
        .mean()?;
    Ok((loss, x_mu))
}

/// 按配置构建损失，返回（损失, 预测值）
///
/// - `objective`必需；为`lower_bound`时对`placeholders.inputs`计算变分下界（`binary`默认false），
///   否则以`output`层的输出和`placeholders.targets`计算直接代价。
///   `binary`、`categorical`目标总会截断预测值，其余目标按`clip_value`（默认false）
/// - 配置了`l1`时加上 `sum(|θ|) * l1`，配置了`l2`时加上 `sum(θ²) * l2`，
///   θ 分别为打了对应正则化标记的参数
pub fn build_loss(
    network: &Network,
    placeholders: &Placeholders,
    config: &OptimizationConfig,
) -> Result<(Var, Var), OptimizeError> {
    let objective = config.objective.ok_or(OptimizeError::MissingKey("objective"))?;

    let (mut loss, predictions) = match objective {
        Objective::LowerBound => {
            let inputs = placeholders
                .inputs
                .as_ref()
                .ok_or(OptimizeError::MissingPlaceholder("inputs"))?;
            variational_lower_bound(network, inputs, config.binary.unwrap_or(false))?
        }
        _ => {
            let predictions = layer_output(network, "output")?;
            let clip_value = match objective {
                Objective::Binary | Objective::Categorical => true,
                _ => config.clip_value.unwrap_or(false),
            };
            let targets = placeholders
                .targets
                .as_ref()
                .ok_or(OptimizeError::MissingPlaceholder("targets"))?;
            let loss = cost_function(&predictions, targets, objective, clip_value)?;
            (loss, predictions)
        }
    };
    debug!("构建目标为{objective}的损失");

    if let Some(l1) = config.l1 {
        match get_l1_parameters(network)? {
            Some(params) => loss = loss.try_add(&params.abs()?.sum()?.scale(l1)?)?,
            None => warn!("配置了 L1 正则化系数{l1}，但网络中没有参与 L1 正则化的参数"),
        }
    }
    if let Some(l2) = config.l2 {
        match get_l2_parameters(network)? {
            Some(params) => loss = loss.try_add(&params.square()?.sum()?.scale(l2)?)?,
            None => warn!("配置了 L2 正则化系数{l2}，但网络中没有参与 L2 正则化的参数"),
        }
    }

    Ok((loss, predictions))
}
