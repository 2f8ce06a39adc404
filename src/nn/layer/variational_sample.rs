/*
 * @Author       : 老董
 * @Date         : 2026-02-06
 * @Description  : 变分采样层（VAE 的重参数化采样）
 */

use super::TraitLayer;
use crate::nn::{GraphError, Var, VarMathOps, VarRandomOps};

/// 防止方差为0
const VARIANCE_EPSILON: f32 = 1e-7;

/// 由均值头和对数方差头采样：`mu + sigma ⊙ z`，`sigma = sqrt(exp(logvar) + 1e-7)`
///
/// `sigma`在构造时建好；每次调用`get_output`都采样新的 z ~ N(0, 1)。
#[derive(Debug, Clone)]
pub struct VariationalSampleLayer {
    mu: Var,
    sigma: Var,
    shape: Vec<usize>,
}

impl VariationalSampleLayer {
    pub fn new(
        incoming_mu: &(impl TraitLayer + ?Sized),
        incoming_logvar: &(impl TraitLayer + ?Sized),
    ) -> Result<Self, GraphError> {
        let shape = incoming_mu.get_output_shape();
        let logvar_shape = incoming_logvar.get_output_shape();
        if shape != logvar_shape {
            return Err(GraphError::ShapeMismatch {
                expected: shape,
                got: logvar_shape,
                message: "变分采样层的均值与对数方差形状不一致".to_string(),
            });
        }

        let sigma = incoming_logvar
            .get_output()?
            .exp()?
            .shift(VARIANCE_EPSILON)?
            .sqrt()?;
        Ok(Self {
            mu: incoming_mu.get_output()?,
            sigma,
            shape,
        })
    }
}

impl TraitLayer for VariationalSampleLayer {
    fn get_input_shape(&self) -> Vec<usize> {
        self.shape.clone()
    }

    fn get_output_shape(&self) -> Vec<usize> {
        self.shape.clone()
    }

    fn get_output(&self) -> Result<Var, GraphError> {
        let z = self.mu.random_normal_like(0.0, 1.0)?;
        self.mu.try_add(&self.sigma.try_mul(&z)?)
    }
}
