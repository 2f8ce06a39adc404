/*
 * @Author       : 老董
 * @Date         : 2026-02-06
 * @Description  : 高斯噪声层
 */

use super::TraitLayer;
use crate::nn::{GraphError, Var, VarRandomOps};

/// 给上游输出加上独立采样的高斯噪声 N(mu, sigma²)，每次调用`get_output`都新建噪声节点
#[derive(Debug, Clone)]
pub struct GaussianNoiseLayer {
    incoming: Var,
    shape: Vec<usize>,
    mu: f32,
    sigma: f32,
}

impl GaussianNoiseLayer {
    /// 默认 mu = 0.0, sigma = 0.1
    pub fn new(incoming: &(impl TraitLayer + ?Sized)) -> Result<Self, GraphError> {
        Self::with_params(incoming, 0.0, 0.1)
    }

    pub fn with_params(
        incoming: &(impl TraitLayer + ?Sized),
        mu: f32,
        sigma: f32,
    ) -> Result<Self, GraphError> {
        Ok(Self {
            incoming: incoming.get_output()?,
            shape: incoming.get_output_shape(),
            mu,
            sigma,
        })
    }
}

impl TraitLayer for GaussianNoiseLayer {
    fn get_input_shape(&self) -> Vec<usize> {
        self.shape.clone()
    }

    fn get_output_shape(&self) -> Vec<usize> {
        self.shape.clone()
    }

    fn get_output(&self) -> Result<Var, GraphError> {
        let noise = self.incoming.random_normal_like(self.mu, self.sigma)?;
        self.incoming.try_add(&noise)
    }
}
