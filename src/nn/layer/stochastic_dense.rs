/*
 * @Author       : 老董
 * @Date         : 2026-02-06
 * @Description  : 权重带噪声的全连接层（重参数化）
 */

use super::dense::incoming_as_matrix;
use super::{TraitLayer, TraitParamLayer};
use crate::nn::{GraphError, Init, Var, VarMathOps, VarMatrixOps, VarRandomOps};

/// 随机全连接层（无偏置）
///
/// 权重由两个参数重参数化得到：`W = W_mu + exp(0.5 * W_sigma) ⊙ z`，
/// 其中 z ~ N(0, 1) 在每次前向传播时重新采样。输出为`x @ W`。
#[derive(Debug, Clone)]
pub struct StochasticDenseLayer {
    w_mu: Var,
    w_sigma: Var,
    num_units: usize,
    input_shape: Vec<usize>,
    output: Var,
}

impl StochasticDenseLayer {
    /// 两个参数均使用 He 均匀分布（各自独立采样）
    pub fn new(incoming: &(impl TraitLayer + ?Sized), num_units: usize) -> Result<Self, GraphError> {
        Self::with_init(incoming, num_units, Init::HeUniform)
    }

    pub fn with_init(
        incoming: &(impl TraitLayer + ?Sized),
        num_units: usize,
        init: Init,
    ) -> Result<Self, GraphError> {
        let input_shape = incoming.get_output_shape();
        let (x, matrix_shape) = incoming_as_matrix(incoming)?;
        let graph = x.get_graph();
        let shape = [matrix_shape[1], num_units];

        let w_mu = graph.parameter(&shape, init.clone(), None)?;
        let w_sigma = graph.parameter(&shape, init, None)?;

        let z = w_mu.random_normal_like(0.0, 1.0)?;
        let w = w_mu.try_add(&w_sigma.scale(0.5)?.exp()?.try_mul(&z)?)?;
        let output = x.matmul(&w)?;

        Ok(Self {
            w_mu,
            w_sigma,
            num_units,
            input_shape,
            output,
        })
    }

    pub const fn num_units(&self) -> usize {
        self.num_units
    }
}

impl TraitLayer for StochasticDenseLayer {
    fn get_input_shape(&self) -> Vec<usize> {
        self.input_shape.clone()
    }

    fn get_output_shape(&self) -> Vec<usize> {
        self.output.value_expected_shape()
    }

    fn get_output(&self) -> Result<Var, GraphError> {
        Ok(self.output.clone())
    }

    fn as_param_layer(&self) -> Option<&dyn TraitParamLayer> {
        Some(self)
    }
}

impl TraitParamLayer for StochasticDenseLayer {
    fn get_variable(&self, _shaped: bool) -> Vec<Var> {
        vec![self.w_mu.clone(), self.w_sigma.clone()]
    }
}
