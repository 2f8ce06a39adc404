/*
 * @Author       : 老董
 * @Date         : 2026-02-06
 * @Description  : 激活层
 */

use super::TraitLayer;
use crate::nn::{GraphError, Var, VarActivationOps};

/// 激活函数种类
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Activation {
    Sigmoid,
    Relu,
    /// 沿最后一维归一化，要求上游输出为2阶
    Softmax,
}

/// 对上游输出逐元素施加激活函数，形状不变
#[derive(Debug, Clone)]
pub struct ActivationLayer {
    activation: Activation,
    shape: Vec<usize>,
    output: Var,
}

impl ActivationLayer {
    pub fn new(
        incoming: &(impl TraitLayer + ?Sized),
        activation: Activation,
    ) -> Result<Self, GraphError> {
        let input = incoming.get_output()?;
        let output = match activation {
            Activation::Sigmoid => input.sigmoid()?,
            Activation::Relu => input.relu()?,
            Activation::Softmax => input.softmax()?,
        };
        Ok(Self {
            activation,
            shape: incoming.get_output_shape(),
            output,
        })
    }

    pub const fn activation(&self) -> Activation {
        self.activation
    }
}

impl TraitLayer for ActivationLayer {
    fn get_input_shape(&self) -> Vec<usize> {
        self.shape.clone()
    }

    fn get_output_shape(&self) -> Vec<usize> {
        self.shape.clone()
    }

    fn get_output(&self) -> Result<Var, GraphError> {
        Ok(self.output.clone())
    }
}
