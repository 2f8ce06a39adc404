/*
 * @Author       : 老董
 * @Date         : 2026-02-06
 * @Description  : 输入层：网络链的起点
 */

use super::TraitLayer;
use crate::nn::{Graph, GraphError, Var};
use crate::tensor::Tensor;

/// 输入层，包装一个固定形状的输入节点，数据通过`set_value`送入
#[derive(Debug, Clone)]
pub struct InputLayer {
    input: Var,
    shape: Vec<usize>,
}

impl InputLayer {
    pub fn new(graph: &Graph, shape: &[usize], name: Option<&str>) -> Result<Self, GraphError> {
        let input = graph.input_shape(shape, name)?;
        Ok(Self {
            input,
            shape: shape.to_vec(),
        })
    }

    /// 以已有节点作为输入层
    pub fn from_var(input: &Var) -> Self {
        Self {
            input: input.clone(),
            shape: input.value_expected_shape(),
        }
    }

    /// 送入数据，形状须与本层一致
    pub fn set_value(&self, value: &Tensor) -> Result<(), GraphError> {
        self.input.set_value(value)
    }
}

impl TraitLayer for InputLayer {
    fn get_input_shape(&self) -> Vec<usize> {
        self.shape.clone()
    }

    fn get_output_shape(&self) -> Vec<usize> {
        self.shape.clone()
    }

    fn get_output(&self) -> Result<Var, GraphError> {
        Ok(self.input.clone())
    }
}
