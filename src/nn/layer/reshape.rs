/*
 * @Author       : 老董
 * @Date         : 2026-02-06
 * @Description  : Reshape 层
 */

use super::TraitLayer;
use crate::nn::{GraphError, Var, VarShapeOps};

/// 改变上游输出的形状
///
/// - `new`：保留第0维（batch），其余维度展平为`[batch, d1*d2*...]`
/// - `with_shape`：变为指定形状
#[derive(Debug, Clone)]
pub struct ReshapeLayer {
    input_shape: Vec<usize>,
    output: Var,
}

impl ReshapeLayer {
    pub fn new(incoming: &(impl TraitLayer + ?Sized)) -> Result<Self, GraphError> {
        let output = incoming.get_output()?.flatten()?;
        Ok(Self {
            input_shape: incoming.get_output_shape(),
            output,
        })
    }

    pub fn with_shape(
        incoming: &(impl TraitLayer + ?Sized),
        shape: &[usize],
    ) -> Result<Self, GraphError> {
        let output = incoming.get_output()?.reshape(shape)?;
        Ok(Self {
            input_shape: incoming.get_output_shape(),
            output,
        })
    }
}

impl TraitLayer for ReshapeLayer {
    fn get_input_shape(&self) -> Vec<usize> {
        self.input_shape.clone()
    }

    fn get_output_shape(&self) -> Vec<usize> {
        self.output.value_expected_shape()
    }

    fn get_output(&self) -> Result<Var, GraphError> {
        Ok(self.output.clone())
    }
}
