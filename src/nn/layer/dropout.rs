/*
 * @Author       : 老董
 * @Date         : 2026-02-06
 * @Description  : Dropout 层
 */

use super::TraitLayer;
use crate::nn::{GraphError, Var, VarRandomOps};

const DEFAULT_KEEP_PROB: f32 = 0.5;

/// 以`keep_prob`的概率保留上游输出的元素（并放大`1/keep_prob`倍），其余置0
///
/// 每次调用`get_output`都新建一个 Dropout 节点，掩码在每次前向传播时重新采样。
#[derive(Debug, Clone)]
pub struct DropoutLayer {
    incoming: Var,
    shape: Vec<usize>,
    keep_prob: f32,
}

impl DropoutLayer {
    pub fn new(incoming: &(impl TraitLayer + ?Sized)) -> Result<Self, GraphError> {
        Self::with_keep_prob(incoming, DEFAULT_KEEP_PROB)
    }

    pub fn with_keep_prob(
        incoming: &(impl TraitLayer + ?Sized),
        keep_prob: f32,
    ) -> Result<Self, GraphError> {
        if !(keep_prob > 0.0 && keep_prob <= 1.0) {
            return Err(GraphError::InvalidOperation(format!(
                "Dropout的保留概率必须在(0, 1]内，但得到{keep_prob}"
            )));
        }
        Ok(Self {
            incoming: incoming.get_output()?,
            shape: incoming.get_output_shape(),
            keep_prob,
        })
    }

    pub const fn keep_prob(&self) -> f32 {
        self.keep_prob
    }
}

impl TraitLayer for DropoutLayer {
    fn get_input_shape(&self) -> Vec<usize> {
        self.shape.clone()
    }

    fn get_output_shape(&self) -> Vec<usize> {
        self.shape.clone()
    }

    fn get_output(&self) -> Result<Var, GraphError> {
        self.incoming.dropout(self.keep_prob)
    }
}
