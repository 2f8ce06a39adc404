/*
 * @Author       : 老董
 * @Description  : Dropout 节点：每次前向传播都重新抽取保留掩码
 */

use crate::nn::nodes::raw_node::TraitNode;
use crate::nn::GraphError;
use crate::tensor::Tensor;
use rand::rngs::StdRng;

/// Dropout 节点
///
/// 每个元素以`keep_prob`的概率保留并放大为`x / keep_prob`，否则置0，
/// 因此输出的期望与输入一致（inverted dropout）。
/// 本次前向传播所用的掩码会被缓存，供反向传播使用。
pub(in crate::nn) struct Dropout {
    keep_prob: f32,
    rng: StdRng,
    mask: Option<Tensor>,
}

impl Dropout {
    pub(in crate::nn) const fn new(keep_prob: f32, rng: StdRng) -> Self {
        Self {
            keep_prob,
            rng,
            mask: None,
        }
    }
}

impl TraitNode for Dropout {
    fn type_name(&self) -> &'static str {
        "dropout"
    }

    fn calc_value_by_parents(&mut self, parents: &[&Tensor]) -> Result<Tensor, GraphError> {
        let keep_prob = self.keep_prob;
        let mask = Tensor::uniform_with_rng(0.0, 1.0, parents[0].shape(), &mut self.rng)
            .map(|u| if u < keep_prob { 1.0 / keep_prob } else { 0.0 });
        let value = parents[0] * &mask;
        self.mask = Some(mask);
        Ok(value)
    }

    fn calc_grad_to_parent(
        &self,
        _index: usize,
        _parents: &[&Tensor],
        _value: &Tensor,
        upstream_grad: &Tensor,
    ) -> Result<Tensor, GraphError> {
        let mask = self.mask.as_ref().ok_or_else(|| {
            GraphError::ComputationError("Dropout 掩码为空，需先执行前向传播".to_string())
        })?;
        Ok(upstream_grad * mask)
    }
}
