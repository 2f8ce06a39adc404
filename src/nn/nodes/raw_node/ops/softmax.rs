/*
 * @Author       : 老董
 * @Date         : 2026-01-09
 * @Description  : Softmax 激活节点
 *                 实现沿最后一维的 softmax: softmax(x)_i = exp(x_i) / Σ exp(x_j)
 */

use crate::nn::nodes::raw_node::TraitNode;
use crate::nn::GraphError;
use crate::tensor::Tensor;
use rayon::prelude::*;

/// Softmax 激活节点
///
/// 对输入张量沿最后一维计算 softmax，输出与输入形状相同。
/// 使用数值稳定的 log-sum-exp 技巧避免溢出。
///
/// ## 输入
/// - 父节点: [batch, `num_classes`]
///
/// ## 输出
/// - 与输入形状相同，每行归一化为概率分布
pub(in crate::nn) struct Softmax;

impl Softmax {
    /// 计算数值稳定的 softmax（按行 Rayon 并行）
    fn stable_softmax_batch(logits: &Tensor) -> Tensor {
        let shape = logits.shape();
        let (batch_size, num_classes) = (shape[0], shape[1]);

        let rows: Vec<Vec<f32>> = (0..batch_size)
            .into_par_iter()
            .map(|b| {
                let max_val = (0..num_classes)
                    .map(|c| logits[[b, c]])
                    .fold(f32::NEG_INFINITY, f32::max);

                let mut row = (0..num_classes)
                    .map(|c| (logits[[b, c]] - max_val).exp())
                    .collect::<Vec<_>>();
                let sum_exp: f32 = row.iter().sum();
                row.iter_mut().for_each(|x| *x /= sum_exp);
                row
            })
            .collect();

        let data: Vec<f32> = rows.into_iter().flatten().collect();
        Tensor::new(&data, shape)
    }
}

impl TraitNode for Softmax {
    fn type_name(&self) -> &'static str {
        "softmax"
    }

    fn calc_value_by_parents(&mut self, parents: &[&Tensor]) -> Result<Tensor, GraphError> {
        Ok(Self::stable_softmax_batch(parents[0]))
    }

    /// 对于 y = softmax(x)：
    /// `dL/dx_i` = `y_i` * (`dL/dy_i` - <dL/dy, y>)
    ///
    /// 其中 <dL/dy, y> 是每行上游梯度与 softmax 输出的内积。
    fn calc_grad_to_parent(
        &self,
        _index: usize,
        _parents: &[&Tensor],
        value: &Tensor,
        upstream_grad: &Tensor,
    ) -> Result<Tensor, GraphError> {
        let dot = (upstream_grad * value).sum_axis_keepdims(1);
        Ok(value * (upstream_grad - &dot))
    }
}
