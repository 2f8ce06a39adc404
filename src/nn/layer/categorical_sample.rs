/*
 * @Author       : 老董
 * @Date         : 2026-02-06
 * @Description  : 类别采样层（Gumbel-Softmax）
 */

use super::TraitLayer;
use crate::nn::{GraphError, Var, VarActivationOps, VarMathOps, VarShapeOps};

/// 避免 ln(0)
const GUMBEL_EPSILON: f32 = 1e-20;

/// 对`[batch, num_categories, num_classes]`的 logits 做 Gumbel-Softmax 采样
///
/// 1. 展平为`[batch * num_categories, num_classes]`
/// 2. 加上 Gumbel(0, 1) 噪声：`g = -ln(-ln(U + ε) + ε)`，U ~ U(0, 1)
/// 3. `y = softmax((logits + g) / temperature)`
/// 4. hard 模式：`y = stop_gradient(one_hot_max(y) - y) + y`，
///    前向值为严格的 one-hot，梯度与软输出相同（straight-through）
/// 5. 还原为3阶
#[derive(Debug, Clone)]
pub struct CategoricalSampleLayer {
    shape: Vec<usize>,
    temperature: f32,
    hard: bool,
    output: Var,
}

impl CategoricalSampleLayer {
    pub fn new(
        incoming: &(impl TraitLayer + ?Sized),
        temperature: f32,
        hard: bool,
    ) -> Result<Self, GraphError> {
        let shape = incoming.get_output_shape();
        let &[batch, num_categories, num_classes] = shape.as_slice() else {
            return Err(GraphError::DimensionMismatch {
                expected: 3,
                got: shape.len(),
                message: format!(
                    "类别采样层的输入须为[batch, num_categories, num_classes]，但得到{shape:?}"
                ),
            });
        };
        if !(temperature > 0.0) {
            return Err(GraphError::InvalidOperation(format!(
                "类别采样层的温度必须为正数，但得到{temperature}"
            )));
        }

        let logits = incoming
            .get_output()?
            .reshape(&[batch * num_categories, num_classes])?;
        let graph = logits.get_graph();
        let uniform = graph.random_uniform(&logits.value_expected_shape(), 0.0, 1.0, None)?;
        let gumbel = uniform
            .shift(GUMBEL_EPSILON)?
            .ln()?
            .scale(-1.0)?
            .shift(GUMBEL_EPSILON)?
            .ln()?
            .scale(-1.0)?;

        let soft = logits.try_add(&gumbel)?.scale(1.0 / temperature)?.softmax()?;
        let sample = if hard {
            let hard_minus_soft = soft.one_hot_max()?.try_sub(&soft)?;
            hard_minus_soft.stop_gradient()?.try_add(&soft)?
        } else {
            soft
        };

        Ok(Self {
            output: sample.reshape(&shape)?,
            shape,
            temperature,
            hard,
        })
    }

    pub const fn temperature(&self) -> f32 {
        self.temperature
    }

    pub const fn is_hard(&self) -> bool {
        self.hard
    }
}

impl TraitLayer for CategoricalSampleLayer {
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
