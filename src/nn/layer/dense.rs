/*
 * @Author       : 老董
 * @Date         : 2026-01-17
 * @LastEditTime : 2026-02-06
 * @Description  : Dense (全连接) 层
 */

use super::{ReshapeLayer, TraitLayer, TraitParamLayer};
use crate::nn::{GraphError, Init, Var, VarMatrixOps};

/// 默认偏置初始值（小正数）
const DEFAULT_BIAS: f32 = 0.05;

/// 将上游输出整理为2阶：超过2阶时先展平，返回（输出节点, 输出形状）
pub(super) fn incoming_as_matrix(
    incoming: &(impl TraitLayer + ?Sized),
) -> Result<(Var, Vec<usize>), GraphError> {
    let shape = incoming.get_output_shape();
    match shape.len() {
        2 => Ok((incoming.get_output()?, shape)),
        n if n > 2 => {
            let reshaped = ReshapeLayer::new(incoming)?;
            Ok((reshaped.get_output()?, reshaped.get_output_shape()))
        }
        n => Err(GraphError::DimensionMismatch {
            expected: 2,
            got: n,
            message: format!("全连接层的输入至少需要2阶，但得到形状{shape:?}"),
        }),
    }
}

/// Dense (全连接) 层：`output = x @ W + b`
///
/// # 输入/输出形状
/// - 输入：[batch_size, in_features]，超过2阶时先展平为该形式
/// - 输出：[batch_size, num_units]
///
/// # 使用示例
/// ```ignore
/// let fc = DenseLayer::new(&input, 128)?;
/// let h = fc.get_output()?.relu()?;
///
/// // 无偏置：输出恰为矩阵乘积
/// let fc = DenseLayer::with_init(&input, 10, Init::Xavier, None)?;
/// ```
#[derive(Debug, Clone)]
pub struct DenseLayer {
    /// 权重参数 [in_features, num_units]
    weight: Var,
    /// 偏置参数 [1, num_units]（可选）
    bias: Option<Var>,
    num_units: usize,
    input_shape: Vec<usize>,
    output: Var,
}

impl DenseLayer {
    /// 使用默认初始化创建：权重 He 均匀分布，偏置常数0.05
    pub fn new(incoming: &(impl TraitLayer + ?Sized), num_units: usize) -> Result<Self, GraphError> {
        Self::with_init(incoming, num_units, Init::HeUniform, Some(Init::Constant(DEFAULT_BIAS)))
    }

    /// 指定初始化策略创建；`bias_init`为`None`时不使用偏置
    pub fn with_init(
        incoming: &(impl TraitLayer + ?Sized),
        num_units: usize,
        weight_init: Init,
        bias_init: Option<Init>,
    ) -> Result<Self, GraphError> {
        let input_shape = incoming.get_output_shape();
        let (x, matrix_shape) = incoming_as_matrix(incoming)?;
        let graph = x.get_graph();

        let weight = graph.parameter(&[matrix_shape[1], num_units], weight_init, None)?;
        let bias = bias_init
            .map(|init| graph.parameter(&[1, num_units], init, None))
            .transpose()?;

        // x @ W: [batch, in] @ [in, units] = [batch, units]
        let xw = x.matmul(&weight)?;
        let output = match &bias {
            Some(b) => xw.try_add(b)?,
            None => xw,
        };

        Ok(Self {
            weight,
            bias,
            num_units,
            input_shape,
            output,
        })
    }

    pub const fn num_units(&self) -> usize {
        self.num_units
    }

    /// 获取权重 Var
    pub const fn weight(&self) -> &Var {
        &self.weight
    }

    /// 获取偏置 Var
    pub const fn bias(&self) -> Option<&Var> {
        self.bias.as_ref()
    }
}

impl TraitLayer for DenseLayer {
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

impl TraitParamLayer for DenseLayer {
    fn get_variable(&self, _shaped: bool) -> Vec<Var> {
        let mut vars = vec![self.weight.clone()];
        vars.extend(self.bias.iter().cloned());
        vars
    }
}
