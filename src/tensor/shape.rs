/*
 * @Description  : 张量的形状变换：reshape、转置、广播及其逆运算（梯度规约）、按列拼接/切分
 */

use super::Tensor;
use crate::errors::TensorError;
use ndarray::{Axis, IxDyn, Slice};

/// 按 NumPy 规则计算两个形状广播后的形状，不兼容则返回None
///
/// - 从右向左对齐维度
/// - 每个维度必须相等，或其中一个为 1
/// - 维度数不同时，较短的形状前面补 1
pub fn broadcast_shape(shape_1: &[usize], shape_2: &[usize]) -> Option<Vec<usize>> {
    let ndim = shape_1.len().max(shape_2.len());
    let dim_at = |shape: &[usize], i: usize| {
        let offset = ndim - shape.len();
        if i < offset { 1 } else { shape[i - offset] }
    };

    let mut result = Vec::with_capacity(ndim);
    for i in 0..ndim {
        let (d1, d2) = (dim_at(shape_1, i), dim_at(shape_2, i));
        let dim = match (d1, d2) {
            _ if d1 == d2 => d1,
            (1, _) => d2,
            (_, 1) => d1,
            _ => return None,
        };
        result.push(dim);
    }
    Some(result)
}

impl Tensor {
    /// 判断本张量能否与`other`进行广播运算
    pub fn can_broadcast_with(&self, other: &Self) -> bool {
        broadcast_shape(self.shape(), other.shape()).is_some()
    }

    /// 改变形状（元素按行优先顺序重排），元素总数必须一致
    pub fn reshape(&self, shape: &[usize]) -> Self {
        let target_size: usize = shape.iter().product();
        assert!(
            target_size == self.size(),
            "{}",
            TensorError::ReshapeSizeMismatch {
                from: self.shape().to_vec(),
                to: shape.to_vec(),
            }
        );
        let data = self.data.iter().copied().collect::<Vec<_>>();
        Self::new(&data, shape)
    }

    /// 2阶张量（矩阵）转置
    pub fn transpose(&self) -> Self {
        self.assert_matrix("转置");
        Self::from_array(self.data.t().to_owned())
    }

    /// 将张量广播到`shape`（需满足广播规则）
    pub fn broadcast_to(&self, shape: &[usize]) -> Self {
        let view = self.data.broadcast(IxDyn(shape)).unwrap_or_else(|| {
            panic!("无法将形状{:?}广播到{:?}", self.shape(), shape)
        });
        Self::from_array(view.to_owned())
    }

    /// 广播的逆运算：沿被广播的维度求和，把张量规约回`shape`
    ///
    /// 用于反向传播：参与广播运算的父节点，其梯度需要规约回父节点自身的形状。
    pub fn sum_to_shape(&self, shape: &[usize]) -> Self {
        if self.shape() == shape {
            return self.clone();
        }
        let mut data = self.data.clone();
        // 1. 去掉前补的维度
        while data.ndim() > shape.len() {
            data = data.sum_axis(Axis(0));
        }
        // 2. 对目标为1的维度求和并保留该维
        for (axis, &dim) in shape.iter().enumerate() {
            if dim == 1 && data.shape()[axis] != 1 {
                data = data.sum_axis(Axis(axis)).insert_axis(Axis(axis));
            }
        }
        Self::from_array(data)
    }

    /// 将若干个行数相同的矩阵按列（axis=1）拼接
    pub fn concat_cols(tensors: &[&Self]) -> Self {
        assert!(!tensors.is_empty(), "{}", TensorError::EmptyList);
        for tensor in tensors {
            tensor.assert_matrix("按列拼接");
        }
        let views = tensors.iter().map(|t| t.data.view()).collect::<Vec<_>>();
        let data = ndarray::concatenate(Axis(1), &views)
            .unwrap_or_else(|_| panic!("{}", TensorError::IncompatibleShape));
        Self::from_array(data)
    }

    /// 取矩阵的第`[start, end)`列
    pub fn slice_cols(&self, start: usize, end: usize) -> Self {
        self.assert_matrix("按列切分");
        Self::from_array(
            self.data
                .slice_axis(Axis(1), Slice::from(start..end))
                .to_owned(),
        )
    }

    pub(in crate::tensor) fn assert_matrix(&self, operation: &'static str) {
        assert!(
            self.dimension() == 2,
            "{}",
            TensorError::NeedMatrix {
                operation,
                shape: self.shape().to_vec(),
            }
        );
    }
}
