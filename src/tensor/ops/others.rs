/*
 * @Description  : 张量的其余运算：逐元素函数、矩阵乘法、归约（求和/均值/按轴最大值）以及索引
 */

use crate::errors::{Operator, TensorError};
use crate::tensor::shape::broadcast_shape;
use crate::tensor::Tensor;
use ndarray::{Axis, IxDyn, Ix2, Zip};
use std::ops::{Index, IndexMut};

impl PartialEq for Tensor {
    fn eq(&self, other: &Self) -> bool {
        self.data == other.data
    }
}

impl Index<[usize; 2]> for Tensor {
    type Output = f32;

    fn index(&self, index: [usize; 2]) -> &f32 {
        &self.data[&index[..]]
    }
}

impl IndexMut<[usize; 2]> for Tensor {
    fn index_mut(&mut self, index: [usize; 2]) -> &mut f32 {
        &mut self.data[&index[..]]
    }
}

/*↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓逐元素运算↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓*/
impl Tensor {
    /// 逐元素映射
    pub fn map(&self, f: impl Fn(f32) -> f32) -> Self {
        Self::from_array(self.data.mapv(f))
    }

    /// 两个张量广播后逐元素运算；形状不兼容时panic
    pub(in crate::tensor) fn zip_broadcast(
        tensor_1: &Self,
        tensor_2: &Self,
        operator: Operator,
        f: impl Fn(f32, f32) -> f32,
    ) -> Self {
        let shape = broadcast_shape(tensor_1.shape(), tensor_2.shape()).unwrap_or_else(|| {
            panic!(
                "{}",
                TensorError::OperatorError {
                    operator,
                    tensor1_shape: tensor_1.shape().to_vec(),
                    tensor2_shape: tensor_2.shape().to_vec(),
                }
            )
        });
        if tensor_1.shape() == shape.as_slice() && tensor_2.shape() == shape.as_slice() {
            return Self::from_array(
                Zip::from(&tensor_1.data)
                    .and(&tensor_2.data)
                    .map_collect(|&a, &b| f(a, b)),
            );
        }
        let (Some(view_1), Some(view_2)) = (
            tensor_1.data.broadcast(IxDyn(&shape)),
            tensor_2.data.broadcast(IxDyn(&shape)),
        ) else {
            unreachable!("广播形状{shape:?}已通过兼容性检查");
        };
        Self::from_array(Zip::from(&view_1).and(&view_2).map_collect(|&a, &b| f(a, b)))
    }

    pub fn exp(&self) -> Self {
        self.map(f32::exp)
    }

    /// 自然对数
    pub fn ln(&self) -> Self {
        self.map(f32::ln)
    }

    pub fn sqrt(&self) -> Self {
        self.map(f32::sqrt)
    }

    pub fn abs(&self) -> Self {
        self.map(f32::abs)
    }

    /// 符号函数（0处取0）
    pub fn sign(&self) -> Self {
        self.map(|x| {
            if x > 0.0 {
                1.0
            } else if x < 0.0 {
                -1.0
            } else {
                0.0
            }
        })
    }

    pub fn square(&self) -> Self {
        self.map(|x| x * x)
    }

    pub fn sigmoid(&self) -> Self {
        self.map(|x| 1.0 / (1.0 + (-x).exp()))
    }

    /// 将每个元素截断到`[min, max]`
    pub fn clip(&self, min: f32, max: f32) -> Self {
        self.map(|x| x.clamp(min, max))
    }

    /// 元素大于0处为1，否则为0（即`ReLU`的导数）
    pub fn positive_mask(&self) -> Self {
        self.map(|x| if x > 0.0 { 1.0 } else { 0.0 })
    }

    /// 元素落在`[min, max]`内为1，否则为0（即截断运算的导数）
    pub fn inside_mask(&self, min: f32, max: f32) -> Self {
        self.map(|x| if (min..=max).contains(&x) { 1.0 } else { 0.0 })
    }

    /// 沿`axis`取最大值的位置为1，其余为0（并列最大值处均为1）
    pub fn max_mask(&self, axis: usize) -> Self {
        let max = self.max_axis_keepdims(axis);
        Self::zip_broadcast(self, &max, Operator::Sub, |x, m| {
            if x == m { 1.0 } else { 0.0 }
        })
    }
}
/*↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑逐元素运算↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑*/

/*↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓矩阵乘法↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓*/
impl Tensor {
    /// 矩阵乘法：`[m, n] @ [n, p] = [m, p]`
    pub fn mat_mul(&self, other: &Self) -> Self {
        self.assert_matrix("矩阵乘法");
        other.assert_matrix("矩阵乘法");
        assert!(
            self.shape()[1] == other.shape()[0],
            "{}",
            TensorError::OperatorError {
                operator: Operator::MatMul,
                tensor1_shape: self.shape().to_vec(),
                tensor2_shape: other.shape().to_vec(),
            }
        );
        let (Ok(a), Ok(b)) = (
            self.data.view().into_dimensionality::<Ix2>(),
            other.data.view().into_dimensionality::<Ix2>(),
        ) else {
            unreachable!("已确认两个张量均为2阶");
        };
        Self::from_array(a.dot(&b).into_dyn())
    }
}
/*↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑矩阵乘法↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑*/

/*↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓归约↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓↓*/
impl Tensor {
    /// 对所有元素求和，返回形状为`[1, 1]`的标量张量
    pub fn sum(&self) -> Self {
        Self::new(&[self.data.sum()], &[1, 1])
    }

    /// 对所有元素求均值，返回形状为`[1, 1]`的标量张量
    pub fn mean(&self) -> Self {
        Self::new(&[self.data.sum() / self.size() as f32], &[1, 1])
    }

    /// 沿`axis`求和并保留该维度（长度变为1）
    pub fn sum_axis_keepdims(&self, axis: usize) -> Self {
        Self::from_array(self.data.sum_axis(Axis(axis)).insert_axis(Axis(axis)))
    }

    /// 沿`axis`取最大值并保留该维度（长度变为1）
    pub fn max_axis_keepdims(&self, axis: usize) -> Self {
        Self::from_array(
            self.data
                .fold_axis(Axis(axis), f32::NEG_INFINITY, |&acc, &x| acc.max(x))
                .insert_axis(Axis(axis)),
        )
    }
}
/*↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑归约↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑↑*/
