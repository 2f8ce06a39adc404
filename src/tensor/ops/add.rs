/*
 * @Description  : 张量的加法，实现了两个张量“逐元素”（或张量与纯数）相加的运算，并返回一个新的张量。
 *                 两个操作数均为张量时支持 NumPy 风格的广播（broadcasting）。
 */

use crate::errors::{Operator, TensorError};
use crate::tensor::Tensor;
use crate::tensor::shape::broadcast_shape;
use std::ops::AddAssign;

impl_elementwise_operator!(Add, add, Operator::Add, +);

impl<'a> AddAssign<&'a Tensor> for Tensor {
    /// 原地相加，`other`须能广播到本张量的形状
    fn add_assign(&mut self, other: &'a Tensor) {
        assert!(
            broadcast_shape(self.shape(), other.shape()).as_deref() == Some(self.shape()),
            "{}",
            TensorError::OperatorError {
                operator: Operator::AddAssign,
                tensor1_shape: self.shape().to_vec(),
                tensor2_shape: other.shape().to_vec(),
            }
        );
        *self = &*self + other;
    }
}

impl AddAssign<f32> for Tensor {
    fn add_assign(&mut self, scalar: f32) {
        self.data.mapv_inplace(|a| a + scalar);
    }
}
