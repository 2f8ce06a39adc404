/*
 * @Description  : 张量的乘法（逐元素，支持广播）。注意：矩阵乘法请使用`mat_mul`
 */

use crate::errors::{Operator, TensorError};
use crate::tensor::Tensor;
use crate::tensor::shape::broadcast_shape;
use std::ops::MulAssign;

impl_elementwise_operator!(Mul, mul, Operator::Mul, *);

impl<'a> MulAssign<&'a Tensor> for Tensor {
    fn mul_assign(&mut self, other: &'a Tensor) {
        assert!(
            broadcast_shape(self.shape(), other.shape()).as_deref() == Some(self.shape()),
            "{}",
            TensorError::OperatorError {
                operator: Operator::MulAssign,
                tensor1_shape: self.shape().to_vec(),
                tensor2_shape: other.shape().to_vec(),
            }
        );
        *self = &*self * other;
    }
}

impl MulAssign<f32> for Tensor {
    fn mul_assign(&mut self, scalar: f32) {
        self.data.mapv_inplace(|a| a * scalar);
    }
}
