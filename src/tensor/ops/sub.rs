/*
 * @Description  : 张量的减法（逐元素，支持广播）
 */

use crate::errors::Operator;
use crate::tensor::Tensor;
use std::ops::Neg;

impl_elementwise_operator!(Sub, sub, Operator::Sub, -);

impl Neg for Tensor {
    type Output = Self;

    fn neg(self) -> Self {
        self.map(|a| -a)
    }
}

impl Neg for &Tensor {
    type Output = Tensor;

    fn neg(self) -> Tensor {
        self.map(|a| -a)
    }
}
