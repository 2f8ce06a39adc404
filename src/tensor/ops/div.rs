/*
 * @Description  : 张量的除法（逐元素，支持广播）。除数为零时遵循IEEE浮点语义（得到inf或NaN），不做额外检查
 */

use crate::errors::Operator;
use crate::tensor::Tensor;

impl_elementwise_operator!(Div, div, Operator::Div, /);
