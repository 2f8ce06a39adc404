mod abs;
mod add;
mod clip;
mod concat;
mod divide;
mod dropout;
mod exp;
mod identity;
mod ln;
mod mat_mul;
mod mean;
mod multiply;
mod one_hot_max;
mod relu;
mod reshape;
mod scalar_add;
mod scalar_multiply;
mod sigmoid;
mod softmax;
mod sqrt;
mod square;
mod subtract;
mod sum;
mod sum_axis;

pub(in crate::nn) use abs::Abs;
pub(in crate::nn) use add::Add;
pub(in crate::nn) use clip::Clip;
pub(in crate::nn) use concat::Concat;
pub(in crate::nn) use divide::Divide;
pub(in crate::nn) use dropout::Dropout;
pub(in crate::nn) use exp::Exp;
pub(in crate::nn) use identity::Identity;
pub(in crate::nn) use ln::Ln;
pub(in crate::nn) use mat_mul::MatMul;
pub(in crate::nn) use mean::Mean;
pub(in crate::nn) use multiply::Multiply;
pub(in crate::nn) use one_hot_max::OneHotMax;
pub(in crate::nn) use relu::Relu;
pub(in crate::nn) use reshape::Reshape;
pub(in crate::nn) use scalar_add::ScalarAdd;
pub(in crate::nn) use scalar_multiply::ScalarMultiply;
pub(in crate::nn) use sigmoid::Sigmoid;
pub(in crate::nn) use softmax::Softmax;
pub(in crate::nn) use sqrt::Sqrt;
pub(in crate::nn) use square::Square;
pub(in crate::nn) use subtract::Subtract;
pub(in crate::nn) use sum::Sum;
pub(in crate::nn) use sum_axis::SumAxis;
