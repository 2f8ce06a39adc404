/*
 * @Description  : 张量（Tensor）：计算图中所有节点值、梯度的载体，底层基于`ndarray`的动态维度数组
 */

use ndarray::{Array, IxDyn};
use rand::distributions::{Distribution, Uniform};
use rand::Rng;

/// 为张量实现某个逐元素二元运算符的全部组合：
/// `Tensor ⊕ Tensor`（含引用，支持广播）、`Tensor ⊕ f32`、`f32 ⊕ Tensor`
macro_rules! impl_elementwise_operator {
    ($trait_name:ident, $method:ident, $operator:expr, $op:tt) => {
        impl std::ops::$trait_name for Tensor {
            type Output = Tensor;
            fn $method(self, other: Tensor) -> Tensor {
                Tensor::zip_broadcast(&self, &other, $operator, |a, b| a $op b)
            }
        }
        impl<'a> std::ops::$trait_name<&'a Tensor> for Tensor {
            type Output = Tensor;
            fn $method(self, other: &'a Tensor) -> Tensor {
                Tensor::zip_broadcast(&self, other, $operator, |a, b| a $op b)
            }
        }
        impl std::ops::$trait_name<Tensor> for &Tensor {
            type Output = Tensor;
            fn $method(self, other: Tensor) -> Tensor {
                Tensor::zip_broadcast(self, &other, $operator, |a, b| a $op b)
            }
        }
        impl<'b> std::ops::$trait_name<&'b Tensor> for &Tensor {
            type Output = Tensor;
            fn $method(self, other: &'b Tensor) -> Tensor {
                Tensor::zip_broadcast(self, other, $operator, |a, b| a $op b)
            }
        }
        impl std::ops::$trait_name<f32> for Tensor {
            type Output = Tensor;
            fn $method(self, scalar: f32) -> Tensor {
                self.map(|a| a $op scalar)
            }
        }
        impl std::ops::$trait_name<f32> for &Tensor {
            type Output = Tensor;
            fn $method(self, scalar: f32) -> Tensor {
                self.map(|a| a $op scalar)
            }
        }
        impl std::ops::$trait_name<Tensor> for f32 {
            type Output = Tensor;
            fn $method(self, tensor: Tensor) -> Tensor {
                tensor.map(|a| self $op a)
            }
        }
        impl<'a> std::ops::$trait_name<&'a Tensor> for f32 {
            type Output = Tensor;
            fn $method(self, tensor: &'a Tensor) -> Tensor {
                tensor.map(|a| self $op a)
            }
        }
    };
}

mod ops {
    pub mod add;
    pub mod div;
    pub mod mul;
    pub mod others;
    pub mod sub;
}

mod property;
mod shape;

pub use shape::broadcast_shape;


/// 定义张量的结构体。其可以是标量、向量、矩阵或更高维度的数组。
/// 注：计算图中的标量统一用形状为`[1, 1]`的张量表示。
#[derive(Debug, Clone)]
pub struct Tensor {
    data: Array<f32, IxDyn>,
}

impl Tensor {
    /// 创建一个张量。`data`的长度必须和`shape`中所有元素的乘积相等，否则会panic。
    pub fn new(data: &[f32], shape: &[usize]) -> Self {
        let expected: usize = shape.iter().product();
        assert_eq!(
            data.len(),
            expected,
            "数据长度{}与形状{:?}所需的元素个数{}不一致",
            data.len(),
            shape,
            expected
        );
        let data = Array::from_shape_vec(IxDyn(shape), data.to_vec())
            .unwrap_or_else(|e| panic!("无法以形状{shape:?}创建张量：{e}"));
        Self { data }
    }

    pub fn zeros(shape: &[usize]) -> Self {
        Self {
            data: Array::zeros(IxDyn(shape)),
        }
    }

    pub fn ones(shape: &[usize]) -> Self {
        Self {
            data: Array::ones(IxDyn(shape)),
        }
    }

    /// 创建元素全为`value`的张量
    pub fn full(value: f32, shape: &[usize]) -> Self {
        Self {
            data: Array::from_elem(IxDyn(shape), value),
        }
    }

    /// 创建一个服从正态分布的随机张量（使用线程级随机数生成器）
    pub fn normal(mean: f32, std_dev: f32, shape: &[usize]) -> Self {
        Self::normal_with_rng(mean, std_dev, shape, &mut rand::thread_rng())
    }

    /// 创建一个服从正态分布的随机张量（使用指定的随机数生成器，便于复现）
    ///
    /// 采用Box-Muller变换，每次生成一对独立的标准正态样本。
    pub fn normal_with_rng<R: Rng + ?Sized>(
        mean: f32,
        std_dev: f32,
        shape: &[usize],
        rng: &mut R,
    ) -> Self {
        let data_len = shape.iter().product::<usize>();
        let mut data = Vec::with_capacity(data_len);

        while data.len() < data_len {
            let u1: f32 = rng.r#gen();
            let u2: f32 = rng.r#gen();
            let r = (-2.0 * u1.ln()).sqrt();
            let theta = 2.0 * std::f32::consts::PI * u2;
            let z0 = mean + std_dev * r * theta.cos();
            let z1 = mean + std_dev * r * theta.sin();

            if z0.is_finite() {
                data.push(z0);
            }
            if data.len() < data_len && z1.is_finite() {
                data.push(z1);
            }
        }

        Self::new(&data, shape)
    }

    /// 创建一个在`[min, max)`上均匀分布的随机张量（使用线程级随机数生成器）
    pub fn uniform(min: f32, max: f32, shape: &[usize]) -> Self {
        Self::uniform_with_rng(min, max, shape, &mut rand::thread_rng())
    }

    /// 创建一个在`[min, max)`上均匀分布的随机张量（使用指定的随机数生成器）
    pub fn uniform_with_rng<R: Rng + ?Sized>(
        min: f32,
        max: f32,
        shape: &[usize],
        rng: &mut R,
    ) -> Self {
        let dist = Uniform::new(min, max);
        let data = (0..shape.iter().product::<usize>())
            .map(|_| dist.sample(rng))
            .collect::<Vec<_>>();
        Self::new(&data, shape)
    }
}

// 私有方法
impl Tensor {
    pub(in crate::tensor) const fn from_array(data: Array<f32, IxDyn>) -> Self {
        Self { data }
    }
}
