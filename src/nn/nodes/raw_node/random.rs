/*
 * @Author       : 老董
 * @Description  : 随机源节点：每次前向传播都重新采样，用于重参数化技巧、噪声注入、Gumbel噪声等。
 *                 每个节点持有自己的随机数生成器，从带种子的图中创建时结果可复现。
 */

use super::{no_parent_error, NodeKind, TraitNode};
use crate::nn::GraphError;
use crate::tensor::Tensor;
use rand::rngs::StdRng;

/// 元素独立服从`N(mean, std_dev²)`的随机节点
pub(in crate::nn) struct RandomNormal {
    mean: f32,
    std_dev: f32,
    shape: Vec<usize>,
    rng: StdRng,
}

impl RandomNormal {
    pub(in crate::nn) fn new(mean: f32, std_dev: f32, shape: &[usize], rng: StdRng) -> Self {
        Self {
            mean,
            std_dev,
            shape: shape.to_vec(),
            rng,
        }
    }
}

impl TraitNode for RandomNormal {
    fn type_name(&self) -> &'static str {
        "random_normal"
    }

    fn kind(&self) -> NodeKind {
        NodeKind::Random
    }

    fn calc_value_by_parents(&mut self, _parents: &[&Tensor]) -> Result<Tensor, GraphError> {
        Ok(Tensor::normal_with_rng(
            self.mean,
            self.std_dev,
            &self.shape,
            &mut self.rng,
        ))
    }

    fn calc_grad_to_parent(
        &self,
        _index: usize,
        _parents: &[&Tensor],
        _value: &Tensor,
        _upstream_grad: &Tensor,
    ) -> Result<Tensor, GraphError> {
        Err(no_parent_error(self.type_name()))
    }
}

/// 元素独立服从`[min, max)`上均匀分布的随机节点
pub(in crate::nn) struct RandomUniform {
    min: f32,
    max: f32,
    shape: Vec<usize>,
    rng: StdRng,
}

impl RandomUniform {
    pub(in crate::nn) fn new(min: f32, max: f32, shape: &[usize], rng: StdRng) -> Self {
        Self {
            min,
            max,
            shape: shape.to_vec(),
            rng,
        }
    }
}

impl TraitNode for RandomUniform {
    fn type_name(&self) -> &'static str {
        "random_uniform"
    }

    fn kind(&self) -> NodeKind {
        NodeKind::Random
    }

    fn calc_value_by_parents(&mut self, _parents: &[&Tensor]) -> Result<Tensor, GraphError> {
        Ok(Tensor::uniform_with_rng(
            self.min,
            self.max,
            &self.shape,
            &mut self.rng,
        ))
    }

    fn calc_grad_to_parent(
        &self,
        _index: usize,
        _parents: &[&Tensor],
        _value: &Tensor,
        _upstream_grad: &Tensor,
    ) -> Result<Tensor, GraphError> {
        Err(no_parent_error(self.type_name()))
    }
}
