use crate::nn::nodes::raw_node::TraitNode;
use crate::nn::GraphError;
use crate::tensor::Tensor;

/// 变形节点：按行优先顺序把父节点的值排成新形状（元素总数不变）
pub(in crate::nn) struct Reshape {
    target_shape: Vec<usize>,
}

impl Reshape {
    pub(in crate::nn) fn new(target_shape: &[usize]) -> Self {
        Self {
            target_shape: target_shape.to_vec(),
        }
    }
}

impl TraitNode for Reshape {
    fn type_name(&self) -> &'static str {
        "reshape"
    }

    fn calc_value_by_parents(&mut self, parents: &[&Tensor]) -> Result<Tensor, GraphError> {
        Ok(parents[0].reshape(&self.target_shape))
    }

    fn calc_grad_to_parent(
        &self,
        _index: usize,
        parents: &[&Tensor],
        _value: &Tensor,
        upstream_grad: &Tensor,
    ) -> Result<Tensor, GraphError> {
        Ok(upstream_grad.reshape(parents[0].shape()))
    }
}
