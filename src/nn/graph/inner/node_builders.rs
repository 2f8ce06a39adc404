/*
 * @Author       : 老董
 * @Date         : 2026-01-27
 * @Description  : GraphInner 节点构建方法（new_*_node）
 *
 * 所有形状校验都在构建时完成，前向传播时不再出现形状不兼容的情况。
 */

use super::super::error::GraphError;
use super::GraphInner;
use crate::nn::nodes::raw_node::{
    Abs, Add, Clip, Concat, Divide, Dropout, Exp, Identity, Input, Ln, MatMul, Mean, Multiply,
    OneHotMax, Parameter, RandomNormal, RandomUniform, Relu, Reshape, ScalarAdd, ScalarMultiply,
    Sigmoid, Softmax, Sqrt, Square, Subtract, Sum, SumAxis, TraitNode,
};
use crate::nn::nodes::{NodeHandle, NodeType};
use crate::nn::NodeId;
use crate::tensor::broadcast_shape;

impl GraphInner {
    /// 添加节点到列表
    pub(in crate::nn::graph) fn add_node_to_list(
        &mut self,
        mut node_handle: NodeHandle,
        name: Option<&str>,
        parents: &[NodeId],
    ) -> Result<NodeId, GraphError> {
        let node_name =
            self.generate_valid_new_node_name(name.unwrap_or(""), node_handle.type_name())?;
        let node_id = self.generate_valid_node_id();

        for &parent_id in parents {
            self.forward_edges
                .entry(parent_id)
                .or_default()
                .push(node_id);
        }
        self.backward_edges
            .entry(node_id)
            .or_default()
            .extend(parents);

        node_handle.bind_id_and_name(node_id, &node_name);
        self.nodes.insert(node_id, node_handle);
        Ok(node_id)
    }

    fn shape_of(&self, id: NodeId) -> Result<Vec<usize>, GraphError> {
        Ok(self.get_node(id)?.value_expected_shape().to_vec())
    }

    fn check_source_shape(shape: &[usize]) -> Result<(), GraphError> {
        if shape.is_empty() || shape.contains(&0) {
            return Err(GraphError::InvalidOperation(format!(
                "节点形状必须至少有1维且每维长度大于0，但得到{shape:?}"
            )));
        }
        Ok(())
    }

    fn check_matrix(&self, id: NodeId, operation: &str) -> Result<Vec<usize>, GraphError> {
        let shape = self.shape_of(id)?;
        if shape.len() != 2 {
            return Err(GraphError::DimensionMismatch {
                expected: 2,
                got: shape.len(),
                message: format!("{operation}节点的父节点必须是2维矩阵，但其形状为{shape:?}"),
            });
        }
        Ok(shape)
    }

    // ========== 源节点 ==========

    /// 创建输入节点，其值需通过 `set_node_value` 设置
    pub fn new_input_node(
        &mut self,
        shape: &[usize],
        name: Option<&str>,
    ) -> Result<NodeId, GraphError> {
        Self::check_source_shape(shape)?;
        self.add_node_to_list(NodeHandle::new(Input, shape), name, &[])
    }

    /// 创建参数节点（未初始化），其值需通过 `set_node_value` 设置
    pub fn new_parameter_node(
        &mut self,
        shape: &[usize],
        name: Option<&str>,
    ) -> Result<NodeId, GraphError> {
        Self::check_source_shape(shape)?;
        self.add_node_to_list(NodeHandle::new(Parameter::new(), shape), name, &[])
    }

    /// 创建正态分布随机节点，每次前向传播重新采样
    pub fn new_random_normal_node(
        &mut self,
        shape: &[usize],
        mean: f32,
        std_dev: f32,
        name: Option<&str>,
    ) -> Result<NodeId, GraphError> {
        Self::check_source_shape(shape)?;
        if !(std_dev >= 0.0) {
            return Err(GraphError::InvalidOperation(format!(
                "正态分布的标准差必须非负，但得到{std_dev}"
            )));
        }
        let rng = self.derive_node_rng();
        let node = NodeHandle::new(RandomNormal::new(mean, std_dev, shape, rng), shape);
        self.add_node_to_list(node, name, &[])
    }

    /// 创建`[min, max)`均匀分布随机节点，每次前向传播重新采样
    pub fn new_random_uniform_node(
        &mut self,
        shape: &[usize],
        min: f32,
        max: f32,
        name: Option<&str>,
    ) -> Result<NodeId, GraphError> {
        Self::check_source_shape(shape)?;
        if !(min < max) {
            return Err(GraphError::InvalidOperation(format!(
                "均匀分布的区间[{min}, {max})为空"
            )));
        }
        let rng = self.derive_node_rng();
        let node = NodeHandle::new(RandomUniform::new(min, max, shape, rng), shape);
        self.add_node_to_list(node, name, &[])
    }

    // ========== 二元（广播）算子 ==========

    fn new_broadcast_node(
        &mut self,
        raw_node: NodeType,
        parents: &[NodeId],
        name: Option<&str>,
    ) -> Result<NodeId, GraphError> {
        let mut shape = self.shape_of(parents[0])?;
        for &parent_id in &parents[1..] {
            let other = self.shape_of(parent_id)?;
            shape = broadcast_shape(&shape, &other).ok_or_else(|| GraphError::ShapeMismatch {
                expected: shape.clone(),
                got: other.clone(),
                message: format!("{}节点的父节点形状无法广播", raw_node.type_name()),
            })?;
        }
        self.add_node_to_list(NodeHandle::new(raw_node, &shape), name, parents)
    }

    pub fn new_add_node(
        &mut self,
        parents: &[NodeId],
        name: Option<&str>,
    ) -> Result<NodeId, GraphError> {
        if parents.len() < 2 {
            return Err(GraphError::InvalidOperation(
                "Add节点至少需要2个父节点".to_string(),
            ));
        }
        self.new_broadcast_node(Add.into(), parents, name)
    }

    pub fn new_subtract_node(
        &mut self,
        left_node_id: NodeId,
        right_node_id: NodeId,
        name: Option<&str>,
    ) -> Result<NodeId, GraphError> {
        self.new_broadcast_node(Subtract.into(), &[left_node_id, right_node_id], name)
    }

    pub fn new_multiply_node(
        &mut self,
        left_node_id: NodeId,
        right_node_id: NodeId,
        name: Option<&str>,
    ) -> Result<NodeId, GraphError> {
        self.new_broadcast_node(Multiply.into(), &[left_node_id, right_node_id], name)
    }

    pub fn new_divide_node(
        &mut self,
        left_node_id: NodeId,
        right_node_id: NodeId,
        name: Option<&str>,
    ) -> Result<NodeId, GraphError> {
        self.new_broadcast_node(Divide.into(), &[left_node_id, right_node_id], name)
    }

    pub fn new_mat_mul_node(
        &mut self,
        left_node_id: NodeId,
        right_node_id: NodeId,
        name: Option<&str>,
    ) -> Result<NodeId, GraphError> {
        let left = self.check_matrix(left_node_id, "MatMul")?;
        let right = self.check_matrix(right_node_id, "MatMul")?;
        if left[1] != right[0] {
            return Err(GraphError::ShapeMismatch {
                expected: vec![left[1], right[1]],
                got: right,
                message: format!(
                    "MatMul节点的左矩阵列数{}与右矩阵行数不一致",
                    left[1]
                ),
            });
        }
        let node = NodeHandle::new(MatMul, &[left[0], right[1]]);
        self.add_node_to_list(node, name, &[left_node_id, right_node_id])
    }

    /// 按列拼接若干个行数相同的矩阵
    pub fn new_concat_node(
        &mut self,
        parents: &[NodeId],
        name: Option<&str>,
    ) -> Result<NodeId, GraphError> {
        if parents.is_empty() {
            return Err(GraphError::InvalidOperation(
                "Concat节点至少需要1个父节点".to_string(),
            ));
        }
        let first = self.check_matrix(parents[0], "Concat")?;
        let mut cols = 0;
        for &parent_id in parents {
            let shape = self.check_matrix(parent_id, "Concat")?;
            if shape[0] != first[0] {
                return Err(GraphError::ShapeMismatch {
                    expected: vec![first[0], shape[1]],
                    got: shape,
                    message: "Concat节点的所有父节点行数必须相同".to_string(),
                });
            }
            cols += shape[1];
        }
        let node = NodeHandle::new(Concat, &[first[0], cols]);
        self.add_node_to_list(node, name, parents)
    }

    // ========== 一元算子 ==========

    /// 创建输出形状与父节点相同的一元节点
    fn new_unary_node(
        &mut self,
        raw_node: NodeType,
        parent_id: NodeId,
        name: Option<&str>,
    ) -> Result<NodeId, GraphError> {
        let shape = self.shape_of(parent_id)?;
        self.add_node_to_list(NodeHandle::new(raw_node, &shape), name, &[parent_id])
    }

    pub fn new_scalar_multiply_node(
        &mut self,
        parent_id: NodeId,
        scalar: f32,
        name: Option<&str>,
    ) -> Result<NodeId, GraphError> {
        self.new_unary_node(ScalarMultiply::new(scalar).into(), parent_id, name)
    }

    pub fn new_scalar_add_node(
        &mut self,
        parent_id: NodeId,
        scalar: f32,
        name: Option<&str>,
    ) -> Result<NodeId, GraphError> {
        self.new_unary_node(ScalarAdd::new(scalar).into(), parent_id, name)
    }

    pub fn new_exp_node(&mut self, parent_id: NodeId, name: Option<&str>) -> Result<NodeId, GraphError> {
        self.new_unary_node(Exp.into(), parent_id, name)
    }

    pub fn new_ln_node(&mut self, parent_id: NodeId, name: Option<&str>) -> Result<NodeId, GraphError> {
        self.new_unary_node(Ln.into(), parent_id, name)
    }

    pub fn new_sqrt_node(&mut self, parent_id: NodeId, name: Option<&str>) -> Result<NodeId, GraphError> {
        self.new_unary_node(Sqrt.into(), parent_id, name)
    }

    pub fn new_abs_node(&mut self, parent_id: NodeId, name: Option<&str>) -> Result<NodeId, GraphError> {
        self.new_unary_node(Abs.into(), parent_id, name)
    }

    pub fn new_square_node(&mut self, parent_id: NodeId, name: Option<&str>) -> Result<NodeId, GraphError> {
        self.new_unary_node(Square.into(), parent_id, name)
    }

    pub fn new_sigmoid_node(&mut self, parent_id: NodeId, name: Option<&str>) -> Result<NodeId, GraphError> {
        self.new_unary_node(Sigmoid.into(), parent_id, name)
    }

    pub fn new_relu_node(&mut self, parent_id: NodeId, name: Option<&str>) -> Result<NodeId, GraphError> {
        self.new_unary_node(Relu.into(), parent_id, name)
    }

    pub fn new_identity_node(&mut self, parent_id: NodeId, name: Option<&str>) -> Result<NodeId, GraphError> {
        self.new_unary_node(Identity.into(), parent_id, name)
    }

    /// Softmax 节点需要 2D 输入 [batch, num_classes]，沿最后一维归一化
    pub fn new_softmax_node(&mut self, parent_id: NodeId, name: Option<&str>) -> Result<NodeId, GraphError> {
        self.check_matrix(parent_id, "Softmax")?;
        self.new_unary_node(Softmax.into(), parent_id, name)
    }

    /// OneHotMax 节点需要 2D 输入，按行取最大值位置
    pub fn new_one_hot_max_node(
        &mut self,
        parent_id: NodeId,
        name: Option<&str>,
    ) -> Result<NodeId, GraphError> {
        self.check_matrix(parent_id, "OneHotMax")?;
        self.new_unary_node(OneHotMax.into(), parent_id, name)
    }

    pub fn new_clip_node(
        &mut self,
        parent_id: NodeId,
        min: f32,
        max: f32,
        name: Option<&str>,
    ) -> Result<NodeId, GraphError> {
        if !(min <= max) {
            return Err(GraphError::InvalidOperation(format!(
                "Clip节点的下界{min}不能大于上界{max}"
            )));
        }
        self.new_unary_node(Clip::new(min, max).into(), parent_id, name)
    }

    /// Dropout 节点：`keep_prob`须在(0, 1]内
    pub fn new_dropout_node(
        &mut self,
        parent_id: NodeId,
        keep_prob: f32,
        name: Option<&str>,
    ) -> Result<NodeId, GraphError> {
        if !(keep_prob > 0.0 && keep_prob <= 1.0) {
            return Err(GraphError::InvalidOperation(format!(
                "Dropout的保留概率必须在(0, 1]内，但得到{keep_prob}"
            )));
        }
        let rng = self.derive_node_rng();
        self.new_unary_node(Dropout::new(keep_prob, rng).into(), parent_id, name)
    }

    pub fn new_reshape_node(
        &mut self,
        parent_id: NodeId,
        target_shape: &[usize],
        name: Option<&str>,
    ) -> Result<NodeId, GraphError> {
        let shape = self.shape_of(parent_id)?;
        Self::check_source_shape(target_shape)?;
        if shape.iter().product::<usize>() != target_shape.iter().product::<usize>() {
            return Err(GraphError::ShapeMismatch {
                expected: shape,
                got: target_shape.to_vec(),
                message: "Reshape节点的目标形状与父节点的元素总数不一致".to_string(),
            });
        }
        let node = NodeHandle::new(Reshape::new(target_shape), target_shape);
        self.add_node_to_list(node, name, &[parent_id])
    }

    // ========== 归约算子 ==========

    /// 对所有元素求和，输出`[1, 1]`
    pub fn new_sum_node(&mut self, parent_id: NodeId, name: Option<&str>) -> Result<NodeId, GraphError> {
        let _ = self.get_node(parent_id)?;
        self.add_node_to_list(NodeHandle::new(Sum, &[1, 1]), name, &[parent_id])
    }

    /// 对所有元素求均值，输出`[1, 1]`
    pub fn new_mean_node(&mut self, parent_id: NodeId, name: Option<&str>) -> Result<NodeId, GraphError> {
        let _ = self.get_node(parent_id)?;
        self.add_node_to_list(NodeHandle::new(Mean, &[1, 1]), name, &[parent_id])
    }

    /// 沿`axis`求和并保留该维度
    pub fn new_sum_axis_node(
        &mut self,
        parent_id: NodeId,
        axis: usize,
        name: Option<&str>,
    ) -> Result<NodeId, GraphError> {
        let mut shape = self.shape_of(parent_id)?;
        if axis >= shape.len() {
            return Err(GraphError::DimensionMismatch {
                expected: axis + 1,
                got: shape.len(),
                message: format!("SumAxis节点的求和轴{axis}超出了父节点的维数"),
            });
        }
        shape[axis] = 1;
        self.add_node_to_list(NodeHandle::new(SumAxis::new(axis), &shape), name, &[parent_id])
    }
}
