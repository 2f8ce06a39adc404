/*
 * @Author       : 老董
 * @Date         : 2026-01-27
 * @Description  : Graph 句柄（用户级 API）
 */

use super::error::GraphError;
use super::inner::GraphInner;
use crate::nn::var::{Init, Var};
use crate::nn::NodeId;
use crate::tensor::Tensor;
use std::cell::RefCell;
use std::rc::Rc;

/// Graph - 计算图句柄
///
/// # 设计原则
/// - 是 `Rc<RefCell<GraphInner>>` 的薄封装
/// - Clone 语义：多个 Graph 引用同一个 GraphInner
/// - 创建的 Var 自动持有图引用
#[derive(Clone)]
pub struct Graph {
    inner: Rc<RefCell<GraphInner>>,
}

impl Graph {
    // ==================== 创建 ====================

    /// 创建新图
    pub fn new() -> Self {
        Self::from_inner(GraphInner::new())
    }

    /// 创建带种子的图（参数初始化与所有随机节点均可复现）
    pub fn new_with_seed(seed: u64) -> Self {
        Self::from_inner(GraphInner::new_with_seed(seed))
    }

    /// 从现有 GraphInner 创建句柄
    pub fn from_inner(inner: GraphInner) -> Self {
        Self {
            inner: Rc::new(RefCell::new(inner)),
        }
    }

    /// 从现有 Rc 创建句柄
    pub(crate) const fn from_rc(inner: Rc<RefCell<GraphInner>>) -> Self {
        Self { inner }
    }

    /// 获取内部 GraphInner 的不可变引用
    pub fn inner(&self) -> std::cell::Ref<'_, GraphInner> {
        self.inner.borrow()
    }

    /// 获取内部 GraphInner 的可变引用
    pub fn inner_mut(&self) -> std::cell::RefMut<'_, GraphInner> {
        self.inner.borrow_mut()
    }

    /// 检查两个句柄是否指向同一个图
    pub fn same_graph(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    /// 将 NodeId 包装成 Var
    pub fn wrap_node_id(&self, node_id: NodeId) -> Var {
        Var::new(node_id, Rc::clone(&self.inner))
    }

    // ==================== 创建变量 ====================

    /// 创建输入节点并设置数据
    pub fn input(&self, data: &Tensor) -> Result<Var, GraphError> {
        self.input_named_opt(data, None)
    }

    /// 创建命名输入节点并设置数据
    pub fn input_named(&self, data: &Tensor, name: &str) -> Result<Var, GraphError> {
        self.input_named_opt(data, Some(name))
    }

    fn input_named_opt(&self, data: &Tensor, name: Option<&str>) -> Result<Var, GraphError> {
        let mut g = self.inner.borrow_mut();
        let node_id = g.new_input_node(data.shape(), name)?;
        g.set_node_value(node_id, Some(data))?;
        Ok(Var::new(node_id, Rc::clone(&self.inner)))
    }

    /// 创建带形状的输入节点（值稍后通过 `Var::set_value` 提供）
    pub fn input_shape(&self, shape: &[usize], name: Option<&str>) -> Result<Var, GraphError> {
        let node_id = self.inner.borrow_mut().new_input_node(shape, name)?;
        Ok(Var::new(node_id, Rc::clone(&self.inner)))
    }

    /// 创建常量张量（不参与梯度计算的输入节点）
    pub fn constant(&self, data: &Tensor) -> Result<Var, GraphError> {
        self.input_named_opt(data, None)
    }

    /// 创建参数节点，并按`init`策略初始化（有种子时使用图的随机数生成器）
    pub fn parameter(
        &self,
        shape: &[usize],
        init: Init,
        name: Option<&str>,
    ) -> Result<Var, GraphError> {
        if let Init::Values(values) = &init {
            if values.shape() != shape {
                return Err(GraphError::ShapeMismatch {
                    expected: shape.to_vec(),
                    got: values.shape().to_vec(),
                    message: "参数的显式初始值与参数形状不一致".to_string(),
                });
            }
        }
        let mut g = self.inner.borrow_mut();
        let node_id = g.new_parameter_node(shape, name)?;
        let init_data = match g.rng.as_mut() {
            Some(rng) => init.generate_with_rng(shape, rng),
            None => init.generate(shape),
        };
        g.set_node_value(node_id, Some(&init_data))?;
        Ok(Var::new(node_id, Rc::clone(&self.inner)))
    }

    /// 创建正态分布随机节点（每次前向传播重新采样）
    pub fn random_normal(
        &self,
        shape: &[usize],
        mean: f32,
        std_dev: f32,
        name: Option<&str>,
    ) -> Result<Var, GraphError> {
        let node_id = self
            .inner
            .borrow_mut()
            .new_random_normal_node(shape, mean, std_dev, name)?;
        Ok(Var::new(node_id, Rc::clone(&self.inner)))
    }

    /// 创建`[min, max)`均匀分布随机节点（每次前向传播重新采样）
    pub fn random_uniform(
        &self,
        shape: &[usize],
        min: f32,
        max: f32,
        name: Option<&str>,
    ) -> Result<Var, GraphError> {
        let node_id = self
            .inner
            .borrow_mut()
            .new_random_uniform_node(shape, min, max, name)?;
        Ok(Var::new(node_id, Rc::clone(&self.inner)))
    }

    // ==================== 执行 ====================

    /// 前向传播
    pub fn forward(&self, output: &Var) -> Result<(), GraphError> {
        self.inner.borrow_mut().forward(output.node_id())
    }

    /// 反向传播
    pub fn backward(&self, loss: &Var) -> Result<f32, GraphError> {
        loss.backward()
    }

    /// 清零所有节点的梯度
    pub fn zero_grad(&self) {
        self.inner.borrow_mut().zero_grad();
    }

    /// 所有可训练参数（按创建顺序）
    pub fn trainable_parameters(&self) -> Vec<Var> {
        let ids = self.inner.borrow().get_trainable_nodes();
        ids.into_iter().map(|id| self.wrap_node_id(id)).collect()
    }
}

impl Default for Graph {
    fn default() -> Self {
        Self::new()
    }
}
