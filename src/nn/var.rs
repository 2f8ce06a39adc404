/*
 * @Author       : 老董
 * @Date         : 2026-01-08
 * @Description  : Var - 变量句柄，支持算子重载和链式调用
 */

use super::graph::{Graph, GraphInner};
use super::{GraphError, NodeId};
use crate::tensor::Tensor;
use rand::Rng;
use std::cell::RefCell;
use std::ops::{Add, Div, Mul, Neg, Sub};
use std::rc::Rc;

// ==================== Init 枚举 ====================

/// 参数初始化策略
///
/// 其中`fan_in`取形状的第0维（对于`[in, out]`的权重即输入宽度），`fan_out`取第1维。
#[derive(Debug, Clone)]
pub enum Init {
    /// 常数初始化
    Constant(f32),
    /// 全零
    Zeros,
    /// 全一
    Ones,
    /// 正态分布
    Normal { mean: f32, std: f32 },
    /// `[min, max)`上的均匀分布
    Uniform { min: f32, max: f32 },
    /// He 均匀分布：`U(-limit, limit)`，`limit = sqrt(6 / fan_in)`（适用于 `ReLU`）
    HeUniform,
    /// He 正态分布：`N(0, 2 / fan_in)`
    HeNormal,
    /// Xavier/Glorot 初始化：`N(0, 2 / (fan_in + fan_out))`（适用于 Sigmoid/Tanh）
    Xavier,
    /// 显式给定初始值，形状须与参数一致
    Values(Tensor),
}

impl Init {
    /// 生成初始化后的 Tensor（使用线程级 RNG）
    pub fn generate(&self, shape: &[usize]) -> Tensor {
        self.generate_with_rng(shape, &mut rand::thread_rng())
    }

    /// 生成初始化后的 Tensor（使用指定的 RNG）
    pub fn generate_with_rng<R: Rng + ?Sized>(&self, shape: &[usize], rng: &mut R) -> Tensor {
        let fan_in = shape.first().copied().unwrap_or(1).max(1) as f32;
        let fan_out = shape.get(1).copied().unwrap_or(1) as f32;
        match self {
            Self::Constant(v) => Tensor::full(*v, shape),
            Self::Zeros => Tensor::zeros(shape),
            Self::Ones => Tensor::ones(shape),
            Self::Normal { mean, std } => Tensor::normal_with_rng(*mean, *std, shape, rng),
            Self::Uniform { min, max } => Tensor::uniform_with_rng(*min, *max, shape, rng),
            Self::HeUniform => {
                let limit = (6.0 / fan_in).sqrt();
                Tensor::uniform_with_rng(-limit, limit, shape, rng)
            }
            Self::HeNormal => Tensor::normal_with_rng(0.0, (2.0 / fan_in).sqrt(), shape, rng),
            Self::Xavier => {
                let std = (2.0 / (fan_in + fan_out)).sqrt();
                Tensor::normal_with_rng(0.0, std, shape, rng)
            }
            Self::Values(values) => values.clone(),
        }
    }
}

// ==================== Var 结构 ====================

/// 变量句柄 - 携带图引用，支持算子重载和链式调用
///
/// # 设计原则
/// - 持有 `Rc<RefCell<GraphInner>>` 引用，实现算子重载
/// - Clone 语义（非 Copy），但开销极低（Rc clone）
///
/// # 使用示例
/// ```ignore
/// let graph = Graph::new();
/// let x = graph.input(&images)?;      // 返回 Var
/// let h = x.matmul(&w)?.relu()?;      // 链式调用
/// let z = &h + &b;                    // 算子重载
/// loss.backward()?;                   // 直接在 Var 上调用
/// ```
#[derive(Clone)]
pub struct Var {
    /// 节点 ID
    id: NodeId,
    /// 图引用（用户不可见）
    graph: Rc<RefCell<GraphInner>>,
}

impl std::fmt::Debug for Var {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Var").field("id", &self.id).finish()
    }
}

impl Var {
    /// 创建新的 Var（内部使用）
    pub(crate) const fn new(id: NodeId, graph: Rc<RefCell<GraphInner>>) -> Self {
        Self { id, graph }
    }

    /// 获取节点 ID
    pub const fn node_id(&self) -> NodeId {
        self.id
    }

    /// 检查两个 Var 是否来自同一个 Graph
    pub fn same_graph(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.graph, &other.graph)
    }

    /// 获取 Var 所属的 Graph handle
    pub fn get_graph(&self) -> Graph {
        Graph::from_rc(Rc::clone(&self.graph))
    }

    /// 用同一个图包装另一个节点
    pub(crate) fn wrap(&self, id: NodeId) -> Self {
        Self::new(id, Rc::clone(&self.graph))
    }

    /// 在本图上新建节点并包装成 Var
    pub(crate) fn build<F>(&self, builder: F) -> Result<Self, GraphError>
    where
        F: FnOnce(&mut GraphInner) -> Result<NodeId, GraphError>,
    {
        let id = builder(&mut self.graph.borrow_mut())?;
        Ok(self.wrap(id))
    }

    /// 节点名称
    pub fn name(&self) -> String {
        self.graph
            .borrow()
            .get_node_name(self.id)
            .map(str::to_string)
            .unwrap_or_default()
    }

    /// 获取节点的预期输出形状（节点创建时即已确定）
    pub fn value_expected_shape(&self) -> Vec<usize> {
        self.graph
            .borrow()
            .get_node_value_expected_shape(self.id)
            .map(<[usize]>::to_vec)
            .unwrap_or_default()
    }

    // ==================== 梯度流控制 ====================

    /// 截断梯度流：返回一个值与本节点相同、但不向本节点回传梯度的新 Var
    pub fn stop_gradient(&self) -> Result<Self, GraphError> {
        let stopped = self.build(|g| g.new_identity_node(self.id, None))?;
        self.graph.borrow_mut().detach_node(stopped.id)?;
        Ok(stopped)
    }

    // ==================== 执行 ====================

    /// 前向传播
    pub fn forward(&self) -> Result<(), GraphError> {
        self.graph.borrow_mut().forward(self.id)
    }

    /// 反向传播（ensure-forward 语义）
    ///
    /// 自动先执行 forward()，确保 loss 值已计算，然后执行反向传播。
    /// 返回 loss 的标量值。
    pub fn backward(&self) -> Result<f32, GraphError> {
        let mut g = self.graph.borrow_mut();
        g.forward(self.id)?;
        g.backward(self.id)
    }

    // ==================== 值访问和设置 ====================

    /// 获取节点的值（克隆的 Tensor）
    pub fn value(&self) -> Result<Option<Tensor>, GraphError> {
        Ok(self.graph.borrow().get_node_value(self.id)?.cloned())
    }

    /// 设置节点的值（仅输入/参数节点）
    pub fn set_value(&self, value: &Tensor) -> Result<(), GraphError> {
        self.graph.borrow_mut().set_node_value(self.id, Some(value))
    }

    /// 获取标量值（假设是 1x1 Tensor）
    pub fn item(&self) -> Result<f32, GraphError> {
        let val = self.value()?.ok_or_else(|| {
            GraphError::ComputationError(format!("节点{:?}没有值，请先执行 forward", self.id))
        })?;
        val.get_data_number()
            .ok_or_else(|| GraphError::InvalidOperation("Tensor 不是标量".to_string()))
    }

    /// 获取节点的梯度
    pub fn grad(&self) -> Result<Option<Tensor>, GraphError> {
        self.graph.borrow().get_node_grad(self.id)
    }

    // ==================== 参数标记 ====================

    pub fn is_trainable(&self) -> Result<bool, GraphError> {
        self.graph.borrow().is_param_trainable(self.id)
    }

    pub fn set_trainable(&self, trainable: bool) -> Result<(), GraphError> {
        self.graph.borrow_mut().set_param_trainable(self.id, trainable)
    }

    pub fn is_l1_regularize(&self) -> Result<bool, GraphError> {
        self.graph.borrow().is_param_l1_regularize(self.id)
    }

    pub fn set_l1_regularize(&self, flag: bool) -> Result<(), GraphError> {
        self.graph.borrow_mut().set_param_l1_regularize(self.id, flag)
    }

    pub fn is_l2_regularize(&self) -> Result<bool, GraphError> {
        self.graph.borrow().is_param_l2_regularize(self.id)
    }

    pub fn set_l2_regularize(&self, flag: bool) -> Result<(), GraphError> {
        self.graph.borrow_mut().set_param_l2_regularize(self.id, flag)
    }

    // ==================== 安全版本（返回 Result）====================

    fn check_same_graph(&self, other: &Self, operation: &str) -> Result<(), GraphError> {
        if self.same_graph(other) {
            Ok(())
        } else {
            Err(GraphError::InvalidOperation(format!(
                "不能对来自不同 Graph 的 Var 进行{operation}"
            )))
        }
    }

    /// 安全的加法（返回 Result，支持广播）
    pub fn try_add(&self, other: &Self) -> Result<Self, GraphError> {
        self.check_same_graph(other, "加法")?;
        self.build(|g| g.new_add_node(&[self.id, other.id], None))
    }

    /// 安全的减法（返回 Result，支持广播）
    pub fn try_sub(&self, other: &Self) -> Result<Self, GraphError> {
        self.check_same_graph(other, "减法")?;
        self.build(|g| g.new_subtract_node(self.id, other.id, None))
    }

    /// 安全的元素级乘法（返回 Result，支持广播）
    pub fn try_mul(&self, other: &Self) -> Result<Self, GraphError> {
        self.check_same_graph(other, "乘法")?;
        self.build(|g| g.new_multiply_node(self.id, other.id, None))
    }

    /// 安全的元素级除法（返回 Result，支持广播）
    pub fn try_div(&self, other: &Self) -> Result<Self, GraphError> {
        self.check_same_graph(other, "除法")?;
        self.build(|g| g.new_divide_node(self.id, other.id, None))
    }
}

// ==================== 算子重载 ====================

/// 为`Var`的四种引用/所有权组合实现二元算子，失败时panic（需要错误处理请用`try_*`）
macro_rules! impl_var_operator {
    ($trait_name:ident, $method:ident, $try_method:ident, $fail_msg:literal) => {
        impl $trait_name for &Var {
            type Output = Var;

            fn $method(self, other: &Var) -> Var {
                self.$try_method(other).expect($fail_msg)
            }
        }

        impl $trait_name for Var {
            type Output = Self;

            fn $method(self, other: Self) -> Self {
                (&self).$method(&other)
            }
        }

        impl $trait_name<Var> for &Var {
            type Output = Var;

            fn $method(self, other: Var) -> Var {
                self.$method(&other)
            }
        }

        impl $trait_name<&Self> for Var {
            type Output = Self;

            fn $method(self, other: &Self) -> Self {
                (&self).$method(other)
            }
        }
    };
}

impl_var_operator!(Add, add, try_add, "Var 加法失败");
impl_var_operator!(Sub, sub, try_sub, "Var 减法失败");
impl_var_operator!(Mul, mul, try_mul, "Var 乘法失败");
impl_var_operator!(Div, div, try_div, "Var 除法失败");

// Neg for &Var（实现为 -1 * self）
impl Neg for &Var {
    type Output = Var;

    fn neg(self) -> Var {
        self.build(|g| g.new_scalar_multiply_node(self.id, -1.0, None))
            .expect("创建取反节点失败")
    }
}

impl Neg for Var {
    type Output = Self;

    fn neg(self) -> Self {
        -&self
    }
}
