/*
 * @Author       : 老董
 * @Date         : 2026-01-09
 * @Description  : Var 形状变换扩展 trait
 */

use crate::nn::{GraphError, Var};

/// 形状变换扩展 trait
///
/// # 使用示例
/// ```ignore
/// use deepomics::nn::{Var, VarShapeOps};
///
/// let flat = x.flatten()?;                  // [batch, 4, 5] -> [batch, 20]
/// let back = flat.reshape(&[batch, 4, 5])?;
/// let joined = a.concat(&[&b])?;            // 按列拼接
/// ```
pub trait VarShapeOps {
    /// 改变形状，元素总数须不变
    fn reshape(&self, shape: &[usize]) -> Result<Var, GraphError>;

    /// 保留第0维（batch），其余维度展平：`[b, d1, d2, ...] -> [b, d1*d2*...]`
    fn flatten(&self) -> Result<Var, GraphError>;

    /// 与`others`按列（axis=1）拼接，所有矩阵的行数须相同
    fn concat(&self, others: &[&Var]) -> Result<Var, GraphError>;
}

impl VarShapeOps for Var {
    fn reshape(&self, shape: &[usize]) -> Result<Var, GraphError> {
        self.build(|g| g.new_reshape_node(self.node_id(), shape, None))
    }

    fn flatten(&self) -> Result<Var, GraphError> {
        let shape = self.value_expected_shape();
        let Some((&batch, rest)) = shape.split_first() else {
            return Err(GraphError::InvalidOperation("无法展平0维的节点".to_string()));
        };
        let features = rest.iter().product::<usize>();
        self.reshape(&[batch, features])
    }

    fn concat(&self, others: &[&Var]) -> Result<Var, GraphError> {
        if others.iter().any(|other| !self.same_graph(other)) {
            return Err(GraphError::InvalidOperation(
                "不能拼接来自不同 Graph 的 Var".to_string(),
            ));
        }
        let mut parents = vec![self.node_id()];
        parents.extend(others.iter().map(|other| other.node_id()));
        self.build(|g| g.new_concat_node(&parents, None))
    }
}
