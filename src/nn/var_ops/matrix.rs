/*
 * @Author       : 老董
 * @Date         : 2026-01-09
 * @Description  : Var 矩阵运算扩展 trait
 */

use crate::nn::{GraphError, Var};

/// 矩阵运算扩展 trait
///
/// # 使用示例
/// ```ignore
/// use deepomics::nn::{Var, VarMatrixOps};
///
/// let y = x.matmul(&w)?;  // [batch, in] @ [in, out] = [batch, out]
/// ```
pub trait VarMatrixOps {
    /// 矩阵乘法：`[m, n] @ [n, p] = [m, p]`
    fn matmul(&self, other: &Var) -> Result<Var, GraphError>;
}

impl VarMatrixOps for Var {
    fn matmul(&self, other: &Var) -> Result<Var, GraphError> {
        if !self.same_graph(other) {
            return Err(GraphError::InvalidOperation(
                "不能对来自不同 Graph 的 Var 进行矩阵乘法".to_string(),
            ));
        }
        self.build(|g| g.new_mat_mul_node(self.node_id(), other.node_id(), None))
    }
}
