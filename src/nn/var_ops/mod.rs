/*
 * @Author       : 老董
 * @Date         : 2026-01-09
 * @Description  : Var 扩展 trait 模块
 *
 * 按功能领域组织 Var 的扩展方法，用户按需 import。
 *
 * # 模块结构
 * - `activation`: 激活函数（sigmoid, relu, softmax, one_hot_max）
 * - `math`: 逐元素数学运算（scale, shift, exp, ln, sqrt, abs, square, clip）
 * - `matrix`: 矩阵运算（matmul）
 * - `random`: 随机运算（dropout, random_normal_like）
 * - `reduce`: 归约（sum, sum_axis, mean）
 * - `shape`: 形状变换（reshape, flatten, concat）
 *
 * # 使用示例
 * ```ignore
 * use deepomics::nn::{VarActivationOps, VarMathOps, VarMatrixOps, VarReduceOps};
 *
 * let h = x.matmul(&w)?.relu()?;
 * let probs = h.softmax()?;
 * let loss = probs.clip(1e-7, 1.0)?.ln()?.mean()?;
 * ```
 */

mod activation;
mod math;
mod matrix;
mod random;
mod reduce;
mod shape;

pub use activation::VarActivationOps;
pub use math::VarMathOps;
pub use matrix::VarMatrixOps;
pub use random::VarRandomOps;
pub use reduce::VarReduceOps;
pub use shape::VarShapeOps;
