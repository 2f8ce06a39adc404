/*
 * @Author       : 老董
 * @Description  : 计算图节点：`NodeHandle`（节点的通用状态）+ `raw_node`（各类节点的具体运算）
 */

mod node_handle;
pub(in crate::nn) mod raw_node;

pub(in crate::nn) use node_handle::NodeHandle;
pub use node_handle::NodeId;
pub(in crate::nn) use raw_node::{NodeKind, NodeType, ParamFlags};
