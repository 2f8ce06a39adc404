/*
 * @Author       : 老董
 * @Date         : 2024-02-04 20:37:13
 * @Description  : 神经网络节点的显示格式化
 */

use super::NodeId;

/// 格式化神经网络节点的显示，格式为：`节点[id={}, name={}, type={}]`
pub(in crate::nn) fn format_node_display(id: NodeId, name: &str, type_name: &str) -> String {
    format!("节点[id={}, name={}, type={}]", id.0, name, type_name)
}
