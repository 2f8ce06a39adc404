/*
 * @Author       : 老董
 * @Date         : 2026-01-27
 * @Description  : GraphInner VJP 反向传播
 */

use super::super::error::GraphError;
use super::GraphInner;
use crate::nn::nodes::NodeKind;
use crate::nn::NodeId;
use crate::tensor::Tensor;
use log::warn;
use std::collections::HashSet;

impl GraphInner {
    // ========== VJP 反向传播核心 ==========

    /// 反向传播，返回损失的标量值。结束后会释放中间节点的值
    pub fn backward(&mut self, loss: NodeId) -> Result<f32, GraphError> {
        self.backward_ex(loss, false)
    }

    /// 反向传播（扩展版本）：`retain_graph`为真时保留中间节点的值与梯度
    pub fn backward_ex(&mut self, loss: NodeId, retain_graph: bool) -> Result<f32, GraphError> {
        let loss_node = self.get_node(loss)?;
        let loss_value = loss_node.value().ok_or_else(|| {
            GraphError::ComputationError(format!("损失{loss_node}没有值，请先执行 forward"))
        })?;

        if loss_value.shape() != &[1, 1] {
            return Err(GraphError::InvalidOperation(format!(
                "反向传播要求损失为标量 [1, 1]，但得到 {:?}",
                loss_value.shape()
            )));
        }
        let loss_scalar = loss_value.get_data_number().ok_or_else(|| {
            GraphError::ComputationError(format!(
                "无法从损失节点获取标量值，形状: {:?}",
                loss_value.shape()
            ))
        })?;

        if self.get_trainable_nodes().is_empty() {
            warn!("图{}中没有可训练的参数，反向传播不会产生任何参数梯度", self.name);
        }

        self.backward_vjp_core(loss)?;

        if !retain_graph {
            self.release_intermediate_results();
        }

        Ok(loss_scalar)
    }

    fn backward_vjp_core(&mut self, loss_id: NodeId) -> Result<(), GraphError> {
        self.reset_intermediate_grad();

        self.get_node_mut(loss_id)?
            .set_grad(Some(&Tensor::ones(&[1, 1])));

        for node_id in self.topological_sort_backward(loss_id)? {
            self.propagate_grad_to_parents(node_id)?;
        }
        Ok(())
    }

    /// 将梯度从当前节点传播到其父节点
    fn propagate_grad_to_parents(&mut self, node_id: NodeId) -> Result<(), GraphError> {
        let parent_ids = self.get_node_parents(node_id)?;
        let parent_grads: Vec<(NodeId, Tensor)> = {
            let node = self.get_node(node_id)?;
            if node.is_detached() || node.grad().is_none() || parent_ids.is_empty() {
                return Ok(());
            }
            let parent_values = self.collect_values(&parent_ids, node)?;

            let mut grads = Vec::with_capacity(parent_ids.len());
            // 按位置遍历：同一父节点出现多次时（如 x * x），梯度分别计算后累加
            for (index, parent_id) in parent_ids.iter().enumerate() {
                let parent = self.get_node(*parent_id)?;
                if !Self::can_receive_grad(parent.kind()) || parent.is_detached() {
                    continue;
                }
                let parent_grad = node.calc_grad_to_parent(index, &parent_values)?;
                grads.push((*parent_id, parent_grad));
            }
            grads
        };

        for (parent_id, parent_grad) in parent_grads {
            self.get_node_mut(parent_id)?.accumulate_grad(&parent_grad);
        }

        Ok(())
    }

    const fn can_receive_grad(kind: NodeKind) -> bool {
        matches!(kind, NodeKind::Parameter | NodeKind::Operator)
    }

    /// 反向拓扑排序：保证每个节点在其所有子节点（在损失的祖先范围内）之后才被处理，
    /// 从而在向父节点传播前，本节点的梯度已累加完整
    fn topological_sort_backward(&self, loss_id: NodeId) -> Result<Vec<NodeId>, GraphError> {
        fn post_order(
            graph: &GraphInner,
            node_id: NodeId,
            visited: &mut HashSet<NodeId>,
            result: &mut Vec<NodeId>,
        ) -> Result<(), GraphError> {
            if !visited.insert(node_id) {
                return Ok(());
            }
            for parent_id in graph.get_node_parents(node_id)? {
                post_order(graph, parent_id, visited, result)?;
            }
            result.push(node_id);
            Ok(())
        }

        let mut result = Vec::new();
        post_order(self, loss_id, &mut HashSet::new(), &mut result)?;
        result.reverse();
        Ok(result)
    }

    /// 重置参数以外节点的梯度（参数梯度由`zero_grad`显式清零，可跨多次反向传播累加）
    fn reset_intermediate_grad(&mut self) {
        for node in self.nodes.values_mut() {
            if node.kind() != NodeKind::Parameter {
                node.clear_grad();
            }
        }
    }

    /// 清除所有节点的梯度
    pub fn clear_grad(&mut self) {
        for node in self.nodes.values_mut() {
            node.clear_grad();
        }
    }

    /// 清除单个节点的梯度
    pub fn clear_node_grad(&mut self, node_id: NodeId) -> Result<(), GraphError> {
        self.get_node_mut(node_id)?.clear_grad();
        Ok(())
    }

    /// 清零梯度（PyTorch 风格）
    pub fn zero_grad(&mut self) {
        self.clear_grad();
    }
}
