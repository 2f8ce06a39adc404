/*
 * @Author       : 老董
 * @Date         : 2026-02-03
 * @Description  : GraphInner 参数节点的训练/正则化标记
 *
 * 标记只影响之后的参数收集（优化器、正则化项），不改变已构建的节点。
 */

use super::super::error::GraphError;
use super::GraphInner;
use crate::nn::nodes::{NodeHandle, ParamFlags};
use crate::nn::NodeId;

impl GraphInner {
    fn param_flags(&self, node_id: NodeId) -> Result<&ParamFlags, GraphError> {
        let node = self.get_node(node_id)?;
        node.param_flags().ok_or_else(|| not_a_parameter(node))
    }

    fn param_flags_mut(&mut self, node_id: NodeId) -> Result<&mut ParamFlags, GraphError> {
        let node = self.get_node_mut(node_id)?;
        if node.param_flags().is_none() {
            return Err(not_a_parameter(node));
        }
        node.param_flags_mut()
            .ok_or(GraphError::NodeNotFound(node_id))
    }

    pub fn is_param_trainable(&self, node_id: NodeId) -> Result<bool, GraphError> {
        Ok(self.param_flags(node_id)?.trainable)
    }

    pub fn set_param_trainable(&mut self, node_id: NodeId, trainable: bool) -> Result<(), GraphError> {
        self.param_flags_mut(node_id)?.trainable = trainable;
        Ok(())
    }

    pub fn is_param_l1_regularize(&self, node_id: NodeId) -> Result<bool, GraphError> {
        Ok(self.param_flags(node_id)?.l1_regularize)
    }

    pub fn set_param_l1_regularize(&mut self, node_id: NodeId, flag: bool) -> Result<(), GraphError> {
        self.param_flags_mut(node_id)?.l1_regularize = flag;
        Ok(())
    }

    pub fn is_param_l2_regularize(&self, node_id: NodeId) -> Result<bool, GraphError> {
        Ok(self.param_flags(node_id)?.l2_regularize)
    }

    pub fn set_param_l2_regularize(&mut self, node_id: NodeId, flag: bool) -> Result<(), GraphError> {
        self.param_flags_mut(node_id)?.l2_regularize = flag;
        Ok(())
    }
}

fn not_a_parameter(node: &NodeHandle) -> GraphError {
    GraphError::InvalidOperation(format!("{node}不是参数节点，没有训练/正则化标记"))
}
