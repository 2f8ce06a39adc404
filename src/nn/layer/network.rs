/*
 * @Author       : 老董
 * @Date         : 2026-02-06
 * @Description  : 网络（按名称索引的层集合）与外部占位符
 */

use super::{LayerEnum, TraitLayer};
use crate::nn::Var;
use std::collections::BTreeMap;

/// 按名称索引的层集合，遍历顺序为名称的字典序
///
/// 损失构建依赖约定的层名：普通目标读取`output`层；
/// 变分下界读取`X`、`encode_mu`、`encode_logsigma`层。
#[derive(Debug, Clone, Default)]
pub struct Network {
    layers: BTreeMap<String, LayerEnum>,
}

impl Network {
    pub fn new() -> Self {
        Self::default()
    }

    /// 插入层，同名的旧层被替换并返回
    pub fn insert(&mut self, name: &str, layer: impl Into<LayerEnum>) -> Option<LayerEnum> {
        self.layers.insert(name.to_string(), layer.into())
    }

    pub fn get(&self, name: &str) -> Option<&LayerEnum> {
        self.layers.get(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &LayerEnum)> {
        self.layers.iter().map(|(name, layer)| (name.as_str(), layer))
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    /// 名为`output`的层
    pub fn output(&self) -> Option<&LayerEnum> {
        self.get("output")
    }

    /// 所有层的输出形状，便于打印网络结构
    pub fn summary(&self) -> Vec<(String, Vec<usize>)> {
        self.iter()
            .map(|(name, layer)| (name.to_string(), layer.get_output_shape()))
            .collect()
    }
}

/// 外部占位符：输入与目标节点
#[derive(Debug, Clone, Default)]
pub struct Placeholders {
    pub inputs: Option<Var>,
    pub targets: Option<Var>,
}

impl Placeholders {
    pub fn new(inputs: &Var, targets: &Var) -> Self {
        Self {
            inputs: Some(inputs.clone()),
            targets: Some(targets.clone()),
        }
    }
}
