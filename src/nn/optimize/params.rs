/*
 * @Author       : 老董
 * @Date         : 2026-02-07
 * @Description  : 按标记收集网络中的参数
 */

use crate::nn::layer::{Network, TraitLayer, TraitParamLayer};
use crate::nn::{GraphError, Var, VarShapeOps};

/// 遍历网络中带参数的层，收集`flag`为真的层的全部参数
fn collect_parameters<F>(network: &Network, flag: F) -> Result<Vec<Var>, GraphError>
where
    F: Fn(&dyn TraitParamLayer) -> Result<bool, GraphError>,
{
    let mut params = Vec::new();
    for (_, layer) in network.iter() {
        if let Some(param_layer) = layer.as_param_layer() {
            if flag(param_layer)? {
                params.extend(param_layer.get_variable(false));
            }
        }
    }
    Ok(params)
}

/// 参与 L1 正则化的参数，展平拼接为`[1, N]`；没有时为`None`
pub fn get_l1_parameters(network: &Network) -> Result<Option<Var>, GraphError> {
    merge_parameters(&collect_parameters(network, |layer| layer.is_l1_regularize())?)
}

/// 参与 L2 正则化的参数，展平拼接为`[1, N]`；没有时为`None`
pub fn get_l2_parameters(network: &Network) -> Result<Option<Var>, GraphError> {
    merge_parameters(&collect_parameters(network, |layer| layer.is_l2_regularize())?)
}

/// 可训练层的参数（按层名顺序）
pub fn get_trainable_parameters(network: &Network) -> Result<Vec<Var>, GraphError> {
    collect_parameters(network, |layer| layer.is_trainable())
}

/// 将各参数展平为`[1, n_i]`后按列拼接为`[1, Σn_i]`
pub fn merge_parameters(params: &[Var]) -> Result<Option<Var>, GraphError> {
    let flattened = params
        .iter()
        .map(|param| {
            let size = param.value_expected_shape().iter().product::<usize>();
            param.reshape(&[1, size])
        })
        .collect::<Result<Vec<_>, _>>()?;

    let Some((first, rest)) = flattened.split_first() else {
        return Ok(None);
    };
    if rest.is_empty() {
        return Ok(Some(first.clone()));
    }
    let rest = rest.iter().collect::<Vec<_>>();
    Ok(Some(first.concat(&rest)?))
}
