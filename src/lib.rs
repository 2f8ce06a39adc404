//! # Deepomics
//!
//! `deepomics`在一个轻量的自研计算图（支持自动微分）之上，提供神经网络层的统一封装
//! （全连接、随机全连接、Dropout、高斯噪声、变分采样、Gumbel-Softmax类别采样），
//! 以及按配置构建优化器与损失函数（含变分下界）的辅助工具。
//!

pub mod errors;
pub mod nn;
pub mod tensor;
pub mod utils;
