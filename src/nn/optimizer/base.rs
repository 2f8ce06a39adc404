/*
 * @Author       : 老董
 * @Date         : 2025-07-24 16:00:00
 * @LastEditors  : 老董
 * @LastEditTime : 2026-02-05
 * @Description  : 优化器的公共配置
 */

/// 所有优化器共有的配置：名称、学习率、是否加锁
///
/// 计算图是单线程的，`use_locking`仅被记录，不影响更新过程。
#[derive(Debug, Clone, PartialEq)]
pub struct OptimizerBase {
    name: String,
    learning_rate: f32,
    use_locking: bool,
}

impl OptimizerBase {
    pub fn new(name: &str, learning_rate: f32, use_locking: bool) -> Self {
        Self {
            name: name.to_string(),
            learning_rate,
            use_locking,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub const fn learning_rate(&self) -> f32 {
        self.learning_rate
    }

    pub const fn set_learning_rate(&mut self, lr: f32) {
        self.learning_rate = lr;
    }

    pub const fn use_locking(&self) -> bool {
        self.use_locking
    }
}
