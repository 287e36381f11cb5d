//! 批次处理上下文
//!
//! 封装"我正在处理哪个场景的第几步、哪个批次"这一信息

use std::fmt::Display;

/// 批次处理上下文
#[derive(Debug, Clone)]
pub struct BatchCtx {
    /// 场景名称
    pub scenario: String,

    /// 步骤在场景中的索引（从1开始）
    pub step_index: usize,

    /// 事件代码
    pub batch_type: String,

    /// 批次描述
    pub description: String,
}

impl BatchCtx {
    pub fn new(
        scenario: impl Into<String>,
        step_index: usize,
        batch_type: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            scenario: scenario.into(),
            step_index,
            batch_type: batch_type.into(),
            description: description.into(),
        }
    }
}

impl Display for BatchCtx {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[{} 步骤#{} {} {}]",
            self.scenario, self.step_index, self.batch_type, self.description
        )
    }
}
