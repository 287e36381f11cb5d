use serde::{Deserialize, Serialize};

use crate::infrastructure::FieldKind;
use crate::models::options::OptionTable;

/// 期望的最新事件状态
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ExpectedStatus {
    One(String),
    AnyOf(Vec<String>),
}

impl ExpectedStatus {
    pub fn matches(&self, actual: &str) -> bool {
        let actual = actual.trim();
        match self {
            ExpectedStatus::One(s) => s.trim() == actual,
            ExpectedStatus::AnyOf(list) => list.iter().any(|s| s.trim() == actual),
        }
    }

    pub fn as_list(&self) -> Vec<String> {
        match self {
            ExpectedStatus::One(s) => vec![s.clone()],
            ExpectedStatus::AnyOf(list) => list.clone(),
        }
    }
}

/// 一次批次处理请求
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchRequest {
    /// 事件代码，例如 "G1"、"X610"
    pub batch_type: String,
    /// 批次描述
    pub description: String,
    /// 为空时不校验受试者事件状态
    #[serde(default)]
    pub expected_status: Option<ExpectedStatus>,
}

impl BatchRequest {
    pub fn new(
        batch_type: impl Into<String>,
        description: impl Into<String>,
        expected_status: Option<ExpectedStatus>,
    ) -> Self {
        Self {
            batch_type: batch_type.into(),
            description: description.into(),
            expected_status,
        }
    }
}

/// 数据集表单中的一个字段
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetEntry {
    /// 控件旁的标签文本
    pub label: String,
    pub kind: FieldKind,
    pub value: String,
    /// 设置后 `value` 按显示名查表，写入的是代码
    #[serde(default)]
    pub table: Option<OptionTable>,
}

/// 场景步骤
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ScenarioStep {
    /// 处理一个信件批次
    Batch(BatchRequest),
    /// 生成邀请并等待完成
    GenerateInvitations {
        #[serde(default)]
        minimum: Option<u32>,
    },
    /// 依次点击菜单链接，填写表单后点击保存
    FillDataset {
        #[serde(default)]
        navigate: Vec<String>,
        fields: Vec<DatasetEntry>,
        #[serde(default)]
        save: Option<String>,
    },
}

/// 场景文件
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scenario {
    pub name: String,
    /// `users.json` 中的用户键
    pub user: String,
    #[serde(default)]
    pub steps: Vec<ScenarioStep>,
    #[serde(skip_serializing, skip_deserializing)]
    pub file_path: Option<String>,
}
