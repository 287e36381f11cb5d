//! 批次模型
//!
//! 页面上批次状态的唯一翻译点，以及按描述/状态选择批次行

use serde::{Deserialize, Serialize};

use crate::error::{AppResult, AssertionError};
use crate::infrastructure::TableRow;

/// 找不到时允许跳过的批次描述
pub const OPTIONAL_BATCH_DESCRIPTIONS: &[&str] = &["Pre-invitation (FIT) (digital leaflet)"];

/// 页面上观察到的批次状态
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BatchState {
    Open,
    Prepared,
    Retrieved,
    Archived,
    Unknown(String),
}

impl BatchState {
    /// 从表格单元格文本解析状态
    pub fn from_cell(text: &str) -> Self {
        let text = text.trim();
        if text.contains("Prepared") {
            BatchState::Prepared
        } else if text.contains("Open") {
            BatchState::Open
        } else if text.contains("Retrieved") {
            BatchState::Retrieved
        } else if text.contains("Archived") {
            BatchState::Archived
        } else {
            BatchState::Unknown(text.to_string())
        }
    }

    /// 是否可以继续打印/归档
    pub fn is_actionable(&self) -> bool {
        matches!(self, BatchState::Open | BatchState::Prepared)
    }
}

/// 批次列表中的一行
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchRow {
    /// 每个单元格的可见文本
    pub cells: Vec<String>,
    /// 行内第一个链接的文本（批次 ID）
    #[serde(default)]
    pub link_text: Option<String>,
}

impl BatchRow {
    pub fn has_description(&self, description: &str) -> bool {
        self.cells.iter().any(|c| c.trim() == description)
    }

    /// 行内第一个可识别的状态
    pub fn state(&self) -> Option<BatchState> {
        self.cells
            .iter()
            .map(|c| BatchState::from_cell(c))
            .find(|s| !matches!(s, BatchState::Unknown(_)))
    }

    pub fn is_actionable(&self) -> bool {
        self.cells.iter().any(|c| BatchState::from_cell(c).is_actionable())
    }
}

impl From<TableRow> for BatchRow {
    fn from(row: TableRow) -> Self {
        Self {
            cells: row.cells,
            link_text: row.link_text,
        }
    }
}

/// 批次选择结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BatchSelection {
    /// 找到可处理的批次
    Found { batch_id: String, row: BatchRow },
    /// 可选批次不存在，直接跳过
    SkippedOptional,
}

pub fn is_optional_description(description: &str) -> bool {
    OPTIONAL_BATCH_DESCRIPTIONS.contains(&description)
}

/// 选择第一个描述匹配且状态为 Prepared/Open 的行
pub fn select_batch_row(
    rows: &[BatchRow],
    batch_type: &str,
    description: &str,
) -> AppResult<BatchSelection> {
    let Some(row) = rows
        .iter()
        .find(|r| r.has_description(description) && r.is_actionable())
    else {
        if is_optional_description(description) {
            return Ok(BatchSelection::SkippedOptional);
        }
        return Err(AssertionError::BatchNotFound {
            batch_type: batch_type.to_string(),
            description: description.to_string(),
        }
        .into());
    };

    let batch_id = row
        .link_text
        .as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or_else(|| AssertionError::BatchLinkMissing {
            description: description.to_string(),
        })?;

    Ok(BatchSelection::Found {
        batch_id: batch_id.to_string(),
        row: row.clone(),
    })
}
