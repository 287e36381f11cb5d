//! 页面对象层
//!
//! 每个页面只是选择器常量与动作方法的一一映射，不包含流程判断。
//! 数据集表单统一走 [`DatasetFieldUtil`]，按 (标签, 控件类型) 定位。

pub mod batch_list_page;
pub mod generate_invitations_page;
pub mod login_page;
pub mod manage_batch_page;
pub mod navigation;
pub mod subject_search_page;
pub mod subject_summary_page;

pub use batch_list_page::{ActiveBatchListPage, ArchivedBatchListPage};
pub use generate_invitations_page::GenerateInvitationsPage;
pub use login_page::LoginPage;
pub use manage_batch_page::ManageBatchPage;
pub use navigation::MainMenu;
pub use subject_search_page::SubjectSearchPage;
pub use subject_summary_page::SubjectSummaryPage;

use crate::error::{AppResult, AssertionError};
use crate::infrastructure::{FieldKind, UiDriver};
use crate::models::DatasetEntry;

/// 按标签定位的表单字段
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormField {
    pub label: &'static str,
    pub kind: FieldKind,
}

impl FormField {
    pub const fn new(label: &'static str, kind: FieldKind) -> Self {
        Self { label, kind }
    }

    pub const fn input(label: &'static str) -> Self {
        Self::new(label, FieldKind::Input)
    }

    pub const fn select(label: &'static str) -> Self {
        Self::new(label, FieldKind::Select)
    }

    pub const fn checkbox(label: &'static str) -> Self {
        Self::new(label, FieldKind::Checkbox)
    }
}

/// 通用数据集字段填写工具
pub struct DatasetFieldUtil<'a, D: UiDriver> {
    driver: &'a D,
}

impl<'a, D: UiDriver> DatasetFieldUtil<'a, D> {
    pub fn new(driver: &'a D) -> Self {
        Self { driver }
    }

    pub async fn fill(&self, field: FormField, value: &str) -> AppResult<()> {
        tracing::debug!("填写字段 '{}' ({:?}) = {}", field.label, field.kind, value);
        self.driver.fill_labelled(field.label, field.kind, value).await
    }

    /// 填写场景文件中描述的字段，带选项表的值先翻译为代码
    pub async fn fill_entry(&self, entry: &DatasetEntry) -> AppResult<()> {
        let value = match entry.table {
            Some(table) => table
                .resolve(&entry.value)
                .ok_or_else(|| AssertionError::UnknownOption {
                    table: format!("{:?}", table),
                    label: entry.value.clone(),
                })?
                .to_string(),
            None => entry.value.clone(),
        };
        self.driver
            .fill_labelled(&entry.label, entry.kind, &value)
            .await
    }

    /// 依次填写多个字段，遇到第一个失败即返回
    pub async fn fill_all(&self, values: &[(FormField, &str)]) -> AppResult<()> {
        for (field, value) in values {
            self.fill(*field, value).await?;
        }
        Ok(())
    }
}
