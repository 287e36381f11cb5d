//! UI 驱动接口
//!
//! 页面对象和流程只通过这个 trait 操作浏览器，测试中可以替换为内存实现

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tokio::time::{sleep, Instant};

use crate::error::AppResult;

/// 表单控件类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    Input,
    Select,
    Checkbox,
    Radio,
}

impl FieldKind {
    pub fn as_str(self) -> &'static str {
        match self {
            FieldKind::Input => "input",
            FieldKind::Select => "select",
            FieldKind::Checkbox => "checkbox",
            FieldKind::Radio => "radio",
        }
    }
}

/// 表格中的一行
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableRow {
    pub cells: Vec<String>,
    #[serde(default)]
    pub link_text: Option<String>,
}

/// 浏览器操作能力
///
/// 所有选择器都是 CSS 选择器；找不到元素时返回 `AssertionError::ElementNotFound`
#[allow(async_fn_in_trait)]
pub trait UiDriver {
    /// 打开 URL
    async fn goto(&self, url: &str) -> AppResult<()>;

    /// 点击元素，失败后重新查找并重试一次
    async fn click(&self, selector: &str) -> AppResult<()>;

    /// 点击第 `index` 个匹配元素（从 0 开始）
    async fn click_nth(&self, selector: &str, index: usize) -> AppResult<()>;

    /// 按可见文本点击链接或按钮
    async fn click_text(&self, text: &str) -> AppResult<()>;

    async fn fill(&self, selector: &str, value: &str) -> AppResult<()>;

    /// 按 value 或显示文本选择下拉项
    async fn select_option(&self, selector: &str, value: &str) -> AppResult<()>;

    /// 按标签文本定位控件并赋值
    async fn fill_labelled(&self, label: &str, kind: FieldKind, value: &str) -> AppResult<()>;

    /// 按标签文本读取控件的值，或同一行中标签后单元格的文本
    async fn read_labelled(&self, label: &str) -> AppResult<String>;

    async fn text_content(&self, selector: &str) -> AppResult<String>;

    async fn page_text(&self) -> AppResult<String>;

    async fn is_visible(&self, selector: &str) -> AppResult<bool>;

    async fn count(&self, selector: &str) -> AppResult<usize>;

    /// 读取表格 `tbody` 中的所有行
    async fn table_rows(&self, table_selector: &str) -> AppResult<Vec<TableRow>>;

    /// 自动接受之后出现的 confirm/alert 对话框
    async fn accept_dialogs(&self) -> AppResult<()>;

    /// 把下载写入指定目录
    async fn enable_downloads(&self, dir: &Path) -> AppResult<()>;

    /// 等待元素可见，超时返回 false
    async fn wait_for_visible(&self, selector: &str, timeout: Duration) -> AppResult<bool> {
        let deadline = Instant::now() + timeout;
        loop {
            if self.is_visible(selector).await? {
                return Ok(true);
            }
            if Instant::now() >= deadline {
                return Ok(false);
            }
            sleep(Duration::from_millis(250)).await;
        }
    }
}
