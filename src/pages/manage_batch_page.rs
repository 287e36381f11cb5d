use std::time::Duration;

use crate::error::AppResult;
use crate::infrastructure::UiDriver;

const PREPARE_BUTTON: &str = "input[value='Prepare Batch']";
const RETRIEVE_BUTTONS: &str = "input[value='Retrieve']";
const CONFIRM_BUTTONS: &str = "input[value='Confirm Printed']";

pub const ARCHIVED_MESSAGE: &str = "Batch Successfully Archived and Printed";

/// 批次管理页（准备 / 取回 / 确认打印）
pub struct ManageBatchPage<'a, D: UiDriver> {
    driver: &'a D,
}

impl<'a, D: UiDriver> ManageBatchPage<'a, D> {
    pub fn new(driver: &'a D) -> Self {
        Self { driver }
    }

    /// 批次已是 Prepared 状态时页面上没有准备按钮
    pub async fn has_prepare_button(&self) -> AppResult<bool> {
        self.driver.is_visible(PREPARE_BUTTON).await
    }

    pub async fn click_prepare_button(&self) -> AppResult<()> {
        self.driver.click(PREPARE_BUTTON).await
    }

    pub async fn wait_for_retrieve_buttons(&self, timeout: Duration) -> AppResult<bool> {
        self.driver.wait_for_visible(RETRIEVE_BUTTONS, timeout).await
    }

    pub async fn retrieve_button_count(&self) -> AppResult<usize> {
        self.driver.count(RETRIEVE_BUTTONS).await
    }

    pub async fn click_retrieve_button(&self, index: usize) -> AppResult<()> {
        self.driver.click_nth(RETRIEVE_BUTTONS, index).await
    }

    pub async fn confirm_button_count(&self) -> AppResult<usize> {
        self.driver.count(CONFIRM_BUTTONS).await
    }

    /// 确认后按钮会从页面移除，因此总是点击第一个
    pub async fn click_first_confirm_button(&self) -> AppResult<()> {
        self.driver.accept_dialogs().await?;
        self.driver.click_nth(CONFIRM_BUTTONS, 0).await
    }

    pub async fn page_text(&self) -> AppResult<String> {
        self.driver.page_text().await
    }
}
