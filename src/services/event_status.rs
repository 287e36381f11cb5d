//! 受试者事件状态查询
//!
//! 批次处理后用第一个 NHS 号码确认被测系统记录的最新事件状态

use tracing::info;

use crate::error::AppResult;
use crate::infrastructure::UiDriver;
use crate::pages::{MainMenu, SubjectSearchPage, SubjectSummaryPage};

/// 按 NHS 号码查询最新事件状态
#[allow(async_fn_in_trait)]
pub trait EventStatusLookup {
    async fn latest_event_status(&self, nhs_number: &str) -> AppResult<String>;
}

/// 通过受试者搜索页面查询
pub struct UiEventStatusLookup<'a, D: UiDriver> {
    driver: &'a D,
}

impl<'a, D: UiDriver> UiEventStatusLookup<'a, D> {
    pub fn new(driver: &'a D) -> Self {
        Self { driver }
    }
}

impl<'a, D: UiDriver> EventStatusLookup for UiEventStatusLookup<'a, D> {
    async fn latest_event_status(&self, nhs_number: &str) -> AppResult<String> {
        MainMenu::new(self.driver).go_to_subject_search().await?;

        SubjectSearchPage::new(self.driver)
            .search_by_nhs_number(nhs_number)
            .await?;
        let status = SubjectSummaryPage::new(self.driver)
            .latest_event_status()
            .await?;

        info!("🔎 {} 最新事件状态: {}", nhs_number, status);
        Ok(status)
    }
}
