use crate::error::AppResult;
use crate::infrastructure::UiDriver;

const LATEST_EVENT_STATUS: &str = "Latest Event Status";

/// 搜索命中后显示的筛查受试者摘要页
pub struct SubjectSummaryPage<'a, D: UiDriver> {
    driver: &'a D,
}

impl<'a, D: UiDriver> SubjectSummaryPage<'a, D> {
    pub fn new(driver: &'a D) -> Self {
        Self { driver }
    }

    pub async fn latest_event_status(&self) -> AppResult<String> {
        self.driver.read_labelled(LATEST_EVENT_STATUS).await
    }
}
