use crate::error::AppResult;
use crate::infrastructure::UiDriver;
use crate::models::BatchRow;

const BATCH_TABLE: &str = "#batchList";
const EVENT_CODE_FILTER: &str = "#eventCodeFilter";
const BATCH_ID_FILTER: &str = "#batchIdFilter";

/// 活动批次列表
pub struct ActiveBatchListPage<'a, D: UiDriver> {
    driver: &'a D,
}

impl<'a, D: UiDriver> ActiveBatchListPage<'a, D> {
    pub fn new(driver: &'a D) -> Self {
        Self { driver }
    }

    pub async fn enter_event_code_filter(&self, event_code: &str) -> AppResult<()> {
        self.driver.fill(EVENT_CODE_FILTER, event_code).await
    }

    pub async fn rows(&self) -> AppResult<Vec<BatchRow>> {
        let rows = self.driver.table_rows(BATCH_TABLE).await?;
        Ok(rows.into_iter().map(BatchRow::from).collect())
    }

    pub async fn open_batch(&self, batch_id: &str) -> AppResult<()> {
        self.driver.click_text(batch_id).await
    }
}

/// 已归档批次列表
pub struct ArchivedBatchListPage<'a, D: UiDriver> {
    driver: &'a D,
}

impl<'a, D: UiDriver> ArchivedBatchListPage<'a, D> {
    pub fn new(driver: &'a D) -> Self {
        Self { driver }
    }

    pub async fn enter_batch_id_filter(&self, batch_id: &str) -> AppResult<()> {
        self.driver.fill(BATCH_ID_FILTER, batch_id).await
    }

    /// 列表中是否有链接文本等于 `batch_id` 的行
    pub async fn contains_batch(&self, batch_id: &str) -> AppResult<bool> {
        let rows = self.driver.table_rows(BATCH_TABLE).await?;
        Ok(rows
            .iter()
            .any(|r| r.link_text.as_deref().map(str::trim) == Some(batch_id)))
    }
}
