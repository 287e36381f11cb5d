use crate::error::AppResult;
use crate::infrastructure::UiDriver;

const MAIN_MENU: &str = "Main Menu";
const COMMUNICATIONS_PRODUCTION: &str = "Communications Production";
const ACTIVE_BATCH_LIST: &str = "Active Batch List";
const ARCHIVED_BATCH_LIST: &str = "Archived Batch List";
const SUBJECT_SCREENING_SEARCH: &str = "Screening Subject Search";
const CALL_AND_RECALL: &str = "Call and Recall";
const GENERATE_INVITATIONS: &str = "Generate Invitations";
const LOG_OUT: &str = "Log-out";

/// 主菜单导航
pub struct MainMenu<'a, D: UiDriver> {
    driver: &'a D,
}

impl<'a, D: UiDriver> MainMenu<'a, D> {
    pub fn new(driver: &'a D) -> Self {
        Self { driver }
    }

    pub async fn open(&self) -> AppResult<()> {
        self.driver.click_text(MAIN_MENU).await
    }

    pub async fn go_to_active_batch_list(&self) -> AppResult<()> {
        self.open().await?;
        self.driver.click_text(COMMUNICATIONS_PRODUCTION).await?;
        self.driver.click_text(ACTIVE_BATCH_LIST).await
    }

    pub async fn go_to_archived_batch_list(&self) -> AppResult<()> {
        self.open().await?;
        self.driver.click_text(COMMUNICATIONS_PRODUCTION).await?;
        self.driver.click_text(ARCHIVED_BATCH_LIST).await
    }

    pub async fn go_to_subject_search(&self) -> AppResult<()> {
        self.open().await?;
        self.driver.click_text(SUBJECT_SCREENING_SEARCH).await
    }

    pub async fn go_to_generate_invitations(&self) -> AppResult<()> {
        self.open().await?;
        self.driver.click_text(CALL_AND_RECALL).await?;
        self.driver.click_text(GENERATE_INVITATIONS).await
    }

    pub async fn log_out(&self) -> AppResult<()> {
        self.driver.click_text(LOG_OUT).await
    }
}
