use crate::error::AppResult;
use crate::infrastructure::UiDriver;

const GENERATE_BUTTON: &str = "#generateInvitations";
const REFRESH_BUTTON: &str = "#refreshButton";
const STATUS_DISPLAY: &str = "#displayRS";
const PLANNED_INVITATIONS_TOTAL: &str = "#col8_total";
const SELF_REFERRALS_TOTAL: &str = "#col9_total";

/// 生成邀请页
pub struct GenerateInvitationsPage<'a, D: UiDriver> {
    driver: &'a D,
}

impl<'a, D: UiDriver> GenerateInvitationsPage<'a, D> {
    pub fn new(driver: &'a D) -> Self {
        Self { driver }
    }

    pub async fn click_generate_invitations_button(&self) -> AppResult<()> {
        self.driver.accept_dialogs().await?;
        self.driver.click(GENERATE_BUTTON).await
    }

    pub async fn click_refresh_button(&self) -> AppResult<()> {
        self.driver.click(REFRESH_BUTTON).await
    }

    pub async fn status_text(&self) -> AppResult<String> {
        self.driver.text_content(STATUS_DISPLAY).await
    }

    pub async fn planned_invitations_total(&self) -> AppResult<String> {
        self.driver.text_content(PLANNED_INVITATIONS_TOTAL).await
    }

    pub async fn self_referrals_total(&self) -> AppResult<String> {
        self.driver.text_content(SELF_REFERRALS_TOTAL).await
    }
}
