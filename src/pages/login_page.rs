use std::time::Duration;

use crate::error::AppResult;
use crate::infrastructure::UiDriver;

const USERNAME: &str = "#username";
const PASSWORD: &str = "#password";
const SUBMIT: &str = "button[type='submit']";
const ROLE_SELECT: &str = "#roleSelect";
const ROLE_CONTINUE: &str = "#roleContinue";

/// 登录页及角色选择页
pub struct LoginPage<'a, D: UiDriver> {
    driver: &'a D,
}

impl<'a, D: UiDriver> LoginPage<'a, D> {
    pub fn new(driver: &'a D) -> Self {
        Self { driver }
    }

    pub async fn login(&self, username: &str, password: &str) -> AppResult<()> {
        self.driver.fill(USERNAME, username).await?;
        self.driver.fill(PASSWORD, password).await?;
        self.driver.click(SUBMIT).await
    }

    /// 用户拥有多个角色时出现选择页，否则直接跳过
    pub async fn select_role_if_prompted(&self, role: &str) -> AppResult<bool> {
        if !self
            .driver
            .wait_for_visible(ROLE_SELECT, Duration::from_secs(3))
            .await?
        {
            return Ok(false);
        }
        self.driver.select_option(ROLE_SELECT, role).await?;
        self.driver.click(ROLE_CONTINUE).await?;
        Ok(true)
    }
}
