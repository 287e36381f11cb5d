use tracing::info;

use crate::error::{AppResult, ConfigError};
use crate::infrastructure::UiDriver;
use crate::models::TestUser;
use crate::pages::{LoginPage, MainMenu};

/// 登录 / 登出
pub struct UserTools<'a, D: UiDriver> {
    driver: &'a D,
    base_url: &'a str,
    password: Option<&'a str>,
}

impl<'a, D: UiDriver> UserTools<'a, D> {
    pub fn new(driver: &'a D, base_url: &'a str, password: Option<&'a str>) -> Self {
        Self {
            driver,
            base_url,
            password,
        }
    }

    /// 打开入口页并以指定用户登录，必要时选择角色
    pub async fn user_login(&self, user: &TestUser) -> AppResult<()> {
        let password = self.password.ok_or_else(|| ConfigError::EnvVarNotFound {
            var_name: "BCSS_PASS".to_string(),
        })?;

        info!("🔐 以 {} 登录", user.username);
        self.driver.goto(self.base_url).await?;

        let login = LoginPage::new(self.driver);
        login.login(&user.username, password).await?;

        if let Some(role) = user.role.as_deref() {
            if login.select_role_if_prompted(role).await? {
                info!("✓ 已选择角色: {}", role);
            }
        }
        Ok(())
    }

    pub async fn log_out(&self) -> AppResult<()> {
        MainMenu::new(self.driver).log_out().await?;
        info!("🔓 已登出");
        Ok(())
    }
}
