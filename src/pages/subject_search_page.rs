use crate::error::AppResult;
use crate::infrastructure::UiDriver;

const NHS_NUMBER_INPUT: &str = "#nhsNumberInput";
const SEARCH_BUTTON: &str = "#searchButton";

/// 受试者搜索页
pub struct SubjectSearchPage<'a, D: UiDriver> {
    driver: &'a D,
}

impl<'a, D: UiDriver> SubjectSearchPage<'a, D> {
    pub fn new(driver: &'a D) -> Self {
        Self { driver }
    }

    pub async fn search_by_nhs_number(&self, nhs_number: &str) -> AppResult<()> {
        self.driver.fill(NHS_NUMBER_INPUT, nhs_number).await?;
        self.driver.click(SEARCH_BUTTON).await
    }
}
