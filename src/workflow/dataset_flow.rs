//! 数据集填写流程 - 流程层
//!
//! 按菜单链接导航到表单，逐个填写字段，最后保存

use tracing::info;

use crate::error::AppResult;
use crate::infrastructure::UiDriver;
use crate::models::DatasetEntry;
use crate::pages::DatasetFieldUtil;

pub async fn fill_dataset<D: UiDriver>(
    driver: &D,
    navigate: &[String],
    fields: &[DatasetEntry],
    save: Option<&str>,
) -> AppResult<()> {
    for link in navigate {
        driver.click_text(link).await?;
    }

    let util = DatasetFieldUtil::new(driver);
    for entry in fields {
        util.fill_entry(entry).await?;
    }
    info!("✓ 已填写 {} 个字段", fields.len());

    if let Some(save) = save {
        driver.accept_dialogs().await?;
        driver.click_text(save).await?;
        info!("💾 已点击 {}", save);
    }
    Ok(())
}
