//! 批次处理流程 - 流程层
//!
//! 核心职责：把一个信件批次从活动列表推进到归档，并确认受试者状态
//!
//! 流程顺序：
//! 1. 活动批次列表 → 按事件代码过滤 → 选择 Prepared/Open 行
//! 2. 准备 → 逐个取回文档（下载、提取 NHS 号码、删除）
//! 3. 逐个确认打印（自动接受对话框）→ 归档成功提示
//! 4. 归档批次列表中确认该批次
//! 5. 第一个 NHS 号码的最新事件状态符合期望

use std::path::PathBuf;
use std::time::Duration;

use tracing::{info, warn};

use crate::config::Config;
use crate::error::{AppError, AppResult, AssertionError};
use crate::infrastructure::UiDriver;
use crate::models::{select_batch_row, BatchRequest, BatchSelection, ExpectedStatus};
use crate::pages::manage_batch_page::ARCHIVED_MESSAGE;
use crate::pages::{ActiveBatchListPage, ArchivedBatchListPage, MainMenu, ManageBatchPage};
use crate::services::{process_artefact, Artefact, ArtefactKind, DownloadWatcher, EventStatusLookup};
use crate::workflow::batch_ctx::BatchCtx;

/// 批次处理结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BatchOutcome {
    /// 批次已打印并归档
    Processed {
        batch_id: String,
        nhs_numbers: Vec<String>,
        artefacts: Vec<Artefact>,
    },
    /// 可选批次不存在
    Skipped,
}

/// 批次处理流程
///
/// 不持有任何浏览器资源，只依赖 UiDriver 和事件状态查询
pub struct BatchFlow {
    download_dir: PathBuf,
    download_timeout: Duration,
    retrieve_wait: Duration,
}

impl BatchFlow {
    pub fn new(config: &Config) -> Self {
        Self::with_settings(&config.download_dir, config.download_timeout())
    }

    pub fn with_settings(download_dir: impl Into<PathBuf>, download_timeout: Duration) -> Self {
        Self {
            download_dir: download_dir.into(),
            download_timeout,
            retrieve_wait: Duration::from_secs(30),
        }
    }

    pub async fn run<D: UiDriver, L: EventStatusLookup>(
        &self,
        driver: &D,
        lookup: &L,
        request: &BatchRequest,
        ctx: &BatchCtx,
    ) -> AppResult<BatchOutcome> {
        info!("{} 📦 开始处理批次", ctx);

        // ========== 1: 选择批次 ==========
        MainMenu::new(driver).go_to_active_batch_list().await?;
        let active = ActiveBatchListPage::new(driver);
        active.enter_event_code_filter(&request.batch_type).await?;

        let rows = active.rows().await?;
        let batch_id = match select_batch_row(&rows, &request.batch_type, &request.description)? {
            BatchSelection::Found { batch_id, row } => {
                info!("{} ✓ 选中批次 {} ({:?})", ctx, batch_id, row.state());
                batch_id
            }
            BatchSelection::SkippedOptional => {
                warn!("{} ⚠️ 没有可选批次，跳过", ctx);
                return Ok(BatchOutcome::Skipped);
            }
        };
        active.open_batch(&batch_id).await?;

        // ========== 2: 准备并取回 ==========
        let artefacts = self.prepare_and_retrieve(driver, ctx).await?;
        let nhs_numbers = collect_nhs_numbers(&artefacts);
        info!("{} ✓ 共提取 {} 个 NHS 号码", ctx, nhs_numbers.len());

        // ========== 3: 确认打印 ==========
        self.confirm_printed(driver, ctx).await?;

        // ========== 4: 归档列表 ==========
        self.check_archived(driver, &batch_id, ctx).await?;

        // ========== 5: 受试者状态 ==========
        if let Some(expected) = &request.expected_status {
            self.verify_event_status(lookup, &batch_id, &nhs_numbers, expected, ctx)
                .await?;
        }

        Ok(BatchOutcome::Processed {
            batch_id,
            nhs_numbers,
            artefacts,
        })
    }

    async fn prepare_and_retrieve<D: UiDriver>(
        &self,
        driver: &D,
        ctx: &BatchCtx,
    ) -> AppResult<Vec<Artefact>> {
        let manage = ManageBatchPage::new(driver);

        if manage.has_prepare_button().await? {
            info!("{} 🛠️ 准备批次", ctx);
            manage.click_prepare_button().await?;
        }

        if !manage.wait_for_retrieve_buttons(self.retrieve_wait).await? {
            return Err(AppError::element_not_found("Retrieve"));
        }

        driver.enable_downloads(&self.download_dir).await?;

        let retrieve_count = manage.retrieve_button_count().await?;
        info!("{} 📥 {} 个文档待取回", ctx, retrieve_count);

        let mut artefacts = Vec::with_capacity(retrieve_count);
        for index in 0..retrieve_count {
            let mut watcher =
                DownloadWatcher::snapshot(&self.download_dir, self.download_timeout).await?;
            manage.click_retrieve_button(index).await?;
            let path = watcher.wait_for_new_file().await?;
            artefacts.push(process_artefact(&path).await?);
        }

        Ok(artefacts)
    }

    async fn confirm_printed<D: UiDriver>(&self, driver: &D, ctx: &BatchCtx) -> AppResult<()> {
        let manage = ManageBatchPage::new(driver);

        let confirm_count = manage.confirm_button_count().await?;
        for i in 0..confirm_count {
            info!("{} 🖨️ 确认打印 {}/{}", ctx, i + 1, confirm_count);
            manage.click_first_confirm_button().await?;
        }

        if !manage.page_text().await?.contains(ARCHIVED_MESSAGE) {
            return Err(AssertionError::TextMissing {
                expected: ARCHIVED_MESSAGE.to_string(),
            }
            .into());
        }
        info!("{} ✓ {}", ctx, ARCHIVED_MESSAGE);
        Ok(())
    }

    async fn check_archived<D: UiDriver>(
        &self,
        driver: &D,
        batch_id: &str,
        ctx: &BatchCtx,
    ) -> AppResult<()> {
        MainMenu::new(driver).go_to_archived_batch_list().await?;
        let archived = ArchivedBatchListPage::new(driver);
        archived.enter_batch_id_filter(batch_id).await?;

        if !archived.contains_batch(batch_id).await? {
            return Err(AssertionError::BatchNotArchived {
                batch_id: batch_id.to_string(),
            }
            .into());
        }
        info!("{} ✓ 批次 {} 已归档", ctx, batch_id);
        Ok(())
    }

    async fn verify_event_status<L: EventStatusLookup>(
        &self,
        lookup: &L,
        batch_id: &str,
        nhs_numbers: &[String],
        expected: &ExpectedStatus,
        ctx: &BatchCtx,
    ) -> AppResult<()> {
        let nhs_number = nhs_numbers
            .first()
            .ok_or_else(|| AssertionError::NoSubjectsExtracted {
                batch_id: batch_id.to_string(),
            })?;

        let actual = lookup.latest_event_status(nhs_number).await?;
        if !expected.matches(&actual) {
            return Err(AssertionError::EventStatusMismatch {
                nhs_number: nhs_number.clone(),
                actual,
                expected: expected.as_list(),
            }
            .into());
        }
        info!("{} ✓ {} 状态为 {}", ctx, nhs_number, actual);
        Ok(())
    }
}

/// PDF 中的号码在前，CSV 中的号码在后
fn collect_nhs_numbers(artefacts: &[Artefact]) -> Vec<String> {
    let from = |kind: ArtefactKind| {
        artefacts
            .iter()
            .filter(move |a| a.kind == kind)
            .flat_map(|a| a.nhs_numbers.iter().cloned())
    };
    from(ArtefactKind::Pdf).chain(from(ArtefactKind::Csv)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn artefact(kind: ArtefactKind, numbers: &[&str]) -> Artefact {
        Artefact {
            file_name: "x".to_string(),
            kind,
            nhs_numbers: numbers.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn test_pdf_numbers_come_first() {
        let artefacts = vec![
            artefact(ArtefactKind::Csv, &["3"]),
            artefact(ArtefactKind::Pdf, &["1", "2"]),
            artefact(ArtefactKind::Other, &[]),
        ];
        assert_eq!(collect_nhs_numbers(&artefacts), vec!["1", "2", "3"]);
    }
}
