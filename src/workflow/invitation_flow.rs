//! 邀请生成流程 - 流程层
//!
//! 触发后台的邀请生成任务，按固定间隔刷新状态直到完成或超时

use std::time::Duration;

use tokio::time::{sleep, Instant};
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::error::{AppResult, PollError};
use crate::infrastructure::UiDriver;
use crate::models::{check_invitation_counts, InvitationStatus};
use crate::pages::{GenerateInvitationsPage, MainMenu};
use crate::utils::truncate_text;

const MIN_POLL_INTERVAL: Duration = Duration::from_secs(1);

/// 轮询参数：每 `interval` 检查一次，`timeout` 后放弃
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollConfig {
    pub interval: Duration,
    pub timeout: Duration,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(5),
            timeout: Duration::from_secs(120),
        }
    }
}

impl PollConfig {
    /// 间隔为 0 会变成无等待的忙轮询，按 1 秒处理
    pub fn from_config(config: &Config) -> Self {
        let mut interval = config.poll_interval();
        if interval.is_zero() {
            warn!("⚠️ 轮询间隔为 0，改用 {} 秒", MIN_POLL_INTERVAL.as_secs());
            interval = MIN_POLL_INTERVAL;
        }
        Self {
            interval,
            timeout: config.poll_timeout(),
        }
    }
}

/// 可以读取和刷新的任务状态来源
#[allow(async_fn_in_trait)]
pub trait StatusSource {
    async fn read_status(&self) -> AppResult<String>;
    async fn refresh(&self) -> AppResult<()>;
}

/// 轮询统计
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollReport {
    /// 刷新并等待的次数
    pub refresh_cycles: usize,
    pub elapsed: Duration,
}

/// 等待任务进入 Completed
///
/// - Failed：立即失败，不再刷新
/// - Queued / In Progress：刷新后等待一个间隔
/// - 截止时间到仍未完成：`PollError::TimedOut`
/// - 其他文本：`PollError::UnexpectedState`
pub async fn wait_for_completion<S: StatusSource>(
    source: &S,
    poll: &PollConfig,
) -> AppResult<PollReport> {
    let started = Instant::now();
    let mut refresh_cycles = 0;

    info!("⏳ 等待邀请生成完成...");
    loop {
        let text = source.read_status().await?;
        debug!("状态显示: {}", truncate_text(text.trim(), 60));
        match InvitationStatus::from_display(&text) {
            InvitationStatus::Failed => {
                return Err(PollError::JobFailed {
                    status: text.trim().to_string(),
                }
                .into());
            }
            InvitationStatus::Completed => {
                let report = PollReport {
                    refresh_cycles,
                    elapsed: started.elapsed(),
                };
                info!("✓ 邀请生成完成，用时 {} 秒", report.elapsed.as_secs());
                return Ok(report);
            }
            status if status.is_pending() => {
                let elapsed = started.elapsed();
                if elapsed >= poll.timeout {
                    return Err(PollError::TimedOut {
                        elapsed_secs: elapsed.as_secs(),
                        last_status: text.trim().to_string(),
                    }
                    .into());
                }
                source.refresh().await?;
                sleep(poll.interval).await;
                refresh_cycles += 1;
            }
            _ => {
                return Err(PollError::UnexpectedState {
                    status: text.trim().to_string(),
                }
                .into());
            }
        }
    }
}

/// 生成邀请结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvitationOutcome {
    pub report: PollReport,
    /// 是否存在自我转诊邀请（决定后续是否会有 S1 数字传单批次）
    pub self_referrals: bool,
}

/// 页面上的状态显示
struct InvitationStatusDisplay<'a, D: UiDriver> {
    page: GenerateInvitationsPage<'a, D>,
}

impl<'a, D: UiDriver> StatusSource for InvitationStatusDisplay<'a, D> {
    async fn read_status(&self) -> AppResult<String> {
        self.page.status_text().await
    }

    async fn refresh(&self) -> AppResult<()> {
        self.page.click_refresh_button().await
    }
}

/// 邀请生成流程
pub struct InvitationFlow {
    poll: PollConfig,
    minimum: u32,
}

impl InvitationFlow {
    pub fn new(config: &Config) -> Self {
        Self {
            poll: PollConfig::from_config(config),
            minimum: config.min_invitations,
        }
    }

    pub fn with_settings(poll: PollConfig, minimum: u32) -> Self {
        Self { poll, minimum }
    }

    pub fn with_minimum(mut self, minimum: Option<u32>) -> Self {
        if let Some(minimum) = minimum {
            self.minimum = minimum;
        }
        self
    }

    pub async fn generate<D: UiDriver>(&self, driver: &D) -> AppResult<InvitationOutcome> {
        MainMenu::new(driver).go_to_generate_invitations().await?;

        let page = GenerateInvitationsPage::new(driver);
        page.click_generate_invitations_button().await?;

        let display = InvitationStatusDisplay {
            page: GenerateInvitationsPage::new(driver),
        };
        let report = wait_for_completion(&display, &self.poll).await?;

        let planned = page.planned_invitations_total().await?;
        let self_referrals_total = page.self_referrals_total().await?;
        let self_referrals = check_invitation_counts(&planned, &self_referrals_total, self.minimum)?;
        if !self_referrals {
            warn!("⚠️ 本次没有自我转诊邀请");
        }

        Ok(InvitationOutcome {
            report,
            self_referrals,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use std::cell::{Cell, RefCell};
    use std::collections::VecDeque;

    /// 按脚本返回状态，最后一个状态会一直重复
    struct ScriptedStatus {
        statuses: RefCell<VecDeque<&'static str>>,
        refreshes: Cell<usize>,
    }

    impl ScriptedStatus {
        fn new(statuses: &[&'static str]) -> Self {
            Self {
                statuses: RefCell::new(statuses.iter().copied().collect()),
                refreshes: Cell::new(0),
            }
        }
    }

    impl StatusSource for ScriptedStatus {
        async fn read_status(&self) -> AppResult<String> {
            let mut statuses = self.statuses.borrow_mut();
            let status = if statuses.len() > 1 {
                statuses.pop_front().unwrap_or_default()
            } else {
                statuses.front().copied().unwrap_or_default()
            };
            Ok(status.to_string())
        }

        async fn refresh(&self) -> AppResult<()> {
            self.refreshes.set(self.refreshes.get() + 1);
            Ok(())
        }
    }

    #[test]
    fn test_zero_interval_is_raised_to_one_second() {
        let config = Config {
            poll_interval_secs: 0,
            ..Default::default()
        };
        let poll = PollConfig::from_config(&config);
        assert_eq!(poll.interval, Duration::from_secs(1));
        assert_eq!(poll.timeout, config.poll_timeout());
    }

    #[tokio::test(start_paused = true)]
    async fn test_two_cycles_then_completed() {
        let source = ScriptedStatus::new(&["Queued", "Queued", "Completed"]);
        let report = wait_for_completion(&source, &PollConfig::default())
            .await
            .unwrap();

        assert_eq!(report.refresh_cycles, 2);
        assert_eq!(source.refreshes.get(), 2);
        assert!(report.elapsed >= Duration::from_secs(10));
        assert!(report.elapsed < Duration::from_secs(11));
    }

    #[tokio::test(start_paused = true)]
    async fn test_in_progress_is_pending() {
        let source = ScriptedStatus::new(&["Queued", "In Progress", "Completed"]);
        let report = wait_for_completion(&source, &PollConfig::default())
            .await
            .unwrap();
        assert_eq!(report.refresh_cycles, 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_never_leaves_queued_times_out() {
        let source = ScriptedStatus::new(&["Queued"]);
        let err = wait_for_completion(&source, &PollConfig::default())
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            AppError::Poll(PollError::TimedOut { elapsed_secs: 120, .. })
        ));
        assert_eq!(source.refreshes.get(), 24);
    }

    #[tokio::test(start_paused = true)]
    async fn test_failed_stops_immediately() {
        let source = ScriptedStatus::new(&["Queued", "Failed", "Completed"]);
        let err = wait_for_completion(&source, &PollConfig::default())
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Poll(PollError::JobFailed { .. })));
        assert_eq!(source.refreshes.get(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_unexpected_terminal_state() {
        let source = ScriptedStatus::new(&["Queued", "Cancelled"]);
        let err = wait_for_completion(&source, &PollConfig::default())
            .await
            .unwrap_err();

        match err {
            AppError::Poll(PollError::UnexpectedState { status }) => assert_eq!(status, "Cancelled"),
            other => panic!("应为 UnexpectedState: {:?}", other),
        }
    }
}
