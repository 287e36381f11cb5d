//! 邀请生成任务的状态与数量校验

use regex::Regex;
use tracing::{info, warn};

use crate::error::{AppResult, AssertionError};

/// 邀请生成任务在页面上的状态
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvitationStatus {
    Queued,
    InProgress,
    Completed,
    Failed,
    Other(String),
}

impl InvitationStatus {
    /// 从状态表格文本解析，"Failed" 优先
    pub fn from_display(text: &str) -> Self {
        if text.contains("Failed") {
            InvitationStatus::Failed
        } else if text.contains("Queued") {
            InvitationStatus::Queued
        } else if text.contains("In Progress") {
            InvitationStatus::InProgress
        } else if text.contains("Completed") {
            InvitationStatus::Completed
        } else {
            InvitationStatus::Other(text.trim().to_string())
        }
    }

    /// 任务仍在进行，需要刷新后继续等待
    pub fn is_pending(&self) -> bool {
        matches!(self, InvitationStatus::Queued | InvitationStatus::InProgress)
    }
}

fn parse_count(field: &str, text: &str) -> Option<u32> {
    let re = Regex::new(r"\d+").ok()?;
    let value = re.find(text.trim())?;
    let parsed = value.as_str().parse().ok();
    if parsed.is_none() {
        warn!("{} 数值溢出: {}", field, text);
    }
    parsed
}

/// 校验生成的邀请数量
///
/// 计划总数少于 `minimum` 时失败；返回是否存在自我转诊邀请
pub fn check_invitation_counts(
    planned_total: &str,
    self_referrals_total: &str,
    minimum: u32,
) -> AppResult<bool> {
    let planned = parse_count("planned invitations total", planned_total);
    match planned {
        Some(n) if n >= minimum => info!("✓ 已生成 {} 份邀请", n),
        _ => {
            return Err(AssertionError::TooFewInvitations {
                minimum,
                planned: planned_total.trim().to_string(),
            }
            .into())
        }
    }

    let self_referrals = parse_count("self referrals total", self_referrals_total).ok_or_else(
        || AssertionError::UnparseableCount {
            field: "self referrals total".to_string(),
            value: self_referrals_total.trim().to_string(),
        },
    )?;

    if self_referrals >= 1 {
        info!("✓ 自我转诊邀请: {}", self_referrals);
        Ok(true)
    } else {
        warn!("⚠️ 没有自我转诊邀请，不会生成 S1 数字传单批次");
        Ok(false)
    }
}
