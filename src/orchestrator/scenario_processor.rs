//! 单个场景处理器 - 编排层
//!
//! ## 职责
//!
//! 1. **登录**：按场景指定的用户登录
//! 2. **遍历步骤**：依次执行批次处理 / 邀请生成 / 数据集填写
//! 3. **失败处理**：第一个失败的步骤终止本场景并写入 warn.txt
//! 4. **登出**：无论成败都尝试登出，保证下一个场景从干净状态开始

use anyhow::Result;
use tracing::{error, info, warn};

use crate::config::Config;
use crate::error::AppResult;
use crate::infrastructure::UiDriver;
use crate::models::{Scenario, ScenarioStep, UserDirectory};
use crate::services::{UiEventStatusLookup, UserTools, WarnWriter};
use crate::workflow::{fill_dataset, BatchCtx, BatchFlow, BatchOutcome, InvitationFlow};

/// 场景步骤统计
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ScenarioStats {
    pub steps_passed: usize,
    pub batches_skipped: usize,
}

/// 处理单个场景
///
/// 返回场景是否通过；只有环境错误（如写 warn.txt 失败）才返回 Err
pub async fn process_scenario<D: UiDriver>(
    driver: &D,
    users: &UserDirectory,
    scenario: &Scenario,
    scenario_index: usize,
    config: &Config,
    warn_writer: &WarnWriter,
) -> Result<bool> {
    let user_tools = UserTools::new(driver, &config.base_url, config.password.as_deref());

    let login = match users.get(&scenario.user) {
        Ok(user) => user_tools.user_login(user).await,
        Err(e) => Err(e),
    };
    if let Err(e) = login {
        error!("[场景 {}] ❌ 登录失败: {}", scenario_index, e);
        warn_writer.write(&scenario.name, 0, &e.to_string()).await?;
        return Ok(false);
    }

    let mut stats = ScenarioStats::default();
    let mut passed = true;

    for (idx, step) in scenario.steps.iter().enumerate() {
        let step_index = idx + 1;
        info!(
            "[场景 {}] ▶ 步骤 {}/{}",
            scenario_index,
            step_index,
            scenario.steps.len()
        );
        if config.verbose_logging {
            info!("[场景 {}] 步骤详情: {:?}", scenario_index, step);
        }

        if let Err(e) = run_step(driver, scenario, step, step_index, config, &mut stats).await {
            error!("[场景 {}] ❌ 步骤 {} 失败: {}", scenario_index, step_index, e);
            warn_writer
                .write(&scenario.name, step_index, &e.to_string())
                .await?;
            passed = false;
            break;
        }
        stats.steps_passed += 1;
    }

    if let Err(e) = user_tools.log_out().await {
        warn!("[场景 {}] ⚠️ 登出失败: {}", scenario_index, e);
    }

    info!(
        "[场景 {}] 步骤通过 {}/{}，跳过批次 {}",
        scenario_index,
        stats.steps_passed,
        scenario.steps.len(),
        stats.batches_skipped
    );

    Ok(passed)
}

async fn run_step<D: UiDriver>(
    driver: &D,
    scenario: &Scenario,
    step: &ScenarioStep,
    step_index: usize,
    config: &Config,
    stats: &mut ScenarioStats,
) -> AppResult<()> {
    match step {
        ScenarioStep::Batch(request) => {
            let ctx = BatchCtx::new(
                &scenario.name,
                step_index,
                &request.batch_type,
                &request.description,
            );
            let lookup = UiEventStatusLookup::new(driver);
            let outcome = BatchFlow::new(config)
                .run(driver, &lookup, request, &ctx)
                .await?;
            if outcome == BatchOutcome::Skipped {
                stats.batches_skipped += 1;
            }
        }
        ScenarioStep::GenerateInvitations { minimum } => {
            InvitationFlow::new(config)
                .with_minimum(*minimum)
                .generate(driver)
                .await?;
        }
        ScenarioStep::FillDataset {
            navigate,
            fields,
            save,
        } => {
            fill_dataset(driver, navigate, fields, save.as_deref()).await?;
        }
    }
    Ok(())
}
