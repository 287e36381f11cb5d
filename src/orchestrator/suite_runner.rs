//! 场景集运行器 - 编排层
//!
//! ## 职责
//!
//! 本模块是整个应用的入口，负责资源管理和场景调度。
//!
//! 1. **应用初始化**：日志文件、浏览器（启动或连接）、ChromeDriver、用户文件
//! 2. **加载场景**：扫描场景目录中的 TOML 文件
//! 3. **顺序运行**：同一时间只有一个浏览器会话在操作被测系统
//! 4. **全局统计**：汇总所有场景的结果
//!
//! 唯一持有 Browser 的模块，单个场景委托给 scenario_processor

use anyhow::Result;
use chromiumoxide::Browser;
use tracing::{error, info, warn};

use crate::browser;
use crate::config::Config;
use crate::infrastructure::{ChromeDriver, JsExecutor};
use crate::models::{load_all_scenarios, Scenario, UserDirectory};
use crate::orchestrator::scenario_processor;
use crate::services::WarnWriter;
use crate::utils::logging;

/// 应用主结构
pub struct App {
    config: Config,
    _browser: Browser,
    driver: ChromeDriver,
    users: UserDirectory,
}

impl App {
    /// 初始化应用
    pub async fn initialize(config: Config) -> Result<Self> {
        logging::init_log_file(&config.output_log_file)?;
        logging::log_startup(&config.base_url, config.headless);

        let users = UserDirectory::load(&config.users_file).await?;
        info!("✓ 已加载 {} 个测试用户", users.len());

        let (browser, page) = if config.headless {
            browser::launch_headless_browser(&config.base_url, config.chrome_executable.as_deref())
                .await?
        } else {
            browser::connect_to_browser_and_page(
                config.browser_debug_port,
                Some(&config.base_url),
                None,
            )
            .await?
        };

        // ChromeDriver 通过 JsExecutor 独占 page
        let driver = ChromeDriver::new(JsExecutor::new(page));

        Ok(Self {
            config,
            _browser: browser,
            driver,
            users,
        })
    }

    /// 运行所有场景
    pub async fn run(&self) -> Result<()> {
        info!("\n📁 正在扫描场景...");
        let scenarios = load_all_scenarios(&self.config.scenario_folder).await?;

        if scenarios.is_empty() {
            warn!("⚠️ 没有找到场景文件，程序结束");
            return Ok(());
        }
        logging::log_scenarios_loaded(scenarios.len());

        let stats = self.run_all(&scenarios).await?;

        logging::print_final_stats(
            stats.passed,
            stats.failed,
            stats.total,
            &self.config.output_log_file,
        );
        Ok(())
    }

    async fn run_all(&self, scenarios: &[Scenario]) -> Result<SuiteStats> {
        let warn_writer = WarnWriter::new();
        let mut stats = SuiteStats {
            total: scenarios.len(),
            ..Default::default()
        };

        for (idx, scenario) in scenarios.iter().enumerate() {
            let scenario_index = idx + 1;
            logging::log_scenario_start(scenario_index, stats.total, &scenario.name, &scenario.user);

            let passed = match scenario_processor::process_scenario(
                &self.driver,
                &self.users,
                scenario,
                scenario_index,
                &self.config,
                &warn_writer,
            )
            .await
            {
                Ok(passed) => passed,
                Err(e) => {
                    error!("[场景 {}] ❌ 运行过程中发生错误: {}", scenario_index, e);
                    false
                }
            };

            if passed {
                stats.passed += 1;
            } else {
                stats.failed += 1;
            }
            logging::log_scenario_complete(scenario_index, &scenario.name, passed);
        }

        Ok(stats)
    }
}

/// 运行统计
#[derive(Debug, Default)]
struct SuiteStats {
    passed: usize,
    failed: usize,
    total: usize,
}
