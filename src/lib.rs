//! # BCSS UI Driver
//!
//! 肠癌筛查系统（BCSS）的浏览器端场景驱动：处理通信批次、生成邀请、
//! 从下载的信件中提取 NHS 号码并核对受检者事件状态
//!
//! ## 架构设计
//!
//! 本系统采用严格的四层架构：
//!
//! ### ① 基础设施层（Infrastructure）
//! - `infrastructure/` - 持有稀缺资源（Page），只暴露能力
//! - `JsExecutor` - 唯一的 page owner，提供 eval() 能力
//! - `UiDriver` - 页面动作抽象，`ChromeDriver` 为真实实现
//!
//! ### ② 业务能力层（Services + Pages）
//! - `pages/` - 页面对象，一个页面一个结构体，选择器集中在常量里
//! - `services/` - 下载监视、PDF / CSV 解析、登录、事件状态查询、warn.txt
//!
//! ### ③ 流程层（Workflow）
//! - `workflow/` - 定义"一个步骤"的完整流程
//! - `BatchFlow` - 选批次 → 准备 → 下载 → 确认打印 → 归档检查 → 状态核对
//! - `InvitationFlow` - 生成邀请 → 轮询状态 → 检查数量
//!
//! ### ④ 编排层（Orchestration）
//! - `orchestrator/suite_runner` - 场景集运行器，管理浏览器和统计
//! - `orchestrator/scenario_processor` - 单个场景处理器，遍历步骤列表
//!
//! ## 模块结构

pub mod browser;
pub mod config;
pub mod error;
pub mod infrastructure;

pub mod models;
pub mod orchestrator;
pub mod pages;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use browser::connect_to_browser_and_page;
pub use config::Config;
pub use error::{AppError, AppResult};
pub use infrastructure::{ChromeDriver, JsExecutor, UiDriver};
pub use orchestrator::App;
pub use workflow::{BatchFlow, InvitationFlow};
