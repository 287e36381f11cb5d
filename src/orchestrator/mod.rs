//! 编排层（Orchestration Layer）
//!
//! ## 层次关系
//!
//! ```text
//! suite_runner (处理 Vec<Scenario>)
//!     ↓
//! scenario_processor (处理 Vec<ScenarioStep>)
//!     ↓
//! workflow::BatchFlow / InvitationFlow (处理单个步骤)
//!     ↓
//! pages + services (页面对象 / 下载 / 登录 / 状态查询)
//!     ↓
//! infrastructure (UiDriver / ChromeDriver / JsExecutor)
//! ```
//!
//! 只有编排层持有 Browser；场景之间互不依赖，每个场景独立登录登出。

pub mod scenario_processor;
pub mod suite_runner;

pub use scenario_processor::{process_scenario, ScenarioStats};
pub use suite_runner::App;
