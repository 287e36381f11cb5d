/// 日志工具模块
///
/// 提供日志初始化和格式化输出的辅助函数
use std::fs;

use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::error::AppResult;

/// 初始化 tracing，默认 info 级别，可用 `RUST_LOG` 覆盖
///
/// 重复调用是安全的（测试中每个用例都可能调用）
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}

/// 初始化运行日志文件
pub fn init_log_file(log_file_path: &str) -> AppResult<()> {
    let log_header = format!(
        "{}\n场景运行日志 - {}\n{}\n\n",
        "=".repeat(60),
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
        "=".repeat(60)
    );
    fs::write(log_file_path, log_header)?;
    Ok(())
}

/// 记录程序启动信息
pub fn log_startup(base_url: &str, headless: bool) {
    info!("{}", "=".repeat(60));
    info!("🚀 程序启动 - 筛查系统 UI 场景");
    info!("🌐 目标: {}", base_url);
    info!("🖥️ 模式: {}", if headless { "无头浏览器" } else { "连接已有浏览器" });
    info!("{}", "=".repeat(60));
}

/// 记录场景加载信息
pub fn log_scenarios_loaded(total: usize) {
    info!("✓ 找到 {} 个待运行的场景", total);
    info!("💡 场景按顺序运行，每个场景独立登录\n");
}

/// 记录场景开始信息
pub fn log_scenario_start(index: usize, total: usize, name: &str, user: &str) {
    info!("\n{}", "=".repeat(60));
    info!("📦 开始运行第 {}/{} 个场景: {}", index, total, name);
    info!("👤 用户: {}", user);
    info!("{}", "=".repeat(60));
}

/// 记录场景完成信息
pub fn log_scenario_complete(index: usize, name: &str, passed: bool) {
    info!("\n{}", "─".repeat(60));
    if passed {
        info!("✅ 第 {} 个场景通过: {}", index, name);
    } else {
        info!("❌ 第 {} 个场景失败: {}", index, name);
    }
    info!("{}", "─".repeat(60));
}

/// 打印最终统计信息
pub fn print_final_stats(passed: usize, failed: usize, total: usize, log_file_path: &str) {
    info!("\n{}", "=".repeat(60));
    info!("📊 全部场景运行完成");
    info!(
        "完成时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("{}", "=".repeat(60));
    info!("✅ 通过: {}/{}", passed, total);
    info!("❌ 失败: {}", failed);
    info!("{}", "=".repeat(60));
    info!("\n日志已保存至: {}", log_file_path);
}

/// 截断长文本用于日志显示
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() > max_len {
        text.chars().take(max_len).collect::<String>() + "..."
    } else {
        text.to_string()
    }
}
