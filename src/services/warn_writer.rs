//! 失败记录服务 - 业务能力层
//!
//! 只负责把失败的场景追加写入 warn.txt，不关心流程

use tokio::fs::OpenOptions;
use tokio::io::AsyncWriteExt;
use tracing::debug;

use crate::error::AppResult;

/// 失败记录服务
pub struct WarnWriter {
    warn_file_path: String,
}

impl WarnWriter {
    pub fn new() -> Self {
        Self {
            warn_file_path: "warn.txt".to_string(),
        }
    }

    /// 使用自定义文件路径创建
    pub fn with_path(path: impl Into<String>) -> Self {
        Self {
            warn_file_path: path.into(),
        }
    }

    /// 追加一条失败记录
    pub async fn write(&self, scenario: &str, step_index: usize, reason: &str) -> AppResult<()> {
        debug!("写入失败记录: 场景 {} | 步骤 {}", scenario, step_index);

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.warn_file_path)
            .await?;

        let line = format!(
            "{} | 场景 {} | 步骤 {} | {}\n",
            chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
            scenario,
            step_index,
            reason.replace('\n', " ")
        );
        file.write_all(line.as_bytes()).await?;
        // tokio 的 File 在后台完成写入，返回前必须 flush
        file.flush().await?;

        Ok(())
    }
}

impl Default for WarnWriter {
    fn default() -> Self {
        Self::new()
    }
}
