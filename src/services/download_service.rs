//! 下载文件服务 - 业务能力层
//!
//! 等待"取回"按钮触发的下载落盘，解析出 NHS 号码后立即删除文件

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::time::Duration;

use tokio::time::{sleep, Instant};
use tracing::{debug, info, warn};

use crate::error::{AppError, AppResult, AssertionError, DocumentError, FileError};
use crate::services::pdf_extractor;

/// 浏览器写入中的临时文件后缀
const PARTIAL_SUFFIXES: &[&str] = &["crdownload", "tmp", "part"];

const POLL_INTERVAL: Duration = Duration::from_millis(250);

/// 下载文件类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtefactKind {
    Pdf,
    Csv,
    Other,
}

impl ArtefactKind {
    pub fn from_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .as_deref()
        {
            Some("pdf") => ArtefactKind::Pdf,
            Some("csv") => ArtefactKind::Csv,
            _ => ArtefactKind::Other,
        }
    }
}

/// 已处理（并已删除）的下载文件
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artefact {
    pub file_name: String,
    pub kind: ArtefactKind,
    pub nhs_numbers: Vec<String>,
}

/// 下载目录监视器
pub struct DownloadWatcher {
    dir: PathBuf,
    known: HashSet<PathBuf>,
    timeout: Duration,
}

impl DownloadWatcher {
    /// 记录当前目录中已有的文件
    pub async fn snapshot(dir: impl Into<PathBuf>, timeout: Duration) -> AppResult<Self> {
        let dir = dir.into();
        tokio::fs::create_dir_all(&dir).await?;
        let known = list_files(&dir).await?.into_iter().collect();
        Ok(Self {
            dir,
            known,
            timeout,
        })
    }

    /// 等待一个新的、已写完的文件出现
    pub async fn wait_for_new_file(&mut self) -> AppResult<PathBuf> {
        let deadline = Instant::now() + self.timeout;
        loop {
            for path in list_files(&self.dir).await? {
                if !self.known.contains(&path) && !is_partial(&path) {
                    debug!("检测到新下载: {}", path.display());
                    self.known.insert(path.clone());
                    return Ok(path);
                }
            }
            if Instant::now() >= deadline {
                return Err(AssertionError::DownloadMissing {
                    dir: self.dir.display().to_string(),
                }
                .into());
            }
            sleep(POLL_INTERVAL).await;
        }
    }
}

fn is_partial(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| PARTIAL_SUFFIXES.contains(&e))
}

async fn list_files(dir: &Path) -> AppResult<Vec<PathBuf>> {
    let mut files = Vec::new();
    let mut entries = tokio::fs::read_dir(dir)
        .await
        .map_err(|e| AppError::file_read_failed(dir.display().to_string(), e))?;
    while let Some(entry) = entries.next_entry().await? {
        if entry.file_type().await?.is_file() {
            files.push(entry.path());
        }
    }
    Ok(files)
}

/// 从 CSV 中取表头含 "NHS" 的那一列
pub fn extract_nhs_numbers_from_csv(path: &Path) -> AppResult<Vec<String>> {
    let csv_error = |source| DocumentError::CsvParseFailed {
        path: path.display().to_string(),
        source,
    };

    let mut reader = csv::Reader::from_path(path).map_err(csv_error)?;
    let headers = reader.headers().map_err(csv_error)?.clone();
    let Some(column) = headers
        .iter()
        .position(|h| h.to_ascii_uppercase().contains("NHS"))
    else {
        warn!("CSV {} 中没有 NHS 号码列", path.display());
        return Ok(Vec::new());
    };

    let mut numbers = Vec::new();
    for record in reader.records() {
        let record = record.map_err(csv_error)?;
        if let Some(value) = record.get(column) {
            let digits: String = value.chars().filter(char::is_ascii_digit).collect();
            if !digits.is_empty() {
                numbers.push(digits);
            }
        }
    }
    Ok(numbers)
}

/// 解析下载文件并删除
///
/// 无论解析是否成功都会删除文件
pub async fn process_artefact(path: &Path) -> AppResult<Artefact> {
    let kind = ArtefactKind::from_path(path);
    let file_name = path
        .file_name()
        .unwrap_or_default()
        .to_string_lossy()
        .to_string();

    let parsed = match kind {
        ArtefactKind::Pdf => pdf_extractor::extract_nhs_numbers(path),
        ArtefactKind::Csv => extract_nhs_numbers_from_csv(path),
        ArtefactKind::Other => Ok(Vec::new()),
    };

    tokio::fs::remove_file(path)
        .await
        .map_err(|e| FileError::DeleteFailed {
            path: path.display().to_string(),
            source: Box::new(e),
        })?;
    debug!("已删除下载文件: {}", file_name);

    let nhs_numbers = parsed?;
    info!("📄 {} ({:?}): {} 个 NHS 号码", file_name, kind, nhs_numbers.len());

    Ok(Artefact {
        file_name,
        kind,
        nhs_numbers,
    })
}
