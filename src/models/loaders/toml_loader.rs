use crate::error::{AppError, AppResult, FileError};
use crate::models::scenario::Scenario;
use std::path::{Path, PathBuf};
use tokio::fs;

/// 从 TOML 文件加载场景
pub async fn load_toml_to_scenario(toml_file_path: &Path) -> AppResult<Scenario> {
    let content = fs::read_to_string(toml_file_path)
        .await
        .map_err(|e| AppError::file_read_failed(toml_file_path.display().to_string(), e))?;

    let mut scenario: Scenario = toml::from_str(&content).map_err(|e| FileError::TomlParseFailed {
        path: toml_file_path.display().to_string(),
        source: Box::new(e),
    })?;

    scenario.file_path = Some(toml_file_path.to_string_lossy().to_string());

    Ok(scenario)
}

/// 从文件夹中加载所有场景，按文件名排序
///
/// 解析失败的文件只记录警告，不影响其他场景
pub async fn load_all_scenarios(folder_path: &str) -> AppResult<Vec<Scenario>> {
    let folder = PathBuf::from(folder_path);

    if !folder.exists() {
        return Err(FileError::DirectoryNotFound {
            path: folder_path.to_string(),
        }
        .into());
    }

    let mut toml_files = Vec::new();
    let mut entries = fs::read_dir(&folder)
        .await
        .map_err(|e| AppError::file_read_failed(folder_path, e))?;

    while let Some(entry) = entries.next_entry().await? {
        let path = entry.path();
        if path.extension().and_then(|s| s.to_str()) == Some("toml") {
            toml_files.push(path);
        }
    }
    toml_files.sort();

    let mut scenarios = Vec::new();
    for path in toml_files {
        tracing::info!(
            "正在加载: {}",
            path.file_name().unwrap_or_default().to_string_lossy()
        );

        match load_toml_to_scenario(&path).await {
            Ok(scenario) => {
                tracing::info!("成功加载场景 {}，共 {} 个步骤", scenario.name, scenario.steps.len());
                scenarios.push(scenario);
            }
            Err(e) => {
                tracing::warn!("加载文件失败 {}: {}", path.display(), e);
            }
        }
    }

    Ok(scenarios)
}
