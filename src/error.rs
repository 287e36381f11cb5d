use thiserror::Error;

/// 应用程序错误类型
#[derive(Debug, Error)]
pub enum AppError {
    /// 浏览器相关错误
    #[error("浏览器错误: {0}")]
    Browser(#[from] BrowserError),
    /// 文件操作错误
    #[error("文件错误: {0}")]
    File(#[from] FileError),
    /// 下载文档解析错误
    #[error("文档错误: {0}")]
    Document(#[from] DocumentError),
    /// 页面断言失败（测试失败，不可恢复）
    #[error("断言失败: {0}")]
    Assertion(#[from] AssertionError),
    /// 轮询等待失败
    #[error("轮询失败: {0}")]
    Poll(#[from] PollError),
    /// 配置错误
    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),
    /// 其他错误（用于包装第三方库错误）
    #[error("错误: {0}")]
    Other(String),
}

/// 浏览器相关错误
#[derive(Debug, Error)]
pub enum BrowserError {
    /// 连接浏览器失败
    #[error("无法连接到浏览器 (端口: {port}): {source}")]
    ConnectionFailed {
        port: u16,
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// 启动浏览器失败
    #[error("启动浏览器失败: {source}")]
    LaunchFailed {
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// 导航失败
    #[error("导航到 {url} 失败: {source}")]
    NavigationFailed {
        url: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// 执行脚本失败
    #[error("执行脚本失败: {source}")]
    ScriptExecutionFailed {
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// 浏览器配置失败
    #[error("浏览器配置失败: {message}")]
    ConfigurationFailed { message: String },
}

/// 文件操作错误
#[derive(Debug, Error)]
pub enum FileError {
    /// 读取文件失败
    #[error("读取文件失败 ({path}): {source}")]
    ReadFailed {
        path: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// 删除文件失败
    #[error("删除文件失败 ({path}): {source}")]
    DeleteFailed {
        path: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// TOML 解析失败
    #[error("TOML解析失败 ({path}): {source}")]
    TomlParseFailed {
        path: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// JSON 解析失败
    #[error("JSON解析失败: {source}")]
    JsonParseFailed {
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// 目录不存在
    #[error("目录不存在: {path}")]
    DirectoryNotFound { path: String },
}

/// 下载文档解析错误
#[derive(Debug, Error)]
pub enum DocumentError {
    /// PDF 文本提取失败
    #[error("PDF 文本提取失败 ({path}): {message}")]
    PdfExtractFailed { path: String, message: String },
    /// CSV 解析失败
    #[error("CSV 解析失败 ({path}): {source}")]
    CsvParseFailed { path: String, source: csv::Error },
}

/// 页面断言失败
///
/// 与 UI 期望不符时产生，当前场景立即终止
#[derive(Debug, Error)]
pub enum AssertionError {
    /// 元素未找到（已重试一次）
    #[error("未找到元素: {selector}")]
    ElementNotFound { selector: String },
    /// 没有处于 Prepared/Open 状态的批次
    #[error("No {batch_type} {description} batch found")]
    BatchNotFound {
        batch_type: String,
        description: String,
    },
    /// 批次行没有链接
    #[error("批次行缺少链接: {description}")]
    BatchLinkMissing { description: String },
    /// 归档列表中没有该批次
    #[error("Batch {batch_id} not found in the archived batch list")]
    BatchNotArchived { batch_id: String },
    /// 页面缺少期望文本
    #[error("期望文本未出现: {expected}")]
    TextMissing { expected: String },
    /// 下载未完成
    #[error("下载超时: {dir} 中未出现新文件")]
    DownloadMissing { dir: String },
    /// 未能从下载文件中提取任何 NHS 号码
    #[error("No NHS numbers extracted from batch {batch_id}")]
    NoSubjectsExtracted { batch_id: String },
    /// 事件状态不符
    #[error("Latest event status for {nhs_number} is '{actual}', expected {expected:?}")]
    EventStatusMismatch {
        nhs_number: String,
        actual: String,
        expected: Vec<String>,
    },
    /// 生成的邀请数量不足
    #[error("less than {minimum} invitations generated (planned total: '{planned}')")]
    TooFewInvitations { minimum: u32, planned: String },
    /// 选项表中没有该显示名
    #[error("'{label}' is not a valid {table} option")]
    UnknownOption { table: String, label: String },
    /// 数值解析失败
    #[error("无法解析 {field}: '{value}'")]
    UnparseableCount { field: String, value: String },
}

/// 轮询等待失败
///
/// 超时与终止状态错误分开报告
#[derive(Debug, Error)]
pub enum PollError {
    /// 后台任务失败
    #[error("Invitation has failed to generate: {status}")]
    JobFailed { status: String },
    /// 在截止时间前仍未完成
    #[error("Timed out after {elapsed_secs}s, last status: {last_status}")]
    TimedOut {
        elapsed_secs: u64,
        last_status: String,
    },
    /// 结束时状态不是 Completed
    #[error("Expected status 'Completed', found '{status}'")]
    UnexpectedState { status: String },
}

/// 配置错误
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 环境变量不存在
    #[error("环境变量 {var_name} 不存在")]
    EnvVarNotFound { var_name: String },
    /// 用户不存在
    #[error("users 文件中没有用户: {user}")]
    UnknownUser { user: String },
}

// ========== 从常见错误类型转换 ==========

impl From<chromiumoxide::error::CdpError> for AppError {
    fn from(err: chromiumoxide::error::CdpError) -> Self {
        AppError::Browser(BrowserError::ScriptExecutionFailed {
            source: Box::new(err),
        })
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::File(FileError::JsonParseFailed {
            source: Box::new(err),
        })
    }
}

impl From<toml::de::Error> for AppError {
    fn from(err: toml::de::Error) -> Self {
        AppError::File(FileError::TomlParseFailed {
            path: String::new(), // TOML错误通常不包含路径信息
            source: Box::new(err),
        })
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::File(FileError::ReadFailed {
            path: String::new(),
            source: Box::new(err),
        })
    }
}

// ========== 便捷构造函数 ==========

impl AppError {
    /// 创建浏览器连接错误
    pub fn browser_connection_failed(
        port: u16,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        AppError::Browser(BrowserError::ConnectionFailed {
            port,
            source: Box::new(source),
        })
    }

    /// 创建文件读取错误
    pub fn file_read_failed(
        path: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        AppError::File(FileError::ReadFailed {
            path: path.into(),
            source: Box::new(source),
        })
    }

    /// 创建元素未找到错误
    pub fn element_not_found(selector: impl Into<String>) -> Self {
        AppError::Assertion(AssertionError::ElementNotFound {
            selector: selector.into(),
        })
    }

    /// 是否为断言失败（测试失败而非环境故障）
    pub fn is_assertion(&self) -> bool {
        matches!(self, AppError::Assertion(_) | AppError::Poll(_))
    }
}

// ========== Result 类型别名 ==========

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;
