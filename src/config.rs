use std::time::Duration;

/// 程序配置
#[derive(Clone, Debug)]
pub struct Config {
    /// 被测系统入口 URL
    pub base_url: String,
    /// 浏览器调试端口（非 headless 模式下连接已有浏览器）
    pub browser_debug_port: u16,
    /// 是否自行启动无头浏览器
    pub headless: bool,
    /// 浏览器可执行文件路径（为空时由 chromiumoxide 自动查找）
    pub chrome_executable: Option<String>,
    /// 用户定义文件
    pub users_file: String,
    /// 登录密码，所有测试用户共用
    pub password: Option<String>,
    /// 下载目录
    pub download_dir: String,
    /// 场景 TOML 文件存放目录
    pub scenario_folder: String,
    /// 轮询间隔（秒）
    pub poll_interval_secs: u64,
    /// 轮询总超时（秒）
    pub poll_timeout_secs: u64,
    /// 单个下载的等待上限（秒）
    pub download_timeout_secs: u64,
    /// 至少应生成的邀请数量
    pub min_invitations: u32,
    /// 是否显示详细日志
    pub verbose_logging: bool,
    /// 输出日志文件
    pub output_log_file: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080/bcss/".to_string(),
            browser_debug_port: 9222,
            headless: true,
            chrome_executable: None,
            users_file: "users.json".to_string(),
            password: None,
            download_dir: "downloads".to_string(),
            scenario_folder: "scenarios".to_string(),
            poll_interval_secs: 5,
            poll_timeout_secs: 120,
            download_timeout_secs: 30,
            min_invitations: 5,
            verbose_logging: false,
            output_log_file: "output.txt".to_string(),
        }
    }
}

impl Config {
    /// 从环境变量加载配置，`.env` 中的值会先被载入
    pub fn from_env() -> Self {
        let _ = dotenvy::dotenv();
        let default = Self::default();
        Self {
            base_url: std::env::var("BCSS_BASE_URL").unwrap_or(default.base_url),
            browser_debug_port: std::env::var("BROWSER_DEBUG_PORT").ok().and_then(|v| v.parse().ok()).unwrap_or(default.browser_debug_port),
            headless: std::env::var("HEADLESS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.headless),
            chrome_executable: std::env::var("CHROME_EXECUTABLE").ok().filter(|v| !v.is_empty()).or(default.chrome_executable),
            users_file: std::env::var("USERS_FILE").unwrap_or(default.users_file),
            password: std::env::var("BCSS_PASS").ok().or(default.password),
            download_dir: std::env::var("DOWNLOAD_DIR").unwrap_or(default.download_dir),
            scenario_folder: std::env::var("SCENARIO_FOLDER").unwrap_or(default.scenario_folder),
            poll_interval_secs: std::env::var("POLL_INTERVAL_SECS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.poll_interval_secs),
            poll_timeout_secs: std::env::var("POLL_TIMEOUT_SECS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.poll_timeout_secs),
            download_timeout_secs: std::env::var("DOWNLOAD_TIMEOUT_SECS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.download_timeout_secs),
            min_invitations: std::env::var("MIN_INVITATIONS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.min_invitations),
            verbose_logging: std::env::var("VERBOSE_LOGGING").ok().and_then(|v| v.parse().ok()).unwrap_or(default.verbose_logging),
            output_log_file: std::env::var("OUTPUT_LOG_FILE").unwrap_or(default.output_log_file),
        }
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs)
    }

    pub fn poll_timeout(&self) -> Duration {
        Duration::from_secs(self.poll_timeout_secs)
    }

    pub fn download_timeout(&self) -> Duration {
        Duration::from_secs(self.download_timeout_secs)
    }
}
