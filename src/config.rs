use std::path::Path;

use serde::Deserialize;

use crate::error::ConfigError;

/// 程序配置
#[derive(Clone, Debug)]
pub struct Config {
    /// 后端服务地址（文档处理与告警共用）
    pub api_base_url: String,
    /// 单次请求超时（秒）
    pub request_timeout_secs: u64,
    /// 是否显示详细日志
    pub verbose_logging: bool,
    /// 会话记录文件
    pub output_log_file: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:4000".to_string(),
            request_timeout_secs: 60,
            verbose_logging: false,
            output_log_file: "orchestrator_history.txt".to_string(),
        }
    }
}

/// 配置文件中的可选字段，只覆盖出现的键
#[derive(Debug, Default, Deserialize)]
struct FileConfig {
    api_base_url: Option<String>,
    request_timeout_secs: Option<u64>,
    verbose_logging: Option<bool>,
    output_log_file: Option<String>,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// 从任意键值来源构建配置，便于测试
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let default = Self::default();
        let api_base_url = lookup("ORCHESTRATOR_API_URL")
            .or_else(|| lookup("NEXT_PUBLIC_API_URL"))
            .filter(|v| !v.trim().is_empty())
            .unwrap_or(default.api_base_url);

        Self {
            api_base_url: normalize_base_url(&api_base_url),
            request_timeout_secs: lookup("REQUEST_TIMEOUT_SECS").and_then(|v| v.parse::<u64>().ok()).filter(|t| *t > 0).unwrap_or(default.request_timeout_secs),
            verbose_logging: lookup("VERBOSE_LOGGING").and_then(|v| v.parse().ok()).unwrap_or(default.verbose_logging),
            output_log_file: lookup("OUTPUT_LOG_FILE").unwrap_or(default.output_log_file),
        }
    }

    /// 用 TOML 配置文件中出现的键覆盖当前配置
    pub fn merge_toml_file(self, path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        self.merge_toml_str(&content, &path.display().to_string())
    }

    fn merge_toml_str(mut self, content: &str, origin: &str) -> Result<Self, ConfigError> {
        let file: FileConfig = toml::from_str(content).map_err(|source| ConfigError::TomlParse {
            path: origin.to_string(),
            source,
        })?;

        if let Some(url) = file.api_base_url {
            if url.trim().is_empty() {
                return Err(ConfigError::InvalidValue {
                    key: "api_base_url".to_string(),
                    value: url,
                });
            }
            self.api_base_url = normalize_base_url(&url);
        }
        if let Some(timeout) = file.request_timeout_secs {
            if timeout == 0 {
                return Err(ConfigError::InvalidValue {
                    key: "request_timeout_secs".to_string(),
                    value: timeout.to_string(),
                });
            }
            self.request_timeout_secs = timeout;
        }
        if let Some(verbose) = file.verbose_logging {
            self.verbose_logging = verbose;
        }
        if let Some(log_file) = file.output_log_file {
            self.output_log_file = log_file;
        }

        Ok(self)
    }
}

fn normalize_base_url(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}
