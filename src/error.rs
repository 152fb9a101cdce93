use std::fmt;

use thiserror::Error;

/// 工作流操作类型（两条互相独立的通道）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// 文档提交（Intake）
    Intake,
    /// 告警发送（AlertDispatch）
    AlertDispatch,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::Intake => write!(f, "intake"),
            Operation::AlertDispatch => write!(f, "alert"),
        }
    }
}

/// 应用程序错误类型
#[derive(Debug, Error)]
pub enum AppError {
    /// 前置条件不满足（网络调用之前同步检测）
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),
    /// 文档处理服务调用失败
    #[error("processing error: {0}")]
    Processing(#[source] ServiceError),
    /// 告警服务调用失败
    #[error("alert error: {0}")]
    Alert(#[source] ServiceError),
    /// 同类操作仍在进行中
    #[error("{0} request already in flight")]
    InFlight(Operation),
    /// 配置错误
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
    /// 文件读取失败
    #[error("failed to read file {path}: {source}")]
    File {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// 前置条件错误
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("missing document")]
    MissingDocument,
    #[error("document not processed")]
    DocumentNotProcessed,
    #[error("missing recipient")]
    MissingRecipient,
}

/// 远程服务调用错误
#[derive(Debug, Error)]
pub enum ServiceError {
    /// 网络请求失败
    #[error("request to {endpoint} failed: {source}")]
    Request {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },
    /// 非 2xx 响应
    #[error("{endpoint} returned status {status}: {body}")]
    Status {
        endpoint: String,
        status: u16,
        body: String,
    },
    /// 响应体格式错误
    #[error("malformed response from {endpoint}: {message}")]
    Decode { endpoint: String, message: String },
}

/// 配置错误
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 配置文件读取失败
    #[error("cannot read config file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// TOML 解析失败
    #[error("cannot parse config file {path}: {source}")]
    TomlParse {
        path: String,
        #[source]
        source: toml::de::Error,
    },
    /// 配置值不合法
    #[error("invalid value for {key}: {value}")]
    InvalidValue { key: String, value: String },
}

impl AppError {
    /// 面向用户的提示信息（阻塞式通知的文本）
    pub fn user_message(&self) -> &'static str {
        match self {
            AppError::Validation(ValidationError::MissingDocument) => "Please upload a file first.",
            AppError::Validation(ValidationError::DocumentNotProcessed) => {
                "Process document first"
            }
            AppError::Validation(ValidationError::MissingRecipient) => "Enter a recipient email",
            AppError::Processing(_) => "Error processing document",
            AppError::Alert(_) => "Error sending alert",
            AppError::InFlight(Operation::Intake) => "Document is already being processed",
            AppError::InFlight(Operation::AlertDispatch) => "Alert is already being sent",
            AppError::Config(_) => "Invalid configuration",
            AppError::File { .. } => "Unable to read the selected file",
        }
    }

    /// 是否为前置条件错误
    pub fn is_validation(&self) -> bool {
        matches!(self, AppError::Validation(_))
    }
}

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_messages() {
        assert_eq!(ValidationError::MissingDocument.to_string(), "missing document");
        assert_eq!(
            ValidationError::DocumentNotProcessed.to_string(),
            "document not processed"
        );
        assert_eq!(ValidationError::MissingRecipient.to_string(), "missing recipient");
    }

    #[test]
    fn test_user_message_distinguishes_alert_failure() {
        let err = AppError::Alert(ServiceError::Status {
            endpoint: "/api/send-webhook".to_string(),
            status: 502,
            body: String::new(),
        });
        assert_eq!(err.user_message(), "Error sending alert");
        assert!(!err.is_validation());

        let err: AppError = ValidationError::MissingRecipient.into();
        assert!(err.is_validation());
        assert_eq!(err.user_message(), "Enter a recipient email");
    }
}
