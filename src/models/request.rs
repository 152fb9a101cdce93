//! 与后端服务交互的请求 / 响应结构

use serde::{Deserialize, Serialize};

use crate::models::document::DocumentInput;
use crate::models::result::{AlertResult, ProcessResult, StructuredJson};

/// 文档处理请求：原始文件 + 问题
#[derive(Debug, Clone)]
pub struct IntakeRequest {
    pub document: DocumentInput,
    pub question: String,
}

/// 告警请求体
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertRequest {
    pub text: String,
    pub structured_json: StructuredJson,
    pub question: String,
    pub recipient_email: String,
}

impl AlertRequest {
    pub fn new(result: &ProcessResult, question: &str, recipient: &str) -> Self {
        Self {
            text: result.text.clone(),
            structured_json: result.structured_json.clone(),
            question: question.to_string(),
            recipient_email: recipient.to_string(),
        }
    }
}

/// 文档处理响应
pub type ProcessResponse = ProcessResult;

/// 告警响应：`{ "n8n": { ... } }`
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct WebhookResponse {
    pub n8n: AlertResult,
}
