//! 告警服务 - 业务能力层
//!
//! 只负责"把结构化数据和收件人转发给 webhook"

use async_trait::async_trait;
use tracing::debug;

use crate::clients::ApiClient;
use crate::error::ServiceError;
use crate::models::{AlertRequest, AlertResult, WebhookResponse};

/// 告警发送接口
pub const SEND_WEBHOOK_PATH: &str = "/api/send-webhook";

/// 告警服务
#[async_trait]
pub trait AlertService: Send + Sync {
    /// 返回下游自动化系统的嵌套结果（响应中的 `n8n` 对象）
    async fn send_webhook(&self, request: &AlertRequest) -> Result<AlertResult, ServiceError>;
}

/// 基于 HTTP 的告警服务
pub struct HttpAlertService {
    client: ApiClient,
}

impl HttpAlertService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl AlertService for HttpAlertService {
    async fn send_webhook(&self, request: &AlertRequest) -> Result<AlertResult, ServiceError> {
        debug!("发送告警至 {}", request.recipient_email);
        let response: WebhookResponse = self.client.post_json(SEND_WEBHOOK_PATH, request).await?;
        Ok(response.n8n)
    }
}
