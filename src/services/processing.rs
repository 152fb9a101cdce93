//! 文档处理服务 - 业务能力层
//!
//! 只负责"提交文档 + 问题，拿回文本和结构化数据"，不关心流程

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use tracing::debug;

use crate::clients::ApiClient;
use crate::error::ServiceError;
use crate::models::{IntakeRequest, ProcessResponse, ProcessResult};

/// 文档处理接口
pub const PROCESS_PATH: &str = "/api/process";

/// 文档处理服务
#[async_trait]
pub trait ProcessingService: Send + Sync {
    async fn process(&self, request: IntakeRequest) -> Result<ProcessResult, ServiceError>;
}

/// 基于 HTTP 的文档处理服务
pub struct HttpProcessingService {
    client: ApiClient,
}

impl HttpProcessingService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ProcessingService for HttpProcessingService {
    async fn process(&self, request: IntakeRequest) -> Result<ProcessResult, ServiceError> {
        let IntakeRequest { document, question } = request;
        debug!(
            "上传文档 {} ({} 字节)，问题长度: {} 字符",
            document.file_name(),
            document.len(),
            question.chars().count()
        );

        let file_part = Part::bytes(document.bytes().to_vec())
            .file_name(document.file_name().to_string())
            .mime_str(document.media_type())
            .map_err(|source| ServiceError::Request {
                endpoint: PROCESS_PATH.to_string(),
                source,
            })?;

        let form = Form::new().part("file", file_part).text("question", question);

        let response: ProcessResponse = self.client.post_multipart(PROCESS_PATH, form).await?;
        Ok(response)
    }
}
