/// 后端 HTTP 客户端
///
/// 持有唯一的 reqwest::Client 与服务地址，只暴露"发请求"的能力
use std::time::Duration;

use reqwest::multipart::Form;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use crate::config::Config;
use crate::error::ServiceError;

/// 后端 API 客户端
#[derive(Clone, Debug)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    /// 创建新的客户端
    pub fn new(config: &Config) -> Result<Self, ServiceError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|source| ServiceError::Request {
                endpoint: config.api_base_url.clone(),
                source,
            })?;

        Ok(Self {
            client,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn build_url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// 发送 multipart 表单并解析 JSON 响应
    pub async fn post_multipart<T: DeserializeOwned>(
        &self,
        path: &str,
        form: Form,
    ) -> Result<T, ServiceError> {
        let url = self.build_url(path);
        debug!("POST (multipart) {}", url);

        let response = self
            .client
            .post(&url)
            .multipart(form)
            .send()
            .await
            .map_err(|source| ServiceError::Request {
                endpoint: path.to_string(),
                source,
            })?;

        Self::decode(path, response).await
    }

    /// 发送 JSON 请求体并解析 JSON 响应
    pub async fn post_json<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ServiceError> {
        let url = self.build_url(path);
        debug!("POST (json) {}", url);

        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|source| ServiceError::Request {
                endpoint: path.to_string(),
                source,
            })?;

        Self::decode(path, response).await
    }

    /// 检查状态码并反序列化响应体
    async fn decode<T: DeserializeOwned>(path: &str, response: Response) -> Result<T, ServiceError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ServiceError::Status {
                endpoint: path.to_string(),
                status: status.as_u16(),
                body,
            });
        }

        let bytes = response.bytes().await.map_err(|source| ServiceError::Request {
            endpoint: path.to_string(),
            source,
        })?;

        serde_json::from_slice(&bytes).map_err(|e| ServiceError::Decode {
            endpoint: path.to_string(),
            message: e.to_string(),
        })
    }
}
