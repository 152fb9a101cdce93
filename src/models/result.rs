//! 处理结果与告警结果

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// 提取出的结构化数据（JSON 对象）
pub type StructuredJson = Map<String, Value>;

/// 告警服务返回的下游自动化结果（不透明 JSON 对象）
pub type AlertResult = Map<String, Value>;

/// 文档处理结果，仅在处理成功后创建，创建后不再修改
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessResult {
    pub text: String,
    pub structured_json: StructuredJson,
}

impl ProcessResult {
    pub fn new(text: impl Into<String>, structured_json: StructuredJson) -> Self {
        Self {
            text: text.into(),
            structured_json,
        }
    }

    /// 结构化数据的格式化输出
    pub fn pretty_json(&self) -> String {
        serde_json::to_string_pretty(&self.structured_json).unwrap_or_else(|_| "{}".to_string())
    }
}
