//! 待提交的文档

use std::path::Path;

use tokio::fs;
use tracing::{debug, warn};

use crate::error::{AppError, AppResult};

/// 建议的文档扩展名（仅作提示，不做强制过滤）
pub const SUGGESTED_EXTENSIONS: [&str; 2] = ["pdf", "txt"];

/// 用户选择的文档
///
/// 选择时整体创建，重新选择或重置时整体替换，不做局部修改。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentInput {
    bytes: Vec<u8>,
    file_name: String,
    media_type: String,
}

impl DocumentInput {
    pub fn new(
        bytes: impl Into<Vec<u8>>,
        file_name: impl Into<String>,
        media_type: impl Into<String>,
    ) -> Self {
        Self {
            bytes: bytes.into(),
            file_name: file_name.into(),
            media_type: media_type.into(),
        }
    }

    /// 从磁盘读取文档，媒体类型按扩展名推断
    pub async fn from_path(path: &Path) -> AppResult<Self> {
        let bytes = fs::read(path).await.map_err(|source| AppError::File {
            path: path.display().to_string(),
            source,
        })?;

        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| "document".to_string());

        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());

        if !extension
            .as_deref()
            .is_some_and(|ext| SUGGESTED_EXTENSIONS.contains(&ext))
        {
            warn!("⚠️ 文件 {} 不是 PDF / TXT，仍然继续提交", file_name);
        }

        let media_type = media_type_for(extension.as_deref());
        debug!("已读取文档 {} ({} 字节, {})", file_name, bytes.len(), media_type);

        Ok(Self::new(bytes, file_name, media_type))
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn media_type(&self) -> &str {
        &self.media_type
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

fn media_type_for(extension: Option<&str>) -> &'static str {
    match extension {
        Some("pdf") => "application/pdf",
        Some("txt") => "text/plain",
        _ => "application/octet-stream",
    }
}
