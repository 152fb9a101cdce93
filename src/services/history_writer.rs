//! 会话记录服务 - 业务能力层
//!
//! 只负责把每次操作的结果追加到记录文件

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::debug;

use crate::error::Operation;

/// 会话记录服务
pub struct HistoryWriter {
    path: PathBuf,
}

impl HistoryWriter {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// 写入文件头（覆盖旧文件）
    pub fn init_log_file(&self) -> Result<()> {
        let header = format!(
            "{}\n文档编排会话记录 - {}\n{}\n\n",
            "=".repeat(60),
            chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
            "=".repeat(60)
        );
        fs::write(&self.path, header)
            .with_context(|| format!("无法写入记录文件: {}", self.path.display()))?;
        Ok(())
    }

    /// 追加一条操作记录
    pub fn record(&self, operation: Operation, outcome: &str, detail: &str) -> Result<()> {
        debug!("记录: {} {} | {}", operation, outcome, detail);

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .with_context(|| format!("无法打开记录文件: {}", self.path.display()))?;

        let line = format!(
            "[{}] {} {} | {}\n",
            chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
            operation,
            outcome,
            detail
        );
        file.write_all(line.as_bytes())?;

        Ok(())
    }
}
