use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{error, info, warn};

use crate::clients::ApiClient;
use crate::config::Config;
use crate::error::{AppError, Operation};
use crate::models::{AlertResult, DocumentInput, ProcessResult};
use crate::services::{HistoryWriter, HttpAlertService, HttpProcessingService};
use crate::utils::logging::log_startup;
use crate::workflow::{Outcome, WorkflowController};

/// 一次命令行运行的输入
#[derive(Debug, Clone)]
pub struct RunRequest {
    pub file: PathBuf,
    pub question: String,
    pub recipient: Option<String>,
}

/// 一次运行的结果
#[derive(Debug, Default)]
pub struct RunReport {
    pub process_result: Option<ProcessResult>,
    pub alert_result: Option<AlertResult>,
}

/// 应用主结构
pub struct App {
    controller: WorkflowController,
    history: HistoryWriter,
}

impl App {
    /// 初始化应用：构建 HTTP 客户端与两个服务，写入记录文件头
    pub fn initialize(config: Config) -> Result<Self> {
        log_startup(&config);

        let client = ApiClient::new(&config).context("无法创建 HTTP 客户端")?;
        let controller = WorkflowController::new(
            Arc::new(HttpProcessingService::new(client.clone())),
            Arc::new(HttpAlertService::new(client)),
        );

        let history = HistoryWriter::new(&config.output_log_file);
        history.init_log_file()?;

        Ok(Self {
            controller,
            history,
        })
    }

    pub fn controller(&self) -> &WorkflowController {
        &self.controller
    }

    /// 运行主流程：处理文档，若给出收件人则继续发送告警
    pub async fn run(&self, request: RunRequest) -> Result<RunReport> {
        let document = DocumentInput::from_path(&request.file).await?;
        let file_name = document.file_name().to_string();

        self.controller.select_document(Some(document));
        self.controller.set_question(request.question);

        let mut report = RunReport::default();

        match self.controller.submit_intake().await {
            Ok(Outcome::Applied(result)) => {
                self.record(Operation::Intake, "succeeded", &file_name);
                println!("{}", result.text);
                println!("{}", result.pretty_json());
                report.process_result = Some(result);
            }
            Ok(Outcome::Discarded) => {
                self.record(Operation::Intake, "discarded", &file_name);
                return Ok(report);
            }
            Err(e) => return Err(self.fail(Operation::Intake, e)),
        }

        let Some(recipient) = request.recipient else {
            info!("未提供收件人，跳过告警发送");
            return Ok(report);
        };
        self.controller.set_recipient(recipient.clone());

        match self.controller.submit_alert().await {
            Ok(Outcome::Applied(result)) => {
                self.record(Operation::AlertDispatch, "succeeded", &recipient);
                info!("✅ Alert sent successfully!");
                println!(
                    "{}",
                    serde_json::to_string_pretty(&result).unwrap_or_else(|_| "{}".to_string())
                );
                report.alert_result = Some(result);
            }
            Ok(Outcome::Discarded) => {
                warn!("⚠️ 告警结果已过期，未显示");
                self.record(Operation::AlertDispatch, "discarded", &recipient);
            }
            Err(e) => return Err(self.fail(Operation::AlertDispatch, e)),
        }

        Ok(report)
    }

    /// 写入会话记录；写入失败不影响本次运行结果
    fn record(&self, operation: Operation, outcome: &str, detail: &str) {
        if let Err(write_err) = self.history.record(operation, outcome, detail) {
            warn!("写入记录文件失败: {}", write_err);
        }
    }

    /// 记录失败并转换为带用户提示的错误
    fn fail(&self, operation: Operation, err: AppError) -> anyhow::Error {
        if err.is_validation() {
            warn!("⚠️ {}", err.user_message());
        } else {
            error!("❌ {}", err.user_message());
        }
        self.record(operation, "failed", &err.to_string());
        let message = err.user_message();
        anyhow::Error::new(err).context(message)
    }
}
