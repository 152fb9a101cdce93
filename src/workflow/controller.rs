//! 工作流控制器 - 流程层
//!
//! 持有全部状态，驱动文档处理与告警发送两条通道：
//! 1. 前置条件检查（同步，失败时不触碰状态与网络）
//! 2. 置位进行中标志
//! 3. 调用外部服务（唯一的挂起点）
//! 4. 成功时整体替换结果；失败时保留原有结果
//! 5. 最后释放进行中标志（无论成功、失败还是 future 被丢弃）

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::{error, info, warn};

use crate::error::{AppError, AppResult, Operation, ValidationError};
use crate::models::{AlertRequest, AlertResult, DocumentInput, IntakeRequest, ProcessResult};
use crate::services::{AlertService, ProcessingService};
use crate::utils::logging::truncate_text;
use crate::workflow::state::{Controls, Event, WorkflowState};

/// 一次操作的结果
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome<T> {
    /// 结果已写入状态
    Applied(T),
    /// 请求期间状态已被重置或替换，响应被丢弃
    Discarded,
}

impl<T> Outcome<T> {
    pub fn applied(self) -> Option<T> {
        match self {
            Outcome::Applied(value) => Some(value),
            Outcome::Discarded => None,
        }
    }

    pub fn is_discarded(&self) -> bool {
        matches!(self, Outcome::Discarded)
    }
}

/// 工作流控制器
pub struct WorkflowController {
    state: Mutex<WorkflowState>,
    processing: Arc<dyn ProcessingService>,
    alerts: Arc<dyn AlertService>,
}

impl WorkflowController {
    pub fn new(processing: Arc<dyn ProcessingService>, alerts: Arc<dyn AlertService>) -> Self {
        Self {
            state: Mutex::new(WorkflowState::default()),
            processing,
            alerts,
        }
    }

    /// 当前状态的副本
    pub fn snapshot(&self) -> WorkflowState {
        self.lock().clone()
    }

    pub fn controls(&self) -> Controls {
        self.lock().controls()
    }

    /// 选择（或取消选择）文档
    pub fn select_document(&self, document: Option<DocumentInput>) {
        if let Some(doc) = &document {
            info!("📄 已选择文档: {} ({} 字节)", doc.file_name(), doc.len());
        }
        self.apply(Event::DocumentSelected(document));
    }

    pub fn set_question(&self, question: impl Into<String>) {
        self.apply(Event::QuestionChanged(question.into()));
    }

    pub fn set_recipient(&self, recipient: impl Into<String>) {
        self.apply(Event::RecipientChanged(recipient.into()));
    }

    /// 清空文档、问题、处理结果和告警结果，保留收件人
    pub fn reset(&self) {
        info!("🔄 重置表单");
        self.apply(Event::Reset);
    }

    /// 提交文档与问题，获取文本和结构化数据
    pub async fn submit_intake(&self) -> AppResult<Outcome<ProcessResult>> {
        let (request, epoch, _guard) = {
            let mut state = self.lock();
            let document = state.document.clone().ok_or_else(|| {
                warn!("⚠️ 未选择文档，无法处理");
                ValidationError::MissingDocument
            })?;
            if state.intake_in_flight {
                return Err(AppError::InFlight(Operation::Intake));
            }

            let request = IntakeRequest {
                document,
                question: state.question.clone(),
            };
            let epoch = state.epoch;
            let guard = InFlightGuard::acquire(self, &mut state, Operation::Intake);
            (request, epoch, guard)
        };

        info!(
            "📤 正在处理文档 {}，问题: {}",
            request.document.file_name(),
            truncate_text(&request.question, 80)
        );

        match self.processing.process(request).await {
            Ok(result) => {
                if !self.apply_if_current(epoch, Event::IntakeSucceeded(result.clone())) {
                    warn!("⚠️ 处理期间表单已重置，丢弃过期的处理结果");
                    return Ok(Outcome::Discarded);
                }
                info!(
                    "✓ 文档处理完成，文本 {} 字符，结构化字段 {} 个",
                    result.text.chars().count(),
                    result.structured_json.len()
                );
                Ok(Outcome::Applied(result))
            }
            Err(e) => {
                error!("❌ 文档处理失败: {}", e);
                Err(AppError::Processing(e))
            }
        }
    }

    /// 将处理结果、问题和收件人转发给告警服务
    pub async fn submit_alert(&self) -> AppResult<Outcome<AlertResult>> {
        let (request, epoch, _guard) = {
            let mut state = self.lock();
            let result = state.process_result.as_ref().ok_or_else(|| {
                warn!("⚠️ 文档尚未处理，无法发送告警");
                ValidationError::DocumentNotProcessed
            })?;
            if state.recipient.is_empty() {
                warn!("⚠️ 未填写收件人");
                return Err(ValidationError::MissingRecipient.into());
            }
            if state.alert_in_flight {
                return Err(AppError::InFlight(Operation::AlertDispatch));
            }

            let request = AlertRequest::new(result, &state.question, &state.recipient);
            let epoch = state.epoch;
            let guard = InFlightGuard::acquire(self, &mut state, Operation::AlertDispatch);
            (request, epoch, guard)
        };

        info!("📨 正在发送告警至 {}", request.recipient_email);

        match self.alerts.send_webhook(&request).await {
            Ok(result) => {
                if !self.apply_if_current(epoch, Event::AlertSucceeded(result.clone())) {
                    warn!("⚠️ 发送期间处理结果已变化，丢弃过期的告警结果");
                    return Ok(Outcome::Discarded);
                }
                info!("✓ 告警发送成功");
                Ok(Outcome::Applied(result))
            }
            Err(e) => {
                error!("❌ 告警发送失败: {}", e);
                Err(AppError::Alert(e))
            }
        }
    }

    fn lock(&self) -> MutexGuard<'_, WorkflowState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn apply(&self, event: Event) {
        let mut state = self.lock();
        Self::apply_locked(&mut state, event);
    }

    /// 仅当状态代数未变化时应用事件
    fn apply_if_current(&self, epoch: u64, event: Event) -> bool {
        let mut state = self.lock();
        if state.epoch != epoch {
            return false;
        }
        Self::apply_locked(&mut state, event);
        true
    }

    fn apply_locked(state: &mut WorkflowState, event: Event) {
        let current = std::mem::take(state);
        *state = current.transition(event);
    }
}

/// 进行中标志：创建时置位，drop 时释放
struct InFlightGuard<'a> {
    controller: &'a WorkflowController,
    operation: Operation,
}

impl<'a> InFlightGuard<'a> {
    fn acquire(
        controller: &'a WorkflowController,
        state: &mut WorkflowState,
        operation: Operation,
    ) -> Self {
        let event = match operation {
            Operation::Intake => Event::IntakeStarted,
            Operation::AlertDispatch => Event::AlertStarted,
        };
        WorkflowController::apply_locked(state, event);
        Self {
            controller,
            operation,
        }
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        let event = match self.operation {
            Operation::Intake => Event::IntakeFinished,
            Operation::AlertDispatch => Event::AlertFinished,
        };
        self.controller.apply(event);
    }
}
