//! 工作流状态 - 纯状态转换
//!
//! 每次转换都是 (旧状态, 事件) → 新状态，不做任何 IO

use crate::models::{AlertResult, DocumentInput, ProcessResult};

/// 控制器持有的全部状态，初始为空
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WorkflowState {
    pub document: Option<DocumentInput>,
    pub question: String,
    pub process_result: Option<ProcessResult>,
    pub recipient: String,
    pub alert_result: Option<AlertResult>,
    pub intake_in_flight: bool,
    pub alert_in_flight: bool,
    /// 重置或处理成功时递增，用于丢弃过期响应
    pub epoch: u64,
}

/// 状态转换事件
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    DocumentSelected(Option<DocumentInput>),
    QuestionChanged(String),
    RecipientChanged(String),
    IntakeStarted,
    IntakeSucceeded(ProcessResult),
    IntakeFinished,
    AlertStarted,
    AlertSucceeded(AlertResult),
    AlertFinished,
    Reset,
}

/// 各触发控件是否可用
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Controls {
    pub process_enabled: bool,
    pub reset_enabled: bool,
    pub send_alert_enabled: bool,
    pub alert_section_visible: bool,
}

impl WorkflowState {
    pub fn transition(self, event: Event) -> Self {
        match event {
            Event::DocumentSelected(document) => Self { document, ..self },
            Event::QuestionChanged(question) => Self { question, ..self },
            Event::RecipientChanged(recipient) => Self { recipient, ..self },
            Event::IntakeStarted => Self {
                intake_in_flight: true,
                ..self
            },
            // 新结果与旧告警结果不能同时存在
            Event::IntakeSucceeded(result) => Self {
                process_result: Some(result),
                alert_result: None,
                epoch: self.epoch + 1,
                ..self
            },
            Event::IntakeFinished => Self {
                intake_in_flight: false,
                ..self
            },
            Event::AlertStarted => Self {
                alert_in_flight: true,
                ..self
            },
            Event::AlertSucceeded(result) => Self {
                alert_result: Some(result),
                ..self
            },
            Event::AlertFinished => Self {
                alert_in_flight: false,
                ..self
            },
            // recipient 与进行中的标志保留
            Event::Reset => Self {
                document: None,
                question: String::new(),
                process_result: None,
                alert_result: None,
                epoch: self.epoch + 1,
                ..self
            },
        }
    }

    pub fn controls(&self) -> Controls {
        Controls {
            process_enabled: !self.intake_in_flight,
            reset_enabled: !self.intake_in_flight,
            send_alert_enabled: !self.alert_in_flight,
            alert_section_visible: self.process_result.is_some(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Map};

    fn result(text: &str) -> ProcessResult {
        let mut structured = Map::new();
        structured.insert("a".to_string(), json!(1));
        ProcessResult::new(text, structured)
    }

    fn alert(status: &str) -> AlertResult {
        let mut map = Map::new();
        map.insert("status".to_string(), json!(status));
        map
    }

    fn populated() -> WorkflowState {
        WorkflowState::default()
            .transition(Event::DocumentSelected(Some(DocumentInput::new(
                b"abc".to_vec(),
                "a.txt",
                "text/plain",
            ))))
            .transition(Event::QuestionChanged("due date?".to_string()))
            .transition(Event::RecipientChanged("a@b.com".to_string()))
            .transition(Event::IntakeSucceeded(result("hello")))
            .transition(Event::AlertSucceeded(alert("ok")))
    }

    #[test]
    fn test_initial_state_is_empty() {
        let state = WorkflowState::default();
        assert!(state.document.is_none());
        assert!(state.question.is_empty());
        assert!(state.process_result.is_none());
        assert!(state.alert_result.is_none());
        assert!(!state.intake_in_flight && !state.alert_in_flight);
    }

    #[test]
    fn test_intake_success_clears_previous_alert() {
        let state = populated().transition(Event::IntakeSucceeded(result("second")));
        assert_eq!(state.process_result.unwrap().text, "second");
        assert!(state.alert_result.is_none());
    }

    #[test]
    fn test_reset_keeps_recipient() {
        let before = populated();
        let epoch = before.epoch;
        let state = before.transition(Event::Reset);

        assert!(state.document.is_none());
        assert!(state.question.is_empty());
        assert!(state.process_result.is_none());
        assert!(state.alert_result.is_none());
        assert_eq!(state.recipient, "a@b.com");
        assert_eq!(state.epoch, epoch + 1);
    }

    #[test]
    fn test_reset_does_not_release_in_flight_flags() {
        let state = WorkflowState::default()
            .transition(Event::IntakeStarted)
            .transition(Event::Reset);
        assert!(state.intake_in_flight);
        assert!(!state.controls().reset_enabled);
    }

    #[test]
    fn test_select_document_touches_nothing_else() {
        let before = populated();
        let after = before.clone().transition(Event::DocumentSelected(None));
        assert!(after.document.is_none());
        assert_eq!(after.process_result, before.process_result);
        assert_eq!(after.alert_result, before.alert_result);
        assert_eq!(after.epoch, before.epoch);
    }

    #[test]
    fn test_controls() {
        let state = WorkflowState::default();
        let controls = state.controls();
        assert!(controls.process_enabled);
        assert!(controls.send_alert_enabled);
        assert!(!controls.alert_section_visible);

        let state = populated().transition(Event::AlertStarted);
        let controls = state.controls();
        assert!(controls.alert_section_visible);
        assert!(!controls.send_alert_enabled);
        assert!(controls.process_enabled);
    }
}
