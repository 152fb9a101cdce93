//! # Doc Orchestrator
//!
//! 文档提交 → 结构化提取 → 告警转发的客户端工作流
//!
//! ## 架构设计
//!
//! 本系统采用四层架构：
//!
//! ### ① 基础设施层（Clients）
//! - `clients/` - 持有唯一的 HTTP 客户端，只暴露 multipart / JSON 请求能力
//!
//! ### ② 业务能力层（Services）
//! - `services/` - 描述"我能做什么"
//! - `ProcessingService` - 文档处理（`POST /api/process`）
//! - `AlertService` - 告警转发（`POST /api/send-webhook`）
//! - `HistoryWriter` - 写会话记录
//!
//! ### ③ 流程层（Workflow）
//! - `workflow/` - 请求生命周期状态机
//! - `WorkflowState` - 纯状态转换
//! - `WorkflowController` - 前置检查、进行中标志、调用服务、写回结果
//!
//! ### ④ 编排层（Orchestration）
//! - `orchestrator/app` - 命令行一次运行的完整流程

pub mod clients;
pub mod config;
pub mod error;
pub mod models;
pub mod orchestrator;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use config::Config;
pub use error::{AppError, AppResult, Operation, ServiceError, ValidationError};
pub use models::{AlertResult, DocumentInput, ProcessResult, StructuredJson};
pub use orchestrator::{App, RunReport, RunRequest};
pub use workflow::{Controls, Outcome, WorkflowController, WorkflowState};
