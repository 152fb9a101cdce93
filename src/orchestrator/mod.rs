//! 编排层（Orchestration Layer）
//!
//! 负责应用生命周期：构建服务、驱动工作流控制器、输出结果与会话记录。
//!
//! ```text
//! orchestrator::App (命令行一次运行)
//!     ↓
//! workflow::WorkflowController (状态 + 两条通道)
//!     ↓
//! services (能力层：process / send-webhook / history)
//!     ↓
//! clients::ApiClient (基础设施：HTTP)
//! ```

pub mod app;

pub use app::{App, RunReport, RunRequest};
