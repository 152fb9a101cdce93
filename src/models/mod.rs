pub mod document;
pub mod request;
pub mod result;

pub use document::DocumentInput;
pub use request::{AlertRequest, IntakeRequest, ProcessResponse, WebhookResponse};
pub use result::{AlertResult, ProcessResult, StructuredJson};
