pub mod alert;
pub mod history_writer;
pub mod processing;

pub use alert::{AlertService, HttpAlertService};
pub use history_writer::HistoryWriter;
pub use processing::{HttpProcessingService, ProcessingService};
