pub mod controller;
pub mod state;

pub use controller::{Outcome, WorkflowController};
pub use state::{Controls, Event, WorkflowState};
