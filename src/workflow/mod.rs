pub mod attempt_counter;
pub mod selection_flow;

pub use attempt_counter::{AttemptCounter, MAX_FAILED_ATTEMPTS};
pub use selection_flow::{Outcome, Rejection, SelectionPipeline, MAX_IMAGE_BYTES};
