//! Live preview loop: one engine run per input change, newest input wins.

mod candidate;
mod controller;
mod worker;


pub use candidate::Candidate;
pub use controller::{ApplyOutcome, PreviewController, PreviewState, PreviewUpdates};
pub use worker::PreviewUpdate;
