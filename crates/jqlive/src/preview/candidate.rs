use std::sync::Arc;

/// The single live entry offered to the list UI: what the user typed, paired
/// with the engine output it produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    label: String,
    payload: Arc<str>,
    generation: u64,
}

impl Candidate {
    pub fn new(label: impl Into<String>, payload: Arc<str>, generation: u64) -> Self {
        Self {
            label: label.into(),
            payload,
            generation,
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn payload(&self) -> &str {
        &self.payload
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}
