//! Filter engine plumbing: one-shot invocations and the document check.

mod invoke;
mod validate;

#[cfg(test)]
mod tests;

pub use invoke::run;
pub use validate::{is_valid, IDENTITY_FILTER};
