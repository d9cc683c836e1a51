pub mod error;

pub mod app;
pub mod cli;
pub mod clipboard;
pub mod commit;
pub mod config;
pub mod engine;
pub mod frontend;
pub mod generation;
pub mod highlight;
pub mod logging;
pub mod preview;
pub mod session;
pub mod shorthand;
pub mod tui;

#[cfg(test)]
pub(crate) mod testing;

pub use crate::config::Config;
pub use crate::error::{CoreError, CoreResult, InvocationFailure};
pub use crate::preview::{Candidate, PreviewController};
pub use crate::session::Session;
pub use crate::shorthand::{expand, ShorthandTable};
