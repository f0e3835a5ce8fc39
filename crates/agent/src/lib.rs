//! The Wayfinder agent loop: think, act, observe.
//!
//! Three pieces make up the loop:
//! - [`parser`] extracts a Thought/Action step from raw model output,
//! - [`dispatch`] executes the action against the tool registry and
//!   renders every outcome as an observation string,
//! - [`runner`] drives the iterations and owns the transcript.

pub mod dispatch;
pub mod parser;
pub mod runner;

#[cfg(test)]
pub(crate) mod test_helpers;

pub use dispatch::{ActionDispatcher, FINISH_MARKER};
pub use parser::{LabelPattern, OutputParser, Step};
pub use runner::{ReactAgent, RunState, DEFAULT_MAX_ITERATIONS, INCOMPLETE_ANSWER};
