//! Chat relay domain module.
//!
//! Pure, synchronous pieces of the chat route: message types, envelope
//! extraction and the placeholder agent pipeline.

mod envelope;
mod message;
mod pipeline;

pub use envelope::{extract_user_text, ENVELOPE_MARKER, USER_TEXT_BEGIN, USER_TEXT_END};
pub use message::{latest_user_message, ChatMessage, ChatRole, ChatStep};
pub use pipeline::{build, plan, research, review, run_pipeline, PipelineRun, Stage, STAGES};
