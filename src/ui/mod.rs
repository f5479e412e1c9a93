pub mod chat;
pub mod output;
mod transcript;

pub use output::LiveOutput;
pub use transcript::{Direction, Transcript, TranscriptEntry};
