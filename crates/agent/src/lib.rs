//! The triage pipeline at the heart of MedTriage.
//!
//! One user turn flows strictly in order:
//!
//! 1. **Gather** background text from trusted sources (optional)
//! 2. **Compose** the instruction prompt with the fixed output schema
//! 3. **Complete** via the configured provider
//! 4. **Extract** a validated [`TriageResult`](medtriage_core::TriageResult),
//!    degrading instead of failing when the output is malformed
//! 5. **Present** the result as ordered display segments
//!
//! The off-topic pre-filter and the chat session sit in front of the
//! pipeline and are not part of its contract.

pub mod extract;
pub mod pipeline;
pub mod prefilter;
pub mod present;
pub mod prompt;
pub mod session;

pub use extract::extract;
pub use pipeline::{TriageAgent, TriageReport};
pub use prefilter::OffTopicFilter;
pub use present::{Segment, present, render_markdown};
pub use prompt::compose;
pub use session::ChatSession;

#[cfg(test)]
pub(crate) mod test_helpers;
