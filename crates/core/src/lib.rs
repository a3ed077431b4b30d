//! # MedTriage Core
//!
//! Domain types, traits, and error definitions for the MedTriage assistant.
//! This crate has **no I/O of its own**: it defines the triage result schema
//! and the seams (completion provider, context gatherer, chat channel) that
//! the other crates implement against.
//!
//! ## Pipeline
//!
//! ```text
//! query ─▶ ContextGatherer ─▶ prompt ─▶ Provider ─▶ extractor ─▶ TriageResult
//! ```
//!
//! Every external collaborator is a trait here so it can be swapped via
//! configuration or replaced with a scripted stub in tests.

pub mod channel;
pub mod error;
pub mod gather;
pub mod message;
pub mod provider;
pub mod triage;

// Re-export key types at crate root for ergonomics
pub use channel::{Channel, ChannelId, ChannelMessage};
pub use error::{ChannelError, FetchError, ProviderError};
pub use gather::{ContextGatherer, GatheredContext};
pub use message::{Conversation, ConversationId, Message, Role};
pub use provider::{Provider, ProviderRequest, ProviderResponse, Usage};
pub use triage::{DEFAULT_DISCLAIMER, Reference, TriageLevel, TriageResult};
