//! Chat front ends for MedTriage.
//!
//! A channel relays user turns to the chat session and prints replies.
//! Only the interactive terminal is implemented.

pub mod cli;

pub use cli::CliChannel;
