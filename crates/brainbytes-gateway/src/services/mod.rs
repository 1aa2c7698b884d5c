//! Built-in services.
//!
//! - `ai`: completion provider abstraction and its HTTP implementation.
//! - `chat`: the `POST /api/chat` handler in front of the provider.

pub mod ai;
pub mod chat;

pub use ai::{Completion, CompletionProvider, HttpCompletionProvider};
