//! JSON wire types exposed over HTTP.
//!
//! - `chat`: the AI proxy request/response bodies.
//! - `health`: liveness and service-metadata documents.

pub mod chat;
pub mod health;
