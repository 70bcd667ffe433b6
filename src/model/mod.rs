//! Domain views over the host platform's live object graph.
//!
//! Nothing here is persisted: every value is a snapshot taken from Discord for
//! the duration of a single command. The platform layer converts serenity's
//! models into these views so that checks and handlers can be exercised
//! without a gateway connection.

pub mod channel;
pub mod context;
pub mod member;
pub mod message;
pub mod name;
pub mod reply;
