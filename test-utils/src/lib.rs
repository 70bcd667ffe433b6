//! Static Bot Test Utils
//!
//! Shared helpers for the bot's tests. The crate only depends on serenity, so
//! it can build Discord model objects for any test without pulling in the bot
//! itself.

pub mod serenity;
