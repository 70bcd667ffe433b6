//! Checks run against an invocation before any command body executes.

pub mod precondition;
