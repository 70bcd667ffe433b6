//! Command handlers and the domain services they compose.
//!
//! Every handler takes the typed [`InvocationContext`](crate::model::context::InvocationContext),
//! runs its preconditions, then talks to the host platform through
//! [`Platform`](crate::platform::Platform):
//!
//! - **Registry**: locating the statics category and channels by name
//! - **Ledger**: creator resolution and the one-channel role
//! - **Handlers**: one service per command group, each returning a [`Reply`](crate::model::reply::Reply)

pub mod communication;
pub mod diagnostic;
pub mod ledger;
pub mod member;
pub mod registry;
pub mod statics;
