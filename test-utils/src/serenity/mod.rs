//! Test factories for creating Serenity API objects.
//!
//! These factories create valid Serenity structs by deserializing JSON shaped
//! like Discord's API responses, so conversions from Serenity models can be
//! tested without a gateway connection.
//!
//! # Usage
//!
//! ```rust,ignore
//! use test_utils::serenity::{create_test_channel, create_test_member};
//!
//! #[test]
//! fn converts_member() {
//!     let member = create_test_member(1, 10, "alice", None, &[3], false);
//!     let channel = create_test_channel(200, 1, "static-friday", 0, Some(20));
//!
//!     // Use in your tests...
//! }
//! ```
//!
//! # Available Factories
//!
//! - `channel::create_test_channel` - Guild channels and categories
//! - `message::create_test_message` - Channel messages with mentions
//! - `role::create_test_role` - Guild roles
//! - `user::create_test_user` / `user::create_test_member` - Users and guild members

pub mod channel;
pub mod message;
pub mod role;
pub mod user;

pub use channel::create_test_channel;
pub use message::create_test_message;
pub use role::create_test_role;
pub use user::{create_test_member, create_test_user};
