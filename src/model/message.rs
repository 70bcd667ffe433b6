use chrono::{DateTime, Utc};
use serenity::all::{MessageId, UserId};

use crate::model::member::UserView;

/// Snapshot of a channel message, reduced to what creator resolution and the
/// statics report need.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageView {
    pub id: MessageId,
    pub author_id: UserId,
    pub created_at: DateTime<Utc>,
    /// Users mentioned in the message, in the order Discord reports them.
    pub mentions: Vec<UserView>,
}
