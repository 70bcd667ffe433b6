use chrono::{DateTime, Utc};
use serenity::all::ChannelId;

/// The kinds of guild channel the bot distinguishes between.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelKind {
    Text,
    Category,
    Voice,
    Other,
}

/// Snapshot of a guild channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelView {
    pub id: ChannelId,
    pub name: String,
    pub kind: ChannelKind,
    /// Category the channel is filed under, if any.
    pub parent_id: Option<ChannelId>,
    pub created_at: DateTime<Utc>,
}

/// The statics category together with the channels filed under it.
#[derive(Debug, Clone)]
pub struct Category {
    pub id: ChannelId,
    pub name: String,
    pub channels: Vec<ChannelView>,
}
