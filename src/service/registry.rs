use std::collections::BTreeMap;

use crate::{
    config::Config,
    error::{setup::GuildSetupError, AppError},
    model::{
        channel::{Category, ChannelKind, ChannelView},
        name::StaticName,
    },
    platform::Platform,
};

/// Locates the statics category and the static channels filed under it.
pub struct ChannelRegistry<'a> {
    platform: &'a dyn Platform,
    config: &'a Config,
}

impl<'a> ChannelRegistry<'a> {
    pub fn new(platform: &'a dyn Platform, config: &'a Config) -> Self {
        Self { platform, config }
    }

    /// Resolves the configured statics category along with its child channels.
    ///
    /// A missing category and a category the bot cannot see are operator
    /// errors, reported as [`GuildSetupError`] rather than as a check failure.
    ///
    /// # Returns
    /// - `Ok(Category)` - The category and every channel filed under it
    /// - `Err(AppError::SetupErr)` - No such category, or the bot lacks `view_channel` on it
    /// - `Err(AppError)` - Platform error while listing channels
    pub async fn resolve_category(&self) -> Result<Category, AppError> {
        let guild_id = self.config.guild_id;
        let category_id = self.config.category_id;

        let channels = self.platform.guild_channels(guild_id).await?;

        let Some(category) = channels
            .iter()
            .find(|c| c.id == category_id && c.kind == ChannelKind::Category)
        else {
            return Err(GuildSetupError::MisconfiguredCategory(category_id).into());
        };

        if !self.platform.bot_can_view(guild_id, category_id).await? {
            return Err(GuildSetupError::CategoryNotVisible.into());
        }

        let name = category.name.clone();
        let children = channels
            .into_iter()
            .filter(|c| c.parent_id == Some(category_id))
            .collect();

        Ok(Category {
            id: category_id,
            name,
            channels: children,
        })
    }
}

/// Finds the text channel named exactly `name` in the category.
///
/// Channels of other kinds never match, the same rule [`statics`] and
/// [`duplicates`] apply. Two or more text channels with that name are an
/// inconsistency left behind by concurrent creates; they are reported rather
/// than picking one of them.
pub fn find_by_name<'c>(
    category: &'c Category,
    name: &str,
) -> Result<Option<&'c ChannelView>, GuildSetupError> {
    let matches: Vec<&ChannelView> = category
        .channels
        .iter()
        .filter(|c| c.kind == ChannelKind::Text && c.name == name)
        .collect();

    match matches.as_slice() {
        [] => Ok(None),
        [channel] => Ok(Some(*channel)),
        _ => Err(GuildSetupError::DuplicateChannel {
            name: name.to_string(),
            count: matches.len(),
        }),
    }
}

/// Text channels in the category carrying the static prefix.
pub fn statics(category: &Category) -> Vec<&ChannelView> {
    category
        .channels
        .iter()
        .filter(|c| c.kind == ChannelKind::Text && StaticName::is_static(&c.name))
        .collect()
}

/// Static names used by more than one channel, with their counts, by name.
pub fn duplicates(category: &Category) -> Vec<(String, usize)> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for channel in statics(category) {
        *counts.entry(channel.name.as_str()).or_default() += 1;
    }

    counts
        .into_iter()
        .filter(|(_, count)| *count > 1)
        .map(|(name, count)| (name.to_string(), count))
        .collect()
}
