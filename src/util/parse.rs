use std::num::NonZeroU64;

use crate::error::config::ConfigError;

/// Parses a Discord id (snowflake) from a configuration value.
///
/// Surrounding whitespace is ignored. Zero is rejected since Discord never
/// hands out id 0 and serenity's id types cannot hold it.
///
/// # Arguments
/// - `field` - Name of the configuration field, used in the error
/// - `value` - The raw string to parse
///
/// # Returns
/// - `Ok(NonZeroU64)` - Successfully parsed id
/// - `Err(ConfigError::InvalidId)` - The value is not a positive integer
pub fn parse_id(field: &str, value: &str) -> Result<NonZeroU64, ConfigError> {
    value
        .trim()
        .parse::<NonZeroU64>()
        .map_err(|source| ConfigError::InvalidId {
            field: field.to_string(),
            value: value.to_string(),
            source,
        })
}
