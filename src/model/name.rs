use std::fmt;

use crate::error::check::CheckFailure;

/// Prefix every static channel name carries.
pub const STATIC_PREFIX: &str = "static-";

/// Literal a user-supplied name may not start with.
const RESERVED: &str = "static";

/// Canonical channel name of a static, always `static-<name>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StaticName(String);

impl StaticName {
    /// Derives the canonical channel name from what the user typed.
    ///
    /// No case folding is applied: `raw` must already match
    /// `^[a-z][a-z0-9-]*$`.
    ///
    /// # Returns
    /// - `Ok(StaticName)` - `"static-" + raw`
    /// - `Err(CheckFailure::InvalidName)` - `raw` has the wrong shape
    /// - `Err(CheckFailure::ReservedPrefix)` - `raw` starts with `static`
    pub fn parse(raw: &str) -> Result<Self, CheckFailure> {
        let mut chars = raw.chars();
        let valid = chars.next().is_some_and(|c| c.is_ascii_lowercase())
            && chars.all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-');
        if !valid {
            return Err(CheckFailure::InvalidName);
        }
        if raw.starts_with(RESERVED) {
            return Err(CheckFailure::ReservedPrefix);
        }

        Ok(Self(format!("{}{}", STATIC_PREFIX, raw)))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether a channel name carries the static prefix.
    pub fn is_static(channel_name: &str) -> bool {
        channel_name.starts_with(STATIC_PREFIX)
    }
}

impl fmt::Display for StaticName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
