/// Discord rejects message content longer than this many characters.
pub const MAX_CONTENT_LENGTH: usize = 2000;

/// What a command answers to the invoking user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub content: String,
    /// Only the invoking user sees ephemeral replies.
    pub ephemeral: bool,
}

impl Reply {
    pub fn ephemeral(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            ephemeral: true,
        }
    }

    pub fn public(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            ephemeral: false,
        }
    }

    /// Content cut to fit a single Discord message.
    ///
    /// Cuts at the last full line that fits and marks the cut with an ellipsis
    /// line, so long reports stay readable instead of being rejected.
    pub fn content_for_discord(&self) -> String {
        if self.content.chars().count() <= MAX_CONTENT_LENGTH {
            return self.content.clone();
        }

        let room = MAX_CONTENT_LENGTH - 2;
        let mut out = String::new();
        let mut used = 0;
        for line in self.content.lines() {
            let len = line.chars().count() + 1;
            if used + len > room {
                break;
            }
            out.push_str(line);
            out.push('\n');
            used += len;
        }
        if out.is_empty() {
            out = self.content.chars().take(room).collect();
            out.push('\n');
        }
        out.push('…');
        out
    }
}
