use serenity::all::{Mention, RoleId, UserId};

/// Snapshot of a guild member.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberView {
    pub user_id: UserId,
    /// Account username.
    pub name: String,
    /// Global display name chosen by the user, if any.
    pub global_name: Option<String>,
    /// Server-specific nickname, if any.
    pub nick: Option<String>,
    pub bot: bool,
    pub roles: Vec<RoleId>,
}

impl MemberView {
    /// The name other members see: nickname, then global name, then username.
    pub fn display_name(&self) -> &str {
        self.nick
            .as_deref()
            .or(self.global_name.as_deref())
            .unwrap_or(&self.name)
    }

    /// Whether `name` is this member's username, nickname or global name.
    pub fn answers_to(&self, name: &str) -> bool {
        self.name == name
            || self.nick.as_deref() == Some(name)
            || self.global_name.as_deref() == Some(name)
    }

    pub fn has_role(&self, role: RoleId) -> bool {
        self.roles.contains(&role)
    }

    pub fn mention(&self) -> Mention {
        Mention::User(self.user_id)
    }
}

/// Snapshot of a user who is not necessarily a guild member.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserView {
    pub id: UserId,
    pub name: String,
    pub bot: bool,
}

/// Snapshot of a guild role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleView {
    pub id: RoleId,
    pub name: String,
}
