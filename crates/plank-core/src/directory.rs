use serde::Deserialize;
use tracing::warn;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UserRef {
    pub id: u32,
    pub name: String,
}

/// Static ordered roster of assignable users. `Task::assignee` is a
/// name-valued reference into it with no integrity enforcement: removing a
/// user does not invalidate existing tasks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserDirectory {
    users: Vec<UserRef>,
}

#[derive(Debug, Default, Deserialize)]
struct RosterFile {
    #[serde(default)]
    users: Vec<UserRef>,
}

impl Default for UserDirectory {
    fn default() -> Self {
        Self::builtin()
    }
}

impl UserDirectory {
    pub fn builtin() -> Self {
        let users = [
            (1, "Alice Chen"),
            (2, "Marcus Webb"),
            (3, "Priya Nair"),
            (4, "Jonas Eklund"),
            (5, "Sofia Reyes"),
        ]
        .into_iter()
        .map(|(id, name)| UserRef {
            id,
            name: name.to_string(),
        })
        .collect();
        Self { users }
    }

    /// An unreadable or empty roster falls back to the built-in list, so
    /// the directory is never empty.
    pub fn from_toml_str(raw: &str) -> Self {
        match toml::from_str::<RosterFile>(raw) {
            Ok(file) if !file.users.is_empty() => Self { users: file.users },
            Ok(_) => {
                warn!("roster has no users; using built-in roster");
                Self::builtin()
            }
            Err(error) => {
                warn!(%error, "failed parsing roster; using built-in roster");
                Self::builtin()
            }
        }
    }

    pub fn users(&self) -> &[UserRef] {
        &self.users
    }

    pub fn first_name(&self) -> &str {
        self.users.first().map(|user| user.name.as_str()).unwrap_or("")
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.users.iter().map(|user| user.name.as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.users.iter().any(|user| user.name == name)
    }
}
