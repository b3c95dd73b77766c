use std::str::FromStr;

use log::info;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    Operator,
    Supervisor,
    Admin,
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "operator" => Ok(Role::Operator),
            "supervisor" => Ok(Role::Supervisor),
            "admin" => Ok(Role::Admin),
            other => Err(format!("unknown role {other:?}")),
        }
    }
}

/// Login gate in front of the console. Any non-empty username and password
/// is accepted; the role is recorded but not enforced anywhere.
#[derive(Debug, Default)]
pub struct Session {
    user: Option<(String, Role)>,
}

impl Session {
    pub fn login(&mut self, username: &str, password: &str, role: Role) -> bool {
        if username.is_empty() || password.is_empty() {
            return false;
        }
        info!("{} logged in as {:?}", username, role);
        self.user = Some((username.to_string(), role));
        true
    }

    pub fn logout(&mut self) {
        self.user = None;
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    pub fn role(&self) -> Option<Role> {
        self.user.as_ref().map(|(_, r)| *r)
    }

    pub fn username(&self) -> Option<&str> {
        self.user.as_ref().map(|(u, _)| u.as_str())
    }
}
