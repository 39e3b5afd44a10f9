//! Window roles. The set is fixed configuration, never user data.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Presenter, // hands the order out of the window
    Runner,
    Packer,
}

impl Role {
    /// Every role, in display order. Solo mode covers all of them.
    pub const ALL: [Role; 3] = [Role::Presenter, Role::Runner, Role::Packer];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Presenter => "Presenter",
            Self::Runner    => "Runner",
            Self::Packer    => "Packer",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
