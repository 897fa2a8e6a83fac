use crate::iam_api::types::IamError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Wire vocabulary for permissions, ordered by access level
pub const PERMISSION_WIRE: [&str; 4] = ["none", "read", "write", "changePermission"];

/// Access level granted by a rule
///
/// Serialized by name through [`PERMISSION_WIRE`]; the position in that
/// table is the level's index and is never sent on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Permission {
    None,
    Read,
    Write,
    ChangePermission,
}

impl Permission {
    pub const ALL: [Permission; 4] = [
        Permission::None,
        Permission::Read,
        Permission::Write,
        Permission::ChangePermission,
    ];

    pub fn index(self) -> usize {
        match self {
            Permission::None => 0,
            Permission::Read => 1,
            Permission::Write => 2,
            Permission::ChangePermission => 3,
        }
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn as_wire(self) -> &'static str {
        PERMISSION_WIRE[self.index()]
    }

    pub fn from_wire(value: &str) -> Option<Self> {
        PERMISSION_WIRE
            .iter()
            .position(|name| *name == value)
            .and_then(Self::from_index)
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_wire())
    }
}

impl FromStr for Permission {
    type Err = IamError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_wire(s).ok_or_else(|| {
            IamError::InvalidParameter(format!(
                "Invalid permission '{}': must be one of {}",
                s,
                PERMISSION_WIRE.join(", ")
            ))
        })
    }
}

impl Serialize for Permission {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_wire())
    }
}

impl<'de> Deserialize<'de> for Permission {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = String::deserialize(deserializer)?;
        Permission::from_wire(&value).ok_or_else(|| {
            serde::de::Error::unknown_variant(&value, &PERMISSION_WIRE)
        })
    }
}
