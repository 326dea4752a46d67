//! Type-safe identifier wrappers around the integer keys the REST API
//! assigns.
//!
//! Teams and players are both keyed by plain integers on the wire. The
//! newtypes keep a player's `teamId` from being compared against another
//! player's `id` by accident. Identifiers are assigned by the API and never
//! change once a record exists.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Generates a newtype wrapper around [`i32`] with standard derives.
macro_rules! define_id {
    (
        $(#[$meta:meta])*
        $name:ident
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
        #[serde(transparent)]
        #[ts(export, export_to = "bindings/")]
        pub struct $name(pub i32);

        impl $name {
            /// Return the inner integer value.
            pub const fn into_inner(self) -> i32 {
                self.0
            }
        }

        impl core::fmt::Display for $name {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<i32> for $name {
            fn from(id: i32) -> Self {
                Self(id)
            }
        }

        impl From<$name> for i32 {
            fn from(id: $name) -> Self {
                id.0
            }
        }

        impl core::str::FromStr for $name {
            type Err = core::num::ParseIntError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.trim().parse::<i32>().map(Self)
            }
        }
    };
}

define_id! {
    /// Unique identifier for a team.
    TeamId
}

define_id! {
    /// Unique identifier for a player.
    PlayerId
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_serialize_as_bare_integers() {
        let json = serde_json::to_string(&TeamId(7)).unwrap_or_default();
        assert_eq!(json, "7");

        let back: PlayerId = serde_json::from_str("42").unwrap_or(PlayerId(0));
        assert_eq!(back, PlayerId(42));
    }

    #[test]
    fn ids_parse_from_form_text() {
        assert_eq!(" 12 ".parse::<TeamId>().ok(), Some(TeamId(12)));
        assert!("free".parse::<TeamId>().is_err());
    }
}
