//! Entity registry.
//!
//! The closed set of kinds the storage layer knows how to rebuild. Every
//! backend resolves type names through [`EntityKind::from_str`] and walks
//! [`EntityKind::ALL`] when asked for "everything".

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::ModelError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum EntityKind {
    BaseModel,
    User,
    Place,
    State,
    City,
    Amenity,
    Review,
}

impl EntityKind {
    pub const ALL: [EntityKind; 7] = [
        EntityKind::BaseModel,
        EntityKind::User,
        EntityKind::Place,
        EntityKind::State,
        EntityKind::City,
        EntityKind::Amenity,
        EntityKind::Review,
    ];

    /// Type tag written to `__class__` and used in storage keys.
    pub fn name(self) -> &'static str {
        match self {
            EntityKind::BaseModel => "BaseModel",
            EntityKind::User => "User",
            EntityKind::Place => "Place",
            EntityKind::State => "State",
            EntityKind::City => "City",
            EntityKind::Amenity => "Amenity",
            EntityKind::Review => "Review",
        }
    }
}

impl FromStr for EntityKind {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EntityKind::ALL
            .into_iter()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| ModelError::UnknownEntityKind(s.to_string()))
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_resolve_back_to_kinds() {
        for kind in EntityKind::ALL {
            assert_eq!(kind.name().parse::<EntityKind>().unwrap(), kind);
        }
    }

    #[test]
    fn lookup_is_exact() {
        assert_eq!("user".parse::<EntityKind>(), Err(ModelError::UnknownEntityKind("user".into())));
        assert!("Users".parse::<EntityKind>().is_err());
    }
}
