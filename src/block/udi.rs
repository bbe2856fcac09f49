//! Entity identifiers in `umb://<entity-type>/<guid>` form

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Entity type of block elements
pub const ELEMENT: &str = "element";
/// Entity type of media items
pub const MEDIA: &str = "media";
/// Entity type of documents
pub const DOCUMENT: &str = "document";

const SCHEME: &str = "umb://";

/// A GUID-based entity identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Udi {
    entity_type: String,
    guid: Uuid,
}

impl Udi {
    pub fn new(entity_type: impl Into<String>, guid: Uuid) -> Self {
        Self {
            entity_type: entity_type.into(),
            guid,
        }
    }

    /// Identifier of a block element
    pub fn element(guid: Uuid) -> Self {
        Self::new(ELEMENT, guid)
    }

    pub fn entity_type(&self) -> &str {
        &self.entity_type
    }

    pub fn guid(&self) -> Uuid {
        self.guid
    }
}

impl fmt::Display for Udi {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}/{}", SCHEME, self.entity_type, self.guid.simple())
    }
}

impl FromStr for Udi {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rest = s
            .trim()
            .strip_prefix(SCHEME)
            .ok_or_else(|| format!("Invalid UDI '{}': missing {} scheme", s, SCHEME))?;
        let (entity_type, id) = rest
            .split_once('/')
            .ok_or_else(|| format!("Invalid UDI '{}': missing identifier", s))?;
        if entity_type.is_empty() {
            return Err(format!("Invalid UDI '{}': missing entity type", s));
        }
        let guid = Uuid::parse_str(id)
            .map_err(|e| format!("Invalid UDI '{}': {}", s, e))?;
        Ok(Self::new(entity_type, guid))
    }
}

impl Serialize for Udi {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Udi {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
