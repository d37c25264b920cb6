//! Room catalog loading and lookup.
//!
//! The catalog is an ordered list of room groups (special accommodations
//! first, then standard), loaded once at startup and never mutated. Rooms
//! are referenced elsewhere by name, which is unique within the catalog.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// Default catalog shipped with the binary, used when no catalog path is
/// configured.
const EMBEDDED_CATALOG: &str = include_str!("../data/accommodation.json");

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("failed to read catalog file: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid catalog JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("duplicate room name in catalog: {0}")]
    DuplicateRoom(String),

    #[error("catalog contains no rooms")]
    Empty,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccommodationClass {
    Special,
    Standard,
}

impl std::fmt::Display for AccommodationClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AccommodationClass::Special => write!(f, "Special"),
            AccommodationClass::Standard => write!(f, "Standard"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomOption {
    pub name: String,
    /// Nightly price in whole dollars.
    #[serde(rename = "price")]
    pub nightly_price: u64,
    #[serde(rename = "imageUrl")]
    pub image_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomGroup {
    #[serde(rename = "category")]
    pub class: AccommodationClass,
    pub rooms: Vec<RoomOption>,
}

/// Read-only room catalog, grouped by accommodation class in file order.
#[derive(Debug, Clone)]
pub struct RoomCatalog {
    groups: Vec<RoomGroup>,
}

impl RoomCatalog {
    /// Load the catalog from a JSON file.
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let contents = std::fs::read_to_string(path)?;
        let catalog = Self::from_json(&contents)?;
        debug!(path = %path.display(), rooms = catalog.room_count(), "Catalog loaded");
        Ok(catalog)
    }

    /// The catalog compiled into the binary.
    pub fn embedded() -> Self {
        // The embedded data is validated by tests; a parse failure here is a
        // build defect, not a runtime condition.
        Self::from_json(EMBEDDED_CATALOG).expect("embedded catalog is valid")
    }

    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let groups: Vec<RoomGroup> = serde_json::from_str(json)?;
        let catalog = Self { groups };

        if catalog.room_count() == 0 {
            return Err(CatalogError::Empty);
        }

        // Room names are the identity used by the booking draft.
        let mut seen = std::collections::HashSet::new();
        for room in catalog.rooms() {
            if !seen.insert(room.name.as_str()) {
                return Err(CatalogError::DuplicateRoom(room.name.clone()));
            }
        }

        Ok(catalog)
    }

    pub fn groups(&self) -> &[RoomGroup] {
        &self.groups
    }

    /// All rooms in display order (special groups before standard).
    pub fn rooms(&self) -> impl Iterator<Item = &RoomOption> {
        self.groups.iter().flat_map(|g| g.rooms.iter())
    }

    pub fn room_count(&self) -> usize {
        self.groups.iter().map(|g| g.rooms.len()).sum()
    }

    pub fn find(&self, name: &str) -> Option<&RoomOption> {
        self.rooms().find(|r| r.name == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.find(name).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_catalog_parses() {
        let catalog = RoomCatalog::embedded();
        assert!(catalog.room_count() > 0);
        assert_eq!(catalog.groups().len(), 2);
        assert_eq!(catalog.groups()[0].class, AccommodationClass::Special);
        assert_eq!(catalog.groups()[1].class, AccommodationClass::Standard);
    }

    #[test]
    fn find_by_name() {
        let catalog = RoomCatalog::embedded();
        let suite = catalog.find("Ocean Suite").expect("Ocean Suite in catalog");
        assert_eq!(suite.nightly_price, 200);
        assert!(catalog.find("Broom Closet").is_none());
    }

    #[test]
    fn duplicate_room_names_rejected() {
        let json = r#"[
            { "category": "standard", "rooms": [
                { "name": "Twin Room", "price": 95, "imageUrl": "/a.jpg" },
                { "name": "Twin Room", "price": 99, "imageUrl": "/b.jpg" }
            ] }
        ]"#;
        assert!(matches!(
            RoomCatalog::from_json(json),
            Err(CatalogError::DuplicateRoom(_))
        ));
    }

    #[test]
    fn empty_catalog_rejected() {
        let json = r#"[ { "category": "standard", "rooms": [] } ]"#;
        assert!(matches!(RoomCatalog::from_json(json), Err(CatalogError::Empty)));
    }
}
