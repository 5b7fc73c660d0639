use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::storage::RepositoryError;

/// Opaque identifier assigned by the store when an item is created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(Uuid);

impl ItemId {
    /// Generates a fresh identifier. Only storage backends should call this.
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for ItemId {
    type Err = RepositoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s)
            .map(Self)
            .map_err(|e| RepositoryError::InvalidData(format!("Invalid item id {s:?}: {e}")))
    }
}

/// A persisted item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    pub name: String,
}

impl Item {
    /// Materializes a new item under a freshly generated identifier.
    pub fn create(new_item: NewItem) -> Self {
        Self {
            id: ItemId::generate(),
            name: new_item.name,
        }
    }
}

/// An item that has passed the presence check and may be persisted.
///
/// The only way to build one is [`NewItem::from_submission`], so every
/// value carries a non-empty name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewItem {
    name: String,
}

impl NewItem {
    /// Presence guard for a submitted name.
    ///
    /// Returns `None` when the field is missing or empty. Whitespace is not
    /// trimmed: `" "` is a valid name. Callers treat `None` as a silent
    /// no-op rather than an error.
    pub fn from_submission(name: Option<String>) -> Option<Self> {
        match name {
            Some(name) if !name.is_empty() => Some(Self { name }),
            _ => None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_submission_accepts_non_empty_name() {
        let new_item = NewItem::from_submission(Some("Milk".to_string())).unwrap();
        assert_eq!(new_item.name(), "Milk");
    }

    #[test]
    fn test_from_submission_rejects_missing_name() {
        assert_eq!(NewItem::from_submission(None), None);
    }

    #[test]
    fn test_from_submission_rejects_empty_name() {
        assert_eq!(NewItem::from_submission(Some(String::new())), None);
    }

    #[test]
    fn test_from_submission_does_not_trim() {
        let new_item = NewItem::from_submission(Some("  ".to_string())).unwrap();
        assert_eq!(new_item.name(), "  ");
    }

    #[test]
    fn test_create_assigns_distinct_ids() {
        let a = Item::create(NewItem::from_submission(Some("Eggs".to_string())).unwrap());
        let b = Item::create(NewItem::from_submission(Some("Eggs".to_string())).unwrap());

        assert_eq!(a.name, "Eggs");
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_item_id_display_parses_back() {
        let id = ItemId::generate();
        let parsed: ItemId = id.to_string().parse().unwrap();
        assert_eq!(parsed, id);
    }

    #[test]
    fn test_item_id_rejects_malformed_input() {
        let result = "not-an-id".parse::<ItemId>();
        assert!(matches!(result, Err(RepositoryError::InvalidData(_))));
    }

    #[test]
    fn test_item_serializes_id_as_plain_string() {
        let id: ItemId = "550e8400-e29b-41d4-a716-446655440001".parse().unwrap();
        let item = Item {
            id,
            name: "Bread".to_string(),
        };

        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["id"], "550e8400-e29b-41d4-a716-446655440001");
        assert_eq!(json["name"], "Bread");
    }
}
