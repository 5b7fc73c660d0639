//! DynamoDB attribute conversion functions.
//!
//! Pure functions for converting between DynamoDB AttributeValue maps and items.

use std::collections::HashMap;

use aws_sdk_dynamodb::types::AttributeValue;
use mvclab_core::item::{Item, ItemId};
use mvclab_core::storage::RepositoryError;

/// Partition key attribute.
pub const ID: &str = "id";
pub const NAME: &str = "name";

/// Build the primary key map for an item ID.
pub fn item_key(id: ItemId) -> HashMap<String, AttributeValue> {
    HashMap::from([(ID.to_string(), AttributeValue::S(id.to_string()))])
}

/// Convert an Item to a DynamoDB record.
pub fn item_to_record(item: &Item) -> HashMap<String, AttributeValue> {
    let mut record = item_key(item.id);
    record.insert(NAME.to_string(), AttributeValue::S(item.name.clone()));
    record
}

/// Convert a DynamoDB record to an Item.
pub fn record_to_item(record: &HashMap<String, AttributeValue>) -> Result<Item, RepositoryError> {
    Ok(Item {
        id: get_string(record, ID)?.parse()?,
        name: get_string(record, NAME)?,
    })
}

/// Get a required string attribute.
fn get_string(
    record: &HashMap<String, AttributeValue>,
    key: &str,
) -> Result<String, RepositoryError> {
    record
        .get(key)
        .and_then(|v| v.as_s().ok())
        .map(|s| s.to_string())
        .ok_or_else(|| RepositoryError::InvalidData(format!("Missing or invalid field: {}", key)))
}
