//! DynamoDB repository implementation.
//!
//! Implements `ItemRepository` from `mvclab_core::storage` using DynamoDB.

use async_trait::async_trait;
use aws_sdk_dynamodb::error::DisplayErrorContext;
use aws_sdk_dynamodb::types::ReturnValue;
use aws_sdk_dynamodb::Client;

use mvclab_core::item::{Item, ItemId, NewItem};
use mvclab_core::storage::{ItemRepository, Result};

use super::conversions::{item_key, item_to_record, record_to_item};
use super::error::{map_connection_error, map_delete_item_error, map_put_item_error, map_scan_error};

/// DynamoDB-based item repository.
pub struct DynamoDbRepository {
    client: Client,
    table_name: String,
}

impl DynamoDbRepository {
    /// Creates a new repository with the given DynamoDB client and table name.
    pub fn new(client: Client, table_name: impl Into<String>) -> Self {
        Self {
            client,
            table_name: table_name.into(),
        }
    }

    /// Builds a client from the AWS default credential chain and checks that
    /// the table is reachable.
    ///
    /// `endpoint_url` overrides the service endpoint, e.g. for DynamoDB Local.
    pub async fn connect(endpoint_url: Option<String>, table_name: &str) -> Result<Self> {
        let mut loader = aws_config::defaults(aws_config::BehaviorVersion::latest());
        if let Some(endpoint_url) = endpoint_url {
            loader = loader.endpoint_url(endpoint_url);
        }
        let sdk_config = loader.load().await;

        let repo = Self::new(Client::new(&sdk_config), table_name);
        repo.check_table().await?;

        Ok(repo)
    }

    /// Get the table name.
    pub fn table_name(&self) -> &str {
        &self.table_name
    }

    async fn check_table(&self) -> Result<()> {
        self.client
            .describe_table()
            .table_name(&self.table_name)
            .send()
            .await
            .map_err(|e| map_connection_error(DisplayErrorContext(&e)))?;

        Ok(())
    }
}

#[async_trait]
impl ItemRepository for DynamoDbRepository {
    async fn list_items(&self) -> Result<Vec<Item>> {
        let mut items = Vec::new();
        let mut start_key = None;

        loop {
            let output = self
                .client
                .scan()
                .table_name(&self.table_name)
                .set_exclusive_start_key(start_key)
                .send()
                .await
                .map_err(map_scan_error)?;

            for record in output.items() {
                items.push(record_to_item(record)?);
            }

            match output.last_evaluated_key {
                Some(key) if !key.is_empty() => start_key = Some(key),
                _ => break,
            }
        }

        Ok(items)
    }

    async fn create_item(&self, new_item: NewItem) -> Result<Item> {
        let item = Item::create(new_item);

        self.client
            .put_item()
            .table_name(&self.table_name)
            .set_item(Some(item_to_record(&item)))
            .condition_expression("attribute_not_exists(id)")
            .send()
            .await
            .map_err(map_put_item_error)?;

        Ok(item)
    }

    async fn delete_item(&self, id: ItemId) -> Result<bool> {
        let output = self
            .client
            .delete_item()
            .table_name(&self.table_name)
            .set_key(Some(item_key(id)))
            .return_values(ReturnValue::AllOld)
            .send()
            .await
            .map_err(map_delete_item_error)?;

        Ok(output.attributes.is_some_and(|old| !old.is_empty()))
    }
}
