use std::collections::HashMap;

use async_trait::async_trait;
use aws_sdk_dynamodb::error::DisplayErrorContext;
use aws_sdk_dynamodb::types::AttributeValue;
use tip_totals_core::error::FetchError;
use tip_totals_core::paging::ScanPage;
use tip_totals_core::record::{TipAmount, TipRecord};

use crate::adapters::record_store::RecordStore;

pub const CREATED_BY_ATTRIBUTE: &str = "createdBy";
pub const TIP_AMOUNT_ATTRIBUTE: &str = "tipAmount";

pub type Item = HashMap<String, AttributeValue>;

#[derive(Debug, Clone)]
pub struct DynamoRecordStore {
    client: aws_sdk_dynamodb::Client,
}

impl DynamoRecordStore {
    pub fn new(client: aws_sdk_dynamodb::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl RecordStore for DynamoRecordStore {
    /// `LastEvaluatedKey` of the previous page, fed back as `ExclusiveStartKey`.
    type Token = Item;

    async fn scan_page(
        &self,
        table_name: &str,
        start_token: Option<Item>,
    ) -> Result<ScanPage<Item>, FetchError> {
        let output = self
            .client
            .scan()
            .table_name(table_name)
            .set_exclusive_start_key(start_token)
            .send()
            .await
            .map_err(|error| {
                FetchError::new(format!(
                    "scan of table '{table_name}' failed: {}",
                    DisplayErrorContext(&error)
                ))
            })?;

        Ok(ScanPage {
            items: output.items().iter().map(record_from_item).collect(),
            next_token: output.last_evaluated_key().cloned(),
        })
    }
}

/// Maps a scanned item onto a record. A `createdBy` that is not a string
/// attribute is treated as absent; a `tipAmount` of any type other than
/// `N` or `S` is kept as text so amount parsing rejects it.
pub fn record_from_item(item: &Item) -> TipRecord {
    TipRecord {
        created_by: item
            .get(CREATED_BY_ATTRIBUTE)
            .and_then(|value| value.as_s().ok())
            .cloned(),
        tip_amount: item.get(TIP_AMOUNT_ATTRIBUTE).map(amount_from_attribute),
    }
}

fn amount_from_attribute(value: &AttributeValue) -> TipAmount {
    match value {
        AttributeValue::N(number) => number
            .trim()
            .parse::<f64>()
            .map(TipAmount::Number)
            .unwrap_or_else(|_| TipAmount::Text(number.clone())),
        AttributeValue::S(text) => TipAmount::Text(text.clone()),
        other => TipAmount::Text(format!("{other:?}")),
    }
}
