use std::time::Instant;

use chrono::Utc;
use futures::future::join_all;
use serde::Serialize;
use serde_json::{json, Value};
use thiserror::Error;
use tip_totals_core::config::{TipTotalsConfig, TOPIC_ARN_VAR};
use tip_totals_core::error::{ConfigError, ConversionError, FetchError, PublishError};
use tip_totals_core::notification::{build_notifications, Notification};
use tip_totals_core::totals::{aggregate_tips, TipTotals};
use tracing::{error, info};

use crate::adapters::notifier::Notifier;
use crate::adapters::record_store::{fetch_all_records, RecordStore};

const COMPONENT: &str = "calculate_tips";
pub const INTERNAL_ERROR_BODY: &str = "Internal server error";

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ApiGatewayResponse {
    #[serde(rename = "statusCode")]
    pub status_code: u16,
    #[serde(rename = "isBase64Encoded")]
    pub is_base64_encoded: bool,
    pub headers: Value,
    pub body: String,
}

#[derive(Debug, Error)]
pub enum RunError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error(transparent)]
    Conversion(#[from] ConversionError),
}

#[derive(Debug, Clone, PartialEq)]
pub struct DeliveryOutcome {
    pub recipient: String,
    pub text: String,
    /// Message id on success.
    pub result: Result<Option<String>, PublishError>,
}

impl DeliveryOutcome {
    pub fn is_delivered(&self) -> bool {
        self.result.is_ok()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RunReport {
    pub records_scanned: usize,
    pub totals: TipTotals,
    pub deliveries: Vec<DeliveryOutcome>,
}

impl RunReport {
    pub fn delivered(&self) -> usize {
        self.deliveries
            .iter()
            .filter(|outcome| outcome.is_delivered())
            .count()
    }

    pub fn failed(&self) -> usize {
        self.deliveries.len() - self.delivered()
    }
}

/// Scans the tips table, totals tips per server, and notifies each server.
pub struct TipAggregator<S, N> {
    config: TipTotalsConfig,
    store: S,
    notifier: N,
}

impl<S, N> TipAggregator<S, N>
where
    S: RecordStore,
    N: Notifier,
{
    pub fn new(config: TipTotalsConfig, store: S, notifier: N) -> Self {
        Self {
            config,
            store,
            notifier,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    /// Fetch, aggregate, then notify. A failed scan or an unparseable record
    /// ends the run before anything is published. Publish failures are
    /// recorded per recipient and never stop the other notifications.
    pub async fn run(&self) -> Result<RunReport, RunError> {
        let started_at = Instant::now();
        let table_name = self.config.table_name.as_str();
        info!(component = COMPONENT, event = "scan_started", table_name);

        let records = fetch_all_records(&self.store, table_name)
            .await
            .inspect_err(|fetch_error| {
                error!(
                    component = COMPONENT,
                    event = "scan_failed",
                    table_name,
                    error = %fetch_error,
                );
            })?;

        let totals = aggregate_tips(&records).inspect_err(|conversion_error| {
            error!(
                component = COMPONENT,
                event = "aggregation_failed",
                records_scanned = records.len(),
                error = %conversion_error,
            );
        })?;

        info!(
            component = COMPONENT,
            event = "totals_aggregated",
            records_scanned = records.len(),
            servers = totals.len(),
            totals = %serde_json::to_string(&totals).unwrap_or_default(),
        );

        let notifications = build_notifications(&totals);
        let deliveries = join_all(
            notifications
                .into_iter()
                .map(|notification| self.deliver(notification)),
        )
        .await;

        let report = RunReport {
            records_scanned: records.len(),
            totals,
            deliveries,
        };
        info!(
            component = COMPONENT,
            event = "run_completed",
            run_date = %Utc::now().format("%Y-%m-%d"),
            servers = report.totals.len(),
            delivered = report.delivered(),
            failed = report.failed(),
            duration_ms = started_at.elapsed().as_millis() as u64,
        );
        Ok(report)
    }

    async fn deliver(&self, notification: Notification) -> DeliveryOutcome {
        let topic_arn = self.config.topic_arn.as_deref();
        info!(
            component = COMPONENT,
            event = "publish_requested",
            recipient = %notification.recipient,
            topic_arn = topic_arn.unwrap_or_default(),
            text = %notification.text,
        );

        let result = match topic_arn {
            Some(topic_arn) => self.notifier.publish(topic_arn, &notification.text).await,
            None => Err(PublishError::new(
                ConfigError::Missing(TOPIC_ARN_VAR).to_string(),
            )),
        };

        match &result {
            Ok(message_id) => info!(
                component = COMPONENT,
                event = "publish_succeeded",
                recipient = %notification.recipient,
                message_id = message_id.as_deref().unwrap_or_default(),
            ),
            Err(publish_error) => error!(
                component = COMPONENT,
                event = "publish_failed",
                recipient = %notification.recipient,
                text = %notification.text,
                error = %publish_error,
            ),
        }

        DeliveryOutcome {
            recipient: notification.recipient,
            text: notification.text,
            result,
        }
    }
}

/// Per-invocation entry point: builds the aggregator from freshly read config
/// and runs it. A missing table name fails like a scan and maps to the 500.
pub async fn handle_invocation<S, N>(
    config: Result<TipTotalsConfig, ConfigError>,
    store: S,
    notifier: N,
    event: Value,
) -> Option<ApiGatewayResponse>
where
    S: RecordStore,
    N: Notifier,
{
    match config {
        Ok(config) => handle_trigger(&TipAggregator::new(config, store, notifier), event).await,
        Err(config_error) => {
            error!(
                component = COMPONENT,
                event = "scan_failed",
                error = %RunError::from(config_error),
            );
            Some(internal_error_response())
        }
    }
}

/// Trigger entry point. The event payload carries nothing the run consumes.
/// Success has no response body; any run error maps to a generic 500.
pub async fn handle_trigger<S, N>(
    aggregator: &TipAggregator<S, N>,
    _event: Value,
) -> Option<ApiGatewayResponse>
where
    S: RecordStore,
    N: Notifier,
{
    match aggregator.run().await {
        Ok(_) => None,
        Err(_) => Some(internal_error_response()),
    }
}

pub fn internal_error_response() -> ApiGatewayResponse {
    ApiGatewayResponse {
        status_code: 500,
        is_base64_encoded: false,
        headers: json!({"Content-Type": "application/json"}),
        body: INTERNAL_ERROR_BODY.to_string(),
    }
}
