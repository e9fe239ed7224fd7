pub mod dynamodb;
pub mod notifier;
pub mod record_store;
pub mod sns;
