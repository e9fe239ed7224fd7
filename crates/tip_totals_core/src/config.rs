use crate::error::ConfigError;

pub const TABLE_NAME_VAR: &str = "DDB_TABLE_NAME";
pub const TOPIC_ARN_VAR: &str = "SNS_TOPIC_ARN";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TipTotalsConfig {
    pub table_name: String,
    /// Absent when `SNS_TOPIC_ARN` is unset or blank. The scan still runs and
    /// every publish fails on its own.
    pub topic_arn: Option<String>,
}

impl TipTotalsConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds the config from any variable lookup. Values are trimmed and
    /// blank values count as missing. Only the table name is required.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        Ok(Self {
            table_name: optional(&lookup, TABLE_NAME_VAR)
                .ok_or(ConfigError::Missing(TABLE_NAME_VAR))?,
            topic_arn: optional(&lookup, TOPIC_ARN_VAR),
        })
    }
}

fn optional(lookup: &impl Fn(&str) -> Option<String>, name: &str) -> Option<String> {
    lookup(name)
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}
