use serde::{Deserialize, Serialize};

use crate::error::ConversionError;

/// Tip amount as stored by order entry: either a number or its text form.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum TipAmount {
    Number(f64),
    Text(String),
}

impl TipAmount {
    pub fn parse(&self, created_by: &str) -> Result<f64, ConversionError> {
        let value = match self {
            Self::Number(value) => Some(*value),
            Self::Text(text) => text.trim().parse::<f64>().ok(),
        };

        value
            .filter(|value| value.is_finite())
            .ok_or_else(|| ConversionError::NonNumericAmount {
                created_by: created_by.to_string(),
                raw: self.raw(),
            })
    }

    fn raw(&self) -> String {
        match self {
            Self::Number(value) => value.to_string(),
            Self::Text(text) => text.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TipRecord {
    #[serde(rename = "createdBy", default)]
    pub created_by: Option<String>,
    #[serde(rename = "tipAmount", default)]
    pub tip_amount: Option<TipAmount>,
}

impl TipRecord {
    pub fn new(created_by: impl Into<String>, tip_amount: TipAmount) -> Self {
        Self {
            created_by: Some(created_by.into()),
            tip_amount: Some(tip_amount),
        }
    }

    /// Resolves the server identity and numeric amount. `index` is the
    /// record's position in the scan and only feeds error reporting.
    pub fn resolve(&self, index: usize) -> Result<(&str, f64), ConversionError> {
        let created_by = self
            .created_by
            .as_deref()
            .ok_or(ConversionError::MissingField {
                index,
                field: "createdBy",
            })?;
        let amount = self
            .tip_amount
            .as_ref()
            .ok_or(ConversionError::MissingField {
                index,
                field: "tipAmount",
            })?
            .parse(created_by)?;
        Ok((created_by, amount))
    }
}
