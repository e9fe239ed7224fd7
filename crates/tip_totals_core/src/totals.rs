use std::collections::BTreeMap;

use serde::Serialize;

use crate::error::ConversionError;
use crate::record::TipRecord;

/// Per-server tip totals for one invocation, ordered by server identity.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
#[serde(transparent)]
pub struct TipTotals {
    totals: BTreeMap<String, f64>,
}

impl TipTotals {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, created_by: &str, amount: f64) {
        match self.totals.get_mut(created_by) {
            Some(total) => *total += amount,
            None => {
                self.totals.insert(created_by.to_string(), amount);
            }
        }
    }

    pub fn get(&self, created_by: &str) -> Option<f64> {
        self.totals.get(created_by).copied()
    }

    pub fn len(&self) -> usize {
        self.totals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.totals.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.totals
            .iter()
            .map(|(created_by, total)| (created_by.as_str(), *total))
    }
}

/// Sums every record's amount into its server's total. The first
/// unparseable record fails the whole aggregation.
pub fn aggregate_tips<'a>(
    records: impl IntoIterator<Item = &'a TipRecord>,
) -> Result<TipTotals, ConversionError> {
    let mut totals = TipTotals::new();
    for (index, record) in records.into_iter().enumerate() {
        let (created_by, amount) = record.resolve(index)?;
        totals.add(created_by, amount);
    }
    Ok(totals)
}
