use crate::totals::TipTotals;

#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub recipient: String,
    pub text: String,
}

/// Renders the daily total message. Totals print in shortest round-trip
/// form, so whole amounts carry no fractional part. A negative zero prints
/// as `0`.
pub fn tip_total_message(created_by: &str, total: f64) -> String {
    let total = total + 0.0;
    format!("{created_by}, your tip total for today is ${total}")
}

/// One notification per server, in server-identity order.
pub fn build_notifications(totals: &TipTotals) -> Vec<Notification> {
    totals
        .iter()
        .map(|(created_by, total)| Notification {
            recipient: created_by.to_string(),
            text: tip_total_message(created_by, total),
        })
        .collect()
}
