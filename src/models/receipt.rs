//! Receipt models

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Server-assigned receipt identity.
///
/// The service may hand out string ids (UUIDs) or numeric ids; whichever it sends is
/// kept as-is so it round-trips unchanged into URLs and exported JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ReceiptId {
    Number(serde_json::Number),
    Text(String),
}

impl ReceiptId {
    /// An empty string id is treated the same as a missing one
    pub fn is_blank(&self) -> bool {
        matches!(self, ReceiptId::Text(s) if s.trim().is_empty())
    }
}

impl fmt::Display for ReceiptId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReceiptId::Number(n) => write!(f, "{}", n),
            ReceiptId::Text(s) => write!(f, "{}", s),
        }
    }
}

impl From<&str> for ReceiptId {
    fn from(value: &str) -> Self {
        ReceiptId::Text(value.to_string())
    }
}

impl From<u64> for ReceiptId {
    fn from(value: u64) -> Self {
        ReceiptId::Number(value.into())
    }
}

/// One entry of `GET /receipts`: an id plus whatever else the service stored
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReceiptSummary {
    pub id: ReceiptId,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

/// A receipt as known to the client, optionally enriched with points
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Receipt {
    pub id: ReceiptId,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub points: Option<i64>,
}

impl Receipt {
    /// Build a receipt from opaque payload fields.
    ///
    /// `id` and `points` keys inside `fields` are discarded: identity and points only
    /// ever come from the dedicated arguments, so a receipt whose lookup failed never
    /// carries a stale `points` value.
    pub fn new(id: ReceiptId, mut fields: Map<String, Value>, points: Option<i64>) -> Self {
        fields.retain(|key, _| key != "id" && key != "points");
        Self { id, fields, points }
    }

    pub fn from_summary(summary: ReceiptSummary, points: Option<i64>) -> Self {
        Self::new(summary.id, summary.fields, points)
    }

    /// Render a payload field for display. Strings are shown bare, anything else as JSON.
    pub fn field_display(&self, name: &str) -> String {
        match self.fields.get(name) {
            None | Some(Value::Null) => String::new(),
            Some(Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
        }
    }

    pub fn retailer(&self) -> String {
        self.field_display("retailer")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_summary_keeps_opaque_fields_in_order() {
        let summary: ReceiptSummary = serde_json::from_value(json!({
            "retailer": "Target",
            "id": 1,
            "purchaseDate": "2024-01-01",
            "purchaseTime": "10:00",
            "total": "10.00",
            "items": [{"shortDescription": "Pepsi", "price": "10.00"}]
        }))
        .unwrap();

        assert_eq!(summary.id, ReceiptId::from(1));
        let keys: Vec<&str> = summary.fields.keys().map(|k| k.as_str()).collect();
        assert_eq!(keys, vec!["retailer", "purchaseDate", "purchaseTime", "total", "items"]);
    }

    #[test]
    fn test_summary_requires_id() {
        let parsed = serde_json::from_value::<ReceiptSummary>(json!({"retailer": "Target"}));
        assert!(parsed.is_err());
    }

    #[test]
    fn test_text_and_numeric_ids() {
        let text: ReceiptId = serde_json::from_value(json!("7fb1377b-b223-49d9-a31a-5a02701dd310")).unwrap();
        assert_eq!(text.to_string(), "7fb1377b-b223-49d9-a31a-5a02701dd310");

        let number: ReceiptId = serde_json::from_value(json!(10)).unwrap();
        assert_eq!(number.to_string(), "10");
        assert_eq!(serde_json::to_value(&number).unwrap(), json!(10));

        assert!(ReceiptId::from("  ").is_blank());
        assert!(!ReceiptId::from(0).is_blank());
    }

    #[test]
    fn test_absent_points_not_serialized() {
        let receipt = Receipt::new(ReceiptId::from(1), Map::new(), None);
        assert_eq!(serde_json::to_value(&receipt).unwrap(), json!({"id": 1}));
    }

    #[test]
    fn test_zero_points_distinct_from_absent() {
        let receipt = Receipt::new(ReceiptId::from(1), Map::new(), Some(0));
        assert_eq!(receipt.points, Some(0));
        assert_eq!(serde_json::to_value(&receipt).unwrap(), json!({"id": 1, "points": 0}));
    }

    #[test]
    fn test_stale_points_in_fields_dropped() {
        let mut fields = Map::new();
        fields.insert("retailer".to_string(), json!("Walgreens"));
        fields.insert("points".to_string(), json!(99));
        fields.insert("id".to_string(), json!("client-side"));

        let receipt = Receipt::new(ReceiptId::from(10), fields, None);
        assert_eq!(receipt.points, None);
        assert_eq!(
            serde_json::to_value(&receipt).unwrap(),
            json!({"id": 10, "retailer": "Walgreens"})
        );
    }

    #[test]
    fn test_field_display() {
        let mut fields = Map::new();
        fields.insert("retailer".to_string(), json!("M&M Corner Market"));
        fields.insert("total".to_string(), json!(9.5));
        let receipt = Receipt::new(ReceiptId::from("abc"), fields, None);

        assert_eq!(receipt.retailer(), "M&M Corner Market");
        assert_eq!(receipt.field_display("total"), "9.5");
        assert_eq!(receipt.field_display("purchaseDate"), "");
    }
}
