use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// An invoice record as the data layer hands it over.
///
/// Nested fields stay as raw JSON because the store is not consistent about
/// them: `items` and `bill_to` may arrive as arrays/objects or as JSON text.
#[derive(Debug, Default, Deserialize, Clone)]
pub struct RawInvoice {
    #[serde(default, deserialize_with = "lenient_text")]
    pub invoice_number: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub issue_date: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub due_date: Option<String>,
    #[serde(default, alias = "company")]
    pub business: Value,
    #[serde(default)]
    pub bill_to: Value,
    #[serde(default, deserialize_with = "lenient_text")]
    pub description: Option<String>,
    #[serde(default)]
    pub items: Value,
    #[serde(default, deserialize_with = "lenient_number")]
    pub subtotal: f64,
    #[serde(default, deserialize_with = "lenient_number")]
    pub shipping: f64,
    #[serde(
        default,
        alias = "discount_percent",
        alias = "discountPercent",
        deserialize_with = "lenient_number"
    )]
    pub discount: f64,
    #[serde(default, deserialize_with = "lenient_number")]
    pub total: f64,
    #[serde(default, deserialize_with = "lenient_text")]
    pub notes: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub bank_details: Option<String>,
}

/// A party block (issuer or recipient) before normalization.
#[derive(Debug, Default, Deserialize, Clone)]
pub struct RawParty {
    #[serde(default, deserialize_with = "lenient_text")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub phone: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub address: Option<String>,
    #[serde(default, alias = "vatNumber", deserialize_with = "lenient_text")]
    pub vat_number: Option<String>,
    #[serde(default, alias = "logoUrl", deserialize_with = "lenient_text")]
    pub logo_url: Option<String>,
}

#[derive(Debug, Default, Deserialize, Clone)]
pub struct RawLineItem {
    #[serde(default, deserialize_with = "lenient_text")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "lenient_number")]
    pub quantity: f64,
    #[serde(default, alias = "unitPrice", deserialize_with = "lenient_number")]
    pub unit_price: f64,
    #[serde(default, alias = "taxPercent", deserialize_with = "lenient_number")]
    pub tax: f64,
    #[serde(default, deserialize_with = "lenient_number")]
    pub amount: f64,
}

/// Reads a number or a numeric string; anything else (null, bool, garbage) is 0.
fn lenient_number<'de, D>(deserializer: D) -> std::result::Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(coerce_number).unwrap_or(0.0))
}

pub(crate) fn coerce_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|n| n.is_finite()),
        _ => None,
    }
}

/// Reads a string, stringifying numbers (invoice numbers are sometimes numeric).
fn lenient_text<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

/// Issuer or recipient details as they appear on the page.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PartyInfo {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub vat_number: Option<String>,
    pub logo_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineItem {
    pub description: String,
    pub quantity: f64,
    pub unit_price: f64,
    pub tax_percent: f64,
    /// Authoritative; rendered as stored, never recomputed.
    pub amount: f64,
}

impl LineItem {
    /// The amount the invoice editor computes when a row is entered.
    pub fn computed_amount(&self) -> f64 {
        self.quantity * self.unit_price * (1.0 + self.tax_percent / 100.0)
    }
}

/// A date field that may have failed to parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum InvoiceDate {
    Valid(NaiveDate),
    Invalid,
}

impl InvoiceDate {
    pub fn display(&self, format: &str) -> String {
        match self {
            InvoiceDate::Valid(date) => date.format(format).to_string(),
            InvoiceDate::Invalid => "Invalid Date".to_string(),
        }
    }
}

/// The canonical invoice, ready for layout.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InvoiceDocument {
    pub invoice_number: String,
    pub issue_date: InvoiceDate,
    pub due_date: InvoiceDate,
    pub company: PartyInfo,
    pub bill_to: Option<PartyInfo>,
    pub description: Option<String>,
    pub items: Vec<LineItem>,
    pub subtotal: f64,
    pub shipping: f64,
    pub discount_percent: f64,
    pub total: f64,
    pub notes: Option<String>,
    pub bank_details: Option<String>,
}

/// Split a multi-line free-text field into display rows.
pub fn text_lines(text: &str) -> Vec<&str> {
    text.split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(quantity: f64, unit_price: f64, tax_percent: f64) -> LineItem {
        LineItem {
            description: "Design work".to_string(),
            quantity,
            unit_price,
            tax_percent,
            amount: 0.0,
        }
    }

    #[test]
    fn computed_amount_applies_tax() {
        assert!((item(2.0, 100.0, 10.0).computed_amount() - 220.0).abs() < 1e-9);
        assert_eq!(item(3.0, 5.0, 0.0).computed_amount(), 15.0);
        assert_eq!(item(0.0, 100.0, 20.0).computed_amount(), 0.0);
    }

    #[test]
    fn text_lines_strip_carriage_returns() {
        assert_eq!(text_lines("a\r\nb\n"), ["a", "b", ""]);
    }
}
