use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::{debug, warn};

use super::model::{
    InvoiceDate, InvoiceDocument, LineItem, PartyInfo, RawInvoice, RawLineItem, RawParty,
};
use crate::error::{FieldError, InvoiceError, Result};

/// Decode a nested field that may be stored as a value or as JSON text.
///
/// `null` is [`FieldError::Missing`]; a string is parsed as JSON first; the
/// decoded value is then deserialized into `T`.
pub fn parse_nested_field<T: DeserializeOwned>(raw: &Value) -> std::result::Result<T, FieldError> {
    let decoded = match raw {
        Value::Null => return Err(FieldError::Missing),
        Value::String(text) => serde_json::from_str::<Value>(text).map_err(FieldError::Malformed)?,
        other => other.clone(),
    };
    if decoded.is_null() {
        return Err(FieldError::Missing);
    }
    serde_json::from_value(decoded).map_err(FieldError::Shape)
}

/// Line items as a list, accepting either an array or an object of rows.
#[derive(Debug, Default, Deserialize)]
#[serde(try_from = "ItemsRepr")]
pub struct LineItemList(pub Vec<RawLineItem>);

#[derive(Deserialize)]
#[serde(untagged)]
enum ItemsRepr {
    List(Vec<RawLineItem>),
    Keyed(Map<String, Value>),
}

impl TryFrom<ItemsRepr> for LineItemList {
    type Error = serde_json::Error;

    fn try_from(repr: ItemsRepr) -> std::result::Result<Self, Self::Error> {
        match repr {
            ItemsRepr::List(items) => Ok(LineItemList(items)),
            ItemsRepr::Keyed(map) => keyed_values(map)
                .into_iter()
                .map(serde_json::from_value)
                .collect::<std::result::Result<Vec<_>, _>>()
                .map(LineItemList),
        }
    }
}

/// Own-value order of a JS object: index-like keys ascending, then the rest
/// in insertion order.
fn keyed_values(map: Map<String, Value>) -> Vec<Value> {
    let mut indexed: Vec<(u32, Value)> = Vec::new();
    let mut named: Vec<Value> = Vec::new();
    for (key, value) in map {
        match array_index(&key) {
            Some(idx) => indexed.push((idx, value)),
            None => named.push(value),
        }
    }
    indexed.sort_by_key(|(idx, _)| *idx);
    indexed.into_iter().map(|(_, v)| v).chain(named).collect()
}

fn array_index(key: &str) -> Option<u32> {
    if key.is_empty() || !key.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    if key.len() > 1 && key.starts_with('0') {
        return None;
    }
    key.parse::<u32>().ok().filter(|idx| *idx != u32::MAX)
}

fn parse_date(field: &str, raw: Option<&str>) -> InvoiceDate {
    let Some(text) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
        debug!(field, "date is missing; rendering as invalid");
        return InvoiceDate::Invalid;
    };

    if let Ok(date) = NaiveDate::parse_from_str(text, "%Y-%m-%d") {
        return InvoiceDate::Valid(date);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return InvoiceDate::Valid(dt.date_naive());
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(text, fmt) {
            return InvoiceDate::Valid(dt.date());
        }
    }

    warn!(field, value = text, "unparseable date; rendering as invalid");
    InvoiceDate::Invalid
}

fn party(raw: RawParty) -> PartyInfo {
    PartyInfo {
        name: raw.name.unwrap_or_default(),
        email: raw.email.unwrap_or_default(),
        phone: non_empty(raw.phone),
        address: non_empty(raw.address),
        vat_number: non_empty(raw.vat_number),
        logo_url: non_empty(raw.logo_url),
    }
}

fn non_empty(text: Option<String>) -> Option<String> {
    text.filter(|s| !s.is_empty())
}

fn line_item(raw: RawLineItem) -> LineItem {
    LineItem {
        description: raw.description.unwrap_or_default(),
        quantity: raw.quantity,
        unit_price: raw.unit_price,
        tax_percent: raw.tax,
        amount: raw.amount,
    }
}

/// Log a swallowed nested-field failure at a level matching its severity.
fn report(field: &str, err: &FieldError) {
    match err {
        FieldError::Missing => debug!(field, "nested field absent"),
        _ => warn!(field, error = %err, "could not decode nested field; using empty value"),
    }
}

/// Build the canonical document. Never fails: bad leaves fall back to defaults.
pub fn normalize(raw: &RawInvoice) -> InvoiceDocument {
    let items = parse_nested_field::<LineItemList>(&raw.items)
        .map(|list| list.0)
        .unwrap_or_else(|err| {
            report("items", &err);
            Vec::new()
        });

    let bill_to = parse_nested_field::<RawParty>(&raw.bill_to)
        .map_err(|err| report("bill_to", &err))
        .ok()
        .map(party);

    let company = parse_nested_field::<RawParty>(&raw.business)
        .map_err(|err| report("business", &err))
        .map(party)
        .unwrap_or_default();

    let doc = InvoiceDocument {
        invoice_number: raw.invoice_number.clone().unwrap_or_default(),
        issue_date: parse_date("issue_date", raw.issue_date.as_deref()),
        due_date: parse_date("due_date", raw.due_date.as_deref()),
        company,
        bill_to,
        description: non_empty(raw.description.clone()),
        items: items.into_iter().map(line_item).collect(),
        subtotal: raw.subtotal,
        shipping: raw.shipping,
        discount_percent: raw.discount,
        total: raw.total,
        notes: non_empty(raw.notes.clone()),
        bank_details: non_empty(raw.bank_details.clone()),
    };

    debug!(
        invoice = %doc.invoice_number,
        items = doc.items.len(),
        has_client = doc.bill_to.is_some(),
        "normalized invoice"
    );
    doc
}

/// Normalize a JSON value. Fails only when the value is not an invoice object.
pub fn normalize_value(value: Value, input: &str) -> Result<InvoiceDocument> {
    let raw: RawInvoice = serde_json::from_value(value).map_err(|e| InvoiceError::InputParse {
        input: input.to_string(),
        source: e,
    })?;
    Ok(normalize(&raw))
}

/// Parse and normalize JSON text.
pub fn normalize_str(json: &str, input: &str) -> Result<InvoiceDocument> {
    let value: Value = serde_json::from_str(json).map_err(|e| InvoiceError::InputParse {
        input: input.to_string(),
        source: e,
    })?;
    normalize_value(value, input)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn nested_field_accepts_json_text() {
        let raw = json!(r#"{"name": "Acme Ltd", "email": "ap@acme.test"}"#);
        let party: RawParty = parse_nested_field(&raw).unwrap();
        assert_eq!(party.name.as_deref(), Some("Acme Ltd"));
    }

    #[test]
    fn nested_field_reports_malformed_text() {
        let raw = json!("{not valid json");
        let err = parse_nested_field::<RawParty>(&raw).unwrap_err();
        assert!(matches!(err, FieldError::Malformed(_)));
    }

    #[test]
    fn nested_field_null_is_missing() {
        let err = parse_nested_field::<RawParty>(&Value::Null).unwrap_err();
        assert!(matches!(err, FieldError::Missing));
        let err = parse_nested_field::<RawParty>(&json!("null")).unwrap_err();
        assert!(matches!(err, FieldError::Missing));
    }

    #[test]
    fn keyed_items_follow_index_order() {
        let raw = json!({
            "10": {"description": "k"},
            "2": {"description": "c"},
            "0": {"description": "a"},
            "extra": {"description": "z"},
            "1": {"description": "b"}
        });
        let list: LineItemList = parse_nested_field(&raw).unwrap();
        let names: Vec<_> = list
            .0
            .iter()
            .map(|i| i.description.clone().unwrap_or_default())
            .collect();
        assert_eq!(names, ["a", "b", "c", "k", "z"]);
    }

    #[test]
    fn signed_keys_are_not_indices() {
        let raw = json!({
            "b": {"description": "named"},
            "+1": {"description": "plus"},
            "0": {"description": "zero"}
        });
        let list: LineItemList = parse_nested_field(&raw).unwrap();
        let names: Vec<_> = list
            .0
            .iter()
            .map(|i| i.description.clone().unwrap_or_default())
            .collect();
        assert_eq!(names, ["zero", "named", "plus"]);
        assert_eq!(array_index("01"), None);
        assert_eq!(array_index("-1"), None);
        assert_eq!(array_index("12"), Some(12));
    }

    #[test]
    fn discount_accepts_percent_keys() {
        let doc = normalize_value(json!({"discount_percent": 7.5}), "test").unwrap();
        assert_eq!(doc.discount_percent, 7.5);
        let doc = normalize_value(json!({"discountPercent": "2.5"}), "test").unwrap();
        assert_eq!(doc.discount_percent, 2.5);
        let doc = normalize_value(json!({"discount": 10}), "test").unwrap();
        assert_eq!(doc.discount_percent, 10.0);
    }

    #[test]
    fn items_encoded_as_text() {
        let raw = json!(r#"[{"description": "Hosting", "quantity": "3", "unit_price": 5}]"#);
        let list: LineItemList = parse_nested_field(&raw).unwrap();
        assert_eq!(list.0.len(), 1);
        assert_eq!(list.0[0].quantity, 3.0);
        assert_eq!(list.0[0].unit_price, 5.0);
    }

    #[test]
    fn malformed_items_become_empty() {
        let doc = normalize_value(json!({"items": "[{oops"}), "test").unwrap();
        assert!(doc.items.is_empty());
        let doc = normalize_value(json!({"items": 42}), "test").unwrap();
        assert!(doc.items.is_empty());
    }

    #[test]
    fn missing_numbers_default_to_zero() {
        let doc = normalize_value(
            json!({"subtotal": null, "total": "12.5", "shipping": "n/a"}),
            "test",
        )
        .unwrap();
        assert_eq!(doc.subtotal, 0.0);
        assert_eq!(doc.total, 12.5);
        assert_eq!(doc.shipping, 0.0);
        assert_eq!(doc.discount_percent, 0.0);
    }

    #[test]
    fn dates_parse_or_mark_invalid() {
        let doc = normalize_value(
            json!({"issue_date": "2024-01-01T09:30:00Z", "due_date": "soon"}),
            "test",
        )
        .unwrap();
        assert_eq!(
            doc.issue_date,
            InvoiceDate::Valid(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap())
        );
        assert_eq!(doc.due_date, InvoiceDate::Invalid);
        assert_eq!(doc.due_date.display("%d/%m/%Y"), "Invalid Date");

        let doc = normalize_value(json!({"due_date": "  "}), "test").unwrap();
        assert_eq!(doc.issue_date, InvoiceDate::Invalid);
        assert_eq!(doc.due_date, InvoiceDate::Invalid);
    }

    #[test]
    fn company_alias_and_numeric_invoice_number() {
        let doc = normalize_value(
            json!({"invoice_number": 42, "company": {"name": "Studio", "vatNumber": "GB123"}}),
            "test",
        )
        .unwrap();
        assert_eq!(doc.invoice_number, "42");
        assert_eq!(doc.company.name, "Studio");
        assert_eq!(doc.company.vat_number.as_deref(), Some("GB123"));
    }

    #[test]
    fn top_level_must_be_an_object() {
        let err = normalize_str("[1, 2]", "stdin").unwrap_err();
        assert!(matches!(err, InvoiceError::InputParse { .. }));
    }
}
