//! Validation of store documents into typed records.
//!
//! Documents arrive as loosely-typed JSON. A document without a usable `id`
//! or `date` is rejected; missing or unparseable amounts and quantities
//! become zero; blank grouping keys become `None`. An amount or quantity
//! larger than `MAX_MAGNITUDE` rejects the document.

use std::str::FromStr;

use chrono::{DateTime, NaiveDate};
use frostline_core::records::{Cost, InventoryMovement, MovementType, Production, Sale};
use frostline_shared::types::{
    ActivityTypeId, CostId, MovementId, ProductId, ProductionId, SaleId,
};
use rust_decimal::Decimal;
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::error::DataError;

/// Field names accepted for each record attribute, store spelling first.
const ID: &[&str] = &["id"];
const DATE: &[&str] = &["date", "createdAt", "created_at"];
const PRODUCT_ID: &[&str] = &["productId", "product_id"];
const AMOUNT_USD: &[&str] = &["amountUSD", "amountUsd", "amount_usd"];
const AMOUNT_CDF: &[&str] = &["amountFC", "amountCDF", "amountFc", "amount_cdf"];
const EXPENSE_TYPE: &[&str] = &["expenseTypeName", "expense_type_name"];
const QUANTITY_PRODUCED: &[&str] = &["quantityProduced", "quantity_produced"];
const ACTIVITY_TYPE_ID: &[&str] = &["activityTypeId", "activity_type_id"];
const MOVEMENT_TYPE: &[&str] = &["movementType", "movement_type"];
const INITIAL_QUANTITY: &[&str] = &["initialQuantity", "initial_quantity"];
const QUANTITY_MOVED: &[&str] = &["quantityMoved", "quantity_moved"];
const REMAINING_QUANTITY: &[&str] = &["remainingQuantity", "remaining_quantity"];

/// Largest absolute amount or quantity a document may carry.
///
/// Keeps per-collection sums far inside the range of `Decimal`.
/// Equals 10^15 (`0x0003_8D7E_A4C6_8000`), scale 0.
pub const MAX_MAGNITUDE: Decimal = Decimal::from_parts(0xA4C6_8000, 0x0003_8D7E, 0, false, 0);

/// Outcome of validating one collection.
#[derive(Debug, Default)]
pub struct Validated<T> {
    /// Documents that became records, in collection order.
    pub records: Vec<T>,
    /// Why the other documents were rejected.
    pub rejected: Vec<DataError>,
}

/// Validates every document of `collection`.
///
/// # Errors
///
/// Returns `DataError::InvalidInput` if `value` is not a JSON array.
pub fn collection<T>(
    collection: &'static str,
    value: &Value,
    parse: fn(&Map<String, Value>) -> Result<T, String>,
) -> Result<Validated<T>, DataError> {
    let Value::Array(documents) = value else {
        return Err(DataError::InvalidInput(format!(
            "{collection} must be an array of documents"
        )));
    };

    let mut validated = Validated {
        records: Vec::with_capacity(documents.len()),
        rejected: Vec::new(),
    };

    for (index, document) in documents.iter().enumerate() {
        let outcome = match document {
            Value::Object(fields) => parse(fields),
            _ => Err("document is not an object".to_string()),
        };
        match outcome {
            Ok(record) => validated.records.push(record),
            Err(reason) => validated.rejected.push(DataError::InvalidDocument {
                collection,
                index,
                reason,
            }),
        }
    }

    Ok(validated)
}

/// Builds a `Sale` from a store document.
pub fn sale(doc: &Map<String, Value>) -> Result<Sale, String> {
    Ok(Sale {
        id: SaleId::from_uuid(required_id(doc)?),
        product_id: optional_id(doc, PRODUCT_ID).map(ProductId::from_uuid),
        amount_usd: number(doc, AMOUNT_USD)?,
        amount_cdf: number(doc, AMOUNT_CDF)?,
        date: required_date(doc)?,
    })
}

/// Builds a `Cost` from a store document.
pub fn cost(doc: &Map<String, Value>) -> Result<Cost, String> {
    Ok(Cost {
        id: CostId::from_uuid(required_id(doc)?),
        expense_type_name: optional_text(doc, EXPENSE_TYPE),
        amount_usd: number(doc, AMOUNT_USD)?,
        amount_cdf: number(doc, AMOUNT_CDF)?,
        date: required_date(doc)?,
    })
}

/// Builds a `Production` from a store document.
pub fn production(doc: &Map<String, Value>) -> Result<Production, String> {
    Ok(Production {
        id: ProductionId::from_uuid(required_id(doc)?),
        quantity_produced: number(doc, QUANTITY_PRODUCED)?,
        activity_type_id: optional_id(doc, ACTIVITY_TYPE_ID).map(ActivityTypeId::from_uuid),
        date: required_date(doc)?,
    })
}

/// Builds an `InventoryMovement` from a store document.
pub fn movement(doc: &Map<String, Value>) -> Result<InventoryMovement, String> {
    let movement_type = field(doc, MOVEMENT_TYPE)
        .and_then(Value::as_str)
        .ok_or_else(|| "missing movement type".to_string())
        .and_then(MovementType::from_str)?;

    Ok(InventoryMovement {
        id: MovementId::from_uuid(required_id(doc)?),
        movement_type,
        initial_quantity: number(doc, INITIAL_QUANTITY)?,
        quantity_moved: number(doc, QUANTITY_MOVED)?,
        remaining_quantity: number(doc, REMAINING_QUANTITY)?,
        product_id: optional_id(doc, PRODUCT_ID).map(ProductId::from_uuid),
        date: required_date(doc)?,
    })
}

/// Maps a store identifier to a UUID.
///
/// UUID strings are used as-is; any other non-blank identifier maps to a
/// stable name-based UUID so the same store id always groups together.
#[must_use]
pub fn store_id(raw: &str) -> Option<Uuid> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    let id = Uuid::parse_str(raw)
        .unwrap_or_else(|_| Uuid::new_v5(&Uuid::NAMESPACE_OID, raw.as_bytes()));
    Some(id)
}

/// Reads a decimal from a JSON number or numeric string.
#[must_use]
pub fn decimal(value: &Value) -> Option<Decimal> {
    let text = match value {
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.trim().to_string(),
        _ => return None,
    };
    Decimal::from_str(&text)
        .or_else(|_| Decimal::from_scientific(&text))
        .ok()
}

/// Reads a date from `YYYY-MM-DD`, an RFC 3339 timestamp, or a `{ "seconds": n }` timestamp.
#[must_use]
pub fn date(value: &Value) -> Option<NaiveDate> {
    match value {
        Value::String(s) => {
            let s = s.trim();
            NaiveDate::parse_from_str(s, "%Y-%m-%d")
                .ok()
                .or_else(|| DateTime::parse_from_rfc3339(s).ok().map(|d| d.date_naive()))
        }
        Value::Object(fields) => fields
            .get("seconds")
            .or_else(|| fields.get("_seconds"))
            .and_then(Value::as_i64)
            .and_then(|secs| DateTime::from_timestamp(secs, 0))
            .map(|d| d.date_naive()),
        _ => None,
    }
}

fn field<'a>(doc: &'a Map<String, Value>, names: &[&str]) -> Option<&'a Value> {
    names
        .iter()
        .find_map(|name| doc.get(*name))
        .filter(|v| !v.is_null())
}

fn required_id(doc: &Map<String, Value>) -> Result<Uuid, String> {
    optional_id(doc, ID).ok_or_else(|| "missing id".to_string())
}

fn optional_id(doc: &Map<String, Value>, names: &[&str]) -> Option<Uuid> {
    field(doc, names).and_then(Value::as_str).and_then(store_id)
}

fn optional_text(doc: &Map<String, Value>, names: &[&str]) -> Option<String> {
    field(doc, names)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
}

fn number(doc: &Map<String, Value>, names: &[&str]) -> Result<Decimal, String> {
    let value = field(doc, names).and_then(decimal).unwrap_or(Decimal::ZERO);
    if value.abs() > MAX_MAGNITUDE {
        return Err(format!("{} is out of range", names[0]));
    }
    Ok(value)
}

fn required_date(doc: &Map<String, Value>) -> Result<NaiveDate, String> {
    field(doc, DATE)
        .and_then(date)
        .ok_or_else(|| "missing or unreadable date".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal_macros::dec;
    use serde_json::json;

    const SALE_ID: &str = "6f1c2f7e-5d7b-4a63-9d4e-1b2a3c4d5e6f";

    fn object(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected an object"),
        }
    }

    #[test]
    fn test_sale_from_store_document() {
        let doc = object(json!({
            "id": SALE_ID,
            "productId": "ice-bag-5kg",
            "amountUSD": 12.5,
            "amountFC": "35000",
            "date": "2026-03-14"
        }));

        let sale = sale(&doc).unwrap();

        assert_eq!(sale.id.into_inner().to_string(), SALE_ID);
        assert_eq!(sale.product_id, store_id("ice-bag-5kg").map(ProductId::from_uuid));
        assert_eq!(sale.amount_usd, dec!(12.5));
        assert_eq!(sale.amount_cdf, dec!(35000));
        assert_eq!(sale.date, NaiveDate::from_ymd_opt(2026, 3, 14).unwrap());
    }

    #[test]
    fn test_missing_amounts_default_to_zero() {
        let doc = object(json!({
            "id": "s1",
            "amountUSD": "n/a",
            "date": "2026-03-14"
        }));

        let sale = sale(&doc).unwrap();
        assert_eq!(sale.amount_usd, Decimal::ZERO);
        assert_eq!(sale.amount_cdf, Decimal::ZERO);
        assert!(sale.product_id.is_none());
    }

    #[rstest]
    #[case(json!({"date": "2026-03-14"}), "missing id")]
    #[case(json!({"id": "  ", "date": "2026-03-14"}), "missing id")]
    #[case(json!({"id": "s1"}), "missing or unreadable date")]
    #[case(json!({"id": "s1", "date": "14/03/2026"}), "missing or unreadable date")]
    fn test_sale_rejected(#[case] doc: Value, #[case] reason: &str) {
        assert_eq!(sale(&object(doc)).unwrap_err(), reason);
    }

    #[test]
    fn test_cost_blank_expense_type_is_none() {
        let doc = object(json!({
            "id": "c1",
            "expenseTypeName": "   ",
            "amountUSD": 4,
            "amountFC": 11200,
            "date": "2026-03-01T08:30:00Z"
        }));

        let cost = cost(&doc).unwrap();
        assert!(cost.expense_type_name.is_none());
        assert_eq!(cost.amount_usd, dec!(4));
        assert_eq!(cost.date, NaiveDate::from_ymd_opt(2026, 3, 1).unwrap());
    }

    #[test]
    fn test_production_with_timestamp_object() {
        let doc = object(json!({
            "id": "p1",
            "quantityProduced": 250,
            "activityTypeId": "bagging",
            "date": {"seconds": 1_772_323_200, "nanoseconds": 0}
        }));

        let run = production(&doc).unwrap();
        assert_eq!(run.quantity_produced, dec!(250));
        assert!(run.activity_type_id.is_some());
        assert_eq!(run.date, NaiveDate::from_ymd_opt(2026, 3, 1).unwrap());
    }

    #[test]
    fn test_movement_requires_known_type() {
        let good = object(json!({
            "id": "m1",
            "movementType": "OUT",
            "initialQuantity": 100,
            "quantityMoved": 30,
            "remainingQuantity": 70,
            "productId": "ice-bag-5kg",
            "date": "2026-03-02"
        }));
        let movement_record = movement(&good).unwrap();
        assert_eq!(movement_record.movement_type, MovementType::Out);
        assert!(movement_record.is_consistent());

        let unknown = object(json!({
            "id": "m2",
            "movementType": "TRANSFER",
            "date": "2026-03-02"
        }));
        assert!(movement(&unknown).is_err());

        let missing = object(json!({"id": "m3", "date": "2026-03-02"}));
        assert_eq!(movement(&missing).unwrap_err(), "missing movement type");
    }

    #[test]
    fn test_collection_splits_valid_and_rejected() {
        let value = json!([
            {"id": "s1", "amountUSD": 5, "date": "2026-03-01"},
            "not a document",
            {"amountUSD": 5, "date": "2026-03-01"},
            {"id": "s2", "amountUSD": 7, "date": "2026-03-02"}
        ]);

        let validated = collection("sales", &value, sale).unwrap();

        assert_eq!(validated.records.len(), 2);
        assert_eq!(validated.rejected.len(), 2);
        assert!(matches!(
            validated.rejected[0],
            DataError::InvalidDocument { collection: "sales", index: 1, .. }
        ));
        assert!(matches!(
            validated.rejected[1],
            DataError::InvalidDocument { index: 2, .. }
        ));
    }

    #[rstest]
    #[case("amountUSD", "79228162514264337593543950335")]
    #[case("amountFC", "-1000000000000000.01")]
    #[case("amountUSD", "1e16")]
    fn test_sale_amount_out_of_range(#[case] name: &str, #[case] amount: &str) {
        let mut doc = object(json!({"id": "s1", "date": "2026-03-01"}));
        doc.insert(name.to_string(), json!(amount));

        assert_eq!(sale(&doc).unwrap_err(), format!("{name} is out of range"));
    }

    #[test]
    fn test_amount_at_bound_is_accepted() {
        let doc = object(json!({
            "id": "s1",
            "amountUSD": "1000000000000000",
            "amountFC": "-1000000000000000",
            "date": "2026-03-01"
        }));

        let sale = sale(&doc).unwrap();
        assert_eq!(sale.amount_usd, MAX_MAGNITUDE);
        assert_eq!(sale.amount_cdf, -MAX_MAGNITUDE);
    }

    #[test]
    fn test_out_of_range_documents_are_rejected_from_collection() {
        let huge = "79228162514264337593543950335";
        let value = json!([
            {"id": "s1", "productId": "ice", "amountUSD": huge, "date": "2026-03-01"},
            {"id": "s2", "productId": "ice", "amountUSD": huge, "date": "2026-03-02"},
            {"id": "s3", "productId": "ice", "amountUSD": 12, "date": "2026-03-03"}
        ]);

        let validated = collection("sales", &value, sale).unwrap();

        assert_eq!(validated.records.len(), 1);
        assert_eq!(validated.rejected.len(), 2);
    }

    #[test]
    fn test_quantities_out_of_range() {
        let run = object(json!({"id": "p1", "quantityProduced": "1e20", "date": "2026-03-01"}));
        assert_eq!(production(&run).unwrap_err(), "quantityProduced is out of range");

        let moved = object(json!({
            "id": "m1",
            "movementType": "IN",
            "quantityMoved": "1e16",
            "date": "2026-03-01"
        }));
        assert_eq!(movement(&moved).unwrap_err(), "quantityMoved is out of range");
    }

    #[test]
    fn test_collection_rejects_non_array() {
        let err = collection("costs", &json!({"id": "c1"}), cost).unwrap_err();
        assert!(matches!(err, DataError::InvalidInput(_)));
    }

    #[test]
    fn test_store_id_is_stable() {
        assert_eq!(store_id("ice-bag-5kg"), store_id(" ice-bag-5kg "));
        assert_ne!(store_id("ice-bag-5kg"), store_id("water-1l"));
        assert_eq!(store_id(SALE_ID).unwrap().to_string(), SALE_ID);
        assert!(store_id("").is_none());
    }

    #[rstest]
    #[case(json!(12), Some(dec!(12)))]
    #[case(json!(0.25), Some(dec!(0.25)))]
    #[case(json!(" 1500.75 "), Some(dec!(1500.75)))]
    #[case(json!("1e3"), Some(dec!(1000)))]
    #[case(json!("abc"), None)]
    #[case(json!(true), None)]
    fn test_decimal(#[case] value: Value, #[case] expected: Option<Decimal>) {
        assert_eq!(decimal(&value), expected);
    }
}
