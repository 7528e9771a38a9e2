use contracts::domain::a001_petpooja_sale::SalesRecord;
use serde_json::{Map, Value};

const ROUND_OFF_KEYS: [&str; 3] = ["round_off", "roundoff", "roundOff"];

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum NormalizeError {
    #[error("field '{field}' is not a finite number: {value}")]
    NonFiniteAmount { field: &'static str, value: f64 },
}

/// Build a sales record from one API object.
///
/// Missing keys fall back to empty text / `0.0`. Round-off comes from the
/// source when it is non-zero, otherwise it is derived as
/// `net - (sale - tax - discount)` rounded to cents, as long as the net or
/// sale amount is non-zero.
pub fn normalize(item: &Map<String, Value>) -> Result<SalesRecord, NormalizeError> {
    let sale_amount = get_f64(item, &["Invoice amount"]);
    let discount_amount = get_f64(item, &["Discount amount"]);
    let tax_amount = get_f64(item, &["Tax amount"]);
    let net_sale = get_f64(item, &["Net sale"]);

    let mut round_off = get_f64(item, &ROUND_OFF_KEYS);
    if round_off == 0.0 && (net_sale != 0.0 || sale_amount != 0.0) {
        round_off = round_cents(net_sale - (sale_amount - tax_amount - discount_amount));
    }

    let record = SalesRecord {
        receipt_number: get_string(item, &["Receipt number"]),
        sale_date: get_string(item, &["Receipt Date"]),
        transaction_time: get_string(item, &["Transaction Time"]),
        sale_amount,
        tax_amount,
        discount_amount,
        round_off,
        net_sale,
        payment_mode: get_string(item, &["Payment Mode"]),
        order_type: get_string(item, &["Order Type"]),
        transaction_status: get_string(item, &["Transaction status"]),
    };

    for (field, value) in record.amounts() {
        if !value.is_finite() {
            return Err(NormalizeError::NonFiniteAmount { field, value });
        }
    }
    Ok(record)
}

/// First present non-null candidate, as text. Numbers keep their source text.
fn get_string(item: &Map<String, Value>, keys: &[&str]) -> String {
    match first_present(item, keys) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        Some(other) => other.to_string(),
        None => String::new(),
    }
}

/// First candidate that coerces to a number; 0.0 when none does
fn get_f64(item: &Map<String, Value>, keys: &[&str]) -> f64 {
    keys.iter()
        .filter_map(|key| match item.get(*key)? {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => parse_decimal(s),
            _ => None,
        })
        .next()
        .unwrap_or(0.0)
}

fn first_present<'a>(item: &'a Map<String, Value>, keys: &[&str]) -> Option<&'a Value> {
    keys.iter()
        .filter_map(|key| item.get(*key))
        .find(|value| !value.is_null())
}

/// Decimal text such as " 1,250.50 "
fn parse_decimal(raw: &str) -> Option<f64> {
    let cleaned: String = raw.trim().chars().filter(|c| *c != ',').collect();
    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse::<f64>().ok()
}

fn round_cents(value: f64) -> f64 {
    (value * 100.0).round_ties_even() / 100.0
}
