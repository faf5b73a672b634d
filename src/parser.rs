// 🏗️ Field Parser - RawReceipt → NormalizedReceipt
// Rejects unparsable dates, times and amounts at the boundary

use crate::error::{ReceiptError, Result};
use crate::receipt::{Item, NormalizedReceipt, PurchaseDate, PurchaseTime, RawReceipt, Total};
use std::str::FromStr;

// ============================================================================
// RECEIPT
// ============================================================================

/// Normalize a raw receipt. The first failing field aborts the whole receipt.
pub fn normalize(raw: &RawReceipt) -> Result<NormalizedReceipt> {
    let purchase_date = parse_date(&raw.purchase_date)?;
    let purchase_time = parse_time(&raw.purchase_time)?;
    let total = parse_total(&raw.total)?;

    let items = raw
        .items
        .iter()
        .enumerate()
        .map(|(index, item)| {
            let field = format!("items[{}].price", index);
            Ok(Item {
                short_description: item.short_description.clone(),
                price: parse_price(&field, &item.price)?,
            })
        })
        .collect::<Result<Vec<Item>>>()?;

    Ok(NormalizedReceipt {
        retailer: raw.retailer.clone(),
        purchase_date,
        purchase_time,
        items,
        total,
    })
}

// ============================================================================
// FIELDS
// ============================================================================

/// YYYY-MM-DD. Calendar validity is not checked (2022-02-31 is accepted).
pub fn parse_date(value: &str) -> Result<PurchaseDate> {
    const FIELD: &str = "purchaseDate";

    let parts: Vec<&str> = value.split('-').collect();
    if parts.len() != 3 {
        return Err(ReceiptError::malformed(FIELD, value));
    }

    Ok(PurchaseDate {
        year: parse_int(FIELD, value, parts[0])?,
        month: parse_int(FIELD, value, parts[1])?,
        day: parse_int(FIELD, value, parts[2])?,
    })
}

/// HH:MM. Only integer parseability is checked.
pub fn parse_time(value: &str) -> Result<PurchaseTime> {
    const FIELD: &str = "purchaseTime";

    let parts: Vec<&str> = value.split(':').collect();
    if parts.len() != 2 {
        return Err(ReceiptError::malformed(FIELD, value));
    }

    Ok(PurchaseTime {
        hour: parse_int(FIELD, value, parts[0])?,
        minute: parse_int(FIELD, value, parts[1])?,
    })
}

/// Parse the total as a float and as an exact dollar/cent pair.
///
/// The cent part must be exactly two digits so that `dollars.cents`
/// reconstructs the submitted string.
pub fn parse_total(value: &str) -> Result<Total> {
    const FIELD: &str = "total";
    let malformed = || ReceiptError::malformed(FIELD, value);

    let (dollars_str, cents_str) = value.split_once('.').ok_or_else(malformed)?;

    if !is_digits(dollars_str) || cents_str.len() != 2 || !is_digits(cents_str) {
        return Err(malformed());
    }

    let dollars: u64 = dollars_str.parse().map_err(|_| malformed())?;
    let cents: u8 = cents_str.parse().map_err(|_| malformed())?;
    let amount: f64 = value.parse().map_err(|_| malformed())?;

    Ok(Total {
        dollars,
        cents,
        amount,
    })
}

/// Item price: any finite, non-negative decimal.
pub fn parse_price(field: &str, value: &str) -> Result<f64> {
    match value.parse::<f64>() {
        Ok(price) if price.is_finite() && price >= 0.0 => Ok(price),
        _ => Err(ReceiptError::malformed(field, value)),
    }
}

// ============================================================================
// HELPERS
// ============================================================================

/// Unsigned decimal digits only; `FromStr` alone would also take "+3"
fn parse_int<T: FromStr>(field: &str, whole: &str, part: &str) -> Result<T> {
    if !is_digits(part) {
        return Err(ReceiptError::malformed(field, whole));
    }
    part.parse::<T>()
        .map_err(|_| ReceiptError::malformed(field, whole))
}

fn is_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

// ============================================================================
// TESTS
// ============================================================================
