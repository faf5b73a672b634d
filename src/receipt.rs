// 🧾 Receipt Model - External payload and strict internal forms
// RawReceipt (untrusted text) → NormalizedReceipt → ScoredReceipt → StoredReceipt

use serde::{Deserialize, Serialize};

// ============================================================================
// EXTERNAL REPRESENTATION
// ============================================================================

/// RawReceipt - exactly what the client submitted, every field still text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawReceipt {
    pub retailer: String,

    /// YYYY-MM-DD
    pub purchase_date: String,

    /// HH:MM, 24-hour
    pub purchase_time: String,

    pub items: Vec<RawItem>,

    /// Decimal with two fractional digits, e.g. "35.35"
    pub total: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawItem {
    pub short_description: String,
    pub price: String,
}

// ============================================================================
// INTERNAL REPRESENTATION
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PurchaseDate {
    pub year: i16,
    pub month: i8,
    pub day: i8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PurchaseTime {
    pub hour: i8,
    pub minute: i8,
}

impl PurchaseTime {
    /// Minutes since midnight, for window comparisons
    pub fn minutes(&self) -> i32 {
        i32::from(self.hour) * 60 + i32::from(self.minute)
    }
}

/// Receipt total, kept both as an exact dollar/cent split and as a float
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Total {
    pub dollars: u64,
    pub cents: u8,
    pub amount: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Item {
    /// As submitted; scoring trims it
    pub short_description: String,
    pub price: f64,
}

/// NormalizedReceipt - only ever built by `parser::normalize`
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedReceipt {
    pub retailer: String,
    pub purchase_date: PurchaseDate,
    pub purchase_time: PurchaseTime,
    pub items: Vec<Item>,
    pub total: Total,
}

// ============================================================================
// LIFECYCLE STATES
// ============================================================================

/// A normalized receipt with its points attached. Points cannot change.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredReceipt {
    receipt: NormalizedReceipt,
    points: u64,
}

impl ScoredReceipt {
    pub(crate) fn new(receipt: NormalizedReceipt, points: u64) -> Self {
        ScoredReceipt { receipt, points }
    }

    pub fn receipt(&self) -> &NormalizedReceipt {
        &self.receipt
    }

    pub fn points(&self) -> u64 {
        self.points
    }
}

/// A scored receipt registered in the store under its identifier
#[derive(Debug, Clone, PartialEq)]
pub struct StoredReceipt {
    id: String,
    scored: ScoredReceipt,
}

impl StoredReceipt {
    pub(crate) fn new(id: String, scored: ScoredReceipt) -> Self {
        StoredReceipt { id, scored }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn receipt(&self) -> &NormalizedReceipt {
        self.scored.receipt()
    }

    pub fn points(&self) -> u64 {
        self.scored.points()
    }
}

// ============================================================================
// TESTS
// ============================================================================
