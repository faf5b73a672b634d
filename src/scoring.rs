// 🎯 Scoring Engine - Point rules for normalized receipts
//
// Each rule is independent and additive:
//   1. +1 per ASCII alphanumeric character in the retailer name
//   2. +50 if the total has no cents
//   3. +25 if the cents are a multiple of 25
//   4. +5 per complete pair of items
//   5. Per item: trimmed description length a multiple of 3 → ceil(price * 0.2),
//      else a description starting with g/G → +10
//   6. +6 if the purchase day is odd
//   7. +10 if purchased strictly after 14:00 and strictly before 16:00

use crate::receipt::{Item, NormalizedReceipt, ScoredReceipt};
use serde::Serialize;

const ROUND_DOLLAR_POINTS: u64 = 50;
const QUARTER_MULTIPLE_POINTS: u64 = 25;
const ITEM_PAIR_POINTS: u64 = 5;
const PRICE_MULTIPLIER: f64 = 0.2;
const G_DESCRIPTION_POINTS: u64 = 10;
const ODD_DAY_POINTS: u64 = 6;
const AFTERNOON_POINTS: u64 = 10;

const AFTERNOON_START: i32 = 14 * 60;
const AFTERNOON_END: i32 = 16 * 60;

// ============================================================================
// BREAKDOWN
// ============================================================================

/// Points contributed by each rule
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PointsBreakdown {
    pub retailer_name: u64,
    pub round_dollar: u64,
    pub quarter_multiple: u64,
    pub item_pairs: u64,
    pub item_descriptions: u64,
    pub odd_day: u64,
    pub afternoon: u64,
}

impl PointsBreakdown {
    /// Sum of all rules, saturating at `u64::MAX` for absurdly large prices
    pub fn total(&self) -> u64 {
        self.rules()
            .iter()
            .fold(0u64, |sum, (_, points)| sum.saturating_add(*points))
    }

    /// (rule name, points) pairs in rule order
    pub fn rules(&self) -> [(&'static str, u64); 7] {
        [
            ("retailer name", self.retailer_name),
            ("round dollar total", self.round_dollar),
            ("total multiple of 0.25", self.quarter_multiple),
            ("item pairs", self.item_pairs),
            ("item descriptions", self.item_descriptions),
            ("odd purchase day", self.odd_day),
            ("purchased 2pm-4pm", self.afternoon),
        ]
    }
}

// ============================================================================
// ENGINE
// ============================================================================

/// Compute every rule's contribution
pub fn breakdown(receipt: &NormalizedReceipt) -> PointsBreakdown {
    let cents = receipt.total.cents;
    let time = receipt.purchase_time.minutes();

    PointsBreakdown {
        retailer_name: receipt
            .retailer
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .count() as u64,
        round_dollar: if cents == 0 { ROUND_DOLLAR_POINTS } else { 0 },
        quarter_multiple: if cents % 25 == 0 {
            QUARTER_MULTIPLE_POINTS
        } else {
            0
        },
        item_pairs: (receipt.items.len() / 2) as u64 * ITEM_PAIR_POINTS,
        item_descriptions: receipt
            .items
            .iter()
            .map(item_points)
            .fold(0u64, u64::saturating_add),
        odd_day: if receipt.purchase_date.day % 2 == 1 {
            ODD_DAY_POINTS
        } else {
            0
        },
        afternoon: if time > AFTERNOON_START && time < AFTERNOON_END {
            AFTERNOON_POINTS
        } else {
            0
        },
    }
}

/// Total points for a receipt
pub fn points(receipt: &NormalizedReceipt) -> u64 {
    breakdown(receipt).total()
}

/// Attach points to a receipt. The result's points are fixed from here on.
pub fn score(receipt: NormalizedReceipt) -> ScoredReceipt {
    let breakdown = breakdown(&receipt);
    tracing::debug!(?breakdown, retailer = %receipt.retailer, "Scored receipt");
    ScoredReceipt::new(receipt, breakdown.total())
}

fn item_points(item: &Item) -> u64 {
    let description = item.short_description.trim();

    if description.chars().count() % 3 == 0 {
        // Float-to-int casts saturate, so a huge price yields u64::MAX
        (item.price * PRICE_MULTIPLIER).ceil() as u64
    } else if description.starts_with(['g', 'G']) {
        G_DESCRIPTION_POINTS
    } else {
        0
    }
}

// ============================================================================
// TESTS
// ============================================================================
