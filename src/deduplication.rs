// 🔍 Duplicate Detector - Reject resubmission of an identical receipt
//
// Two-level fingerprint:
//   fast    - FNV-1a 64-bit over the concatenated significant fields
//   digest  - SHA-256 over the same fields, each length-delimited
// A receipt is a duplicate only when both levels match a recorded entry,
// so a fast-hash collision between distinct receipts is not a rejection.

use crate::error::{ReceiptError, Result};
use crate::receipt::RawReceipt;
use fnv::FnvHasher;
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::hash::Hasher;
use std::sync::{Mutex, PoisonError};

// ============================================================================
// FINGERPRINT
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Fingerprint {
    pub fast: u64,
    pub digest: [u8; 32],
}

impl Fingerprint {
    /// Fingerprint over retailer, date, time, total and every item in order
    pub fn of(receipt: &RawReceipt) -> Self {
        let mut fnv = FnvHasher::default();
        let mut sha = Sha256::new();

        for field in significant_fields(receipt) {
            fnv.write(field.as_bytes());

            sha.update((field.len() as u64).to_le_bytes());
            sha.update(field.as_bytes());
        }

        let mut digest = [0u8; 32];
        digest.copy_from_slice(&sha.finalize());

        Fingerprint {
            fast: fnv.finish(),
            digest,
        }
    }
}

fn significant_fields(receipt: &RawReceipt) -> impl Iterator<Item = &str> {
    [
        receipt.retailer.as_str(),
        receipt.purchase_date.as_str(),
        receipt.purchase_time.as_str(),
        receipt.total.as_str(),
    ]
    .into_iter()
    .chain(
        receipt
            .items
            .iter()
            .flat_map(|item| [item.short_description.as_str(), item.price.as_str()]),
    )
}

// ============================================================================
// DETECTOR
// ============================================================================

/// Fingerprints of every accepted receipt for the process lifetime
#[derive(Debug, Default)]
pub struct DuplicateDetector {
    /// fast hash → content digests sharing it
    seen: Mutex<HashMap<u64, Vec<[u8; 32]>>>,
}

impl DuplicateDetector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fingerprint(&self, receipt: &RawReceipt) -> Fingerprint {
        Fingerprint::of(receipt)
    }

    /// Record a fingerprint, or fail if the same receipt was already recorded.
    /// Check and record happen under one lock.
    pub fn register(&self, fingerprint: Fingerprint) -> Result<()> {
        let mut seen = self.seen.lock().unwrap_or_else(PoisonError::into_inner);
        let digests = seen.entry(fingerprint.fast).or_default();

        if digests.contains(&fingerprint.digest) {
            return Err(ReceiptError::DuplicateSubmission);
        }

        if !digests.is_empty() {
            tracing::debug!(
                fast = fingerprint.fast,
                "Fast fingerprint collision with distinct content"
            );
        }

        digests.push(fingerprint.digest);
        Ok(())
    }

    /// Has this exact receipt been recorded?
    pub fn contains(&self, fingerprint: &Fingerprint) -> bool {
        let seen = self.seen.lock().unwrap_or_else(PoisonError::into_inner);
        seen.get(&fingerprint.fast)
            .map_or(false, |digests| digests.contains(&fingerprint.digest))
    }

    /// Number of recorded fingerprints
    pub fn len(&self) -> usize {
        let seen = self.seen.lock().unwrap_or_else(PoisonError::into_inner);
        seen.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

// ============================================================================
// TESTS
// ============================================================================
