// 🔄 Receipt Processor - parse → score → dedupe → store
// One instance is shared by every request; tests build their own.

use crate::deduplication::DuplicateDetector;
use crate::error::{ReceiptError, Result};
use crate::parser;
use crate::receipt::RawReceipt;
use crate::scoring;
use crate::store::ReceiptStore;

#[derive(Debug, Default)]
pub struct ReceiptProcessor {
    store: ReceiptStore,
    detector: DuplicateDetector,
}

impl ReceiptProcessor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_components(store: ReceiptStore, detector: DuplicateDetector) -> Self {
        ReceiptProcessor { store, detector }
    }

    /// Score and store a submitted receipt, returning its identifier.
    ///
    /// Malformed receipts never record a fingerprint, so fixing a bad
    /// field and resubmitting is not treated as a duplicate. Scoring runs
    /// before the fingerprint is recorded; only `insert` follows it.
    pub fn process(&self, raw: &RawReceipt) -> Result<String> {
        let normalized = parser::normalize(raw).map_err(|e| {
            tracing::warn!(retailer = %raw.retailer, error = %e, "Rejected malformed receipt");
            e
        })?;

        let scored = scoring::score(normalized);
        let points = scored.points();

        let fingerprint = self.detector.fingerprint(raw);
        if let Err(e) = self.detector.register(fingerprint) {
            tracing::warn!(retailer = %raw.retailer, "Rejected duplicate receipt");
            return Err(e);
        }

        let id = self.store.insert(scored);

        tracing::info!(%id, points, "Processed receipt");
        Ok(id)
    }

    pub fn points(&self, id: &str) -> Result<u64> {
        self.store.lookup(id).map_err(|e| {
            if let ReceiptError::NotFound(_) = e {
                tracing::debug!(%id, "Lookup of unknown receipt id");
            }
            e
        })
    }

    pub fn store(&self) -> &ReceiptStore {
        &self.store
    }

    pub fn detector(&self) -> &DuplicateDetector {
        &self.detector
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::receipt::RawItem;
    use std::sync::Arc;
    use std::thread;

    fn target_receipt() -> RawReceipt {
        let items = [
            ("Mountain Dew 12PK", "6.49"),
            ("Emils Cheese Pizza", "12.25"),
            ("Knorr Creamy Chicken", "1.26"),
            ("Doritos Nacho Cheese", "3.35"),
            ("   Klarbrunn 12-PK 12 FL OZ  ", "12.00"),
        ];

        RawReceipt {
            retailer: "Target".to_string(),
            purchase_date: "2022-01-01".to_string(),
            purchase_time: "13:01".to_string(),
            items: items
                .iter()
                .map(|(d, p)| RawItem {
                    short_description: d.to_string(),
                    price: p.to_string(),
                })
                .collect(),
            total: "35.35".to_string(),
        }
    }

    #[test]
    fn test_process_then_lookup() {
        let processor = ReceiptProcessor::new();
        let id = processor.process(&target_receipt()).unwrap();

        assert_eq!(processor.points(&id), Ok(28));
    }

    #[test]
    fn test_duplicate_submission() {
        let processor = ReceiptProcessor::new();

        assert!(processor.process(&target_receipt()).is_ok());
        assert_eq!(
            processor.process(&target_receipt()),
            Err(ReceiptError::DuplicateSubmission)
        );
        assert_eq!(processor.store().len(), 1);
    }

    #[test]
    fn test_malformed_receipt_leaves_no_trace() {
        let processor = ReceiptProcessor::new();
        let mut raw = target_receipt();
        raw.total = "35".to_string();

        assert!(matches!(
            processor.process(&raw),
            Err(ReceiptError::MalformedInput { ref field, .. }) if field == "total"
        ));
        assert!(processor.store().is_empty());
        assert!(processor.detector().is_empty());

        // Fixing the field keeps the receipt acceptable
        raw.total = "35.35".to_string();
        assert!(processor.process(&raw).is_ok());
    }

    #[test]
    fn test_huge_price_is_stored_then_rejected_as_duplicate() {
        let processor = ReceiptProcessor::new();
        let mut raw = target_receipt();
        raw.items = vec![
            RawItem {
                short_description: "abc".to_string(),
                price: "1e300".to_string(),
            },
            RawItem {
                short_description: "def".to_string(),
                price: "1e300".to_string(),
            },
        ];

        let id = processor.process(&raw).unwrap();
        assert_eq!(processor.points(&id), Ok(u64::MAX));
        assert_eq!(processor.store().len(), 1);
        assert_eq!(processor.detector().len(), 1);

        assert_eq!(processor.process(&raw), Err(ReceiptError::DuplicateSubmission));
        assert_eq!(processor.store().len(), 1);
    }

    #[test]
    fn test_unknown_id() {
        let processor = ReceiptProcessor::new();
        let unknown = uuid::Uuid::new_v4().to_string();

        assert_eq!(processor.points(&unknown), Err(ReceiptError::NotFound(unknown.clone())));
    }

    #[test]
    fn test_processors_are_isolated() {
        let a = ReceiptProcessor::new();
        let b = ReceiptProcessor::new();

        let id = a.process(&target_receipt()).unwrap();
        assert!(b.process(&target_receipt()).is_ok());
        assert!(b.points(&id).is_err());
    }

    #[test]
    fn test_concurrent_submissions() {
        let processor = Arc::new(ReceiptProcessor::new());

        let handles: Vec<_> = (0..16)
            .map(|i| {
                let processor = Arc::clone(&processor);
                thread::spawn(move || {
                    let mut raw = target_receipt();
                    // Half the threads share a receipt, half submit their own
                    if i % 2 == 0 {
                        raw.retailer = format!("Target {}", i);
                    }
                    processor.process(&raw)
                })
            })
            .collect();

        let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        let accepted: Vec<&String> = results.iter().filter_map(|r| r.as_ref().ok()).collect();

        assert_eq!(accepted.len(), 9);
        assert_eq!(processor.store().len(), 9);
        for id in accepted {
            assert!(processor.points(id).is_ok());
        }
    }
}
