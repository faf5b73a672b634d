// 🗄️ Receipt Store - Append-only, in-memory registry of scored receipts
// Identity = UUID assigned at insert; no update or delete

use crate::error::{ReceiptError, Result};
use crate::receipt::{ScoredReceipt, StoredReceipt};
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

#[derive(Debug, Clone, Default)]
pub struct ReceiptStore {
    receipts: Arc<RwLock<HashMap<String, StoredReceipt>>>,
}

impl ReceiptStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a scored receipt under a fresh identifier
    pub fn insert(&self, scored: ScoredReceipt) -> String {
        let mut receipts = self.receipts.write().unwrap_or_else(PoisonError::into_inner);

        loop {
            let id = uuid::Uuid::new_v4().to_string();
            if let Entry::Vacant(slot) = receipts.entry(id) {
                let id = slot.key().clone();
                slot.insert(StoredReceipt::new(id.clone(), scored));
                return id;
            }
        }
    }

    /// Points for a stored receipt
    pub fn lookup(&self, id: &str) -> Result<u64> {
        self.get(id)
            .map(|stored| stored.points())
            .ok_or_else(|| ReceiptError::NotFound(id.to_string()))
    }

    pub fn get(&self, id: &str) -> Option<StoredReceipt> {
        let receipts = self.receipts.read().unwrap_or_else(PoisonError::into_inner);
        receipts.get(id).cloned()
    }

    pub fn len(&self) -> usize {
        let receipts = self.receipts.read().unwrap_or_else(PoisonError::into_inner);
        receipts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::receipt::{NormalizedReceipt, PurchaseDate, PurchaseTime, Total};
    use crate::scoring;
    use std::collections::HashSet;
    use std::thread;

    fn scored(retailer: &str) -> ScoredReceipt {
        scoring::score(NormalizedReceipt {
            retailer: retailer.to_string(),
            purchase_date: PurchaseDate {
                year: 2022,
                month: 1,
                day: 2,
            },
            purchase_time: PurchaseTime { hour: 9, minute: 0 },
            items: vec![],
            total: Total {
                dollars: 1,
                cents: 10,
                amount: 1.10,
            },
        })
    }

    #[test]
    fn test_insert_then_lookup() {
        let store = ReceiptStore::new();
        let id = store.insert(scored("Target"));

        assert_eq!(store.lookup(&id), Ok(6));
        assert_eq!(store.len(), 1);

        let stored = store.get(&id).unwrap();
        assert_eq!(stored.id(), id);
        assert_eq!(stored.receipt().retailer, "Target");
    }

    #[test]
    fn test_identifiers_are_uuids() {
        let store = ReceiptStore::new();
        let id = store.insert(scored("Target"));
        assert!(uuid::Uuid::parse_str(&id).is_ok());
    }

    #[test]
    fn test_lookup_unknown_id() {
        let store = ReceiptStore::new();
        store.insert(scored("Target"));

        let unknown = uuid::Uuid::new_v4().to_string();
        assert_eq!(store.lookup(&unknown), Err(ReceiptError::NotFound(unknown.clone())));
        assert!(store.get("not-a-uuid").is_none());
    }

    #[test]
    fn test_same_receipt_inserted_twice_gets_two_ids() {
        let store = ReceiptStore::new();
        let a = store.insert(scored("Target"));
        let b = store.insert(scored("Target"));

        assert_ne!(a, b);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_clones_share_storage() {
        let store = ReceiptStore::new();
        let other = store.clone();
        let id = other.insert(scored("Walgreens"));

        assert_eq!(store.lookup(&id), Ok(9));
    }

    #[test]
    fn test_concurrent_inserts_are_not_lost() {
        let store = ReceiptStore::new();

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let store = store.clone();
                thread::spawn(move || {
                    (0..50)
                        .map(|_| store.insert(scored("Target")))
                        .collect::<Vec<_>>()
                })
            })
            .collect();

        let ids: HashSet<String> = handles
            .into_iter()
            .flat_map(|h| h.join().unwrap())
            .collect();

        assert_eq!(ids.len(), 400);
        assert_eq!(store.len(), 400);
    }
}
